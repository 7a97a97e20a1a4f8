//! The optimizer capability and the shared search result.

use crate::error::Result;
use crate::placement::{evaluate, PlacementRequest};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// A function to minimize over the unit hypercube `[0, 1]^D`.
///
/// # Thread Safety
///
/// `Objective` must be `Send + Sync` because drivers may evaluate a
/// population in parallel using rayon.
pub trait Objective: Send + Sync {
    /// Number of decision variables `D`.
    fn dimension(&self) -> usize;

    /// Scalar cost of `x`. Lower is better.
    ///
    /// An `Err` aborts this evaluation only; drivers score it as the worst
    /// possible fitness and keep going.
    fn fitness(&self, x: &[f64]) -> Result<f64>;

    /// Called at the end of each generation with the current best fitness.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}

impl Objective for PlacementRequest {
    fn dimension(&self) -> usize {
        PlacementRequest::dimension(self)
    }

    fn fitness(&self, x: &[f64]) -> Result<f64> {
        evaluate(x, self).map(|r| r.fitness)
    }
}

/// A search algorithm that repeatedly evaluates vectors in the unit
/// hypercube and returns the best one found.
///
/// Any concrete driver can be swapped in without touching the evaluation
/// pipeline.
pub trait SearchDriver {
    /// Short algorithm label for reports.
    fn name(&self) -> &'static str;

    /// Minimizes `objective`. If `cancel` is set to `true` the driver stops
    /// at the end of the current generation and returns its best so far.
    fn minimize<O: Objective>(
        &self,
        objective: &O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult>;
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Label of the driver that produced this result.
    pub algorithm: &'static str,

    /// Best vector found, inside `[0, 1]^D`.
    pub best_x: Vec<f64>,

    /// Fitness of `best_x`.
    pub best_fitness: f64,

    /// Generations (GA) or iterations (PSO) executed.
    pub generations: usize,

    /// Total number of objective calls.
    pub evaluations: usize,

    /// Objective calls that returned an error.
    pub failed_evaluations: usize,

    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped on the wall-clock limit.
    pub timed_out: bool,

    /// Seed the run actually used.
    pub seed: u64,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

/// A point of the search space together with its fitness.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub genes: Vec<f64>,
    pub fitness: f64,
}

impl Candidate {
    pub fn new(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_request_is_an_objective() {
        let pool = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let req = PlacementRequest::from_coordinates(&pool, 2, 1)
            .with_max_range(10.0)
            .build()
            .unwrap();

        assert_eq!(Objective::dimension(&req), 3);
        let x = [0.1, 0.3, 0.6];
        let f = req.fitness(&x).unwrap();
        assert_eq!(f, req.evaluate(&x).unwrap().fitness);
        assert!(req.fitness(&[0.1]).is_err());
    }
}
