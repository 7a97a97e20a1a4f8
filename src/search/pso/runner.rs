//! PSO execution loop.

use super::config::PsoConfig;
use crate::error::{PlacementError, Result};
use crate::random::rng_from;
use crate::search::eval::{best_index, evaluate_batch, is_significant};
use crate::search::types::{Candidate, Objective, SearchDriver, SearchResult};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

const ALGORITHM: &str = "PSO";

/// Executes global-best Particle Swarm Optimization.
pub struct PsoRunner;

impl PsoRunner {
    /// Runs PSO optimization.
    pub fn run<O: Objective>(objective: &O, config: &PsoConfig) -> Result<SearchResult> {
        Self::run_with_cancel(objective, config, None)
    }

    /// Runs PSO with an optional cancellation token.
    pub fn run_with_cancel<O: Objective>(
        objective: &O,
        config: &PsoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult> {
        config.validate().map_err(PlacementError::InvalidConfig)?;
        let dim = objective.dimension();
        if dim == 0 {
            return Err(PlacementError::InvalidConfig(
                "objective dimension must be at least 1".into(),
            ));
        }

        let (mut rng, seed) = rng_from(config.seed);
        let started = Instant::now();
        let vmax = config.velocity_limit;

        // Initialize positions and velocities
        let mut positions: Vec<Candidate> = (0..config.swarm_size)
            .map(|_| Candidate::new((0..dim).map(|_| rng.random_range(0.0..1.0)).collect()))
            .collect();
        let mut velocities: Vec<Vec<f64>> = (0..config.swarm_size)
            .map(|_| (0..dim).map(|_| rng.random_range(-vmax..=vmax)).collect())
            .collect();

        let mut failed = evaluate_batch(objective, &mut positions, config.parallel);
        let mut evaluations = positions.len();

        let mut personal = positions.clone();
        let mut global = personal[best_index(&personal)].clone();
        let mut fitness_history = Vec::with_capacity(config.max_iterations + 1);
        fitness_history.push(global.fitness);

        let mut stagnation_counter = 0usize;
        let mut iterations = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut timed_out = false;

        for iter in 0..config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    timed_out = true;
                    break;
                }
            }

            // v ← w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x); x ← clip(x + v)
            for ((x, v), pbest) in positions.iter_mut().zip(&mut velocities).zip(&personal) {
                for d in 0..dim {
                    let r1: f64 = rng.random_range(0.0..1.0);
                    let r2: f64 = rng.random_range(0.0..1.0);
                    let vel = config.inertia * v[d]
                        + config.c1 * r1 * (pbest.genes[d] - x.genes[d])
                        + config.c2 * r2 * (global.genes[d] - x.genes[d]);
                    v[d] = vel.clamp(-vmax, vmax);
                    x.genes[d] = (x.genes[d] + v[d]).clamp(0.0, 1.0);
                }
            }

            failed += evaluate_batch(objective, &mut positions, config.parallel);
            evaluations += positions.len();
            iterations = iter + 1;

            for (x, pbest) in positions.iter().zip(personal.iter_mut()) {
                if x.fitness < pbest.fitness {
                    pbest.genes.clone_from(&x.genes);
                    pbest.fitness = x.fitness;
                }
            }

            let swarm_best = &personal[best_index(&personal)];
            if swarm_best.fitness < global.fitness {
                if is_significant(global.fitness, swarm_best.fitness, config.convergence_threshold) {
                    stagnation_counter = 0;
                } else {
                    stagnation_counter += 1;
                }
                global = swarm_best.clone();
            } else {
                stagnation_counter += 1;
            }

            fitness_history.push(global.fitness);
            objective.on_generation(iterations, global.fitness);
            debug!(
                iteration = iterations,
                best_fitness = global.fitness,
                stagnation = stagnation_counter,
                "pso iteration"
            );

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        info!(
            algorithm = ALGORITHM,
            seed,
            iterations,
            evaluations,
            failed_evaluations = failed,
            best_fitness = global.fitness,
            stagnated,
            cancelled,
            timed_out,
            "pso finished"
        );

        Ok(SearchResult {
            algorithm: ALGORITHM,
            best_x: global.genes,
            best_fitness: global.fitness,
            generations: iterations,
            evaluations,
            failed_evaluations: failed,
            stagnated,
            cancelled,
            timed_out,
            seed,
            fitness_history,
        })
    }
}

impl SearchDriver for PsoConfig {
    fn name(&self) -> &'static str {
        ALGORITHM
    }

    fn minimize<O: Objective>(
        &self,
        objective: &O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult> {
        PsoRunner::run_with_cancel(objective, self, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::placement::PlacementRequest;
    use std::sync::atomic::AtomicUsize;

    struct ShiftedSphere {
        dim: usize,
        generations_seen: AtomicUsize,
    }

    impl ShiftedSphere {
        fn new(dim: usize) -> Self {
            Self {
                dim,
                generations_seen: AtomicUsize::new(0),
            }
        }
    }

    impl Objective for ShiftedSphere {
        fn dimension(&self) -> usize {
            self.dim
        }

        fn fitness(&self, x: &[f64]) -> Result<f64> {
            Ok(x.iter().map(|v| (v - 0.7).powi(2)).sum())
        }

        fn on_generation(&self, _generation: usize, _best_fitness: f64) {
            self.generations_seen.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_sphere_optimization() {
        let objective = ShiftedSphere::new(4);
        let config = PsoConfig::default()
            .with_swarm_size(30)
            .with_max_iterations(200)
            .with_inertia(0.7)
            .with_coefficients(1.5, 1.5)
            .with_stagnation_limit(0)
            .with_seed(42)
            .with_parallel(false);

        let result = PsoRunner::run(&objective, &config).unwrap();
        assert!(
            result.best_fitness < 1e-3,
            "expected near-optimal sphere, got {}",
            result.best_fitness
        );
        assert_eq!(result.generations, 200);
        assert_eq!(result.evaluations, 30 * 201);
        assert_eq!(objective.generations_seen.load(Ordering::Relaxed), 200);
        assert_eq!(result.fitness_history.len(), 201);
        assert!(result.best_x.iter().all(|&g| (0.0..=1.0).contains(&g)));
    }

    #[test]
    fn test_history_monotone_on_placement() {
        let pool: Vec<Point> = (0..12)
            .map(|i| Point::new((i % 3) as f64 * 0.2, (i / 3) as f64 * 0.3))
            .collect();
        let request = PlacementRequest::from_coordinates(&pool, 4, 2)
            .with_gateway((0.2, -0.5))
            .with_max_range(0.35)
            .build()
            .unwrap();
        let config = PsoConfig::default()
            .with_swarm_size(20)
            .with_max_iterations(40)
            .with_seed(9)
            .with_parallel(false);

        let result = PsoRunner::run(&request, &config).unwrap();
        for window in result.fitness_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
        let eval = request.evaluate(&result.best_x).unwrap();
        assert_eq!(eval.fitness, result.best_fitness);
        assert_eq!(result.algorithm, "PSO");
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = PsoConfig::default()
            .with_swarm_size(10)
            .with_max_iterations(25)
            .with_seed(123)
            .with_parallel(false);
        let a = PsoRunner::run(&ShiftedSphere::new(3), &config).unwrap();
        let b = PsoRunner::run(&ShiftedSphere::new(3), &config).unwrap();
        assert_eq!(a.best_x, b.best_x);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_cancellation() {
        let config = PsoConfig::default().with_seed(1).with_parallel(false);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = config.minimize(&ShiftedSphere::new(2), Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = PsoConfig::default().with_swarm_size(0);
        assert!(matches!(
            PsoRunner::run(&ShiftedSphere::new(2), &config),
            Err(PlacementError::InvalidConfig(_))
        ));
    }
}
