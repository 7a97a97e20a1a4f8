//! Batch evaluation shared by the drivers.

use super::types::{Candidate, Objective};
use tracing::warn;

/// Scores one candidate; returns `true` if the objective failed.
fn score<O: Objective>(objective: &O, candidate: &mut Candidate) -> bool {
    match objective.fitness(&candidate.genes) {
        Ok(f) if !f.is_nan() => {
            candidate.fitness = f;
            false
        }
        Ok(_) => {
            warn!("objective returned NaN; scoring candidate as worst");
            candidate.fitness = f64::INFINITY;
            true
        }
        Err(err) => {
            warn!(%err, "candidate evaluation failed; scoring as worst");
            candidate.fitness = f64::INFINITY;
            true
        }
    }
}

/// Evaluates every candidate in `batch`, returning the number of failures.
#[cfg(feature = "parallel")]
pub(crate) fn evaluate_batch<O: Objective>(
    objective: &O,
    batch: &mut [Candidate],
    parallel: bool,
) -> usize {
    use rayon::prelude::*;

    if parallel {
        batch
            .par_iter_mut()
            .map(|c| score(objective, c))
            .filter(|&failed| failed)
            .count()
    } else {
        batch
            .iter_mut()
            .map(|c| score(objective, c))
            .filter(|&failed| failed)
            .count()
    }
}

/// Evaluates every candidate in `batch`, returning the number of failures.
#[cfg(not(feature = "parallel"))]
pub(crate) fn evaluate_batch<O: Objective>(
    objective: &O,
    batch: &mut [Candidate],
    _parallel: bool,
) -> usize {
    batch
        .iter_mut()
        .map(|c| score(objective, c))
        .filter(|&failed| failed)
        .count()
}

/// Index of the candidate with the lowest fitness.
pub(crate) fn best_index(batch: &[Candidate]) -> usize {
    batch
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Whether moving from `old` to `new` counts as progress.
///
/// Any improvement counts when `threshold` is 0; otherwise the relative
/// improvement `|old − new| / |old|` must reach `threshold`.
pub(crate) fn is_significant(old: f64, new: f64, threshold: f64) -> bool {
    if !(new < old) {
        return false;
    }
    if threshold <= 0.0 || !old.is_finite() || old == 0.0 {
        return true;
    }
    (old - new).abs() / old.abs() >= threshold
}
