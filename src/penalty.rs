//! Soft range constraint between sensors and their cluster-heads.

use crate::error::{PlacementError, Result};
use crate::geometry::{rowwise_distances, Point};

/// Quadratic penalty for sensors farther than `dmax` from their cluster-head:
/// `lambda · Σ max(0, d_i − dmax)²`.
///
/// The result is exactly `0.0` iff every sensor is within range, which is
/// the feasibility predicate of a placement.
pub fn range_penalty(
    sensors: &[Point],
    heads: &[Point],
    membership: &[usize],
    dmax: f64,
    lambda: f64,
) -> Result<f64> {
    if !(dmax > 0.0) {
        return Err(PlacementError::invalid(format!(
            "maximum range must be positive, got {dmax}"
        )));
    }
    if !(lambda >= 0.0) {
        return Err(PlacementError::invalid(format!(
            "penalty weight must be non-negative, got {lambda}"
        )));
    }
    if membership.len() != sensors.len() {
        return Err(PlacementError::DimensionMismatch {
            expected: sensors.len(),
            actual: membership.len(),
        });
    }

    let chosen = membership
        .iter()
        .map(|&j| {
            heads.get(j).copied().ok_or_else(|| {
                PlacementError::invalid(format!(
                    "membership refers to cluster-head {j}, only {} exist",
                    heads.len()
                ))
            })
        })
        .collect::<Result<Vec<Point>>>()?;

    let excess_sq: f64 = rowwise_distances(sensors, &chosen)?
        .into_iter()
        .map(|d| (d - dmax).max(0.0).powi(2))
        .sum();
    Ok(lambda * excess_sq)
}
