//! Collision repair for decoded indices.

use crate::error::{PlacementError, Result};
use crate::random::create_rng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Order in which unused indices replace collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepairStrategy {
    /// Free indices are consumed in ascending order.
    #[default]
    Ascending,

    /// Free indices are consumed in an order shuffled by an RNG seeded with
    /// `seed`. A fresh RNG is created on every call.
    Shuffled { seed: u64 },
}

/// Repairs `indices` so that all values are distinct, using `strategy`.
///
/// # Examples
///
/// ```
/// use u_wban::codec::{repair_unique, RepairStrategy};
///
/// let fixed = repair_unique(&[0, 0, 1], 5, RepairStrategy::Ascending).unwrap();
/// assert_eq!(fixed, vec![0, 2, 1]);
/// ```
pub fn repair_unique(indices: &[usize], m: usize, strategy: RepairStrategy) -> Result<Vec<usize>> {
    match strategy {
        RepairStrategy::Ascending => repair_with_order(indices, m, |_| {}),
        RepairStrategy::Shuffled { seed } => {
            let mut rng = create_rng(seed);
            repair_unique_with(indices, m, &mut rng)
        }
    }
}

/// Repairs `indices` drawing the free-list order from a caller-owned RNG.
pub fn repair_unique_with<R: Rng>(indices: &[usize], m: usize, rng: &mut R) -> Result<Vec<usize>> {
    repair_with_order(indices, m, |free| free.shuffle(rng))
}

/// Shared repair: first occurrences stay in place, later duplicates take the
/// next value from `{0..m} \ {all original values}` after `order` arranges it.
fn repair_with_order<F>(indices: &[usize], m: usize, order: F) -> Result<Vec<usize>>
where
    F: FnOnce(&mut Vec<usize>),
{
    let d = indices.len();
    if d > m {
        return Err(PlacementError::InfeasibleCardinality {
            required: d,
            available: m,
        });
    }

    let mut present = vec![false; m];
    for (pos, &v) in indices.iter().enumerate() {
        if v >= m {
            return Err(PlacementError::invalid(format!(
                "index {v} at position {pos} is outside the pool of {m} points"
            )));
        }
        present[v] = true;
    }

    let mut free: Vec<usize> = (0..m).filter(|&i| !present[i]).collect();
    order(&mut free);
    let mut free = free.into_iter();

    let mut seen = vec![false; m];
    let mut out = Vec::with_capacity(d);
    for &v in indices {
        if seen[v] {
            // distinct(original) + free == m >= d, so the list never runs dry
            let replacement = free.next().ok_or(PlacementError::InfeasibleCardinality {
                required: d,
                available: m,
            })?;
            out.push(replacement);
        } else {
            seen[v] = true;
            out.push(v);
        }
    }
    Ok(out)
}
