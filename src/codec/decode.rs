//! Real vector → attachment-point indices.

use crate::error::{PlacementError, Result};

/// Largest value a component is clipped to before scaling.
///
/// `floor(UPPER · M)` is at most `M − 1` for every pool size this crate
/// can index, which keeps the output inside `[0, M)` even when the
/// optimizer hands over values at or slightly above `1.0`.
const UPPER: f64 = 1.0 - f64::EPSILON;

/// Maps each component of `x` to an index in `[0, m)`.
///
/// Components are clipped to `[0, 1 − ε]` first, so values drifting outside
/// the unit interval are tolerated. NaN has no defined clip and is rejected.
///
/// # Examples
///
/// ```
/// use u_wban::codec::decode_indices;
///
/// let idx = decode_indices(&[0.0, 0.5, 0.9999, 1.2, -0.3], 10).unwrap();
/// assert_eq!(idx, vec![0, 5, 9, 9, 0]);
/// ```
pub fn decode_indices(x: &[f64], m: usize) -> Result<Vec<usize>> {
    if m == 0 {
        return Err(PlacementError::invalid("pool size M must be positive"));
    }
    let scale = m as f64;
    x.iter()
        .enumerate()
        .map(|(i, &v)| {
            if v.is_nan() {
                return Err(PlacementError::invalid(format!(
                    "candidate component {i} is NaN"
                )));
            }
            let idx = (v.clamp(0.0, UPPER) * scale).floor() as usize;
            Ok(idx.min(m - 1))
        })
        .collect()
}
