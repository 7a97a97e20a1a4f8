//! Nearest cluster-head membership.

use crate::error::{PlacementError, Result};
use crate::geometry::{pairwise_distances, Point};

/// Assigns each sensor to its nearest cluster-head.
///
/// Returns, for every sensor, an index in `0..heads.len()`. Ties go to the
/// lowest cluster-head index.
///
/// # Examples
///
/// ```
/// use u_wban::assignment::assign_nearest;
/// use u_wban::geometry::Point;
///
/// let sensors = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
/// let heads = [Point::new(9.0, 0.0), Point::new(1.0, 0.0)];
/// assert_eq!(assign_nearest(&sensors, &heads).unwrap(), vec![1, 0]);
/// ```
pub fn assign_nearest(sensors: &[Point], heads: &[Point]) -> Result<Vec<usize>> {
    if heads.is_empty() {
        return Err(PlacementError::invalid(
            "no cluster-head available (K = 0)",
        ));
    }
    Ok(pairwise_distances(sensors, heads)
        .iter()
        .map(|row| argmin(row))
        .collect())
}

/// Position of the first strict minimum of a non-empty row.
fn argmin(row: &[f64]) -> usize {
    let mut best = 0;
    for (j, &d) in row.iter().enumerate().skip(1) {
        if d < row[best] {
            best = j;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_head_takes_all() {
        let sensors = [Point::new(0.0, 0.0), Point::new(5.0, 5.0)];
        let heads = [Point::new(2.0, 0.0)];
        assert_eq!(assign_nearest(&sensors, &heads).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let sensors = [Point::new(0.0, 0.0)];
        let heads = [Point::new(1.0, 0.0), Point::new(-1.0, 0.0), Point::new(0.0, 1.0)];
        assert_eq!(assign_nearest(&sensors, &heads).unwrap(), vec![0]);
    }

    #[test]
    fn test_no_heads_fails() {
        let sensors = [Point::new(0.0, 0.0)];
        assert!(matches!(
            assign_nearest(&sensors, &[]),
            Err(PlacementError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_matches_distance_matrix_rows() {
        let sensors = [Point::new(0.0, 0.0), Point::new(4.0, 1.0), Point::new(2.0, 2.0)];
        let heads = [Point::new(3.0, 0.0), Point::new(0.0, 2.0)];
        let matrix = pairwise_distances(&sensors, &heads);
        let assign = assign_nearest(&sensors, &heads).unwrap();
        for (row, &j) in matrix.iter().zip(&assign) {
            assert!(row.iter().all(|&d| row[j] <= d));
        }
        assert_eq!(assign, vec![1, 0, 1]);
    }

    #[test]
    fn test_no_sensors() {
        let heads = [Point::new(0.0, 0.0)];
        assert!(assign_nearest(&[], &heads).unwrap().is_empty());
    }

    fn point() -> impl Strategy<Value = Point> {
        (-5.0f64..5.0, -5.0f64..5.0).prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_assignment_is_global_minimizer(
            sensors in prop::collection::vec(point(), 0..20),
            heads in prop::collection::vec(point(), 1..8),
        ) {
            let assign = assign_nearest(&sensors, &heads).unwrap();
            prop_assert_eq!(assign.len(), sensors.len());
            for (s, &j) in sensors.iter().zip(&assign) {
                prop_assert!(j < heads.len());
                let chosen = s.distance(&heads[j]);
                for (k, h) in heads.iter().enumerate() {
                    let d = s.distance(h);
                    prop_assert!(chosen <= d);
                    if k < j {
                        // an earlier head would have won a tie
                        prop_assert!(d > chosen);
                    }
                }
            }
        }
    }
}
