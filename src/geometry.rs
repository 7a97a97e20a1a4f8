//! Planar geometry on attachment-point coordinates.
//!
//! All distances are exact Euclidean distances in meters; no squared or
//! approximate variants are used anywhere in the cost computation.

use crate::error::{PlacementError, Result};

/// A point in the body plane, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl TryFrom<&[f64]> for Point {
    type Error = PlacementError;

    fn try_from(row: &[f64]) -> Result<Self> {
        match row {
            [x, y] => Ok(Self { x: *x, y: *y }),
            _ => Err(PlacementError::malformed(format!(
                "expected a 2D point, got {} components",
                row.len()
            ))),
        }
    }
}

/// Converts raw coordinate rows into points.
///
/// Every row must have exactly two components.
///
/// # Examples
///
/// ```
/// use u_wban::geometry::points_from_rows;
///
/// let pts = points_from_rows(&[vec![0.0, 0.0], vec![1.0, 2.0]]).unwrap();
/// assert_eq!(pts[1].y, 2.0);
/// assert!(points_from_rows(&[vec![0.0, 0.0, 1.0]]).is_err());
/// ```
pub fn points_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Point>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            Point::try_from(row.as_ref()).map_err(|_| {
                PlacementError::malformed(format!(
                    "row {i} has {} components, expected 2",
                    row.as_ref().len()
                ))
            })
        })
        .collect()
}

/// Distance matrix between two point sets: `result[i][j] = |a[i] - b[j]|`.
pub fn pairwise_distances(a: &[Point], b: &[Point]) -> Vec<Vec<f64>> {
    a.iter()
        .map(|p| b.iter().map(|q| p.distance(q)).collect())
        .collect()
}

/// Per-row distances between two equal-length point sets.
pub fn rowwise_distances(a: &[Point], b: &[Point]) -> Result<Vec<f64>> {
    if a.len() != b.len() {
        return Err(PlacementError::malformed(format!(
            "row-wise distance needs equal lengths, got {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter().zip(b).map(|(p, q)| p.distance(q)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_345() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_pairwise_shape_and_values() {
        let a = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let b = [Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(2.0, 0.0)];
        let d = pairwise_distances(&a, &b);

        assert_eq!(d.len(), 2);
        assert!(d.iter().all(|row| row.len() == 3));
        assert_eq!(d[0][0], 0.0);
        assert!((d[1][1] - 2f64.sqrt()).abs() < 1e-12);
        assert!((d[1][2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pairwise_matches_direct_formula() {
        let a = [Point::new(0.3, -1.2), Point::new(7.5, 2.25)];
        let b = [Point::new(-4.0, 0.5)];
        let d = pairwise_distances(&a, &b);
        for (i, p) in a.iter().enumerate() {
            let direct = ((p.x - b[0].x).powi(2) + (p.y - b[0].y).powi(2)).sqrt();
            assert!((d[i][0] - direct).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rowwise() {
        let a = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let b = [Point::new(3.0, 4.0), Point::new(1.0, 1.0)];
        let d = rowwise_distances(&a, &b).unwrap();
        assert_eq!(d.len(), 2);
        assert!((d[0] - 5.0).abs() < 1e-12);
        assert_eq!(d[1], 0.0);
    }

    #[test]
    fn test_rowwise_length_mismatch() {
        let a = [Point::new(0.0, 0.0)];
        let err = rowwise_distances(&a, &[]).unwrap_err();
        assert!(matches!(err, PlacementError::MalformedCoordinates(_)));
    }

    #[test]
    fn test_rows_must_be_2d() {
        let rows: Vec<Vec<f64>> = vec![vec![0.0, 1.0], vec![2.0]];
        let err = points_from_rows(&rows).unwrap_err();
        assert!(matches!(err, PlacementError::MalformedCoordinates(_)));

        let empty: Vec<Vec<f64>> = vec![vec![]];
        assert!(points_from_rows(&empty).is_err());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Point::from((1.0, 2.0)), Point::new(1.0, 2.0));
        assert_eq!(Point::from([3.0, 4.0]), Point::new(3.0, 4.0));
    }
}
