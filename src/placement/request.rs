//! Validated evaluation context.

use super::types::AttachmentPoint;
use crate::codec::RepairStrategy;
use crate::energy::EnergyParams;
use crate::error::{PlacementError, Result};
use crate::geometry::Point;

/// Immutable context for evaluating placements.
///
/// Holds the attachment-point pool (M points, ordered by index), the sensor
/// and cluster-head counts, the gateway position, the radio parameters and
/// the range constraint. All invariants are checked once by
/// [`PlacementRequestBuilder::build`]; a built request is never mutated, so
/// it can be shared freely across threads evaluating different candidates.
///
/// # Examples
///
/// ```
/// use u_wban::geometry::Point;
/// use u_wban::placement::PlacementRequest;
///
/// let pool = [
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(2.0, 0.0),
///     Point::new(0.0, 1.0),
/// ];
/// let request = PlacementRequest::from_coordinates(&pool, 2, 1)
///     .with_gateway((0.0, 0.0))
///     .with_max_range(10.0)
///     .build()
///     .unwrap();
/// assert_eq!(request.dimension(), 3);
///
/// // N + K may not exceed M
/// assert!(PlacementRequest::from_coordinates(&pool, 4, 2).build().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PlacementRequest {
    points: Vec<AttachmentPoint>,
    coords: Vec<Point>,
    sensors: usize,
    cluster_heads: usize,
    gateway: Point,
    energy: EnergyParams,
    max_range: f64,
    penalty_weight: f64,
    repair: RepairStrategy,
}

impl PlacementRequest {
    /// Starts a request over `points` with `sensors` (N) and `cluster_heads` (K).
    pub fn builder(
        points: Vec<AttachmentPoint>,
        sensors: usize,
        cluster_heads: usize,
    ) -> PlacementRequestBuilder {
        PlacementRequestBuilder {
            points,
            sensors,
            cluster_heads,
            gateway: Point::default(),
            energy: EnergyParams::default(),
            max_range: f64::INFINITY,
            penalty_weight: 1e6,
            repair: RepairStrategy::default(),
        }
    }

    /// Starts a request over bare coordinates; point `i` gets index `i` and
    /// an empty region label.
    pub fn from_coordinates(
        coords: &[Point],
        sensors: usize,
        cluster_heads: usize,
    ) -> PlacementRequestBuilder {
        let points = coords
            .iter()
            .enumerate()
            .map(|(i, p)| AttachmentPoint {
                index: i,
                position: *p,
                region: String::new(),
            })
            .collect();
        Self::builder(points, sensors, cluster_heads)
    }

    /// Candidate vector length `D = N + K`.
    pub fn dimension(&self) -> usize {
        self.sensors + self.cluster_heads
    }

    /// Pool size M.
    pub fn pool_size(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[AttachmentPoint] {
        &self.points
    }

    /// Pool coordinates, in pool order.
    pub fn coordinates(&self) -> &[Point] {
        &self.coords
    }

    pub fn sensors(&self) -> usize {
        self.sensors
    }

    pub fn cluster_heads(&self) -> usize {
        self.cluster_heads
    }

    pub fn gateway(&self) -> Point {
        self.gateway
    }

    pub fn energy(&self) -> &EnergyParams {
        &self.energy
    }

    pub fn max_range(&self) -> f64 {
        self.max_range
    }

    pub fn penalty_weight(&self) -> f64 {
        self.penalty_weight
    }

    pub fn repair(&self) -> RepairStrategy {
        self.repair
    }
}

/// Builder for [`PlacementRequest`].
///
/// Defaults: gateway at the origin, [`EnergyParams::default`], no range
/// limit (`max_range = +∞`), penalty weight `1e6`, ascending repair.
#[derive(Debug, Clone)]
pub struct PlacementRequestBuilder {
    points: Vec<AttachmentPoint>,
    sensors: usize,
    cluster_heads: usize,
    gateway: Point,
    energy: EnergyParams,
    max_range: f64,
    penalty_weight: f64,
    repair: RepairStrategy,
}

impl PlacementRequestBuilder {
    pub fn with_gateway(mut self, gateway: impl Into<Point>) -> Self {
        self.gateway = gateway.into();
        self
    }

    pub fn with_energy(mut self, energy: EnergyParams) -> Self {
        self.energy = energy;
        self
    }

    /// Sets the maximum allowed sensor → cluster-head distance.
    pub fn with_max_range(mut self, dmax: f64) -> Self {
        self.max_range = dmax;
        self
    }

    /// Sets the weight λ of the range penalty.
    pub fn with_penalty_weight(mut self, lambda: f64) -> Self {
        self.penalty_weight = lambda;
        self
    }

    pub fn with_repair(mut self, repair: RepairStrategy) -> Self {
        self.repair = repair;
        self
    }

    /// Validates and freezes the request.
    ///
    /// The pool is sorted by point index; duplicate indices are rejected.
    pub fn build(self) -> Result<PlacementRequest> {
        let Self {
            mut points,
            sensors,
            cluster_heads,
            gateway,
            energy,
            max_range,
            penalty_weight,
            repair,
        } = self;

        energy.validate()?;
        if cluster_heads == 0 {
            return Err(PlacementError::invalid(
                "cluster-head count K must be at least 1",
            ));
        }
        if !(max_range > 0.0) {
            return Err(PlacementError::invalid(format!(
                "maximum range must be positive, got {max_range}"
            )));
        }
        if !(penalty_weight >= 0.0) {
            return Err(PlacementError::invalid(format!(
                "penalty weight must be non-negative, got {penalty_weight}"
            )));
        }
        if !(gateway.x.is_finite() && gateway.y.is_finite()) {
            return Err(PlacementError::malformed("gateway coordinates must be finite"));
        }

        sort_pool(&mut points)?;

        let required = sensors + cluster_heads;
        if required > points.len() {
            return Err(PlacementError::InfeasibleCardinality {
                required,
                available: points.len(),
            });
        }

        let coords = points.iter().map(|p| p.position).collect();
        Ok(PlacementRequest {
            points,
            coords,
            sensors,
            cluster_heads,
            gateway,
            energy,
            max_range,
            penalty_weight,
            repair,
        })
    }
}

/// Sorts `points` by index and checks the pool is well formed.
///
/// Rejects duplicate indices and non-finite coordinates.
pub(crate) fn sort_pool(points: &mut [AttachmentPoint]) -> Result<()> {
    if let Some(p) = points
        .iter()
        .find(|p| !(p.position.x.is_finite() && p.position.y.is_finite()))
    {
        return Err(PlacementError::malformed(format!(
            "attachment point {} has non-finite coordinates",
            p.index
        )));
    }
    points.sort_by_key(|p| p.index);
    if let Some(w) = points.windows(2).find(|w| w[0].index == w[1].index) {
        return Err(PlacementError::invalid(format!(
            "duplicate attachment point index {}",
            w[0].index
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(m: usize) -> Vec<Point> {
        (0..m).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn test_defaults() {
        let req = PlacementRequest::from_coordinates(&pool(4), 2, 1).build().unwrap();
        assert_eq!(req.dimension(), 3);
        assert_eq!(req.pool_size(), 4);
        assert_eq!(req.gateway(), Point::new(0.0, 0.0));
        assert!(req.max_range().is_infinite());
        assert_eq!(req.penalty_weight(), 1e6);
        assert_eq!(req.repair(), RepairStrategy::Ascending);
        assert_eq!(*req.energy(), EnergyParams::default());
    }

    #[test]
    fn test_infeasible_cardinality() {
        let err = PlacementRequest::from_coordinates(&pool(4), 4, 2)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            PlacementError::InfeasibleCardinality {
                required: 6,
                available: 4
            }
        );
    }

    #[test]
    fn test_exactly_full_pool_is_allowed() {
        assert!(PlacementRequest::from_coordinates(&pool(4), 3, 1).build().is_ok());
    }

    #[test]
    fn test_zero_cluster_heads() {
        assert!(matches!(
            PlacementRequest::from_coordinates(&pool(4), 2, 0).build(),
            Err(PlacementError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_range_and_weight() {
        let b = PlacementRequest::from_coordinates(&pool(4), 2, 1);
        assert!(b.clone().with_max_range(0.0).build().is_err());
        assert!(b.clone().with_max_range(-3.0).build().is_err());
        assert!(b.clone().with_penalty_weight(-1.0).build().is_err());
        assert!(b.clone().with_penalty_weight(0.0).build().is_ok());
        assert!(b.with_gateway((f64::NAN, 0.0)).build().is_err());
    }

    #[test]
    fn test_invalid_energy() {
        let energy = EnergyParams::default().with_e_mp(0.0);
        assert!(PlacementRequest::from_coordinates(&pool(4), 2, 1)
            .with_energy(energy)
            .build()
            .is_err());
    }

    #[test]
    fn test_pool_sorted_by_index() {
        let points = vec![
            AttachmentPoint::new(2, 2.0, 0.0, "leg"),
            AttachmentPoint::new(0, 0.0, 0.0, "head"),
            AttachmentPoint::new(1, 1.0, 0.0, "torso"),
        ];
        let req = PlacementRequest::builder(points, 1, 1).build().unwrap();
        let order: Vec<usize> = req.points().iter().map(|p| p.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(req.coordinates()[2], Point::new(2.0, 0.0));
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let points = vec![
            AttachmentPoint::new(0, 0.0, 0.0, "a"),
            AttachmentPoint::new(0, 1.0, 0.0, "b"),
        ];
        assert!(PlacementRequest::builder(points, 1, 1).build().is_err());
    }

    #[test]
    fn test_non_finite_pool_coordinates_rejected() {
        let points = vec![
            AttachmentPoint::new(0, 0.0, 0.0, "chest"),
            AttachmentPoint::new(1, f64::NAN, 0.0, "hip"),
            AttachmentPoint::new(2, 1.0, f64::INFINITY, "ankle"),
        ];
        let err = PlacementRequest::builder(points, 1, 1).build().unwrap_err();
        assert!(matches!(err, PlacementError::MalformedCoordinates(_)), "{err:?}");
    }

    #[test]
    fn test_request_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PlacementRequest>();
    }
}
