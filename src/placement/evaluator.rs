//! The decode → repair → assign → cost pipeline.

use super::request::PlacementRequest;
use super::types::{EvaluationResult, Placement};
use crate::assignment::assign_nearest;
use crate::codec::{decode_indices, repair_unique};
use crate::energy::{aggregation_cost, receive_cost, transmit_cost};
use crate::error::{PlacementError, Result};
use crate::geometry::Point;
use crate::penalty::range_penalty;

/// Evaluates candidate vector `x` against `request`.
///
/// `x` must have exactly `N + K` components. Any precondition failure in a
/// sub-step aborts the evaluation with that step's error.
pub fn evaluate(x: &[f64], request: &PlacementRequest) -> Result<EvaluationResult> {
    placement(x, request).map(|p| p.result)
}

/// Evaluates `x` and keeps the decoded index sets and membership.
pub fn placement(x: &[f64], request: &PlacementRequest) -> Result<Placement> {
    let d = request.dimension();
    if x.len() != d {
        return Err(PlacementError::DimensionMismatch {
            expected: d,
            actual: x.len(),
        });
    }

    let m = request.pool_size();
    let raw = decode_indices(x, m)?;
    let indices = repair_unique(&raw, m, request.repair())?;

    let coords = request.coordinates();
    let (sensor_idx, head_idx) = indices.split_at(request.sensors());
    let sensors: Vec<Point> = sensor_idx.iter().map(|&i| coords[i]).collect();
    let heads: Vec<Point> = head_idx.iter().map(|&i| coords[i]).collect();

    let membership = assign_nearest(&sensors, &heads)?;

    let params = request.energy();
    let bits = params.packet_bits;

    let mut sensor_energy = 0.0;
    let mut members = vec![0usize; heads.len()];
    for (s, &j) in sensors.iter().zip(&membership) {
        sensor_energy += transmit_cost(bits, s.distance(&heads[j]), params)?;
        members[j] += 1;
    }

    let gateway = request.gateway();
    let mut cluster_head_energy = 0.0;
    for (head, &count) in heads.iter().zip(&members) {
        if count == 0 {
            continue;
        }
        let count_f = count as f64;
        cluster_head_energy += count_f * receive_cost(bits, params);
        cluster_head_energy += count_f * aggregation_cost(bits, params);

        let forwarded = (params.beta_agg * count_f * bits as f64).floor() as u64;
        cluster_head_energy += transmit_cost(forwarded, head.distance(&gateway), params)?;
    }

    let energy = sensor_energy + cluster_head_energy;
    let penalty = range_penalty(
        &sensors,
        &heads,
        &membership,
        request.max_range(),
        request.penalty_weight(),
    )?;

    Ok(Placement {
        sensors: sensor_idx.to_vec(),
        cluster_heads: head_idx.to_vec(),
        membership,
        result: EvaluationResult {
            energy,
            sensor_energy,
            cluster_head_energy,
            penalty,
            feasible: penalty == 0.0,
            fitness: energy + penalty,
        },
    })
}

impl PlacementRequest {
    /// Shorthand for [`evaluate`]`(x, self)`.
    pub fn evaluate(&self, x: &[f64]) -> Result<EvaluationResult> {
        evaluate(x, self)
    }

    /// Shorthand for [`placement`]`(x, self)`.
    pub fn placement(&self, x: &[f64]) -> Result<Placement> {
        placement(x, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RepairStrategy;
    use crate::energy::EnergyParams;
    use crate::placement::AttachmentPoint;
    use proptest::prelude::*;

    fn line_pool() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(0.0, 1.0),
        ]
    }

    fn line_request(dmax: f64) -> PlacementRequest {
        PlacementRequest::from_coordinates(&line_pool(), 2, 1)
            .with_gateway((0.0, 0.0))
            .with_energy(EnergyParams::new(50e-9, 10e-12, 0.0013e-12, 5e-9, 4000, 1.0, 0.5).unwrap())
            .with_max_range(dmax)
            .with_penalty_weight(1e6)
            .build()
            .unwrap()
    }

    #[test]
    fn test_objective_calculation() {
        let req = line_request(10.0);
        // 0.1·4, 0.3·4, 0.6·4 -> [0, 1, 2]: SN at (0,0),(1,0), CH at (2,0)
        let p = req.placement(&[0.1, 0.3, 0.6]).unwrap();

        assert_eq!(p.sensors, vec![0, 1]);
        assert_eq!(p.cluster_heads, vec![2]);
        assert_eq!(p.membership, vec![0, 0]);
        assert_eq!(p.result.penalty, 0.0);
        assert!(p.result.feasible);
        assert!(p.result.energy > 0.0);
    }

    #[test]
    fn test_energy_matches_hand_computation() {
        let req = line_request(10.0);
        let r = req.evaluate(&[0.1, 0.3, 0.6]).unwrap();

        // sensors: TX 4000 bits over 2 m and 1 m (free space)
        let sensor = (2e-4 + 4000.0 * 10e-12 * 4.0) + (2e-4 + 4000.0 * 10e-12 * 1.0);
        // CH: 2·RX + 2·DA + TX 8000 bits over 2 m to the gateway
        let head = 2.0 * 2e-4 + 2.0 * 2e-5 + (8000.0 * 50e-9 + 8000.0 * 10e-12 * 4.0);

        assert!((r.sensor_energy - sensor).abs() < 1e-15);
        assert!((r.cluster_head_energy - head).abs() < 1e-15);
        assert!((r.energy - (sensor + head)).abs() < 1e-15);
        assert_eq!(r.fitness, r.energy + r.penalty);
    }

    #[test]
    fn test_range_violation_is_penalized() {
        let req = line_request(1.5);
        let r = req.evaluate(&[0.1, 0.3, 0.6]).unwrap();
        // sensor at (0,0) is 2 m from the CH: (2 - 1.5)² · 1e6
        assert!((r.penalty - 0.25e6).abs() < 1e-6);
        assert!(!r.feasible);
        assert!((r.fitness - (r.energy + r.penalty)).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_mismatch() {
        let req = line_request(10.0);
        assert_eq!(
            req.evaluate(&[0.1, 0.3]).unwrap_err(),
            PlacementError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert!(req.evaluate(&[0.1, 0.3, 0.6, 0.9]).is_err());
    }

    #[test]
    fn test_collisions_are_repaired() {
        let req = line_request(10.0);
        // all three decode to index 0
        let p = req.placement(&[0.0, 0.01, 0.2]).unwrap();
        let mut all: Vec<usize> = p.sensors.iter().chain(&p.cluster_heads).copied().collect();
        assert_eq!(all[0], 0);
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 3);
        // ascending fill: free list is {1, 2, 3}
        assert_eq!(p.sensors, vec![0, 1]);
        assert_eq!(p.cluster_heads, vec![2]);
    }

    #[test]
    fn test_unused_cluster_head_costs_nothing() {
        let pool = vec![
            Point::new(0.0, 0.0),
            Point::new(0.5, 0.0),
            Point::new(100.0, 100.0),
            Point::new(1.0, 0.0),
        ];
        let req = PlacementRequest::from_coordinates(&pool, 2, 2)
            .with_gateway((0.0, 0.0))
            .build()
            .unwrap();
        // sensors 0, 1; CHs at 3 (near) and 2 (far, no members)
        let p = req.placement(&[0.0, 0.3, 0.9, 0.6]).unwrap();
        assert_eq!(p.cluster_heads, vec![3, 2]);
        assert_eq!(p.member_counts(), vec![2, 0]);

        let single = PlacementRequest::from_coordinates(&pool, 2, 1)
            .with_gateway((0.0, 0.0))
            .build()
            .unwrap()
            .evaluate(&[0.0, 0.3, 0.9])
            .unwrap();
        assert!((p.result.energy - single.energy).abs() < 1e-15);
    }

    #[test]
    fn test_aggregation_ratio_floors_bits() {
        let energy = EnergyParams::default().with_beta_agg(0.3).with_packet_bits(3);
        let req = PlacementRequest::from_coordinates(&line_pool(), 2, 1)
            .with_energy(energy)
            .build()
            .unwrap();
        let r = req.evaluate(&[0.1, 0.3, 0.6]).unwrap();
        // forwarded bits = floor(0.3 · 2 · 3) = 1
        let forward = 50e-9 + 10e-12 * 4.0;
        let expected_head = 2.0 * 3.0 * 50e-9 + 2.0 * 3.0 * 5e-9 + forward;
        assert!((r.cluster_head_energy - expected_head).abs() < 1e-18);
    }

    #[test]
    fn test_shuffled_repair_is_deterministic_per_request() {
        let req = PlacementRequest::from_coordinates(&line_pool(), 2, 1)
            .with_repair(RepairStrategy::Shuffled { seed: 3 })
            .build()
            .unwrap();
        let x = [0.0, 0.0, 0.0];
        assert_eq!(req.placement(&x).unwrap(), req.placement(&x).unwrap());
    }

    #[test]
    fn test_attachment_points_keep_pool_order() {
        let points = vec![
            AttachmentPoint::new(3, 0.0, 1.0, "wrist"),
            AttachmentPoint::new(0, 0.0, 0.0, "chest"),
            AttachmentPoint::new(2, 2.0, 0.0, "ankle"),
            AttachmentPoint::new(1, 1.0, 0.0, "hip"),
        ];
        let req = PlacementRequest::builder(points, 2, 1).build().unwrap();
        let by_index = line_request(10.0);
        let x = [0.1, 0.3, 0.6];
        assert_eq!(req.evaluate(&x).unwrap(), by_index.evaluate(&x).unwrap());
    }

    proptest! {
        #[test]
        fn prop_evaluation_invariants(
            x in prop::collection::vec(0.0f64..1.0, 5),
            dmax in 0.1f64..3.0,
        ) {
            let pool: Vec<Point> = (0..9)
                .map(|i| Point::new((i % 3) as f64, (i / 3) as f64))
                .collect();
            let req = PlacementRequest::from_coordinates(&pool, 3, 2)
                .with_max_range(dmax)
                .build()
                .unwrap();
            let p = req.placement(&x).unwrap();

            let mut all: Vec<usize> = p.sensors.iter().chain(&p.cluster_heads).copied().collect();
            all.sort_unstable();
            all.dedup();
            prop_assert_eq!(all.len(), 5);
            prop_assert!(p.result.energy > 0.0);
            prop_assert_eq!(p.result.feasible, p.result.penalty == 0.0);
            prop_assert_eq!(p.result.fitness, p.result.energy + p.result.penalty);
            prop_assert_eq!(p.member_counts().iter().sum::<usize>(), 3);
        }
    }
}
