//! Value types of the placement problem.

use crate::geometry::Point;

/// A candidate body location where a node may be mounted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachmentPoint {
    /// Identifier, unique within a pool. Pools are ordered by it.
    pub index: usize,

    /// Position in meters.
    pub position: Point,

    /// Body region label ("torso", "left arm", ...). Informational only.
    pub region: String,
}

impl AttachmentPoint {
    pub fn new(index: usize, x: f64, y: f64, region: impl Into<String>) -> Self {
        Self {
            index,
            position: Point::new(x, y),
            region: region.into(),
        }
    }
}

/// Outcome of evaluating one candidate vector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationResult {
    /// Total radio energy in joules (`sensor_energy + cluster_head_energy`).
    pub energy: f64,

    /// Sensor → cluster-head transmissions.
    pub sensor_energy: f64,

    /// Cluster-head receive, aggregate and forward-to-gateway costs.
    pub cluster_head_energy: f64,

    /// Range violation penalty.
    pub penalty: f64,

    /// `penalty == 0.0`.
    pub feasible: bool,

    /// `energy + penalty`, the value a search driver minimizes.
    pub fitness: f64,
}

/// A fully decoded placement with its evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Pool positions hosting sensors (length N).
    pub sensors: Vec<usize>,

    /// Pool positions hosting cluster-heads (length K).
    pub cluster_heads: Vec<usize>,

    /// For each sensor, the index into `cluster_heads` it reports to.
    pub membership: Vec<usize>,

    pub result: EvaluationResult,
}

impl Placement {
    /// Number of sensors reporting to each cluster-head.
    ///
    /// Membership entries that name no cluster-head are not counted.
    pub fn member_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.cluster_heads.len()];
        for &j in &self.membership {
            if let Some(c) = counts.get_mut(j) {
                *c += 1;
            }
        }
        counts
    }
}
