//! Error type shared by the evaluation pipeline and its outer layers.

use thiserror::Error;

/// Errors emitted while validating or evaluating a placement.
///
/// Every variant is a deterministic input-validation failure. Nothing in
/// this crate retries; a failed evaluation aborts that single call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// Candidate vector length differs from `N + K`.
    #[error("dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// More distinct points are required than the pool holds.
    #[error("infeasible cardinality: {required} distinct points required, pool has {available}")]
    InfeasibleCardinality { required: usize, available: usize },

    /// A scalar parameter is outside its admissible range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A coordinate set is not a list of 2D points, or two sets that must
    /// pair up row by row have different lengths.
    #[error("malformed coordinates: {0}")]
    MalformedCoordinates(String),

    /// A search or experiment configuration was rejected by `validate()`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A scenario refers to a gateway variant missing from the gateway table.
    #[error("unknown gateway variant: {0}")]
    UnknownGateway(String),
}

impl PlacementError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PlacementError::InvalidParameter(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        PlacementError::MalformedCoordinates(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlacementError>;
