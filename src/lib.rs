//! Sensor and cluster-head placement evaluation for wireless body area
//! networks.
//!
//! A candidate is a real vector `x ∈ [0, 1]^(N+K)`. Evaluating it runs a
//! fixed pipeline:
//!
//! - **Decode** ([`codec`]): each component becomes an attachment-point
//!   index `⌊x_i · M⌋`.
//! - **Repair** ([`codec`]): duplicate indices are replaced by unused ones,
//!   so the N sensors and K cluster-heads occupy distinct points.
//! - **Assign** ([`assignment`]): every sensor reports to its nearest
//!   cluster-head.
//! - **Energy** ([`energy`]): first-order radio model, sensors transmit to
//!   their cluster-head; cluster-heads receive, aggregate and forward to
//!   the gateway.
//! - **Penalty** ([`penalty`]): sensors farther than `dmax` from their
//!   cluster-head add `λ · Σ (d − dmax)²`.
//!
//! [`placement::PlacementRequest`] bundles the pool and parameters and
//! exposes the pipeline as `evaluate` and `placement`. On top of it,
//! [`search`] provides Genetic Algorithm and Particle Swarm drivers over
//! the unit hypercube, and [`experiment`] runs repeated seeded comparisons
//! across scenarios and gateway positions.
//!
//! # Architecture
//!
//! The evaluation pipeline is pure and deterministic: no I/O, no logging,
//! no global state. Drivers and experiments log through `tracing`; install
//! a subscriber to see their events.

pub mod assignment;
pub mod codec;
pub mod energy;
pub mod error;
pub mod experiment;
pub mod geometry;
pub mod penalty;
pub mod placement;
pub mod random;
pub mod search;

pub use error::{PlacementError, Result};
