//! Continuous-to-discrete encoding of placements.
//!
//! A search driver works on real vectors in the unit hypercube; a placement
//! needs `D = N + K` *distinct* attachment-point indices. The codec bridges
//! the two in two steps:
//!
//! 1. [`decode_indices`]: `floor(clip(x_i) · M)`, total on `[0, 1)^D`
//! 2. [`repair_unique`]: replace repeated indices with unused ones
//!
//! # Repair strategies
//!
//! [`RepairStrategy::Ascending`] fills collisions from the free list in
//! ascending order. [`RepairStrategy::Shuffled`] shuffles the free list
//! with an RNG seeded per call, so the mapping from vector to placement is
//! still a pure function of the vector and the seed.
//!
//! # References
//!
//! - Bean (1994), "Genetic algorithms and random keys for sequencing and
//!   optimization"

mod decode;
mod repair;

pub use decode::decode_indices;
pub use repair::{repair_unique, repair_unique_with, RepairStrategy};
