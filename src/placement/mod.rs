//! Placement evaluation: the fitness of one candidate vector.
//!
//! A [`PlacementRequest`] fixes everything about a scenario except the
//! placement itself. [`evaluate`] turns a candidate vector of length
//! `N + K` into an [`EvaluationResult`]:
//!
//! 1. Decode to pool indices and repair collisions ([`crate::codec`])
//! 2. First N indices host sensors, the remaining K host cluster-heads
//! 3. Each sensor joins its nearest cluster-head ([`crate::assignment`])
//! 4. Sensors pay one packet transmission to their cluster-head
//! 5. Each cluster-head with `m ≥ 1` members pays `m` receptions, `m`
//!    aggregations and one transmission of `floor(β·m·bits)` bits to the
//!    gateway ([`crate::energy`])
//! 6. Range violations add a quadratic penalty ([`crate::penalty`])
//!
//! The fitness is `energy + penalty`; a placement is feasible iff the
//! penalty is exactly zero.
//!
//! Evaluation is synchronous, performs no I/O and keeps no state between
//! calls.

mod evaluator;
mod request;
mod types;

pub use evaluator::{evaluate, placement};
pub(crate) use request::sort_pool;
pub use request::{PlacementRequest, PlacementRequestBuilder};
pub use types::{AttachmentPoint, EvaluationResult, Placement};
