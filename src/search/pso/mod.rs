//! Global-best Particle Swarm Optimization over the unit hypercube.
//!
//! Each particle keeps a position in `[0, 1]^D`, a velocity bounded by
//! `velocity_limit`, and the best position it has visited. Every iteration:
//!
//! ```text
//! v ← w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x)
//! v ← clamp(v, −vmax, vmax)
//! x ← clip(x + v, 0, 1)
//! ```
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod runner;

pub use config::PsoConfig;
pub use runner::PsoRunner;
