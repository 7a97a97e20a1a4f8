//! Real-coded Genetic Algorithm over the unit hypercube.
//!
//! Individuals are vectors in `[0, 1]^D`, evaluated through an
//! [`Objective`](crate::search::Objective). The loop is elitist: the best
//! `elite_ratio` of each generation survives unchanged, so the best fitness
//! never gets worse.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, presets)
//! - [`GaRunner`]: Executes the evolutionary loop
//!
//! # Submodules
//!
//! - [`operators`]: Uniform, one-point and arithmetic crossover; swap,
//!   reset and perturbation mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;

pub use config::GaConfig;
pub use operators::{Crossover, Mutation};
pub use runner::GaRunner;
pub use selection::Selection;
