//! Black-box search drivers for placement vectors.
//!
//! A driver only sees an [`Objective`]: a dimension and a fitness function
//! over `[0, 1]^D`. [`PlacementRequest`](crate::placement::PlacementRequest)
//! implements it, so any driver can search placements directly:
//!
//! ```
//! use u_wban::geometry::Point;
//! use u_wban::placement::PlacementRequest;
//! use u_wban::search::pso::PsoConfig;
//! use u_wban::search::SearchDriver;
//!
//! let pool: Vec<Point> = (0..8).map(|i| Point::new(i as f64 * 0.1, 0.0)).collect();
//! let request = PlacementRequest::from_coordinates(&pool, 3, 1).build().unwrap();
//!
//! let driver = PsoConfig::default()
//!     .with_swarm_size(10)
//!     .with_max_iterations(20)
//!     .with_seed(1);
//! let result = driver.minimize(&request, None).unwrap();
//! assert_eq!(result.best_x.len(), 4);
//! ```
//!
//! # Submodules
//!
//! - [`ga`]: Elitist real-coded Genetic Algorithm
//! - [`pso`]: Global-best Particle Swarm Optimization

mod eval;
pub mod ga;
pub mod pso;
mod types;

pub use types::{Objective, SearchDriver, SearchResult};
