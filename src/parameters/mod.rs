//! # Parameter Space
//!
//! This module provides the description of the uncertain inputs of a model:
//! each parameter has a name and a finite sampling interval.
//!
//! ## Core Components
//!
//! - [`Bounds`]: A validated `[min, max]` interval that maps unit-hypercube
//!   coordinates onto physical parameter values
//! - [`Problem`]: The ordered collection of parameter names and bounds that
//!   samplers and analyzers work on
//!
//! ## Example Usage
//!
//! ```rust
//! use gsa_rs::parameters::Problem;
//!
//! let problem = Problem::new(
//!     vec!["a".to_string(), "b".to_string()],
//!     vec![(0.0, 1.0), (0.0, 1.0)],
//! )
//! .unwrap();
//!
//! assert_eq!(problem.num_vars(), 2);
//!
//! // The same problem from its JSON record
//! let same = Problem::from_json(r#"{"names": ["a", "b"], "bounds": [[0, 1], [0, 1]]}"#).unwrap();
//! assert_eq!(problem, same);
//! ```

pub mod bounds;
pub mod problem;

// Re-export key types
pub use bounds::{Bounds, BoundsError};
pub use problem::Problem;
