//! # gsa-rs
//!
//! `gsa-rs` is a Rust library for global sensitivity analysis of scalar
//! models with uncertain, bounded inputs.
//!
//! The library provides:
//! - Morris elementary-effects screening (`mu`, `mu_star`, `sigma`)
//! - Sobol variance decomposition on a Saltelli sample (`S1`, `ST`, `S2`)
//!   with bootstrap confidence intervals
//! - A validated parameter-space definition with JSON import/export
//! - A ranked summary of the parameters and an SVG bar-chart renderer
//!
//! ## Basic Usage
//!
//! ```
//! use gsa_rs::{Problem, Sensitivity, SensitivityConfig, SensitivityMethod};
//!
//! // f(v) = v[1] + v[2] * v[0]^2 with v[0] fixed at 0
//! let model = |v: &[f64]| v[1] + v[2] * v[0] * v[0];
//! let problem = Problem::new(
//!     vec!["a".to_string(), "b".to_string()],
//!     vec![(0.0, 1.0), (0.0, 1.0)],
//! )
//! .unwrap();
//!
//! let mut sensitivity = Sensitivity::new(SensitivityConfig::default().with_n_samples(256));
//! sensitivity.define_model(model, problem, &[0.0]).unwrap();
//!
//! let results = sensitivity.run_sensitivity(SensitivityMethod::Sobol).unwrap();
//! let s1 = results.primary_metric();
//! assert!((s1[0] - 1.0).abs() < 0.05);
//! ```

// Public modules
pub mod error;

// Parameter space
pub mod parameters;

pub mod config;
pub mod model;

// Sensitivity engine
pub mod analyze;
pub mod method;
pub mod results;
pub mod sample;
pub mod session;

// Presentation
pub mod plot;
pub mod summary;

pub mod utils;

// Re-exports for convenience
pub use config::SensitivityConfig;
pub use error::{GsaError, Result};
pub use method::SensitivityMethod;
pub use model::{fallible, SensitivityFunction};
pub use parameters::{Bounds, Problem};
pub use plot::{SummaryRenderer, SvgBarChart};
pub use results::{MorrisResults, SensitivityResults, SobolResults};
pub use sample::SampleSet;
pub use session::Sensitivity;
pub use summary::RankedSummary;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
