//! Analyzers turning model outputs into sensitivity indices.
//!
//! Each analyzer expects the row layout produced by its sampler in
//! [`crate::sample`].

pub mod morris;
pub mod sobol;

pub use morris::MorrisAnalysisOptions;
pub use sobol::SobolAnalysisOptions;
