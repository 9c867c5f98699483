//! Utility functions and helpers for the gsa-rs library.

pub mod parallel;
pub mod random;
pub mod stats;

// Re-export commonly used utilities
pub use parallel::{eval_samples, eval_samples_parallel};
pub use stats::{mean, normal_quantile, std_dev, variance, z_score};
