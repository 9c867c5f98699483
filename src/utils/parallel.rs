//! Batch evaluation helpers.
//!
//! Model evaluation over a sample is the dominant cost of an analysis and the
//! evaluations are independent, so they can run on the rayon thread pool.
//! Results are always collected in sample order.

use ndarray::Array1;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;

/// Evaluate `eval_sample(i)` for `i in 0..n_samples` on the calling thread.
///
/// Stops at the first error.
pub fn eval_samples<F>(eval_sample: F, n_samples: usize) -> Result<Array1<f64>>
where
    F: Fn(usize) -> Result<f64>,
{
    let outputs = (0..n_samples)
        .map(eval_sample)
        .collect::<Result<Vec<_>>>()?;
    Ok(Array1::from_vec(outputs))
}

/// Evaluate `eval_sample(i)` for `i in 0..n_samples` in parallel.
///
/// This function uses Rayon's indexed parallel iterator, whose `collect`
/// keeps the output at position `i` aligned with sample `i`.
///
/// # Arguments
///
/// * `eval_sample` - Function that evaluates the model for the sample at index i
/// * `n_samples` - Number of samples
///
/// # Returns
///
/// * `Result<Array1<f64>>` - The model outputs in sample order
#[cfg(feature = "parallel")]
pub fn eval_samples_parallel<F>(eval_sample: F, n_samples: usize) -> Result<Array1<f64>>
where
    F: Fn(usize) -> Result<f64> + Sync,
{
    let outputs: Result<Vec<_>> = (0..n_samples)
        .into_par_iter()
        .map(|i| eval_sample(i))
        .collect();

    Ok(Array1::from_vec(outputs?))
}

/// Sequential fallback used when the `parallel` feature is disabled.
#[cfg(not(feature = "parallel"))]
pub fn eval_samples_parallel<F>(eval_sample: F, n_samples: usize) -> Result<Array1<f64>>
where
    F: Fn(usize) -> Result<f64> + Sync,
{
    eval_samples(eval_sample, n_samples)
}
