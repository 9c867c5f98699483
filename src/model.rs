//! Model functions and their evaluation over a sample.
//!
//! This module defines the [`SensitivityFunction`] trait, the single contract
//! point between the analysis and a domain model, and [`Model`], which binds a
//! function to its [`Problem`] and fixed arguments and evaluates it over a
//! whole sample.

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{GsaError, Result};
use crate::parameters::Problem;
use crate::utils::parallel::{eval_samples, eval_samples_parallel};

/// A deterministic scalar model of a real-valued input vector.
///
/// The vector passed to [`SensitivityFunction::eval`] is the fixed arguments
/// followed by one sampled parameter point, in problem order.
///
/// Plain functions and closures of type `Fn(&[f64]) -> f64` implement this
/// trait directly. Models that can fail should be wrapped with [`fallible`].
pub trait SensitivityFunction: Send + Sync {
    /// Evaluate the model at one input vector.
    ///
    /// # Arguments
    ///
    /// * `args` - The fixed arguments concatenated with one sampled point
    ///
    /// # Returns
    ///
    /// * The scalar model output, or an error if the evaluation fails
    fn eval(&self, args: &[f64]) -> Result<f64>;
}

impl<F> SensitivityFunction for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn eval(&self, args: &[f64]) -> Result<f64> {
        Ok(self(args))
    }
}

/// Adapter for model functions that report their own failures.
pub struct Fallible<F>(pub F);

impl<F> SensitivityFunction for Fallible<F>
where
    F: Fn(&[f64]) -> Result<f64> + Send + Sync,
{
    fn eval(&self, args: &[f64]) -> Result<f64> {
        (self.0)(args)
    }
}

/// Wrap a fallible model function so it can be passed to `define_model`.
///
/// ```
/// use gsa_rs::error::GsaError;
/// use gsa_rs::model::{fallible, SensitivityFunction};
///
/// let model = fallible(|x: &[f64]| {
///     if x[0] < 0.0 {
///         Err(GsaError::FunctionEvaluation("negative length".into()))
///     } else {
///         Ok(x[0].sqrt())
///     }
/// });
/// assert_eq!(model.eval(&[4.0]).unwrap(), 2.0);
/// assert!(model.eval(&[-1.0]).is_err());
/// ```
pub fn fallible<F>(f: F) -> Fallible<F>
where
    F: Fn(&[f64]) -> Result<f64> + Send + Sync,
{
    Fallible(f)
}

/// A model function bound to its parameter space and fixed arguments.
pub struct Model {
    function: Box<dyn SensitivityFunction>,
    problem: Problem,
    fixed_arguments: Vec<f64>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("problem", &self.problem)
            .field("fixed_arguments", &self.fixed_arguments)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Bind a function to a problem.
    ///
    /// # Arguments
    ///
    /// * `function` - The model function
    /// * `problem` - The uncertain parameters; valid by construction
    /// * `fixed_arguments` - Constant values prepended to every sampled point
    pub fn new<F>(function: F, problem: Problem, fixed_arguments: &[f64]) -> Result<Self>
    where
        F: SensitivityFunction + 'static,
    {
        if let Some(pos) = fixed_arguments.iter().position(|v| !v.is_finite()) {
            return Err(GsaError::InvalidInput(format!(
                "fixed argument {} is not finite ({})",
                pos, fixed_arguments[pos]
            )));
        }

        Ok(Self {
            function: Box::new(function),
            problem,
            fixed_arguments: fixed_arguments.to_vec(),
        })
    }

    /// The parameter space of the model.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The fixed arguments, in the order they are passed to the function.
    pub fn fixed_arguments(&self) -> &[f64] {
        &self.fixed_arguments
    }

    /// Evaluate the model at a single sampled point.
    pub fn eval_point(&self, point: ArrayView1<f64>) -> Result<f64> {
        if point.len() != self.problem.num_vars() {
            return Err(GsaError::DimensionMismatch(format!(
                "Expected {} parameters, got {}",
                self.problem.num_vars(),
                point.len()
            )));
        }

        let mut args = Vec::with_capacity(self.fixed_arguments.len() + point.len());
        args.extend_from_slice(&self.fixed_arguments);
        args.extend(point.iter().copied());

        self.function.eval(&args)
    }

    /// Evaluate the model once per sample row, keeping sample order.
    ///
    /// The whole batch fails on the first evaluation error or non-finite
    /// output, since the analyzers need a complete, index-aligned response.
    ///
    /// # Arguments
    ///
    /// * `samples` - `num_samples × num_vars` matrix in physical units
    /// * `parallel` - Evaluate rows on the rayon thread pool (requires the
    ///   `parallel` feature, ignored otherwise)
    pub fn evaluate(&self, samples: &Array2<f64>, parallel: bool) -> Result<Array1<f64>> {
        if samples.ncols() != self.problem.num_vars() {
            return Err(GsaError::DimensionMismatch(format!(
                "sample has {} columns, problem has {} parameters",
                samples.ncols(),
                self.problem.num_vars()
            )));
        }

        let eval_row = |i: usize| self.eval_checked(i, samples.row(i));

        if parallel {
            eval_samples_parallel(eval_row, samples.nrows())
        } else {
            eval_samples(eval_row, samples.nrows())
        }
    }

    fn eval_checked(&self, index: usize, point: ArrayView1<f64>) -> Result<f64> {
        let value = self.eval_point(point).map_err(|e| {
            GsaError::FunctionEvaluation(format!("sample {} ({:?}): {}", index, point.to_vec(), e))
        })?;

        if !value.is_finite() {
            return Err(GsaError::FunctionEvaluation(format!(
                "sample {} ({:?}) produced a non-finite output ({})",
                index,
                point.to_vec(),
                value
            )));
        }

        Ok(value)
    }
}
