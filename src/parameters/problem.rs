//! Problem specification for a sensitivity analysis.
//!
//! A [`Problem`] is the ordered list of uncertain parameters: their names and
//! the bounds they are sampled from. The number of variables is always derived
//! from the names, so names and bounds can never disagree once a `Problem`
//! exists.

use std::collections::HashSet;

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use crate::error::{GsaError, Result};

/// The parameter space of a sensitivity analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProblemRecord", into = "ProblemRecord")]
pub struct Problem {
    names: Vec<String>,
    bounds: Vec<Bounds>,
}

/// Serialized form of a problem. `num_vars` is written for readability and
/// checked when present on input.
#[derive(Serialize, Deserialize)]
struct ProblemRecord {
    names: Vec<String>,
    bounds: Vec<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_vars: Option<usize>,
}

impl TryFrom<ProblemRecord> for Problem {
    type Error = GsaError;

    fn try_from(record: ProblemRecord) -> Result<Self> {
        if let Some(num_vars) = record.num_vars {
            if num_vars != record.names.len() {
                return Err(GsaError::InvalidProblem(format!(
                    "num_vars is {} but {} names were given",
                    num_vars,
                    record.names.len()
                )));
            }
        }
        Problem::from_bounds(record.names, record.bounds)
    }
}

impl From<Problem> for ProblemRecord {
    fn from(problem: Problem) -> Self {
        let num_vars = Some(problem.num_vars());
        Self {
            names: problem.names,
            bounds: problem.bounds,
            num_vars,
        }
    }
}

impl Problem {
    /// Create a problem from parameter names and `(low, high)` pairs.
    ///
    /// # Arguments
    ///
    /// * `names` - Unique parameter identifiers, in model order
    /// * `bounds` - Sampling interval of each parameter, aligned by index with `names`
    ///
    /// # Returns
    ///
    /// * The validated problem, or `GsaError::InvalidProblem` / `GsaError::BoundsError`
    pub fn new(names: Vec<String>, bounds: Vec<(f64, f64)>) -> Result<Self> {
        if bounds.len() != names.len() {
            return Err(GsaError::InvalidProblem(format!(
                "{} names but {} bounds",
                names.len(),
                bounds.len()
            )));
        }

        let bounds = bounds
            .into_iter()
            .zip(names.iter())
            .map(|((min, max), name)| {
                Bounds::new(min, max).map_err(|e| {
                    GsaError::InvalidProblem(format!("parameter '{}': {}", name, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_bounds(names, bounds)
    }

    /// Create a problem from names and already validated bounds.
    pub fn from_bounds(names: Vec<String>, bounds: Vec<Bounds>) -> Result<Self> {
        let problem = Self { names, bounds };
        problem.validate()?;
        Ok(problem)
    }

    /// Parse a problem from its JSON record
    /// (`{"names": [...], "bounds": [[low, high], ...]}`).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the problem to its JSON record.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the structural invariants of the problem.
    ///
    /// Names must be non-empty, unique and aligned with the bounds.
    pub fn validate(&self) -> Result<()> {
        if self.names.is_empty() {
            return Err(GsaError::InvalidProblem(
                "at least one parameter is required".to_string(),
            ));
        }

        if self.names.len() != self.bounds.len() {
            return Err(GsaError::InvalidProblem(format!(
                "{} names but {} bounds",
                self.names.len(),
                self.bounds.len()
            )));
        }

        let mut seen = HashSet::with_capacity(self.names.len());
        for name in &self.names {
            if name.trim().is_empty() {
                return Err(GsaError::InvalidProblem(
                    "parameter names must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(GsaError::InvalidProblem(format!(
                    "duplicate parameter name '{}'",
                    name
                )));
            }
        }

        // Bounds has public fields, so from_bounds may receive a struct literal
        for (name, bounds) in self.names.iter().zip(&self.bounds) {
            Bounds::new(bounds.min, bounds.max).map_err(|e| {
                GsaError::InvalidProblem(format!("parameter '{}': {}", name, e))
            })?;
        }

        Ok(())
    }

    /// Parameter names, in model order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Parameter bounds, aligned with [`Problem::names`].
    pub fn bounds(&self) -> &[Bounds] {
        &self.bounds
    }

    /// Number of uncertain parameters.
    pub fn num_vars(&self) -> usize {
        self.names.len()
    }

    /// Position of a parameter by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Map a sample drawn in the unit hypercube onto the parameter bounds.
    ///
    /// # Arguments
    ///
    /// * `unit` - `num_samples × num_vars` matrix with entries in `[0, 1]`
    ///
    /// # Returns
    ///
    /// * The same matrix with each column scaled to its parameter's bounds
    pub fn scale_samples(&self, mut unit: Array2<f64>) -> Result<Array2<f64>> {
        if unit.ncols() != self.num_vars() {
            return Err(GsaError::DimensionMismatch(format!(
                "sample has {} columns, problem has {} parameters",
                unit.ncols(),
                self.num_vars()
            )));
        }

        for (mut column, bounds) in unit.axis_iter_mut(Axis(1)).zip(&self.bounds) {
            column.mapv_inplace(|u| bounds.scale(u));
        }

        Ok(unit)
    }
}
