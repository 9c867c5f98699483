//! Samplers for the supported sensitivity methods.
//!
//! Every sampler draws points in the unit hypercube and scales them to the
//! problem bounds, returning one row per model evaluation. The row layout is
//! part of each sampler's contract with its analyzer in [`crate::analyze`].

pub mod morris;
pub mod saltelli;
pub mod sobol_sequence;

use ndarray::{Array2, ArrayView1};

use crate::method::SensitivityMethod;

/// The points at which a model was evaluated during one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    method: SensitivityMethod,
    points: Array2<f64>,
}

impl SampleSet {
    /// Wrap a sample drawn for `method`.
    pub fn new(method: SensitivityMethod, points: Array2<f64>) -> Self {
        Self { method, points }
    }

    /// The method whose sampler produced these points.
    pub fn method(&self) -> SensitivityMethod {
        self.method
    }

    /// `num_samples × num_vars` matrix in physical units.
    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    /// One sampled point.
    pub fn point(&self, index: usize) -> ArrayView1<'_, f64> {
        self.points.row(index)
    }

    /// Number of sampled points (model evaluations).
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    /// Whether the sample is empty.
    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// Number of parameters per point.
    pub fn num_vars(&self) -> usize {
        self.points.ncols()
    }
}
