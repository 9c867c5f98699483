//! Configuration options for a sensitivity analysis run.
//!
//! This module defines the sample size, seed and method-specific settings
//! shared by the samplers and analyzers.

use serde::{Deserialize, Serialize};

use crate::error::{GsaError, Result};

/// Configuration options for a sensitivity analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivityConfig {
    /// Number of Morris trajectories, or Saltelli base samples. Default: 1024
    pub n_samples: usize,

    /// Seed for Morris trajectories and all bootstrap resampling; must fit in
    /// 32 bits. Default: 1
    pub seed: u64,

    /// Number of grid levels of the Morris design; must be even. Default: 4
    pub num_levels: usize,

    /// Number of bootstrap resamples for confidence intervals. Default: 100
    pub num_resamples: usize,

    /// Confidence level of the bootstrap intervals. Default: 0.95
    pub conf_level: f64,

    /// Whether the Saltelli design includes the cross matrices needed for
    /// second-order indices. Default: true
    pub calc_second_order: bool,

    /// Number of leading Sobol sequence points to skip. `None` skips `n_samples`
    /// rounded up to a power of two. Default: None
    pub skip_values: Option<usize>,

    /// Whether to evaluate the model on the rayon thread pool. Default: true
    pub parallel: bool,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            n_samples: 1024,
            seed: 1,
            num_levels: 4,
            num_resamples: 100,
            conf_level: 0.95,
            calc_second_order: true,
            skip_values: None,
            parallel: true,
        }
    }
}

impl SensitivityConfig {
    /// Set the number of trajectories / base samples.
    pub fn with_n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of Morris grid levels.
    pub fn with_num_levels(mut self, num_levels: usize) -> Self {
        self.num_levels = num_levels;
        self
    }

    /// Set the number of bootstrap resamples.
    pub fn with_num_resamples(mut self, num_resamples: usize) -> Self {
        self.num_resamples = num_resamples;
        self
    }

    /// Set the confidence level.
    pub fn with_conf_level(mut self, conf_level: f64) -> Self {
        self.conf_level = conf_level;
        self
    }

    /// Enable or disable second-order Sobol indices.
    pub fn with_second_order(mut self, calc_second_order: bool) -> Self {
        self.calc_second_order = calc_second_order;
        self
    }

    /// Set the number of skipped Sobol sequence points.
    pub fn with_skip_values(mut self, skip_values: usize) -> Self {
        self.skip_values = Some(skip_values);
        self
    }

    /// Enable or disable parallel model evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that the settings describe a runnable analysis.
    pub fn validate(&self) -> Result<()> {
        if self.n_samples == 0 {
            return Err(GsaError::InvalidConfig(
                "n_samples must be at least 1".to_string(),
            ));
        }

        if self.num_levels < 2 || self.num_levels % 2 != 0 {
            return Err(GsaError::InvalidConfig(format!(
                "num_levels must be an even number >= 2, got {}",
                self.num_levels
            )));
        }

        if u32::try_from(self.seed).is_err() {
            return Err(GsaError::InvalidConfig(format!(
                "seed must fit in 32 bits, got {}",
                self.seed
            )));
        }

        if self.num_resamples < 2 {
            return Err(GsaError::InvalidConfig(format!(
                "num_resamples must be at least 2, got {}",
                self.num_resamples
            )));
        }

        if !(self.conf_level > 0.0 && self.conf_level < 1.0) {
            return Err(GsaError::InvalidConfig(format!(
                "conf_level must lie in (0, 1), got {}",
                self.conf_level
            )));
        }

        Ok(())
    }
}
