//! Supported sensitivity methods and the sampler/analyzer pairs behind them.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::analyze::{self, MorrisAnalysisOptions, SobolAnalysisOptions};
use crate::config::SensitivityConfig;
use crate::error::{GsaError, Result};
use crate::parameters::Problem;
use crate::results::SensitivityResults;
use crate::sample;
use crate::utils::random::legacy_rng;

/// A global sensitivity analysis method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityMethod {
    /// Morris elementary-effects screening
    Morris,

    /// Sobol variance decomposition on a Saltelli sample
    Sobol,
}

impl SensitivityMethod {
    /// Every supported method.
    pub const ALL: [SensitivityMethod; 2] = [SensitivityMethod::Morris, SensitivityMethod::Sobol];

    /// The method token, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            SensitivityMethod::Morris => "morris",
            SensitivityMethod::Sobol => "sobol",
        }
    }

    /// Symbol of the metric parameters are ranked by.
    pub fn metric_label(self) -> &'static str {
        match self {
            SensitivityMethod::Morris => "μ*",
            SensitivityMethod::Sobol => "S1",
        }
    }

    /// The sampler/analyzer pair implementing this method.
    pub fn procedure(self) -> &'static dyn SensitivityProcedure {
        match self {
            SensitivityMethod::Morris => &MorrisProcedure,
            SensitivityMethod::Sobol => &SobolProcedure,
        }
    }
}

impl FromStr for SensitivityMethod {
    type Err = GsaError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        SensitivityMethod::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| {
                GsaError::UnsupportedMethod(format!(
                    "'{}' (expected one of: morris, sobol)",
                    s
                ))
            })
    }
}

impl fmt::Display for SensitivityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A sampler paired with the analyzer that understands its row layout.
pub trait SensitivityProcedure: Sync {
    /// Draw the sample, in physical units, at which the model is evaluated.
    fn sample(&self, problem: &Problem, config: &SensitivityConfig) -> Result<Array2<f64>>;

    /// Compute indices from the sample and the model outputs at its rows.
    fn analyze(
        &self,
        problem: &Problem,
        x: &Array2<f64>,
        y: &Array1<f64>,
        config: &SensitivityConfig,
    ) -> Result<SensitivityResults>;
}

/// Morris trajectories analyzed by elementary effects.
///
/// Trajectories are drawn from MT19937 seeded like numpy's `RandomState`;
/// the bootstrap of `mu_star_conf` uses ChaCha8.
#[derive(Debug, Clone, Copy, Default)]
pub struct MorrisProcedure;

impl SensitivityProcedure for MorrisProcedure {
    fn sample(&self, problem: &Problem, config: &SensitivityConfig) -> Result<Array2<f64>> {
        let mut rng = legacy_rng(config.seed)?;
        sample::morris::sample(problem, config.n_samples, config.num_levels, &mut rng)
    }

    fn analyze(
        &self,
        problem: &Problem,
        x: &Array2<f64>,
        y: &Array1<f64>,
        config: &SensitivityConfig,
    ) -> Result<SensitivityResults> {
        let options = MorrisAnalysisOptions {
            num_levels: config.num_levels,
            num_resamples: config.num_resamples,
            conf_level: config.conf_level,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let results = analyze::morris::analyze(problem, x, y, &options, &mut rng)?;
        Ok(SensitivityResults::Morris(results))
    }
}

/// Saltelli sample analyzed by the Sobol estimators.
#[derive(Debug, Clone, Copy, Default)]
pub struct SobolProcedure;

impl SensitivityProcedure for SobolProcedure {
    fn sample(&self, problem: &Problem, config: &SensitivityConfig) -> Result<Array2<f64>> {
        sample::saltelli::sample(
            problem,
            config.n_samples,
            config.calc_second_order,
            config.skip_values,
        )
    }

    fn analyze(
        &self,
        problem: &Problem,
        _x: &Array2<f64>,
        y: &Array1<f64>,
        config: &SensitivityConfig,
    ) -> Result<SensitivityResults> {
        let options = SobolAnalysisOptions {
            calc_second_order: config.calc_second_order,
            num_resamples: config.num_resamples,
            conf_level: config.conf_level,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let results = analyze::sobol::analyze(problem, y, &options, &mut rng)?;
        Ok(SensitivityResults::Sobol(results))
    }
}
