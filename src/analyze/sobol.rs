//! Variance-based (Sobol) analysis of a Saltelli sample.
//!
//! Outputs are standardized and split into the `A`, `B`, `AB_j` and `BA_j`
//! blocks of the Saltelli layout. The estimators are
//!
//! ```text
//! S1_j  = mean(B · (AB_j − A)) / V
//! ST_j  = ½ · mean((A − AB_j)²) / V
//! S2_jk = mean(BA_j · AB_k − A · B) / V − S1_j − S1_k
//! ```
//!
//! with `V` the variance of `[A; B]` (Saltelli et al. 2010, Jansen 1999).
//! Confidence half-widths come from a bootstrap over base samples.
//!
//! Reference: Saltelli, A. et al. (2010). "Variance based sensitivity analysis
//! of model output. Design and estimator for the total sensitivity index."
//! Computer Physics Communications 181(2):259–270.

use ndarray::{Array1, Array2};
use rand::Rng;
use tracing::debug;

use crate::error::{GsaError, Result};
use crate::parameters::Problem;
use crate::results::SobolResults;
use crate::sample::saltelli::rows_per_base_sample;
use crate::utils::stats::{mean, std_dev, z_score};

/// Options of the Sobol analyzer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SobolAnalysisOptions {
    /// Whether the sample contains the `BA_j` blocks. Must match sampling. Default: true
    pub calc_second_order: bool,

    /// Bootstrap resamples for the confidence half-widths. Default: 100
    pub num_resamples: usize,

    /// Confidence level. Default: 0.95
    pub conf_level: f64,
}

impl Default for SobolAnalysisOptions {
    fn default() -> Self {
        Self {
            calc_second_order: true,
            num_resamples: 100,
            conf_level: 0.95,
        }
    }
}

/// Model outputs split by Saltelli block, one row per base sample.
struct SaltelliBlocks {
    a: Array1<f64>,
    b: Array1<f64>,
    ab: Array2<f64>,
    ba: Option<Array2<f64>>,
}

impl SaltelliBlocks {
    fn split(y: &Array1<f64>, d: usize, calc_second_order: bool) -> Self {
        let step = rows_per_base_sample(d, calc_second_order);
        let n = y.len() / step;

        let a = Array1::from_shape_fn(n, |i| y[i * step]);
        let b = Array1::from_shape_fn(n, |i| y[i * step + step - 1]);
        let ab = Array2::from_shape_fn((n, d), |(i, j)| y[i * step + 1 + j]);
        let ba = calc_second_order
            .then(|| Array2::from_shape_fn((n, d), |(i, j)| y[i * step + 1 + d + j]));

        Self { a, b, ab, ba }
    }

    /// Variance (ddof = 0) of `[A; B]` over the selected base samples.
    fn variance(&self, idx: &[usize]) -> f64 {
        let values: Vec<f64> = idx
            .iter()
            .map(|&i| self.a[i])
            .chain(idx.iter().map(|&i| self.b[i]))
            .collect();
        let m = mean(&values);
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
    }

    fn first_order(&self, j: usize, idx: &[usize], var: f64) -> f64 {
        let total: f64 = idx
            .iter()
            .map(|&i| self.b[i] * (self.ab[[i, j]] - self.a[i]))
            .sum();
        total / idx.len() as f64 / var
    }

    fn total_order(&self, j: usize, idx: &[usize], var: f64) -> f64 {
        let total: f64 = idx
            .iter()
            .map(|&i| (self.a[i] - self.ab[[i, j]]).powi(2))
            .sum();
        0.5 * total / idx.len() as f64 / var
    }

    fn second_order(&self, j: usize, k: usize, idx: &[usize], var: f64) -> f64 {
        let ba = match &self.ba {
            Some(ba) => ba,
            None => return f64::NAN,
        };
        let total: f64 = idx
            .iter()
            .map(|&i| ba[[i, j]] * self.ab[[i, k]] - self.a[i] * self.b[i])
            .sum();
        let vjk = total / idx.len() as f64 / var;
        vjk - self.first_order(j, idx, var) - self.first_order(k, idx, var)
    }
}

/// Compute Sobol indices from the model outputs of a Saltelli sample.
///
/// # Arguments
///
/// * `problem` - The parameter space the sample was drawn from
/// * `y` - Model outputs in Saltelli row order
/// * `options` - Second-order flag and bootstrap settings
/// * `rng` - Random number generator for the bootstrap
///
/// # Returns
///
/// * First-order, total-order and (optionally) second-order indices
pub fn analyze<R: Rng + ?Sized>(
    problem: &Problem,
    y: &Array1<f64>,
    options: &SobolAnalysisOptions,
    rng: &mut R,
) -> Result<SobolResults> {
    let d = problem.num_vars();
    let step = rows_per_base_sample(d, options.calc_second_order);

    if y.is_empty() || y.len() % step != 0 {
        return Err(GsaError::DimensionMismatch(format!(
            "{} model outputs is not a multiple of {}; check that calc_second_order matches the sampling",
            y.len(),
            step
        )));
    }
    if options.num_resamples < 2 {
        return Err(GsaError::InvalidInput(format!(
            "num_resamples must be at least 2, got {}",
            options.num_resamples
        )));
    }
    if !(options.conf_level > 0.0 && options.conf_level < 1.0) {
        return Err(GsaError::InvalidInput(format!(
            "conf_level must lie in (0, 1), got {}",
            options.conf_level
        )));
    }

    let values = y.to_vec();
    let (y_mean, y_std) = (mean(&values), std_dev(&values, 0));
    if !(y_std > 0.0 && y_std.is_finite()) {
        return Err(GsaError::InvalidComputation(
            "model output has zero variance; Sobol indices are undefined".to_string(),
        ));
    }
    let standardized = y.mapv(|v| (v - y_mean) / y_std);

    let blocks = SaltelliBlocks::split(&standardized, d, options.calc_second_order);
    let n = blocks.a.len();

    // One set of resampled base-sample indices shared by every estimator
    let all: Vec<usize> = (0..n).collect();
    let resamples: Vec<Vec<usize>> = (0..options.num_resamples)
        .map(|_| (0..n).map(|_| rng.gen_range(0..n)).collect())
        .collect();

    let var = blocks.variance(&all);
    let resample_vars: Vec<f64> = resamples.iter().map(|r| blocks.variance(r)).collect();

    let z = z_score(options.conf_level);

    let mut s1 = Array1::<f64>::zeros(d);
    let mut s1_conf = Array1::<f64>::zeros(d);
    let mut st = Array1::<f64>::zeros(d);
    let mut st_conf = Array1::<f64>::zeros(d);

    for j in 0..d {
        s1[j] = blocks.first_order(j, &all, var);
        s1_conf[j] = z * bootstrap_std(&resamples, &resample_vars, |r, v| {
            blocks.first_order(j, r, v)
        });
        st[j] = blocks.total_order(j, &all, var);
        st_conf[j] = z * bootstrap_std(&resamples, &resample_vars, |r, v| {
            blocks.total_order(j, r, v)
        });
    }

    let (s2, s2_conf) = if options.calc_second_order {
        let mut s2 = Array2::from_elem((d, d), f64::NAN);
        let mut s2_conf = Array2::from_elem((d, d), f64::NAN);
        for j in 0..d {
            for k in (j + 1)..d {
                s2[[j, k]] = blocks.second_order(j, k, &all, var);
                s2_conf[[j, k]] = z * bootstrap_std(&resamples, &resample_vars, |r, v| {
                    blocks.second_order(j, k, r, v)
                });
            }
        }
        (Some(s2), Some(s2_conf))
    } else {
        (None, None)
    };

    debug!(num_vars = d, base_samples = n, "computed Sobol indices");

    Ok(SobolResults {
        names: problem.names().to_vec(),
        s1,
        s1_conf,
        st,
        st_conf,
        s2,
        s2_conf,
    })
}

/// Standard deviation (ddof = 1) of an estimator over the bootstrap resamples.
fn bootstrap_std<F>(resamples: &[Vec<usize>], variances: &[f64], estimate: F) -> f64
where
    F: Fn(&[usize], f64) -> f64,
{
    let estimates: Vec<f64> = resamples
        .iter()
        .zip(variances)
        .map(|(r, &v)| estimate(r, v))
        .collect();
    std_dev(&estimates, 1)
}
