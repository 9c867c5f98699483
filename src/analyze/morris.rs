//! Elementary-effects analysis of a Morris sample.
//!
//! For every trajectory and parameter the elementary effect is
//!
//! ```text
//! EE_i = sign(Δx_i) · (y_{r+1} − y_r) / Δ
//! ```
//!
//! where rows `r` and `r + 1` are the two points of the trajectory that differ
//! only in parameter `i`, and `Δ` is the grid step in the unit hypercube.
//! The statistics reported per parameter are the mean (`mu`), the mean of
//! absolute values (`mu_star`), the sample standard deviation (`sigma`) and a
//! bootstrap confidence half-width for `mu_star`.

use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;
use tracing::debug;

use crate::error::{GsaError, Result};
use crate::parameters::Problem;
use crate::results::MorrisResults;
use crate::sample::morris::{check_num_levels, compute_delta};
use crate::utils::stats::{mean, std_dev, z_score};

/// Options of the Morris analyzer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorrisAnalysisOptions {
    /// Grid levels used when sampling. Default: 4
    pub num_levels: usize,

    /// Bootstrap resamples for `mu_star_conf`. Default: 100
    pub num_resamples: usize,

    /// Confidence level of `mu_star_conf`. Default: 0.95
    pub conf_level: f64,
}

impl Default for MorrisAnalysisOptions {
    fn default() -> Self {
        Self {
            num_levels: 4,
            num_resamples: 100,
            conf_level: 0.95,
        }
    }
}

/// Compute Morris statistics from a trajectory sample and its model outputs.
///
/// # Arguments
///
/// * `problem` - The parameter space the sample was drawn from
/// * `x` - The sample, as produced by [`crate::sample::morris::sample`]
/// * `y` - Model outputs aligned with the rows of `x`
/// * `options` - Grid levels and bootstrap settings
/// * `rng` - Random number generator for the bootstrap
///
/// # Returns
///
/// * The per-parameter statistics
pub fn analyze<R: Rng + ?Sized>(
    problem: &Problem,
    x: &Array2<f64>,
    y: &Array1<f64>,
    options: &MorrisAnalysisOptions,
    rng: &mut R,
) -> Result<MorrisResults> {
    let k = problem.num_vars();
    let trajectory_size = k + 1;

    if x.ncols() != k {
        return Err(GsaError::DimensionMismatch(format!(
            "sample has {} columns, problem has {} parameters",
            x.ncols(),
            k
        )));
    }
    if x.nrows() != y.len() {
        return Err(GsaError::DimensionMismatch(format!(
            "{} sample rows but {} model outputs",
            x.nrows(),
            y.len()
        )));
    }
    if y.is_empty() || y.len() % trajectory_size != 0 {
        return Err(GsaError::DimensionMismatch(format!(
            "{} model outputs is not a whole number of trajectories of {} points",
            y.len(),
            trajectory_size
        )));
    }
    check_num_levels(options.num_levels)?;
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

    let delta = compute_delta(options.num_levels);
    let num_trajectories = y.len() / trajectory_size;
    let ee = elementary_effects(x, y, trajectory_size, delta)?;

    let z = z_score(options.conf_level);
    let mut mu = Array1::zeros(k);
    let mut mu_star = Array1::zeros(k);
    let mut sigma = Array1::zeros(k);
    let mut mu_star_conf = Array1::zeros(k);

    for (i, effects) in ee.rows().into_iter().enumerate() {
        let effects = effects.to_vec();
        let abs_effects: Vec<f64> = effects.iter().map(|e| e.abs()).collect();

        mu[i] = mean(&effects);
        mu_star[i] = mean(&abs_effects);
        sigma[i] = std_dev(&effects, 1);
        mu_star_conf[i] =
            z * mu_star_bootstrap_std(&abs_effects, num_trajectories, options.num_resamples, rng);
    }

    debug!(num_vars = k, num_trajectories, "computed Morris statistics");

    Ok(MorrisResults {
        names: problem.names().to_vec(),
        mu,
        mu_star,
        sigma,
        mu_star_conf,
    })
}

/// Elementary effects as a `k × num_trajectories` matrix.
fn elementary_effects(
    x: &Array2<f64>,
    y: &Array1<f64>,
    trajectory_size: usize,
    delta: f64,
) -> Result<Array2<f64>> {
    let k = trajectory_size - 1;
    let num_trajectories = y.len() / trajectory_size;
    let mut ee = Array2::from_elem((k, num_trajectories), f64::NAN);

    for t in 0..num_trajectories {
        let first = t * trajectory_size;
        let mut seen = vec![false; k];

        for step in 0..k {
            let (r0, r1) = (first + step, first + step + 1);
            let i = moved_parameter(x.row(r0), x.row(r1)).ok_or_else(|| {
                GsaError::InvalidInput(format!(
                    "rows {} and {} of trajectory {} must differ in exactly one parameter",
                    r0, r1, t
                ))
            })?;

            if seen[i] {
                return Err(GsaError::InvalidInput(format!(
                    "parameter {} moves twice in trajectory {}",
                    i, t
                )));
            }
            seen[i] = true;

            let sign = if x[[r1, i]] > x[[r0, i]] { 1.0 } else { -1.0 };
            ee[[i, t]] = sign * (y[r1] - y[r0]) / delta;
        }
    }

    Ok(ee)
}

/// Index of the single coordinate that differs between two rows.
fn moved_parameter(before: ArrayView1<f64>, after: ArrayView1<f64>) -> Option<usize> {
    let mut changed = before
        .iter()
        .zip(after.iter())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i);

    match (changed.next(), changed.next()) {
        (Some(i), None) => Some(i),
        _ => None,
    }
}

/// Standard deviation (ddof = 1) of `mu_star` over bootstrap resamples of the
/// trajectories.
fn mu_star_bootstrap_std<R: Rng + ?Sized>(
    abs_effects: &[f64],
    num_trajectories: usize,
    num_resamples: usize,
    rng: &mut R,
) -> f64 {
    let resampled: Vec<f64> = (0..num_resamples)
        .map(|_| {
            let total: f64 = (0..num_trajectories)
                .map(|_| abs_effects[rng.gen_range(0..abs_effects.len())])
                .sum();
            total / num_trajectories as f64
        })
        .collect();

    std_dev(&resampled, 1)
}
