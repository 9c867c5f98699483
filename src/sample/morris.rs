//! Morris one-at-a-time trajectory design.
//!
//! Each trajectory is a `(k + 1) × k` matrix on a `p`-level grid in the unit
//! hypercube. It starts from a random base point, and each of the `k`
//! parameters moves exactly once, by `±Δ` with `Δ = p / (2(p − 1))`, in a
//! random order. Consecutive rows therefore differ in a single coordinate,
//! which is what the elementary-effects analyzer relies on.
//!
//! A trajectory is
//!
//! ```text
//! B* = J x* + Δ/2 · ((2 B P*ᵀ − J) D* + J)
//! ```
//!
//! with `B` the strictly lower-triangular ones matrix, `P*` a shuffled
//! identity, `D*` a diagonal of random signs and `x*` a base point drawn from
//! `linspace(0, 1 − Δ, p / 2)`. The random draws per trajectory are, in
//! order: the shuffle of `P*`, the `k` signs, the `k` base levels. With
//! [`crate::utils::random::legacy_rng`] this reproduces the designs of
//! numpy-based Morris samplers for the same seed.
//!
//! Reference: Morris, M.D. (1991). "Factorial sampling plans for preliminary
//! computational experiments." Technometrics 33(2):161–174.

use ndarray::Array2;
use rand::RngCore;
use tracing::debug;

use crate::error::{GsaError, Result};
use crate::parameters::Problem;
use crate::utils::random::{bounded, choose, shuffle};

/// Grid step of a `num_levels` Morris design.
pub fn compute_delta(num_levels: usize) -> f64 {
    num_levels as f64 / (2.0 * (num_levels as f64 - 1.0))
}

/// Check that `num_levels` describes a Morris grid: even and at least 2.
pub fn check_num_levels(num_levels: usize) -> Result<()> {
    if num_levels < 2 || num_levels % 2 != 0 {
        return Err(GsaError::InvalidInput(format!(
            "num_levels must be an even number >= 2, got {}",
            num_levels
        )));
    }
    Ok(())
}

/// Generate `n` Morris trajectories scaled to the problem bounds.
///
/// # Arguments
///
/// * `problem` - The parameter space
/// * `n` - Number of trajectories
/// * `num_levels` - Number of grid levels; must be even and at least 2
/// * `rng` - Random number generator
///
/// # Returns
///
/// * An `n * (k + 1) × k` matrix; rows `t*(k+1) .. (t+1)*(k+1)` form trajectory `t`
pub fn sample<R: RngCore + ?Sized>(
    problem: &Problem,
    n: usize,
    num_levels: usize,
    rng: &mut R,
) -> Result<Array2<f64>> {
    if n == 0 {
        return Err(GsaError::InvalidInput(
            "number of trajectories must be at least 1".to_string(),
        ));
    }
    check_num_levels(num_levels)?;

    let k = problem.num_vars();
    let mut unit = Array2::zeros((n * (k + 1), k));

    for t in 0..n {
        let trajectory = generate_trajectory(k, num_levels, rng);
        unit.slice_mut(ndarray::s![t * (k + 1)..(t + 1) * (k + 1), ..])
            .assign(&trajectory);
    }

    debug!(
        num_vars = k,
        trajectories = n,
        num_levels,
        rows = unit.nrows(),
        "generated Morris sample"
    );

    problem.scale_samples(unit)
}

/// Generate a single trajectory in the unit hypercube.
///
/// Row `r`, column `i` equals `x*_i + Δ/2 · ((2·[i moved before r] − 1)·d_i + 1)`,
/// where `d_i = ±1` is the direction of parameter `i`.
pub fn generate_trajectory<R: RngCore + ?Sized>(
    num_params: usize,
    num_levels: usize,
    rng: &mut R,
) -> Array2<f64> {
    let delta = compute_delta(num_levels);

    // Row i of the shuffled identity P* has its one in column moved_at[i]
    let mut moved_at: Vec<usize> = (0..num_params).collect();
    shuffle(rng, &mut moved_at);

    let directions: Vec<f64> = (0..num_params)
        .map(|_| if bounded(rng, 1) == 0 { -1.0 } else { 1.0 })
        .collect();

    // Base levels on the lower part of the grid, so that x* + Δ stays in [0, 1]
    let grid = base_grid(num_levels, delta);
    let x_star: Vec<f64> = (0..num_params)
        .map(|_| choose(rng, &grid).copied().unwrap_or(0.0))
        .collect();

    Array2::from_shape_fn((num_params + 1, num_params), |(r, i)| {
        let moved = if moved_at[i] < r { 1.0 } else { 0.0 };
        x_star[i] + (delta / 2.0) * ((2.0 * moved - 1.0) * directions[i] + 1.0)
    })
}

/// `num_levels / 2` evenly spaced base levels from 0 to `1 − Δ`, endpoint exact.
fn base_grid(num_levels: usize, delta: f64) -> Vec<f64> {
    let points = num_levels / 2;
    let stop = 1.0 - delta;
    if points < 2 {
        return vec![0.0; points.max(1)];
    }
    let step = stop / (points - 1) as f64;
    let mut grid: Vec<f64> = (0..points).map(|i| i as f64 * step).collect();
    grid[points - 1] = stop;
    grid
}
