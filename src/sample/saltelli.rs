//! Saltelli cross-sampling for variance-based sensitivity analysis.
//!
//! A Sobol sequence of dimension `2D` is split into two base matrices `A`
//! (first `D` columns) and `B` (last `D` columns). For every base row the
//! design emits, in order:
//!
//! ```text
//! A, AB_1 .. AB_D, [BA_1 .. BA_D], B
//! ```
//!
//! where `AB_j` is `A` with column `j` taken from `B`, and `BA_j` is `B` with
//! column `j` taken from `A` (only when second-order indices are requested).
//! The analyzer in [`crate::analyze::sobol`] relies on exactly this layout.

use ndarray::{s, Array2};
use tracing::{debug, warn};

use super::sobol_sequence::SobolSequence;
use crate::error::{GsaError, Result};
use crate::parameters::Problem;

/// Number of model evaluations per base sample.
pub fn rows_per_base_sample(num_vars: usize, calc_second_order: bool) -> usize {
    if calc_second_order {
        2 * num_vars + 2
    } else {
        num_vars + 2
    }
}

/// Generate a Saltelli sample scaled to the problem bounds.
///
/// # Arguments
///
/// * `problem` - The parameter space
/// * `n` - Number of base samples; a power of two keeps the Sobol design balanced
/// * `calc_second_order` - Include the `BA_j` blocks needed for second-order indices
/// * `skip_values` - Leading Sobol points to skip; `None` skips `n` rounded up
///   to a power of two
///
/// # Returns
///
/// * `n * (2D + 2)` rows (or `n * (D + 2)` without second order), `D` columns
pub fn sample(
    problem: &Problem,
    n: usize,
    calc_second_order: bool,
    skip_values: Option<usize>,
) -> Result<Array2<f64>> {
    let d = problem.num_vars();
    if n == 0 {
        return Err(GsaError::InvalidInput(
            "number of base samples must be at least 1".to_string(),
        ));
    }

    if !n.is_power_of_two() {
        warn!(n, "the Sobol design is balanced only when N is a power of two");
    }

    let skip = skip_values.unwrap_or_else(|| n.next_power_of_two());
    if skip > 0 {
        if !skip.is_power_of_two() {
            warn!(skip, "skip_values should be a power of two");
        } else if skip < n {
            warn!(skip, n, "skip_values should be at least N");
        }
    }

    let mut sequence = SobolSequence::new(2 * d)?;
    sequence.skip(skip)?;
    let base = sequence.sample(n)?;

    let step = rows_per_base_sample(d, calc_second_order);
    let mut unit = Array2::zeros((n * step, d));

    for (i, base_row) in base.rows().into_iter().enumerate() {
        let a = base_row.slice(s![..d]);
        let b = base_row.slice(s![d..]);
        let first = i * step;

        unit.row_mut(first).assign(&a);

        for k in 0..d {
            let mut ab = unit.row_mut(first + 1 + k);
            ab.assign(&a);
            ab[k] = b[k];
        }

        if calc_second_order {
            for k in 0..d {
                let mut ba = unit.row_mut(first + 1 + d + k);
                ba.assign(&b);
                ba[k] = a[k];
            }
        }

        unit.row_mut(first + step - 1).assign(&b);
    }

    debug!(
        num_vars = d,
        base_samples = n,
        skip,
        rows = unit.nrows(),
        "generated Saltelli sample"
    );

    problem.scale_samples(unit)
}
