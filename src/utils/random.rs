//! Seeded draws compatible with numpy's legacy `RandomState`.
//!
//! `RandomState(seed)` is MT19937 initialised with `init_genrand(seed)`. Its
//! bounded integers (`randint`, `choice`, `shuffle`) come from masked
//! rejection on 32-bit outputs: take the next output, keep the bits of the
//! smallest all-ones mask covering the range, retry when the result is too
//! large. Drawing in the same order from [`legacy_rng`] reproduces the
//! designs of numpy-based tools.

use rand::RngCore;
use rand_mt::Mt;

use crate::error::{GsaError, Result};

/// MT19937 seeded like `numpy.random.RandomState(seed)`.
///
/// Seeds above `u32::MAX` are rejected with `GsaError::InvalidConfig`.
pub fn legacy_rng(seed: u64) -> Result<Mt> {
    let seed = u32::try_from(seed).map_err(|_| {
        GsaError::InvalidConfig(format!("seed must fit in 32 bits, got {}", seed))
    })?;
    Ok(Mt::new(seed))
}

/// Uniform integer in `0..=max`.
///
/// `max == 0` consumes nothing.
pub fn bounded<R: RngCore + ?Sized>(rng: &mut R, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    let mask = u32::MAX >> max.leading_zeros();
    loop {
        let value = rng.next_u32() & mask;
        if value <= max {
            return value;
        }
    }
}

/// Shuffle in place, swapping each position from the last down to 1 with a
/// uniform position at or below it.
pub fn shuffle<R: RngCore + ?Sized, T>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = bounded(rng, i as u32) as usize;
        items.swap(i, j);
    }
}

/// Uniform choice of one element; `None` for an empty slice.
pub fn choose<'a, R: RngCore + ?Sized, T>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    let last = items.len().checked_sub(1)?;
    items.get(bounded(rng, last as u32) as usize)
}
