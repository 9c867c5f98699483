//! Sobol low-discrepancy sequence.
//!
//! Unscrambled Sobol sequence in \[0,1)^d generated in Gray-code order.
//! Point 0 is the origin. Coordinates are exact dyadic fractions.
//!
//! The first [`JOE_KUO_DIM`] dimensions use the Joe-Kuo `new-joe-kuo-6.21201`
//! direction numbers, so their stream is identical to other implementations
//! that use the same numbers and ordering (e.g.
//! `scipy.stats.qmc.Sobol(scramble=False)`). Higher dimensions continue the
//! same list of primitive polynomials (by degree, then by coefficient code)
//! and draw their odd initial direction integers from a fixed SplitMix64
//! stream keyed by the dimension, so every dimension count is supported and
//! the sequence stays deterministic.
//!
//! ## References
//!
//! - Sobol', I.M. (1967). "On the distribution of points in a cube and
//!   the approximate evaluation of integrals." USSR Comp. Math. & Math.
//!   Phys. 7(4):86–112.
//! - Joe, S. & Kuo, F.Y. (2008). "Constructing Sobol sequences with
//!   better two-dimensional projections." SIAM J. Sci. Comput. 30(5):
//!   2635–2654.
//! - Antonov, I.A. & Saleev, V.M. (1979). Gray-code ordering.

use ndarray::Array2;

use crate::error::{GsaError, Result};

/// Number of dimensions with tabulated Joe-Kuo direction numbers.
pub const JOE_KUO_DIM: usize = 37;

/// Number of bits in direction numbers (u32).
const BITS: usize = 32;

/// 2^32, the denominator of every coordinate.
const SCALE: f64 = 4_294_967_296.0;

/// Joe-Kuo parameters `(s, a, m_1..m_s)` for dimensions 2..=JOE_KUO_DIM.
///
/// `s` is the degree of the primitive polynomial, `a` encodes its inner
/// coefficients and `m` holds the initial direction integers (0-padded).
const JOE_KUO: [(usize, u32, [u32; 7]); JOE_KUO_DIM - 1] = [
    (1, 0, [1, 0, 0, 0, 0, 0, 0]),
    (2, 1, [1, 3, 0, 0, 0, 0, 0]),
    (3, 1, [1, 3, 1, 0, 0, 0, 0]),
    (3, 2, [1, 1, 1, 0, 0, 0, 0]),
    (4, 1, [1, 1, 3, 3, 0, 0, 0]),
    (4, 4, [1, 3, 5, 13, 0, 0, 0]),
    (5, 2, [1, 1, 5, 5, 17, 0, 0]),
    (5, 4, [1, 1, 5, 5, 5, 0, 0]),
    (5, 7, [1, 1, 7, 11, 19, 0, 0]),
    (5, 11, [1, 1, 5, 1, 1, 0, 0]),
    (5, 13, [1, 1, 1, 3, 11, 0, 0]),
    (5, 14, [1, 3, 5, 5, 31, 0, 0]),
    (6, 1, [1, 3, 3, 9, 7, 49, 0]),
    (6, 13, [1, 1, 1, 15, 21, 21, 0]),
    (6, 16, [1, 3, 1, 13, 27, 49, 0]),
    (6, 19, [1, 1, 1, 15, 7, 5, 0]),
    (6, 22, [1, 3, 1, 15, 13, 25, 0]),
    (6, 25, [1, 1, 5, 5, 19, 61, 0]),
    (7, 1, [1, 3, 7, 11, 23, 15, 103]),
    (7, 4, [1, 3, 7, 13, 13, 15, 69]),
    (7, 7, [1, 1, 3, 13, 7, 35, 63]),
    (7, 8, [1, 3, 5, 9, 1, 25, 53]),
    (7, 14, [1, 3, 1, 13, 9, 35, 107]),
    (7, 19, [1, 3, 1, 5, 27, 61, 31]),
    (7, 21, [1, 1, 5, 11, 19, 41, 61]),
    (7, 28, [1, 3, 5, 3, 3, 13, 69]),
    (7, 31, [1, 1, 7, 13, 1, 19, 1]),
    (7, 32, [1, 3, 7, 5, 13, 19, 59]),
    (7, 37, [1, 1, 3, 9, 25, 29, 41]),
    (7, 41, [1, 3, 5, 13, 23, 1, 55]),
    (7, 42, [1, 3, 7, 3, 13, 59, 17]),
    (7, 50, [1, 3, 1, 3, 5, 53, 69]),
    (7, 55, [1, 1, 5, 5, 23, 33, 13]),
    (7, 56, [1, 1, 7, 7, 1, 61, 123]),
    (7, 59, [1, 1, 7, 9, 13, 61, 49]),
    (7, 62, [1, 3, 3, 5, 3, 55, 33]),
];

/// Precomputed direction numbers of the tabulated dimensions.
/// `DIRECTIONS[dim][bit]` is the direction number of dimension `dim` at bit
/// position `bit`.
static DIRECTIONS: [[u32; BITS]; JOE_KUO_DIM] = compute_all_directions();

/// Van der Corput (first dimension) direction numbers.
const fn van_der_corput() -> [u32; BITS] {
    let mut v = [0u32; BITS];
    let mut c = 0usize;
    while c < BITS {
        v[c] = 1u32 << (31 - c as u32);
        c += 1;
    }
    v
}

/// Direction numbers for one dimension with primitive polynomial `(s, a)`.
///
/// `v[c] = m[c] << (31 - c)` for `c < s`, then
/// `v[c] = v[c-s] ^ (v[c-s] >> s) ^ XOR_{k=1}^{s-1} a_k · v[c-k]`
/// where `a_k` is bit `s-1-k` of `a`.
const fn direction_numbers(s: usize, a: u32, m: &[u32]) -> [u32; BITS] {
    let mut v = [0u32; BITS];

    let mut c = 0usize;
    while c < s && c < BITS {
        v[c] = m[c] << (31 - c as u32);
        c += 1;
    }

    while c < BITS {
        let mut val = v[c - s] ^ (v[c - s] >> s as u32);
        let mut k = 1usize;
        while k < s {
            let bit_pos = s - 1 - k;
            if (a >> bit_pos as u32) & 1 == 1 {
                val ^= v[c - k];
            }
            k += 1;
        }
        v[c] = val;
        c += 1;
    }

    v
}

const fn compute_all_directions() -> [[u32; BITS]; JOE_KUO_DIM] {
    let mut dirs = [[0u32; BITS]; JOE_KUO_DIM];
    dirs[0] = van_der_corput();
    let mut d = 1usize;
    while d < JOE_KUO_DIM {
        let (s, a, m) = JOE_KUO[d - 1];
        dirs[d] = direction_numbers(s, a, &m);
        d += 1;
    }
    dirs
}

/// Direction numbers for the first `dim` dimensions.
fn directions_for(dim: usize) -> Vec<[u32; BITS]> {
    let mut dirs: Vec<[u32; BITS]> = DIRECTIONS.iter().take(dim).copied().collect();
    if dim <= JOE_KUO_DIM {
        return dirs;
    }

    // Dimension 1 has no polynomial; dimension d uses polynomial d - 2
    let polynomials = primitive_polynomials(dim - 1);
    for (d, &(s, a)) in polynomials.iter().enumerate().skip(JOE_KUO_DIM - 1) {
        let m = initial_direction_integers(d + 2, s);
        dirs.push(direction_numbers(s, a, &m));
    }
    dirs
}

/// The first `count` primitive polynomials over GF(2), ordered by degree and
/// then by coefficient code `a`.
///
/// A degree-`s` polynomial is `x^s + c_1 x^(s-1) + ... + c_(s-1) x + 1` with
/// `a = c_1 c_2 .. c_(s-1)` read as a binary number.
pub fn primitive_polynomials(count: usize) -> Vec<(usize, u32)> {
    let mut found = Vec::with_capacity(count);
    let mut degree = 1usize;

    while found.len() < count && degree < BITS {
        let order = (1u64 << degree) - 1;
        let factors = prime_factors(order);
        for a in 0..(1u32 << (degree - 1)) {
            if found.len() == count {
                break;
            }
            let poly = (1u64 << degree) | (u64::from(a) << 1) | 1;
            if is_primitive(poly, degree, order, &factors) {
                found.push((degree, a));
            }
        }
        degree += 1;
    }

    found
}

/// `x` generates the multiplicative group of GF(2)[x] / poly.
fn is_primitive(poly: u64, degree: usize, order: u64, factors: &[u64]) -> bool {
    let x = if degree == 1 { 1 } else { 2 };
    pow_mod(x, order, poly, degree) == 1
        && factors
            .iter()
            .all(|&q| pow_mod(x, order / q, poly, degree) != 1)
}

fn mul_mod(mut a: u64, mut b: u64, poly: u64, degree: usize) -> u64 {
    let top = 1u64 << degree;
    let mut product = 0u64;
    while b != 0 {
        if b & 1 == 1 {
            product ^= a;
        }
        b >>= 1;
        a <<= 1;
        if a & top != 0 {
            a ^= poly;
        }
    }
    product
}

fn pow_mod(base: u64, mut exp: u64, poly: u64, degree: usize) -> u64 {
    let mut result = 1u64;
    let mut base = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, poly, degree);
        }
        base = mul_mod(base, base, poly, degree);
        exp >>= 1;
    }
    result
}

fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut p = 2u64;
    while p * p <= n {
        if n % p == 0 {
            factors.push(p);
            while n % p == 0 {
                n /= p;
            }
        }
        p += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// Odd initial direction integers `m_k < 2^k`, `k = 1..=s`, for a dimension
/// beyond the Joe-Kuo table.
fn initial_direction_integers(dim: usize, s: usize) -> Vec<u32> {
    let mut state = dim as u64;
    (1..=s)
        .map(|k| {
            let half = 1u64 << (k - 1);
            ((split_mix64(&mut state) % half) * 2 + 1) as u32
        })
        .collect()
}

fn split_mix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Sobol sequence generator.
///
/// ```
/// use gsa_rs::sample::sobol_sequence::SobolSequence;
///
/// let mut seq = SobolSequence::new(2).unwrap();
/// assert_eq!(seq.next_point().unwrap(), vec![0.0, 0.0]);
/// assert_eq!(seq.next_point().unwrap(), vec![0.5, 0.5]);
/// assert_eq!(seq.next_point().unwrap(), vec![0.75, 0.25]);
/// ```
#[derive(Debug, Clone)]
pub struct SobolSequence {
    directions: Vec<[u32; BITS]>,
    /// Index of the next point to be returned.
    index: u32,
    /// Coordinates of point `index` as 32-bit fractions.
    x: Vec<u32>,
}

impl SobolSequence {
    /// Create a generator for `dim` dimensions, positioned at point 0.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(GsaError::InvalidInput(
                "Sobol sequence dimension must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            directions: directions_for(dim),
            index: 0,
            x: vec![0u32; dim],
        })
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.x.len()
    }

    /// Index of the next point.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Skip `n` points.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        let target = u32::try_from(self.index as usize + n).map_err(|_| {
            GsaError::InvalidInput(format!("cannot skip {} Sobol points: sequence exhausted", n))
        })?;

        // Point i is the XOR of the direction numbers at the set bits of gray(i)
        let gray = target ^ (target >> 1);
        self.x.iter_mut().for_each(|xj| *xj = 0);
        for bit in 0..BITS {
            if (gray >> bit) & 1 == 1 {
                for (xj, dj) in self.x.iter_mut().zip(&self.directions) {
                    *xj ^= dj[bit];
                }
            }
        }
        self.index = target;
        Ok(())
    }

    /// Return the current point and advance by one.
    pub fn next_point(&mut self) -> Result<Vec<f64>> {
        let point = self.x.iter().map(|&xj| xj as f64 / SCALE).collect();
        self.advance()?;
        Ok(point)
    }

    /// Draw the next `n` points as rows of an `n × dim` matrix.
    pub fn sample(&mut self, n: usize) -> Result<Array2<f64>> {
        let mut out = Array2::zeros((n, self.dim()));
        for mut row in out.rows_mut() {
            for (o, &xj) in row.iter_mut().zip(&self.x) {
                *o = xj as f64 / SCALE;
            }
            self.advance()?;
        }
        Ok(out)
    }

    fn advance(&mut self) -> Result<()> {
        // gray(i) and gray(i + 1) differ in the bit at the number of trailing ones of i
        let c = self.index.trailing_ones() as usize;
        if c >= BITS {
            return Err(GsaError::InvalidInput(
                "Sobol sequence exhausted (2^32 points)".to_string(),
            ));
        }
        for (xj, dj) in self.x.iter_mut().zip(&self.directions) {
            *xj ^= dj[c];
        }
        self.index += 1;
        Ok(())
    }
}
