//! Tests for the samplers through the public API

use gsa_rs::sample::saltelli;
use gsa_rs::sample::sobol_sequence::{SobolSequence, JOE_KUO_DIM};
use gsa_rs::sample::morris;
use gsa_rs::Problem;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::test_helpers::piping_problem;

fn unit_problem(d: usize) -> Problem {
    Problem::new(
        (0..d).map(|i| format!("x{}", i)).collect(),
        vec![(0.0, 1.0); d],
    )
    .unwrap()
}

#[test]
fn test_saltelli_layout() {
    let problem = piping_problem();
    let d = problem.num_vars();

    let x = saltelli::sample(&problem, 16, true, None).unwrap();
    assert_eq!(x.dim(), (16 * (2 * d + 2), d));

    // AB_j equals A except in column j, which comes from B
    let step = 2 * d + 2;
    for i in 0..16 {
        let a = x.row(i * step);
        let b = x.row(i * step + step - 1);
        for j in 0..d {
            let ab = x.row(i * step + 1 + j);
            let ba = x.row(i * step + 1 + d + j);
            for k in 0..d {
                if k == j {
                    assert_eq!(ab[k], b[k]);
                    assert_eq!(ba[k], a[k]);
                } else {
                    assert_eq!(ab[k], a[k]);
                    assert_eq!(ba[k], b[k]);
                }
            }
        }
    }

    let x = saltelli::sample(&problem, 16, false, None).unwrap();
    assert_eq!(x.nrows(), 16 * (d + 2));
}

#[test]
fn test_saltelli_within_bounds_and_deterministic() {
    let problem = piping_problem();

    let x1 = saltelli::sample(&problem, 64, true, None).unwrap();
    let x2 = saltelli::sample(&problem, 64, true, None).unwrap();
    assert_eq!(x1, x2);

    for row in x1.rows() {
        for (v, b) in row.iter().zip(problem.bounds()) {
            assert!(b.is_within_bounds(*v));
        }
    }

    // A different skip gives a different design
    let x3 = saltelli::sample(&problem, 64, true, Some(128)).unwrap();
    assert_ne!(x1, x3);
}

#[test]
fn test_saltelli_many_parameters() {
    // 19 and 40 parameters need more Sobol dimensions than are tabulated
    for d in [19, 40] {
        let x = saltelli::sample(&unit_problem(d), 8, true, None).unwrap();
        assert_eq!(x.dim(), (8 * (2 * d + 2), d));
    }
    assert!(saltelli::sample(&unit_problem(2), 0, true, None).is_err());
}

#[test]
fn test_sobol_sequence_is_low_discrepancy() {
    let mut seq = SobolSequence::new(2).unwrap();
    let points = seq.sample(256).unwrap();

    // Every 1/16 × 1/16 cell of the unit square receives exactly one point
    let mut counts = [[0usize; 16]; 16];
    for p in points.rows() {
        counts[(p[0] * 16.0) as usize][(p[1] * 16.0) as usize] += 1;
    }
    assert!(counts.iter().flatten().all(|&c| c == 1));

    assert!(SobolSequence::new(JOE_KUO_DIM + 1).is_ok());
    assert!(SobolSequence::new(0).is_err());
}

#[test]
fn test_sobol_sequence_skip_matches_iteration() {
    let mut skipped = SobolSequence::new(5).unwrap();
    skipped.skip(100).unwrap();

    let mut iterated = SobolSequence::new(5).unwrap();
    for _ in 0..100 {
        iterated.next_point().unwrap();
    }

    assert_eq!(skipped.index(), iterated.index());
    assert_eq!(skipped.next_point().unwrap(), iterated.next_point().unwrap());
}

#[test]
fn test_morris_sample_reproducible_per_seed() {
    let problem = piping_problem();
    let d = problem.num_vars();

    let x1 = morris::sample(&problem, 32, 4, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
    let x2 = morris::sample(&problem, 32, 4, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
    assert_eq!(x1, x2);
    assert_eq!(x1.dim(), (32 * (d + 1), d));

    // Each step of a trajectory changes a single parameter
    for t in 0..32 {
        for r in 0..d {
            let before = x1.row(t * (d + 1) + r);
            let after = x1.row(t * (d + 1) + r + 1);
            let changed = before.iter().zip(after.iter()).filter(|(a, b)| a != b).count();
            assert_eq!(changed, 1);
        }
    }
}
