//! Tests for the analyzers through the lower-level API

use approx::assert_relative_eq;
use gsa_rs::analyze::{morris, sobol, MorrisAnalysisOptions, SobolAnalysisOptions};
use gsa_rs::sample;
use gsa_rs::{GsaError, Problem};
use ndarray::Array1;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::test_helpers::{critical_head, piping_problem};

fn evaluate(x: &ndarray::Array2<f64>, f: fn(&[f64]) -> f64) -> Array1<f64> {
    x.rows().into_iter().map(|row| f(&row.to_vec())).collect()
}

fn linear(v: &[f64]) -> f64 {
    4.0 * v[0] + 2.0 * v[1] + v[2]
}

fn linear_problem() -> Problem {
    Problem::new(
        vec!["x0".to_string(), "x1".to_string(), "x2".to_string()],
        vec![(0.0, 1.0); 3],
    )
    .unwrap()
}

#[test]
fn test_morris_linear_effects_equal_slopes() {
    let problem = linear_problem();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let x = sample::morris::sample(&problem, 40, 4, &mut rng).unwrap();
    let y = evaluate(&x, linear);

    let r = morris::analyze(&problem, &x, &y, &MorrisAnalysisOptions::default(), &mut rng).unwrap();
    assert_relative_eq!(r.mu_star[0], 4.0, epsilon = 1e-9);
    assert_relative_eq!(r.mu_star[1], 2.0, epsilon = 1e-9);
    assert_relative_eq!(r.mu_star[2], 1.0, epsilon = 1e-9);
    assert_relative_eq!(r.mu[1], 2.0, epsilon = 1e-9);
    assert_eq!(r.names, vec!["x0", "x1", "x2"]);
}

#[test]
fn test_sobol_linear_indices() {
    // Variances 16, 4 and 1 (times 1/12): S1 = ST = [16, 4, 1] / 21
    let problem = linear_problem();
    let x = sample::saltelli::sample(&problem, 1024, true, None).unwrap();
    let y = evaluate(&x, linear);

    let r = sobol::analyze(
        &problem,
        &y,
        &SobolAnalysisOptions::default(),
        &mut ChaCha8Rng::seed_from_u64(1),
    )
    .unwrap();

    let expected = [16.0 / 21.0, 4.0 / 21.0, 1.0 / 21.0];
    for j in 0..3 {
        assert_relative_eq!(r.s1[j], expected[j], epsilon = 0.03);
        assert_relative_eq!(r.st[j], expected[j], epsilon = 0.03);
        assert!(r.s1_conf[j] >= 0.0);
    }

    let s2 = r.s2.unwrap();
    for j in 0..3 {
        for k in 0..3 {
            if j < k {
                assert_relative_eq!(s2[[j, k]], 0.0, epsilon = 0.05);
            } else {
                assert!(s2[[j, k]].is_nan());
            }
        }
    }
}

#[test]
fn test_sobol_second_order_flag_must_match_sample() {
    let problem = piping_problem();
    let x = sample::saltelli::sample(&problem, 8, false, None).unwrap();
    let y = evaluate(&x, critical_head);

    // 8 * 10 rows do not split into blocks of 18
    let options = SobolAnalysisOptions::default();
    let err = sobol::analyze(&problem, &y, &options, &mut ChaCha8Rng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(err, GsaError::DimensionMismatch(_)));

    let options = SobolAnalysisOptions {
        calc_second_order: false,
        ..Default::default()
    };
    let r = sobol::analyze(&problem, &y, &options, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
    assert!(r.s2.is_none());
}

#[test]
fn test_bootstrap_is_seeded() {
    let problem = linear_problem();
    let x = sample::saltelli::sample(&problem, 64, true, None).unwrap();
    let y = evaluate(&x, |v| v[0] * v[1] + v[2]);
    let options = SobolAnalysisOptions::default();

    let r1 = sobol::analyze(&problem, &y, &options, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
    let r2 = sobol::analyze(&problem, &y, &options, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
    let r3 = sobol::analyze(&problem, &y, &options, &mut ChaCha8Rng::seed_from_u64(2)).unwrap();

    assert_eq!(r1.s1_conf, r2.s1_conf);
    assert_eq!(r1.s1, r3.s1);
    assert_ne!(r1.s1_conf, r3.s1_conf);
}

fn wide_linear(v: &[f64]) -> f64 {
    10.0 * v[0] + v[1..].iter().sum::<f64>()
}

#[test]
fn test_sobol_twenty_parameters() {
    // Variance shares 100 : 1 : ... : 1 over 20 inputs
    let d = 20;
    let problem = Problem::new(
        (0..d).map(|i| format!("x{}", i)).collect(),
        vec![(0.0, 1.0); d],
    )
    .unwrap();
    let x = sample::saltelli::sample(&problem, 1024, false, None).unwrap();
    let y = evaluate(&x, wide_linear);

    let options = SobolAnalysisOptions {
        calc_second_order: false,
        ..Default::default()
    };
    let r = sobol::analyze(&problem, &y, &options, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();

    assert_eq!(r.s1.len(), d);
    assert_relative_eq!(r.s1[0], 100.0 / 119.0, epsilon = 0.1);
    assert_relative_eq!(r.st[0], 100.0 / 119.0, epsilon = 0.1);
    for j in 1..d {
        assert_relative_eq!(r.s1[j], 1.0 / 119.0, epsilon = 0.03);
    }
}
