//! `f(v) = v[1] + v[2] · v[0]²` with `v[0] = 0` fixed, so only `a` matters.

use approx::assert_relative_eq;
use gsa_rs::{Sensitivity, SensitivityConfig, SensitivityMethod};

use crate::test_helpers::{parabola, parabola_problem};

const TOL: f64 = 1e-3;

fn session() -> Sensitivity {
    let mut s = Sensitivity::new(SensitivityConfig::default());
    s.define_model(parabola, parabola_problem(), &[0.0]).unwrap();
    s
}

#[test]
fn test_morris() {
    let mut s = session();
    let results = s.run_sensitivity(SensitivityMethod::Morris).unwrap();
    let morris = results.as_morris().unwrap();

    assert_relative_eq!(morris.mu_star[0], 1.0, epsilon = TOL);
    assert_relative_eq!(morris.mu_star[1], 0.0, epsilon = TOL);
    assert_relative_eq!(morris.mu[0], 1.0, epsilon = TOL);
    assert_eq!(s.samples().unwrap().len(), 1024 * 3);
}

#[test]
fn test_sobol() {
    let mut s = session();
    let results = s.run_sensitivity(SensitivityMethod::Sobol).unwrap();
    let sobol = results.as_sobol().unwrap();

    assert_relative_eq!(sobol.s1[0], 1.0, epsilon = TOL);
    assert_relative_eq!(sobol.s1[1], 0.0, epsilon = TOL);
    assert_relative_eq!(sobol.st[1], 0.0, epsilon = TOL);
    assert_eq!(s.samples().unwrap().len(), 1024 * 6);

    let summary = s.summary().unwrap();
    assert_eq!(summary.labels, vec!["b", "a"]);
    assert_eq!(summary.x_label, "S1");
}

#[test]
fn test_fixed_argument_changes_the_model() {
    // With v[0] = 1 the model is a + b, so both parameters matter equally
    let mut s = Sensitivity::new(SensitivityConfig::default().with_n_samples(64));
    s.define_model(parabola, parabola_problem(), &[1.0]).unwrap();

    let mu_star = s
        .run_sensitivity(SensitivityMethod::Morris)
        .unwrap()
        .primary_metric()
        .clone();
    assert_relative_eq!(mu_star[0], 1.0, epsilon = 1e-9);
    assert_relative_eq!(mu_star[1], 1.0, epsilon = 1e-9);
}
