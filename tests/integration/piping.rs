//! Sellmeijer piping rule with eight uncertain parameters.
//!
//! Reference values were produced by SALib with seed 1 and N = 1024. The
//! Morris trajectories are drawn from the same MT19937 stream and the Saltelli
//! design from the same Joe-Kuo sequence, so both methods agree to `TOL`.

use gsa_rs::{Sensitivity, SensitivityConfig, SensitivityMethod};

use crate::test_helpers::{critical_head, piping_problem, top_k, PIPING_NAMES};

const TOL: f64 = 1e-3;

const MORRIS_MU_STAR: [f64; 8] = [
    915.9254001644193,
    99.52218844798767,
    2796.866806146651,
    2150.2271814858223,
    660.8008008618482,
    323.1977472767453,
    1967.1992051873128,
    707.168950042373,
];

const SOBOL_S1: [f64; 8] = [
    0.02524764, 0.00189894, 0.28866622, 0.21257942, 0.02024224, 0.00423152, 0.18361218, 0.03374495,
];

fn session() -> Sensitivity {
    let mut s = Sensitivity::new(SensitivityConfig::default());
    s.define_model(critical_head, piping_problem(), &[]).unwrap();
    s
}

fn index(name: &str) -> usize {
    PIPING_NAMES.iter().position(|n| *n == name).unwrap()
}

#[test]
fn test_morris_mu_star() {
    let mut s = session();
    let results = s.run_sensitivity(SensitivityMethod::Morris).unwrap();
    let mu_star = results.as_morris().unwrap().mu_star.to_vec();

    for (i, (&got, &want)) in mu_star.iter().zip(MORRIS_MU_STAR.iter()).enumerate() {
        assert!(
            (got - want).abs() <= TOL,
            "{}: {} vs {}",
            PIPING_NAMES[i],
            got,
            want
        );
    }

    // kappa dominates and D is the least influential
    assert_eq!(top_k(&mu_star, 1), vec![index("kappa")]);
    assert_eq!(top_k(&mu_star, 8)[7], index("D"));

    let summary = s.summary().unwrap();
    assert_eq!(summary.most_influential().map(|(name, _)| name), Some("kappa"));
}

#[test]
fn test_sobol_first_order() {
    let mut s = session();
    let results = s.run_sensitivity(SensitivityMethod::Sobol).unwrap();
    let s1 = results.as_sobol().unwrap().s1.to_vec();

    for (i, (&got, &want)) in s1.iter().zip(SOBOL_S1.iter()).enumerate() {
        assert!(
            (got - want).abs() <= TOL,
            "{}: {} vs {}",
            PIPING_NAMES[i],
            got,
            want
        );
    }

    let mut top3 = top_k(&s1, 3);
    top3.sort_unstable();
    assert_eq!(top3, vec![index("kappa"), index("d70"), index("eta")]);
}
