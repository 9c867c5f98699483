//! Session behaviour: ranking, determinism and error handling.

use gsa_rs::model::fallible;
use gsa_rs::{GsaError, Sensitivity, SensitivityConfig, SensitivityMethod, SensitivityResults};

use crate::test_helpers::{critical_head, parabola, parabola_problem, piping_problem};

fn piping_session(config: SensitivityConfig) -> Sensitivity {
    let mut s = Sensitivity::new(config);
    s.define_model(critical_head, piping_problem(), &[]).unwrap();
    s
}

#[test]
fn test_summary_is_a_sorted_permutation() {
    for method in SensitivityMethod::ALL {
        let mut s = piping_session(SensitivityConfig::default().with_n_samples(64));
        s.run_sensitivity(method).unwrap();

        let summary = s.summary().unwrap();
        assert_eq!(summary.method, method);
        assert_eq!(summary.labels.len(), summary.values.len());
        assert!(summary.values.windows(2).all(|w| w[0] <= w[1]));

        let mut labels = summary.labels.clone();
        labels.sort();
        let mut names = s.problem().unwrap().names().to_vec();
        names.sort();
        assert_eq!(labels, names);

        // Every value is the metric of its own parameter
        let results = s.results().unwrap();
        for (label, value) in summary.iter() {
            let i = s.problem().unwrap().index_of(label).unwrap();
            assert_eq!(results.primary_metric()[i], value);
        }
    }
}

#[test]
fn test_runs_are_deterministic() {
    for method in SensitivityMethod::ALL {
        let config = SensitivityConfig::default().with_n_samples(32);
        let mut s1 = piping_session(config.clone());
        let mut s2 = piping_session(config.with_parallel(false));

        // Compared as JSON: the unused half of the S2 matrix is NaN
        let r1 = s1.run_sensitivity(method).unwrap().to_json().unwrap();
        let r2 = s2.run_sensitivity(method).unwrap().to_json().unwrap();
        assert_eq!(r1, r2);
        assert_eq!(s1.outputs(), s2.outputs());
    }
}

#[test]
fn test_seed_changes_morris_design() {
    let mut s1 = piping_session(SensitivityConfig::default().with_n_samples(16));
    let mut s2 = piping_session(SensitivityConfig::default().with_n_samples(16).with_seed(2));
    s1.run_sensitivity(SensitivityMethod::Morris).unwrap();
    s2.run_sensitivity(SensitivityMethod::Morris).unwrap();

    assert_ne!(s1.samples().unwrap().points(), s2.samples().unwrap().points());
}

#[test]
fn test_results_align_with_problem() {
    let mut s = piping_session(SensitivityConfig::default().with_n_samples(16));

    let results = s.run_sensitivity(SensitivityMethod::Sobol).unwrap();
    let sobol = results.as_sobol().unwrap();
    assert_eq!(sobol.names.len(), 8);
    assert_eq!(sobol.s1.len(), 8);
    assert_eq!(sobol.st_conf.len(), 8);
    assert_eq!(sobol.s2.as_ref().unwrap().dim(), (8, 8));

    let results = s.run_sensitivity(SensitivityMethod::Morris).unwrap();
    let morris = results.as_morris().unwrap();
    assert_eq!(morris.mu.len(), 8);
    assert_eq!(morris.sigma.len(), 8);
    assert_eq!(s.samples().unwrap().num_vars(), 8);
}

#[test]
fn test_non_finite_output_aborts_run() {
    let mut s = Sensitivity::new(SensitivityConfig::default().with_n_samples(64));
    s.define_model(|v: &[f64]| 1.0 / v[0], parabola_problem(), &[])
        .unwrap();

    // Morris starts trajectories on the grid, so a = 0 is sampled
    let err = s.run_sensitivity(SensitivityMethod::Morris).unwrap_err();
    assert!(matches!(err, GsaError::FunctionEvaluation(_)));
    assert!(err.to_string().contains("sample"));
    assert!(s.results().is_none());
}

#[test]
fn test_fallible_model_errors_propagate() {
    let mut s = Sensitivity::new(SensitivityConfig::default().with_n_samples(8));
    let model = fallible(|v: &[f64]| {
        if v[1] > 0.5 {
            Err(GsaError::Other("out of range".to_string()))
        } else {
            Ok(v[0])
        }
    });
    s.define_model(model, parabola_problem(), &[]).unwrap();

    let err = s.run_sensitivity(SensitivityMethod::Sobol).unwrap_err();
    assert!(matches!(err, GsaError::FunctionEvaluation(_)));
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn test_invalid_config_is_reported() {
    let mut s = Sensitivity::new(SensitivityConfig::default().with_n_samples(0));
    s.define_model(parabola, parabola_problem(), &[0.0]).unwrap();

    assert!(matches!(
        s.run_sensitivity(SensitivityMethod::Morris),
        Err(GsaError::InvalidConfig(_))
    ));

    s.set_config(SensitivityConfig::default().with_conf_level(1.5));
    assert!(matches!(
        s.run_sensitivity(SensitivityMethod::Sobol),
        Err(GsaError::InvalidConfig(_))
    ));
}

#[test]
fn test_unknown_method_token() {
    let err = "efast".parse::<SensitivityMethod>().unwrap_err();
    assert!(matches!(err, GsaError::UnsupportedMethod(_)));
}

#[test]
fn test_results_json() {
    let mut s = Sensitivity::new(SensitivityConfig::default().with_n_samples(16));
    s.define_model(parabola, parabola_problem(), &[0.0]).unwrap();
    let json = s.run_sensitivity(SensitivityMethod::Morris).unwrap().to_json().unwrap();

    assert!(json.contains("\"method\": \"morris\""));
    assert!(json.contains("\"mu_star\""));

    let summary = s.summary().unwrap().to_json().unwrap();
    assert!(summary.contains("\"labels\""));
}

#[test]
fn test_sobol_results_json_round_trip() {
    let mut s = Sensitivity::new(SensitivityConfig::default().with_n_samples(64));
    s.define_model(parabola, parabola_problem(), &[0.0]).unwrap();
    let results = s.run_sensitivity(SensitivityMethod::Sobol).unwrap().clone();

    // The lower half of S2 is NaN and travels as null
    let json = results.to_json().unwrap();
    let parsed = SensitivityResults::from_json(&json).unwrap();

    assert_eq!(parsed.method(), SensitivityMethod::Sobol);
    assert_eq!(parsed.primary_metric(), results.primary_metric());
    let s2 = parsed.as_sobol().unwrap().s2.as_ref().unwrap();
    assert!(s2[[1, 0]].is_nan());
    assert_eq!(s2[[0, 1]], results.as_sobol().unwrap().s2.as_ref().unwrap()[[0, 1]]);
    assert_eq!(parsed.to_json().unwrap(), json);
}
