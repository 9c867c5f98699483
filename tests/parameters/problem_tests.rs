//! Tests for the problem definition and its JSON record

use gsa_rs::{GsaError, Problem, Sensitivity};

use crate::test_helpers::{critical_head, piping_problem, PIPING_NAMES};

#[test]
fn test_num_vars_is_derived_from_names() {
    let problem = piping_problem();

    assert_eq!(problem.num_vars(), 8);
    assert_eq!(problem.names().len(), problem.bounds().len());
    assert_eq!(problem.index_of("kappa"), Some(2));
    assert_eq!(problem.index_of("missing"), None);
}

#[test]
fn test_json_record() {
    let json = r#"{
        "names": ["a", "b"],
        "bounds": [[0, 1], [-2.5, 2.5]]
    }"#;

    let problem = Problem::from_json(json).unwrap();
    assert_eq!(problem.names(), &["a".to_string(), "b".to_string()]);
    assert_eq!(problem.bounds()[1].min, -2.5);

    let written = problem.to_json().unwrap();
    assert!(written.contains("\"num_vars\": 2"));
    assert_eq!(Problem::from_json(&written).unwrap(), problem);
}

#[test]
fn test_malformed_json_records() {
    // Misaligned names and bounds
    assert!(Problem::from_json(r#"{"names": ["a", "b"], "bounds": [[0, 1]]}"#).is_err());

    // Inconsistent num_vars
    assert!(Problem::from_json(
        r#"{"names": ["a"], "bounds": [[0, 1]], "num_vars": 3}"#
    )
    .is_err());

    // Inverted bounds
    assert!(Problem::from_json(r#"{"names": ["a"], "bounds": [[1, 0]]}"#).is_err());

    // Missing field
    assert!(Problem::from_json(r#"{"names": ["a"]}"#).is_err());
}

#[test]
fn test_malformed_problems() {
    let err = Problem::new(vec!["a".to_string()], vec![(0.0, 1.0), (0.0, 1.0)]).unwrap_err();
    assert!(matches!(err, GsaError::InvalidProblem(_)));

    let err = Problem::new(
        vec!["a".to_string(), "a".to_string()],
        vec![(0.0, 1.0), (0.0, 1.0)],
    )
    .unwrap_err();
    assert!(matches!(err, GsaError::InvalidProblem(_)));

    assert!(Problem::new(vec![], vec![]).is_err());
    assert!(Problem::new(vec![" ".to_string()], vec![(0.0, 1.0)]).is_err());
    assert!(Problem::new(vec!["a".to_string()], vec![(0.0, f64::NAN)]).is_err());
}

#[test]
fn test_define_model_checks_fixed_arguments() {
    let mut s = Sensitivity::default();

    let err = s
        .define_model(critical_head, piping_problem(), &[f64::NAN])
        .unwrap_err();
    assert!(matches!(err, GsaError::InvalidInput(_)));
    assert!(s.problem().is_none());

    s.define_model(critical_head, piping_problem(), &[]).unwrap();
    let problem = s.problem().unwrap();
    assert_eq!(problem.num_vars(), PIPING_NAMES.len());
    assert_eq!(problem.names()[7], "theta");
}
