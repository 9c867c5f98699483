//! Tests for parameter bounds

use approx::assert_relative_eq;
use gsa_rs::parameters::{Bounds, BoundsError};

#[test]
fn test_scale_maps_unit_interval() {
    let b = Bounds::new(900.0, 1100.0).unwrap();

    assert_relative_eq!(b.scale(0.0), 900.0);
    assert_relative_eq!(b.scale(0.5), 1000.0);
    assert_relative_eq!(b.scale(1.0), 1100.0);
    assert_relative_eq!(b.width(), 200.0);
}

#[test]
fn test_invalid_bounds() {
    assert!(matches!(
        Bounds::new(1.0, 1.0),
        Err(BoundsError::InvalidBounds { .. })
    ));
    assert!(matches!(
        Bounds::new(2.0, 1.0),
        Err(BoundsError::InvalidBounds { .. })
    ));
    assert!(matches!(
        Bounds::new(0.0, f64::INFINITY),
        Err(BoundsError::InfiniteBounds { .. })
    ));
    assert!(Bounds::new(f64::NAN, 1.0).is_err());
}

#[test]
fn test_bounds_json_pair() {
    let b: Bounds = serde_json::from_str("[1e-10, 0.01]").unwrap();
    assert_eq!(b, Bounds::new(1e-10, 0.01).unwrap());
    assert_eq!(serde_json::to_string(&b).unwrap(), "[1e-10,0.01]");

    assert!(serde_json::from_str::<Bounds>("[3.0, 1.0]").is_err());
}
