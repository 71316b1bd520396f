#![cfg(feature = "dev")]
//! Tests for input validation utilities.
//!
//! These tests verify the validation functions used before every fit:
//! - Order and knot count (`N >= 2M`)
//! - Knot monotonicity and finiteness
//! - Knot and channel weights
//! - Criterion values and search tunables
//! - Sample data shape and finiteness
//! - The order in which a full fit is checked
//!
//! ## Test Organization
//!
//! 1. **Order and Size**
//! 2. **Knots and Weights**
//! 3. **Criterion and Search**
//! 4. **Sample Data**
//! 5. **Check Order and Error Kinds**

use gcvspline::internals::engine::executor::SplineConfig;
use gcvspline::internals::engine::validator::Validator;
use gcvspline::internals::evaluation::criterion::Criterion;
use gcvspline::internals::primitives::errors::{ErrorKind, SplineError};

// ============================================================================
// Helper Functions
// ============================================================================

fn knots() -> Vec<f64> {
    vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]
}

fn config(criterion: Criterion<f64>) -> SplineConfig<f64> {
    SplineConfig {
        criterion,
        ..SplineConfig::default()
    }
}

// ============================================================================
// Order and Size Tests
// ============================================================================

/// Test that order 0 is rejected.
#[test]
fn test_order_zero() {
    assert!(matches!(
        Validator::validate_order(0),
        Err(SplineError::InvalidOrder(0))
    ));
    assert!(Validator::validate_order(1).is_ok());
}

/// Test the N >= 2M requirement at its boundary.
#[test]
fn test_size_boundary() {
    assert!(Validator::validate_size(6, 3).is_ok());
    assert!(matches!(
        Validator::validate_size(5, 3),
        Err(SplineError::TooFewKnots { got: 5, min: 6 })
    ));
}

// ============================================================================
// Knots and Weights Tests
// ============================================================================

/// Test that repeated knots are rejected with the offending index.
#[test]
fn test_knots_not_increasing() {
    let x = vec![0.0, 1.0, 1.0, 2.0];
    assert!(matches!(
        Validator::validate_knots(&x),
        Err(SplineError::NonIncreasingKnots { index: 2 })
    ));

    let x = vec![0.0, 2.0, 1.0, 3.0];
    assert!(matches!(
        Validator::validate_knots(&x),
        Err(SplineError::NonIncreasingKnots { index: 2 })
    ));
}

/// Test that non-finite knots are rejected.
#[test]
fn test_knots_not_finite() {
    let x = vec![0.0, f64::NAN, 2.0];
    let err = Validator::validate_knots(&x).unwrap_err();
    assert!(matches!(err, SplineError::InvalidNumericValue(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

/// Test that zero, negative and NaN knot weights are rejected.
#[test]
fn test_knot_weights() {
    assert!(Validator::validate_knot_weights(&[1.0, 0.5, 2.0], 3).is_ok());

    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let w = vec![1.0, bad, 1.0];
        assert!(
            matches!(
                Validator::validate_knot_weights(&w, 3),
                Err(SplineError::InvalidKnotWeight { index: 1, .. })
            ),
            "weight {bad} should be rejected"
        );
    }
}

/// Test that a knot weight vector of the wrong length is rejected.
#[test]
fn test_knot_weights_length() {
    assert!(matches!(
        Validator::validate_knot_weights(&[1.0, 1.0], 3),
        Err(SplineError::MismatchedWeights {
            kind: "knot",
            expected: 3,
            got: 2
        })
    ));
}

/// Test channel weight validation.
#[test]
fn test_channel_weights() {
    assert!(Validator::validate_channel_weights(&[1.0, 2.0], 2).is_ok());
    assert!(matches!(
        Validator::validate_channel_weights(&[1.0, 0.0], 2),
        Err(SplineError::InvalidChannelWeight { index: 1, .. })
    ));
    assert!(matches!(
        Validator::validate_channel_weights(&[1.0], 2),
        Err(SplineError::MismatchedWeights { kind: "channel", .. })
    ));
}

// ============================================================================
// Criterion and Search Tests
// ============================================================================

/// Test admissible criterion values.
#[test]
fn test_criterion_values() {
    assert!(Validator::validate_criterion(&Criterion::FixedP(0.0), 2).is_ok());
    assert!(Validator::validate_criterion(&Criterion::<f64>::Gcv, 2).is_ok());
    assert!(Validator::validate_criterion(&Criterion::KnownVariance(0.0), 2).is_ok());
    assert!(Validator::validate_criterion(&Criterion::DegreesOfFreedom(2.0), 2).is_ok());

    assert!(matches!(
        Validator::validate_criterion(&Criterion::FixedP(-1.0), 2),
        Err(SplineError::InvalidSmoothing(_))
    ));
    assert!(matches!(
        Validator::validate_criterion(&Criterion::FixedP(f64::INFINITY), 2),
        Err(SplineError::InvalidSmoothing(_))
    ));
    assert!(matches!(
        Validator::validate_criterion(&Criterion::KnownVariance(-0.1), 2),
        Err(SplineError::InvalidVariance(_))
    ));
    assert!(matches!(
        Validator::validate_criterion(&Criterion::DegreesOfFreedom(1.5), 2),
        Err(SplineError::InvalidDegreesOfFreedom { .. })
    ));
}

/// Test the degrees-of-freedom upper bound N.
#[test]
fn test_degrees_of_freedom_upper_bound() {
    assert!(Validator::validate_criterion_for_size(&Criterion::DegreesOfFreedom(6.0), 6, 2).is_ok());
    let err = Validator::validate_criterion_for_size(&Criterion::DegreesOfFreedom(6.5), 6, 2)
        .unwrap_err();
    assert_eq!(
        err,
        SplineError::InvalidDegreesOfFreedom {
            got: 6.5,
            min: 2.0,
            max: 6.0
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidModeOrValue);
}

/// Test the search tunables.
#[test]
fn test_search_tunables() {
    assert!(Validator::validate_search(&SplineConfig::<f64>::default()).is_ok());

    let bad = [
        SplineConfig {
            epsilon: 0.0,
            ..SplineConfig::default()
        },
        SplineConfig {
            epsilon: 1.0,
            ..SplineConfig::default()
        },
        SplineConfig {
            tolerance: -1e-6,
            ..SplineConfig::default()
        },
        SplineConfig {
            max_smoothing: f64::NAN,
            ..SplineConfig::default()
        },
        SplineConfig {
            max_refine_steps: 0,
            ..SplineConfig::default()
        },
    ];
    for cfg in &bad {
        assert!(matches!(
            Validator::validate_search(cfg),
            Err(SplineError::InvalidTolerance(_))
        ));
    }

    let cfg = SplineConfig {
        initial_smoothing: Some(0.0),
        ..SplineConfig::default()
    };
    assert!(matches!(
        Validator::validate_search(&cfg),
        Err(SplineError::InvalidSmoothing(_))
    ));
}

// ============================================================================
// Sample Data Tests
// ============================================================================

/// Test that no channels is an empty input.
#[test]
fn test_channels_empty() {
    let channels: Vec<Vec<f64>> = vec![];
    assert!(matches!(
        Validator::validate_channels(&channels, 4),
        Err(SplineError::EmptyInput)
    ));
}

/// Test that a short channel is reported with its index.
#[test]
fn test_channels_length() {
    let channels = vec![vec![1.0; 4], vec![1.0; 3]];
    assert!(matches!(
        Validator::validate_channels(&channels, 4),
        Err(SplineError::MismatchedInputs {
            channel: 1,
            knots: 4,
            values: 3
        })
    ));
}

/// Test that NaN samples are rejected.
#[test]
fn test_channels_nan() {
    let channels = vec![vec![1.0, f64::NAN, 1.0, 1.0]];
    let err = Validator::validate_channels(&channels, 4).unwrap_err();
    assert!(matches!(err, SplineError::InvalidNumericValue(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

// ============================================================================
// Check Order and Error Kind Tests
// ============================================================================

/// Test that a bad criterion is reported before a bad size.
#[test]
fn test_fit_checks_criterion_first() {
    let x = vec![0.0, 1.0];
    let err = Validator::validate_fit(
        &config(Criterion::KnownVariance(-1.0)),
        &x,
        &[1.0, 1.0],
        2,
        &[vec![1.0, 2.0]],
        &[1.0],
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidModeOrValue);
}

/// Test that a bad size is reported before bad weights.
#[test]
fn test_fit_checks_size_before_weights() {
    let x = vec![0.0, 1.0, 2.0];
    let err = Validator::validate_fit(
        &config(Criterion::Gcv),
        &x,
        &[1.0, -1.0, 1.0],
        2,
        &[vec![1.0, 2.0, 3.0]],
        &[1.0],
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOrderOrSize);
}

/// Test that bad channel weights are reported before bad data.
#[test]
fn test_fit_checks_weights_before_data() {
    let x = knots();
    let err = Validator::validate_fit(
        &config(Criterion::Gcv),
        &x,
        &[1.0; 6],
        2,
        &[vec![f64::NAN; 6]],
        &[0.0],
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidWeightsOrKnots);
}

/// Test that a valid fit passes every check.
#[test]
fn test_fit_valid() {
    let x = knots();
    let y = vec![1.0, 2.0, 1.5, 3.0, 2.5, 4.0];
    assert!(Validator::validate_fit(
        &config(Criterion::DegreesOfFreedom(3.0)),
        &x,
        &[1.0; 6],
        2,
        &[y],
        &[1.0]
    )
    .is_ok());
}

/// Test the error message of a knot violation, including index 0.
#[test]
fn test_error_display() {
    let err = SplineError::NonIncreasingKnots { index: 3 };
    assert_eq!(
        err.to_string(),
        "Knots must be strictly increasing: x[3] <= x[2]"
    );
    assert_eq!(err.kind(), ErrorKind::InvalidWeightsOrKnots);

    let first = SplineError::NonIncreasingKnots { index: 0 };
    assert_eq!(
        first.to_string(),
        "Knots must be strictly increasing: x[0] <= x[0]"
    );
}
