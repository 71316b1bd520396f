#![cfg(feature = "dev")]
//! Tests for the batch adapter.
//!
//! These tests verify one-shot fits through the fluent API:
//! - Default configuration (cubic spline, GCV)
//! - Multi-channel fits with shared knots
//! - Knot and channel weights
//! - Validation errors surfaced by `fit`
//!
//! ## Test Organization
//!
//! 1. **Basic Fits**
//! 2. **Multiple Channels**
//! 3. **Weights**
//! 4. **Errors**

use approx::assert_relative_eq;

use gcvspline::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn knots() -> Vec<f64> {
    (0..10).map(|i| i as f64 * 10.0 / 9.0).collect()
}

fn parabola() -> Vec<f64> {
    knots()
        .iter()
        .enumerate()
        .map(|(i, &x)| x * x + if i % 2 == 0 { 1e-3 } else { -1e-3 })
        .collect()
}

// ============================================================================
// Basic Fit Tests
// ============================================================================

/// Test a default batch fit on a perturbed parabola.
#[test]
fn test_default_fit() {
    let model = GcvSpline::new().adapter(Batch).build().unwrap();
    let fit = model.fit(&knots(), &parabola()).unwrap();

    assert_eq!(fit.order, 2);
    assert_eq!(fit.outcome, SearchOutcome::Converged);
    let mut spline = fit.spline(0).unwrap();
    assert!((spline.value(5.0) - 25.0).abs() < 1e-2);
}

/// Test that the builder returns the requested outputs.
#[test]
fn test_requested_outputs() {
    let model = GcvSpline::new()
        .criterion(FixedP(0.5))
        .return_fitted()
        .return_residuals()
        .return_diagnostics()
        .adapter(Batch)
        .build()
        .unwrap();
    let fit = model.fit(&knots(), &parabola()).unwrap();

    assert_eq!(fit.fitted.as_ref().unwrap()[0].len(), 10);
    assert_eq!(fit.residuals.as_ref().unwrap()[0].len(), 10);
    assert_eq!(fit.diagnostics.as_ref().unwrap().len(), 1);
    assert_eq!(fit.smoothing(), 0.5);
}

/// Test that the model can be reused across data sets.
#[test]
fn test_model_reuse() {
    let model = GcvSpline::new()
        .criterion(FixedP(0.1))
        .adapter(Batch)
        .build()
        .unwrap();

    let a = model.fit(&knots(), &parabola()).unwrap();
    let short: Vec<f64> = (0..6).map(|i| i as f64).collect();
    let b = model.fit(&short, &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0]).unwrap();

    assert_eq!(a.coefficients[0].len(), 10);
    assert_eq!(b.coefficients[0].len(), 6);
}

/// Test a quintic fit on noiseless cubic data.
#[test]
fn test_quintic_fixed_small_p_interpolates() {
    let x: Vec<f64> = (0..8).map(|i| i as f64 * 0.5).collect();
    let y: Vec<f64> = x.iter().map(|t| t * t * t - t).collect();
    let model = GcvSpline::new()
        .order(3)
        .criterion(FixedP(0.0))
        .adapter(Batch)
        .build()
        .unwrap();

    let fit = model.fit(&x, &y).unwrap();
    let mut spline = fit.spline(0).unwrap();
    assert_eq!(spline.degree(), 5);
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        assert_relative_eq!(spline.value(xi), yi, epsilon = 1e-6);
    }
}

// ============================================================================
// Multiple Channel Tests
// ============================================================================

/// Test that all channels share one smoothing parameter.
#[test]
fn test_multi_channel() {
    let x = knots();
    let y = parabola();
    let z: Vec<f64> = x.iter().map(|t| t.cos()).collect();
    let model = GcvSpline::new().adapter(Batch).build().unwrap();

    let fit = model.fit_channels(&x, &[y, z]).unwrap();

    assert_eq!(fit.channels(), 2);
    assert_eq!(fit.into_splines().len(), 2);
}

/// Test that a fixed-p multi-channel fit equals separate single fits.
#[test]
fn test_fixed_channels_independent() {
    let x = knots();
    let y = parabola();
    let z: Vec<f64> = x.iter().map(|t| t.cos()).collect();
    let model = GcvSpline::new()
        .criterion(FixedP(0.2))
        .adapter(Batch)
        .build()
        .unwrap();

    let joint = model.fit_channels(&x, &[y.clone(), z.clone()]).unwrap();
    let only_y = model.fit(&x, &y).unwrap();
    let only_z = model.fit(&x, &z).unwrap();

    assert_eq!(joint.coefficients[0], only_y.coefficients[0]);
    assert_eq!(joint.coefficients[1], only_z.coefficients[0]);
}

// ============================================================================
// Weight Tests
// ============================================================================

/// Test that a heavily weighted knot is pulled towards its sample.
#[test]
fn test_knot_weight_pulls_fit() {
    let x = knots();
    let mut y = parabola();
    y[5] += 5.0;

    let plain = GcvSpline::new()
        .criterion(FixedP(0.05))
        .return_residuals()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();

    let mut w = vec![1.0; 10];
    w[5] = 100.0;
    let weighted = GcvSpline::new()
        .criterion(FixedP(0.05))
        .knot_weights(w)
        .return_residuals()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();

    let r_plain = plain.residuals.unwrap()[0][5].abs();
    let r_weighted = weighted.residuals.unwrap()[0][5].abs();
    assert!(r_weighted < r_plain);
}

// ============================================================================
// Error Tests
// ============================================================================

/// Test that too few knots for the order is rejected.
#[test]
fn test_too_few_knots() {
    let model = GcvSpline::new().order(3).adapter(Batch).build().unwrap();
    let err = model.fit(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0; 5]).unwrap_err();

    assert_eq!(err, SplineError::TooFewKnots { got: 5, min: 6 });
    assert_eq!(err.kind(), ErrorKind::InvalidOrderOrSize);
}

/// Test that unsorted knots are rejected.
#[test]
fn test_unsorted_knots() {
    let model = GcvSpline::new().adapter(Batch).build().unwrap();
    let err = model
        .fit(&[0.0, 2.0, 1.0, 3.0, 4.0], &[1.0; 5])
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidWeightsOrKnots);
}

/// Test that a knot weight vector of the wrong length is rejected.
#[test]
fn test_knot_weight_length() {
    let model = GcvSpline::new()
        .knot_weights(vec![1.0; 3])
        .adapter(Batch)
        .build()
        .unwrap();
    let err = model.fit(&knots(), &parabola()).unwrap_err();

    assert!(matches!(err, SplineError::MismatchedWeights { kind: "knot", .. }));
}

/// Test that a channel of the wrong length is rejected.
#[test]
fn test_mismatched_channel() {
    let model = GcvSpline::new().adapter(Batch).build().unwrap();
    let err = model.fit(&knots(), &[1.0; 9]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

/// Test that a degrees-of-freedom target above N is rejected at fit time.
#[test]
fn test_degrees_of_freedom_above_n() {
    let model = GcvSpline::new()
        .criterion(DegreesOfFreedom(12.0))
        .adapter(Batch)
        .build()
        .unwrap();
    let err = model.fit(&knots(), &parabola()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidModeOrValue);
}
