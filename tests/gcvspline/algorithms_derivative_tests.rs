#![cfg(feature = "dev")]
//! Tests for spline and derivative evaluation.
//!
//! These tests verify:
//! - Piecewise-linear evaluation for order 1
//! - Agreement with the design matrix at the knots
//! - Derivatives against central differences
//! - Polynomial extrapolation of degree `M - 1` outside the knots
//! - Derivatives of order `>= 2M` vanish
//! - NaN query points
//!
//! ## Test Organization
//!
//! 1. **Linear Splines**
//! 2. **Consistency with the Design Matrix**
//! 3. **Derivatives**
//! 4. **Extrapolation**

use approx::assert_relative_eq;

use gcvspline::internals::algorithms::derivative::evaluate;
use gcvspline::internals::math::basis::DesignBasis;
use gcvspline::internals::primitives::interval::KnotCursor;

// ============================================================================
// Helper Functions
// ============================================================================

fn knots() -> Vec<f64> {
    vec![0.0, 0.7, 1.1, 2.0, 2.4, 3.9, 4.0, 5.5, 6.0, 7.2]
}

fn coefficients() -> Vec<f64> {
    (0..10).map(|i| (3.0 * i as f64).sin() + 0.5).collect()
}

fn eval(x: &[f64], c: &[f64], order: usize, t: f64, derivative: usize) -> f64 {
    let mut cursor = KnotCursor::new();
    let mut window = vec![0.0; 2 * order + 1];
    evaluate(x, c, order, t, derivative, &mut cursor, &mut window)
}

// ============================================================================
// Linear Splines
// ============================================================================

/// Test that order 1 interpolates linearly and extends constantly.
#[test]
fn test_order_one_piecewise_linear() {
    let x = [0.0, 1.0, 2.0];
    let c = [1.0, 3.0, 2.0];

    assert_relative_eq!(eval(&x, &c, 1, 0.5, 0), 2.0, epsilon = 1e-14);
    assert_relative_eq!(eval(&x, &c, 1, 1.0, 0), 3.0, epsilon = 1e-14);
    assert_relative_eq!(eval(&x, &c, 1, 1.5, 0), 2.5, epsilon = 1e-14);
    assert_relative_eq!(eval(&x, &c, 1, -1.0, 0), 1.0, epsilon = 1e-14);
    assert_relative_eq!(eval(&x, &c, 1, 5.0, 0), 2.0, epsilon = 1e-14);
}

/// Test slopes of an order-1 spline.
#[test]
fn test_order_one_slopes() {
    let x = [0.0, 1.0, 2.0];
    let c = [1.0, 3.0, 2.0];

    assert_relative_eq!(eval(&x, &c, 1, 0.5, 1), 2.0, epsilon = 1e-14);
    assert_relative_eq!(eval(&x, &c, 1, 1.5, 1), -1.0, epsilon = 1e-14);
    assert_eq!(eval(&x, &c, 1, -1.0, 1).abs(), 0.0);
    assert_eq!(eval(&x, &c, 1, 5.0, 1).abs(), 0.0);
}

// ============================================================================
// Consistency with the Design Matrix
// ============================================================================

/// Test that values at the knots equal the design matrix product.
#[test]
fn test_values_match_design_matrix() {
    let x = knots();
    let c = coefficients();

    for order in 1..=3 {
        let basis = DesignBasis::build(&x, order);
        let mut fitted = vec![0.0; x.len()];
        basis.matrix.mul_vec(&c, &mut fitted);

        for (i, &xi) in x.iter().enumerate() {
            assert_relative_eq!(eval(&x, &c, order, xi, 0), fitted[i], epsilon = 1e-12);
        }
    }
}

// ============================================================================
// Derivative Tests
// ============================================================================

/// Test every derivative below 2M against a central difference.
#[test]
fn test_derivatives_match_central_differences() {
    let x = knots();
    let c = coefficients();
    let h = 1e-5;

    for order in 1..=3 {
        for &t in &[0.35, 3.3, 6.6] {
            for d in 1..2 * order {
                let analytic = eval(&x, &c, order, t, d);
                let numeric =
                    (eval(&x, &c, order, t + h, d - 1) - eval(&x, &c, order, t - h, d - 1))
                        / (2.0 * h);
                assert_relative_eq!(analytic, numeric, epsilon = 1e-5, max_relative = 1e-6);
            }
        }
    }
}

/// Test that derivatives of order 2M and above are zero without locating.
#[test]
fn test_high_derivatives_vanish() {
    let x = knots();
    let c = coefficients();
    let mut cursor = KnotCursor::new();
    let mut window = vec![0.0; 5];

    for d in 4..8 {
        assert_eq!(evaluate(&x, &c, 2, 3.3, d, &mut cursor, &mut window), 0.0);
    }
    assert_eq!(cursor.interval(), 0);
}

/// Test that a shared cursor gives the same result as a fresh one.
#[test]
fn test_cursor_reuse() {
    let x = knots();
    let c = coefficients();
    let mut cursor = KnotCursor::new();
    let mut window = vec![0.0; 5];

    for &t in &[6.5, 0.2, 3.95, 3.95, 7.0, -0.5] {
        let shared = evaluate(&x, &c, 2, t, 0, &mut cursor, &mut window);
        assert_relative_eq!(shared, eval(&x, &c, 2, t, 0), epsilon = 1e-14);
    }
}

/// Test that a NaN query yields NaN and leaves the cursor where it was.
#[test]
fn test_nan_query() {
    let x = knots();
    let c = coefficients();

    for order in 1..=3 {
        let mut window = vec![0.0; 2 * order + 1];

        let mut fresh = KnotCursor::new();
        assert!(evaluate(&x, &c, order, f64::NAN, 0, &mut fresh, &mut window).is_nan());
        assert_eq!(fresh.interval(), 0);

        let mut cursor = KnotCursor::new();
        evaluate(&x, &c, order, 3.95, 0, &mut cursor, &mut window);
        let before = cursor.interval();
        assert!(evaluate(&x, &c, order, f64::NAN, 1, &mut cursor, &mut window).is_nan());
        assert_eq!(cursor.interval(), before);
    }
}

// ============================================================================
// Extrapolation Tests
// ============================================================================

/// Test that the M-th derivative vanishes outside the knots.
#[test]
fn test_natural_extrapolation() {
    let x = knots();
    let c = coefficients();

    for order in 1..=3 {
        assert_eq!(eval(&x, &c, order, -2.0, order).abs(), 0.0);
        assert_eq!(eval(&x, &c, order, 9.0, order).abs(), 0.0);
    }
}
