#![cfg(feature = "dev")]
//! Tests for the banded solver.
//!
//! These tests verify:
//! - Resolution of the regularization floor and ceiling
//! - Assembly of design plus scaled penalty
//! - In-place factorization and substitution
//!
//! ## Test Organization
//!
//! 1. **Regularization** - Floor, ceiling and pass-through
//! 2. **Assembly** - Outer bands and inner bands
//! 3. **Solve** - Residual of the solved system

use approx::assert_relative_eq;

use gcvspline::internals::algorithms::banded::{assemble, factorize, solve, Clamp, Regularization};
use gcvspline::internals::math::basis::DesignBasis;
use gcvspline::internals::math::penalty::RoughnessPenalty;
use gcvspline::internals::primitives::band::BandMatrix;

// ============================================================================
// Helper Functions
// ============================================================================

// Diagonally dominant, non-symmetric band matrix.
fn sample_matrix(n: usize, m: usize) -> BandMatrix<f64> {
    let mut a = BandMatrix::zeros(n, m);
    for i in 0..n {
        for k in a.lower_offset(i)..=a.upper_offset(i) {
            a[(i, k)] = match k {
                0 => 6.0 + i as f64 * 0.25,
                k if k > 0 => 0.7 / (k as f64 + 1.0),
                k => -0.4 / (-k) as f64 + 0.1 * i as f64,
            };
        }
    }
    a
}

// ============================================================================
// Regularization Tests
// ============================================================================

/// Test that an ordinary value passes through unchanged.
#[test]
fn test_resolve_pass_through() {
    let reg = Regularization::resolve(0.5, 2.0, 1e-15);

    assert_eq!(reg.clamp, Clamp::None);
    assert_eq!(reg.effective, 0.5);
    assert_eq!(reg.reported, 0.5);
}

/// Test the floor: solved at ε/el, reported as zero.
#[test]
fn test_resolve_floor() {
    let reg = Regularization::resolve(0.0, 4.0, 1e-10);

    assert_eq!(reg.clamp, Clamp::Floor);
    assert_relative_eq!(reg.effective, 1e-10 / 4.0, max_relative = 1e-14);
    assert_eq!(reg.reported, 0.0);
}

/// Test the ceiling: solved and reported at 1/(el·ε).
#[test]
fn test_resolve_ceiling() {
    let reg = Regularization::resolve(1e20, 1.0, 1e-15);

    assert_eq!(reg.clamp, Clamp::Ceiling);
    assert_relative_eq!(reg.effective, 1e15, max_relative = 1e-14);
    assert_eq!(reg.reported, reg.effective);
}

// ============================================================================
// Assembly Tests
// ============================================================================

/// Test that outer bands carry only the penalty and inner bands both terms.
#[test]
fn test_assemble_bands() {
    let x = vec![0.0, 1.0, 2.5, 3.0, 4.2, 5.0, 6.1];
    let basis = DesignBasis::build(&x, 2);
    let penalty = RoughnessPenalty::build(&x, &[1.0; 7], 2);
    let p = 0.3;

    let mut system = BandMatrix::zeros(7, 2);
    assemble(&mut system, &basis.matrix, &penalty.matrix, p);

    for i in 0..7 {
        for k in system.lower_offset(i)..=system.upper_offset(i) {
            let expected = if k.abs() == 2 {
                p * penalty.matrix[(i, k)]
            } else {
                basis.matrix[(i, k)] + p * penalty.matrix[(i, k)]
            };
            assert_relative_eq!(system[(i, k)], expected, epsilon = 1e-12);
        }
    }
}

// ============================================================================
// Solve Tests
// ============================================================================

/// Test that the solution satisfies the original system.
#[test]
fn test_factorize_and_solve() {
    let a = sample_matrix(8, 2);
    let y: Vec<f64> = (0..8).map(|i| (i as f64 * 0.7).sin() + 1.0).collect();

    let mut factored = a.clone();
    factorize(&mut factored);
    let mut c = vec![0.0; 8];
    solve(&factored, &y, &mut c);

    let mut check = vec![0.0; 8];
    a.mul_vec(&c, &mut check);
    for (&lhs, &rhs) in check.iter().zip(y.iter()) {
        assert_relative_eq!(lhs, rhs, epsilon = 1e-12);
    }
}

/// Test solving a diagonal system.
#[test]
fn test_solve_diagonal() {
    let mut a = BandMatrix::zeros(4, 0);
    for i in 0..4 {
        a[(i, 0)] = (i + 1) as f64;
    }
    factorize(&mut a);
    let mut c = vec![0.0; 4];
    solve(&a, &[1.0, 2.0, 3.0, 4.0], &mut c);

    for &ci in &c {
        assert_relative_eq!(ci, 1.0, epsilon = 1e-14);
    }
}

/// Test solving the assembled spline system.
#[test]
fn test_solve_spline_system() {
    let x = vec![0.0, 1.0, 2.5, 3.0, 4.2, 5.0, 6.1];
    let basis = DesignBasis::build(&x, 2);
    let penalty = RoughnessPenalty::build(&x, &[1.0; 7], 2);
    let y = vec![1.0, 2.0, 0.5, 3.0, 2.0, 2.5, 4.0];

    let mut system = BandMatrix::zeros(7, 2);
    assemble(&mut system, &basis.matrix, &penalty.matrix, 0.1);
    let original = system.clone();
    factorize(&mut system);
    let mut c = vec![0.0; 7];
    solve(&system, &y, &mut c);

    let mut check = vec![0.0; 7];
    original.mul_vec(&c, &mut check);
    for (&lhs, &rhs) in check.iter().zip(y.iter()) {
        assert_relative_eq!(lhs, rhs, epsilon = 1e-10);
    }
}
