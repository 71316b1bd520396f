//! Banded assembly, factorization and substitution.
//!
//! ## Purpose
//!
//! This module solves `(B + p·W) c = y` where `B` is the banded design matrix
//! and `W` the banded roughness penalty. Both elimination and substitution
//! stay inside the band, so factorization costs O(N·M²) and each channel
//! solve O(N·M).
//!
//! ## Design notes
//!
//! * **Unsymmetric**: The design matrix is not symmetric, so the factorization
//!   is a banded LU without pivoting (unit lower factor in the negative
//!   offsets, upper factor on and above the diagonal).
//! * **In place**: The factorization overwrites the assembled system.
//! * **Regularization floor**: `p` is clamped so that `p·el` stays within
//!   `[ε, 1/ε]`, which keeps every pivot away from zero.
//!
//! ## Invariants
//!
//! * The assembled system has half-bandwidth `M`.
//! * A clamped `p` is reported as 0 at the floor and as the clamped value at
//!   the ceiling.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::band::BandMatrix;

// ============================================================================
// Regularization Floor
// ============================================================================

/// Which bound, if any, was applied to a trial smoothing parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clamp {
    /// The requested value was used as is.
    #[default]
    None,

    /// `p·el` fell below ε; the system was solved at `ε / el`.
    Floor,

    /// `p·el` exceeded `1/ε`; the system was solved at `1 / (el·ε)`.
    Ceiling,
}

/// Smoothing parameter after the regularization floor/ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regularization<T> {
    /// Value multiplied into the penalty.
    pub effective: T,

    /// Value reported back to the caller.
    pub reported: T,

    /// Bound that was applied.
    pub clamp: Clamp,
}

impl<T: Float> Regularization<T> {
    /// Resolve the effective smoothing for trial `p`, normalization `el` and floor `epsilon`.
    pub fn resolve(p: T, normalization: T, epsilon: T) -> Self {
        let scaled = p * normalization;
        if scaled < epsilon {
            Self {
                effective: epsilon / normalization,
                reported: T::zero(),
                clamp: Clamp::Floor,
            }
        } else if scaled * epsilon > T::one() {
            let ceiling = T::one() / (normalization * epsilon);
            Self {
                effective: ceiling,
                reported: ceiling,
                clamp: Clamp::Ceiling,
            }
        } else {
            Self {
                effective: p,
                reported: p,
                clamp: Clamp::None,
            }
        }
    }
}

// ============================================================================
// Assembly
// ============================================================================

/// Assemble `system = basis + p · penalty`.
///
/// `basis` has half-bandwidth `M - 1`, `penalty` and `system` have `M`.
pub fn assemble<T: Float>(
    system: &mut BandMatrix<T>,
    basis: &BandMatrix<T>,
    penalty: &BandMatrix<T>,
    p: T,
) {
    let outer = penalty.half_bandwidth() as isize;
    system.fill_zero();

    for i in 0..system.rows() {
        for l in system.lower_offset(i)..=system.upper_offset(i) {
            let scaled = p * penalty[(i, l)];
            system[(i, l)] = if l.abs() == outer {
                scaled
            } else {
                basis[(i, l)] + scaled
            };
        }
    }
}

// ============================================================================
// Factorization
// ============================================================================

/// Factor a banded matrix in place into unit-lower and upper triangular parts.
pub fn factorize<T: Float>(e: &mut BandMatrix<T>) {
    let n = e.rows();
    let m = e.half_bandwidth();
    if m == 0 {
        return;
    }

    for i in 0..n {
        let mut di = e[(i, 0)];
        let mi = m.min(i);
        if mi >= 1 {
            for k in 1..=mi {
                di = di - e[(i, -off(k))] * e[(i - k, off(k))];
            }
            e[(i, 0)] = di;
        }

        let lm = m.min(n - 1 - i);
        for l in 1..=lm {
            let mut dl = e[(i + l, -off(l))];
            let km = (m - l).min(i);
            if km >= 1 {
                let mut du = e[(i, off(l))];
                for k in 1..=km {
                    du = du - e[(i, -off(k))] * e[(i - k, off(l + k))];
                    dl = dl - e[(i + l, -off(l + k))] * e[(i - k, off(k))];
                }
                e[(i, off(l))] = du;
            }
            e[(i + l, -off(l))] = dl / di;
        }
    }
}

// ============================================================================
// Substitution
// ============================================================================

/// Solve `E c = y` for one channel given the factorization from [`factorize`].
pub fn solve<T: Float>(e: &BandMatrix<T>, y: &[T], c: &mut [T]) {
    let n = e.rows();
    let m = e.half_bandwidth();

    // Forward: unit lower factor.
    c[0] = y[0];
    for i in 1..n {
        let mut d = y[i];
        for l in 1..=m.min(i) {
            d = d - e[(i, -off(l))] * c[i - l];
        }
        c[i] = d;
    }

    // Backward: upper factor.
    c[n - 1] = c[n - 1] / e[(n - 1, 0)];
    for i in (0..n - 1).rev() {
        let mut d = c[i];
        for l in 1..=m.min(n - 1 - i) {
            d = d - e[(i, off(l))] * c[i + l];
        }
        c[i] = d / e[(i, 0)];
    }
}

#[inline(always)]
fn off(k: usize) -> isize {
    k as isize
}
