//! Trace of the smoothing operator from a banded factorization.
//!
//! ## Purpose
//!
//! This module recovers the trace of the hat operator `A = B (B + p·W)^-1`
//! without forming a dense inverse. Only the central `2M + 1` bands of
//! `(B + p·W)^-1` are needed, and they follow from the LU factors by the
//! Erisman–Tinney backward recursion in O(N·M²).
//!
//! ## Key concepts
//!
//! * **Complement**: `I - A = p·W (B + p·W)^-1`, so contracting the inverse
//!   bands against the penalty gives `tr(I - A)` directly; `tr(A)` follows as
//!   `N - tr(I - A)`.
//! * **Precision**: The complement is what the criteria divide by, so it is
//!   kept as computed rather than recovered from `tr(A)`.
//!
//! ## Invariants
//!
//! * Input must be the in-place factorization produced by `banded::factorize`.
//! * On return the system buffer holds inverse bands, not the factorization.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::band::BandMatrix;
use crate::primitives::cast;

/// Trace of the hat operator for one trial smoothing parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceEstimate<T> {
    /// `tr(A)`: effective number of parameters.
    pub trace: T,

    /// `tr(A) / N`: effective degrees-of-freedom fraction.
    pub fraction: T,

    /// `tr(I - A) / N`: residual degrees-of-freedom fraction.
    pub residual_fraction: T,
}

impl<T: Float> TraceEstimate<T> {
    /// Estimate the trace from a factored system solved at effective smoothing `p`.
    ///
    /// `upper` and `lower` are scratch of length at least `M + 1`.
    pub fn from_factorization(
        penalty: &BandMatrix<T>,
        factored: &mut BandMatrix<T>,
        p: T,
        upper: &mut [T],
        lower: &mut [T],
    ) -> Self {
        invert_central_bands(factored, upper, lower);

        let n = factored.rows();
        let mut sum = T::zero();
        for i in 0..n {
            for k in penalty.lower_offset(i)..=penalty.upper_offset(i) {
                let j = (i as isize + k) as usize;
                sum = sum + penalty[(i, k)] * factored[(j, -k)];
            }
        }

        let n_t: T = cast(n);
        let residual = sum * p;
        let trace = n_t - residual;
        Self {
            trace,
            fraction: trace / n_t,
            residual_fraction: residual / n_t,
        }
    }
}

/// Overwrite an LU factorization with the central bands of its inverse.
pub fn invert_central_bands<T: Float>(e: &mut BandMatrix<T>, upper: &mut [T], lower: &mut [T]) {
    let n = e.rows();
    let m = e.half_bandwidth();
    let half: T = cast(0.5);

    e[(n - 1, 0)] = T::one() / e[(n - 1, 0)];

    for i in (0..n - 1).rev() {
        let mi = m.min(n - 1 - i);
        let mut dd = T::one() / e[(i, 0)];

        for k in 1..=mi {
            let ko = k as isize;
            upper[k] = e[(i, ko)] * dd;
            lower[k] = e[(i + k, -ko)];
        }

        dd = dd + dd;
        for j in (1..=mi).rev() {
            let jo = j as isize;
            let mut du = T::zero();
            let mut dl = T::zero();
            for k in 1..=mi {
                let ko = k as isize;
                du = du - upper[k] * e[(i + k, jo - ko)];
                dl = dl - lower[k] * e[(i + j, ko - jo)];
            }
            e[(i, jo)] = du;
            e[(i + j, -jo)] = dl;
            dd = dd - (upper[j] * dl + lower[j] * du);
        }
        e[(i, 0)] = dd * half;
    }
}
