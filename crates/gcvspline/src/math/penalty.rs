//! Roughness penalty assembly.
//!
//! ## Purpose
//!
//! This module builds the banded matrix representing the discrete penalty on
//! the squared M-th derivative, weighted by the inverse knot weights, and the
//! normalization constant that makes the smoothing parameter comparable
//! across differently scaled problems.
//!
//! ## Design notes
//!
//! * **Divided differences**: Column `j` holds the order-`2M` divided-difference
//!   weights over the knots within `M` of knot `j`, scaled by `(2M-1)!` and,
//!   for interior columns, by the knot span `x[j+M] - x[j-M]`.
//! * **Weighting**: Row `i` is divided by the knot weight `w[i]`.
//! * **Normalization**: The constant is the mean absolute row sum of the
//!   weighted penalty.
//!
//! ## Invariants
//!
//! * Half-bandwidth is `M`.
//! * The null space of the penalty contains the polynomials of degree `< M`.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::band::BandMatrix;
use crate::primitives::cast;

// ============================================================================
// Roughness Penalty
// ============================================================================

/// Weighted banded roughness penalty and its normalization constant.
#[derive(Debug, Clone, PartialEq)]
pub struct RoughnessPenalty<T> {
    /// Penalty matrix, half-bandwidth `M`.
    pub matrix: BandMatrix<T>,

    /// Mean absolute row sum of `matrix`.
    pub scale: T,
}

impl<T: Float> RoughnessPenalty<T> {
    /// Build the penalty for knots `x`, knot weights `weights` and order `order`.
    pub fn build(x: &[T], weights: &[T], order: usize) -> Self {
        let n = x.len();
        let m = order;
        let mut matrix = BandMatrix::zeros(n, m);

        // 1-based knot numbers, matching the column numbering below.
        let knot = |j: usize| x[j - 1];

        // Signed (2M-1)! with sign (-1)^M.
        let mut factor = -T::one();
        if m != 1 {
            for i in 2..=m {
                factor = -factor * cast(i);
            }
            for i in (m + 1)..=(2 * m - 1) {
                factor = factor * cast(i);
            }
        }

        let last_interior = n - m;
        let mut first = 1;
        let mut last = m;

        for j in 1..=n {
            let f = if j > last_interior {
                factor = -factor;
                factor
            } else if j <= m {
                factor
            } else {
                factor * (knot(j + m) - knot(j - m))
            };

            if j > m + 1 {
                first += 1;
            }
            if last < n {
                last += 1;
            }

            for r in first..=last {
                let xr = knot(r);
                let mut value = f;
                for s in first..=last {
                    if s != r {
                        value = value / (xr - knot(s));
                    }
                }
                matrix[(r - 1, j as isize - r as isize)] = value;
            }
        }

        for (i, &w) in weights.iter().enumerate().take(n) {
            for k in -(m as isize)..=(m as isize) {
                matrix[(i, k)] = matrix[(i, k)] / w;
            }
        }

        let scale = matrix.abs_sum() / cast(n);
        Self { matrix, scale }
    }
}
