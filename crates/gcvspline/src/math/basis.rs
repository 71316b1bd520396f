//! B-spline design matrix construction.
//!
//! ## Purpose
//!
//! This module builds the banded design matrix that maps natural-spline
//! coefficients to fitted values at the knots. Row `l` holds the nonzero
//! values of the degree `2M - 1` B-splines supported around knot `l`.
//!
//! ## Design notes
//!
//! * **Divided differences**: Each row is built by a recurrence over knot
//!   differences; interior rows are normalized by `1 / (x[l+1] - x[l-1])`.
//! * **Natural boundary**: Near the ends the recurrence degrades to the
//!   lower-order polynomial pieces, which gives the natural end conditions.
//! * **Scale**: The mean absolute row sum is returned alongside the matrix
//!   and used to normalize the penalty.
//!
//! ## Invariants
//!
//! * Half-bandwidth is `M - 1`.
//! * Order 1 yields the identity.
//! * Entries whose column falls outside the matrix are zero.
//!
//! ## Non-goals
//!
//! * This module does not validate knots (checked earlier by the validator).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(feature = "std")]
use std::vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::band::BandMatrix;
use crate::primitives::cast;

// ============================================================================
// Design Basis
// ============================================================================

/// Banded B-spline design matrix and its scale factor.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignBasis<T> {
    /// Design matrix, half-bandwidth `M - 1`.
    pub matrix: BandMatrix<T>,

    /// Mean absolute row sum of `matrix`.
    pub scale: T,
}

impl<T: Float> DesignBasis<T> {
    /// Build the design matrix for strictly increasing knots `x` and order `order`.
    ///
    /// Requires `order >= 1` and `x.len() >= 2 * order`.
    pub fn build(x: &[T], order: usize) -> Self {
        let n = x.len();

        if order == 1 {
            let mut matrix = BandMatrix::zeros(n, 0);
            for i in 0..n {
                matrix[(i, 0)] = T::one();
            }
            return Self {
                matrix,
                scale: T::one(),
            };
        }

        let mut matrix = BandMatrix::zeros(n, order - 1);

        // The recurrences below run on 1-based knot numbers.
        let knot = |j: isize| x[(j - 1) as usize];
        let n_i = n as isize;
        let mm1 = order as isize - 1;
        let m2 = 2 * order as isize;

        // Working row indexed over [-(M-1), M].
        let mut q = vec![T::zero(); 2 * order];
        let at = |j: isize| (j + mm1) as usize;

        for l in 1..=n_i {
            q.fill(T::zero());
            q[at(mm1)] = if l != 1 && l != n_i {
                T::one() / (knot(l + 1) - knot(l - 1))
            } else {
                T::one()
            };
            let arg = knot(l);

            for i in 3..=m2 {
                let mut ir = order as isize + 1 - i;
                let mut v = q[at(ir)];

                // Left boundary: fewer than i knots before l.
                if l < i {
                    for j in (l + 1)..=i {
                        let u = v;
                        v = q[at(ir + 1)];
                        q[at(ir)] = u + (knot(j) - arg) * v;
                        ir += 1;
                    }
                }

                let j1 = (l - i + 1).max(1);
                let j2 = (l - 1).min(n_i - i);
                if j1 <= j2 {
                    if i < m2 {
                        for j in j1..=j2 {
                            let y = knot(i + j);
                            let u = v;
                            v = q[at(ir + 1)];
                            q[at(ir)] = u + (v - u) * (y - arg) / (y - knot(j));
                            ir += 1;
                        }
                    } else {
                        for j in j1..=j2 {
                            let u = v;
                            v = q[at(ir + 1)];
                            q[at(ir)] = (arg - knot(j)) * u + (knot(i + j) - arg) * v;
                            ir += 1;
                        }
                    }
                }

                // Right boundary.
                let nmip1 = n_i - i + 1;
                if nmip1 < l {
                    for j in nmip1..l {
                        let u = v;
                        v = q[at(ir + 1)];
                        q[at(ir)] = (arg - knot(j)) * u + v;
                        ir += 1;
                    }
                }
            }

            let row = (l - 1) as usize;
            for k in -mm1..=mm1 {
                matrix[(row, k)] = q[at(k)];
            }
        }

        // Clear entries that fall off either end of the matrix.
        for i in 1..=mm1 {
            for k in i..=mm1 {
                matrix[((i - 1) as usize, -k)] = T::zero();
                matrix[(n - i as usize, k)] = T::zero();
            }
        }

        let scale = matrix.abs_sum() / cast(n);
        Self { matrix, scale }
    }
}
