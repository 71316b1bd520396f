//! Natural-spline evaluation and differentiation.
//!
//! ## Purpose
//!
//! This module evaluates a fitted natural spline of degree `2M - 1`, or any of
//! its derivatives, at an arbitrary point from the knots and coefficients.
//!
//! ## Design notes
//!
//! * **Local support**: Only the `2M` coefficients around the located interval
//!   contribute; they are copied into a 1-based window and reduced in place.
//! * **Differentiation first**: For derivative order `d`, the window is
//!   differenced `d` times, then the remaining `2M - d - 1` divided-difference
//!   passes evaluate the lower-degree piece, and the result is rescaled by
//!   `(2M - 1)! / (2M - 1 - d)!`.
//! * **Natural extension**: Outside `[x[0], x[N-1]]` the spline continues as a
//!   polynomial of degree `M - 1`.
//!
//! ## Invariants
//!
//! * Derivative orders `>= 2M` evaluate to exactly zero without touching the
//!   cursor.
//! * A NaN query point evaluates to NaN and leaves the cursor unchanged.
//! * The window holds at least `2M + 1` entries.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::cast;
use crate::primitives::interval::KnotCursor;

/// Evaluate derivative `derivative` of the natural spline of order `order` at `t`.
///
/// `window` is scratch of length at least `2 * order + 1`; `cursor` caches
/// the knot interval between calls.
pub fn evaluate<T: Float>(
    x: &[T],
    coefficients: &[T],
    order: usize,
    t: T,
    derivative: usize,
    cursor: &mut KnotCursor,
    window: &mut [T],
) -> T {
    let m2u = 2 * order;
    if derivative >= m2u {
        return T::zero();
    }
    if t.is_nan() {
        return T::nan();
    }

    let l = cursor.locate(x, t) as isize;

    let n = x.len() as isize;
    let m = order as isize;
    let m2 = m2u as isize;
    let d = derivative as isize;
    let k = m2 - d;

    // Knots and coefficients are addressed by 1-based number below.
    let knot = |j: isize| x[(j - 1) as usize];
    let q = |j: isize| j as usize;

    // Gather the coefficients supported on this interval; zeros pad the
    // positions that fall outside the natural-spline coefficient range.
    let mut jl = l + 1;
    let ju = l + m2;
    let mut ml = -l;
    for j in jl..=ju {
        window[q(j + ml)] = if j > m && j <= n + m {
            coefficients[(j - m - 1) as usize]
        } else {
            T::zero()
        };
    }

    if d > 0 {
        jl -= m2;
        ml += m2;
        let mut ii = n - m2;
        for i in 1..=d {
            jl += 1;
            ii += 1;
            let j1 = jl.max(1);
            let j2 = l.min(ii);
            let span = m2 - i;

            let mut j = j2;
            while j >= j1 {
                let jm = ml + j;
                window[q(jm)] =
                    (window[q(jm)] - window[q(jm - 1)]) / (knot(j + span) - knot(j));
                j -= 1;
            }

            if jl < 1 {
                let mut j = ml;
                while j > i {
                    window[q(j)] = -window[q(j - 1)];
                    j -= 1;
                }
            }
        }
        for j in 1..=k {
            window[q(j)] = window[q(j + d)];
        }
    }

    let nk = n - k;
    let lk1 = l - k + 1;
    for i in 1..k {
        let nki = nk + i;
        let ki = k - i;
        let mut ir = k;
        let mut jj = l;

        // Right of the last knot the remaining pieces are polynomial.
        if l > nki {
            for _ in (nki + 1)..=l {
                window[q(ir)] = window[q(ir - 1)] + (t - knot(jj)) * window[q(ir)];
                jj -= 1;
                ir -= 1;
            }
        }

        let lk1i = lk1 + i;
        let j1 = lk1i.max(1);
        let j2 = l.min(nki);
        for _ in j1..=j2 {
            let xjki = knot(jj + ki);
            let z = window[q(ir)];
            window[q(ir)] = z + (xjki - t) * (window[q(ir - 1)] - z) / (xjki - knot(jj));
            ir -= 1;
            jj -= 1;
        }

        // Left of the first knot.
        if lk1i <= 0 {
            jj = ki;
            for _ in 0..(1 - lk1i) {
                window[q(ir)] = window[q(ir)] + (knot(jj) - t) * window[q(ir - 1)];
                jj -= 1;
                ir -= 1;
            }
        }
    }

    let mut z = window[q(k)];
    if d > 0 {
        for j in k..m2 {
            z = z * cast(j);
        }
    }
    z
}
