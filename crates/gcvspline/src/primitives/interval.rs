//! Knot-interval location for spline evaluation.
//!
//! This module provides the evaluation cursor: a remembered interval index
//! that makes sequential queries over sorted knots cheap.

// External dependencies
use num_traits::Float;

/// Cached knot-interval position for repeated spline evaluation.
///
/// The interval value `l` counts the knots at or below the last query point:
/// `l == 0` when `t < x[0]`, `l == n` when `t >= x[n - 1]`, and otherwise
/// `x[l - 1] <= t < x[l]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KnotCursor {
    interval: usize,
}

impl KnotCursor {
    /// Create a cursor positioned before the first knot.
    pub fn new() -> Self {
        Self { interval: 0 }
    }

    /// Current interval value.
    #[inline]
    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Forget the cached position.
    #[inline]
    pub fn reset(&mut self) {
        self.interval = 0;
    }

    /// Locate `t` among the strictly increasing knots `x` and cache the result.
    ///
    /// Checks the cached interval and its immediate neighbours first, so
    /// monotonically increasing queries cost O(1); otherwise bisects.
    /// A NaN query leaves the cursor unchanged and returns its interval.
    pub fn locate<T: Float>(&mut self, x: &[T], t: T) -> usize {
        let n = x.len();
        debug_assert!(n >= 2, "locate: need at least two knots");

        // NaN fails every comparison below.
        if t.is_nan() {
            return self.interval;
        }

        if t < x[0] {
            self.interval = 0;
            return 0;
        }
        if t >= x[n - 1] {
            self.interval = n;
            return n;
        }

        let mut l = self.interval.clamp(1, n - 1);
        let (lower, upper);

        if t >= x[l - 1] {
            // Step forward at most twice before falling back to bisection.
            if t < x[l] {
                self.interval = l;
                return l;
            }
            l += 1;
            if t < x[l] {
                self.interval = l;
                return l;
            }
            lower = l + 1;
            upper = n;
        } else {
            l -= 1;
            if t >= x[l - 1] {
                self.interval = l;
                return l;
            }
            lower = 1;
            upper = l;
        }

        self.interval = Self::bisect(x, t, lower, upper);
        self.interval
    }

    // Bisect with invariant x[lower - 1] <= t < x[upper - 1].
    fn bisect<T: Float>(x: &[T], t: T, mut lower: usize, mut upper: usize) -> usize {
        loop {
            let mid = (lower + upper) / 2;
            if upper - lower <= 1 {
                return mid;
            }
            if t < x[mid - 1] {
                upper = mid;
            } else {
                lower = mid;
            }
        }
    }
}
