//! Banded matrix storage addressed by (row, band offset).
//!
//! ## Purpose
//!
//! This module provides the storage used by every banded structure in the
//! crate: the B-spline design matrix, the roughness penalty, the regularized
//! system and its in-place factorization.
//!
//! ## Design notes
//!
//! * **Explicit addressing**: Entry `(i, k)` holds matrix element `A[i][i + k]`,
//!   with `k` in `[-h, h]` for half-bandwidth `h`.
//! * **Row-major**: Each row stores its `2h + 1` band entries contiguously.
//! * **Zero outside**: Positions whose column falls outside `[0, n)` exist in
//!   storage but are never read by the algorithms; they stay zero.
//!
//! ## Invariants
//!
//! * `data.len() == rows * (2 * half_bandwidth + 1)`.
//! * Offsets passed to the accessors satisfy `|k| <= half_bandwidth`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Index, IndexMut};
use num_traits::Float;

// ============================================================================
// Band Matrix
// ============================================================================

/// Square banded matrix with symmetric half-bandwidth.
#[derive(Debug, Clone, PartialEq)]
pub struct BandMatrix<T> {
    rows: usize,
    half_bandwidth: usize,
    data: Vec<T>,
}

impl<T: Float> BandMatrix<T> {
    /// Create a zero matrix with `rows` rows and the given half-bandwidth.
    pub fn zeros(rows: usize, half_bandwidth: usize) -> Self {
        Self {
            rows,
            half_bandwidth,
            data: vec![T::zero(); rows * (2 * half_bandwidth + 1)],
        }
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of bands on each side of the diagonal.
    #[inline]
    pub fn half_bandwidth(&self) -> usize {
        self.half_bandwidth
    }

    /// Lowest in-matrix band offset for `row`.
    #[inline]
    pub fn lower_offset(&self, row: usize) -> isize {
        -(self.half_bandwidth.min(row) as isize)
    }

    /// Highest in-matrix band offset for `row`.
    #[inline]
    pub fn upper_offset(&self, row: usize) -> isize {
        self.half_bandwidth.min(self.rows - 1 - row) as isize
    }

    /// Reset all entries to zero, keeping the shape.
    pub fn fill_zero(&mut self) {
        self.data.fill(T::zero());
    }

    /// Reshape to `rows` x `half_bandwidth`, reusing the allocation.
    pub fn reshape(&mut self, rows: usize, half_bandwidth: usize) {
        self.rows = rows;
        self.half_bandwidth = half_bandwidth;
        self.data.clear();
        self.data
            .resize(rows * (2 * half_bandwidth + 1), T::zero());
    }

    /// Entries of one row, ordered from offset `-h` to `+h`.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let width = 2 * self.half_bandwidth + 1;
        &self.data[row * width..(row + 1) * width]
    }

    /// Sum of the absolute values of all stored entries.
    pub fn abs_sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &v| acc + v.abs())
    }

    /// Multiply the matrix by a dense vector (`out = A * v`).
    pub fn mul_vec(&self, v: &[T], out: &mut [T]) {
        for (i, slot) in out.iter_mut().enumerate().take(self.rows) {
            let mut acc = T::zero();
            for k in self.lower_offset(i)..=self.upper_offset(i) {
                acc = acc + self[(i, k)] * v[(i as isize + k) as usize];
            }
            *slot = acc;
        }
    }

    #[inline]
    fn position(&self, row: usize, offset: isize) -> usize {
        debug_assert!(row < self.rows, "BandMatrix: row {row} out of range");
        debug_assert!(
            offset.unsigned_abs() <= self.half_bandwidth,
            "BandMatrix: offset {offset} outside half-bandwidth {}",
            self.half_bandwidth
        );
        row * (2 * self.half_bandwidth + 1) + (offset + self.half_bandwidth as isize) as usize
    }
}

impl<T: Float> Index<(usize, isize)> for BandMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, offset): (usize, isize)) -> &T {
        &self.data[self.position(row, offset)]
    }
}

impl<T: Float> IndexMut<(usize, isize)> for BandMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, offset): (usize, isize)) -> &mut T {
        let pos = self.position(row, offset);
        &mut self.data[pos]
    }
}
