//! Working storage for spline fitting and evaluation.
//!
//! ## Purpose
//!
//! This module provides reusable workspaces so that the parameter search,
//! which solves the regularized system many times, allocates once per fit
//! instead of once per trial smoothing parameter.
//!
//! ## Design notes
//!
//! * **Explicit ownership**: Buffers are passed by `&mut`; a fit that owns its
//!   buffer is reentrant, and concurrent fits each hold their own.
//! * **Lazy expansion**: Buffers are reshaped on demand but never shrunk.
//!
//! ## Key concepts
//!
//! * **Slot**: A reusable vector wrapper with automatic capacity management.
//! * **FitBuffer**: Regularized system, its factorization and trace scratch.
//! * **EvalBuffer**: Divided-difference scratch for spline evaluation.
//!
//! ## Invariants
//!
//! * All fit storage is O(N·M) for N knots and order M.
//! * Capacity is monotonically increasing.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Deref, DerefMut};
use num_traits::{Float, Zero};

// Internal dependencies
use crate::primitives::band::BandMatrix;

// ============================================================================
// Slot - Unified Vector Abstraction
// ============================================================================

/// A reusable vector slot with automatic capacity management.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T> Slot<T> {
    /// Create a new slot with the given initial capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }
}

impl<T: Clone + Zero> Slot<T> {
    /// Resize to `len` zeroed elements, reusing the allocation.
    #[inline]
    pub fn reset_zeroed(&mut self, len: usize) {
        self.0.clear();
        self.0.resize(len, T::zero());
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// ============================================================================
// Fit Buffer
// ============================================================================

/// Scratch space for one fit: the regularized system and trace workspace.
#[derive(Debug, Clone)]
pub struct FitBuffer<T> {
    /// Design + p * penalty, factored in place, then overwritten by the
    /// central bands of its inverse.
    pub system: BandMatrix<T>,

    /// Scaled upper-factor row used by the inverse recursion.
    pub upper: Slot<T>,

    /// Lower-factor column used by the inverse recursion.
    pub lower: Slot<T>,

    /// Fitted values for one channel.
    pub fitted: Slot<T>,
}

impl<T: Float> FitBuffer<T> {
    /// Allocate a buffer for `n` knots and order `order`.
    pub fn new(n: usize, order: usize) -> Self {
        let mut buffer = Self {
            system: BandMatrix::zeros(n, order),
            upper: Slot::new(order + 1),
            lower: Slot::new(order + 1),
            fitted: Slot::new(n),
        };
        buffer.ensure_capacity(n, order);
        buffer
    }

    /// Reshape every slot for `n` knots and order `order`.
    pub fn ensure_capacity(&mut self, n: usize, order: usize) {
        if self.system.rows() != n || self.system.half_bandwidth() != order {
            self.system.reshape(n, order);
        }
        self.upper.reset_zeroed(order + 1);
        self.lower.reset_zeroed(order + 1);
        self.fitted.reset_zeroed(n);
    }
}

// ============================================================================
// Evaluation Buffer
// ============================================================================

/// Divided-difference scratch for evaluating one spline of order `M`.
#[derive(Debug, Clone, Default)]
pub struct EvalBuffer<T> {
    /// Coefficient window, indexed `1..=2M` (index 0 is unused).
    pub window: Slot<T>,
}

impl<T: Float> EvalBuffer<T> {
    /// Allocate scratch for order `order`.
    pub fn new(order: usize) -> Self {
        let mut buffer = Self {
            window: Slot::new(2 * order + 1),
        };
        buffer.window.reset_zeroed(2 * order + 1);
        buffer
    }
}
