//! Prepared spline system for one knot set.
//!
//! ## Purpose
//!
//! This module bundles everything that depends only on the knots, the knot
//! weights and the spline order: the design matrix, the weighted penalty and
//! the normalization constant. Refitting new sample values against the same
//! knots reuses it unchanged.
//!
//! ## Invariants
//!
//! * Knots are strictly increasing and `N >= 2M` (checked by the validator).
//! * `normalization = penalty.scale / basis.scale`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::basis::DesignBasis;
use crate::math::penalty::RoughnessPenalty;

/// Design matrix, penalty and normalization for a validated knot set.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineSystem<T> {
    knots: Vec<T>,
    knot_weights: Vec<T>,
    order: usize,
    basis: DesignBasis<T>,
    penalty: RoughnessPenalty<T>,
    normalization: T,
}

impl<T: Float> SplineSystem<T> {
    /// Build the system for validated `knots` and `knot_weights`.
    pub fn new(knots: Vec<T>, knot_weights: Vec<T>, order: usize) -> Self {
        let basis = DesignBasis::build(&knots, order);
        let penalty = RoughnessPenalty::build(&knots, &knot_weights, order);
        let normalization = penalty.scale / basis.scale;

        log::debug!(
            "prepared spline system: {} knots, order {}, normalization {:e}",
            knots.len(),
            order,
            normalization.to_f64().unwrap_or(f64::NAN)
        );

        Self {
            knots,
            knot_weights,
            order,
            basis,
            penalty,
            normalization,
        }
    }

    /// Knot abscissae.
    #[inline]
    pub fn knots(&self) -> &[T] {
        &self.knots
    }

    /// Knot weights.
    #[inline]
    pub fn knot_weights(&self) -> &[T] {
        &self.knot_weights
    }

    /// Half-order `M`.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Always false for a validated system.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Design matrix and its scale.
    #[inline]
    pub fn basis(&self) -> &DesignBasis<T> {
        &self.basis
    }

    /// Weighted penalty and its scale.
    #[inline]
    pub fn penalty(&self) -> &RoughnessPenalty<T> {
        &self.penalty
    }

    /// Penalty scale divided by design scale.
    #[inline]
    pub fn normalization(&self) -> T {
        self.normalization
    }

    /// Fitted values `B c` at the knots for one coefficient vector.
    pub fn fitted_values(&self, coefficients: &[T], out: &mut [T]) {
        self.basis.matrix.mul_vec(coefficients, out);
    }
}
