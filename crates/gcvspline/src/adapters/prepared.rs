//! Prepared adapter for repeated fits against fixed knots.
//!
//! ## Purpose
//!
//! This module provides the prepared execution adapter. The knots, knot
//! weights and order are fixed at build time, so the design matrix, the
//! penalty and the normalization constant are computed once and every later
//! fit only solves for new sample values.
//!
//! ## Design notes
//!
//! * **Reuse**: The spline system and the fit buffer live as long as the
//!   processor.
//! * **Warm start**: Each search starts from the smoothing parameter chosen
//!   by the previous fit, unless an explicit starting value was configured.
//! * **Stateful**: Fits take `&mut self`; independent processors can run on
//!   different threads.
//!
//! ## Invariants
//!
//! * The knot set is validated once, at build time.
//! * Warm starts only reuse a positive, finite previous parameter.
//!
//! ## Non-goals
//!
//! * This adapter does not change knots after build (build a new processor).

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
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{SplineConfig, SplineExecutor};
use crate::engine::output::{OutputOptions, SplineFit};
use crate::engine::system::SplineSystem;
use crate::engine::validator::Validator;
use crate::evaluation::criterion::Criterion;
use crate::primitives::buffer::FitBuffer;
use crate::primitives::errors::SplineError;

// ============================================================================
// Prepared Spline Builder
// ============================================================================

/// Builder for the prepared spline processor.
#[derive(Debug, Clone)]
pub struct PreparedSplineBuilder<T: Float> {
    /// Half-order `M`.
    pub order: usize,

    /// Search configuration.
    pub search: SplineConfig<T>,

    /// Knot abscissae (required).
    pub knots: Option<Vec<T>>,

    /// Knot weights (all ones when `None`).
    pub knot_weights: Option<Vec<T>>,

    /// Channel weights (all ones when `None`).
    pub channel_weights: Option<Vec<T>>,

    /// Whether to seed each search from the previous result.
    pub warm_start: bool,

    /// Optional per-channel outputs.
    pub outputs: OutputOptions,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for PreparedSplineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> PreparedSplineBuilder<T> {
    /// Create a new prepared builder with default parameters.
    fn new() -> Self {
        Self {
            order: 2,
            search: SplineConfig::default(),
            knots: None,
            knot_weights: None,
            channel_weights: None,
            warm_start: true,
            outputs: OutputOptions::default(),
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the knot abscissae.
    pub fn knots(mut self, knots: Vec<T>) -> Self {
        self.knots = Some(knots);
        self
    }

    /// Set the half-order `M` (degree `2M - 1`).
    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Set the selection criterion.
    pub fn criterion(mut self, criterion: Criterion<T>) -> Self {
        self.search.criterion = criterion;
        self
    }

    /// Set the knot weights.
    pub fn knot_weights(mut self, weights: Vec<T>) -> Self {
        self.knot_weights = Some(weights);
        self
    }

    /// Set the channel weights.
    pub fn channel_weights(mut self, weights: Vec<T>) -> Self {
        self.channel_weights = Some(weights);
        self
    }

    /// Enable or disable warm starts between fits.
    pub fn warm_start(mut self, enabled: bool) -> Self {
        self.warm_start = enabled;
        self
    }

    /// Set the starting value of every parameter search.
    pub fn initial_smoothing(mut self, p: T) -> Self {
        self.search.initial_smoothing = Some(p);
        self
    }

    /// Set the relative bracket width at which the search stops.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.search.tolerance = tolerance;
        self
    }

    /// Set the regularization floor ε.
    pub fn regularization_floor(mut self, epsilon: T) -> Self {
        self.search.epsilon = epsilon;
        self
    }

    /// Set the smoothing ceiling.
    pub fn max_smoothing(mut self, p: T) -> Self {
        self.search.max_smoothing = p;
        self
    }

    /// Set the bracket-phase step limit.
    pub fn max_bracket_steps(mut self, steps: usize) -> Self {
        self.search.max_bracket_steps = steps;
        self
    }

    /// Set the golden-section step limit.
    pub fn max_refine_steps(mut self, steps: usize) -> Self {
        self.search.max_refine_steps = steps;
        self
    }

    /// Return smoothed values at the knots.
    pub fn return_fitted(mut self, enabled: bool) -> Self {
        self.outputs.fitted = enabled;
        self
    }

    /// Return residuals at the knots.
    pub fn return_residuals(mut self, enabled: bool) -> Self {
        self.outputs.residuals = enabled;
        self
    }

    /// Return per-channel diagnostics.
    pub fn return_diagnostics(mut self, enabled: bool) -> Self {
        self.outputs.diagnostics = enabled;
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the knot set and prepare the spline system.
    pub fn build(self) -> Result<PreparedSpline<T>, SplineError> {
        if let Some(parameter) = self.duplicate_param {
            return Err(SplineError::DuplicateParameter { parameter });
        }

        Validator::validate_criterion(&self.search.criterion, self.order)?;
        Validator::validate_search(&self.search)?;
        Validator::validate_order(self.order)?;

        let knots = self.knots.ok_or(SplineError::MissingKnots)?;
        let n = knots.len();
        Validator::validate_criterion_for_size(&self.search.criterion, n, self.order)?;

        let knot_weights = self.knot_weights.unwrap_or_else(|| vec![T::one(); n]);
        Validator::validate_knot_set(&knots, &knot_weights, self.order)?;

        if let Some(weights) = &self.channel_weights {
            if let Some(index) = weights.iter().position(|&w| !(w.is_finite() && w > T::zero())) {
                return Err(SplineError::InvalidChannelWeight {
                    index,
                    value: weights[index].to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        let order = self.order;
        let system = SplineSystem::new(knots, knot_weights, order);
        let buffer = FitBuffer::new(n, order);

        Ok(PreparedSpline {
            system,
            search: self.search,
            channel_weights: self.channel_weights,
            warm_start: self.warm_start,
            outputs: self.outputs,
            buffer,
            last_smoothing: None,
        })
    }
}

// ============================================================================
// Prepared Spline Processor
// ============================================================================

/// Smoothing spline processor with a fixed, pre-built knot set.
#[derive(Debug, Clone)]
pub struct PreparedSpline<T: Float> {
    system: SplineSystem<T>,
    search: SplineConfig<T>,
    channel_weights: Option<Vec<T>>,
    warm_start: bool,
    outputs: OutputOptions,
    buffer: FitBuffer<T>,
    last_smoothing: Option<T>,
}

impl<T: Float> PreparedSpline<T> {
    /// Knot abscissae.
    pub fn knots(&self) -> &[T] {
        self.system.knots()
    }

    /// Half-order `M`.
    pub fn order(&self) -> usize {
        self.system.order()
    }

    /// Penalty scale divided by design scale.
    pub fn normalization(&self) -> T {
        self.system.normalization()
    }

    /// Smoothing parameter chosen by the most recent fit.
    pub fn last_smoothing(&self) -> Option<T> {
        self.last_smoothing
    }

    /// Forget the warm-start value.
    pub fn reset(&mut self) {
        self.last_smoothing = None;
    }

    /// Fit one channel of samples against the prepared knots.
    pub fn fit(&mut self, y: &[T]) -> Result<SplineFit<T>, SplineError> {
        self.fit_channels(&[y])
    }

    /// Fit several channels against the prepared knots.
    pub fn fit_channels<C: AsRef<[T]>>(
        &mut self,
        channels: &[C],
    ) -> Result<SplineFit<T>, SplineError> {
        let n = self.system.len();
        let channel_weights = self
            .channel_weights
            .clone()
            .unwrap_or_else(|| vec![T::one(); channels.len()]);

        Validator::validate_channel_weights(&channel_weights, channels.len())?;
        Validator::validate_channels(channels, n)?;

        let mut search = self.search;
        if self.warm_start && search.initial_smoothing.is_none() {
            search.initial_smoothing = self
                .last_smoothing
                .filter(|&p| p > T::zero() && p.is_finite());
        }

        let views: Vec<&[T]> = channels.iter().map(AsRef::as_ref).collect();
        let output = SplineExecutor::from_config(&search).run(
            &self.system,
            &views,
            &channel_weights,
            &mut self.buffer,
        );
        self.last_smoothing = Some(output.statistics.smoothing);

        Ok(SplineFit::from_output(
            &self.system,
            &views,
            output,
            self.outputs,
        ))
    }
}
