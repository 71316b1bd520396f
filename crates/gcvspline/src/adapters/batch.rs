//! Batch adapter for one-shot smoothing spline fits.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter: each call receives the
//! knots and the sample channels, builds the spline system, runs the
//! parameter search and returns a complete `SplineFit`.
//!
//! ## Design notes
//!
//! * **Processing**: Validates, prepares, executes and assembles in one call.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Knots must be strictly increasing; data is never reordered.
//! * Every channel has one finite value per knot.
//!
//! ## Non-goals
//!
//! * This adapter does not reuse work between calls (use the prepared adapter).

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
// Batch Spline Builder
// ============================================================================

/// Builder for the batch spline processor.
#[derive(Debug, Clone)]
pub struct BatchSplineBuilder<T: Float> {
    /// Half-order `M`.
    pub order: usize,

    /// Search configuration.
    pub search: SplineConfig<T>,

    /// Knot weights (all ones when `None`).
    pub knot_weights: Option<Vec<T>>,

    /// Channel weights (all ones when `None`).
    pub channel_weights: Option<Vec<T>>,

    /// Optional per-channel outputs.
    pub outputs: OutputOptions,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BatchSplineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BatchSplineBuilder<T> {
    /// Create a new batch builder with default parameters.
    fn new() -> Self {
        Self {
            order: 2,
            search: SplineConfig::default(),
            knot_weights: None,
            channel_weights: None,
            outputs: OutputOptions::default(),
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

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

    /// Set the starting value of the parameter search.
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

    /// Build the batch processor.
    pub fn build(self) -> Result<BatchSpline<T>, SplineError> {
        if let Some(parameter) = self.duplicate_param {
            return Err(SplineError::DuplicateParameter { parameter });
        }

        Validator::validate_criterion(&self.search.criterion, self.order)?;
        Validator::validate_order(self.order)?;
        Validator::validate_search(&self.search)?;

        Ok(BatchSpline { config: self })
    }
}

// ============================================================================
// Batch Spline Processor
// ============================================================================

/// Batch smoothing spline processor.
#[derive(Debug, Clone)]
pub struct BatchSpline<T: Float> {
    config: BatchSplineBuilder<T>,
}

impl<T: Float> BatchSpline<T> {
    /// Fit one channel of samples `y` at knots `x`.
    pub fn fit(&self, x: &[T], y: &[T]) -> Result<SplineFit<T>, SplineError> {
        self.fit_channels(x, &[y])
    }

    /// Fit several channels sharing the knots `x`.
    pub fn fit_channels<C: AsRef<[T]>>(
        &self,
        x: &[T],
        channels: &[C],
    ) -> Result<SplineFit<T>, SplineError> {
        let n = x.len();
        let order = self.config.order;
        let knot_weights = self
            .config
            .knot_weights
            .clone()
            .unwrap_or_else(|| vec![T::one(); n]);
        let channel_weights = self
            .config
            .channel_weights
            .clone()
            .unwrap_or_else(|| vec![T::one(); channels.len()]);

        Validator::validate_fit(
            &self.config.search,
            x,
            &knot_weights,
            order,
            channels,
            &channel_weights,
        )?;

        let system = SplineSystem::new(x.to_vec(), knot_weights, order);
        let views: Vec<&[T]> = channels.iter().map(AsRef::as_ref).collect();
        let mut buffer = FitBuffer::new(n, order);

        let output = SplineExecutor::from_config(&self.config.search).run(
            &system,
            &views,
            &channel_weights,
            &mut buffer,
        );

        Ok(SplineFit::from_output(
            &system,
            &views,
            output,
            self.config.outputs,
        ))
    }
}
