//! High-level API for smoothing spline fits.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the spline order, the selection criterion, weights and
//! search tunables, and a marker-based transition to an execution adapter
//! (Batch or Prepared).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`GcvSplineBuilder`] via `GcvSpline::new()`.
//! 2. Chain configuration methods (`.order()`, `.criterion()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Batch)` to get an execution builder.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchSplineBuilder;
use crate::adapters::prepared::PreparedSplineBuilder;
use crate::engine::executor::SplineConfig;
use crate::engine::output::OutputOptions;

// Publicly re-exported types
pub use crate::adapters::batch::BatchSpline;
pub use crate::adapters::prepared::PreparedSpline;
pub use crate::algorithms::banded::Clamp;
pub use crate::engine::executor::SearchOutcome;
pub use crate::engine::output::{FittedSpline, SplineEvaluator, SplineFit};
pub use crate::evaluation::criterion::{Criterion, FitStatistics};
pub use crate::evaluation::diagnostics::Diagnostics;
pub use crate::primitives::errors::{ErrorKind, SplineError};
pub use crate::primitives::interval::KnotCursor;

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Batch, Prepared};
}

/// Fluent builder for configuring smoothing spline fits.
#[derive(Debug, Clone)]
pub struct GcvSplineBuilder<T> {
    /// Half-order `M` (degree `2M - 1`).
    pub order: Option<usize>,

    /// Smoothing parameter selection rule.
    pub criterion: Option<Criterion<T>>,

    /// Per-knot weights.
    pub knot_weights: Option<Vec<T>>,

    /// Per-channel weights.
    pub channel_weights: Option<Vec<T>>,

    /// Starting value of the parameter search.
    pub initial_smoothing: Option<T>,

    /// Relative bracket width at which the search stops.
    pub tolerance: Option<T>,

    /// Regularization floor ε.
    pub regularization_floor: Option<T>,

    /// Ceiling on the reported smoothing parameter.
    pub max_smoothing: Option<T>,

    /// Bracket-phase step limit.
    pub max_bracket_steps: Option<usize>,

    /// Golden-section step limit.
    pub max_refine_steps: Option<usize>,

    /// Return smoothed values at the knots.
    pub return_fitted: Option<bool>,

    /// Return residuals at the knots.
    pub return_residuals: Option<bool>,

    /// Return per-channel diagnostics.
    pub return_diagnostics: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for GcvSplineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> GcvSplineBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: SplineAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            order: None,
            criterion: None,
            knot_weights: None,
            channel_weights: None,
            initial_smoothing: None,
            tolerance: None,
            regularization_floor: None,
            max_smoothing: None,
            max_bracket_steps: None,
            max_refine_steps: None,
            return_fitted: None,
            return_residuals: None,
            return_diagnostics: None,
            duplicate_param: None,
        }
    }

    /// Set the half-order `M`; the spline has degree `2M - 1` (default 2, cubic).
    pub fn order(mut self, order: usize) -> Self {
        if self.order.is_some() {
            self.duplicate_param = Some("order");
        }
        self.order = Some(order);
        self
    }

    /// Set the smoothing parameter selection rule (default GCV).
    pub fn criterion(mut self, criterion: Criterion<T>) -> Self {
        if self.criterion.is_some() {
            self.duplicate_param = Some("criterion");
        }
        self.criterion = Some(criterion);
        self
    }

    /// Set per-knot weights (default all ones).
    pub fn knot_weights(mut self, weights: Vec<T>) -> Self {
        if self.knot_weights.is_some() {
            self.duplicate_param = Some("knot_weights");
        }
        self.knot_weights = Some(weights);
        self
    }

    /// Set per-channel weights (default all ones).
    pub fn channel_weights(mut self, weights: Vec<T>) -> Self {
        if self.channel_weights.is_some() {
            self.duplicate_param = Some("channel_weights");
        }
        self.channel_weights = Some(weights);
        self
    }

    /// Start the parameter search at `p` instead of `1 / el`.
    pub fn initial_smoothing(mut self, p: T) -> Self {
        if self.initial_smoothing.is_some() {
            self.duplicate_param = Some("initial_smoothing");
        }
        self.initial_smoothing = Some(p);
        self
    }

    /// Set the relative bracket width at which the search stops (default 1e-6).
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the regularization floor ε (default 1e-15).
    pub fn regularization_floor(mut self, epsilon: T) -> Self {
        if self.regularization_floor.is_some() {
            self.duplicate_param = Some("regularization_floor");
        }
        self.regularization_floor = Some(epsilon);
        self
    }

    /// Set the smoothing ceiling at which the bracket stops growing.
    pub fn max_smoothing(mut self, p: T) -> Self {
        if self.max_smoothing.is_some() {
            self.duplicate_param = Some("max_smoothing");
        }
        self.max_smoothing = Some(p);
        self
    }

    /// Set the bracket-phase step limit (default 1024).
    pub fn max_bracket_steps(mut self, steps: usize) -> Self {
        if self.max_bracket_steps.is_some() {
            self.duplicate_param = Some("max_bracket_steps");
        }
        self.max_bracket_steps = Some(steps);
        self
    }

    /// Set the golden-section step limit (default 256).
    pub fn max_refine_steps(mut self, steps: usize) -> Self {
        if self.max_refine_steps.is_some() {
            self.duplicate_param = Some("max_refine_steps");
        }
        self.max_refine_steps = Some(steps);
        self
    }

    /// Include smoothed values at the knots in the output.
    pub fn return_fitted(mut self) -> Self {
        self.return_fitted = Some(true);
        self
    }

    /// Include residuals at the knots in the output.
    pub fn return_residuals(mut self) -> Self {
        self.return_residuals = Some(true);
        self
    }

    /// Include per-channel diagnostics in the output.
    pub fn return_diagnostics(mut self) -> Self {
        self.return_diagnostics = Some(true);
        self
    }

    // Resolve the search configuration over the defaults.
    fn search_config(&self) -> SplineConfig<T> {
        let mut config = SplineConfig::default();
        if let Some(criterion) = self.criterion {
            config.criterion = criterion;
        }
        if let Some(eps) = self.regularization_floor {
            config.epsilon = eps;
        }
        if let Some(p) = self.max_smoothing {
            config.max_smoothing = p;
        }
        if let Some(tol) = self.tolerance {
            config.tolerance = tol;
        }
        if let Some(steps) = self.max_bracket_steps {
            config.max_bracket_steps = steps;
        }
        if let Some(steps) = self.max_refine_steps {
            config.max_refine_steps = steps;
        }
        config.initial_smoothing = self.initial_smoothing;
        config
    }

    fn output_options(&self) -> OutputOptions {
        OutputOptions {
            fitted: self.return_fitted.unwrap_or(false),
            residuals: self.return_residuals.unwrap_or(false),
            diagnostics: self.return_diagnostics.unwrap_or(false),
        }
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait SplineAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`GcvSplineBuilder`] into a specialized execution builder.
    fn convert(builder: GcvSplineBuilder<T>) -> Self::Output;
}

/// Marker for one-shot fits that receive knots with each call.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> SplineAdapter<T> for Batch {
    type Output = BatchSplineBuilder<T>;

    fn convert(builder: GcvSplineBuilder<T>) -> Self::Output {
        let mut result = BatchSplineBuilder::default();

        result.search = builder.search_config();
        result.outputs = builder.output_options();
        if let Some(order) = builder.order {
            result.order = order;
        }
        result.knot_weights = builder.knot_weights;
        result.channel_weights = builder.channel_weights;
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for repeated fits against knots fixed at build time.
#[derive(Debug, Clone, Copy)]
pub struct Prepared;

impl<T: Float> SplineAdapter<T> for Prepared {
    type Output = PreparedSplineBuilder<T>;

    fn convert(builder: GcvSplineBuilder<T>) -> Self::Output {
        let mut result = PreparedSplineBuilder::default();

        result.search = builder.search_config();
        result.outputs = builder.output_options();
        if let Some(order) = builder.order {
            result.order = order;
        }
        result.knot_weights = builder.knot_weights;
        result.channel_weights = builder.channel_weights;
        result.duplicate_param = builder.duplicate_param;

        result
    }
}
