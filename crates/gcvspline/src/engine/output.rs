//! Output types for smoothing spline fits.
//!
//! ## Purpose
//!
//! This module defines `SplineFit`, which carries the coefficients and
//! statistics of a fit, and `FittedSpline`, an owned handle that evaluates
//! one fitted channel (or its derivatives) anywhere on the real line.
//!
//! ## Design notes
//!
//! * **Optional outputs**: Fitted values, residuals and diagnostics are only
//!   populated when requested.
//! * **Evaluation state**: Each `FittedSpline` owns its knot cursor and
//!   scratch, so sequential queries are cheap. Concurrent readers share a
//!   `&FittedSpline` and each take a `SplineEvaluator`.
//! * **Ergonomics**: `SplineFit` implements `Display` for human-readable output.
//!
//! ## Invariants
//!
//! * Every coefficient vector has one entry per knot.
//! * Populated fitted/residual vectors are indexed `[channel][knot]`.
//!
//! ## Non-goals
//!
//! * This module does not provide serialization/deserialization logic.

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
use core::fmt::{Debug, Display, Formatter, LowerExp, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::banded::Clamp;
use crate::algorithms::derivative;
use crate::engine::executor::{ExecutorOutput, SearchOutcome};
use crate::engine::system::SplineSystem;
use crate::engine::validator::Validator;
use crate::evaluation::criterion::FitStatistics;
use crate::evaluation::diagnostics::Diagnostics;
use crate::primitives::buffer::EvalBuffer;
use crate::primitives::errors::SplineError;
use crate::primitives::interval::KnotCursor;

// ============================================================================
// Output Options
// ============================================================================

/// Optional per-channel outputs to compute after a fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Return smoothed values at the knots.
    pub fitted: bool,

    /// Return residuals at the knots.
    pub residuals: bool,

    /// Return per-channel diagnostics.
    pub diagnostics: bool,
}

// ============================================================================
// Fit Result
// ============================================================================

/// Coefficients, statistics and optional per-channel outputs of one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineFit<T> {
    /// Knot abscissae.
    pub x: Vec<T>,

    /// Half-order `M` (spline degree `2M - 1`).
    pub order: usize,

    /// Natural-spline coefficients, indexed `[channel][knot]`.
    pub coefficients: Vec<Vec<T>>,

    /// Statistics at the chosen smoothing parameter.
    pub statistics: FitStatistics<T>,

    /// How the smoothing parameter was chosen.
    pub outcome: SearchOutcome,

    /// Smoothed values at the knots.
    pub fitted: Option<Vec<Vec<T>>>,

    /// Residuals `y - ŷ` at the knots.
    pub residuals: Option<Vec<Vec<T>>>,

    /// Per-channel diagnostic metrics.
    pub diagnostics: Option<Vec<Diagnostics<T>>>,
}

impl<T: Float> SplineFit<T> {
    /// Assemble a result from executor output, computing the requested extras.
    pub fn from_output(
        system: &SplineSystem<T>,
        channels: &[&[T]],
        output: ExecutorOutput<T>,
        options: OutputOptions,
    ) -> Self {
        let needs_fitted = options.fitted || options.residuals || options.diagnostics;
        let fitted: Option<Vec<Vec<T>>> = needs_fitted.then(|| {
            output
                .coefficients
                .iter()
                .map(|c| {
                    let mut values = vec![T::zero(); system.len()];
                    system.fitted_values(c, &mut values);
                    values
                })
                .collect()
        });

        let residuals = match (&fitted, options.residuals) {
            (Some(fitted), true) => Some(
                channels
                    .iter()
                    .zip(fitted)
                    .map(|(y, f)| y.iter().zip(f).map(|(&yi, &fi)| yi - fi).collect())
                    .collect(),
            ),
            _ => None,
        };

        let diagnostics = match (&fitted, options.diagnostics) {
            (Some(fitted), true) => Some(
                channels
                    .iter()
                    .zip(fitted)
                    .map(|(y, f)| Diagnostics::compute(y, f, output.statistics.trace))
                    .collect(),
            ),
            _ => None,
        };

        Self {
            x: system.knots().to_vec(),
            order: system.order(),
            coefficients: output.coefficients,
            statistics: output.statistics,
            outcome: output.outcome,
            fitted: if options.fitted { fitted } else { None },
            residuals,
            diagnostics,
        }
    }

    /// Number of fitted channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.coefficients.len()
    }

    /// Smoothing parameter used (0 when clamped at the floor).
    #[inline]
    pub fn smoothing(&self) -> T {
        self.statistics.smoothing
    }

    /// Whether the smoothing parameter was clamped.
    #[inline]
    pub fn is_clamped(&self) -> bool {
        self.statistics.clamp != Clamp::None
    }

    /// Coefficients of one channel.
    pub fn coefficients(&self, channel: usize) -> core::result::Result<&[T], SplineError> {
        self.coefficients
            .get(channel)
            .map(Vec::as_slice)
            .ok_or(SplineError::ChannelOutOfRange {
                channel,
                channels: self.channels(),
            })
    }

    /// Evaluation handle for one channel.
    pub fn spline(&self, channel: usize) -> core::result::Result<FittedSpline<T>, SplineError> {
        let coefficients = self.coefficients(channel)?;
        Ok(FittedSpline::new_unchecked(
            self.x.clone(),
            coefficients.to_vec(),
            self.order,
        ))
    }

    /// Evaluation handles for every channel.
    pub fn into_splines(self) -> Vec<FittedSpline<T>> {
        let order = self.order;
        let x = self.x;
        self.coefficients
            .into_iter()
            .map(|c| FittedSpline::new_unchecked(x.clone(), c, order))
            .collect()
    }
}

// ============================================================================
// Fitted Spline
// ============================================================================

/// One fitted natural spline of degree `2M - 1`, ready for evaluation.
#[derive(Debug, Clone)]
pub struct FittedSpline<T> {
    knots: Vec<T>,
    coefficients: Vec<T>,
    order: usize,
    cursor: KnotCursor,
    scratch: EvalBuffer<T>,
}

impl<T: Float> FittedSpline<T> {
    /// Rebuild a spline from stored knots and coefficients.
    ///
    /// Checks the order, knot count, knot monotonicity and coefficient length.
    pub fn from_parts(
        knots: Vec<T>,
        coefficients: Vec<T>,
        order: usize,
    ) -> core::result::Result<Self, SplineError> {
        Validator::validate_order(order)?;
        Validator::validate_size(knots.len(), order)?;
        Validator::validate_knots(&knots)?;
        if coefficients.len() != knots.len() {
            return Err(SplineError::MismatchedInputs {
                channel: 0,
                knots: knots.len(),
                values: coefficients.len(),
            });
        }
        Ok(Self::new_unchecked(knots, coefficients, order))
    }

    pub(crate) fn new_unchecked(knots: Vec<T>, coefficients: Vec<T>, order: usize) -> Self {
        Self {
            knots,
            coefficients,
            order,
            cursor: KnotCursor::new(),
            scratch: EvalBuffer::new(order),
        }
    }

    /// Knot abscissae.
    #[inline]
    pub fn knots(&self) -> &[T] {
        &self.knots
    }

    /// Natural-spline coefficients.
    #[inline]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Half-order `M`.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Polynomial degree `2M - 1`.
    #[inline]
    pub fn degree(&self) -> usize {
        2 * self.order - 1
    }

    /// Cached evaluation cursor.
    #[inline]
    pub fn cursor(&self) -> KnotCursor {
        self.cursor
    }

    /// Value (`derivative == 0`) or derivative of the spline at `t`.
    ///
    /// Derivative orders `>= 2M` are identically zero.
    pub fn evaluate(&mut self, t: T, derivative: usize) -> T {
        derivative::evaluate(
            &self.knots,
            &self.coefficients,
            self.order,
            t,
            derivative,
            &mut self.cursor,
            &mut self.scratch.window,
        )
    }

    /// Value of the spline at `t`.
    #[inline]
    pub fn value(&mut self, t: T) -> T {
        self.evaluate(t, 0)
    }

    /// Evaluate at every point of `ts`.
    pub fn evaluate_many(&mut self, ts: &[T], derivative: usize) -> Vec<T> {
        ts.iter().map(|&t| self.evaluate(t, derivative)).collect()
    }

    /// Independent evaluator borrowing this spline.
    pub fn evaluator(&self) -> SplineEvaluator<'_, T> {
        SplineEvaluator {
            spline: self,
            cursor: KnotCursor::new(),
            scratch: EvalBuffer::new(self.order),
        }
    }
}

/// Evaluator with its own cursor over a shared [`FittedSpline`].
#[derive(Debug, Clone)]
pub struct SplineEvaluator<'a, T> {
    spline: &'a FittedSpline<T>,
    cursor: KnotCursor,
    scratch: EvalBuffer<T>,
}

impl<'a, T: Float> SplineEvaluator<'a, T> {
    /// Value (`derivative == 0`) or derivative of the spline at `t`.
    pub fn evaluate(&mut self, t: T, derivative: usize) -> T {
        derivative::evaluate(
            &self.spline.knots,
            &self.spline.coefficients,
            self.spline.order,
            t,
            derivative,
            &mut self.cursor,
            &mut self.scratch.window,
        )
    }

    /// Cached evaluation cursor.
    #[inline]
    pub fn cursor(&self) -> KnotCursor {
        self.cursor
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug + LowerExp> Display for SplineFit<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = &self.statistics;
        writeln!(f, "Summary:")?;
        writeln!(f, "  Knots:        {}", self.x.len())?;
        writeln!(f, "  Channels:     {}", self.channels())?;
        writeln!(f, "  Degree:       {}", 2 * self.order - 1)?;
        writeln!(f, "  Smoothing p:  {:e}", s.smoothing)?;
        if s.clamp != Clamp::None {
            writeln!(f, "  Clamped:      {:?}", s.clamp)?;
        }
        writeln!(f, "  Search:       {:?} ({} evaluations)", self.outcome, s.evaluations)?;
        writeln!(f, "  Trace tr(A):  {:.4}", s.trace)?;
        writeln!(f, "  GCV score:    {:e}", s.gcv)?;
        writeln!(f, "  Mean sq. res: {:e}", s.mean_squared_residual)?;
        writeln!(f, "  Variance:     {:e}", s.variance)?;
        writeln!(f, "  Est. risk:    {:e}", s.estimated_risk)?;
        writeln!(f)?;

        if let Some(diagnostics) = &self.diagnostics {
            for (j, diag) in diagnostics.iter().enumerate() {
                writeln!(f, "Channel {j}")?;
                writeln!(f, "{}", diag)?;
            }
        }

        if self.coefficients.is_empty() {
            return Ok(());
        }
        if self.channels() > 1 {
            writeln!(f, "Coefficients (channel 0 of {}):", self.channels())?;
        } else {
            writeln!(f, "Coefficients:")?;
        }

        let fitted = self.fitted.as_ref().and_then(|v| v.first());
        let residuals = self.residuals.as_ref().and_then(|v| v.first());

        write!(f, "{:>8} {:>14}", "X", "Coefficient")?;
        if fitted.is_some() {
            write!(f, " {:>12}", "Fitted")?;
        }
        if residuals.is_some() {
            write!(f, " {:>12}", "Residual")?;
        }
        writeln!(f)?;

        let line_width = 23
            + if fitted.is_some() { 13 } else { 0 }
            + if residuals.is_some() { 13 } else { 0 };
        writeln!(f, "{:-<width$}", "", width = line_width)?;

        // Show first 10 and last 10 rows if more than 20 knots
        let n = self.x.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let coefficients = &self.coefficients[0];
        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>8.2} {:>14.6}", self.x[idx], coefficients[idx])?;
            if let Some(values) = fitted {
                write!(f, " {:>12.6}", values[idx])?;
            }
            if let Some(values) = residuals {
                write!(f, " {:>12.6}", values[idx])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
