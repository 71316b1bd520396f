//! Selection criteria and the smoothing objective.
//!
//! ## Purpose
//!
//! This module evaluates one trial smoothing parameter: it solves the
//! regularized system for every channel, computes the weighted mean squared
//! residual and the trace of the hat operator, and scores the result under the
//! selected criterion.
//!
//! ## Design notes
//!
//! * **Side effects**: Each evaluation overwrites the caller's coefficient
//!   vectors and statistics, so after the search the last evaluated `p` is
//!   the one reflected in both.
//! * **Residual fraction**: Criteria divide by `tr(I - A) / N` as computed by
//!   the trace estimator, not by `1 - tr(A) / N`.
//!
//! ## Key concepts
//!
//! * **GCV**: `msr / (1 - tr(A)/N)^2`.
//! * **Known variance**: `msr + σ²·(2·tr(A)/N - 1)`, an unbiased estimate of
//!   the true mean squared error.
//! * **Degrees of freedom**: `|tr(A) - d|`, distance to a target trace.
//!
//! ## Invariants
//!
//! * `FixedP` scores 0 and is never searched.
//! * Channel and knot weights enter `msr` multiplicatively.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::banded::{assemble, factorize, solve, Clamp, Regularization};
use crate::algorithms::trace::TraceEstimate;
use crate::primitives::band::BandMatrix;
use crate::primitives::buffer::FitBuffer;
use crate::primitives::cast;

// ============================================================================
// Criterion
// ============================================================================

/// Rule used to choose the smoothing parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion<T> {
    /// Use the given `p` as is; no search.
    FixedP(T),

    /// Minimise the generalized cross-validation score.
    Gcv,

    /// Minimise the true mean squared error estimated with a known noise variance.
    KnownVariance(T),

    /// Match the trace of the hat operator to a target degrees of freedom.
    DegreesOfFreedom(T),
}

impl<T> Default for Criterion<T> {
    fn default() -> Self {
        Self::Gcv
    }
}

impl<T: Float> Criterion<T> {
    /// Whether this criterion requires a parameter search.
    #[inline]
    pub fn searches(&self) -> bool {
        !matches!(self, Self::FixedP(_))
    }

    /// Short label used in logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FixedP(_) => "fixed p",
            Self::Gcv => "GCV",
            Self::KnownVariance(_) => "known variance",
            Self::DegreesOfFreedom(_) => "degrees of freedom",
        }
    }
}

// ============================================================================
// Fit Statistics
// ============================================================================

/// Statistics of one evaluated smoothing parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitStatistics<T> {
    /// Generalized cross-validation score.
    pub gcv: T,

    /// Weighted mean squared residual.
    pub mean_squared_residual: T,

    /// Trace of the hat operator, `tr(A)`.
    pub trace: T,

    /// Smoothing parameter used (0 when clamped at the floor).
    pub smoothing: T,

    /// Estimate of the true mean squared error.
    pub estimated_risk: T,

    /// Residual variance estimate, `msr / (1 - tr(A)/N)`.
    pub variance: T,

    /// Effective degrees-of-freedom fraction, `tr(A) / N`.
    pub dof_fraction: T,

    /// Value of the selection criterion at `smoothing`.
    pub score: T,

    /// Bound applied to the smoothing parameter.
    pub clamp: Clamp,

    /// Objective evaluations performed by the fit.
    pub evaluations: usize,
}

impl<T: Float> Default for FitStatistics<T> {
    fn default() -> Self {
        Self {
            gcv: T::zero(),
            mean_squared_residual: T::zero(),
            trace: T::zero(),
            smoothing: T::zero(),
            estimated_risk: T::zero(),
            variance: T::zero(),
            dof_fraction: T::zero(),
            score: T::zero(),
            clamp: Clamp::None,
            evaluations: 0,
        }
    }
}

// ============================================================================
// Objective
// ============================================================================

/// Everything needed to score a trial smoothing parameter.
#[derive(Debug, Clone, Copy)]
pub struct Objective<'a, T> {
    /// Design matrix, half-bandwidth `M - 1`.
    pub basis: &'a BandMatrix<T>,

    /// Weighted penalty, half-bandwidth `M`.
    pub penalty: &'a BandMatrix<T>,

    /// Penalty scale divided by design scale.
    pub normalization: T,

    /// Regularization floor ε.
    pub epsilon: T,

    /// Knot weights.
    pub knot_weights: &'a [T],

    /// Sample values, one slice of length `N` per channel.
    pub channels: &'a [&'a [T]],

    /// Channel weights.
    pub channel_weights: &'a [T],

    /// Selection criterion.
    pub criterion: Criterion<T>,
}

impl<'a, T: Float> Objective<'a, T> {
    /// Fit at `p`, overwrite `coefficients` and `stats`, and return the score.
    pub fn evaluate(
        &self,
        p: T,
        coefficients: &mut [Vec<T>],
        stats: &mut FitStatistics<T>,
        buffer: &mut FitBuffer<T>,
    ) -> T {
        let reg = Regularization::resolve(p, self.normalization, self.epsilon);

        assemble(&mut buffer.system, self.basis, self.penalty, reg.effective);
        factorize(&mut buffer.system);
        for (channel, c) in self.channels.iter().zip(coefficients.iter_mut()) {
            solve(&buffer.system, channel, c);
        }

        let trace = TraceEstimate::from_factorization(
            self.penalty,
            &mut buffer.system,
            reg.effective,
            &mut buffer.upper,
            &mut buffer.lower,
        );

        let msr = self.mean_squared_residual(coefficients, &mut buffer.fitted);
        let trn = trace.residual_fraction;
        let variance = msr / trn;

        let estimated_risk = match self.criterion {
            Criterion::KnownVariance(sigma2) => msr - sigma2 * (trn + trn - T::one()),
            _ => variance - msr,
        };

        let gcv = variance / trn;
        let score = match self.criterion {
            Criterion::FixedP(_) => T::zero(),
            Criterion::Gcv => gcv,
            Criterion::KnownVariance(_) => estimated_risk,
            Criterion::DegreesOfFreedom(target) => (trace.trace - target).abs(),
        };

        *stats = FitStatistics {
            gcv,
            mean_squared_residual: msr,
            trace: trace.trace,
            smoothing: reg.reported,
            estimated_risk,
            variance,
            dof_fraction: trace.fraction,
            score,
            clamp: reg.clamp,
            evaluations: stats.evaluations,
        };

        score
    }

    // Weighted mean of squared residuals over all knots and channels.
    fn mean_squared_residual(&self, coefficients: &[Vec<T>], fitted: &mut [T]) -> T {
        let n = self.basis.rows();
        let mut sum = T::zero();

        for ((channel, c), &wy) in self
            .channels
            .iter()
            .zip(coefficients.iter())
            .zip(self.channel_weights.iter())
        {
            self.basis.mul_vec(c, fitted);
            let mut channel_sum = T::zero();
            for ((&yi, &fi), &wx) in channel.iter().zip(fitted.iter()).zip(self.knot_weights) {
                let r = fi - yi;
                channel_sum = channel_sum + r * r * wx;
            }
            sum = sum + channel_sum * wy;
        }

        sum / (cast::<T, usize>(n) * cast::<T, usize>(self.channels.len()))
    }
}
