//! Diagnostic metrics for smoothing spline fit quality.
//!
//! ## Purpose
//!
//! This module summarises how well a fitted channel reproduces its samples:
//! goodness-of-fit metrics plus model selection criteria that use the trace
//! of the hat operator as the effective number of parameters.
//!
//! ## Design notes
//!
//! * **Residual-based**: Metrics are computed from residuals `y - ŷ` at the knots.
//! * **Exact complexity**: The effective degrees of freedom come from the
//!   trace estimator, so AIC and AICc are always available.
//! * **Unweighted**: Knot weights are not applied here; they already shaped
//!   the fit.
//!
//! ## Invariants
//!
//! * RMSE, MAE and residual SD are non-negative.
//! * R² ≤ 1 (1 is a perfect fit).
//!
//! ## Non-goals
//!
//! * This module does not provide p-values or confidence bands.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::primitives::cast;

// ============================================================================
// Diagnostics Structure
// ============================================================================

/// Diagnostic metrics for one fitted channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics<T> {
    /// Root mean squared error.
    pub rmse: T,

    /// Mean absolute error.
    pub mae: T,

    /// Coefficient of determination.
    pub r_squared: T,

    /// Akaike information criterion.
    pub aic: T,

    /// Corrected AIC; `None` when `N - df - 1 <= 0`.
    pub aicc: Option<T>,

    /// Effective degrees of freedom, `tr(A)`.
    pub effective_df: T,

    /// Sample standard deviation of the residuals.
    pub residual_sd: T,
}

impl<T: Float> Diagnostics<T> {
    /// Compute diagnostics from samples, fitted values and the hat trace.
    pub fn compute(y: &[T], fitted: &[T], effective_df: T) -> Self {
        let n = y.len();
        let n_t: T = cast(n);

        let mut rss = T::zero();
        let mut sum_abs = T::zero();
        let mut sum_r = T::zero();
        for (&yi, &fi) in y.iter().zip(fitted) {
            let r = yi - fi;
            rss = rss + r * r;
            sum_abs = sum_abs + r.abs();
            sum_r = sum_r + r;
        }

        let rmse = (rss / n_t).sqrt();
        let mae = sum_abs / n_t;
        let r_squared = Self::calculate_r_squared(y, rss);

        let residual_sd = if n > 1 {
            let var = (rss - sum_r * sum_r / n_t) / (n_t - T::one());
            var.max(T::zero()).sqrt()
        } else {
            rmse
        };

        let aic = Self::calculate_aic(rss, n_t, effective_df);
        let denom = n_t - effective_df - T::one();
        let aicc = if denom > T::zero() {
            let two: T = cast(2.0);
            Some(aic + two * effective_df * (effective_df + T::one()) / denom)
        } else {
            None
        };

        Self {
            rmse,
            mae,
            r_squared,
            aic,
            aicc,
            effective_df,
            residual_sd,
        }
    }

    /// R² = 1 - RSS / SS_tot.
    fn calculate_r_squared(y: &[T], rss: T) -> T {
        let n_t: T = cast(y.len());
        let mean = y.iter().fold(T::zero(), |acc, &v| acc + v) / n_t;
        let ss_tot = y.iter().fold(T::zero(), |acc, &v| {
            let d = v - mean;
            acc + d * d
        });

        if ss_tot == T::zero() {
            if rss == T::zero() {
                T::one()
            } else {
                T::zero()
            }
        } else {
            T::one() - rss / ss_tot
        }
    }

    /// AIC = N·ln(RSS/N) + 2·df; an exact fit reports `-inf`.
    fn calculate_aic(rss: T, n_t: T, effective_df: T) -> T {
        let two: T = cast(2.0);
        if rss <= T::zero() {
            return T::neg_infinity();
        }
        n_t * (rss / n_t).ln() + two * effective_df
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display> Display for Diagnostics<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Spline Diagnostics:")?;
        writeln!(f, "  RMSE:         {:.6}", self.rmse)?;
        writeln!(f, "  MAE:          {:.6}", self.mae)?;
        writeln!(f, "  R²:           {:.6}", self.r_squared)?;
        writeln!(f, "  Residual SD:  {:.6}", self.residual_sd)?;
        writeln!(f, "  Effective DF: {:.2}", self.effective_df)?;
        writeln!(f, "  AIC:          {:.2}", self.aic)?;
        if let Some(aicc) = self.aicc {
            writeln!(f, "  AICc:         {:.2}", aicc)?;
        }
        Ok(())
    }
}
