//! Input validation for spline configuration and data.
//!
//! ## Purpose
//!
//! This module checks every precondition of a fit before any numerical work
//! starts: the criterion and its value, the spline order against the number
//! of knots, the knots and knot weights, the channel weights and the shape of
//! the sample data.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Ordered**: A full fit is checked criterion first, then order and size,
//!   then knot weights and knots, then channel weights, then sample data.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * A system that passes `validate_knot_set` satisfies `N >= 2M`, strictly
//!   increasing finite knots and positive finite weights.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort or repair input data.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::SplineConfig;
use crate::evaluation::criterion::Criterion;
use crate::primitives::cast;
use crate::primitives::errors::SplineError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for spline configuration and input data.
///
/// All methods return `Result<(), SplineError>` and fail fast upon the
/// first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Composite Checks
    // ========================================================================

    /// Validate everything that depends only on the knot set.
    pub fn validate_knot_set<T: Float>(
        x: &[T],
        knot_weights: &[T],
        order: usize,
    ) -> Result<(), SplineError> {
        Self::validate_order(order)?;
        Self::validate_size(x.len(), order)?;
        Self::validate_knot_weights(knot_weights, x.len())?;
        Self::validate_knots(x)
    }

    /// Validate a complete fit in the documented order.
    pub fn validate_fit<T: Float, C: AsRef<[T]>>(
        config: &SplineConfig<T>,
        x: &[T],
        knot_weights: &[T],
        order: usize,
        channels: &[C],
        channel_weights: &[T],
    ) -> Result<(), SplineError> {
        Self::validate_criterion(&config.criterion, order)?;
        Self::validate_criterion_for_size(&config.criterion, x.len(), order)?;
        Self::validate_knot_set(x, knot_weights, order)?;
        Self::validate_channel_weights(channel_weights, channels.len())?;
        Self::validate_channels(channels, x.len())
    }

    // ========================================================================
    // Criterion
    // ========================================================================

    /// Validate the criterion value against the spline order.
    pub fn validate_criterion<T: Float>(
        criterion: &Criterion<T>,
        order: usize,
    ) -> Result<(), SplineError> {
        match *criterion {
            Criterion::FixedP(p) => {
                if !p.is_finite() || p < T::zero() {
                    return Err(SplineError::InvalidSmoothing(as_f64(p)));
                }
            }
            Criterion::KnownVariance(v) => {
                if !v.is_finite() || v < T::zero() {
                    return Err(SplineError::InvalidVariance(as_f64(v)));
                }
            }
            Criterion::DegreesOfFreedom(d) => {
                let min: T = cast(order);
                if !d.is_finite() || d < min {
                    return Err(SplineError::InvalidDegreesOfFreedom {
                        got: as_f64(d),
                        min: order as f64,
                        max: f64::INFINITY,
                    });
                }
            }
            Criterion::Gcv => {}
        }
        Ok(())
    }

    /// Validate a degrees-of-freedom target against the number of knots.
    pub fn validate_criterion_for_size<T: Float>(
        criterion: &Criterion<T>,
        n: usize,
        order: usize,
    ) -> Result<(), SplineError> {
        if let Criterion::DegreesOfFreedom(d) = *criterion {
            let max: T = cast(n);
            if d > max {
                return Err(SplineError::InvalidDegreesOfFreedom {
                    got: as_f64(d),
                    min: order as f64,
                    max: n as f64,
                });
            }
        }
        Ok(())
    }

    /// Validate the search tunables.
    pub fn validate_search<T: Float>(config: &SplineConfig<T>) -> Result<(), SplineError> {
        let eps = config.epsilon;
        if !eps.is_finite() || eps <= T::zero() || eps >= T::one() {
            return Err(SplineError::InvalidTolerance(as_f64(eps)));
        }
        if !config.max_smoothing.is_finite() || config.max_smoothing <= T::zero() {
            return Err(SplineError::InvalidTolerance(as_f64(config.max_smoothing)));
        }
        if !config.tolerance.is_finite() || config.tolerance <= T::zero() {
            return Err(SplineError::InvalidTolerance(as_f64(config.tolerance)));
        }
        if config.max_bracket_steps == 0 || config.max_refine_steps == 0 {
            return Err(SplineError::InvalidTolerance(0.0));
        }
        if let Some(p) = config.initial_smoothing {
            if !p.is_finite() || p <= T::zero() {
                return Err(SplineError::InvalidSmoothing(as_f64(p)));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Order and Size
    // ========================================================================

    /// Validate the spline half-order.
    pub fn validate_order(order: usize) -> Result<(), SplineError> {
        if order == 0 {
            return Err(SplineError::InvalidOrder(order));
        }
        Ok(())
    }

    /// Validate the number of knots against the order (`N >= 2M`).
    pub fn validate_size(n: usize, order: usize) -> Result<(), SplineError> {
        let min = 2 * order;
        if n < min {
            return Err(SplineError::TooFewKnots { got: n, min });
        }
        Ok(())
    }

    // ========================================================================
    // Knots and Weights
    // ========================================================================

    /// Validate that the knots are finite and strictly increasing.
    pub fn validate_knots<T: Float>(x: &[T]) -> Result<(), SplineError> {
        for (i, &xi) in x.iter().enumerate() {
            if !xi.is_finite() {
                return Err(SplineError::InvalidNumericValue(format!(
                    "x[{}]={}",
                    i,
                    as_f64(xi)
                )));
            }
            if i > 0 && xi <= x[i - 1] {
                return Err(SplineError::NonIncreasingKnots { index: i });
            }
        }
        Ok(())
    }

    /// Validate the knot weights (one positive finite weight per knot).
    pub fn validate_knot_weights<T: Float>(w: &[T], n: usize) -> Result<(), SplineError> {
        if w.len() != n {
            return Err(SplineError::MismatchedWeights {
                kind: "knot",
                expected: n,
                got: w.len(),
            });
        }
        match w.iter().position(|&v| !(v.is_finite() && v > T::zero())) {
            Some(index) => Err(SplineError::InvalidKnotWeight {
                index,
                value: as_f64(w[index]),
            }),
            None => Ok(()),
        }
    }

    /// Validate the channel weights (one positive finite weight per channel).
    pub fn validate_channel_weights<T: Float>(w: &[T], k: usize) -> Result<(), SplineError> {
        if w.len() != k {
            return Err(SplineError::MismatchedWeights {
                kind: "channel",
                expected: k,
                got: w.len(),
            });
        }
        match w.iter().position(|&v| !(v.is_finite() && v > T::zero())) {
            Some(index) => Err(SplineError::InvalidChannelWeight {
                index,
                value: as_f64(w[index]),
            }),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Sample Data
    // ========================================================================

    /// Validate that every channel has `n` finite samples.
    pub fn validate_channels<T: Float, C: AsRef<[T]>>(
        channels: &[C],
        n: usize,
    ) -> Result<(), SplineError> {
        if channels.is_empty() {
            return Err(SplineError::EmptyInput);
        }
        for (j, channel) in channels.iter().enumerate() {
            let values = channel.as_ref();
            if values.len() != n {
                return Err(SplineError::MismatchedInputs {
                    channel: j,
                    knots: n,
                    values: values.len(),
                });
            }
            if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                return Err(SplineError::InvalidNumericValue(format!(
                    "y[{}][{}]={}",
                    j,
                    i,
                    as_f64(values[i])
                )));
            }
        }
        Ok(())
    }
}

#[inline]
fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
