//! Error types for smoothing-spline operations.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur while configuring or
//! fitting a smoothing spline: invalid order or sample size, invalid knots or
//! weights, and invalid criterion/value combinations.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (offending index, value, limits).
//! * **Classified**: Every variant maps onto one of four coarse [`ErrorKind`] codes.
//! * **Deferred**: Builder misuse is caught and stored during configuration.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//!
//! ## Key concepts
//!
//! 1. **Order/size**: Spline order must be positive and N >= 2M.
//! 2. **Weights/knots**: Weights strictly positive, knots strictly increasing.
//! 3. **Mode/value**: The smoothing criterion's value must be in range.
//! 4. **Data shape**: Channel lengths and finiteness of samples.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * Numerical degeneracy is not an error; it is reported in the fit statistics.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Classification
// ============================================================================

/// Coarse error code reported by a failed fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Spline order is zero or there are fewer than `2 * order` knots.
    InvalidOrderOrSize,

    /// A knot or channel weight is not strictly positive, or the knots are
    /// not strictly increasing.
    InvalidWeightsOrKnots,

    /// The smoothing criterion carries a value outside its admissible range.
    InvalidModeOrValue,

    /// Sample data has the wrong shape or contains non-finite values.
    InvalidData,
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for smoothing-spline operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SplineError {
    /// Spline order must be at least 1.
    InvalidOrder(usize),

    /// Number of knots is below `2 * order`.
    TooFewKnots {
        /// Number of knots provided.
        got: usize,
        /// Minimum required knots.
        min: usize,
    },

    /// Knots must be strictly increasing.
    NonIncreasingKnots {
        /// Index of the first knot that is not greater than its predecessor.
        index: usize,
    },

    /// Knot weights must be strictly positive and finite.
    InvalidKnotWeight {
        /// Index of the offending weight.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Channel weights must be strictly positive and finite.
    InvalidChannelWeight {
        /// Index of the offending channel.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Weight array does not match the data it weights.
    MismatchedWeights {
        /// Which weights ("knot" or "channel").
        kind: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Fixed smoothing parameter must be finite and non-negative.
    InvalidSmoothing(f64),

    /// Known error variance must be finite and non-negative.
    InvalidVariance(f64),

    /// Target degrees of freedom must lie in `[order, n]`.
    InvalidDegreesOfFreedom {
        /// The requested degrees of freedom.
        got: f64,
        /// Smallest admissible value (the spline order).
        min: f64,
        /// Largest admissible value (the number of knots).
        max: f64,
    },

    /// Search tolerances and limits must be positive and finite.
    InvalidTolerance(f64),

    /// No observation channels were supplied.
    EmptyInput,

    /// A channel does not have one value per knot.
    MismatchedInputs {
        /// Index of the channel.
        channel: usize,
        /// Number of knots.
        knots: usize,
        /// Number of values in the channel.
        values: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Requested channel does not exist in the fit.
    ChannelOutOfRange {
        /// The requested channel.
        channel: usize,
        /// Number of fitted channels.
        channels: usize,
    },

    /// Prepared adapter was built without knots.
    MissingKnots,

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl SplineError {
    /// Classify the error into its coarse error code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOrder(_) | Self::TooFewKnots { .. } | Self::MissingKnots => {
                ErrorKind::InvalidOrderOrSize
            }
            Self::NonIncreasingKnots { .. }
            | Self::InvalidKnotWeight { .. }
            | Self::InvalidChannelWeight { .. }
            | Self::MismatchedWeights { .. } => ErrorKind::InvalidWeightsOrKnots,
            Self::InvalidSmoothing(_)
            | Self::InvalidVariance(_)
            | Self::InvalidDegreesOfFreedom { .. }
            | Self::InvalidTolerance(_)
            | Self::DuplicateParameter { .. } => ErrorKind::InvalidModeOrValue,
            Self::EmptyInput
            | Self::MismatchedInputs { .. }
            | Self::InvalidNumericValue(_)
            | Self::ChannelOutOfRange { .. } => ErrorKind::InvalidData,
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for SplineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidOrder(order) => write!(f, "Invalid order: {order} (must be >= 1)"),
            Self::TooFewKnots { got, min } => {
                write!(f, "Too few knots: got {got}, need at least {min}")
            }
            Self::NonIncreasingKnots { index } => {
                write!(
                    f,
                    "Knots must be strictly increasing: x[{index}] <= x[{}]",
                    index.saturating_sub(1)
                )
            }
            Self::InvalidKnotWeight { index, value } => {
                write!(f, "Invalid knot weight: w[{index}]={value} (must be > 0)")
            }
            Self::InvalidChannelWeight { index, value } => {
                write!(f, "Invalid channel weight: w[{index}]={value} (must be > 0)")
            }
            Self::MismatchedWeights {
                kind,
                expected,
                got,
            } => {
                write!(f, "Length mismatch: expected {expected} {kind} weights, got {got}")
            }
            Self::InvalidSmoothing(p) => {
                write!(f, "Invalid smoothing parameter: {p} (must be >= 0 and finite)")
            }
            Self::InvalidVariance(v) => {
                write!(f, "Invalid variance: {v} (must be >= 0 and finite)")
            }
            Self::InvalidDegreesOfFreedom { got, min, max } => {
                write!(f, "Invalid degrees of freedom: {got} (must be in [{min}, {max}])")
            }
            Self::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {tol} (must be > 0 and finite)")
            }
            Self::EmptyInput => write!(f, "No observation channels supplied"),
            Self::MismatchedInputs {
                channel,
                knots,
                values,
            } => {
                write!(
                    f,
                    "Length mismatch: {knots} knots but channel {channel} has {values} values"
                )
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::ChannelOutOfRange { channel, channels } => {
                write!(f, "Channel {channel} out of range (fit has {channels} channels)")
            }
            Self::MissingKnots => write!(f, "Prepared adapter requires knots before build()"),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for SplineError {}
