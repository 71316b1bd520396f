//! # gcvspline: Natural smoothing splines with automatic smoothing selection
//!
//! Natural polynomial smoothing splines of arbitrary odd degree `2M - 1`,
//! fitted to one or more channels of samples taken at shared, strictly
//! increasing knots. The smoothing parameter is chosen automatically by
//! generalized cross-validation (GCV), by minimising an estimate of the true
//! mean squared error when the noise variance is known, or by matching a target
//! number of degrees of freedom. It can also be given explicitly.
//!
//! ## What is a smoothing spline?
//!
//! For knots `x_1 < ... < x_N`, samples `y_i` and weights `w_i`, the smoothing
//! spline of half-order `M` minimises
//!
//! ```text
//!   Σ w_i (y_i - s(x_i))²  +  p ∫ (s^(M)(t))² dt
//! ```
//!
//! over all functions with square-integrable `M`-th derivative. The minimiser
//! is a natural spline of degree `2M - 1` with its knots at the `x_i`. Small `p`
//! interpolates the data; large `p` tends to the weighted least-squares
//! polynomial of degree `M - 1`.
//!
//! ## Quick Start
//!
//! ```rust
//! use gcvspline::prelude::*;
//!
//! let x: Vec<f64> = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
//! let y = vec![0.1, 0.9, 4.2, 8.8, 16.1, 25.2, 35.7, 49.1];
//!
//! // Cubic spline (M = 2), smoothing chosen by GCV
//! let model = GcvSpline::new()
//!     .order(2)
//!     .criterion(Gcv)
//!     .return_fitted()
//!     .adapter(Batch)
//!     .build()?;
//!
//! let fit = model.fit(&x, &y)?;
//! println!("{}", fit);
//!
//! // Evaluate the spline and its derivatives anywhere
//! let mut spline = fit.spline(0)?;
//! let value = spline.value(2.5);
//! let slope = spline.evaluate(2.5, 1);
//! assert!(value.is_finite() && slope.is_finite());
//! # Result::<(), SplineError>::Ok(())
//! ```
//!
//! ### Repeated fits against the same knots
//!
//! The prepared adapter builds the design matrix and penalty once, and seeds
//! each search with the smoothing parameter chosen by the previous fit:
//!
//! ```rust
//! use gcvspline::prelude::*;
//!
//! let x: Vec<f64> = (0..12).map(|i| i as f64 * 0.5).collect();
//!
//! let mut model = GcvSpline::new()
//!     .criterion(Gcv)
//!     .adapter(Prepared)
//!     .knots(x.clone())
//!     .build()?;
//!
//! for shift in 0..3 {
//!     let y: Vec<f64> = x.iter().map(|&t| (t + shift as f64).sin()).collect();
//!     let fit = model.fit(&y)?;
//!     assert_eq!(fit.coefficients[0].len(), x.len());
//! }
//! # Result::<(), SplineError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Every fit returns `Result<SplineFit<T>, SplineError>`. Errors are raised
//! before any numerical work; [`SplineError::kind`](prelude::SplineError::kind)
//! classifies them into order/size, weights/knots, mode/value and data errors.
//!
//! ```rust
//! use gcvspline::prelude::*;
//!
//! let model = GcvSpline::new().order(3).adapter(Batch).build()?;
//!
//! // A quintic spline needs at least 6 knots
//! match model.fit(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]) {
//!     Ok(_) => unreachable!(),
//!     Err(e) => assert_eq!(e.kind(), ErrorKind::InvalidOrderOrSize),
//! }
//! # Result::<(), SplineError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments with `alloc`. Disable default
//! features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! gcvspline = { version = "0.1", default-features = false }
//! ```
//!
//! ## Logging
//!
//! The crate emits diagnostics through the [`log`] facade: the chosen
//! smoothing parameter at `debug`, every trial evaluation at `trace`, and
//! search limits or clamps at `warn`. Install any logger to see them.
//!
//! ## References
//!
//! - Woltring, H. J. (1986). "A FORTRAN package for generalized,
//!   cross-validatory spline smoothing and differentiation"
//! - Craven, P. & Wahba, G. (1979). "Smoothing noisy data with spline functions"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - banded storage, buffers and errors.
mod primitives;

// Layer 2: Math - design matrix and roughness penalty.
mod math;

// Layer 3: Algorithms - banded solver, trace estimator, derivative evaluation.
mod algorithms;

// Layer 4: Evaluation - selection criteria and diagnostics.
mod evaluation;

// Layer 5: Engine - system setup, parameter search and validation.
mod engine;

// Layer 6: Adapters - batch and prepared processors.
mod adapters;

// High-level fluent API for smoothing spline fits.
mod api;

// Standard smoothing spline prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Batch, Prepared},
        BatchSpline, Clamp,
        Criterion::{self, DegreesOfFreedom, FixedP, Gcv, KnownVariance},
        Diagnostics, ErrorKind, FitStatistics, FittedSpline, GcvSplineBuilder as GcvSpline,
        KnotCursor, PreparedSpline, SearchOutcome, SplineError, SplineEvaluator, SplineFit,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
