//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a fit by coordinating the math, algorithms and
//! evaluation layers. It owns the prepared system for a knot set, the
//! smoothing parameter search, validation and the output types.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Prepared design matrix and penalty for one knot set.
pub mod system;

/// Smoothing parameter search and fit execution.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for spline fits.
pub mod output;
