//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer builds the two banded operators of a natural smoothing spline:
//! - The B-spline design matrix (data fidelity)
//! - The weighted roughness penalty (smoothness)
//!
//! Both are pure functions of the knots, knot weights and spline order, and
//! are built once per knot set.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// B-spline design matrix.
pub mod basis;

/// Roughness penalty matrix.
pub mod penalty;
