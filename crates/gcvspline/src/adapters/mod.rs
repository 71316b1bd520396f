//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer provides user-facing processors that adapt the engine layer for
//! different calling patterns:
//!
//! - **Batch**: One-shot fits that receive the knots with every call
//! - **Prepared**: Repeated fits against knots fixed at build time
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// One-shot smoothing spline fits.
pub mod batch;

/// Fits against a pre-built knot set.
pub mod prepared;
