//! Layer 3: Algorithms
//!
//! This layer implements the numerical kernels of a smoothing spline fit:
//! the banded solve of the regularized system, the trace of the smoothing
//! operator, and spline evaluation. It is orchestrated by the evaluation and
//! engine layers.
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

// Banded assembly, LU factorization and substitution.
pub mod banded;

// Trace of the hat operator from the factored system.
pub mod trace;

// Spline and derivative evaluation.
pub mod derivative;
