//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive data structures and utilities used
//! throughout the crate. It has zero internal dependencies within the crate.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Banded matrix storage.
pub mod band;

/// Knot-interval cursor.
pub mod interval;

/// Shared error types.
pub mod errors;

/// Buffer management.
pub mod buffer;

// External dependencies
use num_traits::{Float, ToPrimitive};

/// Convert a count or literal into `T`.
///
/// Every value passed here is representable in both `f32` and `f64`; the
/// NaN fallback only guards exotic `Float` implementations.
#[inline]
pub fn cast<T: Float, N: ToPrimitive>(value: N) -> T {
    T::from(value).unwrap_or_else(T::nan)
}
