//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer scores fits:
//! - Selection criteria and the objective evaluated by the parameter search
//! - Diagnostic metrics for fit quality
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Selection criteria and the smoothing objective.
pub mod criterion;

/// Diagnostic metrics for fit quality assessment.
pub mod diagnostics;
