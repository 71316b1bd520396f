//! Execution engine for smoothing spline fits.
//!
//! ## Purpose
//!
//! This module drives a fit: it evaluates the objective either once at a
//! fixed smoothing parameter or repeatedly while searching for the parameter
//! that minimises the selected criterion, then leaves the coefficients and
//! statistics of the chosen parameter in the output.
//!
//! ## Design notes
//!
//! * **Two phases**: A bracket phase walks `p` by factors of two (down while
//!   the score does not increase, then up until it does), and a golden-section
//!   phase narrows the bracket to a relative width of `tolerance`.
//! * **Final evaluation**: The chosen `p` is always evaluated once more, so the
//!   output reflects it and not the last trial of the search.
//! * **Bounded**: Both phases stop at the regularization floor or ceiling and
//!   at an iteration limit; the best point found so far is then accepted.
//! * **Buffer reuse**: All trials share one `FitBuffer`.
//!
//! ## Key concepts
//!
//! * **Seed**: `1 / el` (the normalization constant), or a caller-supplied
//!   starting value.
//! * **Convergence**: `(r2 - r1) / (r1 + r2) <= tolerance`, or the relative
//!   width is below machine precision.
//!
//! ## Invariants
//!
//! * Every fit performs at least one objective evaluation.
//! * A search keeps `r1 < r2` throughout the golden-section phase.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not guarantee a global minimum of the criterion.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::banded::Clamp;
use crate::engine::system::SplineSystem;
use crate::evaluation::criterion::{Criterion, FitStatistics, Objective};
use crate::primitives::buffer::FitBuffer;
use crate::primitives::cast;

// ============================================================================
// Constants
// ============================================================================

/// Golden ratio used to shrink the bracket.
pub const GOLDEN_RATIO: f64 = 1.618033983;

/// Factor by which the bracket phase grows or shrinks `p`.
pub const GROWTH_FACTOR: f64 = 2.0;

/// Default regularization floor ε.
pub const DEFAULT_EPSILON: f64 = 1e-15;

/// Default upper bound on the reported smoothing parameter.
pub const DEFAULT_MAX_SMOOTHING: f64 = 9.9999999999999988e14;

/// Default relative bracket width at which the search stops.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default limit on bracket-phase steps.
pub const DEFAULT_MAX_BRACKET_STEPS: usize = 1024;

/// Default limit on golden-section steps.
pub const DEFAULT_MAX_REFINE_STEPS: usize = 256;

// ============================================================================
// Output
// ============================================================================

/// How the smoothing parameter was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Fixed by the caller; no search.
    Fixed,

    /// Golden-section search converged.
    Converged,

    /// The score kept decreasing down to the regularization floor.
    Floor,

    /// The score kept decreasing up to the smoothing ceiling.
    Ceiling,

    /// The bracket phase hit its step limit.
    BracketLimit,

    /// The golden-section phase hit its step limit.
    RefineLimit,
}

/// Output from one executed fit.
#[derive(Debug, Clone)]
pub struct ExecutorOutput<T> {
    /// Natural-spline coefficients, one vector of length `N` per channel.
    pub coefficients: Vec<Vec<T>>,

    /// Statistics at the chosen smoothing parameter.
    pub statistics: FitStatistics<T>,

    /// How the smoothing parameter was chosen.
    pub outcome: SearchOutcome,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the parameter search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineConfig<T> {
    /// Selection criterion.
    pub criterion: Criterion<T>,

    /// Regularization floor ε.
    pub epsilon: T,

    /// Reported `p` at or above which the bracket stops growing.
    pub max_smoothing: T,

    /// Relative bracket width at which the golden-section phase stops.
    pub tolerance: T,

    /// Step limit of the bracket phase.
    pub max_bracket_steps: usize,

    /// Step limit of the golden-section phase.
    pub max_refine_steps: usize,

    /// Starting value of the search; `None` uses `1 / el`.
    pub initial_smoothing: Option<T>,
}

impl<T: Float> Default for SplineConfig<T> {
    fn default() -> Self {
        Self {
            criterion: Criterion::Gcv,
            epsilon: cast(DEFAULT_EPSILON),
            max_smoothing: cast(DEFAULT_MAX_SMOOTHING),
            tolerance: cast(DEFAULT_TOLERANCE),
            max_bracket_steps: DEFAULT_MAX_BRACKET_STEPS,
            max_refine_steps: DEFAULT_MAX_REFINE_STEPS,
            initial_smoothing: None,
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs fits for a prepared spline system.
#[derive(Debug, Clone, Copy)]
pub struct SplineExecutor<T> {
    config: SplineConfig<T>,
}

/// Score and clamp state of one trial.
#[derive(Debug, Clone, Copy)]
struct Trial<T> {
    score: T,
    smoothing: T,
    clamp: Clamp,
}

// Objective plus the mutable state every trial overwrites.
struct Search<'s, 'a, T> {
    objective: &'s Objective<'a, T>,
    coefficients: &'s mut [Vec<T>],
    stats: &'s mut FitStatistics<T>,
    buffer: &'s mut FitBuffer<T>,
    evaluations: usize,
}

impl<'s, 'a, T: Float> Search<'s, 'a, T> {
    fn evaluate(&mut self, p: T) -> Trial<T> {
        let score = self
            .objective
            .evaluate(p, self.coefficients, self.stats, self.buffer);
        self.evaluations += 1;

        log::trace!(
            "objective #{}: p = {:e}, score = {:e}, trace = {:.4}",
            self.evaluations,
            as_f64(p),
            as_f64(score),
            as_f64(self.stats.trace)
        );

        Trial {
            score,
            smoothing: self.stats.smoothing,
            clamp: self.stats.clamp,
        }
    }
}

impl<T: Float> SplineExecutor<T> {
    /// Create an executor from a search configuration.
    pub fn from_config(config: &SplineConfig<T>) -> Self {
        Self { config: *config }
    }

    /// Fit every channel against `system`.
    ///
    /// `channels` hold `N` samples each and `channel_weights` one weight per
    /// channel; both are validated by the caller.
    pub fn run(
        &self,
        system: &SplineSystem<T>,
        channels: &[&[T]],
        channel_weights: &[T],
        buffer: &mut FitBuffer<T>,
    ) -> ExecutorOutput<T> {
        let n = system.len();
        buffer.ensure_capacity(n, system.order());

        let objective = Objective {
            basis: &system.basis().matrix,
            penalty: &system.penalty().matrix,
            normalization: system.normalization(),
            epsilon: self.config.epsilon,
            knot_weights: system.knot_weights(),
            channels,
            channel_weights,
            criterion: self.config.criterion,
        };

        let mut coefficients = vec![vec![T::zero(); n]; channels.len()];
        let mut statistics = FitStatistics::default();
        let mut search = Search {
            objective: &objective,
            coefficients: &mut coefficients,
            stats: &mut statistics,
            buffer,
            evaluations: 0,
        };

        let (p, outcome) = match self.config.criterion {
            Criterion::FixedP(p) => (p, SearchOutcome::Fixed),
            _ => self.select_smoothing(&mut search, system.normalization()),
        };

        search.evaluate(p);
        let evaluations = search.evaluations;
        statistics.evaluations = evaluations;

        log::debug!(
            "{} fit finished ({:?}): p = {:e}, trace = {:.4}, score = {:e}, {} evaluations",
            self.config.criterion.name(),
            outcome,
            as_f64(statistics.smoothing),
            as_f64(statistics.trace),
            as_f64(statistics.score),
            evaluations
        );

        ExecutorOutput {
            coefficients,
            statistics,
            outcome,
        }
    }

    // ========================================================================
    // Parameter Search
    // ========================================================================

    fn select_smoothing(&self, search: &mut Search<'_, '_, T>, normalization: T) -> (T, SearchOutcome) {
        let two: T = cast(GROWTH_FACTOR);
        let seed = match self.config.initial_smoothing {
            Some(p) if p > T::zero() && p.is_finite() => p,
            _ => T::one() / normalization,
        };
        log::debug!("bracket phase: seed p = {:e}", as_f64(seed));

        let mut steps = 0usize;
        let mut r1 = seed;
        let mut r2 = r1 * two;
        let mut g2 = search.evaluate(r2).score;

        // Walk down while the lower point scores no worse.
        loop {
            let trial = search.evaluate(r1);
            if trial.score > g2 {
                break;
            }
            if trial.clamp == Clamp::Floor {
                log::warn!(
                    "search stopped at the regularization floor (p = {:e})",
                    as_f64(r1)
                );
                return (r1, SearchOutcome::Floor);
            }
            steps += 1;
            if steps >= self.config.max_bracket_steps {
                log::warn!("bracket phase hit its step limit ({steps}) walking down");
                return (r1, SearchOutcome::BracketLimit);
            }
            r2 = r1;
            g2 = trial.score;
            r1 = r1 / two;
        }

        // Walk up until the score increases.
        let mut r3 = r2 * two;
        loop {
            let trial = search.evaluate(r3);
            if trial.score > g2 {
                break;
            }
            if trial.clamp == Clamp::Ceiling || trial.smoothing >= self.config.max_smoothing {
                log::warn!(
                    "search stopped at the smoothing ceiling (p = {:e})",
                    as_f64(r3)
                );
                return (r3, SearchOutcome::Ceiling);
            }
            steps += 1;
            if steps >= self.config.max_bracket_steps {
                log::warn!("bracket phase hit its step limit ({steps}) walking up");
                return (r3, SearchOutcome::BracketLimit);
            }
            r2 = r3;
            g2 = trial.score;
            r3 = r3 * two;
        }

        log::debug!(
            "golden phase: bracket [{:e}, {:e}] after {} evaluations",
            as_f64(r1),
            as_f64(r3),
            search.evaluations
        );
        self.refine(search, r1, r3)
    }

    // Golden-section search on [lo, hi].
    fn refine(&self, search: &mut Search<'_, '_, T>, mut lo: T, mut hi: T) -> (T, SearchOutcome) {
        let phi: T = cast(GOLDEN_RATIO);
        let half: T = cast(0.5);

        let mut alpha = (hi - lo) / phi;
        let mut x4 = lo + alpha;
        let mut x3 = hi - alpha;
        let mut g3 = search.evaluate(x3).score;
        let mut g4 = search.evaluate(x4).score;

        for _ in 0..self.config.max_refine_steps {
            if g3 <= g4 {
                hi = x4;
                if self.converged(lo, hi) {
                    return ((lo + hi) * half, SearchOutcome::Converged);
                }
                x4 = x3;
                g4 = g3;
                alpha = alpha / phi;
                x3 = hi - alpha;
                g3 = search.evaluate(x3).score;
            } else {
                lo = x3;
                if self.converged(lo, hi) {
                    return ((lo + hi) * half, SearchOutcome::Converged);
                }
                x3 = x4;
                g3 = g4;
                alpha = alpha / phi;
                x4 = lo + alpha;
                g4 = search.evaluate(x4).score;
            }
        }

        log::warn!(
            "golden phase hit its step limit ({}); bracket [{:e}, {:e}]",
            self.config.max_refine_steps,
            as_f64(lo),
            as_f64(hi)
        );
        ((lo + hi) * half, SearchOutcome::RefineLimit)
    }

    #[inline]
    fn converged(&self, lo: T, hi: T) -> bool {
        let err = (hi - lo) / (lo + hi);
        err * err + T::one() == T::one() || err <= self.config.tolerance
    }
}

#[inline]
fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
