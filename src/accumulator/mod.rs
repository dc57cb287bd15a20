//! Entropy accumulation state machine.
//!
//! Folds raw noise samples into an incremental hash across time. Each
//! [`step`](EntropyAccumulator::step) performs exactly one sample read and
//! one hash write, so callers interleave accumulation with the rest of
//! their loop and poll [`is_ready`](EntropyAccumulator::is_ready) until a
//! digest can be [`extract`](EntropyAccumulator::extract)ed.

mod context;

pub use context::EntropyContext;

use crate::conditioning::{Conditioner, Digest, HashAlgorithm, DIGEST_LEN};
use crate::source::{NoiseError, NoiseSource};

/// Default readiness threshold: one accumulation step per digest bit.
pub const DEFAULT_MIN_ITERATIONS: u32 = (DIGEST_LEN as u32) * 8;

/// Lifecycle phase of an accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorState {
    /// No accumulation cycle is in progress.
    Uninitialized,
    /// Samples are being folded in; readiness has not been confirmed.
    Accumulating,
    /// The last readiness check confirmed the threshold was met.
    Ready,
}

/// Configuration for an accumulator.
#[derive(Debug, Clone, Copy)]
pub struct AccumulatorConfig {
    /// Steps required before extraction is permitted.
    pub min_iterations: u32,
    /// Hash algorithm backing the conditioner.
    pub algorithm: HashAlgorithm,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            min_iterations: DEFAULT_MIN_ITERATIONS,
            algorithm: HashAlgorithm::default(),
        }
    }
}

/// Folds a wide sample into one byte by XORing its halves.
///
/// Whatever noise the sample carries ends up concentrated in the single
/// byte fed to the conditioner.
#[inline]
pub fn fold_sample(sample: u16) -> u8 {
    (sample ^ (sample >> 8)) as u8
}

/// Accumulates noise samples into a conditioned digest.
///
/// The lifecycle is a three-state machine. A fresh accumulator is
/// `Uninitialized`; [`init`](Self::init) (or the first
/// [`step`](Self::step), which initializes implicitly) begins a cycle and
/// moves it to `Accumulating`; a successful readiness check latches
/// `Ready`; [`extract`](Self::extract) consumes the cycle and returns the
/// accumulator to `Uninitialized`.
///
/// Every operation takes the [`EntropyContext`] so cycles draw distinct
/// seeds and the background generator switch is honored. When the switch
/// is on, all four lifecycle operations act on the context's shared
/// instance instead of this one.
pub struct EntropyAccumulator {
    conditioner: Conditioner,
    algorithm: HashAlgorithm,
    min_iterations: u32,
    iterations: u32,
    state: AccumulatorState,
}

impl EntropyAccumulator {
    /// Creates an accumulator with the given configuration.
    ///
    /// No cycle starts until [`init`](Self::init) or the first
    /// [`step`](Self::step).
    pub fn new(config: AccumulatorConfig) -> Self {
        Self {
            conditioner: Conditioner::new(config.algorithm),
            algorithm: config.algorithm,
            min_iterations: config.min_iterations,
            iterations: 0,
            state: AccumulatorState::Uninitialized,
        }
    }

    /// Creates an accumulator with the default algorithm and a custom
    /// readiness threshold.
    pub fn with_min_iterations(min_iterations: u32) -> Self {
        Self::new(AccumulatorConfig {
            min_iterations,
            ..AccumulatorConfig::default()
        })
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> AccumulatorState {
        self.state
    }

    /// Returns the number of steps absorbed in the current cycle.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Returns the instance readiness threshold.
    pub fn min_iterations(&self) -> u32 {
        self.min_iterations
    }

    /// Returns the conditioning algorithm.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Begins a fresh accumulation cycle.
    ///
    /// Resets the hash state, absorbs the context's next seed as 4
    /// little-endian bytes and clears the step count. Any progress in the
    /// previous cycle is discarded.
    pub fn init(&mut self, ctx: &mut EntropyContext) {
        let (target, seeds) = ctx.route(self);
        target.begin_cycle(seeds.next_value());
    }

    /// Performs one accumulation step: one sample read, one hash write.
    ///
    /// Begins a cycle implicitly if none is in progress. Never loops and
    /// never blocks; embed it in the host's own scheduling. A source
    /// failure is propagated before any state changes, so an erroring
    /// call starts no cycle and draws no seed.
    pub fn step<S: NoiseSource>(
        &mut self,
        ctx: &mut EntropyContext,
        source: &mut S,
    ) -> Result<(), NoiseError> {
        // A failed read must leave the cycle and seed sequence untouched,
        // so sample before routing or the implicit init.
        let sample = source.sample()?;
        let (target, seeds) = ctx.route(self);
        if target.state == AccumulatorState::Uninitialized {
            target.begin_cycle(seeds.next_value());
        }
        target.conditioner.update(&[fold_sample(sample)]);
        target.iterations = target.iterations.saturating_add(1);
        tracing::trace!(iterations = target.iterations, "Accumulation step");
        Ok(())
    }

    /// Checks whether enough steps have accumulated, latching the outcome.
    ///
    /// `threshold` overrides the instance threshold for this call; `None`
    /// uses the instance's `min_iterations`, and `Some(0)` is honored as a
    /// real zero-step threshold. The override resolves against the calling
    /// instance even when the background generator routes the check
    /// elsewhere.
    ///
    /// Returns `false` without side effects if no cycle is in progress.
    /// Otherwise the comparison outcome is committed to the lifecycle
    /// state; this is a latching check, not a pure query.
    pub fn is_ready(&mut self, ctx: &mut EntropyContext, threshold: Option<u32>) -> bool {
        let threshold = threshold.unwrap_or(self.min_iterations);
        let (target, _) = ctx.route(self);
        target.check_ready(threshold)
    }

    /// Finalizes and returns the digest if the cycle is ready.
    ///
    /// Readiness is re-validated with the same latching logic as
    /// [`is_ready`](Self::is_ready), so extraction before the threshold
    /// yields `None` and leaves accumulation running. On success the hash
    /// is consumed and the accumulator returns to
    /// [`AccumulatorState::Uninitialized`]; a second call without an
    /// intervening cycle yields `None`.
    pub fn extract(&mut self, ctx: &mut EntropyContext, threshold: Option<u32>) -> Option<Digest> {
        let threshold = threshold.unwrap_or(self.min_iterations);
        let (target, _) = ctx.route(self);
        target.finalize_cycle(threshold)
    }

    fn begin_cycle(&mut self, seed: u32) {
        self.conditioner = Conditioner::new(self.algorithm);
        self.conditioner.update(&seed.to_le_bytes());
        self.iterations = 0;
        self.state = AccumulatorState::Accumulating;
        tracing::debug!(seed, "Accumulation cycle started");
    }

    fn check_ready(&mut self, threshold: u32) -> bool {
        if self.state == AccumulatorState::Uninitialized {
            return false;
        }
        let ready = self.iterations >= threshold;
        self.state = if ready {
            AccumulatorState::Ready
        } else {
            AccumulatorState::Accumulating
        };
        ready
    }

    fn finalize_cycle(&mut self, threshold: u32) -> Option<Digest> {
        if !self.check_ready(threshold) {
            tracing::debug!(
                iterations = self.iterations,
                threshold,
                "Extraction refused: not ready"
            );
            return None;
        }
        let conditioner =
            std::mem::replace(&mut self.conditioner, Conditioner::new(self.algorithm));
        tracing::debug!(iterations = self.iterations, "Digest extracted");
        self.state = AccumulatorState::Uninitialized;
        Some(conditioner.finalize())
    }
}

impl Default for EntropyAccumulator {
    fn default() -> Self {
        Self::new(AccumulatorConfig::default())
    }
}

impl std::fmt::Debug for EntropyAccumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntropyAccumulator")
            .field("state", &self.state)
            .field("iterations", &self.iterations)
            .field("min_iterations", &self.min_iterations)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
