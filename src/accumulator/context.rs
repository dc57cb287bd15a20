//! Process-scoped accumulation context.
//!
//! Owns the state shared across accumulators: the seed sequence that
//! decorrelates accumulation cycles, and the optional shared background
//! accumulator. The application constructs one context and threads `&mut`
//! references through accumulator operations; exclusive access is what
//! upholds the single-logical-thread model. Sharing a context across
//! threads means wrapping it in a lock such as `std::sync::Mutex`.

use super::EntropyAccumulator;

/// Monotonic source of 4-byte cycle seeds.
///
/// Values repeat only by `u32` wraparound, which is accepted rather than
/// treated as an error: the seed decorrelates cycles, it is not entropy.
#[derive(Debug, Clone)]
pub(crate) struct SeedSequence {
    counter: u32,
}

impl SeedSequence {
    fn new(start: u32) -> Self {
        Self { counter: start }
    }

    /// Returns the current value and advances the sequence.
    pub(crate) fn next_value(&mut self) -> u32 {
        let value = self.counter;
        self.counter = self.counter.wrapping_add(1);
        value
    }

    fn current(&self) -> u32 {
        self.counter
    }
}

/// Shared state for one family of accumulators.
///
/// Every lifecycle operation takes `&mut EntropyContext`, both to draw
/// cycle seeds and to honor the background generator switch.
#[derive(Debug)]
pub struct EntropyContext {
    seeds: SeedSequence,
    background: Option<EntropyAccumulator>,
}

impl EntropyContext {
    /// Creates a context with the seed sequence starting at zero.
    pub fn new() -> Self {
        Self::with_seed_counter(0)
    }

    /// Creates a context with a chosen seed-sequence start.
    ///
    /// Fixing the start makes cycles reproducible in tests that also
    /// script the noise samples.
    pub fn with_seed_counter(start: u32) -> Self {
        Self {
            seeds: SeedSequence::new(start),
            background: None,
        }
    }

    /// Returns the value the next cycle seed will take.
    pub fn seed_counter(&self) -> u32 {
        self.seeds.current()
    }

    /// Installs a fresh shared background accumulator and returns the new
    /// switch state (always `true`).
    ///
    /// While enabled, lifecycle operations on every accumulator using this
    /// context act on the shared instance, so all call sites feed and
    /// drain one pool. Enabling again discards any progress in the
    /// previous shared instance.
    pub fn enable_background_generator(&mut self) -> bool {
        self.background = Some(EntropyAccumulator::default());
        tracing::info!("Background generator enabled");
        self.background_enabled()
    }

    /// Removes the shared background accumulator, if any, and returns the
    /// new switch state (always `false`).
    ///
    /// Accumulated progress in the shared instance is dropped.
    pub fn disable_background_generator(&mut self) -> bool {
        if self.background.take().is_some() {
            tracing::info!("Background generator disabled");
        }
        self.background_enabled()
    }

    /// Whether lifecycle operations currently route to the shared
    /// background instance.
    pub fn background_enabled(&self) -> bool {
        self.background.is_some()
    }

    /// Read-only view of the shared background accumulator, if enabled.
    pub fn background(&self) -> Option<&EntropyAccumulator> {
        self.background.as_ref()
    }

    /// Resolves which accumulator an operation acts on.
    ///
    /// The shared background instance wins when enabled; otherwise the
    /// caller's own. The seed sequence rides along for operations that
    /// begin cycles. Routing happens exactly once per public operation, so
    /// the target can never re-route to itself.
    pub(crate) fn route<'a>(
        &'a mut self,
        own: &'a mut EntropyAccumulator,
    ) -> (&'a mut EntropyAccumulator, &'a mut SeedSequence) {
        match self.background.as_mut() {
            Some(shared) => (shared, &mut self.seeds),
            None => (own, &mut self.seeds),
        }
    }
}

impl Default for EntropyContext {
    fn default() -> Self {
        Self::new()
    }
}
