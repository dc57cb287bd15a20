//! `rand_core` adapter and CSPRNG seeding.
//!
//! [`NoiseRng`] exposes the accumulation pipeline through the standard
//! [`RngCore`] interface so existing `rand` consumers can draw from it
//! directly. Throughput is bounded by the noise source; callers that need
//! volume should instead seed a fast CSPRNG once via [`seed_rng`] and draw
//! from that.

use crate::accumulator::{AccumulatorConfig, EntropyContext};
use crate::generator::{fill, fill_with_config, FillError};
use crate::source::NoiseSource;
use rand_core::{RngCore, SeedableRng};

/// Blocking random-byte generator over a noise source.
///
/// Owns its context and source; every draw runs the fill driver, so reads
/// block while entropy accumulates. `fill_bytes` panics if the source
/// fails; use `try_fill_bytes` where failure must be handled.
pub struct NoiseRng<S: NoiseSource> {
    ctx: EntropyContext,
    source: S,
    config: AccumulatorConfig,
}

impl<S: NoiseSource> NoiseRng<S> {
    /// Creates a generator with default accumulator settings.
    pub fn new(source: S) -> Self {
        Self::with_config(source, AccumulatorConfig::default())
    }

    /// Creates a generator with custom accumulator settings.
    pub fn with_config(source: S, config: AccumulatorConfig) -> Self {
        Self {
            ctx: EntropyContext::new(),
            source,
            config,
        }
    }

    /// Creates a generator with the default algorithm and a custom
    /// readiness threshold per digest.
    pub fn with_min_iterations(source: S, min_iterations: u32) -> Self {
        Self::with_config(
            source,
            AccumulatorConfig {
                min_iterations,
                ..AccumulatorConfig::default()
            },
        )
    }

    /// Consumes the generator, returning the noise source.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: NoiseSource> RngCore for NoiseRng<S> {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.try_fill_bytes(dest) {
            panic!("noise source failed mid-fill: {}", err);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        fill_with_config(&mut self.ctx, &mut self.source, dest, self.config)
            .map_err(rand_core::Error::new)
    }
}

impl<S: NoiseSource> std::fmt::Debug for NoiseRng<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseRng")
            .field("config", &self.config)
            .field("seed_counter", &self.ctx.seed_counter())
            .finish_non_exhaustive()
    }
}

/// Seeds a CSPRNG from harvested entropy.
///
/// Fills `R::Seed` through the fill driver and constructs the generator.
/// This bridges the slow true-random pipeline to a fast stream cipher such
/// as `rand_chacha::ChaCha20Rng`: harvest once, then draw at memory speed.
/// Blocks like [`fill`].
pub fn seed_rng<R, S>(
    ctx: &mut EntropyContext,
    source: &mut S,
    min_iterations: Option<u32>,
) -> Result<R, FillError>
where
    R: SeedableRng,
    S: NoiseSource,
{
    let mut seed = R::Seed::default();
    fill(ctx, source, seed.as_mut(), min_iterations)?;
    tracing::info!(
        seed_bytes = seed.as_mut().len(),
        "CSPRNG seeded from noise source"
    );
    Ok(R::from_seed(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MockNoiseSource, ScriptedNoiseSource};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_fill_bytes_draws_output() {
        let mut rng = NoiseRng::with_min_iterations(MockNoiseSource::new(), 2);
        let mut buf = [0u8; 48];
        rng.fill_bytes(&mut buf);
        assert_ne!(buf, [0u8; 48]);
    }

    #[test]
    fn test_next_u64_draws_fresh_cycles() {
        let mut rng = NoiseRng::with_min_iterations(MockNoiseSource::new(), 1);
        assert_ne!(rng.next_u64(), rng.next_u64());
    }

    #[test]
    fn test_try_fill_bytes_surfaces_source_failure() {
        let mut rng = NoiseRng::with_min_iterations(ScriptedNoiseSource::new(vec![0x0042]), 4);
        let mut buf = [0u8; 32];
        assert!(rng.try_fill_bytes(&mut buf).is_err());
    }

    #[test]
    fn test_into_source_returns_the_source() {
        let rng = NoiseRng::new(ScriptedNoiseSource::new(vec![1, 2, 3]));
        assert_eq!(rng.into_source().remaining(), 3);
    }

    #[test]
    fn test_seed_rng_is_deterministic_for_scripted_noise() {
        let run = || {
            let mut ctx = EntropyContext::new();
            let mut source = ScriptedNoiseSource::new(vec![0x0042; 2]);
            let mut rng: ChaCha20Rng = seed_rng(&mut ctx, &mut source, Some(2)).unwrap();
            rng.next_u64()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_seed_rng_surfaces_source_failure() {
        let mut ctx = EntropyContext::new();
        let mut source = ScriptedNoiseSource::new(vec![]);
        let result: Result<ChaCha20Rng, _> = seed_rng(&mut ctx, &mut source, Some(1));
        assert!(result.is_err());
    }
}
