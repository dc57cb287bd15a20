//! Buffer-fill driver.
//!
//! Drives an accumulator's step/extract loop to completion to fill whole
//! buffers. This is the one operation in the crate that blocks: it loops
//! internally until each digest is ready. Keep it off latency-sensitive
//! paths and drive [`EntropyAccumulator::step`] by hand there.

use crate::accumulator::{AccumulatorConfig, EntropyAccumulator, EntropyContext};
use crate::conditioning::DIGEST_LEN;
use crate::source::{NoiseError, NoiseSource};
use thiserror::Error;

/// Errors surfaced by the fill driver.
#[derive(Debug, Clone, Error)]
pub enum FillError {
    /// The noise source stopped yielding samples mid-fill.
    #[error(transparent)]
    NoiseSourceUnavailable(#[from] NoiseError),
}

/// Fills `buf` with conditioned random bytes.
///
/// Shorthand for [`fill_with_config`] using the default algorithm;
/// `min_iterations` of `None` keeps the default readiness threshold too.
pub fn fill<S: NoiseSource>(
    ctx: &mut EntropyContext,
    source: &mut S,
    buf: &mut [u8],
    min_iterations: Option<u32>,
) -> Result<(), FillError> {
    let mut config = AccumulatorConfig::default();
    if let Some(threshold) = min_iterations {
        config.min_iterations = threshold;
    }
    fill_with_config(ctx, source, buf, config)
}

/// Fills `buf` with conditioned random bytes from a configured accumulator.
///
/// A single fresh accumulator is stepped until ready and extracted, one
/// digest per `DIGEST_LEN`-sized chunk, until the buffer is full; the final
/// chunk copies only the bytes that fit. Every chunk is a full accumulation
/// cycle, so consecutive chunks mix distinct context seeds even if the
/// noise momentarily repeats.
///
/// Blocks until the buffer is filled. A source failure is surfaced
/// immediately and leaves the unfilled tail unspecified.
pub fn fill_with_config<S: NoiseSource>(
    ctx: &mut EntropyContext,
    source: &mut S,
    buf: &mut [u8],
    config: AccumulatorConfig,
) -> Result<(), FillError> {
    let mut accumulator = EntropyAccumulator::new(config);

    let mut offset = 0;
    while offset < buf.len() {
        let digest = loop {
            if let Some(digest) = accumulator.extract(ctx, None) {
                break digest;
            }
            accumulator.step(ctx, source)?;
        };

        let take = DIGEST_LEN.min(buf.len() - offset);
        let bytes = digest.into_bytes();
        buf[offset..offset + take].copy_from_slice(&bytes[..take]);
        tracing::trace!(chunk_bytes = take, "Fill chunk copied");
        // Advance by the full digest length even when the last copy was
        // partial; the loop condition bounds the next read.
        offset += DIGEST_LEN;
    }

    tracing::debug!(bytes = buf.len(), "Buffer filled with conditioned output");
    Ok(())
}
