//! Noise source abstraction.
//!
//! One trait method reads one raw sample from the underlying channel. On a
//! microcontroller that channel is a floating analog pin; on a development
//! host it is whatever substitute the application provides. Samples are
//! untrusted input: accumulation assumes only that they carry some
//! non-adversarial noise, never that they are uniform.

use thiserror::Error;

/// Errors that can occur while reading a noise source.
#[derive(Debug, Clone, Error)]
pub enum NoiseError {
    /// The underlying channel produced no sample.
    #[error("noise source unavailable: {0}")]
    Unavailable(String),
}

/// Trait for raw noise sample sources.
///
/// Implementations must return quickly: one call is one read, with no
/// internal retry loops, so that accumulation stays non-blocking.
pub trait NoiseSource {
    /// Reads one raw sample from the channel.
    fn sample(&mut self) -> Result<u16, NoiseError>;
}

/// Mock noise source for testing without hardware.
#[derive(Debug, Default)]
pub struct MockNoiseSource {
    sequence: u64,
}

impl MockNoiseSource {
    /// Creates a new mock noise source.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoiseSource for MockNoiseSource {
    fn sample(&mut self) -> Result<u16, NoiseError> {
        // Deterministic pattern confined to a 10-bit range, shaped like a
        // floating ADC pin. NOT entropy - only for testing the plumbing.
        let raw = self.sequence.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        self.sequence = self.sequence.wrapping_add(1);
        Ok(((raw >> 23) & 0x03FF) as u16)
    }
}

/// Replays a fixed list of samples, then fails.
///
/// Gives tests exact control over what accumulation sees. Once the script
/// is exhausted every read returns [`NoiseError::Unavailable`], which also
/// exercises error propagation.
#[derive(Debug, Clone)]
pub struct ScriptedNoiseSource {
    samples: Vec<u16>,
    position: usize,
}

impl ScriptedNoiseSource {
    /// Creates a source that yields `samples` in order.
    pub fn new(samples: Vec<u16>) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    /// Returns how many scripted samples remain.
    pub fn remaining(&self) -> usize {
        self.samples.len() - self.position
    }
}

impl NoiseSource for ScriptedNoiseSource {
    fn sample(&mut self) -> Result<u16, NoiseError> {
        match self.samples.get(self.position) {
            Some(&sample) => {
                self.position += 1;
                Ok(sample)
            }
            None => Err(NoiseError::Unavailable(
                "sample script exhausted".to_string(),
            )),
        }
    }
}
