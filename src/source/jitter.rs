//! Timing-jitter noise for hosted targets.
//!
//! When no analog pin is available (demos, development hosts), clock and
//! scheduler jitter stand in as a physical noise source. The quality is far
//! below a dedicated hardware channel; treat it as demonstration input, not
//! a vetted entropy source.

use std::time::Instant;

use super::{NoiseError, NoiseSource};

/// Noise source deriving samples from timer jitter.
///
/// Each sample spins over a burst of [`Instant`] reads and keeps the
/// least-significant bits of the elapsed nanoseconds, where clock and
/// scheduler jitter concentrates. Output is confined to a 10-bit range to
/// match a typical ADC.
#[derive(Debug)]
pub struct JitterNoiseSource {
    spin: u32,
}

impl JitterNoiseSource {
    /// Creates a jitter source with the default burst length.
    pub fn new() -> Self {
        Self { spin: 64 }
    }

    /// Creates a jitter source reading the clock `spin` times per sample.
    pub fn with_spin(spin: u32) -> Self {
        Self { spin: spin.max(1) }
    }
}

impl Default for JitterNoiseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for JitterNoiseSource {
    fn sample(&mut self) -> Result<u16, NoiseError> {
        let start = Instant::now();
        let mut acc: u64 = 0;
        for _ in 0..self.spin {
            acc = acc.wrapping_add(start.elapsed().as_nanos() as u64);
        }
        let nanos = start.elapsed().as_nanos() as u64;
        Ok(((nanos ^ acc) & 0x03FF) as u16)
    }
}
