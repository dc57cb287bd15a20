//! Noise sample acquisition.
//!
//! This module abstracts the physical noise channel behind a small trait
//! so the accumulation pipeline runs unchanged against real hardware,
//! host-side jitter, or scripted test input.

mod jitter;
mod noise;

pub use jitter::JitterNoiseSource;
pub use noise::{MockNoiseSource, NoiseError, NoiseSource, ScriptedNoiseSource};
