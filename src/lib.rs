//! Analog Entropy Generation Library
//!
//! A true random number generator for noisy analog inputs. Raw samples
//! (ADC reads from a floating pin, timing jitter on hosted targets) are
//! folded into an incremental cryptographic hash one non-blocking step at
//! a time; once enough steps have accumulated, the digest is extracted as
//! 32 bytes of conditioned random output.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! source → accumulator (fold + count) → conditioning → generator
//! ```
//!
//! # Design Principles
//!
//! - **Non-blocking accumulation**: one step is one sample read and one
//!   hash write; the caller owns the schedule
//! - **Trust step counts, not entropy estimates**: readiness is an
//!   iteration threshold, never a measured quality claim
//! - **Uses standard primitives**: SHA-256/BLAKE3 for conditioning,
//!   ChaCha20 for seeded CSPRNGs
//! - **No uniformity claims about raw samples**: every output byte passes
//!   through the conditioner
//!
//! # Example
//!
//! ```
//! use analog_entropy::{
//!     accumulator::{EntropyAccumulator, EntropyContext},
//!     source::MockNoiseSource,
//! };
//!
//! let mut ctx = EntropyContext::new();
//! let mut source = MockNoiseSource::new();
//! let mut accumulator = EntropyAccumulator::with_min_iterations(64);
//!
//! // Interleave steps with the rest of the program until ready.
//! while !accumulator.is_ready(&mut ctx, None) {
//!     accumulator.step(&mut ctx, &mut source).unwrap();
//! }
//!
//! let digest = accumulator.extract(&mut ctx, None).unwrap();
//! assert_eq!(digest.as_bytes().len(), 32);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod accumulator;
pub mod conditioning;
pub mod config;
pub mod generator;
pub mod source;

// Re-export commonly used types at crate root
pub use accumulator::{
    fold_sample, AccumulatorConfig, AccumulatorState, EntropyAccumulator, EntropyContext,
    DEFAULT_MIN_ITERATIONS,
};
pub use conditioning::{Conditioner, Digest, HashAlgorithm, DIGEST_LEN};
pub use config::{ConfigError, EntropyConfig, FileConfig, OutputConfig};
pub use generator::{fill, fill_with_config, seed_rng, FillError, NoiseRng};
pub use source::{
    JitterNoiseSource, MockNoiseSource, NoiseError, NoiseSource, ScriptedNoiseSource,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
