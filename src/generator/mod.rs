//! Random output generation.
//!
//! Drives accumulators to produce arbitrary-length output: a blocking
//! buffer-fill driver, a [`rand_core`] adapter over it, and a bridge for
//! seeding fast CSPRNGs from harvested entropy.

mod fill;
mod rng;

pub use fill::{fill, fill_with_config, FillError};
pub use rng::{seed_rng, NoiseRng};
