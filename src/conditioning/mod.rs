//! Entropy conditioning via cryptographic hashing.
//!
//! This module turns biased, correlated noise bytes into uniformly
//! distributed output. It uses well-established cryptographic hash
//! functions, absorbed incrementally so accumulation can spread across
//! time.

mod hash;

pub use hash::{Conditioner, Digest, HashAlgorithm, DIGEST_LEN};
