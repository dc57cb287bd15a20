//! Incremental cryptographic hash conditioning.
//!
//! Folded noise bytes are absorbed into a hash state one step at a time;
//! the finalized digest is the random output. Conditioning removes the
//! bias and structure of the raw samples, provided the hash is
//! cryptographic.

use blake3::Hasher as Blake3Hasher;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// Number of bytes in a conditioned digest (32 for both algorithms).
pub const DIGEST_LEN: usize = 32;

/// Supported hash algorithms for conditioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256 - widely deployed, conservative default.
    #[default]
    Sha256,
    /// BLAKE3 - fast alternative on hosts without SHA acceleration.
    Blake3,
}

/// Conditioned random output.
///
/// Fixed-size digest of one accumulation cycle, ready for use as random
/// bytes or key material.
#[derive(Clone)]
pub struct Digest {
    data: [u8; DIGEST_LEN],
}

impl Digest {
    /// Returns the digest bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.data
    }

    /// Consumes the digest, returning the bytes.
    #[inline]
    pub fn into_bytes(self) -> [u8; DIGEST_LEN] {
        self.data
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Digest bytes may become key material; keep them out of logs.
        f.debug_struct("Digest")
            .field("len", &DIGEST_LEN)
            .finish_non_exhaustive()
    }
}

/// Incremental entropy conditioner.
///
/// Owns the hash state by composition and exposes only the incremental
/// operations accumulation needs. Finalization consumes the conditioner;
/// a new accumulation cycle starts from a fresh instance.
pub struct Conditioner {
    inner: Inner,
}

enum Inner {
    Sha256(Sha256),
    Blake3(Blake3Hasher),
}

impl Conditioner {
    /// Creates a conditioner backed by the specified algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let inner = match algorithm {
            HashAlgorithm::Sha256 => Inner::Sha256(Sha256::new()),
            HashAlgorithm::Blake3 => Inner::Blake3(Blake3Hasher::new()),
        };
        Self { inner }
    }

    /// Absorbs bytes into the hash state.
    pub fn update(&mut self, bytes: &[u8]) {
        match &mut self.inner {
            Inner::Sha256(hasher) => hasher.update(bytes),
            Inner::Blake3(hasher) => {
                hasher.update(bytes);
            }
        }
    }

    /// Finalizes the hash, consuming the conditioner.
    pub fn finalize(self) -> Digest {
        let data = match self.inner {
            Inner::Sha256(hasher) => {
                let result = hasher.finalize();
                let mut data = [0u8; DIGEST_LEN];
                data.copy_from_slice(&result);
                data
            }
            Inner::Blake3(hasher) => *hasher.finalize().as_bytes(),
        };
        Digest { data }
    }

    /// Returns the algorithm backing this conditioner.
    pub fn algorithm(&self) -> HashAlgorithm {
        match self.inner {
            Inner::Sha256(_) => HashAlgorithm::Sha256,
            Inner::Blake3(_) => HashAlgorithm::Blake3,
        }
    }
}

impl Default for Conditioner {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

impl std::fmt::Debug for Conditioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conditioner")
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_matches_reference() {
        let mut conditioner = Conditioner::new(HashAlgorithm::Sha256);
        conditioner.update(b"raw noise bytes");
        let digest = conditioner.finalize();

        let mut reference = Sha256::new();
        reference.update(b"raw noise bytes");
        let expected: [u8; DIGEST_LEN] = reference.finalize().into();

        assert_eq!(digest.as_bytes(), &expected);
    }

    #[test]
    fn test_blake3_matches_reference() {
        let mut conditioner = Conditioner::new(HashAlgorithm::Blake3);
        conditioner.update(b"raw noise bytes");
        let digest = conditioner.finalize();

        let expected = blake3::hash(b"raw noise bytes");
        assert_eq!(digest.as_bytes(), expected.as_bytes());
    }

    #[test]
    fn test_incremental_updates_equivalent() {
        let mut whole = Conditioner::default();
        whole.update(&[0x01, 0x02, 0x03, 0x04]);

        let mut pieces = Conditioner::default();
        for byte in [0x01, 0x02, 0x03, 0x04] {
            pieces.update(&[byte]);
        }

        assert_eq!(whole.finalize().as_bytes(), pieces.finalize().as_bytes());
    }

    #[test]
    fn test_different_input_different_output() {
        let mut a = Conditioner::default();
        a.update(&[0x00; 16]);
        let mut b = Conditioner::default();
        b.update(&[0x01; 16]);

        assert_ne!(a.finalize().as_bytes(), b.finalize().as_bytes());
    }

    #[test]
    fn test_default_algorithm_is_sha256() {
        assert_eq!(Conditioner::default().algorithm(), HashAlgorithm::Sha256);
    }
}
