//! Cryptographic hashing primitives for the ledger
//!
//! Provides the SHA-256 and RIPEMD-160 based digests used for transaction
//! identifiers, block hashes, merkle commitments, and public key hashing.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Computes the SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes double SHA-256 (SHA-256 of SHA-256)
///
/// Used for transaction ids, block hashes, and merkle node digests.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Computes RIPEMD-160(SHA-256(data)), the 20-byte public key hash
/// embedded in P2PKH locking scripts and addresses
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(sha256(data));
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let hash = sha256(b"hello world");
        assert_eq!(
            hex::encode(hash),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_double_sha256_is_sha256_twice() {
        let data = b"hello world";
        assert_eq!(double_sha256(data), sha256(&sha256(data)));
    }

    #[test]
    fn test_hash160_length_and_determinism() {
        let a = hash160(b"some public key bytes");
        let b = hash160(b"some public key bytes");
        assert_eq!(a, b);
        assert_ne!(a, hash160(b"other bytes"));
    }
}
