//! ECDSA key management for the ledger
//!
//! Provides key pair generation, transaction signing, and signature
//! verification over the secp256k1 curve. Signatures are produced over a
//! 32-byte message digest (the transaction signing hash), never over raw
//! transaction bytes.

use rand::rngs::OsRng;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use thiserror::Error;

use super::address::to_address;
use super::hash::{hash160, sha256};

/// Compact ECDSA signature length in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Errors that can occur during key operations
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Invalid signature")]
    InvalidSignature,
}

/// A key pair consisting of a private key and its corresponding public key
#[derive(Clone)]
pub struct KeyPair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generate a new random key pair
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let (secret_key, public_key) = secp.generate_keypair(&mut OsRng);
        Self {
            secret_key,
            public_key,
        }
    }

    /// Create a key pair from an existing secret key
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let secp = Secp256k1::new();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        Self {
            secret_key,
            public_key,
        }
    }

    /// Derive a key pair deterministically from a seed string
    ///
    /// The SHA-256 of the seed is used as the secret scalar, so the same seed
    /// always yields the same key pair.
    pub fn from_seed(seed: &str) -> Result<Self, KeyError> {
        let digest = sha256(seed.as_bytes());
        let secret_key =
            SecretKey::from_slice(&digest).map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self::from_secret_key(secret_key))
    }

    /// Create a key pair from a hex-encoded private key
    pub fn from_private_key_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_key).map_err(|_| KeyError::InvalidPrivateKey)?;
        let secret_key =
            SecretKey::from_slice(&bytes).map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self::from_secret_key(secret_key))
    }

    /// Get the private key as a hex string
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key.secret_bytes())
    }

    /// Get the public key in compressed SEC1 form (33 bytes)
    pub fn public_key_bytes(&self) -> [u8; 33] {
        self.public_key.serialize()
    }

    /// Get the 20-byte hash of the compressed public key
    pub fn key_hash(&self) -> [u8; 20] {
        hash160(&self.public_key_bytes())
    }

    /// Get the Base58Check address for this key pair
    pub fn address(&self) -> String {
        to_address(&self.key_hash())
    }

    /// Sign a 32-byte message digest with the private key
    pub fn sign(&self, message_hash: &[u8; 32]) -> [u8; SIGNATURE_SIZE] {
        sign_message(&self.secret_key, message_hash)
    }

    /// Verify a signature against this key pair's public key
    pub fn verify(&self, message_hash: &[u8; 32], signature: &[u8]) -> bool {
        verify_signature(&self.public_key, message_hash, signature)
    }
}

/// Parse a compressed or uncompressed SEC1 public key
pub fn public_key_from_bytes(bytes: &[u8]) -> Result<PublicKey, KeyError> {
    PublicKey::from_slice(bytes).map_err(|_| KeyError::InvalidPublicKey)
}

/// Sign a 32-byte message digest, producing a compact 64-byte signature
pub fn sign_message(secret_key: &SecretKey, message_hash: &[u8; 32]) -> [u8; SIGNATURE_SIZE] {
    let secp = Secp256k1::new();
    let message = Message::from_digest(*message_hash);
    secp.sign_ecdsa(&message, secret_key).serialize_compact()
}

/// Verify a compact signature against a public key and message digest
///
/// Returns false for malformed signatures as well as valid-but-wrong ones;
/// verification failure is a rejection, not an error.
pub fn verify_signature(public_key: &PublicKey, message_hash: &[u8; 32], signature: &[u8]) -> bool {
    let secp = Secp256k1::new();
    let message = Message::from_digest(*message_hash);

    let Ok(sig) = secp256k1::ecdsa::Signature::from_compact(signature) else {
        return false;
    };

    secp.verify_ecdsa(&message, &sig, public_key).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pair_generation() {
        let kp = KeyPair::generate();
        assert_eq!(kp.public_key_bytes().len(), 33);
        assert!(!kp.address().is_empty());
    }

    #[test]
    fn test_sign_and_verify() {
        let kp = KeyPair::generate();
        let message_hash = sha256(b"spend output 0");

        let signature = kp.sign(&message_hash);
        assert!(kp.verify(&message_hash, &signature));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let kp = KeyPair::generate();
        let message_hash = sha256(b"spend output 0");

        let mut signature = kp.sign(&message_hash);
        signature[10] ^= 0x01;
        assert!(!kp.verify(&message_hash, &signature));
    }

    #[test]
    fn test_wrong_message_rejected() {
        let kp = KeyPair::generate();
        let signature = kp.sign(&sha256(b"message one"));
        assert!(!kp.verify(&sha256(b"message two"), &signature));
    }

    #[test]
    fn test_seed_derivation_is_deterministic() {
        let kp1 = KeyPair::from_seed("example_seed_string").unwrap();
        let kp2 = KeyPair::from_seed("example_seed_string").unwrap();
        assert_eq!(kp1.public_key_bytes(), kp2.public_key_bytes());
        assert_eq!(kp1.address(), kp2.address());

        let kp3 = KeyPair::from_seed("another_seed").unwrap();
        assert_ne!(kp1.public_key_bytes(), kp3.public_key_bytes());
    }

    #[test]
    fn test_key_pair_from_hex() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::from_private_key_hex(&kp1.private_key_hex()).unwrap();
        assert_eq!(kp1.public_key_bytes(), kp2.public_key_bytes());
        assert_eq!(kp1.address(), kp2.address());
    }
}
