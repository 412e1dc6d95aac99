//! Cryptographic utilities for the ledger
//!
//! This module provides:
//! - SHA-256 / RIPEMD-160 hashing
//! - ECDSA key management (secp256k1)
//! - Merkle root computation
//! - Base58Check address encoding

pub mod address;
pub mod hash;
pub mod keys;
pub mod merkle;

pub use address::{from_address, to_address, AddressError, ADDRESS_VERSION};
pub use hash::{double_sha256, hash160, sha256};
pub use keys::{
    public_key_from_bytes, sign_message, verify_signature, KeyError, KeyPair, SIGNATURE_SIZE,
};
pub use merkle::{leaf_digest, merkle_root};
