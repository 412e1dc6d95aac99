//! Base58Check address encoding
//!
//! An address is the Base58Check rendering of a version byte followed by the
//! 20-byte public key hash, with a 4-byte double SHA-256 checksum appended.
//! The mapping key hash -> address is deterministic; decoding validates the
//! checksum before handing the key hash back.

use thiserror::Error;

use super::hash::double_sha256;

/// Version byte for P2PKH addresses
pub const ADDRESS_VERSION: u8 = 0x00;

/// Decoded payload length: version byte + key hash + checksum
const PAYLOAD_SIZE: usize = 1 + 20 + 4;

/// Address decoding errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid address encoding")]
    InvalidEncoding,
    #[error("Address checksum mismatch")]
    ChecksumMismatch,
}

/// Encode a 20-byte public key hash as a Base58Check address
pub fn to_address(key_hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(PAYLOAD_SIZE);
    payload.push(ADDRESS_VERSION);
    payload.extend_from_slice(key_hash);

    let checksum = double_sha256(&payload);
    payload.extend_from_slice(&checksum[..4]);

    bs58::encode(payload).into_string()
}

/// Decode a Base58Check address back to its 20-byte public key hash
///
/// Fails with [`AddressError::InvalidEncoding`] on non-Base58 input, wrong
/// payload length, or an unknown version byte, and with
/// [`AddressError::ChecksumMismatch`] when the embedded checksum does not
/// match the payload.
pub fn from_address(address: &str) -> Result<[u8; 20], AddressError> {
    let payload = bs58::decode(address)
        .into_vec()
        .map_err(|_| AddressError::InvalidEncoding)?;

    if payload.len() != PAYLOAD_SIZE {
        return Err(AddressError::InvalidEncoding);
    }

    let (versioned, checksum) = payload.split_at(PAYLOAD_SIZE - 4);
    let expected = double_sha256(versioned);
    if checksum != &expected[..4] {
        return Err(AddressError::ChecksumMismatch);
    }

    if versioned[0] != ADDRESS_VERSION {
        return Err(AddressError::InvalidEncoding);
    }

    let mut key_hash = [0u8; 20];
    key_hash.copy_from_slice(&versioned[1..]);
    Ok(key_hash)
}
