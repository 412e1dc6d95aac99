//! Pay-to-public-key-hash locking and unlocking scripts
//!
//! Outputs are locked to a 20-byte public key hash with the classic 25-byte
//! P2PKH program; inputs unlock them with a length-prefixed signature and
//! public key. The verifier recognizes both layouts positionally, so there
//! is no script interpreter here.

use thiserror::Error;

use crate::crypto::{hash160, public_key_from_bytes, verify_signature};

pub const OP_DUP: u8 = 0x76;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_CHECKSIG: u8 = 0xac;

/// Length of a P2PKH locking script
pub const P2PKH_SCRIPT_SIZE: usize = 25;

/// Script construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Invalid key hash length: {0} bytes (expected 20)")]
    InvalidKeyHash(usize),
}

/// Build the 25-byte P2PKH locking script for a 20-byte key hash
///
/// `OP_DUP OP_HASH160 0x14 <hash> OP_EQUALVERIFY OP_CHECKSIG`
pub fn lock_p2pkh(key_hash: &[u8]) -> Result<[u8; P2PKH_SCRIPT_SIZE], ScriptError> {
    let hash: &[u8; 20] = key_hash
        .try_into()
        .map_err(|_| ScriptError::InvalidKeyHash(key_hash.len()))?;
    Ok(build_p2pkh(hash))
}

pub(crate) fn build_p2pkh(key_hash: &[u8; 20]) -> [u8; P2PKH_SCRIPT_SIZE] {
    let mut script = [0u8; P2PKH_SCRIPT_SIZE];
    script[0] = OP_DUP;
    script[1] = OP_HASH160;
    script[2] = 20;
    script[3..23].copy_from_slice(key_hash);
    script[23] = OP_EQUALVERIFY;
    script[24] = OP_CHECKSIG;
    script
}

/// Build an unlocking script: `len(sig):u8 | sig | len(pubkey):u8 | pubkey`
pub fn unlock_p2pkh(signature: &[u8], public_key: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(2 + signature.len() + public_key.len());
    script.push(signature.len() as u8);
    script.extend_from_slice(signature);
    script.push(public_key.len() as u8);
    script.extend_from_slice(public_key);
    script
}

/// Extract the embedded key hash from a well-formed P2PKH locking script
pub fn locking_script_key_hash(locking_script: &[u8]) -> Option<[u8; 20]> {
    if locking_script.len() != P2PKH_SCRIPT_SIZE
        || locking_script[0] != OP_DUP
        || locking_script[1] != OP_HASH160
        || locking_script[2] != 20
        || locking_script[23] != OP_EQUALVERIFY
        || locking_script[24] != OP_CHECKSIG
    {
        return None;
    }
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&locking_script[3..23]);
    Some(hash)
}

/// Split an unlocking script into its signature and public key
fn parse_unlocking(unlocking_script: &[u8]) -> Option<(&[u8], &[u8])> {
    let (&sig_len, rest) = unlocking_script.split_first()?;
    if rest.len() < sig_len as usize {
        return None;
    }
    let (signature, rest) = rest.split_at(sig_len as usize);

    let (&key_len, rest) = rest.split_first()?;
    if rest.len() != key_len as usize {
        return None;
    }

    Some((signature, rest))
}

/// Verify an unlocking script against a P2PKH locking script
///
/// Checks that the revealed public key hashes to the key hash embedded in
/// the locking script, then verifies the signature over `signing_hash`.
/// Any structural or cryptographic failure is reported as false; an invalid
/// input is a rejection, never a crash.
pub fn verify_p2pkh(unlocking_script: &[u8], locking_script: &[u8], signing_hash: &[u8; 32]) -> bool {
    let Some(expected_hash) = locking_script_key_hash(locking_script) else {
        log::debug!("malformed P2PKH locking script ({} bytes)", locking_script.len());
        return false;
    };

    let Some((signature, public_key)) = parse_unlocking(unlocking_script) else {
        log::debug!("malformed unlocking script ({} bytes)", unlocking_script.len());
        return false;
    };

    if hash160(public_key) != expected_hash {
        return false;
    }

    let Ok(public_key) = public_key_from_bytes(public_key) else {
        return false;
    };

    verify_signature(&public_key, signing_hash, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{sha256, KeyPair};

    #[test]
    fn test_lock_layout() {
        let script = lock_p2pkh(&[0x11; 20]).unwrap();
        assert_eq!(script.len(), 25);
        assert_eq!(script[0], OP_DUP);
        assert_eq!(script[1], OP_HASH160);
        assert_eq!(script[2], 20);
        assert_eq!(&script[3..23], &[0x11; 20]);
        assert_eq!(script[23], OP_EQUALVERIFY);
        assert_eq!(script[24], OP_CHECKSIG);
    }

    #[test]
    fn test_lock_rejects_wrong_hash_length() {
        assert_eq!(lock_p2pkh(&[0; 19]), Err(ScriptError::InvalidKeyHash(19)));
        assert_eq!(lock_p2pkh(&[0; 21]), Err(ScriptError::InvalidKeyHash(21)));
    }

    #[test]
    fn test_key_hash_extraction() {
        let script = lock_p2pkh(&[0x22; 20]).unwrap();
        assert_eq!(locking_script_key_hash(&script), Some([0x22; 20]));

        let mut tampered = script;
        tampered[24] = 0x00;
        assert_eq!(locking_script_key_hash(&tampered), None);
        assert_eq!(locking_script_key_hash(&script[..24]), None);
    }

    #[test]
    fn test_unlock_then_verify() {
        let kp = KeyPair::generate();
        let signing_hash = sha256(b"spend it");

        let locking = lock_p2pkh(&kp.key_hash()).unwrap();
        let unlocking = unlock_p2pkh(&kp.sign(&signing_hash), &kp.public_key_bytes());

        assert!(verify_p2pkh(&unlocking, &locking, &signing_hash));
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let owner = KeyPair::generate();
        let thief = KeyPair::generate();
        let signing_hash = sha256(b"spend it");

        let locking = lock_p2pkh(&owner.key_hash()).unwrap();
        let unlocking = unlock_p2pkh(&thief.sign(&signing_hash), &thief.public_key_bytes());

        assert!(!verify_p2pkh(&unlocking, &locking, &signing_hash));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let kp = KeyPair::generate();
        let signing_hash = sha256(b"spend it");
        let locking = lock_p2pkh(&kp.key_hash()).unwrap();
        let signature = kp.sign(&signing_hash);
        let pubkey = kp.public_key_bytes();

        // Tampered signature
        let mut bad_sig = signature;
        bad_sig[5] ^= 0x01;
        assert!(!verify_p2pkh(
            &unlock_p2pkh(&bad_sig, &pubkey),
            &locking,
            &signing_hash
        ));

        // Tampered public key
        let mut bad_key = pubkey;
        bad_key[10] ^= 0x01;
        assert!(!verify_p2pkh(
            &unlock_p2pkh(&signature, &bad_key),
            &locking,
            &signing_hash
        ));

        // Different signing hash
        assert!(!verify_p2pkh(
            &unlock_p2pkh(&signature, &pubkey),
            &locking,
            &sha256(b"something else")
        ));
    }

    #[test]
    fn test_verify_never_panics_on_garbage() {
        let signing_hash = sha256(b"x");
        assert!(!verify_p2pkh(&[], &[], &signing_hash));
        assert!(!verify_p2pkh(&[0xff; 3], &[0x00; 25], &signing_hash));
        assert!(!verify_p2pkh(&[200, 1, 2], &[0x76; 25], &signing_hash));
    }
}
