//! Wallet implementation for the ledger
//!
//! Holds a key pair and signs transactions: the blanked signing hash is
//! computed once, then every input receives an unlocking script built from
//! the signature and the wallet's public key. Balance tracking and UTXO
//! selection belong to the external ledger-state collaborator.

use thiserror::Error;

use crate::core::script::{build_p2pkh, unlock_p2pkh, P2PKH_SCRIPT_SIZE};
use crate::core::transaction::Transaction;
use crate::crypto::{KeyError, KeyPair};

/// Wallet-related errors
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Key error: {0}")]
    Key(#[from] KeyError),
}

/// A wallet for managing a key pair and authorizing spends
pub struct Wallet {
    key_pair: KeyPair,
    /// Optional label for the wallet
    pub label: Option<String>,
}

impl Wallet {
    /// Create a new wallet with a fresh key pair
    pub fn new() -> Self {
        Self {
            key_pair: KeyPair::generate(),
            label: None,
        }
    }

    /// Derive a wallet deterministically from a seed string
    pub fn from_seed(seed: &str) -> Result<Self, WalletError> {
        Ok(Self {
            key_pair: KeyPair::from_seed(seed)?,
            label: None,
        })
    }

    /// Import a wallet from a hex-encoded private key
    pub fn from_private_key_hex(hex_key: &str) -> Result<Self, WalletError> {
        Ok(Self {
            key_pair: KeyPair::from_private_key_hex(hex_key)?,
            label: None,
        })
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// The wallet's Base58Check address
    pub fn address(&self) -> String {
        self.key_pair.address()
    }

    /// The 20-byte hash of the wallet's public key
    pub fn key_hash(&self) -> [u8; 20] {
        self.key_pair.key_hash()
    }

    /// The P2PKH locking script paying to this wallet
    pub fn locking_script(&self) -> [u8; P2PKH_SCRIPT_SIZE] {
        build_p2pkh(&self.key_hash())
    }

    /// Sign every input of a transaction with this wallet's key
    ///
    /// The signing hash is taken over the transaction with all unlocking
    /// scripts blanked, so installing the signatures does not invalidate
    /// them.
    pub fn sign_transaction(&self, tx: &mut Transaction) {
        let signing_hash = tx.signing_hash();
        let signature = self.key_pair.sign(&signing_hash);
        let unlocking_script = unlock_p2pkh(&signature, &self.key_pair.public_key_bytes());

        for input in &mut tx.coin_inputs {
            input.unlocking_script = unlocking_script.clone();
        }
        for input in &mut tx.domain_inputs {
            input.unlocking_script = unlocking_script.clone();
        }
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::script::verify_p2pkh;
    use crate::core::transaction::{CoinInput, CoinOutput};
    use crate::crypto::from_address;

    #[test]
    fn test_address_round_trip() {
        let wallet = Wallet::new();
        assert_eq!(from_address(&wallet.address()).unwrap(), wallet.key_hash());
    }

    #[test]
    fn test_seeded_wallet_is_deterministic() {
        let a = Wallet::from_seed("example_seed_string").unwrap();
        let b = Wallet::from_seed("example_seed_string").unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn test_sign_transaction_verifies_against_own_script() {
        let wallet = Wallet::new();
        let mut tx = Transaction::transfer(
            vec![
                CoinInput::new([1; 32], 0, vec![]).unwrap(),
                CoinInput::new([2; 32], 3, vec![]).unwrap(),
            ],
            vec![CoinOutput::new(2_500_000_000, wallet.locking_script().to_vec()).unwrap()],
            0,
        )
        .unwrap();

        wallet.sign_transaction(&mut tx);

        // Signed transaction still round-trips unchanged
        let (decoded, _) = Transaction::decode(&tx.encode()).unwrap();
        assert_eq!(decoded, tx);

        let signing_hash = tx.signing_hash();
        for input in &tx.coin_inputs {
            assert!(verify_p2pkh(
                &input.unlocking_script,
                &wallet.locking_script(),
                &signing_hash
            ));
        }

        // A different wallet's locking script must not verify
        let other = Wallet::new();
        assert!(!verify_p2pkh(
            &tx.coin_inputs[0].unlocking_script,
            &other.locking_script(),
            &signing_hash
        ));
    }
}
