//! Namechain: ledger core for a coin and domain-name blockchain
//!
//! This crate provides the ledger data model and its codec/verification
//! pipeline:
//! - Canonical binary encoding/decoding of transactions and blocks
//! - Merkle-root commitment over ordered transaction sets
//! - P2PKH locking/unlocking scripts with ECDSA verification (secp256k1)
//! - Key derivation and Base58Check address encoding
//!
//! Everything here is pure and synchronous: no I/O, no shared mutable state,
//! safe to call concurrently over independent inputs. Persistence, peer
//! networking, proof-of-work, and UTXO indexing are external collaborators
//! that call in through these types.
//!
//! # Example
//!
//! ```rust
//! use namechain::core::{genesis_block, Block, CoinInput, CoinOutput, GenesisConfig, Transaction};
//! use namechain::wallet::Wallet;
//!
//! // The genesis block validates against its own merkle root
//! let genesis = genesis_block(&GenesisConfig::default());
//! assert!(genesis.validate());
//!
//! // Blocks and transactions round-trip through the binary codec
//! let decoded = Block::decode(&genesis.encode()).unwrap();
//! assert_eq!(decoded, genesis);
//!
//! // A wallet signs a transfer spending a prior output
//! let wallet = Wallet::new();
//! let mut tx = Transaction::transfer(
//!     vec![CoinInput::new([0u8; 32], 0, vec![]).unwrap()],
//!     vec![CoinOutput::new(2_500_000_000, wallet.locking_script().to_vec()).unwrap()],
//!     0,
//! )
//! .unwrap();
//! wallet.sign_transaction(&mut tx);
//! ```

pub mod core;
pub mod crypto;
pub mod storage;
pub mod wallet;

// Re-export commonly used types
pub use self::core::{
    genesis_block, Block, BlockHeader, CodecError, CoinInput, CoinOutput, CoinbaseTransaction,
    DomainInput, DomainOutput, FullDomain, GenesisConfig, Transaction, TxType,
};
pub use self::crypto::KeyPair;
pub use self::storage::{KeyValueStore, MemoryStore};
pub use self::wallet::Wallet;
