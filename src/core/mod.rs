//! Core ledger components
//!
//! This module contains the ledger data model and its codecs:
//! - Transactions (coin and domain inputs/outputs, four wire variants)
//! - Blocks (header codec, merkle validation, genesis construction)
//! - P2PKH locking/unlocking scripts
//! - Domain-name payloads

pub mod block;
pub mod codec;
pub mod domain;
pub mod script;
pub mod transaction;

pub use block::{genesis_block, Block, BlockHeader, GenesisConfig, BLOCK_HEADER_SIZE};
pub use codec::{CodecError, MAX_ENTRY_COUNT, MAX_SCRIPT_SIZE};
pub use domain::{DomainError, FullDomain, MAX_DOMAIN_NAME_LEN, MAX_TLD_LEN};
pub use script::{
    lock_p2pkh, locking_script_key_hash, unlock_p2pkh, verify_p2pkh, ScriptError,
    OP_CHECKSIG, OP_DUP, OP_EQUALVERIFY, OP_HASH160, P2PKH_SCRIPT_SIZE,
};
pub use transaction::{
    CoinInput, CoinOutput, CoinbaseOutput, CoinbaseTransaction, DomainInput, DomainOutput,
    Transaction, TxType, COINBASE_OUTPUT_COIN, COINBASE_OUTPUT_DOMAIN, TX_VERSION,
};
