//! Block structure, binary codec, and merkle validation
//!
//! A block is an 80-byte header followed by the concatenated canonical
//! encodings of its transactions, with no transaction count: decoding
//! consumes records until the buffer is exhausted. The header commits to the
//! transaction list through its merkle root.

use serde::Serialize;

use crate::core::codec::{ByteReader, CodecError};
use crate::core::script::build_p2pkh;
use crate::core::transaction::{
    CoinOutput, CoinbaseOutput, CoinbaseTransaction, Transaction, TX_VERSION,
};
use crate::crypto::{double_sha256, leaf_digest, merkle_root};

/// Wire size of a block header in bytes
pub const BLOCK_HEADER_SIZE: usize = 80;

/// Block header committing to the previous block, the transaction set,
/// and the proof parameters supplied by the consensus layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockHeader {
    pub version: u32,
    #[serde(serialize_with = "hex::serde::serialize")]
    pub previous_hash: [u8; 32],
    #[serde(serialize_with = "hex::serde::serialize")]
    pub merkle_root: [u8; 32],
    /// Creation time, seconds since the Unix epoch
    pub timestamp: u32,
    /// Difficulty target in compact form
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    /// Serialize the fixed 80-byte header
    pub fn encode(&self) -> [u8; BLOCK_HEADER_SIZE] {
        let mut out = [0u8; BLOCK_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_be_bytes());
        out[4..36].copy_from_slice(&self.previous_hash);
        out[36..68].copy_from_slice(&self.merkle_root);
        out[68..72].copy_from_slice(&self.timestamp.to_be_bytes());
        out[72..76].copy_from_slice(&self.bits.to_be_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_be_bytes());
        out
    }

    fn decode_from(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            version: reader.read_u32()?,
            previous_hash: reader.read_hash32()?,
            merkle_root: reader.read_hash32()?,
            timestamp: reader.read_u32()?,
            bits: reader.read_u32()?,
            nonce: reader.read_u32()?,
        })
    }

    /// Block hash: double SHA-256 of the serialized header
    pub fn hash(&self) -> [u8; 32] {
        double_sha256(&self.encode())
    }
}

/// A block: header, optional coinbase, and ordered standard transactions
///
/// The coinbase uses a distinct wire layout without a type byte, so its
/// position carries the tag: when a block has any transactions at all, the
/// first record on the wire is the coinbase. Holding it in a dedicated field
/// also enforces "at most one coinbase per block" by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub header: BlockHeader,
    pub coinbase: Option<CoinbaseTransaction>,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Assemble a block over a transaction set, computing the merkle root
    ///
    /// The proof parameters (`previous_hash`, `bits`, `nonce`) come from the
    /// consensus collaborator; this constructor only commits to the
    /// transactions.
    ///
    /// The first record on the wire is always read back as a coinbase, so a
    /// block carrying standard transactions without one would not survive a
    /// decode; such a combination is rejected with
    /// [`CodecError::MissingCoinbase`].
    pub fn assemble(
        version: u32,
        previous_hash: [u8; 32],
        timestamp: u32,
        bits: u32,
        nonce: u32,
        coinbase: Option<CoinbaseTransaction>,
        transactions: Vec<Transaction>,
    ) -> Result<Self, CodecError> {
        if coinbase.is_none() && !transactions.is_empty() {
            return Err(CodecError::MissingCoinbase);
        }
        let mut block = Self {
            header: BlockHeader {
                version,
                previous_hash,
                merkle_root: [0u8; 32],
                timestamp,
                bits,
                nonce,
            },
            coinbase,
            transactions,
        };
        block.header.merkle_root = block.compute_merkle_root();
        Ok(block)
    }

    /// Serialize the header followed by every transaction's canonical bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.header.encode());
        if let Some(coinbase) = &self.coinbase {
            out.extend_from_slice(&coinbase.encode());
        }
        for tx in &self.transactions {
            out.extend_from_slice(&tx.encode());
        }
        out
    }

    /// Decode a block from a complete byte buffer
    ///
    /// Reads the fixed header, then the first record as a coinbase and every
    /// following record as a standard transaction until the buffer is
    /// exhausted. A record that starts but cannot complete fails with
    /// [`CodecError::TrailingGarbage`].
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut reader = ByteReader::new(data);
        let header = BlockHeader::decode_from(&mut reader)?;

        let mut coinbase = None;
        let mut transactions = Vec::new();
        while !reader.is_empty() {
            let remaining = reader.remaining();
            let record = if coinbase.is_none() && transactions.is_empty() {
                CoinbaseTransaction::decode_from(&mut reader).map(|tx| coinbase = Some(tx))
            } else {
                Transaction::decode_from(&mut reader).map(|tx| transactions.push(tx))
            };

            if let Err(err) = record {
                log::warn!("undecodable transaction record in block: {err}");
                return Err(match err {
                    CodecError::TruncatedInput { .. } => CodecError::TrailingGarbage(remaining),
                    other => other,
                });
            }
        }

        Ok(Self {
            header,
            coinbase,
            transactions,
        })
    }

    /// Leaf digests of the transaction set, coinbase first, order preserved
    fn merkle_leaves(&self) -> Vec<[u8; 32]> {
        let mut leaves = Vec::with_capacity(self.tx_count());
        if let Some(coinbase) = &self.coinbase {
            leaves.push(leaf_digest(&coinbase.encode()));
        }
        for tx in &self.transactions {
            leaves.push(leaf_digest(&tx.encode()));
        }
        leaves
    }

    /// Recompute the merkle root over this block's transactions
    pub fn compute_merkle_root(&self) -> [u8; 32] {
        merkle_root(&self.merkle_leaves())
    }

    /// Check that the header's merkle root matches the transaction set
    pub fn validate(&self) -> bool {
        let computed = self.compute_merkle_root();
        if computed != self.header.merkle_root {
            log::warn!(
                "merkle root mismatch: header {}, computed {}",
                hex::encode(self.header.merkle_root),
                hex::encode(computed)
            );
            return false;
        }
        true
    }

    /// Block hash (the header hash)
    pub fn hash(&self) -> [u8; 32] {
        self.header.hash()
    }

    /// Number of transactions, coinbase included
    pub fn tx_count(&self) -> usize {
        self.transactions.len() + usize::from(self.coinbase.is_some())
    }

    /// Render the human-readable JSON projection
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// =============================================================================
// Genesis
// =============================================================================

/// Parameters of the genesis block
#[derive(Debug, Clone)]
pub struct GenesisConfig {
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
    /// Reward paid by the genesis coinbase, in smallest units
    pub reward: u64,
    /// Key hash the reward is locked to
    pub recipient: [u8; 20],
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            timestamp: 1_234_567_890,
            bits: 0x1d00ffff,
            nonce: 2_083_236_893,
            reward: 5_000_000_000,
            recipient: [0u8; 20],
        }
    }
}

/// Build the genesis block from its configuration
///
/// An ordinary [`Block`] value: one coinbase paying the reward to a P2PKH
/// script, a zero previous hash, and a real merkle root over that single
/// transaction.
pub fn genesis_block(config: &GenesisConfig) -> Block {
    let reward_output = CoinOutput {
        value: config.reward,
        locking_script: build_p2pkh(&config.recipient).to_vec(),
    };
    // Built literally rather than through the fallible constructors: a
    // single-output coinbase is always within the wire-format caps.
    let coinbase = CoinbaseTransaction {
        version: TX_VERSION,
        outputs: vec![CoinbaseOutput::Coin(reward_output)],
        lock_time: 0,
    };

    let mut block = Block {
        header: BlockHeader {
            version: 1,
            previous_hash: [0u8; 32],
            merkle_root: [0u8; 32],
            timestamp: config.timestamp,
            bits: config.bits,
            nonce: config.nonce,
        },
        coinbase: Some(coinbase),
        transactions: Vec::new(),
    };
    block.header.merkle_root = block.compute_merkle_root();
    block
}

// =============================================================================
// Tests
// =============================================================================
