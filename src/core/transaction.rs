//! Transaction model and binary codec
//!
//! Transactions move coins and domain ownership. Four variants share one
//! canonical wire layout, tagged by a one-byte type discriminant; the
//! coinbase has a distinct, shorter layout of its own (no inputs, no type
//! byte). All integers are big-endian and every script carries a one-byte
//! length prefix, so encoding is deterministic and decoding is its exact
//! inverse.

use serde::Serialize;

use crate::core::codec::{
    check_entry_count, check_script_len, write_var_bytes, ByteReader, CodecError,
};
use crate::crypto::double_sha256;

/// Current transaction version
pub const TX_VERSION: u32 = 1;

/// Discriminant byte tagging a coin output inside a coinbase transaction
pub const COINBASE_OUTPUT_COIN: u8 = 0x01;

/// Discriminant byte tagging a domain output inside a coinbase transaction
pub const COINBASE_OUTPUT_DOMAIN: u8 = 0x00;

// =============================================================================
// Transaction Type
// =============================================================================

/// One-byte transaction type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum TxType {
    /// Block reward transaction (distinct wire layout, see [`CoinbaseTransaction`])
    Coinbase = 0,
    /// Regular coin transfer
    Transfer = 1,
    /// Domain-name registration
    DomainRegistration = 2,
    /// Domain-name ownership transfer
    DomainTransfer = 3,
}

impl TxType {
    /// Parse a type byte, rejecting unknown discriminants
    pub fn from_byte(byte: u8) -> Result<Self, CodecError> {
        match byte {
            0 => Ok(TxType::Coinbase),
            1 => Ok(TxType::Transfer),
            2 => Ok(TxType::DomainRegistration),
            3 => Ok(TxType::DomainTransfer),
            other => Err(CodecError::InvalidType(other)),
        }
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Whether this type carries a trailing domain-input section
    pub fn has_domain_inputs(self) -> bool {
        matches!(self, TxType::DomainRegistration | TxType::DomainTransfer)
    }

    /// Whether this type carries a trailing domain-output section
    pub fn has_domain_outputs(self) -> bool {
        self == TxType::DomainRegistration
    }
}

// =============================================================================
// Inputs and Outputs
// =============================================================================

/// Reference to a prior transaction's coin output, with the unlocking
/// script that authorizes spending it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinInput {
    /// Id of the transaction holding the spent output
    #[serde(serialize_with = "hex::serde::serialize")]
    pub prev_txid: [u8; 32],
    /// Index of the output in the previous transaction
    pub output_index: u32,
    /// Unlocking script (at most 255 bytes)
    #[serde(serialize_with = "hex::serde::serialize")]
    pub unlocking_script: Vec<u8>,
}

impl CoinInput {
    pub fn new(
        prev_txid: [u8; 32],
        output_index: u32,
        unlocking_script: Vec<u8>,
    ) -> Result<Self, CodecError> {
        check_script_len(&unlocking_script)?;
        Ok(Self {
            prev_txid,
            output_index,
            unlocking_script,
        })
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.prev_txid);
        out.extend_from_slice(&self.output_index.to_be_bytes());
        write_var_bytes(out, &self.unlocking_script);
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let prev_txid = reader.read_hash32()?;
        let output_index = reader.read_u32()?;
        let unlocking_script = reader.read_var_bytes()?;
        Ok(Self {
            prev_txid,
            output_index,
            unlocking_script,
        })
    }
}

/// A spendable amount locked behind a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinOutput {
    /// Value in smallest units
    pub value: u64,
    /// Locking script (at most 255 bytes)
    #[serde(serialize_with = "hex::serde::serialize")]
    pub locking_script: Vec<u8>,
}

impl CoinOutput {
    pub fn new(value: u64, locking_script: Vec<u8>) -> Result<Self, CodecError> {
        check_script_len(&locking_script)?;
        Ok(Self {
            value,
            locking_script,
        })
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.value.to_be_bytes());
        write_var_bytes(out, &self.locking_script);
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let value = reader.read_u64()?;
        let locking_script = reader.read_var_bytes()?;
        Ok(Self {
            value,
            locking_script,
        })
    }
}

/// Reference to a domain-registration transaction, with the unlocking
/// script of the current domain owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainInput {
    /// Id of the domain-registration transaction
    #[serde(serialize_with = "hex::serde::serialize")]
    pub domain_txid: [u8; 32],
    /// Index of the domain output in that transaction
    pub output_index: u32,
    /// Unlocking script (at most 255 bytes)
    #[serde(serialize_with = "hex::serde::serialize")]
    pub unlocking_script: Vec<u8>,
}

impl DomainInput {
    pub fn new(
        domain_txid: [u8; 32],
        output_index: u32,
        unlocking_script: Vec<u8>,
    ) -> Result<Self, CodecError> {
        check_script_len(&unlocking_script)?;
        Ok(Self {
            domain_txid,
            output_index,
            unlocking_script,
        })
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.domain_txid);
        out.extend_from_slice(&self.output_index.to_be_bytes());
        write_var_bytes(out, &self.unlocking_script);
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let domain_txid = reader.read_hash32()?;
        let output_index = reader.read_u32()?;
        let unlocking_script = reader.read_var_bytes()?;
        Ok(Self {
            domain_txid,
            output_index,
            unlocking_script,
        })
    }
}

/// Direct assignment of domain ownership to a new key hash
///
/// Unlike coin outputs there is no locking-script indirection; the 20-byte
/// new-owner hash is the whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainOutput {
    #[serde(serialize_with = "hex::serde::serialize")]
    pub new_owner_key_hash: [u8; 20],
}

impl DomainOutput {
    pub fn new(new_owner_key_hash: [u8; 20]) -> Self {
        Self { new_owner_key_hash }
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.new_owner_key_hash);
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            new_owner_key_hash: reader.read_key_hash()?,
        })
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A non-coinbase ledger transaction
///
/// Wire layout (big-endian):
/// `version:u32 | tx_type:u8 | coin_input_count:u8 | coin_inputs |
/// coin_output_count:u8 | coin_outputs | lock_time:u32 |
/// domain sections (type-dependent, count byte always present)`.
///
/// The domain-input section exists for types 2 and 3, the domain-output
/// section for type 2 only; their count bytes are written even when zero so
/// the decoder can always locate the next field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub version: u32,
    pub tx_type: TxType,
    pub coin_inputs: Vec<CoinInput>,
    pub coin_outputs: Vec<CoinOutput>,
    pub lock_time: u32,
    pub domain_inputs: Vec<DomainInput>,
    pub domain_outputs: Vec<DomainOutput>,
}

impl Transaction {
    /// Create a regular coin transfer
    ///
    /// Every list is capped at 255 entries by the one-byte wire counts.
    pub fn transfer(
        coin_inputs: Vec<CoinInput>,
        coin_outputs: Vec<CoinOutput>,
        lock_time: u32,
    ) -> Result<Self, CodecError> {
        check_entry_count(coin_inputs.len())?;
        check_entry_count(coin_outputs.len())?;
        Ok(Self {
            version: TX_VERSION,
            tx_type: TxType::Transfer,
            coin_inputs,
            coin_outputs,
            lock_time,
            domain_inputs: Vec::new(),
            domain_outputs: Vec::new(),
        })
    }

    /// Create a domain-registration transaction
    pub fn domain_registration(
        coin_inputs: Vec<CoinInput>,
        coin_outputs: Vec<CoinOutput>,
        lock_time: u32,
        domain_inputs: Vec<DomainInput>,
        domain_outputs: Vec<DomainOutput>,
    ) -> Result<Self, CodecError> {
        check_entry_count(coin_inputs.len())?;
        check_entry_count(coin_outputs.len())?;
        check_entry_count(domain_inputs.len())?;
        check_entry_count(domain_outputs.len())?;
        Ok(Self {
            version: TX_VERSION,
            tx_type: TxType::DomainRegistration,
            coin_inputs,
            coin_outputs,
            lock_time,
            domain_inputs,
            domain_outputs,
        })
    }

    /// Create a domain-transfer transaction
    ///
    /// Ownership moves through the domain inputs; the type carries no
    /// domain-output section on the wire.
    pub fn domain_transfer(
        coin_inputs: Vec<CoinInput>,
        coin_outputs: Vec<CoinOutput>,
        lock_time: u32,
        domain_inputs: Vec<DomainInput>,
    ) -> Result<Self, CodecError> {
        check_entry_count(coin_inputs.len())?;
        check_entry_count(coin_outputs.len())?;
        check_entry_count(domain_inputs.len())?;
        Ok(Self {
            version: TX_VERSION,
            tx_type: TxType::DomainTransfer,
            coin_inputs,
            coin_outputs,
            lock_time,
            domain_inputs,
            domain_outputs: Vec::new(),
        })
    }

    /// Serialize to canonical wire bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.version.to_be_bytes());
        out.push(self.tx_type.as_byte());

        out.push(self.coin_inputs.len() as u8);
        for input in &self.coin_inputs {
            input.encode_into(&mut out);
        }

        out.push(self.coin_outputs.len() as u8);
        for output in &self.coin_outputs {
            output.encode_into(&mut out);
        }

        out.extend_from_slice(&self.lock_time.to_be_bytes());

        if self.tx_type.has_domain_inputs() {
            out.push(self.domain_inputs.len() as u8);
            for input in &self.domain_inputs {
                input.encode_into(&mut out);
            }
        }

        if self.tx_type.has_domain_outputs() {
            out.push(self.domain_outputs.len() as u8);
            for output in &self.domain_outputs {
                output.encode_into(&mut out);
            }
        }

        out
    }

    /// Decode one transaction from the front of `data`
    ///
    /// Returns the transaction and the number of bytes consumed; trailing
    /// bytes are the caller's concern.
    pub fn decode(data: &[u8]) -> Result<(Self, usize), CodecError> {
        let mut reader = ByteReader::new(data);
        let tx = Self::decode_from(&mut reader)?;
        Ok((tx, reader.consumed()))
    }

    pub(crate) fn decode_from(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let version = reader.read_u32()?;
        let tx_type = TxType::from_byte(reader.read_u8()?)?;

        let coin_input_count = reader.read_u8()?;
        let mut coin_inputs = Vec::with_capacity(coin_input_count as usize);
        for _ in 0..coin_input_count {
            coin_inputs.push(CoinInput::decode(reader)?);
        }

        let coin_output_count = reader.read_u8()?;
        let mut coin_outputs = Vec::with_capacity(coin_output_count as usize);
        for _ in 0..coin_output_count {
            coin_outputs.push(CoinOutput::decode(reader)?);
        }

        let lock_time = reader.read_u32()?;

        let mut domain_inputs = Vec::new();
        if tx_type.has_domain_inputs() {
            let count = reader.read_u8()?;
            domain_inputs.reserve(count as usize);
            for _ in 0..count {
                domain_inputs.push(DomainInput::decode(reader)?);
            }
        }

        let mut domain_outputs = Vec::new();
        if tx_type.has_domain_outputs() {
            let count = reader.read_u8()?;
            domain_outputs.reserve(count as usize);
            for _ in 0..count {
                domain_outputs.push(DomainOutput::decode(reader)?);
            }
        }

        Ok(Self {
            version,
            tx_type,
            coin_inputs,
            coin_outputs,
            lock_time,
            domain_inputs,
            domain_outputs,
        })
    }

    /// Transaction id: double SHA-256 of the canonical serialization
    pub fn txid(&self) -> [u8; 32] {
        double_sha256(&self.encode())
    }

    /// The digest that input signatures commit to
    ///
    /// Every unlocking script (coin and domain) is cleared before hashing, so
    /// a signature never signs over itself and remains reproducible.
    pub fn signing_hash(&self) -> [u8; 32] {
        let mut blanked = self.clone();
        for input in &mut blanked.coin_inputs {
            input.unlocking_script.clear();
        }
        for input in &mut blanked.domain_inputs {
            input.unlocking_script.clear();
        }
        double_sha256(&blanked.encode())
    }

    /// Sum of the produced coin output values
    pub fn total_output(&self) -> u64 {
        self.coin_outputs.iter().map(|o| o.value).sum()
    }

    /// Render the human-readable JSON projection
    ///
    /// Diagnostic view only; the binary codec is the sole parse source.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// =============================================================================
// Coinbase Transaction
// =============================================================================

/// An output of a coinbase transaction, tagged on the wire by a one-byte
/// discriminant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CoinbaseOutput {
    Coin(CoinOutput),
    Domain(DomainOutput),
}

impl CoinbaseOutput {
    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            CoinbaseOutput::Coin(output) => {
                out.push(COINBASE_OUTPUT_COIN);
                output.encode_into(out);
            }
            CoinbaseOutput::Domain(output) => {
                out.push(COINBASE_OUTPUT_DOMAIN);
                output.encode_into(out);
            }
        }
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        match reader.read_u8()? {
            COINBASE_OUTPUT_COIN => Ok(CoinbaseOutput::Coin(CoinOutput::decode(reader)?)),
            _ => Ok(CoinbaseOutput::Domain(DomainOutput::decode(reader)?)),
        }
    }
}

/// The block reward transaction
///
/// Coinbases have no inputs and no type byte; the layout is
/// `version:u32 | output_count:u8 | tagged outputs | lock_time:u32`. The
/// type is implied by position: a coinbase only ever appears as the first
/// transaction record of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinbaseTransaction {
    pub version: u32,
    pub outputs: Vec<CoinbaseOutput>,
    pub lock_time: u32,
}

impl CoinbaseTransaction {
    /// Create a coinbase; the output list is capped at 255 entries
    pub fn new(outputs: Vec<CoinbaseOutput>, lock_time: u32) -> Result<Self, CodecError> {
        check_entry_count(outputs.len())?;
        Ok(Self {
            version: TX_VERSION,
            outputs,
            lock_time,
        })
    }

    /// Serialize to canonical wire bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.version.to_be_bytes());
        out.push(self.outputs.len() as u8);
        for output in &self.outputs {
            output.encode_into(&mut out);
        }
        out.extend_from_slice(&self.lock_time.to_be_bytes());
        out
    }

    /// Decode one coinbase from the front of `data`, returning bytes consumed
    pub fn decode(data: &[u8]) -> Result<(Self, usize), CodecError> {
        let mut reader = ByteReader::new(data);
        let tx = Self::decode_from(&mut reader)?;
        Ok((tx, reader.consumed()))
    }

    pub(crate) fn decode_from(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let version = reader.read_u32()?;
        let output_count = reader.read_u8()?;

        let mut outputs = Vec::with_capacity(output_count as usize);
        for _ in 0..output_count {
            outputs.push(CoinbaseOutput::decode(reader)?);
        }

        let lock_time = reader.read_u32()?;
        Ok(Self {
            version,
            outputs,
            lock_time,
        })
    }

    /// Transaction id: double SHA-256 of the canonical serialization
    pub fn txid(&self) -> [u8; 32] {
        double_sha256(&self.encode())
    }

    /// Sum of the coin output values (the block reward)
    pub fn total_output(&self) -> u64 {
        self.outputs
            .iter()
            .map(|o| match o {
                CoinbaseOutput::Coin(output) => output.value,
                CoinbaseOutput::Domain(_) => 0,
            })
            .sum()
    }

    /// Render the human-readable JSON projection
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// =============================================================================
// Tests
// =============================================================================
