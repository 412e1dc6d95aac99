//! Wire-format primitives shared by the transaction and block codecs
//!
//! All multi-byte integers on the wire are big-endian; every variable-length
//! byte field is preceded by a single unsigned length byte, capping scripts
//! at 255 bytes.

use thiserror::Error;

/// Maximum length of a variable byte field (1-byte length prefix)
pub const MAX_SCRIPT_SIZE: usize = 255;

/// Maximum number of entries in a count-prefixed list (1-byte count)
pub const MAX_ENTRY_COUNT: usize = 255;

/// Errors produced while decoding wire bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Truncated input: needed {needed} more bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },
    #[error("Invalid transaction type: {0}")]
    InvalidType(u8),
    #[error("Trailing garbage: {0} bytes left over after last complete record")]
    TrailingGarbage(usize),
    #[error("Script too long: {0} bytes (max {})", MAX_SCRIPT_SIZE)]
    ScriptTooLong(usize),
    #[error("Too many entries: {0} (max {})", MAX_ENTRY_COUNT)]
    TooManyEntries(usize),
    #[error("Block has transactions but no coinbase record")]
    MissingCoinbase,
}

/// Bounds-checked cursor over a byte buffer
///
/// Every read either consumes exactly the requested bytes or fails with
/// [`CodecError::TruncatedInput`]; decoders never index the buffer directly.
pub(crate) struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Total bytes consumed so far
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume exactly `n` bytes
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::TruncatedInput {
                needed: n - self.remaining(),
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        let bytes = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_be_bytes(buf))
    }

    pub fn read_hash32(&mut self) -> Result<[u8; 32], CodecError> {
        let bytes = self.take(32)?;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(bytes);
        Ok(hash)
    }

    pub fn read_key_hash(&mut self) -> Result<[u8; 20], CodecError> {
        let bytes = self.take(20)?;
        let mut hash = [0u8; 20];
        hash.copy_from_slice(bytes);
        Ok(hash)
    }

    /// Read a 1-byte length prefix followed by that many bytes
    pub fn read_var_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let len = self.read_u8()? as usize;
        Ok(self.take(len)?.to_vec())
    }
}

/// Append a 1-byte length prefix and the field bytes
///
/// Callers uphold the 255-byte cap at construction time.
pub(crate) fn write_var_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(bytes.len() as u8);
    out.extend_from_slice(bytes);
}

/// Validate a script against the wire-format size cap
pub(crate) fn check_script_len(script: &[u8]) -> Result<(), CodecError> {
    if script.len() > MAX_SCRIPT_SIZE {
        return Err(CodecError::ScriptTooLong(script.len()));
    }
    Ok(())
}

/// Validate a list length against the one-byte count cap
pub(crate) fn check_entry_count(len: usize) -> Result<(), CodecError> {
    if len > MAX_ENTRY_COUNT {
        return Err(CodecError::TooManyEntries(len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_are_big_endian() {
        let mut reader = ByteReader::new(&[0x00, 0x00, 0x01, 0x02]);
        assert_eq!(reader.read_u32().unwrap(), 0x0102);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_truncated_read_reports_shortfall() {
        let mut reader = ByteReader::new(&[0xaa, 0xbb]);
        assert_eq!(
            reader.read_u32(),
            Err(CodecError::TruncatedInput {
                needed: 2,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_var_bytes_round_trip() {
        let mut out = Vec::new();
        write_var_bytes(&mut out, &[1, 2, 3]);
        assert_eq!(out, vec![3, 1, 2, 3]);

        let mut reader = ByteReader::new(&out);
        assert_eq!(reader.read_var_bytes().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_var_bytes_truncated_body() {
        // Declares 5 bytes but only 2 follow
        let mut reader = ByteReader::new(&[5, 1, 2]);
        assert!(matches!(
            reader.read_var_bytes(),
            Err(CodecError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_entry_count_cap() {
        assert!(check_entry_count(255).is_ok());
        assert_eq!(check_entry_count(256), Err(CodecError::TooManyEntries(256)));
    }

    #[test]
    fn test_script_len_cap() {
        assert!(check_script_len(&[0u8; 255]).is_ok());
        assert_eq!(
            check_script_len(&[0u8; 256]),
            Err(CodecError::ScriptTooLong(256))
        );
    }
}
