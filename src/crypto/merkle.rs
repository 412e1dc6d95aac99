//! Merkle root computation over ordered transaction sets
//!
//! A block header commits to its transaction list through a single 32-byte
//! digest. Leaves are the double SHA-256 of each transaction's canonical
//! serialization; interior nodes combine adjacent digests left-to-right with
//! double SHA-256, duplicating the last digest when a level has an odd count.

use super::hash::double_sha256;

/// Digest of a single merkle leaf (a transaction's canonical bytes)
pub fn leaf_digest(tx_bytes: &[u8]) -> [u8; 32] {
    double_sha256(tx_bytes)
}

/// Calculate the merkle root from an ordered list of leaf digests
///
/// The caller's order is preserved: permuting the leaves changes the root.
/// An empty list commits to 32 zero bytes; a single leaf is its own root.
pub fn merkle_root(leaves: &[[u8; 32]]) -> [u8; 32] {
    if leaves.is_empty() {
        return [0u8; 32];
    }

    let mut current_level = leaves.to_vec();

    while current_level.len() > 1 {
        let mut next_level = Vec::with_capacity(current_level.len().div_ceil(2));

        for chunk in current_level.chunks(2) {
            // Odd level: the last digest is paired with itself
            let right = chunk.get(1).unwrap_or(&chunk[0]);

            let mut combined = [0u8; 64];
            combined[..32].copy_from_slice(&chunk[0]);
            combined[32..].copy_from_slice(right);
            next_level.push(double_sha256(&combined));
        }

        current_level = next_level;
    }

    current_level[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combine(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
        let mut data = [0u8; 64];
        data[..32].copy_from_slice(left);
        data[32..].copy_from_slice(right);
        double_sha256(&data)
    }

    #[test]
    fn test_empty_root_is_zero() {
        assert_eq!(merkle_root(&[]), [0u8; 32]);
    }

    #[test]
    fn test_single_leaf_is_root() {
        let leaf = leaf_digest(b"tx1");
        assert_eq!(merkle_root(&[leaf]), leaf);
    }

    #[test]
    fn test_two_leaves() {
        let h0 = leaf_digest(b"tx1");
        let h1 = leaf_digest(b"tx2");
        assert_eq!(merkle_root(&[h0, h1]), combine(&h0, &h1));
    }

    #[test]
    fn test_odd_count_duplicates_last() {
        let h0 = leaf_digest(b"tx1");
        let h1 = leaf_digest(b"tx2");
        let h2 = leaf_digest(b"tx3");

        let expected = combine(&combine(&h0, &h1), &combine(&h2, &h2));
        assert_eq!(merkle_root(&[h0, h1, h2]), expected);
    }

    #[test]
    fn test_order_sensitive() {
        let h0 = leaf_digest(b"tx1");
        let h1 = leaf_digest(b"tx2");
        assert_ne!(merkle_root(&[h0, h1]), merkle_root(&[h1, h0]));
    }
}
