//! SHA-256 double-hashing and the block hash newtype.

use std::fmt;

use sha2::{Digest, Sha256};

/// Double SHA-256: SHA256(SHA256(data)).
///
/// Used for block header hashing, transaction ids, and merkle trees.
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut result = [0u8; 32];
    result.copy_from_slice(&second);
    result
}

/// A double SHA-256 hash in internal byte order.
///
/// Block explorers and the hardcoded constants in this crate display hashes
/// in reversed byte order; `Display` and `from_display_hex` take care of the
/// flip so callers never juggle orderings by hand.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockHash([u8; 32]);

impl BlockHash {
    /// The all-zero hash, used as the previous-block pointer of a genesis
    /// block and as the null outpoint of a coinbase input.
    pub const ZERO: BlockHash = BlockHash([0u8; 32]);

    /// Hash arbitrary bytes with double SHA-256.
    pub fn of(data: &[u8]) -> Self {
        BlockHash(double_sha256(data))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        BlockHash(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a hash from the display (reversed) hex form.
    pub fn from_display_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        if bytes.len() != 32 {
            return None;
        }
        let mut hash = [0u8; 32];
        for (i, b) in bytes.iter().enumerate() {
            hash[31 - i] = *b;
        }
        Some(BlockHash(hash))
    }

    /// Render in display byte order, the form block explorers print.
    pub fn to_display_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_hex())
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", self.to_display_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_sha256() {
        // Test vector: SHA256d("hello")
        let data = b"hello";
        let hash = double_sha256(data);

        let expected =
            hex::decode("9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50")
                .unwrap();
        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_display_hex_roundtrip() {
        let s = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
        let hash = BlockHash::from_display_hex(s).unwrap();
        assert_eq!(hash.to_display_hex(), s);
        // Internal order is reversed: the leading display zeros are the
        // trailing internal bytes.
        assert_eq!(hash.as_bytes()[31], 0x00);
        assert_eq!(hash.as_bytes()[0], 0x6f);
    }

    #[test]
    fn test_from_display_hex_rejects_bad_input() {
        assert!(BlockHash::from_display_hex("zz").is_none());
        assert!(BlockHash::from_display_hex("00ff").is_none());
    }
}
