//! Basic blockchain types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CoreError, CoreResult};

/// Block height type (64-bit unsigned integer)
pub type BlockNumber = u64;

/// 32-byte hash type used for previous-block and merkle-root fields.
///
/// No hashing is performed anywhere in this prototype; the type only
/// carries values produced elsewhere (or the zero stub).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockHash([u8; 32]);

impl BlockHash {
    /// Create a new hash from a byte array
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying byte array
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Create from hex string
    pub fn from_hex(hex_str: &str) -> CoreResult<Self> {
        let bytes = hex::decode(hex_str)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidHash(hex_str.to_string()))?;
        Ok(Self(bytes))
    }

    /// Zero hash (all bytes are 0), used as the genesis previous-hash and
    /// as the merkle-root stub
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Whether this is the all-zero hash
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl Default for BlockHash {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_hash() {
        let hash = BlockHash::zero();
        assert!(hash.is_zero());
        assert_eq!(
            hash.to_hex(),
            "0000000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_hash_from_hex() {
        let hex = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";
        let hash = BlockHash::from_hex(hex).unwrap();
        assert_eq!(hash.to_hex(), hex);
        assert!(!hash.is_zero());
    }

    #[test]
    fn test_hash_from_hex_rejects_wrong_length() {
        assert!(BlockHash::from_hex("1234").is_err());
        assert!(BlockHash::from_hex("zz").is_err());
    }
}
