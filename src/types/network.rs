//! Network types for the genealogy kernel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a network record.
///
/// Opaque and store-assigned; the kernel never interprets its contents.
/// Implements `Ord` for deterministic ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NetworkId(String);

impl NetworkId {
    /// Create a NetworkId from a store-assigned string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NetworkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NetworkId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A block reference pinning a network to a point in chain history.
///
/// `height` orders networks; `hash` is the chain-level fingerprint used
/// for on-chain confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoricBlock {
    /// Block hash as reported by the chain (hex, `0x` prefix optional).
    pub hash: String,
    /// Block height.
    pub height: u64,
}

impl HistoricBlock {
    /// Create a new historic block reference.
    pub fn new(hash: impl Into<String>, height: u64) -> Self {
        Self {
            hash: hash.into(),
            height,
        }
    }

    /// Compare this block's hash against another hash string.
    ///
    /// Hashes are normalized before comparison: an optional `0x` prefix is
    /// stripped and the hex digits are lowercased. Malformed hex falls back
    /// to a case-insensitive string comparison rather than an error; a hash
    /// the chain could never have produced simply never matches.
    pub fn same_hash(&self, other: &str) -> bool {
        normalize_hash(&self.hash) == normalize_hash(other)
    }
}

/// Normalize a block hash for comparison.
fn normalize_hash(hash: &str) -> String {
    let trimmed = hash.trim();
    let digits = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")).unwrap_or(trimmed);
    match hex::decode(digits) {
        Ok(bytes) => hex::encode(bytes),
        Err(_) => digits.to_ascii_lowercase(),
    }
}

/// One recorded observation of a chain, pinned to a historic block.
///
/// Immutable once created; the kernel never mutates a network after it is
/// read from the store. Identity is the store-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    /// Store-assigned identifier.
    pub id: NetworkId,
    /// The block this observation is pinned to.
    pub historic_block: HistoricBlock,
}

impl Network {
    /// Create a new network record.
    pub fn new(id: impl Into<NetworkId>, historic_block: HistoricBlock) -> Self {
        Self {
            id: id.into(),
            historic_block,
        }
    }

    /// Block height of this observation.
    pub fn height(&self) -> u64 {
        self.historic_block.height
    }
}

// Identity-based equality: two records with the same id are the same network.
impl PartialEq for Network {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Network {}

impl PartialOrd for Network {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Network {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}
