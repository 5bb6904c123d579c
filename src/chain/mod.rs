//! Chain client seam for on-chain confirmation.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Block header as reported by a chain client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Height of the block.
    pub height: u64,
    /// Block hash (hex, `0x` prefix optional).
    pub hash: String,
}

impl BlockHeader {
    /// Create a new block header.
    pub fn new(height: u64, hash: impl Into<String>) -> Self {
        Self {
            height,
            hash: hash.into(),
        }
    }
}

/// Trait for read-only chain clients.
///
/// `Ok(None)` means the chain has no block at the requested height (a
/// legitimate non-match during validation); `Err` means the client itself
/// failed to answer (transport, timeout, RPC error) and must be surfaced
/// distinctly.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Error type for chain operations.
    type Error: std::error::Error + Send + Sync;

    /// Fetch the block header at `height`, if one exists.
    async fn block_by_number(&self, height: u64) -> Result<Option<BlockHeader>, Self::Error>;
}

pub use memory::InMemoryChain;
