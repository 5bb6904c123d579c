//! In-memory chain client for testing.

use std::collections::BTreeMap;
use async_trait::async_trait;
use parking_lot::RwLock;

use super::{BlockHeader, ChainClient};

/// Error type for the in-memory chain client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InMemoryChainError {
    /// Injected failure, used to test error propagation.
    #[error("chain client unavailable")]
    Unavailable,
}

#[derive(Debug, Default)]
struct Inner {
    /// Block hash by height.
    blocks: BTreeMap<u64, String>,
    /// Heights queried so far, in arrival order.
    queried: Vec<u64>,
    fail: bool,
}

/// In-memory chain client for testing.
///
/// Holds a height → hash map; heights without an entry behave as a chain
/// shorter than the requested height (`Ok(None)`).
#[derive(Debug, Default)]
pub struct InMemoryChain {
    inner: RwLock<Inner>,
}

impl InMemoryChain {
    /// Create a new empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a block at `height` with the given hash.
    pub fn add_block(&self, height: u64, hash: impl Into<String>) {
        self.inner.write().blocks.insert(height, hash.into());
    }

    /// Make subsequent queries fail with [`InMemoryChainError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.write().fail = unavailable;
    }

    /// Heights queried so far, in arrival order.
    pub fn queried_heights(&self) -> Vec<u64> {
        self.inner.read().queried.clone()
    }
}

#[async_trait]
impl ChainClient for InMemoryChain {
    type Error = InMemoryChainError;

    async fn block_by_number(&self, height: u64) -> Result<Option<BlockHeader>, Self::Error> {
        let mut inner = self.inner.write();
        inner.queried.push(height);
        if inner.fail {
            return Err(InMemoryChainError::Unavailable);
        }
        Ok(inner
            .blocks
            .get(&height)
            .map(|hash| BlockHeader::new(height, hash.clone())))
    }
}
