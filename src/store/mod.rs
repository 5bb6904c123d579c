//! Record store backends.

pub mod memory;

use async_trait::async_trait;
use crate::types::{Network, NetworkId, Relation, CandidateBatch, GenealogyEdge, EdgeRef};

/// Trait for record store backends.
///
/// Implementations must honor the exclusion list exactly (never re-propose
/// an excluded id) and return an explicit empty batch when exhausted, never
/// a silent no-op. All methods are async to support async database access.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync;

    /// Propose candidate networks possibly related to `network`.
    ///
    /// Returns candidates in the store's preference order together with the
    /// grown exclusion set. `disable_index` asks the store to bypass its
    /// secondary index for this query; candidate semantics are unchanged.
    async fn possibly_related(
        &self,
        network: &Network,
        relation: Relation,
        exclude: &[NetworkId],
        disable_index: bool,
    ) -> Result<CandidateBatch, Self::Error>;

    /// Bulk-persist genealogy edges and return stable references.
    ///
    /// Idempotent per `(ancestor, descendant)` pair: loading the same edge
    /// twice must not duplicate it, and must return the same reference.
    async fn load_genealogies(&self, edges: &[GenealogyEdge]) -> Result<Vec<EdgeRef>, Self::Error>;
}

pub use memory::InMemoryRecordStore;
