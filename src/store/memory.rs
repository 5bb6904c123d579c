//! In-memory record store for testing.

use std::collections::BTreeMap;
use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::types::{Network, NetworkId, Relation, CandidateBatch, GenealogyEdge, EdgeRef};
use super::RecordStore;

/// Error type for the in-memory store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InMemoryStoreError {
    /// Injected failure, used to test error propagation.
    #[error("record store unavailable")]
    Unavailable,
}

/// One recorded `possibly_related` query, kept for test assertions.
#[derive(Debug, Clone)]
pub struct QueryRecord {
    /// The network the query was issued for.
    pub network: NetworkId,
    /// Requested relation direction.
    pub relation: Relation,
    /// Exclusion list as received.
    pub exclude: Vec<NetworkId>,
    /// Whether the secondary index was disabled for this query.
    pub disable_index: bool,
}

#[derive(Debug, Default)]
struct Inner {
    /// Known networks by id.
    networks: BTreeMap<NetworkId, Network>,
    /// Persisted edges and their store-assigned references.
    genealogies: BTreeMap<GenealogyEdge, EdgeRef>,
    /// Log of received relation queries.
    queries: Vec<QueryRecord>,
    /// Fail the next operations when set.
    fail: bool,
}

/// In-memory record store for testing.
///
/// Uses BTreeMap for deterministic iteration order. Ancestor candidates are
/// proposed nearest-first (descending height), descendant candidates
/// ascending, ties broken by id. `batch_size` caps candidates per query so
/// searches exercise multiple iterations.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    inner: RwLock<Inner>,
    batch_size: usize,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    /// Create a new empty store with the default candidate batch size.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            batch_size: 3,
        }
    }

    /// Create a store that proposes at most `batch_size` candidates per query.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            batch_size,
        }
    }

    /// Add a known network record.
    pub fn add_network(&self, network: Network) {
        let mut inner = self.inner.write();
        inner.networks.insert(network.id.clone(), network);
    }

    /// Make subsequent operations fail with [`InMemoryStoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.write().fail = unavailable;
    }

    /// Number of persisted edges.
    pub fn edge_count(&self) -> usize {
        self.inner.read().genealogies.len()
    }

    /// All persisted edges in canonical order.
    pub fn all_edges(&self) -> Vec<GenealogyEdge> {
        self.inner.read().genealogies.keys().cloned().collect()
    }

    /// Log of relation queries received so far, in arrival order.
    pub fn query_log(&self) -> Vec<QueryRecord> {
        self.inner.read().queries.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    type Error = InMemoryStoreError;

    async fn possibly_related(
        &self,
        network: &Network,
        relation: Relation,
        exclude: &[NetworkId],
        disable_index: bool,
    ) -> Result<CandidateBatch, Self::Error> {
        let mut inner = self.inner.write();
        inner.queries.push(QueryRecord {
            network: network.id.clone(),
            relation,
            exclude: exclude.to_vec(),
            disable_index,
        });
        if inner.fail {
            return Err(InMemoryStoreError::Unavailable);
        }

        let mut pool: Vec<&Network> = inner
            .networks
            .values()
            .filter(|n| n.id != network.id)
            .filter(|n| !exclude.contains(&n.id))
            .filter(|n| match relation {
                Relation::Ancestor => n.height() <= network.height(),
                Relation::Descendant => n.height() >= network.height(),
            })
            .collect();

        // Nearest in history first; ties by id for determinism
        pool.sort_by(|a, b| match relation {
            Relation::Ancestor => b.height().cmp(&a.height()).then_with(|| a.id.cmp(&b.id)),
            Relation::Descendant => a.height().cmp(&b.height()).then_with(|| a.id.cmp(&b.id)),
        });

        let networks: Vec<Network> = pool.into_iter().take(self.batch_size).cloned().collect();
        if networks.is_empty() {
            // Explicit empty batch, exclusion set unchanged
            return Ok(CandidateBatch::exhausted(exclude.to_vec()));
        }

        let mut already_tried = exclude.to_vec();
        for candidate in &networks {
            if !already_tried.contains(&candidate.id) {
                already_tried.push(candidate.id.clone());
            }
        }

        Ok(CandidateBatch::new(networks, already_tried))
    }

    async fn load_genealogies(&self, edges: &[GenealogyEdge]) -> Result<Vec<EdgeRef>, Self::Error> {
        let mut inner = self.inner.write();
        if inner.fail {
            return Err(InMemoryStoreError::Unavailable);
        }

        let mut refs = Vec::with_capacity(edges.len());
        for edge in edges {
            let edge_ref = *inner
                .genealogies
                .entry(edge.clone())
                .or_insert_with(|| EdgeRef::new(Uuid::new_v4()));
            refs.push(edge_ref);
        }
        Ok(refs)
    }
}
