//! Top-level genealogy loading.
//!
//! Collects pairwise lineage from a sparse batch, searches the store for
//! confirmed cross-batch relations of every network in the batch, and
//! persists the deduplicated union in one bulk operation.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::chain::ChainClient;
use crate::collector::collect_lineage;
use crate::effect::{EffectInterpreter, GenealogyError};
use crate::search::find_relation;
use crate::store::RecordStore;
use crate::types::{Network, Relation, GenealogyEdge, EdgeRef};

/// Resolves and persists genealogy edges for batches of networks.
///
/// Holds only `Arc`s to the collaborators; independent `load` invocations
/// share no mutable state and may run concurrently. Within one invocation
/// every store and chain query is awaited before the next is issued.
pub struct GenealogyLoader<S, C> {
    interpreter: EffectInterpreter<S, C>,
}

impl<S: RecordStore, C: ChainClient> GenealogyLoader<S, C> {
    /// Create a new loader over the given collaborators.
    pub fn new(store: Arc<S>, chain: Arc<C>) -> Self {
        Self {
            interpreter: EffectInterpreter::new(store, chain),
        }
    }

    /// Resolve and persist genealogies for a sparse batch of networks.
    ///
    /// Returns the persisted edges' references. Fails atomically: any store
    /// or chain error during the search phase aborts the whole invocation
    /// before anything is persisted, and persistence itself is a single
    /// bulk load, so callers never observe a partial edge set.
    pub async fn load(
        &self,
        batch: &[Option<Network>],
        disable_index: bool,
    ) -> Result<Vec<EdgeRef>, GenealogyError> {
        let sorted = collect_lineage(batch);
        if sorted.is_empty() {
            tracing::debug!("batch has no present networks, nothing to load");
            return Ok(Vec::new());
        }

        let mut edges: Vec<GenealogyEdge> = sorted.edges;

        // Every network in the sorted batch is searched in both directions,
        // not only the pairwise neighbors
        for network in &sorted.networks {
            if let Some(ancestor) =
                find_relation(&self.interpreter, network, Relation::Ancestor, disable_index).await?
            {
                edges.push(GenealogyEdge::new(ancestor.id, network.id.clone()));
            }
            if let Some(descendant) =
                find_relation(&self.interpreter, network, Relation::Descendant, disable_index).await?
            {
                edges.push(GenealogyEdge::new(network.id.clone(), descendant.id));
            }
        }

        // Union of pairwise and cross-batch edges, in canonical order
        let union: BTreeSet<GenealogyEdge> = edges.into_iter().collect();
        let edges: Vec<GenealogyEdge> = union.into_iter().collect();

        tracing::info!(
            networks = sorted.networks.len(),
            edges = edges.len(),
            "persisting genealogy edges"
        );
        self.interpreter
            .store()
            .load_genealogies(&edges)
            .await
            .map_err(|e| GenealogyError::Store(e.to_string()))
    }
}
