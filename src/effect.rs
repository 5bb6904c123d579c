//! Effects and the interpreter that performs them.
//!
//! Search procedures describe every external request as an [`Effect`] value;
//! the [`EffectInterpreter`] pattern-matches the tag, performs the matching
//! collaborator call, and hands the result back. Effects are consumed
//! exactly once, in program order: no effect is dispatched before the
//! previous effect's outcome has been consumed, and the interpreter never
//! reorders or batches them. The interpreter performs no retries; retry and
//! backoff belong to the collaborators behind the traits.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::chain::{BlockHeader, ChainClient};
use crate::store::RecordStore;
use crate::types::{Network, NetworkId, Relation, CandidateBatch};

/// Error type for genealogy resolution.
///
/// "No confirmed relation" and "candidate hash mismatch" are normal
/// outcomes, not errors; only collaborator failures appear here. Errors
/// bubble unchanged to the loader's caller; nothing is recovered or retried
/// inside the kernel.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenealogyError {
    /// The record store failed to answer a query or a bulk load.
    #[error("record store request failed: {0}")]
    Store(String),
    /// The chain client failed to answer a block query.
    #[error("chain query failed: {0}")]
    Chain(String),
}

/// One external request issued by a search procedure.
#[derive(Debug, Clone, Serialize)]
pub enum Effect {
    /// Ask the store for not-yet-tried candidate relations of a network.
    StoreQuery {
        /// The network being searched around.
        network: Network,
        /// Requested relation direction.
        relation: Relation,
        /// Ids already examined in this search.
        exclude: Vec<NetworkId>,
        /// Bypass the store's secondary index for this query.
        disable_index: bool,
    },
    /// Ask the chain for the block at a given height.
    ChainQuery {
        /// Height to look up.
        height: u64,
    },
}

impl Effect {
    /// Build a store query effect.
    pub fn store_query(
        network: Network,
        relation: Relation,
        exclude: Vec<NetworkId>,
        disable_index: bool,
    ) -> Self {
        Self::StoreQuery { network, relation, exclude, disable_index }
    }

    /// Build a chain query effect.
    pub fn chain_query(height: u64) -> Self {
        Self::ChainQuery { height }
    }

    /// Render the effect as a schema-versioned JSON query document for
    /// trace output.
    fn describe(&self) -> String {
        serde_json::to_value(self)
            .map(|query| {
                serde_json::json!({
                    "schema": crate::GENEALOGY_KERNEL_SCHEMA_VERSION,
                    "query": query,
                })
                .to_string()
            })
            .unwrap_or_else(|_| "<unrenderable effect>".to_string())
    }
}

/// Result of performing one effect.
#[derive(Debug, Clone)]
pub enum EffectOutcome {
    /// Answer to a [`Effect::StoreQuery`].
    Candidates(CandidateBatch),
    /// Answer to a [`Effect::ChainQuery`]; `None` when the chain has no
    /// block at the requested height.
    Block(Option<BlockHeader>),
}

impl EffectOutcome {
    /// Extract the candidate batch from a store query outcome.
    pub fn into_candidates(self) -> Result<CandidateBatch, GenealogyError> {
        match self {
            Self::Candidates(batch) => Ok(batch),
            Self::Block(_) => Err(GenealogyError::Store(
                "store query answered with a chain block".to_string(),
            )),
        }
    }

    /// Extract the block lookup from a chain query outcome.
    pub fn into_block(self) -> Result<Option<BlockHeader>, GenealogyError> {
        match self {
            Self::Block(block) => Ok(block),
            Self::Candidates(_) => Err(GenealogyError::Chain(
                "chain query answered with store candidates".to_string(),
            )),
        }
    }
}

/// Performs effects against the store and chain collaborators.
///
/// Strictly sequential: `perform` awaits the collaborator call to completion
/// before returning, so a procedure that awaits each outcome before issuing
/// the next effect never has two effects in flight. Collaborator failures
/// are mapped into [`GenealogyError`] and returned, never swallowed.
pub struct EffectInterpreter<S, C> {
    store: Arc<S>,
    chain: Arc<C>,
    /// Trace identifier for dispatched effects, local to this interpreter.
    query_seq: AtomicU64,
}

impl<S: RecordStore, C: ChainClient> EffectInterpreter<S, C> {
    /// Create a new interpreter over the given collaborators.
    pub fn new(store: Arc<S>, chain: Arc<C>) -> Self {
        Self {
            store,
            chain,
            query_seq: AtomicU64::new(0),
        }
    }

    /// Perform one effect and return its outcome.
    pub async fn perform(&self, effect: Effect) -> Result<EffectOutcome, GenealogyError> {
        let seq = self.query_seq.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(seq, effect = %effect.describe(), "performing effect");

        match effect {
            Effect::StoreQuery { network, relation, exclude, disable_index } => {
                let batch = self
                    .store
                    .possibly_related(&network, relation, &exclude, disable_index)
                    .await
                    .map_err(|e| GenealogyError::Store(e.to_string()))?;
                Ok(EffectOutcome::Candidates(batch))
            }
            Effect::ChainQuery { height } => {
                let block = self
                    .chain
                    .block_by_number(height)
                    .await
                    .map_err(|e| GenealogyError::Chain(e.to_string()))?;
                Ok(EffectOutcome::Block(block))
            }
        }
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::InMemoryChain;
    use crate::store::InMemoryRecordStore;
    use crate::types::HistoricBlock;

    fn make_network(id: &str, height: u64, hash: &str) -> Network {
        Network::new(id, HistoricBlock::new(hash, height))
    }

    fn make_interpreter() -> EffectInterpreter<InMemoryRecordStore, InMemoryChain> {
        EffectInterpreter::new(
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(InMemoryChain::new()),
        )
    }

    #[tokio::test]
    async fn test_chain_query_missing_block_is_none() {
        let interpreter = make_interpreter();
        let block = interpreter
            .perform(Effect::chain_query(999))
            .await
            .unwrap()
            .into_block()
            .unwrap();
        assert!(block.is_none());
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_store_error() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.set_unavailable(true);
        let interpreter = EffectInterpreter::new(store, Arc::new(InMemoryChain::new()));

        let network = make_network("n1", 100, "0xaa");
        let result = interpreter
            .perform(Effect::store_query(network, Relation::Ancestor, vec![], false))
            .await;
        assert!(matches!(result, Err(GenealogyError::Store(_))));
    }

    #[tokio::test]
    async fn test_chain_failure_maps_to_chain_error() {
        let chain = Arc::new(InMemoryChain::new());
        chain.set_unavailable(true);
        let interpreter = EffectInterpreter::new(Arc::new(InMemoryRecordStore::new()), chain);

        let result = interpreter.perform(Effect::chain_query(100)).await;
        assert!(matches!(result, Err(GenealogyError::Chain(_))));
    }

    #[test]
    fn test_effect_description_is_schema_versioned() {
        let description = Effect::chain_query(100).describe();
        assert!(description.contains(crate::GENEALOGY_KERNEL_SCHEMA_VERSION));
        assert!(description.contains("ChainQuery"));
    }

    #[tokio::test]
    async fn test_outcome_kind_mismatch_is_error() {
        let interpreter = make_interpreter();
        let outcome = interpreter.perform(Effect::chain_query(1)).await.unwrap();
        assert!(outcome.into_candidates().is_err());
    }
}
