//! Iterative candidate search for one relation direction.

use crate::chain::ChainClient;
use crate::effect::{Effect, EffectInterpreter, GenealogyError};
use crate::store::RecordStore;
use crate::types::{Network, NetworkId, Relation};
use crate::validator::first_confirmed;

/// Find at most one previously-known network that is the confirmed
/// ancestor or descendant of `network`.
///
/// Alternates store queries and on-chain confirmation: each iteration asks
/// the store for not-yet-tried candidates, then validates them in order. A
/// confirmed match ends the search immediately; an empty candidate batch
/// ends it with `None`. The exclusion set is owned by this call and grows
/// monotonically: it starts with the searched network's own id, adopts the
/// store's returned set after each query, and unions in the ids of the
/// candidates just proposed, so no id is ever re-requested even if a store
/// fails to honor the exclusion contract. Store and chain failures
/// propagate; they are never treated as "no candidates".
pub async fn find_relation<S: RecordStore, C: ChainClient>(
    interpreter: &EffectInterpreter<S, C>,
    network: &Network,
    relation: Relation,
    disable_index: bool,
) -> Result<Option<Network>, GenealogyError> {
    let mut already_tried: Vec<NetworkId> = vec![network.id.clone()];

    loop {
        let batch = interpreter
            .perform(Effect::store_query(
                network.clone(),
                relation,
                already_tried.clone(),
                disable_index,
            ))
            .await?
            .into_candidates()?;

        already_tried = batch.already_tried;
        for candidate in &batch.networks {
            if !already_tried.contains(&candidate.id) {
                already_tried.push(candidate.id.clone());
            }
        }

        if batch.networks.is_empty() {
            tracing::debug!(network = %network.id, %relation, "search exhausted with no confirmed relation");
            return Ok(None);
        }

        if let Some(confirmed) = first_confirmed(interpreter, &batch.networks).await? {
            return Ok(Some(confirmed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::chain::InMemoryChain;
    use crate::store::InMemoryRecordStore;
    use crate::types::HistoricBlock;

    fn make_network(id: &str, height: u64, hash: &str) -> Network {
        Network::new(id, HistoricBlock::new(hash, height))
    }

    fn make_interpreter(
        store: Arc<InMemoryRecordStore>,
        chain: Arc<InMemoryChain>,
    ) -> EffectInterpreter<InMemoryRecordStore, InMemoryChain> {
        EffectInterpreter::new(store, chain)
    }

    #[tokio::test]
    async fn test_no_candidates_returns_none() {
        let store = Arc::new(InMemoryRecordStore::new());
        let chain = Arc::new(InMemoryChain::new());
        let interpreter = make_interpreter(store, chain);

        let network = make_network("n1", 100, "0xaa");
        let found = find_relation(&interpreter, &network, Relation::Ancestor, false)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_confirmed_ancestor_found() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.add_network(make_network("n1", 100, "0xaa"));
        let chain = Arc::new(InMemoryChain::new());
        chain.add_block(100, "0xaa");
        let interpreter = make_interpreter(store, chain);

        let network = make_network("n2", 200, "0xbb");
        let found = find_relation(&interpreter, &network, Relation::Ancestor, false)
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, NetworkId::new("n1"));
    }

    #[tokio::test]
    async fn test_unconfirmed_candidates_exhaust_to_none() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.add_network(make_network("n1", 100, "0xaa"));
        // Chain reports a different history at height 100
        let chain = Arc::new(InMemoryChain::new());
        chain.add_block(100, "0xff");
        let interpreter = make_interpreter(store, chain);

        let network = make_network("n2", 200, "0xbb");
        let found = find_relation(&interpreter, &network, Relation::Ancestor, false)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_search_never_rerequests_tried_ids() {
        // Batch size 1 forces several iterations over four stale candidates
        let store = Arc::new(InMemoryRecordStore::with_batch_size(1));
        for i in 1..=4 {
            store.add_network(make_network(&format!("n{i}"), i * 100, "0xdead"));
        }
        let chain = Arc::new(InMemoryChain::new());
        let interpreter = make_interpreter(Arc::clone(&store), chain);

        let network = make_network("target", 900, "0xbb");
        let found = find_relation(&interpreter, &network, Relation::Ancestor, false)
            .await
            .unwrap();
        assert!(found.is_none());

        // Exclusion sets grow strictly and never repeat an excluded id
        let log = store.query_log();
        assert_eq!(log.len(), 5); // four candidate batches plus the empty one
        for pair in log.windows(2) {
            assert!(pair[1].exclude.len() > pair[0].exclude.len());
            for id in &pair[0].exclude {
                assert_eq!(pair[1].exclude.iter().filter(|x| *x == id).count(), 1);
            }
        }
    }

    #[tokio::test]
    async fn test_self_never_proposed() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.add_network(make_network("n1", 100, "0xaa"));
        let chain = Arc::new(InMemoryChain::new());
        chain.add_block(100, "0xaa");
        let interpreter = make_interpreter(Arc::clone(&store), chain);

        // The searched network is already known to the store
        let network = make_network("n1", 100, "0xaa");
        let found = find_relation(&interpreter, &network, Relation::Ancestor, false)
            .await
            .unwrap();
        assert!(found.is_none());

        // Its own id was excluded from the very first query
        let log = store.query_log();
        assert!(log[0].exclude.contains(&NetworkId::new("n1")));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.set_unavailable(true);
        let chain = Arc::new(InMemoryChain::new());
        let interpreter = make_interpreter(store, chain);

        let network = make_network("n1", 100, "0xaa");
        let result = find_relation(&interpreter, &network, Relation::Ancestor, false).await;
        assert!(matches!(result, Err(GenealogyError::Store(_))));
    }

    #[tokio::test]
    async fn test_disable_index_reaches_store() {
        let store = Arc::new(InMemoryRecordStore::new());
        let chain = Arc::new(InMemoryChain::new());
        let interpreter = make_interpreter(Arc::clone(&store), chain);

        let network = make_network("n1", 100, "0xaa");
        find_relation(&interpreter, &network, Relation::Descendant, true)
            .await
            .unwrap();

        let log = store.query_log();
        assert!(log.iter().all(|q| q.disable_index));
    }
}
