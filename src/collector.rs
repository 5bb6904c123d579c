//! Lineage collection over a sparse batch of networks.
//!
//! Pure pass: absent entries are discarded, the remainder is ordered by
//! historic block height, and adjacent distinct entries become pairwise
//! ancestor → descendant edges.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::{Network, NetworkId, GenealogyEdge};

/// A sparse batch sorted into lineage order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortedBatch {
    /// Networks ascending by height, duplicate ids collapsed.
    pub networks: Vec<Network>,
    /// Pairwise edges between adjacent distinct networks.
    pub edges: Vec<GenealogyEdge>,
}

impl SortedBatch {
    /// True when the batch contained no present networks.
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

/// Collect lineage from a sparse batch.
///
/// Absent entries arise when an artifact lacks a deployment on the current
/// chain. The walk is a fold, not a naive pairwise zip: a duplicate id emits
/// no edge and does not advance the running ancestor, so duplicates collapse
/// without breaking the chain to the next distinct entry. Duplicate ids are
/// definitionally the same network, so collapsing is by id even when an
/// equal-height tie sorts a duplicate away from its twin. The sort is
/// stable, so equal heights keep their input order.
pub fn collect_lineage(batch: &[Option<Network>]) -> SortedBatch {
    let mut present: Vec<Network> = batch.iter().flatten().cloned().collect();
    present.sort_by_key(Network::height);

    let mut seen: HashSet<NetworkId> = HashSet::with_capacity(present.len());
    let mut networks: Vec<Network> = Vec::with_capacity(present.len());
    let mut edges: Vec<GenealogyEdge> = Vec::new();

    for network in present {
        if !seen.insert(network.id.clone()) {
            // Same network observed twice; keep the running ancestor
            continue;
        }
        if let Some(current) = networks.last() {
            edges.push(GenealogyEdge::new(current.id.clone(), network.id.clone()));
        }
        networks.push(network);
    }

    SortedBatch { networks, edges }
}
