//! Genealogy edge types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use std::fmt;

use super::network::NetworkId;

/// A confirmed ancestor → descendant relationship between two networks.
///
/// Invariants maintained by the kernel: the ancestor's historic block height
/// never exceeds the descendant's, the two ids differ, and the accumulated
/// edge set forms a DAG. Implements `Ord` for canonical ordering:
/// (ancestor, descendant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenealogyEdge {
    /// The earlier observation (source).
    pub ancestor: NetworkId,
    /// The later observation (target).
    pub descendant: NetworkId,
}

impl GenealogyEdge {
    /// Create a new edge.
    pub fn new(ancestor: NetworkId, descendant: NetworkId) -> Self {
        Self { ancestor, descendant }
    }

    /// True when ancestor and descendant are the same network.
    pub fn is_self_edge(&self) -> bool {
        self.ancestor == self.descendant
    }
}

impl fmt::Display for GenealogyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.ancestor, self.descendant)
    }
}

// Canonical ordering: ancestor, then descendant
impl PartialOrd for GenealogyEdge {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GenealogyEdge {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.ancestor.cmp(&other.ancestor) {
            std::cmp::Ordering::Equal => self.descendant.cmp(&other.descendant),
            ord => ord,
        }
    }
}

/// Stable reference to a persisted genealogy edge, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeRef(Uuid);

impl EdgeRef {
    /// Create an EdgeRef from a store-assigned UUID.
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
