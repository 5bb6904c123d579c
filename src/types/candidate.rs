//! Candidate types for relation searches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::network::{Network, NetworkId};

/// Direction of a relation search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Search for a network earlier in chain history.
    Ancestor,
    /// Search for a network later in chain history.
    Descendant,
}

/// Error when parsing an unknown relation direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation: {0}")]
pub struct ParseRelationError(String);

impl FromStr for Relation {
    type Err = ParseRelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ancestor" => Ok(Self::Ancestor),
            "descendant" => Ok(Self::Descendant),
            other => Err(ParseRelationError(other.to_string())),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ancestor => write!(f, "ancestor"),
            Self::Descendant => write!(f, "descendant"),
        }
    }
}

/// Result of one store query during a relation search.
///
/// `already_tried` is the exclusion set after this query: it strictly grows
/// across successive queries for the same (network, relation) search and
/// never repeats an id already excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateBatch {
    /// Candidate networks proposed by the store, pending on-chain
    /// confirmation, in the store's preference order.
    pub networks: Vec<Network>,
    /// The grown exclusion set to carry into the next query.
    pub already_tried: Vec<NetworkId>,
}

impl CandidateBatch {
    /// Create a new candidate batch.
    pub fn new(networks: Vec<Network>, already_tried: Vec<NetworkId>) -> Self {
        Self { networks, already_tried }
    }

    /// An exhausted batch: no candidates, exclusion set unchanged.
    pub fn exhausted(already_tried: Vec<NetworkId>) -> Self {
        Self { networks: Vec::new(), already_tried }
    }

    /// True when the store has no more candidates to propose.
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_parsing() {
        assert_eq!("ancestor".parse(), Ok(Relation::Ancestor));
        assert_eq!("DESCENDANT".parse(), Ok(Relation::Descendant));
        assert!("sibling".parse::<Relation>().is_err());
    }

    #[test]
    fn test_exhausted_batch() {
        let batch = CandidateBatch::exhausted(vec![NetworkId::new("n1")]);
        assert!(batch.is_empty());
        assert_eq!(batch.already_tried.len(), 1);
    }
}
