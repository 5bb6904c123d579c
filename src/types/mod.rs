//! Core types for the genealogy kernel.

pub mod network;
pub mod edge;
pub mod candidate;

pub use network::{Network, NetworkId, HistoricBlock};
pub use edge::{GenealogyEdge, EdgeRef};
pub use candidate::{Relation, CandidateBatch, ParseRelationError};
