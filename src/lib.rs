//! # genealogy-kernel
//!
//! Lineage reconciliation for blockchain network records.
//!
//! A local metadata store may hold several entries for what is actually the
//! same chain observed at different points in its history, for example
//! after a chain reset or a fork. The kernel answers one question:
//!
//! > Given a batch of locally-known networks, which are ancestors or
//! > descendants of each other and of previously-recorded networks?
//!
//! ## Core Contract
//!
//! 1. Sort a sparse batch by historic block height and chain adjacent
//!    distinct networks into pairwise ancestor → descendant edges
//! 2. For every network in the batch, search the store for a confirmed
//!    ancestor and a confirmed descendant among previously-recorded
//!    networks, verifying each candidate against live chain state
//! 3. Persist the deduplicated edge union in one bulk operation
//!
//! ## Architecture
//!
//! ```text
//! Sparse Batch → Lineage Collector → Candidate Search → Chain Validator
//!                                          ↓
//!                                  EffectInterpreter
//!                                    ↓          ↓
//!                               RecordStore  ChainClient
//! ```
//!
//! ## Guarantees
//!
//! - Strictly sequential effects: every store/chain query is awaited before
//!   the next is issued, so exclusion sets always reflect the prior query
//! - Atomic loads: collaborator failures abort the invocation before
//!   anything is persisted; persistence is a single bulk operation
//! - No cycles: pairwise edges follow sort order and cross-batch edges are
//!   oriented by the searched relation, so the edge set stays a DAG

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod store;
pub mod chain;
pub mod effect;
pub mod collector;
pub mod search;
pub mod validator;
pub mod loader;

// Re-exports
pub use types::{Network, NetworkId, HistoricBlock, GenealogyEdge, EdgeRef, Relation, CandidateBatch, ParseRelationError};
pub use store::{RecordStore, InMemoryRecordStore};
pub use chain::{ChainClient, BlockHeader, InMemoryChain};
pub use effect::{Effect, EffectOutcome, EffectInterpreter, GenealogyError};
pub use collector::{collect_lineage, SortedBatch};
pub use search::find_relation;
pub use validator::first_confirmed;
pub use loader::GenealogyLoader;

/// Schema version for all genealogy kernel types.
/// Increment on breaking changes to any schema type.
pub const GENEALOGY_KERNEL_SCHEMA_VERSION: &str = "1.0.0";
