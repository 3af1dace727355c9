//! powledger: a minimal replicated proof-of-work ledger.
//!
//! One node keeps an append-only chain, buffers transactions, mines blocks
//! by searching for a proof, and settles disagreements with peers by adopting
//! the longest valid chain.

pub mod app_state;
pub mod block;
pub mod chain;
pub mod config;
pub mod consensus;
pub mod consensus_pow;
pub mod error;
pub mod genesis;
pub mod p2p;
pub mod routes;
pub mod version;

pub use app_state::{Node, ResolveOutcome};
pub use block::{Block, Transaction};
pub use chain::Ledger;
pub use error::{ChainFault, NodeError};
