//! Peer membership and peer chain retrieval.

pub mod peer_store;
pub mod sync;

pub use peer_store::{normalize_peer, peer_base_url, PeerSet};
pub use sync::{fetch_all, ChainSource, ChainView, HttpChainSource};
