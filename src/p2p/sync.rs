//! Fetching peer chains.
//!
//! Each peer is fetched on its own; a failure is reported for that peer only
//! and never aborts the others.

use crate::block::Block;
use crate::error::NodeError;
use crate::p2p::peer_store::peer_base_url;
use futures_util::future::{join_all, BoxFuture};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body of `GET /chain`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainView {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// Where peer chains come from. The node only sees this trait, so tests can
/// hand it canned chains instead of a network.
pub trait ChainSource: Send + Sync {
    fn fetch_chain<'a>(&'a self, peer: &'a str) -> BoxFuture<'a, Result<Vec<Block>, NodeError>>;
}

/// Fetch every peer concurrently; results come back in `peers` order.
pub async fn fetch_all(
    source: &dyn ChainSource,
    peers: &[String],
) -> Vec<(String, Result<Vec<Block>, NodeError>)> {
    let results = join_all(peers.iter().map(|p| source.fetch_chain(p))).await;
    peers.iter().cloned().zip(results).collect()
}

pub struct HttpChainSource {
    client: reqwest::Client,
}

impl HttpChainSource {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn fetch(&self, peer: &str) -> Result<Vec<Block>, NodeError> {
        let url = format!("{}/chain", peer_base_url(peer.trim_end_matches('/')));
        let unreachable = |reason: String| NodeError::UnreachablePeer {
            peer: peer.to_string(),
            reason,
        };
        let malformed = |reason: String| NodeError::MalformedPeerChain {
            peer: peer.to_string(),
            reason,
        };

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(unreachable(format!("status {}", resp.status())));
        }
        let bytes = resp.bytes().await.map_err(|e| unreachable(e.to_string()))?;
        let view: ChainView = serde_json::from_slice(&bytes).map_err(|e| malformed(e.to_string()))?;
        if view.length != view.chain.len() {
            return Err(malformed(format!(
                "length {} but {} blocks",
                view.length,
                view.chain.len()
            )));
        }
        tracing::debug!(target: "p2p::sync", peer, length = view.length, "fetched peer chain");
        Ok(view.chain)
    }
}

impl ChainSource for HttpChainSource {
    fn fetch_chain<'a>(&'a self, peer: &'a str) -> BoxFuture<'a, Result<Vec<Block>, NodeError>> {
        Box::pin(self.fetch(peer))
    }
}
