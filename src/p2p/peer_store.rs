//! Known peers, keyed by their `host:port` authority.
//!
//! Registration accepts either a full URL (`http://10.0.0.5:5000/`) or a bare
//! authority (`10.0.0.5:5000`); both normalise to `10.0.0.5:5000`. TLS peers
//! keep their scheme: `https://node` is stored as `https://node:443`.

use crate::error::NodeError;
use std::collections::BTreeSet;
use url::Url;

#[derive(Debug, Default, Clone)]
pub struct PeerSet {
    peers: BTreeSet<String>,
}

impl PeerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalise and add one address. Returns true if it was new.
    pub fn register(&mut self, address: &str) -> Result<bool, NodeError> {
        let authority = normalize_peer(address)?;
        Ok(self.peers.insert(authority))
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.peers.iter().cloned().collect()
    }
}

/// Reduce an address to `host:port`, or `https://host:port` for TLS peers.
///
/// The port is always explicit, so a default-port URL keeps its port.
pub fn normalize_peer(address: &str) -> Result<String, NodeError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(NodeError::InvalidPeerAddress(address.to_string()));
    }
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    let url = Url::parse(&with_scheme)
        .map_err(|e| NodeError::InvalidPeerAddress(format!("{address}: {e}")))?;
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| NodeError::InvalidPeerAddress(address.to_string()))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| NodeError::InvalidPeerAddress(address.to_string()))?;
    match url.scheme() {
        "http" => Ok(format!("{host}:{port}")),
        "https" => Ok(format!("https://{host}:{port}")),
        other => Err(NodeError::InvalidPeerAddress(format!("{address}: unsupported scheme {other}"))),
    }
}

/// Base URL for requests to a stored peer.
pub fn peer_base_url(peer: &str) -> String {
    if peer.contains("://") {
        peer.to_string()
    } else {
        format!("http://{peer}")
    }
}
