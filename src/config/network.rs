use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::routes::DEFAULT_MAX_BODY_BYTES;

/// Node configuration: where to listen, who to talk to, and how patiently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP listen address.
    pub listen: SocketAddr,

    /// Miner address credited with block rewards. Random if unset.
    pub node_id: Option<String>,

    /// Peers registered at startup, as URLs or `host:port`.
    pub peers: Vec<String>,

    /// Per-peer timeout when fetching chains during consensus (seconds).
    pub peer_timeout_secs: u64,

    /// Largest accepted request body.
    pub max_body_bytes: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 5000)),
            node_id: None,
            peers: Vec::new(),
            peer_timeout_secs: 5,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl NodeConfig {
    /// Load a TOML file; fields it leaves out keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn peer_timeout(&self) -> Duration {
        Duration::from_secs(self.peer_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_5000() {
        let cfg = NodeConfig::default();
        assert_eq!(cfg.listen.port(), 5000);
        assert!(cfg.peers.is_empty());
        assert_eq!(cfg.peer_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = NodeConfig::from_toml_str(
            r#"
            listen = "0.0.0.0:5001"
            peers = ["http://10.0.0.2:5000"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.listen.port(), 5001);
        assert_eq!(cfg.peers, vec!["http://10.0.0.2:5000".to_string()]);
        assert_eq!(cfg.peer_timeout_secs, 5);
        assert!(cfg.node_id.is_none());
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let cfg = NodeConfig {
            peer_timeout_secs: 0,
            ..NodeConfig::default()
        };
        assert_eq!(cfg.peer_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn unknown_value_type_is_an_error() {
        assert!(NodeConfig::from_toml_str("peer_timeout_secs = \"soon\"").is_err());
    }
}
