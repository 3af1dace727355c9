//! Configuration: defaults, then an optional TOML file, then environment and
//! command-line flags (flags win over environment).

pub mod network;

pub use network::NodeConfig;

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser, Default)]
#[command(name = "powledger", version, about = "Proof-of-work ledger node")]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "POWLEDGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on (keeps the configured host).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Full listen address, e.g. 0.0.0.0:5000.
    #[arg(long, env = "POWLEDGER_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Peer to register at startup; repeat or comma-separate.
    #[arg(long = "peer", env = "POWLEDGER_PEERS", value_delimiter = ',')]
    pub peers: Vec<String>,

    /// Miner address for block rewards.
    #[arg(long, env = "POWLEDGER_NODE_ID")]
    pub node_id: Option<String>,

    /// Seconds to wait for each peer during consensus.
    #[arg(long, env = "POWLEDGER_PEER_TIMEOUT_SECS")]
    pub peer_timeout_secs: Option<u64>,
}

impl Cli {
    /// Resolve the effective configuration.
    pub fn load(&self) -> Result<NodeConfig> {
        let mut cfg = match &self.config {
            Some(path) => NodeConfig::from_toml_file(path)?,
            None => NodeConfig::default(),
        };
        self.apply(&mut cfg);
        Ok(cfg)
    }

    fn apply(&self, cfg: &mut NodeConfig) {
        if let Some(listen) = self.listen {
            cfg.listen = listen;
        }
        if let Some(port) = self.port {
            cfg.listen.set_port(port);
        }
        if !self.peers.is_empty() {
            cfg.peers.extend(self.peers.iter().filter(|p| !p.trim().is_empty()).cloned());
        }
        if let Some(id) = &self.node_id {
            cfg.node_id = Some(id.clone());
        }
        if let Some(secs) = self.peer_timeout_secs {
            cfg.peer_timeout_secs = secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn port_flag_overrides_file_port() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen = \"0.0.0.0:6000\"\npeer_timeout_secs = 9").unwrap();

        let cli = Cli::parse_from([
            "powledger",
            "--config",
            file.path().to_str().unwrap(),
            "-p",
            "7000",
            "--peer",
            "a:1,b:2",
        ]);
        let cfg = cli.load().unwrap();
        assert_eq!(cfg.listen, "0.0.0.0:7000".parse().unwrap());
        assert_eq!(cfg.peer_timeout_secs, 9);
        assert_eq!(cfg.peers, vec!["a:1".to_string(), "b:2".to_string()]);
    }

    #[test]
    fn missing_file_is_reported() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/powledger.toml")),
            ..Cli::default()
        };
        let err = cli.load().unwrap_err();
        assert!(format!("{err:#}").contains("reading config"));
    }
}
