use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use powledger::config::Cli;
use powledger::genesis::validate_genesis_hash;
use powledger::p2p::HttpChainSource;
use powledger::{routes, Node};

#[tokio::main]
async fn main() -> Result<()> {
    // init tracing from env POWLEDGER_LOG or RUST_LOG
    let filter = std::env::var("POWLEDGER_LOG")
        .unwrap_or_else(|_| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let cfg = cli.load()?;

    validate_genesis_hash()?;

    let source = HttpChainSource::new(cfg.peer_timeout()).context("building peer http client")?;
    let node_id = cfg.node_id.clone().unwrap_or_else(Node::random_id);
    let node = Arc::new(Node::new(node_id, Arc::new(source)));

    if !cfg.peers.is_empty() {
        match node.register_peers(cfg.peers.as_slice()) {
            Ok(peers) => info!(count = peers.len(), "bootstrap peers registered"),
            Err(e) => warn!(error = %e, "ignoring bootstrap peers"),
        }
    }

    let app = routes::router(node.clone(), cfg.max_body_bytes);
    let listener = tokio::net::TcpListener::bind(cfg.listen)
        .await
        .with_context(|| format!("binding {}", cfg.listen))?;
    info!(listen = %cfg.listen, node_id = %node.node_id(), "powledger node starting up");

    let shutdown_node = node.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown requested, cancelling proof searches");
            shutdown_node.shutdown();
        })
        .await
        .context("http server")?;

    info!("node stopped");
    Ok(())
}
