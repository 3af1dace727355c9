#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use powledger::p2p::{ChainView, HttpChainSource};
use powledger::routes::{self, DEFAULT_MAX_BODY_BYTES};
use powledger::{Block, Node};

/// A node serving HTTP on an ephemeral port inside the test process.
pub struct TestNode {
    pub addr: SocketAddr,
    pub node: Arc<Node>,
    pub base: String,
}

pub async fn spawn_router(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

pub async fn spawn_node(node_id: &str) -> TestNode {
    let source = HttpChainSource::new(Duration::from_secs(3)).expect("http client");
    let node = Arc::new(Node::new(node_id, Arc::new(source)));
    let addr = spawn_router(routes::router(node.clone(), DEFAULT_MAX_BODY_BYTES)).await;
    TestNode {
        addr,
        node,
        base: format!("http://{addr}"),
    }
}

/// A fake peer that always answers `GET /chain` with `chain`.
pub async fn spawn_static_peer(chain: Vec<Block>) -> SocketAddr {
    let view = ChainView {
        length: chain.len(),
        chain,
    };
    let app = Router::new().route(
        "/chain",
        axum::routing::get(move || {
            let view = view.clone();
            async move { axum::Json(view) }
        }),
    );
    spawn_router(app).await
}

/// A fake peer whose `/chain` answers with a body that is not a chain.
pub async fn spawn_garbage_peer() -> SocketAddr {
    let app = Router::new().route("/chain", axum::routing::get(|| async { "not json" }));
    spawn_router(app).await
}

/// Mine on `node` until its chain reaches `len` blocks.
pub async fn grow_to(node: &Node, len: usize) -> Vec<Block> {
    while node.chain_snapshot().1 < len {
        node.mine().await.expect("mine");
    }
    node.chain_snapshot().0
}
