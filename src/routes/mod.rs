//! HTTP surface of the node.
//!
//! - `chain` - transaction submission and `GET /chain`
//! - `mining_api` - `GET /mine`
//! - `nodes` - peer registration and consensus
//!
//! Handlers are thin: they decode, call into [`Node`], and encode.

pub mod chain;
pub mod mining_api;
pub mod nodes;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::app_state::Node;

/// Default cap on request bodies.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// GET /health
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub fn router(node: Arc<Node>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/transactions/new", post(chain::new_transaction))
        .route("/mine", get(mining_api::mine))
        .route("/chain", get(chain::full_chain))
        .route("/nodes", get(nodes::list_nodes))
        .route("/nodes/register", post(nodes::register_nodes))
        .route("/nodes/resolve", get(nodes::resolve))
        .route("/health", get(health))
        .route("/version", get(crate::version::get_version))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(node)
}
