//! Peer registration and consensus endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app_state::Node;
use crate::block::Block;
use crate::error::NodeError;

#[derive(Debug, Deserialize)]
pub struct RegisterNodesReq {
    #[serde(default)]
    pub nodes: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct RegisterNodesResp {
    pub message: String,
    pub total_nodes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResp {
    pub message: String,
    pub replaced: bool,
    pub chain: Vec<Block>,
}

#[derive(Debug, Serialize)]
pub struct PeersView {
    pub nodes: Vec<String>,
}

/// POST /nodes/register
pub async fn register_nodes(
    State(node): State<Arc<Node>>,
    payload: Result<Json<RegisterNodesReq>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterNodesResp>), NodeError> {
    let Json(req) = payload?;
    let nodes = req
        .nodes
        .filter(|n| !n.is_empty())
        .ok_or(NodeError::MissingField("nodes"))?;
    let total_nodes = node.register_peers(nodes.as_slice())?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterNodesResp {
            message: "New nodes have been added".to_string(),
            total_nodes,
        }),
    ))
}

/// GET /nodes
pub async fn list_nodes(State(node): State<Arc<Node>>) -> Json<PeersView> {
    Json(PeersView { nodes: node.peers() })
}

/// GET /nodes/resolve
pub async fn resolve(State(node): State<Arc<Node>>) -> Result<Json<ResolveResp>, NodeError> {
    let outcome = node.resolve_conflicts().await?;
    let message = if outcome.replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };
    Ok(Json(ResolveResp {
        message: message.to_string(),
        replaced: outcome.replaced,
        chain: outcome.chain,
    }))
}
