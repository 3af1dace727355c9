//! Mining endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app_state::Node;
use crate::block::{Block, Transaction};
use crate::error::NodeError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinedBlockResp {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl From<Block> for MinedBlockResp {
    fn from(b: Block) -> Self {
        Self {
            message: "New Block Forged".to_string(),
            index: b.index,
            transactions: b.transactions,
            proof: b.proof,
            previous_hash: b.previous_hash,
        }
    }
}

/// GET /mine
pub async fn mine(State(node): State<Arc<Node>>) -> Result<Json<MinedBlockResp>, NodeError> {
    let block = node.mine().await?;
    tracing::info!(
        target: "chain::pow",
        index = block.index,
        proof = block.proof,
        "⛏️ new block forged"
    );
    Ok(Json(block.into()))
}
