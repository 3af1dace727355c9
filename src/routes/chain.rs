//! Transaction submission and chain read-out.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app_state::Node;
use crate::block::Transaction;
use crate::error::NodeError;
use crate::p2p::ChainView;

/// All fields optional so a missing one is reported by name.
#[derive(Debug, Deserialize)]
pub struct NewTransactionReq {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<i64>,
}

impl NewTransactionReq {
    pub fn into_transaction(self) -> Result<Transaction, NodeError> {
        Ok(Transaction {
            sender: self.sender.ok_or(NodeError::MissingField("sender"))?,
            recipient: self.recipient.ok_or(NodeError::MissingField("recipient"))?,
            amount: self.amount.ok_or(NodeError::MissingField("amount"))?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct NewTransactionResp {
    pub message: String,
    pub index: u64,
}

/// POST /transactions/new
pub async fn new_transaction(
    State(node): State<Arc<Node>>,
    payload: Result<Json<NewTransactionReq>, JsonRejection>,
) -> Result<(StatusCode, Json<NewTransactionResp>), NodeError> {
    let Json(req) = payload?;
    let tx = req.into_transaction()?;
    let index = node.submit_transaction(tx);
    Ok((
        StatusCode::CREATED,
        Json(NewTransactionResp {
            message: format!("Transaction will be added to Block {index}"),
            index,
        }),
    ))
}

/// GET /chain
pub async fn full_chain(State(node): State<Arc<Node>>) -> Json<ChainView> {
    let (chain, length) = node.chain_snapshot();
    Json(ChainView { chain, length })
}
