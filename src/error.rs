//! Typed failures for ledger, validation and peer operations.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Why a candidate chain was rejected, with the index of the offending block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainFault {
    #[error("block {index} does not follow block {expected_prev}")]
    IndexGap { index: u64, expected_prev: u64 },
    #[error("block {index} previousHash does not match the hash of its predecessor")]
    BrokenLink { index: u64 },
    #[error("block {index} proof does not satisfy the work predicate")]
    InvalidProof { index: u64 },
}

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("chain has no blocks")]
    EmptyChain,
    #[error("peer {peer} unreachable: {reason}")]
    UnreachablePeer { peer: String, reason: String },
    #[error("peer {peer} returned a malformed chain: {reason}")]
    MalformedPeerChain { peer: String, reason: String },
    #[error("peer {peer} chain invalid: {fault}")]
    InvalidChain { peer: String, fault: ChainFault },
    #[error("peer {peer} chain starts from a different genesis")]
    GenesisMismatch { peer: String },
    #[error("invalid peer address: {0}")]
    InvalidPeerAddress(String),
    #[error("proof search cancelled")]
    Cancelled,
}

impl NodeError {
    pub fn status(&self) -> StatusCode {
        match self {
            NodeError::MissingField(_)
            | NodeError::InvalidBody(_)
            | NodeError::InvalidPeerAddress(_) => StatusCode::BAD_REQUEST,
            NodeError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            NodeError::UnreachablePeer { .. }
            | NodeError::MalformedPeerChain { .. }
            | NodeError::InvalidChain { .. }
            | NodeError::GenesisMismatch { .. } => StatusCode::BAD_GATEWAY,
            NodeError::EmptyChain => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for NodeError {
    fn from(rejection: JsonRejection) -> Self {
        NodeError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
