use axum::Json;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::consensus_pow::DIFFICULTY_PREFIX;
use crate::genesis::GENESIS_HASH;

#[derive(Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub git_commit: &'static str,
    /// Nodes only agree when these two match.
    pub genesis_hash: &'static str,
    pub difficulty_prefix: &'static str,
    pub ts: u64,
}

/// GET /version
pub async fn get_version() -> Json<VersionInfo> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        git_commit: option_env!("GIT_COMMIT").unwrap_or("unknown"),
        genesis_hash: GENESIS_HASH,
        difficulty_prefix: DIFFICULTY_PREFIX,
        ts: now,
    })
}
