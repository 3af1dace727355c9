//! Proof-of-work for the ledger: the block hasher and the nonce puzzle.
//!
//! A proof `p` is valid after `previous` when
//! `sha256("{previous}:{p}")` in hex starts with [`DIFFICULTY_PREFIX`].
//! Difficulty is fixed; every node must use the same prefix.

pub mod encoding;

pub use encoding::{canonical_bytes, hash_block, sha256_hex};

use crate::error::NodeError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Leading hex zeros required of a proof digest.
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Separator between the two proofs in the work message.
pub const POW_SEPARATOR: char = ':';

/// How many candidates the search tries between cancellation checks.
pub const CANCEL_CHECK_INTERVAL: u64 = 4096;

/// Shared stop signal for long-running proof searches.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn pow_message(previous_proof: u64, proof: u64) -> String {
    format!("{previous_proof}{POW_SEPARATOR}{proof}")
}

pub fn is_valid_proof(proof: u64, previous_proof: u64) -> bool {
    sha256_hex(pow_message(previous_proof, proof).as_bytes()).starts_with(DIFFICULTY_PREFIX)
}

/// Scan 0, 1, 2, ... for the first proof valid after `previous_proof`.
///
/// There is no upper bound; the only way out besides success is `cancel`.
/// CPU-bound, so async callers should run it on a blocking thread.
pub fn search_proof(previous_proof: u64, cancel: &CancelFlag) -> Result<u64, NodeError> {
    let mut proof: u64 = 0;
    loop {
        if proof % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            tracing::debug!(
                target: "chain::pow",
                previous_proof,
                tried = proof,
                "proof search cancelled"
            );
            return Err(NodeError::Cancelled);
        }
        if is_valid_proof(proof, previous_proof) {
            return Ok(proof);
        }
        proof = proof.wrapping_add(1);
    }
}
