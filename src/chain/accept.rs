//! Chain acceptance: structural and proof-of-work checks on a candidate chain.
//!
//! Validity is a property of the candidate alone. Nothing here looks at the
//! local ledger, so the same check serves peer chains and our own.

use crate::block::Block;
use crate::consensus_pow::{hash_block, is_valid_proof};
use crate::error::ChainFault;

/// Walk adjacent pairs and report the first broken invariant.
///
/// Chains of length 0 or 1 are trivially valid.
pub fn validate_chain(chain: &[Block]) -> Result<(), ChainFault> {
    for pair in chain.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);

        if cur.index != prev.index.wrapping_add(1) {
            return Err(ChainFault::IndexGap {
                index: cur.index,
                expected_prev: prev.index,
            });
        }
        if cur.previous_hash != hash_block(prev) {
            return Err(ChainFault::BrokenLink { index: cur.index });
        }
        if !is_valid_proof(cur.proof, prev.proof) {
            return Err(ChainFault::InvalidProof { index: cur.index });
        }
    }
    Ok(())
}

pub fn is_valid_chain(chain: &[Block]) -> bool {
    validate_chain(chain).is_ok()
}
