//! Longest valid chain wins.
//!
//! No work-sum weighting, no partial adoption, no fork-point merge: a peer
//! chain either replaces ours wholesale or is ignored.

use crate::block::Block;
use crate::chain::validate_chain;
use crate::error::NodeError;
use crate::genesis::is_genesis;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct PeerChain {
    pub peer: String,
    pub chain: Vec<Block>,
}

#[derive(Debug, Default)]
pub struct Resolution {
    /// The chain to adopt, if any candidate qualified.
    pub winner: Option<PeerChain>,
    /// Candidates dropped along the way, with the reason.
    pub rejected: Vec<(String, NodeError)>,
}

/// Pick the longest candidate that is strictly longer than `local_len` and valid.
///
/// Fetch failures are skipped. Candidates of equal winning length keep the
/// first one seen, so the outcome follows the order of `outcomes`; with peers
/// fetched concurrently that order is not meaningful and no tie-break is
/// imposed.
pub fn select_longest<I>(local_len: usize, outcomes: I) -> Resolution
where
    I: IntoIterator<Item = (String, Result<Vec<Block>, NodeError>)>,
{
    let mut resolution = Resolution::default();
    let mut best_len = local_len;

    for (peer, outcome) in outcomes {
        let chain = match outcome {
            Ok(chain) => chain,
            Err(e) => {
                warn!(target: "consensus", %peer, error = %e, "skipping peer");
                resolution.rejected.push((peer, e));
                continue;
            }
        };
        if chain.len() <= best_len {
            continue;
        }
        if let Err(fault) = validate_chain(&chain) {
            warn!(target: "consensus", %peer, %fault, length = chain.len(), "rejecting invalid chain");
            resolution.rejected.push((peer.clone(), NodeError::InvalidChain { peer, fault }));
            continue;
        }
        if !chain.first().map(is_genesis).unwrap_or(false) {
            warn!(target: "consensus", %peer, "rejecting chain with foreign genesis");
            resolution.rejected.push((peer.clone(), NodeError::GenesisMismatch { peer }));
            continue;
        }
        best_len = chain.len();
        resolution.winner = Some(PeerChain { peer, chain });
    }

    if let Some(w) = &resolution.winner {
        info!(target: "consensus", peer = %w.peer, length = w.chain.len(), local_len, "longer valid chain found");
    }
    resolution
}
