use crate::block::{Block, Transaction};
use crate::chain::Ledger;
use crate::consensus::select_longest;
use crate::consensus_pow::{hash_block, search_proof, CancelFlag};
use crate::error::NodeError;
use crate::p2p::{fetch_all, ChainSource, PeerSet};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything a request handler needs, shared as `Arc<Node>`.
///
/// Chain and pending pool sit behind one mutex. The peer set has its own lock
/// and is never touched by consensus.
pub struct Node {
    ledger: Mutex<Ledger>,
    peers: RwLock<PeerSet>,
    node_id: String,
    shutdown: CancelFlag,
    source: Arc<dyn ChainSource>,
}

/// Result of a consensus round.
#[derive(Debug)]
pub struct ResolveOutcome {
    pub replaced: bool,
    pub chain: Vec<Block>,
}

impl Node {
    pub fn new(node_id: impl Into<String>, source: Arc<dyn ChainSource>) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new()),
            peers: RwLock::new(PeerSet::new()),
            node_id: node_id.into(),
            shutdown: CancelFlag::new(),
            source,
        }
    }

    /// A fresh miner address: UUIDv4 without dashes.
    pub fn random_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn submit_transaction(&self, tx: Transaction) -> u64 {
        let index = self.ledger.lock().submit(tx);
        debug!(target: "chain", index, "transaction queued");
        index
    }

    /// Find a proof for the current tip and seal the pending pool with our reward.
    ///
    /// The search runs without the ledger lock. If the tip moved while we were
    /// searching, the proof is for a stale block and the search starts over.
    pub async fn mine(&self) -> Result<Block, NodeError> {
        loop {
            let (last_proof, last_hash) = {
                let ledger = self.ledger.lock();
                let last = ledger.last_block()?;
                (last.proof, hash_block(last))
            };

            let cancel = self.shutdown.clone();
            let proof = tokio::task::spawn_blocking(move || search_proof(last_proof, &cancel))
                .await
                .map_err(|_| NodeError::Cancelled)??;

            let sealed = self.ledger.lock().seal_on_tip(&last_hash, proof, &self.node_id)?;
            match sealed {
                Some(block) => return Ok(block),
                None => info!(target: "chain::pow", "tip moved during proof search, retrying"),
            }
        }
    }

    /// The whole chain and its length, read under the lock.
    pub fn chain_snapshot(&self) -> (Vec<Block>, usize) {
        let ledger = self.ledger.lock();
        (ledger.chain().to_vec(), ledger.len())
    }

    pub fn pending_snapshot(&self) -> Vec<Transaction> {
        self.ledger.lock().pending().to_vec()
    }

    /// Add peers; returns the full peer list afterwards.
    ///
    /// Every address is checked before any is inserted, so one bad entry
    /// leaves the set untouched.
    pub fn register_peers<S: AsRef<str>>(&self, addresses: &[S]) -> Result<Vec<String>, NodeError> {
        let normalized = addresses
            .iter()
            .map(|a| crate::p2p::normalize_peer(a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let mut peers = self.peers.write();
        for authority in normalized {
            if peers.register(&authority)? {
                info!(target: "p2p", peer = %authority, "registered peer");
            }
        }
        Ok(peers.to_vec())
    }

    pub fn peers(&self) -> Vec<String> {
        self.peers.read().to_vec()
    }

    /// Run one round of longest-chain consensus against every known peer.
    pub async fn resolve_conflicts(&self) -> Result<ResolveOutcome, NodeError> {
        let peers = self.peers();
        let local_len = self.ledger.lock().len();
        let outcomes = fetch_all(self.source.as_ref(), &peers).await;
        let resolution = select_longest(local_len, outcomes);

        let mut ledger = self.ledger.lock();
        let replaced = match resolution.winner {
            // Re-check: the local chain may have grown while peers were fetched.
            Some(winner) if winner.chain.len() > ledger.len() => {
                info!(
                    target: "consensus",
                    peer = %winner.peer,
                    old_len = ledger.len(),
                    new_len = winner.chain.len(),
                    "replacing local chain"
                );
                ledger.replace_chain(winner.chain);
                true
            }
            _ => false,
        };
        Ok(ResolveOutcome {
            replaced,
            chain: ledger.chain().to_vec(),
        })
    }

    /// Stop in-flight and future proof searches.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    #[cfg(test)]
    pub(crate) fn with_ledger<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> R {
        f(&mut self.ledger.lock())
    }
}
