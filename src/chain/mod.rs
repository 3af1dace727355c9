//! The ledger: the block chain plus the pool of transactions waiting for a block.
//!
//! `Ledger` has no interior locking. The node keeps it behind a single mutex so
//! that sealing a block (snapshot pool, clear pool, append) and swapping the
//! chain during consensus each happen as one critical section.

pub mod accept;

pub use accept::{is_valid_chain, validate_chain};

use crate::block::{now_secs, Block, Transaction};
use crate::consensus_pow::hash_block;
use crate::error::NodeError;
use crate::genesis::genesis_block;

#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Ledger {
    /// A ledger holding only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![genesis_block()],
            pending: Vec::new(),
        }
    }

    /// Queue a transaction; returns the index of the block that will hold it.
    pub fn new_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: i64,
    ) -> u64 {
        self.submit(Transaction::new(sender, recipient, amount))
    }

    pub fn submit(&mut self, tx: Transaction) -> u64 {
        self.pending.push(tx);
        self.chain.len() as u64 + 1
    }

    /// Seal the pending pool into a new block and append it.
    ///
    /// `previous_hash` defaults to the hash of the current last block.
    pub fn new_block(&mut self, proof: u64, previous_hash: Option<String>) -> Result<Block, NodeError> {
        let previous_hash = match previous_hash {
            Some(h) => h,
            None => hash_block(self.last_block()?),
        };
        let block = Block {
            index: self.chain.len() as u64 + 1,
            timestamp: now_secs(),
            transactions: std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        };
        self.chain.push(block.clone());
        tracing::info!(
            target: "chain",
            index = block.index,
            proof = block.proof,
            txs = block.transactions.len(),
            "sealed block"
        );
        Ok(block)
    }

    /// Add the miner's reward to the pool and seal, with nothing in between.
    pub fn seal_with_reward(&mut self, proof: u64, miner: &str) -> Result<Block, NodeError> {
        self.pending.push(Transaction::reward(miner));
        self.new_block(proof, None)
    }

    /// Seal with reward only if the tip still hashes to `expected_tip`.
    ///
    /// `None` means the chain moved on and `proof` was found for a stale block.
    pub fn seal_on_tip(
        &mut self,
        expected_tip: &str,
        proof: u64,
        miner: &str,
    ) -> Result<Option<Block>, NodeError> {
        if hash_block(self.last_block()?) != expected_tip {
            return Ok(None);
        }
        self.seal_with_reward(proof, miner).map(Some)
    }

    pub fn last_block(&self) -> Result<&Block, NodeError> {
        self.chain.last().ok_or(NodeError::EmptyChain)
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Swap in a whole new chain. The pending pool is kept.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }

    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            chain: Vec::new(),
            pending: Vec::new(),
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
