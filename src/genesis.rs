use crate::block::Block;
use crate::consensus_pow::hash_block;
use anyhow::{anyhow, Result};

/// Sentinel `previousHash` of the genesis block. Not a real digest.
pub const GENESIS_PREVIOUS_HASH: &str = "1";
/// Proof every node agrees the chain starts from.
pub const GENESIS_PROOF: u64 = 100;
pub const GENESIS_TIMESTAMP: f64 = 0.0;

/// **HARDCODED GENESIS HASH**
///
/// Hash of the canonical encoding of the genesis block:
/// `{"index":1,"previousHash":"1","proof":100,"timestamp":0.0,"transactions":[]}`
///
/// Nodes whose genesis hashes differently can never agree on a chain.
pub const GENESIS_HASH: &str = "379e4a45a75186a62cc46037bd956e2d0b9d1e4f2ad326ed8252db13396913fb";

pub fn genesis_block() -> Block {
    Block {
        index: 1,
        timestamp: GENESIS_TIMESTAMP,
        transactions: Vec::new(),
        proof: GENESIS_PROOF,
        previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
    }
}

/// Checks at startup that this build encodes genesis the way the network does.
pub fn validate_genesis_hash() -> Result<()> {
    let computed = hash_block(&genesis_block());
    if computed != GENESIS_HASH {
        return Err(anyhow!(
            "genesis hash mismatch: expected {}, computed {}",
            GENESIS_HASH,
            computed
        ));
    }
    tracing::info!("✅ genesis hash validated: {}", GENESIS_HASH);
    Ok(())
}

/// True if `first` is the block this node considers genesis.
pub fn is_genesis(first: &Block) -> bool {
    hash_block(first) == GENESIS_HASH
}
