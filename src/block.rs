//! Block and transaction records as they travel between nodes.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Sender used for mining rewards.
pub const REWARD_SENDER: &str = "0";
/// Amount credited to the miner of each block.
pub const MINING_REWARD: i64 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: i64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: i64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    pub fn reward(miner: impl Into<String>) -> Self {
        Self::new(REWARD_SENDER, miner, MINING_REWARD)
    }

    pub fn is_reward(&self) -> bool {
        self.sender == REWARD_SENDER
    }
}

/// Wire shape: `index`, `timestamp`, `transactions`, `proof`, `previousHash`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// 1-based position in the chain.
    pub index: u64,
    /// Seconds since the unix epoch.
    pub timestamp: f64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

pub fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
