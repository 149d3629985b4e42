use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::{MINING_REWARD, REWARD_SENDER};

/// A value transfer between two addresses. Field order is part of the
/// canonical hash preimage and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
    pub sender: String,
    pub recipient: String,
    #[serde(alias = "transactionId")]
    pub id: String,
}

impl Transaction {
    /// Build a transaction with a fresh opaque id (dashless UUID).
    pub fn new(amount: f64, sender: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            amount,
            sender: sender.into(),
            recipient: recipient.into(),
            id: new_id(),
        }
    }

    /// Reward paid by the system to `recipient` for mining a block.
    pub fn reward(recipient: impl Into<String>) -> Self {
        Self::new(MINING_REWARD, REWARD_SENDER, recipient)
    }

    pub fn is_reward(&self) -> bool {
        self.sender == REWARD_SENDER
    }
}

/// Random identifier in the same shape the node uses for its own address.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Integral amounts are written without a fractional part (`10`, not `10.0`),
/// matching how JavaScript peers render numbers into the hash preimage.
fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if amount.fract() == 0.0 && amount.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}
