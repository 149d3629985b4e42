use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{GENESIS_HASH, GENESIS_NONCE};
use crate::transaction::Transaction;

/// A single block in the chain holding an ordered list of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // milliseconds since Unix epoch (UTC)
    pub transactions: Vec<Transaction>,
    pub nonce: u64,
    pub hash: String,
    #[serde(alias = "previousBlockHash")]
    pub previous_hash: String,
}

/// The part of a block candidate covered by proof-of-work, besides the
/// previous hash and nonce. Field order is part of the hash preimage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    pub transactions: Vec<Transaction>,
    pub index: u64,
}

/// What a node exposes to peers querying its chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub pending_transactions: Vec<Transaction>,
}

impl Block {
    /// The canonical genesis block shared by every valid chain. It is not
    /// mined; its hash fields carry a fixed sentinel.
    pub fn genesis() -> Self {
        Self {
            index: 1,
            timestamp: 0,
            transactions: Vec::new(),
            nonce: GENESIS_NONCE,
            hash: GENESIS_HASH.to_string(),
            previous_hash: GENESIS_HASH.to_string(),
        }
    }

    /// Assemble a block from a solved proof-of-work search.
    pub fn sealed(data: BlockData, nonce: u64, previous_hash: String, hash: String) -> Self {
        Self {
            index: data.index,
            timestamp: Utc::now().timestamp_millis(),
            transactions: data.transactions,
            nonce,
            hash,
            previous_hash,
        }
    }

    /// Proof-of-work payload this block was mined over.
    pub fn data(&self) -> BlockData {
        BlockData {
            transactions: self.transactions.clone(),
            index: self.index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, BlockData, ChainSnapshot};
    use crate::transaction::Transaction;

    #[test]
    fn genesis_is_fixed() {
        let a = Block::genesis();
        let b = Block::genesis();
        assert_eq!(a, b);
        assert_eq!(a.index, 1);
        assert_eq!(a.nonce, 100);
        assert_eq!(a.hash, "0");
        assert_eq!(a.previous_hash, "0");
        assert!(a.transactions.is_empty());
    }

    #[test]
    fn sealed_block_carries_its_data() {
        let tx = Transaction::new(5.0, "a", "b");
        let data = BlockData {
            transactions: vec![tx.clone()],
            index: 2,
        };
        let block = Block::sealed(data.clone(), 42, "prev".into(), "00ab".into());
        assert_eq!(block.index, 2);
        assert_eq!(block.nonce, 42);
        assert_eq!(block.previous_hash, "prev");
        assert_eq!(block.data(), data);
        assert!(block.timestamp > 0);
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let snapshot = ChainSnapshot {
            chain: vec![Block::genesis()],
            pending_transactions: vec![],
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("pendingTransactions").is_some());
        assert_eq!(value["chain"][0]["previousHash"], "0");
    }

    #[test]
    fn accepts_legacy_previous_hash_field() {
        let json = r#"{"index":1,"timestamp":0,"transactions":[],"nonce":100,"hash":"0","previousBlockHash":"0"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block, Block::genesis());
    }
}
