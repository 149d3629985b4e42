use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::transaction::Transaction;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlockPayload {
    pub new_block: Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNodePayload {
    pub new_node_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNodesBulkPayload {
    pub all_network_nodes: Vec<String>,
}

/// Fire-and-forget message pushed to a peer.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Announcement {
    Block(NewBlockPayload),
    Transaction(Transaction),
    RegisterNode(RegisterNodePayload),
    RegisterNodesBulk(RegisterNodesBulkPayload),
}

impl Announcement {
    pub fn block(block: Block) -> Self {
        Self::Block(NewBlockPayload { new_block: block })
    }

    /// Route on the receiving node, relative to the API prefix.
    pub fn route(&self) -> &'static str {
        match self {
            Self::Block(_) => "/receive-new-block",
            Self::Transaction(_) => "/transaction",
            Self::RegisterNode(_) => "/register-node",
            Self::RegisterNodesBulk(_) => "/register-nodes-bulk",
        }
    }
}
