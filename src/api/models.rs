use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::blockchain::explorer::AddressAggregate;
use crate::blockchain::{Block, Ledger};
use crate::network::{FanoutReport, HttpPeerClient, PeerNetwork};
use crate::transaction::Transaction;

/// Shared application state: the ledger, the peer network and the address
/// mining rewards are paid to.
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub network: PeerNetwork<HttpPeerClient>,
    pub node_address: String,
}

impl AppState {
    pub fn new(ledger: Ledger, network: PeerNetwork<HttpPeerClient>, node_address: String) -> Self {
        Self {
            ledger: Arc::new(ledger),
            network,
            node_address,
        }
    }
}

#[derive(Serialize)]
pub struct NoteResponse {
    pub note: String,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub note: &'static str,
    pub block: Block,
    pub broadcast: FanoutReport,
    pub reward: Transaction,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveBlockResponse {
    pub note: &'static str,
    pub accepted: bool,
    pub new_block: Block,
}

#[derive(Serialize)]
pub struct ConsensusResponse<'a> {
    pub note: &'static str,
    pub replaced: bool,
    pub chain: &'a [Block],
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub amount: f64,
    pub sender: String,
    pub recipient: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastTxResponse {
    pub note: String,
    pub transaction: Transaction,
    pub block_index: u64,
    pub broadcast: FanoutReport,
}

/* ---------- Node Registration Models ---------- */

#[derive(Serialize)]
pub struct RegisterBroadcastResponse {
    pub note: &'static str,
    pub registered: bool,
    pub announced: FanoutReport,
    pub introduced: FanoutReport,
}

/* ---------- Explorer Models ---------- */

#[derive(Serialize)]
pub struct BlockResponse {
    pub block: Block,
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub transaction: Transaction,
    pub block: Block,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub address: String,
    pub address_data: AddressAggregate,
}
