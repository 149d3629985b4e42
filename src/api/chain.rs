use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};
use std::sync::Arc;

use super::models::{AppState, ConsensusResponse, MineResponse, ReceiveBlockResponse};
use crate::network::Announcement;
use crate::network::message::NewBlockPayload;
use crate::transaction::Transaction;

/// Chain and pending pool, the shape peers fetch during consensus.
#[get("/blockchain")]
pub async fn get_blockchain(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.ledger.snapshot())
}

/// Mine the next block, announce it, then queue and announce the reward.
///
/// The reward is a regular pool transaction, so it lands in the following
/// block.
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let ledger = Arc::clone(&state.ledger);
    let block = match web::block(move || ledger.mine_next()).await {
        Ok(block) => block,
        Err(e) => {
            warn!("GET /mine - mining worker failed: {e}");
            return HttpResponse::InternalServerError().body("mining worker failed");
        }
    };

    let peers = state.ledger.peers();
    let broadcast = state
        .network
        .broadcast(&peers, &Announcement::block(block.clone()))
        .await;

    let reward = Transaction::reward(&state.node_address);
    state.ledger.add_transaction(reward.clone());
    state
        .network
        .broadcast(&peers, &Announcement::Transaction(reward.clone()))
        .await;

    info!(
        "GET /mine - block #{} announced to {}/{} peers, {} pending",
        block.index,
        broadcast.delivered.len(),
        peers.len(),
        state.ledger.pending_transactions().len()
    );

    HttpResponse::Ok().json(MineResponse {
        note: "New block mined and broadcast.",
        block,
        broadcast,
        reward,
    })
}

/// Block announced by a peer. Rejection is a normal answer, not an error.
#[post("/receive-new-block")]
pub async fn receive_new_block(
    state: web::Data<AppState>,
    body: web::Json<NewBlockPayload>,
) -> impl Responder {
    let block = body.into_inner().new_block;
    let accepted = state.ledger.receive_block(block.clone());
    let note = if accepted {
        "New block received and accepted."
    } else {
        "New block rejected."
    };

    HttpResponse::Ok().json(ReceiveBlockResponse {
        note,
        accepted,
        new_block: block,
    })
}

/// Ask every peer for its chain and adopt the longest valid one.
#[get("/consensus")]
pub async fn consensus(state: web::Data<AppState>) -> impl Responder {
    let peers = state.ledger.peers();
    let snapshots = state.network.fetch_chains(&peers).await;
    info!(
        "GET /consensus - {}/{} peers answered",
        snapshots.len(),
        peers.len()
    );

    let ledger = Arc::clone(&state.ledger);
    let replaced = match web::block(move || ledger.resolve_and_adopt(&snapshots)).await {
        Ok(replaced) => replaced,
        Err(e) => {
            warn!("GET /consensus - validation worker failed: {e}");
            return HttpResponse::InternalServerError().body("consensus worker failed");
        }
    };

    let chain = state.ledger.chain();
    if replaced {
        info!("GET /consensus - adopted chain of {} blocks", chain.len());
    }
    HttpResponse::Ok().json(ConsensusResponse {
        note: if replaced {
            "This chain has been replaced."
        } else {
            "Current chain has not been replaced."
        },
        replaced,
        chain: &chain,
    })
}
