use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, info, warn};

use super::models::{AppState, BroadcastTxResponse, NewTxRequest, NoteResponse};
use crate::network::Announcement;
use crate::transaction::Transaction;

/// Accept a transaction relayed by a peer (or posted directly).
#[post("/transaction")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<Transaction>,
) -> impl Responder {
    let tx = body.into_inner();
    if let Err(msg) = validate_fields(tx.amount, &tx.sender, &tx.recipient) {
        warn!("POST /transaction - rejected {}: {msg}", tx.id);
        return HttpResponse::BadRequest().body(msg);
    }

    let block_index = state.ledger.add_transaction(tx);
    HttpResponse::Ok().json(NoteResponse {
        note: format!("Transaction will be added in block {block_index}."),
    })
}

/// Create a transaction, queue it locally and relay it to every peer.
#[post("/transaction/broadcast")]
pub async fn broadcast_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    if let Err(msg) = validate_fields(body.amount, &body.sender, &body.recipient) {
        warn!("POST /transaction/broadcast - rejected: {msg}");
        return HttpResponse::BadRequest().body(msg);
    }

    let tx = Transaction::new(body.amount, body.sender.trim(), body.recipient.trim());
    debug!("POST /transaction/broadcast - built id={}", tx.id);
    let block_index = state.ledger.add_transaction(tx.clone());

    let peers = state.ledger.peers();
    let broadcast = state
        .network
        .broadcast(&peers, &Announcement::Transaction(tx.clone()))
        .await;

    info!(
        "POST /transaction/broadcast - id={} relayed to {}/{} peers",
        tx.id,
        broadcast.delivered.len(),
        peers.len()
    );

    HttpResponse::Ok().json(BroadcastTxResponse {
        note: format!("Transaction created; it will be added in block {block_index}."),
        transaction: tx,
        block_index,
        broadcast,
    })
}

/// Boundary checks; the ledger assumes well-formed transactions.
fn validate_fields(amount: f64, sender: &str, recipient: &str) -> Result<(), &'static str> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err("amount must be a positive number");
    }
    if sender.trim().is_empty() || recipient.trim().is_empty() {
        return Err("sender and recipient are required");
    }
    Ok(())
}
