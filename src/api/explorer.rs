use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AddressResponse, AppState, BlockResponse, NoteResponse, TransactionResponse};

fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(NoteResponse {
        note: format!("{what} not found"),
    })
}

#[get("/block/{hash}")]
pub async fn get_block(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let hash = path.into_inner().0;
    match state.ledger.find_block(&hash) {
        Some(block) => HttpResponse::Ok().json(BlockResponse { block }),
        None => not_found("block"),
    }
}

#[get("/transaction/{id}")]
pub async fn get_transaction(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let id = path.into_inner().0;
    match state.ledger.find_transaction(&id) {
        Some((transaction, block)) => {
            HttpResponse::Ok().json(TransactionResponse { transaction, block })
        }
        None => not_found("transaction"),
    }
}

/// Confirmed sent/received totals and balance of an address.
#[get("/address/{address}")]
pub async fn get_address(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let address = path.into_inner().0;
    let address_data = state.ledger.address_aggregate(&address);
    HttpResponse::Ok().json(AddressResponse {
        address,
        address_data,
    })
}
