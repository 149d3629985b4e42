use actix_web::{HttpResponse, Responder, post, web};
use log::info;

use super::models::{AppState, NoteResponse, RegisterBroadcastResponse};
use crate::network::Announcement;
use crate::network::message::{RegisterNodePayload, RegisterNodesBulkPayload};

/// Register a new node here, tell every known peer about it, then hand the
/// new node our full peer list (ourselves included).
#[post("/register-and-broadcast-node")]
pub async fn register_and_broadcast_node(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodePayload>,
) -> impl Responder {
    let new_node = body.new_node_url.trim().trim_end_matches('/').to_string();
    if new_node.is_empty() {
        return HttpResponse::BadRequest().body("newNodeUrl required");
    }

    let registered = state.ledger.add_peer(&new_node);
    let others: Vec<String> = state
        .ledger
        .peers()
        .into_iter()
        .filter(|p| *p != new_node)
        .collect();

    let announced = state
        .network
        .broadcast(
            &others,
            &Announcement::RegisterNode(RegisterNodePayload {
                new_node_url: new_node.clone(),
            }),
        )
        .await;

    let mut all_network_nodes = others;
    all_network_nodes.push(state.ledger.node_url().to_string());
    let introduced = state
        .network
        .broadcast(
            std::slice::from_ref(&new_node),
            &Announcement::RegisterNodesBulk(RegisterNodesBulkPayload { all_network_nodes }),
        )
        .await;

    info!(
        "registered {new_node} (new={registered}); announced to {} peers",
        announced.delivered.len()
    );

    HttpResponse::Ok().json(RegisterBroadcastResponse {
        note: "New node registered with network.",
        registered,
        announced,
        introduced,
    })
}

/// Register a single node announced by a peer.
#[post("/register-node")]
pub async fn register_node(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodePayload>,
) -> impl Responder {
    let note = if state.ledger.add_peer(body.new_node_url.trim()) {
        "New node registered."
    } else {
        "Node already known or is this node."
    };
    HttpResponse::Ok().json(NoteResponse { note: note.into() })
}

/// Register every node in a bulk list sent to a newly joined node.
#[post("/register-nodes-bulk")]
pub async fn register_nodes_bulk(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesBulkPayload>,
) -> impl Responder {
    let added = state
        .ledger
        .add_peers(body.all_network_nodes.iter().map(|url| url.trim()));
    HttpResponse::Ok().json(NoteResponse {
        note: format!(
            "Registered {added} of {} nodes.",
            body.all_network_nodes.len()
        ),
    })
}
