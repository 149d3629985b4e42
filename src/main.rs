mod api;
mod blockchain;
mod config;
mod error;
mod network;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::io;

use api::AppState;
use blockchain::Ledger;
use config::NodeConfig;
use network::{HttpPeerClient, PeerNetwork};

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config =
        NodeConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let client = HttpPeerClient::new(config.peer_timeout).map_err(io::Error::other)?;

    let ledger = Ledger::new(config.difficulty, config.node_url.clone());
    ledger.add_peers(config.bootstrap_peers.iter().map(String::as_str));

    let node_address = transaction::model::new_id();
    info!(
        "⛓️ Starting ledger node {} at http://{}:{} (difficulty={}, peers={}, reward address={})",
        config.node_url,
        config.host,
        config.port,
        ledger.difficulty(),
        ledger.peers().len(),
        node_address
    );

    let state = web::Data::new(AppState::new(
        ledger,
        PeerNetwork::new(client, config.peer_timeout),
        node_address,
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
