mod chain;
mod explorer;
mod health;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::{self, ServiceConfig};

use crate::network::API_PREFIX;
pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .service(health::health_check)
            .service(chain::get_blockchain)
            .service(chain::mine_block)
            .service(chain::receive_new_block)
            .service(chain::consensus)
            .service(tx::post_transaction)
            .service(tx::broadcast_transaction)
            .service(nodes::register_and_broadcast_node)
            .service(nodes::register_node)
            .service(nodes::register_nodes_bulk)
            .service(explorer::get_block)
            .service(explorer::get_transaction)
            .service(explorer::get_address),
    );
}
