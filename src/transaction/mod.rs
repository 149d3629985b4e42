pub mod model;
pub mod pool;

pub use model::Transaction;
pub use pool::TransactionPool;

/// Sender marking a coin minted by the node itself.
pub const REWARD_SENDER: &str = "00";

/// Amount paid to the miner, submitted after each mined block.
pub const MINING_REWARD: f64 = 12.5;
