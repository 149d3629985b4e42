pub mod block;
pub mod consensus;
pub mod explorer;
pub mod hash;
pub mod ledger;
pub mod pow;
pub mod validate;

pub use block::{Block, BlockData, ChainSnapshot};
pub use ledger::Ledger;

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Sentinel used for the genesis block's hash and previous hash.
pub const GENESIS_HASH: &str = "0";

/// Nonce carried by the genesis block.
pub const GENESIS_NONCE: u64 = 100;

#[cfg(test)]
pub(crate) mod fixtures;
