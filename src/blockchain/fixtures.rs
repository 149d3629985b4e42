//! Chain builders shared by tests.

use super::hash::hash_block;
use super::pow::proof_of_work;
use super::{Block, BlockData};
use crate::transaction::Transaction;

pub const TEST_DIFFICULTY: u32 = 2;

/// Mine a block on top of `prev` holding `transactions`.
pub fn mine_on(prev: &Block, transactions: Vec<Transaction>) -> Block {
    let data = BlockData {
        transactions,
        index: prev.index + 1,
    };
    let nonce = proof_of_work(&prev.hash, &data, TEST_DIFFICULTY);
    let hash = hash_block(&prev.hash, nonce, &data);
    Block::sealed(data, nonce, prev.hash.clone(), hash)
}

/// A valid chain of `len` blocks (genesis included), one transaction per
/// mined block, tagged with `tag` so different forks differ.
pub fn chain_of(len: usize, tag: &str) -> Vec<Block> {
    let mut chain = vec![Block::genesis()];
    while chain.len() < len {
        let prev = chain.last().unwrap().clone();
        let tx = Transaction::new(1.0, tag, format!("{tag}-{}", prev.index));
        chain.push(mine_on(&prev, vec![tx]));
    }
    chain
}

pub fn transfer(amount: f64, sender: &str, recipient: &str) -> Transaction {
    Transaction::new(amount, sender, recipient)
}
