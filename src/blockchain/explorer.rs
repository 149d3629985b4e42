//! Read-only lookups over a committed chain. Pending transactions are never
//! consulted.

use serde::Serialize;

use super::Block;
use crate::transaction::Transaction;

/// Confirmed activity of a single address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressAggregate {
    pub sent: f64,
    pub received: f64,
    pub balance: f64,
    pub transactions: Vec<Transaction>,
}

pub fn find_block<'a>(chain: &'a [Block], hash: &str) -> Option<&'a Block> {
    chain.iter().find(|b| b.hash == hash)
}

/// Locate a confirmed transaction together with the block holding it.
pub fn find_transaction<'a>(chain: &'a [Block], id: &str) -> Option<(&'a Transaction, &'a Block)> {
    chain.iter().find_map(|block| {
        block
            .transactions
            .iter()
            .find(|tx| tx.id == id)
            .map(|tx| (tx, block))
    })
}

pub fn address_aggregate(chain: &[Block], address: &str) -> AddressAggregate {
    let mut sent = 0.0;
    let mut received = 0.0;
    let mut transactions = Vec::new();

    for tx in chain.iter().flat_map(|b| b.transactions.iter()) {
        let outgoing = tx.sender == address;
        let incoming = tx.recipient == address;
        if outgoing {
            sent += tx.amount;
        }
        if incoming {
            received += tx.amount;
        }
        if outgoing || incoming {
            transactions.push(tx.clone());
        }
    }

    AddressAggregate {
        sent,
        received,
        balance: received - sent,
        transactions,
    }
}
