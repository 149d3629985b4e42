use super::Transaction;

/// Ordered pool of transactions not yet included in a committed block.
///
/// No deduplication by id: the same transaction arriving over two
/// propagation paths is stored twice.
#[derive(Debug, Default, Clone)]
pub struct TransactionPool {
    pending: Vec<Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `tx` and return the index of the block it is expected to land in.
    pub fn add(&mut self, tx: Transaction, last_committed_index: u64) -> u64 {
        self.pending.push(tx);
        last_committed_index + 1
    }

    /// Take the whole pool, leaving it empty.
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending)
    }

    /// Remove the first `count` transactions (those sealed into a mined
    /// block), keeping anything that arrived after the mining snapshot.
    pub fn drain_front(&mut self, count: usize) -> Vec<Transaction> {
        let count = count.min(self.pending.len());
        self.pending.drain(..count).collect()
    }

    /// Discard the pool and install `transactions` verbatim.
    pub fn replace(&mut self, transactions: Vec<Transaction>) {
        self.pending = transactions;
    }

    pub fn snapshot(&self) -> Vec<Transaction> {
        self.pending.clone()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
