use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::consensus::resolve;
use super::explorer::{self, AddressAggregate};
use super::hash::hash_block;
use super::pow::proof_of_work_until;
use super::{Block, BlockData, ChainSnapshot};
use crate::transaction::{Transaction, TransactionPool};

/// Everything guarded by the ledger lock.
#[derive(Debug)]
struct LedgerState {
    chain: Vec<Block>,
    pool: TransactionPool,
    peers: Vec<String>,
}

impl LedgerState {
    fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds at least the genesis block")
    }
}

/// Inputs of a proof-of-work search, captured at one chain epoch.
#[derive(Debug, Clone)]
struct MiningJob {
    epoch: u64,
    previous_hash: String,
    data: BlockData,
    pool_len: usize,
}

/// Sole owner of the chain, the pending pool and the peer set.
///
/// All mutations happen under one mutex. Every chain mutation bumps `epoch`,
/// which in-flight mining searches poll to notice their snapshot went stale.
#[derive(Debug)]
pub struct Ledger {
    state: Mutex<LedgerState>,
    epoch: AtomicU64,
    difficulty: u32,
    node_url: String,
}

impl Ledger {
    /// Initialize a ledger holding only the genesis block.
    pub fn new(difficulty: u32, node_url: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                chain: vec![Block::genesis()],
                pool: TransactionPool::new(),
                peers: Vec::new(),
            }),
            epoch: AtomicU64::new(0),
            difficulty,
            node_url: node_url.into(),
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        // no method panics mid-mutation, so a poisoned state is still consistent
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /* ---------- snapshots ---------- */

    pub fn last_block(&self) -> Block {
        self.state().last_block().clone()
    }

    pub fn chain(&self) -> Vec<Block> {
        self.state().chain.clone()
    }

    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.state().pool.snapshot()
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        let state = self.state();
        ChainSnapshot {
            chain: state.chain.clone(),
            pending_transactions: state.pool.snapshot(),
        }
    }

    /* ---------- transactions ---------- */

    /// Queue `tx` and return the index of the block it should land in.
    pub fn add_transaction(&self, tx: Transaction) -> u64 {
        let mut state = self.state();
        let last_index = state.last_block().index;
        let kind = if tx.is_reward() { "reward" } else { "transfer" };
        debug!(
            "pool += {kind} {} ({} -> {}), {} pending",
            tx.id,
            tx.sender,
            tx.recipient,
            state.pool.len() + 1
        );
        state.pool.add(tx, last_index)
    }

    /* ---------- mining ---------- */

    /// Mine and commit the next block from the current pool.
    ///
    /// The proof-of-work search runs without holding the lock. If the chain
    /// moves while searching, the attempt is dropped and restarted on the new
    /// tip. Blocking; call from a worker thread.
    pub fn mine_next(&self) -> Block {
        loop {
            let job = self.mining_job();
            let solved = proof_of_work_until(&job.previous_hash, &job.data, self.difficulty, || {
                self.epoch.load(Ordering::SeqCst) != job.epoch
            });

            match solved {
                Some(nonce) => {
                    if let Some(block) = self.commit_mined(&job, nonce) {
                        return block;
                    }
                    debug!("mined block #{} went stale before commit; retrying", job.data.index);
                }
                None => debug!("chain advanced while mining #{}; restarting", job.data.index),
            }
        }
    }

    fn mining_job(&self) -> MiningJob {
        let state = self.state();
        let last = state.last_block();
        let transactions = state.pool.snapshot();
        MiningJob {
            epoch: self.epoch.load(Ordering::SeqCst),
            previous_hash: last.hash.clone(),
            pool_len: transactions.len(),
            data: BlockData {
                transactions,
                index: last.index + 1,
            },
        }
    }

    /// Append the solved block unless the chain changed since `job` was taken.
    fn commit_mined(&self, job: &MiningJob, nonce: u64) -> Option<Block> {
        let mut state = self.state();
        if self.epoch.load(Ordering::SeqCst) != job.epoch {
            return None;
        }

        let hash = hash_block(&job.previous_hash, nonce, &job.data);
        let block = Block::sealed(job.data.clone(), nonce, job.previous_hash.clone(), hash);

        state.chain.push(block.clone());
        state.pool.drain_front(job.pool_len);
        self.bump_epoch();

        info!(
            "mined block #{} (nonce={}, txs={}, hash={})",
            block.index,
            block.nonce,
            block.transactions.len(),
            block.hash
        );
        Some(block)
    }

    /* ---------- peer data ---------- */

    /// Accept a block announced by a peer if it links onto our tip.
    ///
    /// Only linkage is checked (previous hash and index); the digest and
    /// proof-of-work are not recomputed here.
    pub fn receive_block(&self, block: Block) -> bool {
        let mut state = self.state();
        let last = state.last_block();
        let linked = block.previous_hash == last.hash && block.index == last.index + 1;

        if !linked {
            warn!(
                "rejected block #{} (prev={}): tip is #{} ({})",
                block.index, block.previous_hash, last.index, last.hash
            );
            return false;
        }

        info!("accepted block #{} from peer (hash={})", block.index, block.hash);
        state.chain.push(block);
        state.pool.drain();
        self.bump_epoch();
        true
    }

    /// Replace chain and pool with `candidate` if it is still longer than
    /// the local chain. The caller has already validated it.
    fn adopt(&self, candidate: ChainSnapshot) -> bool {
        let mut state = self.state();
        if candidate.chain.len() <= state.chain.len() {
            debug!(
                "candidate chain ({} blocks) no longer longer than local ({})",
                candidate.chain.len(),
                state.chain.len()
            );
            return false;
        }

        info!(
            "replacing local chain ({} blocks) with peer chain ({} blocks)",
            state.chain.len(),
            candidate.chain.len()
        );
        state.chain = candidate.chain;
        state.pool.replace(candidate.pending_transactions);
        self.bump_epoch();
        true
    }

    /// Run fork choice against peer snapshots and adopt the winner, if any.
    /// Returns whether the local chain was replaced.
    pub fn resolve_and_adopt(&self, candidates: &[ChainSnapshot]) -> bool {
        // validation runs outside the lock; adopt() re-checks length
        let local = self.chain();
        match resolve(&local, candidates, self.difficulty) {
            Some(winner) => self.adopt(winner.clone()),
            None => {
                debug!("consensus kept local chain ({} blocks)", local.len());
                false
            }
        }
    }

    /* ---------- queries ---------- */

    pub fn find_block(&self, hash: &str) -> Option<Block> {
        explorer::find_block(&self.state().chain, hash).cloned()
    }

    pub fn find_transaction(&self, id: &str) -> Option<(Transaction, Block)> {
        explorer::find_transaction(&self.state().chain, id)
            .map(|(tx, block)| (tx.clone(), block.clone()))
    }

    pub fn address_aggregate(&self, address: &str) -> AddressAggregate {
        explorer::address_aggregate(&self.state().chain, address)
    }

    /* ---------- peer set ---------- */

    /// Record a peer. Our own URL and duplicates are ignored (returns false).
    pub fn add_peer(&self, url: &str) -> bool {
        let url = url.trim_end_matches('/');
        if url.is_empty() || url == self.node_url {
            return false;
        }
        let mut state = self.state();
        if state.peers.iter().any(|p| p == url) {
            return false;
        }
        state.peers.push(url.to_string());
        info!("registered peer {url}");
        true
    }

    /// Record several peers; returns how many were new.
    pub fn add_peers<'a>(&self, urls: impl IntoIterator<Item = &'a str>) -> usize {
        urls.into_iter().filter(|url| self.add_peer(url)).count()
    }

    pub fn peers(&self) -> Vec<String> {
        self.state().peers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::blockchain::fixtures::{TEST_DIFFICULTY, chain_of, mine_on, transfer};
    use crate::blockchain::validate::chain_is_valid;
    use crate::blockchain::{Block, ChainSnapshot};
    use crate::blockchain::pow::proof_of_work;
    use std::sync::Arc;

    const SELF_URL: &str = "http://localhost:3001";

    fn ledger() -> Ledger {
        Ledger::new(TEST_DIFFICULTY, SELF_URL)
    }

    #[test]
    fn starts_with_genesis() {
        let l = ledger();
        assert_eq!(l.chain(), vec![Block::genesis()]);
        assert_eq!(l.last_block().index, 1);
        assert!(l.pending_transactions().is_empty());
    }

    #[test]
    fn add_transaction_targets_next_block() {
        let l = ledger();
        assert_eq!(l.add_transaction(transfer(1.0, "a", "b")), 2);
        l.mine_next();
        assert_eq!(l.add_transaction(transfer(1.0, "a", "b")), 3);
    }

    #[test]
    fn mine_next_commits_valid_block_and_drains_pool() {
        let l = ledger();
        l.add_transaction(transfer(5.0, "a", "b"));
        l.add_transaction(transfer(2.0, "b", "c"));

        let block = l.mine_next();
        assert_eq!(block.index, 2);
        assert_eq!(block.transactions.len(), 2);
        assert_eq!(block.previous_hash, Block::genesis().hash);
        assert!(block.hash.starts_with("00"));
        assert_eq!(l.last_block(), block);
        assert!(l.pending_transactions().is_empty());
        assert!(chain_is_valid(&l.chain(), TEST_DIFFICULTY));
    }

    #[test]
    fn stale_mining_result_is_discarded() {
        let l = ledger();
        let job = l.mining_job();
        let nonce = proof_of_work(&job.previous_hash, &job.data, TEST_DIFFICULTY);

        let competitor = mine_on(&Block::genesis(), vec![]);
        assert!(l.receive_block(competitor.clone()));

        assert!(l.commit_mined(&job, nonce).is_none());
        assert_eq!(l.chain(), vec![Block::genesis(), competitor]);
    }

    #[test]
    fn transactions_added_while_mining_survive_commit() {
        let l = ledger();
        l.add_transaction(transfer(1.0, "a", "b"));
        let job = l.mining_job();
        l.add_transaction(transfer(9.0, "late", "b"));

        let nonce = proof_of_work(&job.previous_hash, &job.data, TEST_DIFFICULTY);
        let block = l.commit_mined(&job, nonce).expect("commit");
        assert_eq!(block.transactions.len(), 1);

        let pending = l.pending_transactions();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].sender, "late");
    }

    #[test]
    fn concurrent_miners_never_fork_locally() {
        let l = Arc::new(ledger());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let l = Arc::clone(&l);
                std::thread::spawn(move || l.mine_next())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let chain = l.chain();
        assert_eq!(chain.len(), 5);
        assert!(chain_is_valid(&chain, TEST_DIFFICULTY));
    }

    #[test]
    fn receive_block_accepts_linked_block_and_clears_pool() {
        let l = ledger();
        l.add_transaction(transfer(1.0, "a", "b"));
        let block = mine_on(&Block::genesis(), vec![transfer(3.0, "x", "y")]);
        assert!(l.receive_block(block.clone()));
        assert_eq!(l.last_block(), block);
        assert!(l.pending_transactions().is_empty());
    }

    #[test]
    fn receive_block_rejects_bad_linkage() {
        let l = ledger();
        l.add_transaction(transfer(1.0, "a", "b"));

        let mut wrong_prev = mine_on(&Block::genesis(), vec![]);
        wrong_prev.previous_hash = "deadbeef".into();
        assert!(!l.receive_block(wrong_prev));

        let mut wrong_index = mine_on(&Block::genesis(), vec![]);
        wrong_index.index = 5;
        assert!(!l.receive_block(wrong_index));

        assert_eq!(l.chain().len(), 1);
        assert_eq!(l.pending_transactions().len(), 1);
    }

    #[test]
    fn longer_peer_chain_replaces_chain_and_pool() {
        let l = ledger();
        l.mine_next();
        l.mine_next();
        assert_eq!(l.chain().len(), 3);
        l.add_transaction(transfer(1.0, "local", "x"));

        let peer = ChainSnapshot {
            chain: chain_of(5, "peer"),
            pending_transactions: vec![transfer(7.0, "peer", "y")],
        };
        assert!(l.resolve_and_adopt(&[peer.clone()]));
        assert_eq!(l.chain(), peer.chain);
        assert_eq!(l.pending_transactions(), peer.pending_transactions);
    }

    #[test]
    fn shorter_peer_chain_leaves_ledger_untouched() {
        let l = ledger();
        l.mine_next();
        l.mine_next();
        let before = l.snapshot();

        let peer = ChainSnapshot {
            chain: chain_of(2, "peer"),
            pending_transactions: vec![],
        };
        assert!(!l.resolve_and_adopt(&[peer]));
        assert_eq!(l.snapshot(), before);
    }

    #[test]
    fn adoption_rechecks_length_at_commit() {
        let l = ledger();
        let candidate = ChainSnapshot {
            chain: chain_of(3, "peer"),
            pending_transactions: vec![],
        };
        l.mine_next();
        l.mine_next();
        l.mine_next();
        assert!(!l.adopt(candidate));
        assert_eq!(l.chain().len(), 4);
    }

    #[test]
    fn queries_read_committed_chain_only() {
        let l = ledger();
        let tx = transfer(10.0, "A", "B");
        l.add_transaction(tx.clone());
        assert!(l.find_transaction(&tx.id).is_none());

        let block = l.mine_next();
        l.add_transaction(transfer(99.0, "A", "B"));

        let (found, owner) = l.find_transaction(&tx.id).expect("confirmed");
        assert_eq!(found, tx);
        assert_eq!(owner.hash, block.hash);
        assert_eq!(l.find_block(&block.hash), Some(block));
        assert_eq!(l.address_aggregate("A").balance, -10.0);
        assert_eq!(l.address_aggregate("B").received, 10.0);
    }

    #[test]
    fn peer_set_dedups_and_skips_self() {
        let l = ledger();
        assert!(l.add_peer("http://localhost:3002"));
        assert!(!l.add_peer("http://localhost:3002"));
        assert!(!l.add_peer("http://localhost:3002/"));
        assert!(!l.add_peer(SELF_URL));
        assert_eq!(
            l.add_peers(["http://localhost:3003", "http://localhost:3002", SELF_URL]),
            1
        );
        assert_eq!(l.peers(), ["http://localhost:3002", "http://localhost:3003"]);
    }
}
