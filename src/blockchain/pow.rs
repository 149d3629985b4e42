use super::BlockData;
use super::hash::{hash_block, meets_difficulty};

/// How many nonces are tried between two checks of the cancel signal.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Find the smallest nonce whose digest satisfies `difficulty`.
///
/// Unbounded brute force counting up from zero.
pub fn proof_of_work(previous_hash: &str, data: &BlockData, difficulty: u32) -> u64 {
    let mut nonce = 0u64;
    while !meets_difficulty(&hash_block(previous_hash, nonce, data), difficulty) {
        nonce = nonce.wrapping_add(1);
    }
    nonce
}

/// Same search as [`proof_of_work`], abandoned with `None` once `cancelled`
/// reports true.
pub fn proof_of_work_until<F>(
    previous_hash: &str,
    data: &BlockData,
    difficulty: u32,
    cancelled: F,
) -> Option<u64>
where
    F: Fn() -> bool,
{
    let mut nonce = 0u64;
    loop {
        if nonce % CANCEL_CHECK_INTERVAL == 0 && cancelled() {
            return None;
        }
        if meets_difficulty(&hash_block(previous_hash, nonce, data), difficulty) {
            return Some(nonce);
        }
        nonce = nonce.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{proof_of_work, proof_of_work_until};
    use crate::blockchain::BlockData;
    use crate::blockchain::hash::{hash_block, meets_difficulty};
    use crate::transaction::Transaction;

    fn empty(index: u64) -> BlockData {
        BlockData {
            transactions: vec![],
            index,
        }
    }

    #[test]
    fn mining_produces_leading_zeros() {
        let data = empty(2);
        let nonce = proof_of_work("abc", &data, 2);
        assert!(hash_block("abc", nonce, &data).starts_with("00"));
    }

    #[test]
    fn returns_smallest_satisfying_nonce() {
        let data = BlockData {
            transactions: vec![Transaction::new(3.0, "a", "b")],
            index: 5,
        };
        let nonce = proof_of_work("prev", &data, 2);
        for smaller in 0..nonce {
            assert!(!meets_difficulty(&hash_block("prev", smaller, &data), 2));
        }
    }

    #[test]
    fn search_is_deterministic() {
        let data = empty(9);
        assert_eq!(proof_of_work("x", &data, 2), proof_of_work("x", &data, 2));
    }

    #[test]
    fn zero_difficulty_accepts_first_nonce() {
        assert_eq!(proof_of_work("x", &empty(2), 0), 0);
    }

    #[test]
    fn cancellable_search_agrees_when_not_cancelled() {
        let data = empty(3);
        assert_eq!(
            proof_of_work_until("abc", &data, 2, || false),
            Some(proof_of_work("abc", &data, 2))
        );
    }

    #[test]
    fn cancelled_search_gives_up() {
        // 64 leading zeros is unreachable in practice
        assert_eq!(proof_of_work_until("abc", &empty(2), 64, || true), None);
    }

    #[test]
    fn cancel_signal_is_polled_during_search() {
        use std::cell::Cell;
        let polls = Cell::new(0u32);
        let result = proof_of_work_until("abc", &empty(2), 64, || {
            polls.set(polls.get() + 1);
            polls.get() > 3
        });
        assert_eq!(result, None);
        assert_eq!(polls.get(), 4);
    }
}
