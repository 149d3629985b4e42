use super::validate::chain_is_valid;
use super::{Block, ChainSnapshot};

/// Longest-valid-chain fork choice.
///
/// Scans `candidates` in the order given (the order peers were queried) and
/// returns the longest one that is strictly longer than `local` and passes
/// full validation. Ties keep the incumbent: an equal-length chain, or a later
/// chain of the same length as the current best, never wins.
pub fn resolve<'a>(
    local: &[Block],
    candidates: &'a [ChainSnapshot],
    difficulty: u32,
) -> Option<&'a ChainSnapshot> {
    let mut max_len = local.len();
    let mut best = None;

    for candidate in candidates {
        if candidate.chain.len() > max_len && chain_is_valid(&candidate.chain, difficulty) {
            max_len = candidate.chain.len();
            best = Some(candidate);
        }
    }

    best
}
