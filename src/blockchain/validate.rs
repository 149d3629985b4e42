use super::Block;
use super::hash::{hash_block, meets_difficulty};

/// Validate a whole chain: genesis, linkage, digests and proof-of-work.
///
/// Stops at the first violation. Never mutates or panics on its input.
pub fn chain_is_valid(chain: &[Block], difficulty: u32) -> bool {
    match chain.first() {
        Some(genesis) if *genesis == Block::genesis() => {}
        _ => return false,
    }

    chain.windows(2).all(|pair| {
        let (prev, current) = (&pair[0], &pair[1]);

        if current.previous_hash != prev.hash || current.index != prev.index + 1 {
            return false;
        }

        let expected = hash_block(&current.previous_hash, current.nonce, &current.data());
        current.hash == expected && meets_difficulty(&current.hash, difficulty)
    })
}
