//! Compact difficulty targets and the nonce search used for devnet genesis blocks.

use std::ops::RangeInclusive;

use log::debug;
use osmium_shared_types::Hash256;
use primitive_types::U256;

use crate::block::{sha256d, BlockHeader};
use crate::error::{ConsensusError, ConsensusResult};

/// Hash function a header's proof of work is measured with.
///
/// The production header hash lives outside this crate; callers that have it
/// plug it in here so genesis self-checks can cover the header hash too.
pub trait PowHasher: Send + Sync {
    fn pow_hash(&self, header: &BlockHeader) -> Hash256;
}

/// Double SHA-256 over the 80-byte header.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256dHasher;

impl PowHasher for Sha256dHasher {
    fn pow_hash(&self, header: &BlockHeader) -> Hash256 {
        sha256d(&header.serialize())
    }
}

/// Expands an `nBits` value into a 256-bit target.
///
/// Negative, overflowing and zero targets are rejected.
pub fn compact_to_target(bits: u32) -> ConsensusResult<U256> {
    let size = bits >> 24;
    let mut word = bits & 0x007f_ffff;

    let negative = word != 0 && (bits & 0x0080_0000) != 0;
    let overflow = word != 0
        && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
    if negative || overflow {
        return Err(ConsensusError::InvalidCompactTarget(bits));
    }

    let target = if size <= 3 {
        word >>= 8 * (3 - size);
        U256::from(word)
    } else {
        U256::from(word) << (8 * (size - 3) as usize)
    };

    if target.is_zero() {
        return Err(ConsensusError::InvalidCompactTarget(bits));
    }
    Ok(target)
}

/// Interprets a hash as the 256-bit number proof of work compares against.
pub fn hash_to_u256(hash: &Hash256) -> U256 {
    U256::from_little_endian(hash.as_bytes())
}

pub fn hash_meets_target(hash: &Hash256, target: &U256) -> bool {
    hash_to_u256(hash) <= *target
}

/// Tries every nonce in `nonces` until the header hash meets its own `bits`.
pub fn search_nonce(
    mut header: BlockHeader,
    nonces: RangeInclusive<u32>,
    hasher: &dyn PowHasher,
) -> ConsensusResult<BlockHeader> {
    let target = compact_to_target(header.bits)?;
    let (start, end) = (*nonces.start(), *nonces.end());

    for nonce in nonces {
        header.nonce = nonce;
        if hash_meets_target(&hasher.pow_hash(&header), &target) {
            debug!("Found nonce {} for target {:#010x}", nonce, header.bits);
            return Ok(header);
        }
    }

    Err(ConsensusError::NonceSpaceExhausted { start, end, bits: header.bits })
}
