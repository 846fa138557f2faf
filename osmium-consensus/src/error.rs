use osmium_shared_types::Hash256;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsensusError {
    #[error("Genesis merkle root mismatch: expected {expected}, computed {actual}")]
    GenesisMerkleMismatch { expected: Hash256, actual: Hash256 },

    #[error("Genesis hash mismatch: expected {expected}, computed {actual}")]
    GenesisHashMismatch { expected: Hash256, actual: Hash256 },

    #[error("Invalid compact target: {0:#010x}")]
    InvalidCompactTarget(u32),

    #[error("No nonce in {start}..{end} satisfies target {bits:#010x}")]
    NonceSpaceExhausted { start: u32, end: u32, bits: u32 },
}

pub type ConsensusResult<T> = std::result::Result<T, ConsensusError>;
