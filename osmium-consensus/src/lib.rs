//! Consensus algorithms over the shared parameter types: genesis synthesis,
//! compact targets, the LLMQ catalog and presets, masternode activation
//! checks and quorum size adaptation.

pub mod activation;
pub mod adaptation;
pub mod block;
pub mod catalog;
pub mod error;
pub mod genesis;
pub mod params;
pub mod pow;
pub mod presets;

pub use activation::is_valid_mn_activation;
pub use adaptation::{AdaptationOutcome, LlmqAdapter, QuorumTier};
pub use block::{sha256d, Block, BlockHeader, CoinbaseTransaction, ScriptBuilder};
pub use catalog::LlmqCatalog;
pub use error::{ConsensusError, ConsensusResult};
pub use genesis::{
    create_devnet_genesis_block, create_genesis_block, find_devnet_genesis_block, verify_genesis,
    GenesisExpectation,
};
pub use params::{ConsensusParams, LlmqRole};
pub use pow::{compact_to_target, search_nonce, PowHasher, Sha256dHasher};
