//! The complete parameter record of one network profile.

use osmium_consensus::{Block, ConsensusParams};
use osmium_shared_types::{
    AssumeutxoData, Base58Prefixes, Base58Type, ChainTxData, Checkpoint, Hash256, Network,
};
use serde::Serialize;

/// Everything a node needs to know about the chain it runs on.
///
/// Built by the registry, adjusted by [`crate::apply_overrides`] during
/// startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainParams {
    pub network: Network,
    /// `devnet` or `devnet-<name>`; `None` on every other profile
    pub devnet_name: Option<String>,
    pub consensus: ConsensusParams,

    #[serde(skip)]
    pub genesis: Block,
    #[serde(skip)]
    pub devnet_genesis: Option<Block>,

    /// Network magic prefixed to every P2P message
    pub message_start: [u8; 4],
    pub default_port: u16,
    pub default_platform_p2p_port: u16,
    pub default_platform_http_port: u16,
    pub prune_after_height: u64,
    /// Estimated blockchain size in GB
    pub assumed_blockchain_size: u64,
    /// Estimated chain state size in GB
    pub assumed_chain_state_size: u64,

    pub dns_seeds: Vec<String>,
    pub base58_prefixes: Base58Prefixes,
    /// BIP44 coin type
    pub ext_coin_type: u32,

    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub require_routable_external_ip: bool,
    pub is_test_chain: bool,
    pub allow_multiple_addresses_from_group: bool,
    pub allow_multiple_ports: bool,
    /// Seconds before retrying a failed LLMQ connection
    pub llmq_connection_retry_timeout: i64,
    pub is_mockable_chain: bool,

    pub pool_min_participants: i32,
    pub pool_max_participants: i32,
    /// Seconds a fulfilled network request is remembered
    pub fulfilled_request_expire_time: i64,

    pub spork_addresses: Vec<String>,
    pub min_spork_keys: i32,

    pub checkpoints: Vec<Checkpoint>,
    pub assumeutxo: Vec<AssumeutxoData>,
    pub chain_tx_data: ChainTxData,
}

impl ChainParams {
    pub fn network_id(&self) -> &'static str {
        self.network.as_str()
    }

    pub fn genesis_hash(&self) -> Hash256 {
        self.consensus.hash_genesis_block
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }

    /// Snapshot recorded for `height`, if any.
    pub fn assumeutxo_for_height(&self, height: u32) -> Option<&AssumeutxoData> {
        self.assumeutxo.iter().find(|data| data.height == height)
    }

    /// Hash a checkpoint pins at `height`.
    pub fn checkpoint_at(&self, height: u32) -> Option<Hash256> {
        self.checkpoints.iter().find(|c| c.height == height).map(|c| c.hash)
    }

    pub fn last_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }
}
