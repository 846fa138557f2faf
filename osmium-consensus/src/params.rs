//! Consensus rule parameters of one network profile.

use osmium_shared_types::{Deployments, DevfeePayment, Hash256, LlmqParams, LlmqType};
use serde::Serialize;
use std::fmt;

use crate::catalog::LlmqCatalog;

/// Services that run on a designated quorum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmqRole {
    ChainLocks,
    InstantSend,
    Platform,
    Mnhf,
}

impl LlmqRole {
    pub const ALL: [LlmqRole; 4] =
        [LlmqRole::ChainLocks, LlmqRole::InstantSend, LlmqRole::Platform, LlmqRole::Mnhf];

    /// Whether the role requires a rotating (DIP0024) quorum type.
    pub fn requires_rotation(self) -> bool {
        matches!(self, LlmqRole::InstantSend)
    }
}

impl fmt::Display for LlmqRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LlmqRole::ChainLocks => "chainlocks",
            LlmqRole::InstantSend => "instantsend",
            LlmqRole::Platform => "platform",
            LlmqRole::Mnhf => "mnhf",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusParams {
    pub hash_genesis_block: Hash256,
    /// Second block of a devnet, `None` on every other profile
    pub hash_devnet_genesis_block: Option<Hash256>,

    // Subsidy, budget and governance
    pub subsidy_halving_interval: i32,
    pub masternode_payments_start_block: i32,
    pub instant_send_confirmations_required: i32,
    pub instant_send_keep_lock: i32,
    pub budget_payments_start_block: i32,
    pub budget_payments_cycle_blocks: i32,
    pub budget_payments_window_blocks: i32,
    pub superblock_start_block: i32,
    pub superblock_start_hash: Hash256,
    pub superblock_cycle: i32,
    pub superblock_maturity_window: i32,
    pub governance_min_quorum: i32,
    pub governance_filter_elements: i32,
    pub masternode_minimum_confirmations: i32,

    // Buried soft fork heights
    pub bip16_height: i32,
    pub bip34_height: i32,
    pub bip34_hash: Hash256,
    pub bip65_height: i32,
    pub bip66_height: i32,
    pub bip147_height: i32,
    pub csv_height: i32,
    pub dip0001_height: i32,
    pub dip0003_height: i32,
    pub dip0003_enforcement_height: i32,
    pub dip0003_enforcement_hash: Hash256,
    pub dip0008_height: i32,
    pub brr_height: i32,
    pub dip0020_height: i32,
    pub dip0024_height: i32,
    pub dip0024_quorums_height: i32,
    pub v19_height: i32,
    /// Don't warn about unknown BIP9 activations below this height
    pub min_bip9_warning_height: i32,

    // Proof of work
    pub pow_limit: Hash256,
    pub pow_target_timespan: i64,
    pub pow_target_spacing: i64,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,
    pub pow_dgw_height: i32,
    pub rule_change_activation_threshold: u32,
    pub miner_confirmation_window: u32,
    pub minimum_chain_work: Hash256,
    pub default_assume_valid: Hash256,
    pub auxpow_chain_id: i32,
    pub strict_chain_id: bool,

    // Devnet only
    pub minimum_difficulty_blocks: i32,
    pub high_subsidy_blocks: i32,
    pub high_subsidy_factor: i32,

    pub dev_fee_payment: DevfeePayment,

    pub deployments: Deployments,

    /// Base quorum catalog the profile was built with
    pub llmqs: LlmqCatalog,
    pub llmq_type_chainlocks: LlmqType,
    pub llmq_type_dip0024_instantsend: LlmqType,
    pub llmq_type_platform: LlmqType,
    pub llmq_type_mnhf: LlmqType,
}

impl ConsensusParams {
    pub fn llmq_type_for(&self, role: LlmqRole) -> LlmqType {
        match role {
            LlmqRole::ChainLocks => self.llmq_type_chainlocks,
            LlmqRole::InstantSend => self.llmq_type_dip0024_instantsend,
            LlmqRole::Platform => self.llmq_type_platform,
            LlmqRole::Mnhf => self.llmq_type_mnhf,
        }
    }

    pub fn set_llmq_type_for(&mut self, role: LlmqRole, llmq_type: LlmqType) {
        match role {
            LlmqRole::ChainLocks => self.llmq_type_chainlocks = llmq_type,
            LlmqRole::InstantSend => self.llmq_type_dip0024_instantsend = llmq_type,
            LlmqRole::Platform => self.llmq_type_platform = llmq_type,
            LlmqRole::Mnhf => self.llmq_type_mnhf = llmq_type,
        }
    }

    pub fn get_llmq(&self, llmq_type: LlmqType) -> Option<&LlmqParams> {
        self.llmqs.get(llmq_type)
    }

    /// Blocks in one retarget period.
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        if self.pow_target_spacing == 0 {
            return 0;
        }
        self.pow_target_timespan / self.pow_target_spacing
    }
}
