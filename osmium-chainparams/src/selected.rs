//! The selected network profile.

use std::sync::Arc;

use log::info;
use osmium_consensus::{
    is_valid_mn_activation, AdaptationOutcome, LlmqAdapter, LlmqCatalog, LlmqRole, PowHasher,
};
use osmium_shared_types::{Amount, Base58Type, Checkpoint, LlmqParams, LlmqType, Network};

use crate::args::ChainArgs;
use crate::error::Result;
use crate::overrides::apply_overrides;
use crate::params::ChainParams;
use crate::registry::base_params;

/// Parameters of the profile this process runs on.
///
/// Only [`SelectedParams::select`] creates one. The static record is frozen
/// once overrides have been applied; the quorum catalog stays live and is
/// adapted through [`SelectedParams::update_llmq_params`].
#[derive(Debug)]
pub struct SelectedParams {
    params: ChainParams,
    adapter: LlmqAdapter,
}

impl SelectedParams {
    /// Builds `network`'s parameters and applies `args` on top of them.
    pub fn select(
        network: Network,
        args: &ChainArgs,
        hasher: Option<&dyn PowHasher>,
    ) -> Result<Self> {
        let params = base_params(network, args, hasher)?;
        let params = apply_overrides(params, args)?;
        let adapter = LlmqAdapter::new(network, params.consensus.llmqs.clone());

        info!(
            "Selected {} chain: genesis {}, port {}, {} quorum types",
            params.devnet_name.as_deref().unwrap_or(params.network_id()),
            params.genesis_hash(),
            params.default_port,
            params.consensus.llmqs.len()
        );
        Ok(Self { params, adapter })
    }

    /// Same as [`SelectedParams::select`] with the network given by its id.
    pub fn select_by_name(
        chain: &str,
        args: &ChainArgs,
        hasher: Option<&dyn PowHasher>,
    ) -> Result<Self> {
        Self::select(chain.parse()?, args, hasher)
    }

    pub fn network(&self) -> Network {
        self.params.network
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    /// Live record for `llmq_type`, reflecting the latest adaptation.
    pub fn get_llmq(&self, llmq_type: LlmqType) -> Option<LlmqParams> {
        self.adapter.get(llmq_type)
    }

    /// Live record of the quorum type designated for `role`.
    pub fn llmq_for_role(&self, role: LlmqRole) -> Option<LlmqParams> {
        self.get_llmq(self.params.consensus.llmq_type_for(role))
    }

    pub fn llmq_catalog(&self) -> Arc<LlmqCatalog> {
        self.adapter.catalog()
    }

    pub fn update_llmq_params(&self, mn_count: usize, height: u32) -> AdaptationOutcome {
        self.adapter.update(mn_count, height)
    }

    pub fn is_llmqs_mining_phase(&self, height: u32) -> bool {
        self.adapter.is_mining_phase(height)
    }

    /// Whether the EHF deployment on `bit` accepts a masternode activation at `time_past`.
    pub fn is_valid_mn_activation(&self, bit: u8, time_past: i64) -> bool {
        is_valid_mn_activation(&self.params.consensus.deployments, bit, time_past)
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.params.checkpoints
    }

    pub fn default_port(&self) -> u16 {
        self.params.default_port
    }

    pub fn message_start(&self) -> [u8; 4] {
        self.params.message_start
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.params.base58_prefix(kind)
    }

    pub fn dev_fee_amount(&self, height: i32, block_reward: Amount) -> Amount {
        self.params.consensus.dev_fee_payment.dev_fee_amount(height, block_reward)
    }
}
