//! Startup options that can adjust the devnet and regtest profiles.

use serde::{Deserialize, Serialize};

/// Raw override options as they arrive from the command line or a config file.
///
/// Values stay strings until [`crate::apply_overrides`] parses them, so a
/// malformed value is reported with the option it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainArgs {
    /// Devnet name; the network id becomes `devnet-<name>`
    pub devnet: Option<String>,
    /// Prune regtest blocks after 100 blocks instead of 1000
    pub fastprune: bool,

    // regtest
    /// `<deployment>:<start>:<end>[:<window>:<threshold>[:<thresholdmin>:<falloffcoeff>:<useehf>]]`, repeatable
    pub vbparams: Vec<String>,
    /// `<activation>:<enforcement>`
    pub dip3params: Option<String>,
    /// `<activation>`
    pub dip8params: Option<String>,
    /// `<masternode>:<budget>:<superblock>`
    pub budgetparams: Option<String>,
    /// `<size>:<threshold>` for LLMQ_TEST
    pub llmqtestparams: Option<String>,
    /// `<size>:<threshold>` for LLMQ_TEST_INSTANTSEND
    pub llmqtestinstantsendparams: Option<String>,
    /// LLMQ name used for DIP0024 InstantSend
    pub llmqtestinstantsenddip0024: Option<String>,

    // devnet
    pub minimumdifficultyblocks: Option<String>,
    pub highsubsidyblocks: Option<String>,
    pub highsubsidyfactor: Option<String>,
    pub llmqchainlocks: Option<String>,
    pub llmqinstantsenddip0024: Option<String>,
    pub llmqplatform: Option<String>,
    pub llmqmnhf: Option<String>,
    /// `<size>:<threshold>` for LLMQ_DEVNET
    pub llmqdevnetparams: Option<String>,
    pub powtargetspacing: Option<String>,
}

impl ChainArgs {
    /// `devnet` or `devnet-<name>`.
    pub fn devnet_name(&self) -> String {
        match self.devnet.as_deref() {
            None | Some("") => "devnet".to_string(),
            Some(name) => format!("devnet-{}", name),
        }
    }

    /// Names of the regtest-only options that are set.
    pub fn regtest_options_set(&self) -> Vec<&'static str> {
        let mut set = Vec::new();
        if !self.vbparams.is_empty() {
            set.push("vbparams");
        }
        let optional = [
            ("dip3params", &self.dip3params),
            ("dip8params", &self.dip8params),
            ("budgetparams", &self.budgetparams),
            ("llmqtestparams", &self.llmqtestparams),
            ("llmqtestinstantsendparams", &self.llmqtestinstantsendparams),
            ("llmqtestinstantsenddip0024", &self.llmqtestinstantsenddip0024),
        ];
        set.extend(optional.iter().filter(|(_, v)| v.is_some()).map(|(name, _)| *name));
        set
    }

    /// Names of the devnet-only options that are set.
    pub fn devnet_options_set(&self) -> Vec<&'static str> {
        let optional = [
            ("minimumdifficultyblocks", &self.minimumdifficultyblocks),
            ("highsubsidyblocks", &self.highsubsidyblocks),
            ("highsubsidyfactor", &self.highsubsidyfactor),
            ("llmqchainlocks", &self.llmqchainlocks),
            ("llmqinstantsenddip0024", &self.llmqinstantsenddip0024),
            ("llmqplatform", &self.llmqplatform),
            ("llmqmnhf", &self.llmqmnhf),
            ("llmqdevnetparams", &self.llmqdevnetparams),
            ("powtargetspacing", &self.powtargetspacing),
        ];
        optional.iter().filter(|(_, v)| v.is_some()).map(|(name, _)| *name).collect()
    }
}
