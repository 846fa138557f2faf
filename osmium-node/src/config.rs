use std::path::Path;

use clap::Parser;
use confy::ConfyError;
use osmium_chainparams::ChainArgs;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "osmium";
pub const CONFIG_NAME: &str = "osmiumd";

/// Osmium node
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Network to run on (main, test, devnet, regtest)
    #[arg(long)]
    pub network: Option<String>,

    /// Read the configuration from this file instead of the default location
    #[arg(long)]
    pub conf: Option<String>,

    /// Write the merged configuration back to the configuration file
    #[arg(long)]
    pub save_config: bool,

    /// Set logging level (trace, debug, info, warn, error) or a full filter directive
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Path to the log file (optional). If not provided, logs will only go to stdout.
    #[arg(long)]
    pub log_file: Option<String>,

    /// Print the selected chain parameters as JSON
    #[arg(long)]
    pub dump_params: bool,

    /// Run one quorum adaptation step with this many active masternodes
    #[arg(long, requires = "simulate_height")]
    pub simulate_mn_count: Option<usize>,

    /// Chain height for the adaptation step
    #[arg(long, requires = "simulate_mn_count")]
    pub simulate_height: Option<u32>,

    /// Devnet name
    #[arg(long)]
    pub devnet: Option<String>,

    /// Prune regtest blocks more aggressively
    #[arg(long)]
    pub fastprune: bool,

    /// Version bits deployment override (regtest), may be repeated
    #[arg(long)]
    pub vbparams: Vec<String>,

    /// DIP3 activation and enforcement heights (regtest)
    #[arg(long)]
    pub dip3params: Option<String>,

    /// DIP8 activation height (regtest)
    #[arg(long)]
    pub dip8params: Option<String>,

    /// Masternode, budget and superblock start heights (regtest)
    #[arg(long)]
    pub budgetparams: Option<String>,

    /// Size and threshold of LLMQ_TEST (regtest)
    #[arg(long)]
    pub llmqtestparams: Option<String>,

    /// Size and threshold of LLMQ_TEST_INSTANTSEND (regtest)
    #[arg(long)]
    pub llmqtestinstantsendparams: Option<String>,

    /// LLMQ used for DIP0024 InstantSend (regtest)
    #[arg(long)]
    pub llmqtestinstantsenddip0024: Option<String>,

    #[arg(long)]
    pub minimumdifficultyblocks: Option<String>,

    #[arg(long)]
    pub highsubsidyblocks: Option<String>,

    #[arg(long)]
    pub highsubsidyfactor: Option<String>,

    /// LLMQ used for ChainLocks (devnet)
    #[arg(long)]
    pub llmqchainlocks: Option<String>,

    /// LLMQ used for DIP0024 InstantSend (devnet)
    #[arg(long)]
    pub llmqinstantsenddip0024: Option<String>,

    /// LLMQ used for platform (devnet)
    #[arg(long)]
    pub llmqplatform: Option<String>,

    /// LLMQ used for masternode hard fork signalling (devnet)
    #[arg(long)]
    pub llmqmnhf: Option<String>,

    /// Size and threshold of LLMQ_DEVNET (devnet)
    #[arg(long)]
    pub llmqdevnetparams: Option<String>,

    /// Target block spacing in seconds (devnet)
    #[arg(long)]
    pub powtargetspacing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub network: String,
    pub log_level: String,
    pub log_file: Option<String>,
    pub chain: ChainArgs,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            network: "main".to_string(),
            log_level: "info".to_string(),
            log_file: None,
            chain: ChainArgs::default(),
        }
    }
}

impl NodeConfig {
    pub fn load(path: Option<&str>) -> Result<Self, ConfyError> {
        match path {
            Some(path) => confy::load_path(Path::new(path)),
            None => confy::load(APP_NAME, Some(CONFIG_NAME)),
        }
    }

    pub fn store(&self, path: Option<&str>) -> Result<(), ConfyError> {
        match path {
            Some(path) => confy::store_path(Path::new(path), self),
            None => confy::store(APP_NAME, Some(CONFIG_NAME), self),
        }
    }

    /// Lets every flag given on the command line win over the file value.
    pub fn merge_args(&mut self, args: &Args) {
        if let Some(network) = &args.network {
            self.network = network.clone();
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if args.log_file.is_some() {
            self.log_file = args.log_file.clone();
        }

        let chain = &mut self.chain;
        if args.fastprune {
            chain.fastprune = true;
        }
        if !args.vbparams.is_empty() {
            chain.vbparams = args.vbparams.clone();
        }
        let options = [
            (&mut chain.devnet, &args.devnet),
            (&mut chain.dip3params, &args.dip3params),
            (&mut chain.dip8params, &args.dip8params),
            (&mut chain.budgetparams, &args.budgetparams),
            (&mut chain.llmqtestparams, &args.llmqtestparams),
            (&mut chain.llmqtestinstantsendparams, &args.llmqtestinstantsendparams),
            (&mut chain.llmqtestinstantsenddip0024, &args.llmqtestinstantsenddip0024),
            (&mut chain.minimumdifficultyblocks, &args.minimumdifficultyblocks),
            (&mut chain.highsubsidyblocks, &args.highsubsidyblocks),
            (&mut chain.highsubsidyfactor, &args.highsubsidyfactor),
            (&mut chain.llmqchainlocks, &args.llmqchainlocks),
            (&mut chain.llmqinstantsenddip0024, &args.llmqinstantsenddip0024),
            (&mut chain.llmqplatform, &args.llmqplatform),
            (&mut chain.llmqmnhf, &args.llmqmnhf),
            (&mut chain.llmqdevnetparams, &args.llmqdevnetparams),
            (&mut chain.powtargetspacing, &args.powtargetspacing),
        ];
        for (slot, value) in options {
            if value.is_some() {
                *slot = value.clone();
            }
        }
    }
}
