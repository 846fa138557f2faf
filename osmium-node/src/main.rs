use std::fs::File;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use osmium_chainparams::{select_params, SelectedParams};
use osmium_consensus::LlmqRole;
use osmium_shared_types::Network;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;

use config::{Args, NodeConfig};

fn init_logging(level: &str, log_file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder().with_env_filter(filter);

    let guard = match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating log file {}", path))?;
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file);
            builder
                .with_writer(non_blocking_writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow!(e))?;
            Some(guard)
        }
        None => {
            builder.try_init().map_err(|e| anyhow!(e))?;
            None
        }
    };
    Ok(guard)
}

fn log_summary(selected: &SelectedParams) {
    let params = selected.params();
    info!(
        "Network {} ({})",
        params.devnet_name.as_deref().unwrap_or(params.network_id()),
        if params.is_test_chain { "test chain" } else { "production" }
    );
    info!("Genesis block {}", params.genesis_hash());
    if let Some(devnet_genesis) = params.consensus.hash_devnet_genesis_block {
        info!("Devnet genesis block {}", devnet_genesis);
    }
    info!(
        "Message start {}, port {}, platform ports {}/{}",
        hex::encode(selected.message_start()),
        selected.default_port(),
        params.default_platform_p2p_port,
        params.default_platform_http_port
    );
    for role in LlmqRole::ALL {
        let llmq_type = params.consensus.llmq_type_for(role);
        match selected.get_llmq(llmq_type) {
            Some(llmq) => info!("{} quorum {} ({})", role, llmq_type, llmq.name),
            None => warn!("{} quorum {} is not in the catalog", role, llmq_type),
        }
    }
    if let Some(checkpoint) = params.last_checkpoint() {
        info!("Last checkpoint {} at height {}", checkpoint.hash, checkpoint.height);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = NodeConfig::load(args.conf.as_deref());
    let (mut cfg, load_error) = match loaded {
        Ok(cfg) => (cfg, None),
        Err(e) => (NodeConfig::default(), Some(e)),
    };
    cfg.merge_args(&args);

    let _guard = init_logging(&cfg.log_level, cfg.log_file.as_deref())?;
    if let Some(e) = load_error {
        warn!("Failed to load configuration: {}. Using default.", e);
    }
    info!("Loaded configuration: {:?}", cfg);

    let network: Network = cfg
        .network
        .parse()
        .with_context(|| format!("invalid -network {}", cfg.network))?;
    let selected = select_params(network, &cfg.chain, None)
        .with_context(|| format!("selecting {} chain parameters", network))?;
    log_summary(&selected);

    if args.dump_params {
        println!("{}", serde_json::to_string_pretty(selected.params())?);
    }

    if let (Some(mn_count), Some(height)) = (args.simulate_mn_count, args.simulate_height) {
        let outcome = selected.update_llmq_params(mn_count, height);
        info!(
            "Adaptation with {} masternodes at height {}: {:?}",
            mn_count, height, outcome
        );
        println!("{}", serde_json::to_string_pretty(&*selected.llmq_catalog())?);
    }

    if args.save_config {
        cfg.store(args.conf.as_deref()).context("storing configuration")?;
        info!("Configuration stored");
    }

    Ok(())
}
