//! Network profile registry.
//!
//! One builder per profile, each returning a fully populated [`ChainParams`]
//! with its genesis block already checked against the hard-coded hashes.

mod devnet;
mod mainnet;
mod regtest;
mod testnet;

use log::info;
use osmium_consensus::{verify_genesis, Block, GenesisExpectation, LlmqCatalog, PowHasher};
use osmium_shared_types::{Base58Prefixes, Hash256, LlmqParams, Network};

use crate::args::ChainArgs;
use crate::error::{ChainParamsError, Result};
use crate::params::ChainParams;

pub use devnet::devnet_params;
pub use mainnet::main_params;
pub use regtest::regtest_params;
pub use testnet::testnet_params;

/// Builds the base parameters of `network`, before any override is applied.
///
/// `hasher` is the production header hash; without it the genesis header
/// hash is taken from the hard-coded value once the merkle root matches.
pub fn base_params(
    network: Network,
    args: &ChainArgs,
    hasher: Option<&dyn PowHasher>,
) -> Result<ChainParams> {
    let params = match network {
        Network::Main => main_params(hasher)?,
        Network::Test => testnet_params(hasher)?,
        Network::Devnet => devnet_params(&args.devnet_name(), hasher)?,
        Network::Regtest => regtest_params(args.fastprune, hasher)?,
    };
    info!(
        "Built {} chain parameters, genesis {}",
        params.network, params.consensus.hash_genesis_block
    );
    Ok(params)
}

pub(crate) fn check_genesis(
    network: Network,
    block: &Block,
    expected: GenesisExpectation,
    hasher: Option<&dyn PowHasher>,
) -> Result<Hash256> {
    verify_genesis(block, &expected, hasher).map_err(|e| ChainParamsError::genesis(network, e))
}

pub(crate) fn catalog(records: &[LlmqParams]) -> LlmqCatalog {
    records.iter().copied().collect()
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Prefixes shared by testnet, devnet and regtest.
pub(crate) fn test_base58_prefixes() -> Base58Prefixes {
    Base58Prefixes {
        // addresses start with 'm'
        pubkey_address: vec![110],
        // script addresses start with '5' or '6'
        script_address: vec![12],
        // private keys start with '9' or 'c'
        secret_key: vec![239],
        // tpub
        ext_public_key: vec![0x04, 0x35, 0x87, 0xCF],
        // tprv
        ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
    }
}
