//! Development networks.
//!
//! Every devnet shares the same base genesis block and diverges at height 1
//! through a second genesis block that carries the devnet's name.

use osmium_consensus::presets::*;
use osmium_consensus::{
    create_genesis_block, find_devnet_genesis_block, ConsensusParams, GenesisExpectation,
    PowHasher, Sha256dHasher,
};
use osmium_shared_types::{
    ChainTxData, Checkpoint, Deployment, Deployments, DevfeePayment, DevfeeRewardStructure,
    Hash256, LlmqType, Network, COIN,
};

use super::{catalog, check_genesis, strings, test_base58_prefixes};
use crate::error::{ChainParamsError, Result};
use crate::params::ChainParams;

const GENESIS_HASH: Hash256 =
    Hash256::from_hex_const("0x781ba374cf40ff2051b0af34f5d4f0437dc58102bb9a263be2cd13c232f3b3f3");
const GENESIS_MERKLE_ROOT: Hash256 =
    Hash256::from_hex_const("0xef49e9579b9b5aaf4b1b5b91c391d49aeaec81e582beecdd04dbf9fe2c7d6337");

/// Builds devnet parameters for `devnet_name` (`devnet` or `devnet-<name>`).
///
/// The devnet genesis block is found by nonce search with `hasher`, or with
/// double SHA-256 when no hasher is supplied.
pub fn devnet_params(devnet_name: &str, hasher: Option<&dyn PowHasher>) -> Result<ChainParams> {
    let genesis = create_genesis_block(1729976223, 0, 0x207fffff, 1, COIN);
    let hash_genesis_block = check_genesis(
        Network::Devnet,
        &genesis,
        GenesisExpectation { hash: GENESIS_HASH, merkle_root: GENESIS_MERKLE_ROOT },
        hasher,
    )?;

    let search_hasher: &dyn PowHasher = hasher.unwrap_or(&Sha256dHasher);
    let devnet_genesis =
        find_devnet_genesis_block(&genesis, hash_genesis_block, devnet_name, 50 * COIN, search_hasher)
            .map_err(|source| ChainParamsError::DevnetGenesisNotFound {
                name: devnet_name.to_string(),
                source,
            })?;
    let hash_devnet_genesis_block = search_hasher.pow_hash(&devnet_genesis.header);

    let deployments = Deployments::new([
        Deployment {
            bit: 28,
            start_time: 1199145601,
            timeout: 1230767999,
            ..Default::default()
        },
        Deployment {
            bit: 9,
            start_time: 0,
            timeout: Deployment::NO_TIMEOUT,
            window_size: 120,
            threshold_start: 80,
            threshold_min: 60,
            falloff_coeff: 5,
            use_ehf: false,
        },
        Deployment {
            bit: 10,
            start_time: 0,
            timeout: Deployment::NO_TIMEOUT,
            window_size: 120,
            threshold_start: 80,
            threshold_min: 60,
            falloff_coeff: 5,
            use_ehf: true,
        },
    ]);

    let consensus = ConsensusParams {
        hash_genesis_block,
        hash_devnet_genesis_block: Some(hash_devnet_genesis_block),

        subsidy_halving_interval: 1200 * 30,
        masternode_payments_start_block: 250,
        instant_send_confirmations_required: 2,
        instant_send_keep_lock: 6,
        budget_payments_start_block: 250,
        budget_payments_cycle_blocks: 250,
        budget_payments_window_blocks: 100,
        // must stay above budget_payments_start_block
        superblock_start_block: 4200,
        superblock_start_hash: Hash256::ZERO,
        // hourly
        superblock_cycle: 24,
        superblock_maturity_window: 8,
        governance_min_quorum: 1,
        governance_filter_elements: 500,
        masternode_minimum_confirmations: 1,

        bip16_height: 0,
        bip34_height: 1,
        bip34_hash: Hash256::ZERO,
        bip65_height: 1,
        bip66_height: 1,
        bip147_height: 1,
        csv_height: 1,
        dip0001_height: 2,
        dip0003_height: 2,
        dip0003_enforcement_height: 2,
        dip0003_enforcement_hash: Hash256::ZERO,
        dip0008_height: 2,
        brr_height: 300,
        dip0020_height: 300,
        dip0024_height: 300,
        dip0024_quorums_height: 300,
        v19_height: 300,
        min_bip9_warning_height: 300 + 1200,

        pow_limit: Hash256::from_hex_const(
            "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        ),
        pow_target_timespan: 24 * 60 * 60,
        pow_target_spacing: 72,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: false,
        pow_dgw_height: 60,
        rule_change_activation_threshold: 900,
        miner_confirmation_window: 1200,
        minimum_chain_work: Hash256::ZERO,
        default_assume_valid: Hash256::ZERO,
        auxpow_chain_id: 0x0045,
        strict_chain_id: false,

        minimum_difficulty_blocks: 0,
        high_subsidy_blocks: 0,
        high_subsidy_factor: 1,

        dev_fee_payment: DevfeePayment::new(
            vec![DevfeeRewardStructure { block_height: i32::MAX, reward_percentage: 17 }],
            200,
            Some("mKAa421v424nLG8M217gtr8RAQVQxzsCzH"),
        ),

        deployments,

        llmqs: catalog(&[
            LLMQ_50_60,
            LLMQ_60_75,
            LLMQ_20_60,
            LLMQ_20_85,
            LLMQ_100_67,
            LLMQ_DEVNET,
            LLMQ_DEVNET_DIP0024,
            LLMQ_DEVNET_PLATFORM,
        ]),
        llmq_type_chainlocks: LlmqType::Devnet,
        llmq_type_dip0024_instantsend: LlmqType::DevnetDip0024,
        llmq_type_platform: LlmqType::DevnetPlatform,
        llmq_type_mnhf: LlmqType::Devnet,
    };

    let devnet_time = i64::from(devnet_genesis.time());

    Ok(ChainParams {
        network: Network::Devnet,
        devnet_name: Some(devnet_name.to_string()),
        consensus,
        genesis,
        devnet_genesis: Some(devnet_genesis),

        message_start: *b"dMAX",
        default_port: 19769,
        default_platform_p2p_port: 22100,
        default_platform_http_port: 22101,
        prune_after_height: 1000,
        assumed_blockchain_size: 0,
        assumed_chain_state_size: 0,

        dns_seeds: Vec::new(),
        base58_prefixes: test_base58_prefixes(),
        ext_coin_type: 1,

        default_consistency_checks: false,
        require_standard: false,
        require_routable_external_ip: true,
        is_test_chain: true,
        allow_multiple_addresses_from_group: true,
        allow_multiple_ports: true,
        llmq_connection_retry_timeout: 60,
        is_mockable_chain: false,

        pool_min_participants: 2,
        pool_max_participants: 20,
        fulfilled_request_expire_time: 5 * 60,

        spork_addresses: strings(&["mMaFubnqzVmgcv6WQaGY54De1AHtu2Cf4N"]),
        min_spork_keys: 1,

        checkpoints: vec![
            Checkpoint { height: 0, hash: hash_genesis_block },
            Checkpoint { height: 1, hash: hash_devnet_genesis_block },
        ],
        assumeutxo: Vec::new(),
        // only the two coinbase transactions exist when a devnet starts
        chain_tx_data: ChainTxData { time: devnet_time, tx_count: 2, tx_rate: 0.01 },
    })
}
