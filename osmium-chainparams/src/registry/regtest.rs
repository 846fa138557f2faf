//! Regression test network for private networks only.
//!
//! Minimal difficulty so blocks can be found instantly.

use osmium_consensus::presets::*;
use osmium_consensus::{create_genesis_block, ConsensusParams, GenesisExpectation, PowHasher};
use osmium_shared_types::{
    AssumeutxoData, ChainTxData, Checkpoint, Deployment, Deployments, DevfeePayment,
    DevfeeRewardStructure, Hash256, LlmqType, Network, COIN,
};

use super::{catalog, check_genesis, strings, test_base58_prefixes};
use crate::error::Result;
use crate::params::ChainParams;

const GENESIS_HASH: Hash256 =
    Hash256::from_hex_const("0x5916643204422cd3de320273fe7568d921ae43e858c271d17f39fa8f15e21282");
const GENESIS_MERKLE_ROOT: Hash256 =
    Hash256::from_hex_const("0x1c2da9786370d27309c45314f0137207c36b9a8a2524de63938128e40afcd427");

pub fn regtest_params(fastprune: bool, hasher: Option<&dyn PowHasher>) -> Result<ChainParams> {
    let genesis = create_genesis_block(1417713337, 0, 0x207fffff, 1, 50 * COIN);
    let hash_genesis_block = check_genesis(
        Network::Regtest,
        &genesis,
        GenesisExpectation { hash: GENESIS_HASH, merkle_root: GENESIS_MERKLE_ROOT },
        hasher,
    )?;

    let deployments = Deployments::new([
        Deployment {
            bit: 28,
            start_time: 0,
            timeout: Deployment::NO_TIMEOUT,
            ..Default::default()
        },
        Deployment {
            bit: 9,
            start_time: 0,
            timeout: Deployment::NO_TIMEOUT,
            window_size: 400,
            threshold_start: 384,
            threshold_min: 288,
            falloff_coeff: 5,
            use_ehf: false,
        },
        Deployment {
            bit: 10,
            start_time: 0,
            timeout: Deployment::NO_TIMEOUT,
            window_size: 12,
            threshold_start: 9,
            threshold_min: 7,
            falloff_coeff: 5,
            use_ehf: true,
        },
    ]);

    let consensus = ConsensusParams {
        hash_genesis_block,
        hash_devnet_genesis_block: None,

        subsidy_halving_interval: 1200, // ~ one day
        masternode_payments_start_block: 250,
        instant_send_confirmations_required: 6,
        instant_send_keep_lock: 24,
        budget_payments_start_block: 250,
        budget_payments_cycle_blocks: 250,
        budget_payments_window_blocks: 100,
        superblock_start_block: 1800,
        superblock_start_hash: Hash256::ZERO,
        superblock_cycle: 1200,
        superblock_maturity_window: 120,
        governance_min_quorum: 1,
        governance_filter_elements: 100,
        masternode_minimum_confirmations: 1,

        // activation heights used by functional tests
        bip16_height: 0,
        bip34_height: 20,
        bip34_hash: Hash256::ZERO,
        bip65_height: 40,
        bip66_height: 20,
        bip147_height: 10,
        csv_height: 10,
        dip0001_height: 10,
        dip0003_height: 20,
        dip0003_enforcement_height: 30,
        dip0003_enforcement_hash: Hash256::ZERO,
        dip0008_height: 20,
        brr_height: 999999,
        dip0020_height: 150,
        dip0024_height: 350,
        dip0024_quorums_height: 350,
        v19_height: 350,
        min_bip9_warning_height: 0,

        pow_limit: Hash256::from_hex_const(
            "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        ),
        pow_target_timespan: 24 * 60 * 60,
        pow_target_spacing: 72,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: true,
        pow_dgw_height: 60,
        rule_change_activation_threshold: 108, // 75% of 144
        miner_confirmation_window: 144,
        minimum_chain_work: Hash256::ZERO,
        default_assume_valid: Hash256::ZERO,
        auxpow_chain_id: 0x0045,
        strict_chain_id: true,

        minimum_difficulty_blocks: 0,
        high_subsidy_blocks: 0,
        high_subsidy_factor: 1,

        dev_fee_payment: DevfeePayment::new(
            vec![DevfeeRewardStructure { block_height: i32::MAX, reward_percentage: 17 }],
            50,
            Some("mKAa421v424nLG8M217gtr8RAQVQxzsCzH"),
        ),

        deployments,

        llmqs: catalog(&[
            LLMQ_TEST,
            LLMQ_TEST_INSTANTSEND,
            LLMQ_TEST_V17,
            LLMQ_TEST_DIP0024,
            LLMQ_TEST_PLATFORM,
        ]),
        llmq_type_chainlocks: LlmqType::Test,
        llmq_type_dip0024_instantsend: LlmqType::TestDip0024,
        llmq_type_platform: LlmqType::TestPlatform,
        llmq_type_mnhf: LlmqType::Test,
    };

    Ok(ChainParams {
        network: Network::Regtest,
        devnet_name: None,
        consensus,
        genesis,
        devnet_genesis: None,

        message_start: *b"rMAX",
        default_port: 19869,
        default_platform_p2p_port: 22200,
        default_platform_http_port: 22201,
        prune_after_height: if fastprune { 100 } else { 1000 },
        assumed_blockchain_size: 0,
        assumed_chain_state_size: 0,

        dns_seeds: Vec::new(),
        base58_prefixes: test_base58_prefixes(),
        ext_coin_type: 1,

        default_consistency_checks: true,
        require_standard: true,
        require_routable_external_ip: false,
        is_test_chain: true,
        allow_multiple_addresses_from_group: true,
        allow_multiple_ports: true,
        // below the LLMQ signing session timeout so tests control failures
        llmq_connection_retry_timeout: 1,
        is_mockable_chain: true,

        pool_min_participants: 2,
        pool_max_participants: 20,
        fulfilled_request_expire_time: 5 * 60,

        spork_addresses: strings(&["mMaFubnqzVmgcv6WQaGY54De1AHtu2Cf4N"]),
        min_spork_keys: 1,

        checkpoints: vec![Checkpoint { height: 0, hash: GENESIS_HASH }],
        assumeutxo: vec![
            AssumeutxoData {
                height: 110,
                hash_serialized: Hash256::from_hex_const(
                    "0x9b2a277a3e3b979f1a539d57e949495d7f8247312dbc32bce6619128c192b44b",
                ),
                chain_tx_count: 110,
            },
            AssumeutxoData {
                height: 210,
                hash_serialized: Hash256::from_hex_const(
                    "0xd4c97d32882583b057efc3dce673e44204851435e6ffcef20346e69cddc7c91e",
                ),
                chain_tx_count: 210,
            },
        ],
        chain_tx_data: ChainTxData::default(),
    })
}
