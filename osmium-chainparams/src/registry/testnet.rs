//! Public test network, reset from time to time.

use osmium_consensus::presets::*;
use osmium_consensus::{create_genesis_block, ConsensusParams, GenesisExpectation, PowHasher};
use osmium_shared_types::{
    ChainTxData, Checkpoint, Deployment, Deployments, DevfeePayment, DevfeeRewardStructure,
    Hash256, LlmqType, Network, COIN,
};

use super::{catalog, check_genesis, strings, test_base58_prefixes};
use crate::error::Result;
use crate::params::ChainParams;

const GENESIS_HASH: Hash256 =
    Hash256::from_hex_const("0x000007011c13c0a1b87c55fd6f0734a205135ada991f69da4b79d3d48e527dcd");
const GENESIS_MERKLE_ROOT: Hash256 =
    Hash256::from_hex_const("0x1c2da9786370d27309c45314f0137207c36b9a8a2524de63938128e40afcd427");

pub fn testnet_params(hasher: Option<&dyn PowHasher>) -> Result<ChainParams> {
    let genesis = create_genesis_block(1729976223, 1860174, 0x1e0ffff0, 1, 50 * COIN);
    let hash_genesis_block = check_genesis(
        Network::Test,
        &genesis,
        GenesisExpectation { hash: GENESIS_HASH, merkle_root: GENESIS_MERKLE_ROOT },
        hasher,
    )?;

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
            window_size: 100,
            threshold_start: 80,
            threshold_min: 60,
            falloff_coeff: 5,
            use_ehf: false,
        },
        Deployment {
            bit: 10,
            start_time: 0,
            timeout: Deployment::NO_TIMEOUT,
            window_size: 100,
            threshold_start: 80,
            threshold_min: 60,
            falloff_coeff: 5,
            use_ehf: true,
        },
    ]);

    let consensus = ConsensusParams {
        hash_genesis_block,
        hash_devnet_genesis_block: None,

        subsidy_halving_interval: 1200 * 30,
        masternode_payments_start_block: 250,
        instant_send_confirmations_required: 6,
        instant_send_keep_lock: 24,
        budget_payments_start_block: 250,
        budget_payments_cycle_blocks: 250,
        budget_payments_window_blocks: 100,
        superblock_start_block: 350,
        superblock_start_hash: Hash256::ZERO,
        // superblocks can be issued frequently on testnet
        superblock_cycle: 50,
        superblock_maturity_window: 10,
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
        brr_height: 999999999,
        dip0020_height: 150,
        dip0024_height: 300,
        dip0024_quorums_height: 300,
        v19_height: 300,
        min_bip9_warning_height: 300 + 960,

        // ~uint256(0) >> 1
        pow_limit: Hash256::from_hex_const(
            "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        ),
        pow_target_timespan: 24 * 60 * 60,
        pow_target_spacing: 36,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: false,
        pow_dgw_height: 60,
        rule_change_activation_threshold: 900, // 75% for testchains
        miner_confirmation_window: 1200,
        minimum_chain_work: Hash256::from_hex_const("0x100010"),
        default_assume_valid: GENESIS_HASH,
        auxpow_chain_id: 0x0045,
        strict_chain_id: true,

        minimum_difficulty_blocks: 0,
        high_subsidy_blocks: 0,
        high_subsidy_factor: 1,

        dev_fee_payment: DevfeePayment::new(
            vec![DevfeeRewardStructure { block_height: i32::MAX, reward_percentage: 17 }],
            1,
            Some("mVbxMkXk5a1Ra2hFt8CoaSGtp2PkL277sa"),
        ),

        deployments,

        llmqs: catalog(&[LLMQ_50_60, LLMQ_60_75, LLMQ_20_60, LLMQ_20_85, LLMQ_100_67]),
        llmq_type_chainlocks: LlmqType::Llmq400_60,
        llmq_type_dip0024_instantsend: LlmqType::Llmq60_75,
        llmq_type_platform: LlmqType::Llmq100_67,
        llmq_type_mnhf: LlmqType::Llmq400_85,
    };

    Ok(ChainParams {
        network: Network::Test,
        devnet_name: None,
        consensus,
        genesis,
        devnet_genesis: None,

        message_start: *b"tMAX",
        default_port: 19939,
        default_platform_p2p_port: 22000,
        default_platform_http_port: 22001,
        prune_after_height: 1000,
        assumed_blockchain_size: 1,
        assumed_chain_state_size: 1,

        dns_seeds: strings(&["testnet-seed.maximuschain.com"]),
        base58_prefixes: test_base58_prefixes(),
        ext_coin_type: 1,

        default_consistency_checks: false,
        require_standard: false,
        require_routable_external_ip: true,
        is_test_chain: true,
        allow_multiple_addresses_from_group: false,
        allow_multiple_ports: true,
        llmq_connection_retry_timeout: 60,
        is_mockable_chain: false,

        pool_min_participants: 2,
        pool_max_participants: 20,
        fulfilled_request_expire_time: 5 * 60,

        spork_addresses: strings(&["mGVg8A4ySGsfDFpH9WeU9rH8UZQrWFcEqC"]),
        min_spork_keys: 1,

        checkpoints: vec![Checkpoint { height: 0, hash: GENESIS_HASH }],
        assumeutxo: Vec::new(),
        chain_tx_data: ChainTxData::default(),
    })
}
