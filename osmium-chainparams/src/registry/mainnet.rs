//! Main network on which people trade goods and services.

use osmium_consensus::presets::*;
use osmium_consensus::{create_genesis_block, ConsensusParams, GenesisExpectation, PowHasher};
use osmium_shared_types::{
    Base58Prefixes, ChainTxData, Checkpoint, Deployment, Deployments,
    DevfeePayment, DevfeeRewardStructure, Hash256, LlmqType, Network, COIN,
};

use super::{catalog, check_genesis, strings};
use crate::error::Result;
use crate::params::ChainParams;

const GENESIS_HASH: Hash256 =
    Hash256::from_hex_const("0x00000df94c615d91d23f22f8facd46e4b06e17f4214fff88af826ef77fdac797");
const GENESIS_MERKLE_ROOT: Hash256 =
    Hash256::from_hex_const("0xef49e9579b9b5aaf4b1b5b91c391d49aeaec81e582beecdd04dbf9fe2c7d6337");

pub fn main_params(hasher: Option<&dyn PowHasher>) -> Result<ChainParams> {
    let genesis = create_genesis_block(1729976223, 510979, 0x1e0ffff0, 1, COIN);
    let hash_genesis_block = check_genesis(
        Network::Main,
        &genesis,
        GenesisExpectation { hash: GENESIS_HASH, merkle_root: GENESIS_MERKLE_ROOT },
        hasher,
    )?;

    let deployments = Deployments::new([
        // testdummy
        Deployment {
            bit: 28,
            start_time: 1199145601, // January 1, 2008
            timeout: 1230767999,    // December 31, 2008
            ..Default::default()
        },
        // v20
        Deployment {
            bit: 9,
            start_time: 0,
            timeout: 1740787200, // March 1, 2025
            window_size: 4032,
            threshold_start: 3226, // 80% of 4032
            threshold_min: 2420,   // 60% of 4032
            falloff_coeff: 5,
            use_ehf: false,
        },
        // mn_rr, window must be >= the superblock maturity window
        Deployment {
            bit: 10,
            start_time: 0,
            timeout: 1740787200,
            window_size: 4032,
            threshold_start: 3226,
            threshold_min: 2420,
            falloff_coeff: 5,
            use_ehf: true,
        },
    ]);

    let consensus = ConsensusParams {
        hash_genesis_block,
        hash_devnet_genesis_block: None,

        subsidy_halving_interval: 1200 * 30, // ~ one month
        masternode_payments_start_block: 250,
        instant_send_confirmations_required: 6,
        instant_send_keep_lock: 24,
        budget_payments_start_block: 250,
        budget_payments_cycle_blocks: 250,
        budget_payments_window_blocks: 100,
        superblock_start_block: 18000, // ~ 15 days
        superblock_start_hash: Hash256::ZERO,
        superblock_cycle: 1200 * 30,
        superblock_maturity_window: 1200 * 3, // ~3 days before the superblock
        governance_min_quorum: 10,
        governance_filter_elements: 20000,
        masternode_minimum_confirmations: 15,

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
        brr_height: 999999,
        dip0020_height: 150,
        dip0024_height: 350,
        dip0024_quorums_height: 350,
        v19_height: 350,
        min_bip9_warning_height: 350 + 960,

        // ~uint256(0) >> 20
        pow_limit: Hash256::from_hex_const(
            "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        ),
        pow_target_timespan: 24 * 60 * 60,
        pow_target_spacing: 72,
        pow_allow_min_difficulty_blocks: false,
        pow_no_retargeting: false,
        pow_dgw_height: 60,
        rule_change_activation_threshold: 1140, // 95% of 1200
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
            None,
        ),

        deployments,

        llmqs: catalog(&[LLMQ_50_60, LLMQ_60_75, LLMQ_20_60, LLMQ_20_85, LLMQ_100_67]),
        llmq_type_chainlocks: LlmqType::Llmq400_60,
        llmq_type_dip0024_instantsend: LlmqType::Llmq60_75,
        llmq_type_platform: LlmqType::Llmq100_67,
        llmq_type_mnhf: LlmqType::Llmq400_85,
    };

    Ok(ChainParams {
        network: Network::Main,
        devnet_name: None,
        consensus,
        genesis,
        devnet_genesis: None,

        message_start: *b"MAXI",
        default_port: 9939,
        default_platform_p2p_port: 26656,
        default_platform_http_port: 443,
        prune_after_height: 100000,
        assumed_blockchain_size: 1,
        assumed_chain_state_size: 1,

        dns_seeds: strings(&["dnsseed.maximuschain.com"]),
        base58_prefixes: Base58Prefixes {
            // addresses start with 'M'
            pubkey_address: vec![50],
            // script addresses start with '3'
            script_address: vec![5],
            secret_key: vec![75],
            // xpub
            ext_public_key: vec![0x04, 0x88, 0xB2, 0x1E],
            // xprv
            ext_secret_key: vec![0x04, 0x88, 0xAD, 0xE4],
        },
        ext_coin_type: 5,

        default_consistency_checks: false,
        require_standard: true,
        require_routable_external_ip: true,
        is_test_chain: false,
        allow_multiple_addresses_from_group: false,
        allow_multiple_ports: false,
        llmq_connection_retry_timeout: 60,
        is_mockable_chain: false,

        pool_min_participants: 3,
        pool_max_participants: 20,
        fulfilled_request_expire_time: 60 * 60,

        spork_addresses: strings(&["MFbLxEDk419iF2eEXXNTBGQE3xaGzeDpPB"]),
        min_spork_keys: 1,

        checkpoints: vec![Checkpoint { height: 0, hash: GENESIS_HASH }],
        assumeutxo: Vec::new(),
        chain_tx_data: ChainTxData::default(),
    })
}
