//! Every LLMQ parameter record a profile or the adaptation engine can install.
//!
//! The scaled variants (`LLMQ_10_60`, `LLMQ_20_75`, ...) reuse the type id of
//! the slot they are installed into, so lookups by type keep working after an
//! adaptation step swaps them in.

use osmium_shared_types::{LlmqParams, LlmqType};

#[allow(clippy::too_many_arguments)]
const fn preset(
    llmq_type: LlmqType,
    name: &'static str,
    use_rotation: bool,
    size: u32,
    min_size: u32,
    threshold: u32,
    dkg_interval: u32,
    dkg_phase_blocks: u32,
    mining_window: (u32, u32),
    dkg_bad_votes_threshold: u32,
    signing_active_quorum_count: u32,
    keep_old_connections: u32,
    keep_old_keys: u32,
    recovery_members: u32,
) -> LlmqParams {
    LlmqParams {
        llmq_type,
        name,
        use_rotation,
        size,
        min_size,
        threshold,
        dkg_interval,
        dkg_phase_blocks,
        dkg_mining_window_start: mining_window.0,
        dkg_mining_window_end: mining_window.1,
        dkg_bad_votes_threshold,
        signing_active_quorum_count,
        keep_old_connections,
        keep_old_keys,
        recovery_members,
    }
}

// Regtest
pub const LLMQ_TEST: LlmqParams =
    preset(LlmqType::Test, "llmq_test", false, 3, 2, 2, 24, 2, (10, 18), 2, 2, 3, 4, 3);
pub const LLMQ_TEST_INSTANTSEND: LlmqParams = preset(
    LlmqType::TestInstantSend, "llmq_test_instantsend", false, 3, 2, 2, 24, 2, (10, 18), 2, 2, 3, 4, 3,
);
pub const LLMQ_TEST_V17: LlmqParams =
    preset(LlmqType::TestV17, "llmq_test_v17", false, 3, 2, 2, 24, 2, (10, 18), 2, 2, 3, 4, 3);
pub const LLMQ_TEST_DIP0024: LlmqParams = preset(
    LlmqType::TestDip0024, "llmq_test_dip0024", true, 4, 4, 2, 24, 2, (12, 20), 2, 2, 4, 4, 3,
);
pub const LLMQ_TEST_PLATFORM: LlmqParams = preset(
    LlmqType::TestPlatform, "llmq_test_platform", false, 3, 2, 2, 24, 2, (10, 18), 2, 2, 4, 4, 3,
);

// Devnet
pub const LLMQ_DEVNET: LlmqParams =
    preset(LlmqType::Devnet, "llmq_devnet", false, 12, 7, 6, 24, 2, (10, 18), 7, 4, 4, 4, 6);
pub const LLMQ_DEVNET_DIP0024: LlmqParams = preset(
    LlmqType::DevnetDip0024, "llmq_devnet_dip0024", true, 8, 6, 4, 48, 2, (12, 20), 7, 2, 4, 4, 4,
);
pub const LLMQ_DEVNET_PLATFORM: LlmqParams = preset(
    LlmqType::DevnetPlatform, "llmq_devnet_platform", false, 12, 9, 8, 24, 2, (10, 18), 7, 4, 4, 4, 6,
);

// Full size quorums
pub const LLMQ_50_60: LlmqParams =
    preset(LlmqType::Llmq50_60, "llmq_50_60", false, 50, 40, 30, 24, 2, (10, 18), 40, 24, 25, 48, 25);
pub const LLMQ_60_75: LlmqParams =
    preset(LlmqType::Llmq60_75, "llmq_60_75", true, 60, 50, 45, 288, 2, (42, 50), 48, 32, 64, 64, 25);
pub const LLMQ_400_60: LlmqParams = preset(
    LlmqType::Llmq400_60, "llmq_400_60", false, 400, 300, 240, 288, 4, (20, 28), 300, 4, 5, 4, 100,
);
pub const LLMQ_400_85: LlmqParams = preset(
    LlmqType::Llmq400_85, "llmq_400_85", false, 400, 350, 340, 576, 4, (20, 48), 300, 4, 5, 4, 100,
);
pub const LLMQ_100_67: LlmqParams = preset(
    LlmqType::Llmq100_67, "llmq_100_67", false, 100, 80, 67, 24, 2, (10, 18), 80, 24, 25, 48, 50,
);

// Scaled down variants for small networks
pub const LLMQ_10_60: LlmqParams =
    preset(LlmqType::Llmq50_60, "llmq_10_60", false, 10, 6, 6, 24, 2, (10, 18), 7, 24, 25, 48, 5);
pub const LLMQ_10_75: LlmqParams =
    preset(LlmqType::Llmq60_75, "llmq_10_75", true, 10, 8, 8, 288, 2, (42, 50), 8, 32, 64, 64, 5);
pub const LLMQ_20_75: LlmqParams =
    preset(LlmqType::Llmq60_75, "llmq_20_75", true, 20, 16, 15, 288, 2, (42, 50), 16, 32, 64, 64, 10);
pub const LLMQ_20_60: LlmqParams =
    preset(LlmqType::Llmq400_60, "llmq_20_60", false, 20, 15, 12, 288, 4, (20, 28), 15, 4, 5, 4, 10);
pub const LLMQ_20_85: LlmqParams =
    preset(LlmqType::Llmq400_85, "llmq_20_85", false, 20, 18, 17, 576, 4, (20, 48), 15, 4, 5, 4, 10);
pub const LLMQ_40_60: LlmqParams =
    preset(LlmqType::Llmq400_60, "llmq_40_60", false, 40, 30, 24, 288, 4, (20, 28), 30, 4, 5, 4, 20);
pub const LLMQ_40_85: LlmqParams =
    preset(LlmqType::Llmq400_85, "llmq_40_85", false, 40, 35, 34, 576, 4, (20, 48), 30, 4, 5, 4, 20);

pub const ALL_PRESETS: [LlmqParams; 20] = [
    LLMQ_TEST,
    LLMQ_TEST_INSTANTSEND,
    LLMQ_TEST_V17,
    LLMQ_TEST_DIP0024,
    LLMQ_TEST_PLATFORM,
    LLMQ_DEVNET,
    LLMQ_DEVNET_DIP0024,
    LLMQ_DEVNET_PLATFORM,
    LLMQ_50_60,
    LLMQ_60_75,
    LLMQ_400_60,
    LLMQ_400_85,
    LLMQ_100_67,
    LLMQ_10_60,
    LLMQ_10_75,
    LLMQ_20_75,
    LLMQ_20_60,
    LLMQ_20_85,
    LLMQ_40_60,
    LLMQ_40_85,
];

/// Looks a preset up by its `llmq_*` name.
pub fn by_name(name: &str) -> Option<LlmqParams> {
    ALL_PRESETS.iter().find(|p| p.name == name).copied()
}
