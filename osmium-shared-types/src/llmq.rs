//! Long-living masternode quorum (LLMQ) descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quorum type identifiers as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum LlmqType {
    Llmq50_60 = 1,
    Llmq400_60 = 2,
    Llmq400_85 = 3,
    Llmq100_67 = 4,
    Llmq60_75 = 5,

    // for testing only
    Test = 100,
    Devnet = 101,
    TestV17 = 102,
    TestDip0024 = 103,
    TestInstantSend = 104,
    DevnetDip0024 = 105,
    TestPlatform = 106,
    DevnetPlatform = 107,
}

impl LlmqType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            1 => LlmqType::Llmq50_60,
            2 => LlmqType::Llmq400_60,
            3 => LlmqType::Llmq400_85,
            4 => LlmqType::Llmq100_67,
            5 => LlmqType::Llmq60_75,
            100 => LlmqType::Test,
            101 => LlmqType::Devnet,
            102 => LlmqType::TestV17,
            103 => LlmqType::TestDip0024,
            104 => LlmqType::TestInstantSend,
            105 => LlmqType::DevnetDip0024,
            106 => LlmqType::TestPlatform,
            107 => LlmqType::DevnetPlatform,
            _ => return None,
        })
    }
}

impl fmt::Display for LlmqType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.as_u8())
    }
}

/// Parameters of one quorum type.
///
/// Records are replaced as a whole, never edited in place once a profile
/// has been built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LlmqParams {
    pub llmq_type: LlmqType,

    /// Human readable name, also what role overrides match against
    pub name: &'static str,

    /// Whether this quorum type uses rotation (DIP0024)
    pub use_rotation: bool,

    /// Number of members the DKG is run with
    pub size: u32,

    /// Minimum number of valid members for the DKG to succeed
    pub min_size: u32,

    /// Signature shares needed to recover a threshold signature
    pub threshold: u32,

    /// Blocks between two DKG sessions
    pub dkg_interval: u32,

    /// Blocks each DKG phase lasts
    pub dkg_phase_blocks: u32,

    /// First block (relative to the interval) the commitment may be mined in
    pub dkg_mining_window_start: u32,

    /// Last block (relative to the interval) the commitment may be mined in
    pub dkg_mining_window_end: u32,

    /// Bad votes needed before a member is considered bad
    pub dkg_bad_votes_threshold: u32,

    /// Number of quorums to consider "active" for signing sessions
    pub signing_active_quorum_count: u32,

    /// Quorums to keep connections to beyond the active ones
    pub keep_old_connections: u32,

    /// Quorums to keep keys for
    pub keep_old_keys: u32,

    /// Members asked to recover a threshold signature
    pub recovery_members: u32,
}

impl LlmqParams {
    /// Whether `height` falls into this quorum's commitment mining window.
    pub fn is_mining_phase(&self, height: u32) -> bool {
        if self.dkg_interval == 0 {
            return false;
        }
        let phase_index = height % self.dkg_interval;
        phase_index >= self.dkg_mining_window_start && phase_index <= self.dkg_mining_window_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LlmqParams {
        LlmqParams {
            llmq_type: LlmqType::Llmq50_60,
            name: "llmq_50_60",
            use_rotation: false,
            size: 50,
            min_size: 40,
            threshold: 30,
            dkg_interval: 24,
            dkg_phase_blocks: 2,
            dkg_mining_window_start: 10,
            dkg_mining_window_end: 18,
            dkg_bad_votes_threshold: 40,
            signing_active_quorum_count: 24,
            keep_old_connections: 25,
            keep_old_keys: 48,
            recovery_members: 25,
        }
    }

    #[test]
    fn mining_window_bounds_are_inclusive() {
        let params = sample();
        assert!(!params.is_mining_phase(9));
        assert!(params.is_mining_phase(10));
        assert!(params.is_mining_phase(18));
        assert!(!params.is_mining_phase(19));
        assert!(params.is_mining_phase(24 + 12));
    }

    #[test]
    fn type_ids_round_trip() {
        for id in [1u8, 2, 3, 4, 5, 100, 101, 102, 103, 104, 105, 106, 107] {
            assert_eq!(LlmqType::from_u8(id).map(LlmqType::as_u8), Some(id));
        }
        assert_eq!(LlmqType::from_u8(0xff), None);
    }
}
