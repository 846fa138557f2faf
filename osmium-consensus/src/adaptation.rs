//! Quorum size adaptation.
//!
//! As the active masternode count moves, the four default quorum slots are
//! swapped for smaller or larger records so quorums can still form on a small
//! network. Recomputation happens at most once per new height and count, and
//! never while any quorum is in its commitment mining window.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use log::{debug, info, warn};
use osmium_shared_types::{LlmqParams, LlmqType, Network};
use serde::Serialize;

use crate::catalog::LlmqCatalog;
use crate::presets::*;

/// Below this count the rotating 60_75 slot is always downgraded, even when
/// the guarded recomputation is skipped.
pub const SAFETY_DOWNGRADE_MN_COUNT: usize = 80;

/// Above this count the largest tier also restores the full 60_75 quorum.
pub const FULL_ROTATION_MN_COUNT: usize = 2000;

/// Exclusive upper bounds of the smaller tiers.
pub const TESTNET_MINIMAL_TIER_LIMIT: usize = SAFETY_DOWNGRADE_MN_COUNT;
pub const MINIMAL_TIER_LIMIT: usize = 100;
pub const SMALL_TIER_LIMIT: usize = 200;
pub const MEDIUM_TIER_LIMIT: usize = 600;

/// Masternode count buckets, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuorumTier {
    Minimal,
    Small,
    Medium,
    Large,
    Full,
}

impl QuorumTier {
    /// Buckets `mn_count`; the smallest tier ends earlier on testnet.
    pub fn for_count(network: Network, mn_count: usize) -> Self {
        let minimal_limit = if network == Network::Test {
            TESTNET_MINIMAL_TIER_LIMIT
        } else {
            MINIMAL_TIER_LIMIT
        };
        if mn_count < minimal_limit {
            QuorumTier::Minimal
        } else if mn_count < SMALL_TIER_LIMIT {
            QuorumTier::Small
        } else if mn_count < MEDIUM_TIER_LIMIT {
            QuorumTier::Medium
        } else if mn_count > FULL_ROTATION_MN_COUNT {
            QuorumTier::Full
        } else {
            QuorumTier::Large
        }
    }

    /// Records installed into the 50_60, 60_75, 400_60 and 400_85 slots.
    pub fn assignments(self) -> [(LlmqType, LlmqParams); 4] {
        let (q50_60, q60_75, q400_60, q400_85) = match self {
            QuorumTier::Minimal => (LLMQ_10_60, LLMQ_10_75, LLMQ_20_60, LLMQ_20_85),
            QuorumTier::Small => (LLMQ_50_60, LLMQ_10_75, LLMQ_40_60, LLMQ_40_85),
            QuorumTier::Medium => (LLMQ_50_60, LLMQ_20_75, LLMQ_40_60, LLMQ_40_85),
            QuorumTier::Large => (LLMQ_50_60, LLMQ_20_75, LLMQ_400_60, LLMQ_400_85),
            QuorumTier::Full => (LLMQ_50_60, LLMQ_60_75, LLMQ_400_60, LLMQ_400_85),
        };
        [
            (LlmqType::Llmq50_60, q50_60),
            (LlmqType::Llmq60_75, q60_75),
            (LlmqType::Llmq400_60, q400_60),
            (LlmqType::Llmq400_85, q400_85),
        ]
    }
}

impl fmt::Display for QuorumTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What one call to [`LlmqAdapter::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdaptationOutcome {
    /// The profile does not adapt its quorums
    Disabled,
    /// The guard passed and the tier's records were installed
    Updated { tier: QuorumTier },
    /// The guard failed and nothing changed
    Skipped,
    /// The guard failed but the 60_75 slot was downgraded for a small network
    SafetyDowngrade,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CheckState {
    last_mn_count: Option<usize>,
    last_height: Option<u32>,
}

/// Owns the live quorum catalog of a profile and adapts it to the network size.
///
/// Evaluations are serialized by an internal mutex. Readers get an `Arc`
/// snapshot, so they see either the whole old or the whole new catalog.
#[derive(Debug)]
pub struct LlmqAdapter {
    network: Network,
    state: Mutex<CheckState>,
    catalog: RwLock<Arc<LlmqCatalog>>,
}

impl LlmqAdapter {
    pub fn new(network: Network, base: LlmqCatalog) -> Self {
        Self {
            network,
            state: Mutex::new(CheckState::default()),
            catalog: RwLock::new(Arc::new(base)),
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Snapshot of the live catalog.
    pub fn catalog(&self) -> Arc<LlmqCatalog> {
        Arc::clone(&self.catalog.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn get(&self, llmq_type: LlmqType) -> Option<LlmqParams> {
        self.catalog().get(llmq_type).copied()
    }

    /// Whether `height` is inside any live quorum's mining window.
    pub fn is_mining_phase(&self, height: u32) -> bool {
        self.catalog().is_mining_phase(height)
    }

    /// Last (height, masternode count) that triggered a recomputation.
    pub fn last_checked(&self) -> (Option<u32>, Option<usize>) {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        (state.last_height, state.last_mn_count)
    }

    /// Re-derives the default quorum slots for `mn_count` active masternodes at `height`.
    pub fn update(&self, mn_count: usize, height: u32) -> AdaptationOutcome {
        if !self.network.adapts_quorums() {
            return AdaptationOutcome::Disabled;
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.catalog();

        let never_checked = state.last_height.is_none();
        let new_height = state.last_height.map_or(true, |last| height > last);
        let new_count = state.last_mn_count != Some(mn_count);
        let mining = current.is_mining_phase(height);

        // the very first evaluation installs a tier even inside a mining window
        if never_checked || (new_height && new_count && !mining) {
            let tier = QuorumTier::for_count(self.network, mn_count);
            info!(
                "Updating LLMQ params: height {:?} -> {}, masternodes {:?} -> {}, tier {}",
                state.last_height, height, state.last_mn_count, mn_count, tier
            );

            let mut next = (*current).clone();
            for (slot, params) in tier.assignments() {
                next.replace(slot, params);
            }
            self.install(next);

            state.last_mn_count = Some(mn_count);
            state.last_height = Some(height);
            return AdaptationOutcome::Updated { tier };
        }

        debug!(
            "Skipping LLMQ update at height {} with {} masternodes (new height: {}, new count: {}, mining: {})",
            height, mn_count, new_height, new_count, mining
        );

        if mn_count < SAFETY_DOWNGRADE_MN_COUNT
            && current.get(LlmqType::Llmq60_75) != Some(&LLMQ_10_75)
        {
            warn!(
                "Only {} masternodes, downgrading {} to {}",
                mn_count,
                LlmqType::Llmq60_75,
                LLMQ_10_75.name
            );
            let mut next = (*current).clone();
            next.replace(LlmqType::Llmq60_75, LLMQ_10_75);
            self.install(next);
            return AdaptationOutcome::SafetyDowngrade;
        }

        AdaptationOutcome::Skipped
    }

    fn install(&self, catalog: LlmqCatalog) {
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> LlmqCatalog {
        [LLMQ_50_60, LLMQ_60_75, LLMQ_20_60, LLMQ_20_85, LLMQ_100_67].into_iter().collect()
    }

    fn slot_names(adapter: &LlmqAdapter) -> [&'static str; 4] {
        let catalog = adapter.catalog();
        let name = |t| catalog.get(t).map(|p: &LlmqParams| p.name).unwrap_or("");
        [
            name(LlmqType::Llmq50_60),
            name(LlmqType::Llmq60_75),
            name(LlmqType::Llmq400_60),
            name(LlmqType::Llmq400_85),
        ]
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(QuorumTier::for_count(Network::Test, 79), QuorumTier::Minimal);
        assert_eq!(QuorumTier::for_count(Network::Test, 80), QuorumTier::Small);
        assert_eq!(QuorumTier::for_count(Network::Main, 99), QuorumTier::Minimal);
        assert_eq!(QuorumTier::for_count(Network::Main, 100), QuorumTier::Small);
        assert_eq!(QuorumTier::for_count(Network::Main, 200), QuorumTier::Medium);
        assert_eq!(QuorumTier::for_count(Network::Main, 600), QuorumTier::Large);
        assert_eq!(QuorumTier::for_count(Network::Main, 2000), QuorumTier::Large);
        assert_eq!(QuorumTier::for_count(Network::Main, 2001), QuorumTier::Full);
    }

    #[test]
    fn first_call_installs_tier() {
        let adapter = LlmqAdapter::new(Network::Main, base());
        assert_eq!(adapter.update(150, 100), AdaptationOutcome::Updated { tier: QuorumTier::Small });
        assert_eq!(slot_names(&adapter), ["llmq_50_60", "llmq_10_75", "llmq_40_60", "llmq_40_85"]);
        assert_eq!(adapter.last_checked(), (Some(100), Some(150)));
        // untouched slot
        assert_eq!(adapter.get(LlmqType::Llmq100_67), Some(LLMQ_100_67));
    }

    #[test]
    fn repeated_call_is_noop() {
        let adapter = LlmqAdapter::new(Network::Main, base());
        adapter.update(700, 100);
        let before = adapter.catalog();
        assert_eq!(adapter.update(700, 100), AdaptationOutcome::Skipped);
        assert!(Arc::ptr_eq(&before, &adapter.catalog()));
    }

    #[test]
    fn same_count_at_higher_height_is_noop() {
        let adapter = LlmqAdapter::new(Network::Main, base());
        adapter.update(700, 100);
        assert_eq!(adapter.update(700, 101), AdaptationOutcome::Skipped);
        assert_eq!(adapter.last_checked(), (Some(100), Some(700)));
    }

    #[test]
    fn lower_height_is_ignored() {
        let adapter = LlmqAdapter::new(Network::Main, base());
        adapter.update(700, 200);
        assert_eq!(adapter.update(300, 101), AdaptationOutcome::Skipped);
        assert_eq!(slot_names(&adapter)[1], "llmq_20_75");
    }

    #[test]
    fn first_call_inside_mining_window_installs_tier() {
        let adapter = LlmqAdapter::new(Network::Main, base());
        // 10 is inside the llmq_50_60 mining window
        assert!(adapter.is_mining_phase(10));
        assert_eq!(adapter.update(700, 10), AdaptationOutcome::Updated { tier: QuorumTier::Large });
        assert_eq!(adapter.get(LlmqType::Llmq400_60), Some(LLMQ_400_60));
        assert_eq!(adapter.last_checked(), (Some(10), Some(700)));
    }

    #[test]
    fn mining_phase_blocks_recompute() {
        let adapter = LlmqAdapter::new(Network::Main, base());
        adapter.update(300, 1);
        let primed = adapter.catalog();
        assert_eq!(adapter.update(700, 34), AdaptationOutcome::Skipped);
        assert_eq!(adapter.last_checked(), (Some(1), Some(300)));
        assert!(Arc::ptr_eq(&primed, &adapter.catalog()));
    }

    #[test]
    fn small_network_downgrade_ignores_guard() {
        let adapter = LlmqAdapter::new(Network::Test, base());
        adapter.update(700, 1);
        assert_eq!(adapter.get(LlmqType::Llmq60_75), Some(LLMQ_20_75));

        // 34 % 24 lands in the llmq_50_60 mining window
        assert_eq!(adapter.update(50, 34), AdaptationOutcome::SafetyDowngrade);
        assert_eq!(adapter.get(LlmqType::Llmq60_75), Some(LLMQ_10_75));
        // other slots and the check state stay as they were
        assert_eq!(adapter.get(LlmqType::Llmq400_60), Some(LLMQ_400_60));
        assert_eq!(adapter.last_checked(), (Some(1), Some(700)));
        assert_eq!(adapter.update(50, 34), AdaptationOutcome::Skipped);
    }

    #[test]
    fn largest_tier_upgrades_rotation_quorum() {
        let adapter = LlmqAdapter::new(Network::Main, base());
        adapter.update(1500, 100);
        assert_eq!(slot_names(&adapter)[1], "llmq_20_75");
        assert_eq!(adapter.update(2001, 101), AdaptationOutcome::Updated { tier: QuorumTier::Full });
        assert_eq!(slot_names(&adapter), ["llmq_50_60", "llmq_60_75", "llmq_400_60", "llmq_400_85"]);
    }

    #[test]
    fn devnet_and_regtest_do_not_adapt() {
        for network in [Network::Devnet, Network::Regtest] {
            let adapter = LlmqAdapter::new(network, base());
            assert_eq!(adapter.update(10, 100), AdaptationOutcome::Disabled);
            assert_eq!(*adapter.catalog(), base());
        }
    }
}
