//! Integration tests for quorum adaptation driven from several threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use osmium_consensus::presets::*;
use osmium_consensus::{AdaptationOutcome, LlmqAdapter, LlmqCatalog, QuorumTier};
use osmium_shared_types::{LlmqType, Network};
use proptest::prelude::*;

fn mainnet_base() -> LlmqCatalog {
    [LLMQ_50_60, LLMQ_60_75, LLMQ_20_60, LLMQ_20_85, LLMQ_100_67].into_iter().collect()
}

#[test]
fn concurrent_updates_apply_once() {
    let adapter = Arc::new(LlmqAdapter::new(Network::Main, mainnet_base()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let adapter = Arc::clone(&adapter);
            thread::spawn(move || adapter.update(300, 100))
        })
        .collect();

    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let updated = outcomes
        .iter()
        .filter(|o| matches!(o, AdaptationOutcome::Updated { .. }))
        .count();
    assert_eq!(updated, 1);
    assert_eq!(adapter.last_checked(), (Some(100), Some(300)));
    assert_eq!(adapter.get(LlmqType::Llmq60_75), Some(LLMQ_20_75));
}

#[test]
fn readers_see_whole_catalogs() {
    const READERS: usize = 4;
    const SWAPS: usize = 2000;

    let adapter = Arc::new(LlmqAdapter::new(Network::Main, mainnet_base()));
    let start = Arc::new(Barrier::new(READERS + 1));
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let adapter = Arc::clone(&adapter);
            let start = Arc::clone(&start);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                start.wait();
                loop {
                    let finished = done.load(Ordering::Acquire);
                    let snapshot = adapter.catalog();
                    let q50 = snapshot.get(LlmqType::Llmq50_60).map(|p| p.name);
                    let q400 = snapshot.get(LlmqType::Llmq400_60).map(|p| p.name);
                    // the two slots always move together between the smallest and largest tiers
                    match q50 {
                        Some("llmq_10_60") => assert_eq!(q400, Some("llmq_20_60")),
                        Some("llmq_50_60") => {
                            assert!(matches!(q400, Some("llmq_20_60") | Some("llmq_400_60")))
                        }
                        other => panic!("unexpected 50_60 record {:?}", other),
                    }
                    if finished {
                        break;
                    }
                }
            })
        })
        .collect();

    start.wait();
    let mut swaps = 0;
    let mut height = 0u32;
    while swaps < SWAPS {
        height += 1;
        if adapter.is_mining_phase(height) {
            continue;
        }
        let count = if swaps % 2 == 0 { 50 } else { 3000 };
        assert!(matches!(adapter.update(count, height), AdaptationOutcome::Updated { .. }));
        swaps += 1;
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn shrinking_network_walks_down_tiers() {
    let adapter = LlmqAdapter::new(Network::Main, mainnet_base());
    let steps = [
        (2500, 100, QuorumTier::Full),
        (700, 101, QuorumTier::Large),
        (300, 102, QuorumTier::Medium),
        (150, 200, QuorumTier::Small),
        (60, 1008, QuorumTier::Minimal),
    ];
    for (count, height, tier) in steps {
        assert_eq!(adapter.update(count, height), AdaptationOutcome::Updated { tier });
    }
    assert_eq!(adapter.get(LlmqType::Llmq400_85), Some(LLMQ_20_85));
}

proptest! {
    #[test]
    fn update_never_panics_and_types_stay_in_slots(
        calls in proptest::collection::vec((0usize..5000, 0u32..10_000), 1..40)
    ) {
        let adapter = LlmqAdapter::new(Network::Test, mainnet_base());
        for (count, height) in calls {
            adapter.update(count, height);
        }
        let catalog = adapter.catalog();
        for (slot, params) in catalog.iter() {
            prop_assert_eq!(slot, params.llmq_type);
        }
        prop_assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn second_identical_call_is_skipped(count in 0usize..5000, height in 0u32..10_000) {
        let adapter = LlmqAdapter::new(Network::Main, mainnet_base());
        adapter.update(count, height);
        let before = adapter.catalog();
        let outcome = adapter.update(count, height);
        prop_assert!(matches!(outcome, AdaptationOutcome::Skipped | AdaptationOutcome::SafetyDowngrade));
        if outcome == AdaptationOutcome::Skipped {
            prop_assert_eq!(&*before, &*adapter.catalog());
        }
    }
}
