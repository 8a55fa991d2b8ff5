//! Gold seeking
//!
//! Finds the nearest gold deposit (ties broken at random within the ring),
//! queues a dig route to it from home and marks the surrounding vein.
//! Once no deposit can be found or reached, seeking stops for good.

use rand::Rng;
use std::collections::BTreeSet;

use crate::core::config::KeeperConfig;
use crate::core::types::TilePos;
use crate::keeper::actions::KeeperActions;
use crate::keeper::ledger::TreasuryLedger;
use crate::keeper::memory::{cooling_down, KeeperMemory};
use crate::keeper::Step;
use crate::spatial::RingSearch;

pub fn look_for_gold<R: Rng + ?Sized>(
    actions: &mut dyn KeeperActions,
    config: &KeeperConfig,
    memory: &mut KeeperMemory,
    rng: &mut R,
    elapsed: f64,
) -> Step {
    if memory.gold_exhausted() {
        return Step::Pass;
    }
    if cooling_down(&mut memory.gold_cooldown, elapsed * config.timers.time_scale) {
        return Step::Pass;
    }
    memory.gold_cooldown = config.timers.gold_search_interval;

    // Nowhere to put more gold
    let ledger = TreasuryLedger::of(actions);
    if ledger.empty_capacity < config.economy.min_empty_storage {
        return Step::Pass;
    }

    let Some(home) = actions.home_anchor() else {
        return Step::Pass;
    };

    let (width, height) = actions.map_size();
    let target = RingSearch::new(home, width, height).find_shuffled(rng, |pos| {
        actions.tile(pos).is_some_and(|t| t.is_gold_deposit())
    });

    let Some(target) = target else {
        tracing::info!(seat = actions.seat().0, "no gold left to find, giving up gold search");
        memory.mark_gold_exhausted();
        return Step::Pass;
    };

    if !actions.dig_way_to(home, target) {
        tracing::info!(
            seat = actions.seat().0,
            target = %target,
            "nearest gold is unreachable, giving up gold search"
        );
        memory.mark_gold_exhausted();
        return Step::Pass;
    }

    let vein = gold_cluster(actions, target, config.layout.gold_cluster_depth);
    for pos in &vein {
        actions.mark_for_digging(*pos);
    }

    tracing::debug!(seat = actions.seat().0, target = %target, tiles = vein.len(), "gold vein marked");
    Step::Acted
}

/// `start` plus every gold deposit within `depth` orthogonal steps of it,
/// reached through other deposits
fn gold_cluster(actions: &dyn KeeperActions, start: TilePos, depth: usize) -> BTreeSet<TilePos> {
    let mut cluster = BTreeSet::from([start]);
    for _ in 0..depth {
        let frontier = cluster.clone();
        for pos in frontier {
            for neigh in actions.neighbors(pos) {
                if actions.tile(neigh).is_some_and(|t| t.is_gold_deposit()) {
                    cluster.insert(neigh);
                }
            }
        }
    }
    cluster
}
