//! Treasury-adequacy check
//!
//! Keeps at least `min_treasury_tiles` of treasury. New tiles go next to an
//! existing treasury when possible, otherwise on the claimed tile nearest to
//! home. When no claimed tile is usable at all the check still ends the
//! turn, so nothing else competes with the ongoing claiming.

use crate::core::config::KeeperConfig;
use crate::core::types::{EntityId, TilePos};
use crate::dungeon::RoomType;
use crate::keeper::actions::KeeperActions;
use crate::keeper::ledger::TreasuryLedger;
use crate::keeper::planner::build;
use crate::keeper::Step;
use crate::spatial::{Footprint, RingSearch};

pub fn check_treasury(actions: &mut dyn KeeperActions, config: &KeeperConfig) -> Step {
    let ledger = TreasuryLedger::of(actions);
    if ledger.tiles >= config.economy.min_treasury_tiles {
        return Step::Pass;
    }

    // The first treasury is free; growing one needs at least a tile's price
    if ledger.tiles > 0 && ledger.funds < actions.cost_per_tile(RoomType::Treasury) {
        return Step::Pass;
    }

    let Some(home) = actions.home_anchor() else {
        return Step::Pass;
    };
    let Some(worker) = actions.worker() else {
        return Step::Pass;
    };

    let target = next_to_treasury(actions, worker, home).or_else(|| {
        let (width, height) = actions.map_size();
        RingSearch::new(home, width, height).find(|pos| usable(actions, worker, home, pos))
    });

    let Some(target) = target else {
        tracing::debug!(seat = actions.seat().0, "no claimed tile for treasury yet");
        return Step::Handled;
    };

    match build(actions, Footprint::single(target), RoomType::Treasury) {
        Ok(_) => Step::Acted,
        Err(err) => {
            tracing::debug!(seat = actions.seat().0, pos = %target, error = %err, "treasury tile not built");
            Step::Pass
        }
    }
}

/// First usable neighbor of any existing treasury tile, scanned room by
/// room, tile by tile, neighbor by neighbor
fn next_to_treasury(actions: &dyn KeeperActions, worker: EntityId, home: TilePos) -> Option<TilePos> {
    let treasuries = actions.rooms_of_type(RoomType::Treasury);
    for room in treasuries {
        for tile in room.covered_tiles() {
            for neigh in actions.neighbors(*tile) {
                if usable(actions, worker, home, neigh) {
                    return Some(neigh);
                }
            }
        }
    }
    None
}

fn usable(actions: &dyn KeeperActions, worker: EntityId, home: TilePos, pos: TilePos) -> bool {
    let seat = actions.seat();
    actions
        .tile(pos)
        .is_some_and(|t| t.is_buildable_upon() && t.is_claimed_for(seat))
        && actions.path_exists(worker, home, pos)
}
