//! Room project state machine
//!
//! `Idle` picks a site near home, queues the dig route and the footprint,
//! and moves to `Digging`. The next eligible call verifies the site: gone
//! or invalid sites are abandoned, valid ones get the most needed room.
//! A failed build keeps the project pending for the next eligible call.

use crate::core::config::KeeperConfig;
use crate::keeper::actions::KeeperActions;
use crate::keeper::build_order::{build_most_needed_room, BuildDecision};
use crate::keeper::memory::{cooling_down, KeeperMemory, PendingRoom, RoomProject};
use crate::keeper::Step;

pub fn handle_rooms(
    actions: &mut dyn KeeperActions,
    config: &KeeperConfig,
    memory: &mut KeeperMemory,
    elapsed: f64,
) -> Step {
    if cooling_down(&mut memory.room_cooldown, elapsed * config.timers.time_scale) {
        return Step::Pass;
    }
    memory.room_cooldown = config.timers.room_search_interval;

    match memory.project {
        RoomProject::Digging(pending) => verify_and_build(actions, config, memory, pending),
        RoomProject::Idle => start_project(actions, config, memory),
    }
}

fn verify_and_build(
    actions: &mut dyn KeeperActions,
    config: &KeeperConfig,
    memory: &mut KeeperMemory,
    pending: PendingRoom,
) -> Step {
    if actions.tile(pending.origin).is_none() {
        tracing::warn!(
            seat = actions.seat().0,
            origin = %pending.origin,
            "pending room origin is off the map, dropping project"
        );
        memory.project = RoomProject::Idle;
        return Step::Pass;
    }

    if !actions.is_room_site_valid(pending.origin, pending.size) {
        tracing::debug!(
            seat = actions.seat().0,
            origin = %pending.origin,
            "room site no longer valid, abandoning"
        );
        memory.project = RoomProject::Idle;
        return Step::Pass;
    }

    match build_most_needed_room(actions, &config.economy, pending) {
        BuildDecision::Queued(..) | BuildDecision::NothingNeeded => {
            memory.project = RoomProject::Idle;
            Step::Acted
        }
        BuildDecision::Failed(..) => Step::Pass,
    }
}

fn start_project(
    actions: &mut dyn KeeperActions,
    config: &KeeperConfig,
    memory: &mut KeeperMemory,
) -> Step {
    let Some(home) = actions.home_anchor() else {
        return Step::Pass;
    };
    let size = config.layout.room_size;
    let Some(origin) = actions.find_room_site(home, size) else {
        tracing::debug!(seat = actions.seat().0, "no room site found");
        return Step::Pass;
    };

    if !actions.dig_way_to(home, origin) {
        tracing::debug!(seat = actions.seat().0, origin = %origin, "room site unreachable");
        return Step::Pass;
    }

    let pending = PendingRoom { origin, size };
    memory.project = RoomProject::Digging(pending);

    for pos in pending.footprint().cells() {
        if actions.tile(pos).is_none() {
            tracing::warn!(seat = actions.seat().0, pos = %pos, "room footprint leaves the map");
            continue;
        }
        actions.mark_for_digging(pos);
    }

    tracing::debug!(seat = actions.seat().0, origin = %origin, size, "room site queued for digging");
    Step::Acted
}
