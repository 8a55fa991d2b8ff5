//! Build-order policy - which room the keeper needs next
//!
//! A fixed priority table over a snapshot of current holdings. The first
//! unmet entry wins; a failed build of that entry is reported as such and
//! never falls through to the next one.

use crate::core::config::EconomyConfig;
use crate::core::types::RoomId;
use crate::dungeon::RoomType;
use crate::keeper::actions::KeeperActions;
use crate::keeper::ledger::TreasuryLedger;
use crate::keeper::memory::PendingRoom;
use crate::keeper::planner::{build, BuildError};

/// Room counts and treasury figures the table is evaluated against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Holdings {
    pub dormitories: usize,
    pub hatcheries: usize,
    pub training_halls: usize,
    pub forges: usize,
    pub libraries: usize,
    pub crypts: usize,
    pub empty_storage: i64,
    pub funds: i64,
}

impl Holdings {
    pub fn of(actions: &dyn KeeperActions) -> Self {
        let count = |t| actions.rooms_of_type(t).len();
        let ledger = TreasuryLedger::of(actions);
        Self {
            dormitories: count(RoomType::Dormitory),
            hatcheries: count(RoomType::Hatchery),
            training_halls: count(RoomType::TrainingHall),
            forges: count(RoomType::Forge),
            libraries: count(RoomType::Library),
            crypts: count(RoomType::Crypt),
            empty_storage: ledger.empty_capacity,
            funds: ledger.funds,
        }
    }
}

/// The highest-priority room missing from `holdings`
pub fn next_needed(holdings: &Holdings, economy: &EconomyConfig) -> Option<RoomType> {
    if holdings.dormitories == 0 {
        return Some(RoomType::Dormitory);
    }
    if holdings.empty_storage < economy.min_empty_storage
        && holdings.funds < economy.treasury_funds_ceiling
    {
        return Some(RoomType::Treasury);
    }
    if holdings.hatcheries == 0 {
        return Some(RoomType::Hatchery);
    }
    if holdings.training_halls == 0 {
        return Some(RoomType::TrainingHall);
    }
    if holdings.forges == 0 {
        return Some(RoomType::Forge);
    }
    if holdings.libraries == 0 {
        return Some(RoomType::Library);
    }
    // All the basics are there; a second dormitory comes next
    if holdings.dormitories == 1 {
        return Some(RoomType::Dormitory);
    }
    if holdings.crypts == 0 {
        return Some(RoomType::Crypt);
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildDecision {
    Queued(RoomType, RoomId),
    /// Every entry of the table is satisfied
    NothingNeeded,
    Failed(RoomType, BuildError),
}

/// Build the most needed room over the pending site
pub fn build_most_needed_room(
    actions: &mut dyn KeeperActions,
    economy: &EconomyConfig,
    site: PendingRoom,
) -> BuildDecision {
    let holdings = Holdings::of(actions);
    let Some(room_type) = next_needed(&holdings, economy) else {
        return BuildDecision::NothingNeeded;
    };

    match build(actions, site.footprint(), room_type) {
        Ok(room) => BuildDecision::Queued(room_type, room),
        Err(err) => {
            tracing::debug!(
                seat = actions.seat().0,
                room_type = room_type.name(),
                error = %err,
                "most needed room not built"
            );
            BuildDecision::Failed(room_type, err)
        }
    }
}
