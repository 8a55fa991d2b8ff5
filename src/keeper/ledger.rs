//! Read-only aggregation over a seat's treasuries

use crate::dungeon::{Room, RoomType};
use crate::keeper::actions::KeeperActions;

pub fn empty_capacity(rooms: &[&Room]) -> i64 {
    rooms.iter().map(|r| r.empty_storage_space()).sum()
}

pub fn total_funds(rooms: &[&Room]) -> i64 {
    rooms.iter().map(|r| r.total_gold()).sum()
}

pub fn covered_tiles(rooms: &[&Room]) -> usize {
    rooms.iter().map(|r| r.covered_tiles().len()).sum()
}

/// Snapshot of the acting seat's pooled treasury
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreasuryLedger {
    pub rooms: usize,
    pub tiles: usize,
    pub funds: i64,
    pub empty_capacity: i64,
}

impl TreasuryLedger {
    pub fn of(actions: &dyn KeeperActions) -> Self {
        let treasuries = actions.rooms_of_type(RoomType::Treasury);
        Self {
            rooms: treasuries.len(),
            tiles: covered_tiles(&treasuries),
            funds: total_funds(&treasuries),
            empty_capacity: empty_capacity(&treasuries),
        }
    }
}
