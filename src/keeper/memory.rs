//! Persistent keeper state carried between turns

use serde::{Deserialize, Serialize};

use crate::core::types::TilePos;
use crate::spatial::Footprint;

/// A room site whose excavation has been queued but not yet built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRoom {
    pub origin: TilePos,
    pub size: i32,
}

impl PendingRoom {
    pub fn footprint(&self) -> Footprint {
        Footprint::square(self.origin, self.size)
    }
}

/// The single in-flight room project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomProject {
    #[default]
    Idle,
    /// Site dug out and awaiting verification
    Digging(PendingRoom),
}

impl RoomProject {
    pub fn pending(&self) -> Option<PendingRoom> {
        match self {
            Self::Idle => None,
            Self::Digging(pending) => Some(*pending),
        }
    }
}

/// Whether gold seeking may still run; `Exhausted` is terminal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoldSearch {
    #[default]
    Seeking,
    Exhausted,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeeperMemory {
    pub project: RoomProject,
    pub room_cooldown: f64,
    pub gold_cooldown: f64,
    pub gold: GoldSearch,
    pub defense_cooldown: u32,
}

impl KeeperMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gold_exhausted(&self) -> bool {
        self.gold == GoldSearch::Exhausted
    }

    pub fn mark_gold_exhausted(&mut self) {
        self.gold = GoldSearch::Exhausted;
    }
}

/// Run down `timer` by `amount`; returns true while the timer is still
/// positive and the caller should skip its work.
pub(crate) fn cooling_down(timer: &mut f64, amount: f64) -> bool {
    if *timer > 0.0 {
        *timer = (*timer - amount).max(0.0);
        return true;
    }
    false
}
