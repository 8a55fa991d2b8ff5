//! Log of every mutation the dungeon applied

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, RoomId, SeatId, Tick, TilePos};
use crate::dungeon::room::RoomType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DungeonEvent {
    Withdrawn {
        seat: SeatId,
        amount: i64,
    },
    RoomBuilt {
        seat: SeatId,
        room: RoomId,
        room_type: RoomType,
        tiles: usize,
    },
    TileMarked {
        seat: SeatId,
        pos: TilePos,
    },
    TileDug {
        seat: SeatId,
        pos: TilePos,
        gold: i64,
    },
    CreatureRelocated {
        seat: SeatId,
        creature: EntityId,
        to: TilePos,
    },
}

impl DungeonEvent {
    pub fn seat(&self) -> SeatId {
        match self {
            Self::Withdrawn { seat, .. }
            | Self::RoomBuilt { seat, .. }
            | Self::TileMarked { seat, .. }
            | Self::TileDug { seat, .. }
            | Self::CreatureRelocated { seat, .. } => *seat,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub tick: Tick,
    pub event: DungeonEvent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DungeonEventLog {
    pub events: Vec<LoggedEvent>,
}

impl DungeonEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, event: DungeonEvent) {
        self.events.push(LoggedEvent { tick, event });
    }

    pub fn rooms_built(&self) -> impl Iterator<Item = (SeatId, RoomType)> + '_ {
        self.events.iter().filter_map(|e| match e.event {
            DungeonEvent::RoomBuilt {
                seat, room_type, ..
            } => Some((seat, room_type)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
