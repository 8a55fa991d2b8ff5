//! Dungeon tiles

use serde::{Deserialize, Serialize};

use crate::core::types::{RoomId, SeatId};

/// Terrain kind of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Dirt,
    Gold,
    Rock,
    Lava,
    Water,
}

/// Full fullness of an undug tile
pub const FULL_TILE: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    /// 0.0 = dug out floor, > 0.0 = material remaining
    pub fullness: f64,
    pub claimed_by: Option<SeatId>,
    pub room: Option<RoomId>,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            kind: TileKind::Dirt,
            fullness: FULL_TILE,
            claimed_by: None,
            room: None,
        }
    }
}

impl Tile {
    pub fn solid(kind: TileKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Dug-out floor claimed by `seat`
    pub fn claimed_floor(seat: SeatId) -> Self {
        Self {
            kind: TileKind::Dirt,
            fullness: 0.0,
            claimed_by: Some(seat),
            room: None,
        }
    }

    pub fn is_floor(&self) -> bool {
        self.fullness <= 0.0
    }

    pub fn is_diggable(&self) -> bool {
        self.fullness > 0.0 && matches!(self.kind, TileKind::Dirt | TileKind::Gold)
    }

    pub fn is_walkable(&self) -> bool {
        self.is_floor() && !matches!(self.kind, TileKind::Lava | TileKind::Water)
    }

    /// Harvestable gold remains in this tile
    pub fn is_gold_deposit(&self) -> bool {
        self.kind == TileKind::Gold && self.fullness > 0.0
    }

    /// Floor without a room on it
    pub fn is_buildable_upon(&self) -> bool {
        self.is_floor() && self.room.is_none() && matches!(self.kind, TileKind::Dirt | TileKind::Gold)
    }

    pub fn is_claimed_for(&self, seat: SeatId) -> bool {
        self.claimed_by == Some(seat)
    }
}
