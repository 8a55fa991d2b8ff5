//! Rooms built over claimed tiles

use serde::{Deserialize, Serialize};

use crate::core::types::{RoomId, SeatId, TilePos};

/// Room types a keeper can own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomType {
    /// Home structure; losing it retires the keeper
    DungeonTemple,
    Treasury,
    Dormitory,
    Hatchery,
    TrainingHall,
    Forge,
    Library,
    Crypt,
}

impl RoomType {
    pub const BUILDABLE: [RoomType; 7] = [
        RoomType::Treasury,
        RoomType::Dormitory,
        RoomType::Hatchery,
        RoomType::TrainingHall,
        RoomType::Forge,
        RoomType::Library,
        RoomType::Crypt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::DungeonTemple => "dungeon temple",
            Self::Treasury => "treasury",
            Self::Dormitory => "dormitory",
            Self::Hatchery => "hatchery",
            Self::TrainingHall => "training hall",
            Self::Forge => "forge",
            Self::Library => "library",
            Self::Crypt => "crypt",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_type: RoomType,
    pub seat: SeatId,
    pub tiles: Vec<TilePos>,
    /// Gold currently stored (treasuries only)
    pub gold: i64,
    /// Gold this room can hold in total (treasuries only)
    pub gold_capacity: i64,
}

impl Room {
    pub fn new(id: RoomId, room_type: RoomType, seat: SeatId, tiles: Vec<TilePos>) -> Self {
        Self {
            id,
            room_type,
            seat,
            tiles,
            gold: 0,
            gold_capacity: 0,
        }
    }

    pub fn covered_tiles(&self) -> &[TilePos] {
        &self.tiles
    }

    pub fn total_gold(&self) -> i64 {
        self.gold
    }

    pub fn empty_storage_space(&self) -> i64 {
        (self.gold_capacity - self.gold).max(0)
    }

    /// Store up to `amount` gold, returns amount actually stored
    pub fn deposit(&mut self, amount: i64) -> i64 {
        let stored = amount.clamp(0, self.empty_storage_space());
        self.gold += stored;
        stored
    }

    /// Take up to `amount` gold, returns amount actually taken
    pub fn take(&mut self, amount: i64) -> i64 {
        let taken = amount.clamp(0, self.gold);
        self.gold -= taken;
        taken
    }

    /// Center of the bounding box of the covered tiles
    pub fn central_tile(&self) -> Option<TilePos> {
        let min_x = self.tiles.iter().map(|t| t.x).min()?;
        let max_x = self.tiles.iter().map(|t| t.x).max()?;
        let min_y = self.tiles.iter().map(|t| t.y).min()?;
        let max_y = self.tiles.iter().map(|t| t.y).max()?;
        Some(TilePos::new((min_x + max_x) / 2, (min_y + max_y) / 2))
    }
}
