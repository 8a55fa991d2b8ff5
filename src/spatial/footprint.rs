//! Rectangular tile footprints for room placement

use serde::{Deserialize, Serialize};

use crate::core::types::TilePos;

/// Axis-aligned rectangle anchored at its lowest corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub origin: TilePos,
    pub width: i32,
    pub height: i32,
}

impl Footprint {
    pub fn new(origin: TilePos, width: i32, height: i32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn square(origin: TilePos, side: i32) -> Self {
        Self::new(origin, side, side)
    }

    pub fn single(pos: TilePos) -> Self {
        Self::new(pos, 1, 1)
    }

    /// Number of tiles covered
    pub fn area(&self) -> usize {
        (self.width.max(0) * self.height.max(0)) as usize
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x >= self.origin.x
            && pos.y >= self.origin.y
            && pos.x < self.origin.x + self.width
            && pos.y < self.origin.y + self.height
    }

    /// Covered positions, column by column
    pub fn cells(&self) -> impl Iterator<Item = TilePos> {
        let origin = self.origin;
        let height = self.height.max(0);
        (0..self.width.max(0))
            .flat_map(move |dx| (0..height).map(move |dy| origin.offset(dx, dy)))
    }
}
