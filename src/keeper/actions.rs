//! The narrow interface a keeper uses to read and act on the game
//!
//! Everything the policies know about the world comes through this trait,
//! scoped to the keeper's own seat. Fallible commands report `false`/`None`
//! instead of erroring; the calling policy decides what a failure means.

use crate::core::types::{EntityId, RoomId, SeatId, TilePos};
use crate::dungeon::{Creature, Room, RoomType, Tile};
use crate::spatial::Footprint;

/// Buildable tiles of a requested area and what building on them costs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildableArea {
    pub tiles: Vec<TilePos>,
    pub cost: i64,
}

pub trait KeeperActions {
    /// Seat this view acts for
    fn seat(&self) -> SeatId;

    /// Map dimensions `(width, height)`
    fn map_size(&self) -> (i32, i32);

    fn tile(&self, pos: TilePos) -> Option<&Tile>;

    /// In-map orthogonal neighbors in fixed order
    fn neighbors(&self, pos: TilePos) -> Vec<TilePos> {
        pos.neighbors4()
            .into_iter()
            .filter(|p| self.tile(*p).is_some())
            .collect()
    }

    /// Central tile of the seat's home structure; `None` once it is destroyed
    fn home_anchor(&self) -> Option<TilePos>;

    /// Rooms of `room_type` owned by this seat
    fn rooms_of_type(&self, room_type: RoomType) -> Vec<&Room>;

    fn own_creatures(&self) -> Vec<&Creature>;

    /// Creatures of this seat and of every allied seat
    fn allied_creatures(&self) -> Vec<&Creature>;

    /// A digger of this seat used for reachability tests
    fn worker(&self) -> Option<EntityId>;

    /// A fighter of this seat free to be dropped elsewhere
    fn reserve_fighter(&self) -> Option<EntityId>;

    fn cost_per_tile(&self, room_type: RoomType) -> i64;

    /// Tiles of `area` this seat may build `room_type` on, and their price
    fn buildable_area(&self, area: Footprint, room_type: RoomType) -> BuildableArea;

    /// Take `amount` from the pooled treasury; all or nothing
    fn withdraw(&mut self, amount: i64) -> bool;

    fn path_exists(&self, mover: EntityId, from: TilePos, to: TilePos) -> bool;

    /// Queue `pos` for excavation; `false` if it cannot be dug
    fn mark_for_digging(&mut self, pos: TilePos) -> bool;

    /// Queue excavation of a route from `from` to `to`; `false` if none exists
    fn dig_way_to(&mut self, from: TilePos, to: TilePos) -> bool;

    /// Origin of a `size` x `size` site near `center` suitable for a room
    fn find_room_site(&self, center: TilePos, size: i32) -> Option<TilePos>;

    /// Whether a previously chosen site can still host a room
    fn is_room_site_valid(&self, origin: TilePos, size: i32) -> bool;

    /// Instantiate a room; callers have already validated and paid for `tiles`
    fn build_room(&mut self, room_type: RoomType, tiles: Vec<TilePos>) -> RoomId;

    fn can_pick_up(&self, creature: EntityId) -> bool;

    fn can_drop_at(&self, creature: EntityId, pos: TilePos) -> bool;

    /// Pick `creature` up and drop it on `to`
    fn relocate(&mut self, creature: EntityId, to: TilePos) -> bool;
}
