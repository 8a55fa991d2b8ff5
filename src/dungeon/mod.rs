//! Reference dungeon - the shared map, rooms, seats and creatures keepers act on
//!
//! Keepers only see the dungeon through `SeatView`, which implements the
//! `KeeperActions` interface for one seat.

pub mod creature;
pub mod events;
pub mod generation;
pub mod map;
pub mod pathing;
pub mod room;
pub mod tile;
pub mod view;

pub use creature::{Behavior, Creature, CreatureClass};
pub use events::{DungeonEvent, DungeonEventLog};
pub use map::{Dungeon, DungeonRules, Seat};
pub use room::{Room, RoomType};
pub use tile::{Tile, TileKind};
pub use view::SeatView;
