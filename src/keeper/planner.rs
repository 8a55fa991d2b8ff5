//! Room-build planner: validate a footprint, pay for it, place the room
//!
//! Planning and committing are split so callers can inspect the price first.
//! `commit` withdraws before it builds and never returns between the two,
//! so a failed payment leaves no room and a room never exists unpaid.

use thiserror::Error;

use crate::core::types::{RoomId, TilePos};
use crate::dungeon::RoomType;
use crate::keeper::actions::KeeperActions;
use crate::spatial::Footprint;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("only {found} of {required} tiles are buildable")]
    NotEnoughTiles { found: usize, required: usize },

    #[error("treasury cannot cover {cost} gold")]
    InsufficientFunds { cost: i64 },
}

/// A validated, priced room waiting to be committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRoom {
    pub room_type: RoomType,
    pub tiles: Vec<TilePos>,
    pub cost: i64,
}

/// Resolve which tiles of `footprint` can take `room_type` and their price.
///
/// Fails unless every tile of the footprint is buildable.
pub fn plan_area(
    actions: &dyn KeeperActions,
    footprint: Footprint,
    room_type: RoomType,
) -> Result<PlannedRoom, BuildError> {
    let area = actions.buildable_area(footprint, room_type);
    let required = footprint.area();
    if area.tiles.is_empty() || area.tiles.len() < required {
        return Err(BuildError::NotEnoughTiles {
            found: area.tiles.len(),
            required,
        });
    }

    Ok(PlannedRoom {
        room_type,
        tiles: area.tiles,
        cost: area.cost,
    })
}

/// Pay for `plan` from the pooled treasury, then build it.
///
/// The first treasury of a seat is free whatever its price.
pub fn commit(actions: &mut dyn KeeperActions, plan: PlannedRoom) -> Result<RoomId, BuildError> {
    let bootstrap =
        plan.room_type == RoomType::Treasury && actions.rooms_of_type(RoomType::Treasury).is_empty();

    if !bootstrap && !actions.withdraw(plan.cost) {
        return Err(BuildError::InsufficientFunds { cost: plan.cost });
    }

    let tiles = plan.tiles.len();
    let room = actions.build_room(plan.room_type, plan.tiles);
    tracing::info!(
        seat = actions.seat().0,
        room_type = plan.room_type.name(),
        tiles,
        cost = if bootstrap { 0 } else { plan.cost },
        "room queued"
    );
    Ok(room)
}

/// `plan_area` followed by `commit`
pub fn build(
    actions: &mut dyn KeeperActions,
    footprint: Footprint,
    room_type: RoomType,
) -> Result<RoomId, BuildError> {
    let plan = plan_area(actions, footprint, room_type)?;
    commit(actions, plan)
}
