//! Seat-scoped view of the dungeon implementing `KeeperActions`

use crate::core::types::{EntityId, RoomId, SeatId, TilePos};
use crate::dungeon::creature::{Creature, CreatureClass};
use crate::dungeon::events::DungeonEvent;
use crate::dungeon::map::Dungeon;
use crate::dungeon::room::{Room, RoomType};
use crate::dungeon::tile::Tile;
use crate::keeper::actions::{BuildableArea, KeeperActions};
use crate::spatial::Footprint;

pub struct SeatView<'a> {
    dungeon: &'a mut Dungeon,
    seat: SeatId,
}

impl<'a> SeatView<'a> {
    pub fn new(dungeon: &'a mut Dungeon, seat: SeatId) -> Self {
        Self { dungeon, seat }
    }

    pub fn dungeon(&self) -> &Dungeon {
        self.dungeon
    }

    fn owned_creature(&self, id: EntityId) -> Option<&Creature> {
        self.dungeon.creature(id).filter(|c| c.seat == self.seat)
    }
}

impl KeeperActions for SeatView<'_> {
    fn seat(&self) -> SeatId {
        self.seat
    }

    fn map_size(&self) -> (i32, i32) {
        (self.dungeon.width(), self.dungeon.height())
    }

    fn tile(&self, pos: TilePos) -> Option<&Tile> {
        self.dungeon.tile(pos)
    }

    fn neighbors(&self, pos: TilePos) -> Vec<TilePos> {
        self.dungeon.tiles().neighbors(pos).collect()
    }

    fn home_anchor(&self) -> Option<TilePos> {
        self.dungeon.home_anchor(self.seat)
    }

    fn rooms_of_type(&self, room_type: RoomType) -> Vec<&Room> {
        self.dungeon.rooms_of(self.seat, room_type)
    }

    fn own_creatures(&self) -> Vec<&Creature> {
        self.dungeon
            .creatures()
            .iter()
            .filter(|c| c.seat == self.seat)
            .collect()
    }

    fn allied_creatures(&self) -> Vec<&Creature> {
        self.dungeon
            .creatures()
            .iter()
            .filter(|c| self.dungeon.are_allied(self.seat, c.seat))
            .collect()
    }

    fn worker(&self) -> Option<EntityId> {
        self.dungeon
            .creatures()
            .iter()
            .find(|c| c.seat == self.seat && c.class == CreatureClass::Worker)
            .map(|c| c.id)
    }

    fn reserve_fighter(&self) -> Option<EntityId> {
        self.dungeon
            .creatures()
            .iter()
            .find(|c| c.seat == self.seat && c.is_reserve_fighter())
            .map(|c| c.id)
    }

    fn cost_per_tile(&self, room_type: RoomType) -> i64 {
        self.dungeon.rules().cost_per_tile(room_type)
    }

    fn buildable_area(&self, area: Footprint, room_type: RoomType) -> BuildableArea {
        let tiles: Vec<TilePos> = area
            .cells()
            .filter(|pos| {
                self.dungeon
                    .tile(*pos)
                    .is_some_and(|t| t.is_buildable_upon() && t.is_claimed_for(self.seat))
            })
            .collect();
        let cost = tiles.len() as i64 * self.cost_per_tile(room_type);
        BuildableArea { tiles, cost }
    }

    fn withdraw(&mut self, amount: i64) -> bool {
        self.dungeon.withdraw(self.seat, amount)
    }

    fn path_exists(&self, mover: EntityId, from: TilePos, to: TilePos) -> bool {
        self.dungeon.creature(mover).is_some() && self.dungeon.path_exists(from, to)
    }

    fn mark_for_digging(&mut self, pos: TilePos) -> bool {
        self.dungeon.mark_for_digging(self.seat, pos)
    }

    fn dig_way_to(&mut self, from: TilePos, to: TilePos) -> bool {
        let Some(route) = self.dungeon.dig_route(from, to) else {
            return false;
        };
        for pos in route {
            // Floor tiles on the route are skipped by the dungeon
            self.dungeon.mark_for_digging(self.seat, pos);
        }
        true
    }

    fn find_room_site(&self, center: TilePos, size: i32) -> Option<TilePos> {
        self.dungeon.find_site(self.seat, center, size)
    }

    fn is_room_site_valid(&self, origin: TilePos, size: i32) -> bool {
        self.dungeon.is_valid_site(self.seat, origin, size)
    }

    fn build_room(&mut self, room_type: RoomType, tiles: Vec<TilePos>) -> RoomId {
        let count = tiles.len();
        let room = self.dungeon.add_room(self.seat, room_type, tiles);
        self.dungeon.log(DungeonEvent::RoomBuilt {
            seat: self.seat,
            room,
            room_type,
            tiles: count,
        });
        room
    }

    fn can_pick_up(&self, creature: EntityId) -> bool {
        self.owned_creature(creature)
            .is_some_and(|c| c.position.is_some())
    }

    fn can_drop_at(&self, creature: EntityId, pos: TilePos) -> bool {
        if self.owned_creature(creature).is_none() {
            return false;
        }
        self.dungeon.tile(pos).is_some_and(|t| {
            t.is_walkable()
                && t
                    .claimed_by
                    .is_some_and(|owner| self.dungeon.are_allied(self.seat, owner))
        })
    }

    fn relocate(&mut self, creature: EntityId, to: TilePos) -> bool {
        if !self.can_pick_up(creature) || !self.can_drop_at(creature, to) {
            return false;
        }
        let seat = self.seat;
        let Some(c) = self.dungeon.creature_mut(creature) else {
            return false;
        };
        c.position = Some(to);
        c.behavior = crate::dungeon::creature::Behavior::Idle;
        self.dungeon.log(DungeonEvent::CreatureRelocated {
            seat,
            creature,
            to,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::creature::Behavior;
    use crate::dungeon::map::DungeonRules;

    fn setup() -> Dungeon {
        let mut dungeon = Dungeon::new(16, 16, DungeonRules::default());
        dungeon.add_seat(SeatId(1), 1);
        dungeon.add_seat(SeatId(2), 2);
        dungeon.place_temple(SeatId(1), TilePos::new(8, 8));
        dungeon.claim_area(SeatId(1), Footprint::square(TilePos::new(2, 2), 3));
        dungeon
    }

    #[test]
    fn test_buildable_area_prices_claimed_tiles_only() {
        let mut dungeon = setup();
        let view = dungeon.seat_view(SeatId(1));
        let area = view.buildable_area(Footprint::square(TilePos::new(2, 2), 4), RoomType::Dormitory);
        assert_eq!(area.tiles.len(), 9);
        assert_eq!(area.cost, 9 * 75);
    }

    #[test]
    fn test_rival_cannot_build_on_claimed_tiles() {
        let mut dungeon = setup();
        let view = dungeon.seat_view(SeatId(2));
        let area = view.buildable_area(Footprint::square(TilePos::new(2, 2), 3), RoomType::Forge);
        assert!(area.tiles.is_empty());
        assert_eq!(area.cost, 0);
    }

    #[test]
    fn test_relocate_requires_claimed_drop_tile() {
        let mut dungeon = setup();
        let id = dungeon.add_creature(
            Creature::new(SeatId(1), CreatureClass::Fighter, TilePos::new(3, 3))
                .with_behavior(Behavior::Fleeing),
        );
        let mut view = dungeon.seat_view(SeatId(1));
        assert!(!view.relocate(id, TilePos::new(0, 0)));
        assert!(view.relocate(id, TilePos::new(8, 8)));

        let creature = dungeon.creature(id).unwrap();
        assert_eq!(creature.position, Some(TilePos::new(8, 8)));
        assert_eq!(creature.behavior, Behavior::Idle);
    }

    #[test]
    fn test_cannot_pick_up_rival_creature() {
        let mut dungeon = setup();
        let id = dungeon.add_creature(Creature::new(
            SeatId(2),
            CreatureClass::Fighter,
            TilePos::new(3, 3),
        ));
        let view = dungeon.seat_view(SeatId(1));
        assert!(!view.can_pick_up(id));
    }

    #[test]
    fn test_dig_way_marks_route() {
        let mut dungeon = setup();
        let mut view = dungeon.seat_view(SeatId(1));
        assert!(view.dig_way_to(TilePos::new(8, 8), TilePos::new(8, 12)));
        let marks: Vec<_> = dungeon.dig_marks(SeatId(1)).copied().collect();
        // (8, 9) is temple floor; (8, 10) .. (8, 12) are solid dirt
        assert_eq!(
            marks,
            vec![TilePos::new(8, 10), TilePos::new(8, 11), TilePos::new(8, 12)]
        );
    }
}
