//! The shared dungeon state every seat plays on

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::types::{EntityId, RoomId, SeatId, Tick, TilePos};
use crate::dungeon::creature::{Creature, CreatureClass};
use crate::dungeon::events::{DungeonEvent, DungeonEventLog};
use crate::dungeon::pathing::find_path;
use crate::dungeon::room::{Room, RoomType};
use crate::dungeon::tile::{Tile, TileKind, FULL_TILE};
use crate::dungeon::view::SeatView;
use crate::spatial::{Footprint, Grid, RingSearch};

/// Prices and yields of the dungeon economy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonRules {
    /// Gold per tile for each room type
    pub prices: AHashMap<RoomType, i64>,
    /// Gold one treasury tile can hold
    pub treasury_capacity_per_tile: i64,
    /// Gold mined out of a full gold tile
    pub gold_per_tile: i64,
}

impl Default for DungeonRules {
    fn default() -> Self {
        let prices = [
            (RoomType::Treasury, 25),
            (RoomType::Dormitory, 75),
            (RoomType::Hatchery, 100),
            (RoomType::TrainingHall, 175),
            (RoomType::Forge, 200),
            (RoomType::Library, 225),
            (RoomType::Crypt, 250),
        ]
        .into_iter()
        .collect();

        Self {
            prices,
            treasury_capacity_per_tile: 1000,
            gold_per_tile: 250,
        }
    }
}

impl DungeonRules {
    pub fn cost_per_tile(&self, room_type: RoomType) -> i64 {
        self.prices.get(&room_type).copied().unwrap_or(0)
    }

    pub fn with_price(mut self, room_type: RoomType, price: i64) -> Self {
        self.prices.insert(room_type, price);
        self
    }
}

/// A player slot; seats sharing a team are allies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub team: u32,
    pub temple: Option<RoomId>,
}

#[derive(Debug, Clone)]
pub struct Dungeon {
    tiles: Grid<Tile>,
    rooms: Vec<Room>,
    creatures: Vec<Creature>,
    seats: Vec<Seat>,
    dig_marks: AHashMap<SeatId, BTreeSet<TilePos>>,
    rules: DungeonRules,
    events: DungeonEventLog,
    tick: Tick,
    next_room_id: u32,
}

impl Dungeon {
    /// A map of solid dirt
    pub fn new(width: i32, height: i32, rules: DungeonRules) -> Self {
        Self {
            tiles: Grid::new(width, height),
            rooms: Vec::new(),
            creatures: Vec::new(),
            seats: Vec::new(),
            dig_marks: AHashMap::new(),
            rules,
            events: DungeonEventLog::new(),
            tick: 0,
            next_room_id: 1,
        }
    }

    pub fn width(&self) -> i32 {
        self.tiles.width
    }

    pub fn height(&self) -> i32 {
        self.tiles.height
    }

    pub fn rules(&self) -> &DungeonRules {
        &self.rules
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    pub fn tile(&self, pos: TilePos) -> Option<&Tile> {
        self.tiles.get(pos)
    }

    pub fn set_tile(&mut self, pos: TilePos, tile: Tile) {
        self.tiles.set(pos, tile);
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    pub fn events(&self) -> &DungeonEventLog {
        &self.events
    }

    pub(crate) fn log(&mut self, event: DungeonEvent) {
        self.events.push(self.tick, event);
    }

    /// Per-seat view implementing the keeper action interface
    pub fn seat_view(&mut self, seat: SeatId) -> SeatView<'_> {
        SeatView::new(self, seat)
    }

    // === SEATS ===

    pub fn add_seat(&mut self, id: SeatId, team: u32) {
        if self.seat(id).is_none() {
            self.seats.push(Seat {
                id,
                team,
                temple: None,
            });
        }
    }

    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn are_allied(&self, a: SeatId, b: SeatId) -> bool {
        if a == b {
            return true;
        }
        match (self.seat(a), self.seat(b)) {
            (Some(sa), Some(sb)) => sa.team == sb.team,
            _ => false,
        }
    }

    /// Central tile of the seat's temple
    pub fn home_anchor(&self, seat: SeatId) -> Option<TilePos> {
        let temple = self.seat(seat)?.temple?;
        self.room(temple)?.central_tile()
    }

    // === TILES ===

    /// Turn every tile of `area` into floor claimed by `seat`
    pub fn claim_area(&mut self, seat: SeatId, area: Footprint) {
        for pos in area.cells() {
            if let Some(tile) = self.tiles.get_mut(pos) {
                tile.kind = TileKind::Dirt;
                tile.fullness = 0.0;
                tile.claimed_by = Some(seat);
            }
        }
    }

    // === ROOMS ===

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn rooms_of(&self, seat: SeatId, room_type: RoomType) -> Vec<&Room> {
        self.rooms
            .iter()
            .filter(|r| r.seat == seat && r.room_type == room_type)
            .collect()
    }

    /// Create a room over `tiles` without any price or validity check
    pub fn add_room(&mut self, seat: SeatId, room_type: RoomType, tiles: Vec<TilePos>) -> RoomId {
        let id = RoomId(self.next_room_id);
        self.next_room_id += 1;

        for pos in &tiles {
            if let Some(tile) = self.tiles.get_mut(*pos) {
                tile.room = Some(id);
            }
        }

        let mut room = Room::new(id, room_type, seat, tiles);
        if room_type == RoomType::Treasury {
            room.gold_capacity = room.tiles.len() as i64 * self.rules.treasury_capacity_per_tile;
        }
        self.rooms.push(room);

        if room_type == RoomType::DungeonTemple {
            if let Some(s) = self.seats.iter_mut().find(|s| s.id == seat) {
                s.temple = Some(id);
            }
        }
        id
    }

    /// Claim a 3x3 yard around `center` and put the seat's temple on it
    pub fn place_temple(&mut self, seat: SeatId, center: TilePos) -> RoomId {
        let area = Footprint::square(center.offset(-1, -1), 3);
        self.claim_area(seat, area);
        self.add_room(seat, RoomType::DungeonTemple, area.cells().collect())
    }

    /// Remove a room, freeing its tiles
    pub fn destroy_room(&mut self, id: RoomId) -> Option<Room> {
        let index = self.rooms.iter().position(|r| r.id == id)?;
        let room = self.rooms.remove(index);
        for pos in &room.tiles {
            if let Some(tile) = self.tiles.get_mut(*pos) {
                tile.room = None;
            }
        }
        for seat in &mut self.seats {
            if seat.temple == Some(id) {
                seat.temple = None;
            }
        }
        Some(room)
    }

    // === TREASURY ===

    pub fn seat_gold(&self, seat: SeatId) -> i64 {
        self.rooms_of(seat, RoomType::Treasury)
            .iter()
            .map(|r| r.total_gold())
            .sum()
    }

    /// Spread `amount` over the seat's treasuries, returns amount stored
    pub fn deposit_gold(&mut self, seat: SeatId, amount: i64) -> i64 {
        let mut remaining = amount;
        for room in self
            .rooms
            .iter_mut()
            .filter(|r| r.seat == seat && r.room_type == RoomType::Treasury)
        {
            if remaining <= 0 {
                break;
            }
            remaining -= room.deposit(remaining);
        }
        amount - remaining
    }

    /// Take `amount` from the seat's treasuries; nothing is taken if the
    /// pooled total is short
    pub fn withdraw(&mut self, seat: SeatId, amount: i64) -> bool {
        if amount <= 0 {
            return true;
        }
        if self.seat_gold(seat) < amount {
            return false;
        }

        let mut remaining = amount;
        for room in self
            .rooms
            .iter_mut()
            .filter(|r| r.seat == seat && r.room_type == RoomType::Treasury)
        {
            remaining -= room.take(remaining);
            if remaining == 0 {
                break;
            }
        }
        self.log(DungeonEvent::Withdrawn { seat, amount });
        true
    }

    // === CREATURES ===

    pub fn add_creature(&mut self, creature: Creature) -> EntityId {
        let id = creature.id;
        self.creatures.push(creature);
        id
    }

    pub fn creature(&self, id: EntityId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn creature_mut(&mut self, id: EntityId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.id == id)
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creatures_mut(&mut self) -> &mut [Creature] {
        &mut self.creatures
    }

    // === PATHS ===

    pub fn path_exists(&self, from: TilePos, to: TilePos) -> bool {
        find_path(&self.tiles, from, to, Tile::is_walkable).is_some()
    }

    /// Route through floor and diggable tiles ending on `to`
    pub fn dig_route(&self, from: TilePos, to: TilePos) -> Option<Vec<TilePos>> {
        find_path(&self.tiles, from, to, |t| t.is_walkable() || t.is_diggable())
    }

    // === DIGGING ===

    pub fn mark_for_digging(&mut self, seat: SeatId, pos: TilePos) -> bool {
        if !self.tile(pos).is_some_and(Tile::is_diggable) {
            return false;
        }
        if self.dig_marks.entry(seat).or_default().insert(pos) {
            self.log(DungeonEvent::TileMarked { seat, pos });
        }
        true
    }

    pub fn dig_marks(&self, seat: SeatId) -> impl Iterator<Item = &TilePos> {
        self.dig_marks.get(&seat).into_iter().flatten()
    }

    /// Excavate marked tiles, one per worker of each seat
    ///
    /// Dug tiles become floor claimed by the digging seat; mined gold goes
    /// into that seat's treasuries. Returns the number of tiles dug.
    pub fn resolve_digging(&mut self) -> usize {
        let mut seats: Vec<SeatId> = self.dig_marks.keys().copied().collect();
        seats.sort();

        let mut dug = 0;
        for seat in seats {
            let workers = self
                .creatures
                .iter()
                .filter(|c| c.seat == seat && c.class == CreatureClass::Worker)
                .count();

            let marks = self.dig_marks.remove(&seat).unwrap_or_default();
            let mut remaining = BTreeSet::new();
            let mut budget = workers;
            for pos in marks {
                if !self.tile(pos).is_some_and(Tile::is_diggable) {
                    continue;
                }
                if budget == 0 {
                    remaining.insert(pos);
                    continue;
                }
                budget -= 1;
                self.dig_tile(seat, pos);
                dug += 1;
            }
            if !remaining.is_empty() {
                self.dig_marks.insert(seat, remaining);
            }
        }
        dug
    }

    fn dig_tile(&mut self, seat: SeatId, pos: TilePos) {
        let Some(tile) = self.tiles.get_mut(pos) else {
            return;
        };
        let mined = if tile.kind == TileKind::Gold {
            (self.rules.gold_per_tile as f64 * tile.fullness / FULL_TILE) as i64
        } else {
            0
        };
        tile.kind = TileKind::Dirt;
        tile.fullness = 0.0;
        tile.claimed_by = Some(seat);

        let gold = self.deposit_gold(seat, mined);
        self.log(DungeonEvent::TileDug { seat, pos, gold });
    }

    // === ROOM SITES ===

    /// Every tile of the square is in-map dirt or gold, roomless and not
    /// claimed by another seat
    pub fn is_valid_site(&self, seat: SeatId, origin: TilePos, size: i32) -> bool {
        if size < 1 {
            return false;
        }
        Footprint::square(origin, size).cells().all(|pos| {
            self.tile(pos).is_some_and(|t| {
                matches!(t.kind, TileKind::Dirt | TileKind::Gold)
                    && t.room.is_none()
                    && t.claimed_by.map_or(true, |owner| owner == seat)
            })
        })
    }

    /// Nearest valid site origin around `center`, in ring order
    pub fn find_site(&self, seat: SeatId, center: TilePos, size: i32) -> Option<TilePos> {
        RingSearch::new(center, self.width(), self.height())
            .find(|origin| self.is_valid_site(seat, origin, size))
    }
}
