//! Random dungeon layout for headless matches

use rand::Rng;

use crate::core::types::{SeatId, TilePos};
use crate::dungeon::creature::{Creature, CreatureClass};
use crate::dungeon::map::{Dungeon, DungeonRules};
use crate::dungeon::tile::{Tile, TileKind};
use crate::spatial::Footprint;

/// Chance for an interior tile to be rock
const ROCK_CHANCE: f64 = 0.06;

/// One gold vein per this many tiles
const TILES_PER_VEIN: i32 = 60;

/// Side of the claimed yard around each temple
const YARD_SIZE: i32 = 9;

const WORKERS_PER_SEAT: usize = 2;
const FIGHTERS_PER_SEAT: usize = 3;

/// Home positions as fractions of the map, in seat order
const HOME_SLOTS: [(f32, f32); 4] = [(0.25, 0.25), (0.75, 0.75), (0.75, 0.25), (0.25, 0.75)];

impl Dungeon {
    /// Generate a bordered map with rock, gold veins and up to four seats.
    ///
    /// Seats are numbered from 1, each on its own team, with a temple in a
    /// claimed yard, workers and fighters.
    pub fn generate<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        seat_count: usize,
        rules: DungeonRules,
        rng: &mut R,
    ) -> Self {
        let mut dungeon = Dungeon::new(width, height, rules);

        let positions: Vec<TilePos> = dungeon.tiles().positions().collect();
        for pos in &positions {
            let border = pos.x == 0 || pos.y == 0 || pos.x == width - 1 || pos.y == height - 1;
            if border || rng.gen_bool(ROCK_CHANCE) {
                dungeon.set_tile(*pos, Tile::solid(TileKind::Rock));
            }
        }

        let veins = (width * height / TILES_PER_VEIN).max(1);
        for _ in 0..veins {
            carve_vein(&mut dungeon, rng);
        }

        for (index, (fx, fy)) in HOME_SLOTS.iter().take(seat_count).enumerate() {
            let seat = SeatId(index as u32 + 1);
            let home = TilePos::new(
                (width as f32 * fx) as i32,
                (height as f32 * fy) as i32,
            );
            dungeon.add_seat(seat, seat.0);

            let half = YARD_SIZE / 2;
            dungeon.claim_area(seat, Footprint::square(home.offset(-half, -half), YARD_SIZE));
            dungeon.place_temple(seat, home);

            for i in 0..WORKERS_PER_SEAT {
                let pos = home.offset(-2, i as i32 - 1);
                dungeon.add_creature(Creature::new(seat, CreatureClass::Worker, pos));
            }
            for i in 0..FIGHTERS_PER_SEAT {
                let pos = home.offset(2, i as i32 - 1);
                dungeon.add_creature(Creature::new(seat, CreatureClass::Fighter, pos));
            }
        }

        dungeon
    }
}

/// Random walk of gold tiles through the interior
fn carve_vein<R: Rng + ?Sized>(dungeon: &mut Dungeon, rng: &mut R) {
    if dungeon.width() < 3 || dungeon.height() < 3 {
        return;
    }
    let mut pos = TilePos::new(
        rng.gen_range(1..dungeon.width() - 1),
        rng.gen_range(1..dungeon.height() - 1),
    );
    let length = rng.gen_range(4..=8);
    for _ in 0..length {
        dungeon.set_tile(pos, Tile::solid(TileKind::Gold));
        let step = pos.neighbors4()[rng.gen_range(0..4)];
        if step.x > 0 && step.y > 0 && step.x < dungeon.width() - 1 && step.y < dungeon.height() - 1 {
            pos = step;
        }
    }
}
