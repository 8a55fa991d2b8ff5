//! Keeper AI - headless match runner
//!
//! Generates a dungeon, seats one computer keeper per seat and runs a fixed
//! number of ticks, then prints what every keeper built.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use keeper_ai::core::error::Result;
use keeper_ai::core::types::{SeatId, TilePos};
use keeper_ai::core::{load_config_from, KeeperConfig};
use keeper_ai::dungeon::{Behavior, Dungeon, DungeonRules, RoomType};
use keeper_ai::keeper::{KeeperContext, KeeperStrategy, StrategyRegistry, TurnOutcome};

/// Chance per tick for an idle creature to get caught up in a skirmish
const SKIRMISH_CHANCE: f64 = 0.005;

/// Chance per tick for a skirmishing creature to calm down again
const CALM_CHANCE: f64 = 0.05;

/// Headless Keeper Runner - computer keepers playing on a generated map
#[derive(Parser, Debug)]
#[command(name = "keeper-ai")]
#[command(about = "Run computer keepers on a generated dungeon and report what they built")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 2000)]
    ticks: u64,

    /// Map width in tiles
    #[arg(long, default_value_t = 64)]
    width: i32,

    /// Map height in tiles
    #[arg(long, default_value_t = 64)]
    height: i32,

    /// Number of seats (1-4)
    #[arg(long, default_value_t = 2)]
    seats: usize,

    /// Strategy every seat plays
    #[arg(long, default_value = "keeper2")]
    strategy: String,

    /// Keeper configuration TOML; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds of game time per tick
    #[arg(long, default_value_t = 0.1)]
    tick_seconds: f64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    strategy: String,
    seats: Vec<SeatSummary>,
}

#[derive(Serialize)]
struct SeatSummary {
    seat: u32,
    alive: bool,
    rooms: BTreeMap<String, usize>,
    treasury_tiles: usize,
    gold: i64,
    dig_marks: usize,
    gold_search: Option<String>,
}

struct SeatedKeeper {
    strategy: Box<dyn KeeperStrategy>,
    alive: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keeper_ai=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => KeeperConfig::default(),
    };
    tracing::info!(seed, config = %config.name, strategy = %args.strategy, "starting run");

    let mut dungeon = Dungeon::generate(
        args.width,
        args.height,
        args.seats.clamp(1, 4),
        DungeonRules::default(),
        &mut rng,
    );

    let registry = StrategyRegistry::with_defaults();
    let seat_ids: Vec<SeatId> = dungeon.seats().iter().map(|s| s.id).collect();
    let mut keepers = Vec::with_capacity(seat_ids.len());
    for seat in seat_ids {
        let context = KeeperContext::new(seat, config.clone(), seed.wrapping_add(seat.0 as u64));
        keepers.push(SeatedKeeper {
            strategy: registry.create(&args.strategy, context)?,
            alive: true,
        });
    }

    for _ in 0..args.ticks {
        for keeper in keepers.iter_mut().filter(|k| k.alive) {
            let seat = keeper.strategy.seat();
            let outcome = keeper
                .strategy
                .advance(&mut dungeon.seat_view(seat), args.tick_seconds);
            if outcome == TurnOutcome::Stop {
                tracing::info!(seat = seat.0, tick = dungeon.tick(), "keeper retired");
                keeper.alive = false;
            }
        }
        dungeon.resolve_digging();
        stir_creatures(&mut dungeon, &mut rng);
        dungeon.advance_tick();
    }

    let summary = RunSummary {
        seed,
        ticks: args.ticks,
        strategy: args.strategy.clone(),
        seats: keepers.iter().map(|k| summarize(&dungeon, k)).collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Random skirmishes so rescue and defense have something to do
fn stir_creatures(dungeon: &mut Dungeon, rng: &mut ChaCha8Rng) {
    let walkable: Vec<TilePos> = dungeon
        .tiles()
        .positions()
        .filter(|p| dungeon.tile(*p).is_some_and(|t| t.is_walkable()))
        .collect();
    if walkable.is_empty() {
        return;
    }

    for creature in dungeon.creatures_mut() {
        match creature.behavior {
            Behavior::Idle | Behavior::Working => {
                if !rng.gen_bool(SKIRMISH_CHANCE) {
                    continue;
                }
                if rng.gen_bool(0.5) {
                    creature.behavior = Behavior::Fighting;
                } else {
                    // Fleeing creatures scatter somewhere across the open floor
                    creature.behavior = Behavior::Fleeing;
                    creature.position = Some(walkable[rng.gen_range(0..walkable.len())]);
                }
            }
            Behavior::Fighting | Behavior::Fleeing => {
                if rng.gen_bool(CALM_CHANCE) {
                    creature.behavior = Behavior::Idle;
                }
            }
        }
    }
}

fn summarize(dungeon: &Dungeon, keeper: &SeatedKeeper) -> SeatSummary {
    let seat = keeper.strategy.seat();
    let mut rooms = BTreeMap::new();
    for room_type in RoomType::BUILDABLE {
        let count = dungeon.rooms_of(seat, room_type).len();
        if count > 0 {
            rooms.insert(room_type.name().to_string(), count);
        }
    }

    SeatSummary {
        seat: seat.0,
        alive: keeper.alive,
        rooms,
        treasury_tiles: dungeon
            .rooms_of(seat, RoomType::Treasury)
            .iter()
            .map(|r| r.tiles.len())
            .sum(),
        gold: dungeon.seat_gold(seat),
        dig_marks: dungeon.dig_marks(seat).count(),
        gold_search: keeper
            .strategy
            .state()
            .map(|memory| format!("{:?}", memory.gold)),
    }
}

fn print_summary(summary: &RunSummary) {
    println!("Keeper Run");
    println!("==========");
    println!("Seed: {}", summary.seed);
    println!("Ticks: {}", summary.ticks);
    println!("Strategy: {}", summary.strategy);
    for seat in &summary.seats {
        println!();
        println!(
            "Seat {} ({})",
            seat.seat,
            if seat.alive { "playing" } else { "retired" }
        );
        println!("  Gold: {} in {} treasury tiles", seat.gold, seat.treasury_tiles);
        for (room, count) in &seat.rooms {
            println!("  {}: {}", room, count);
        }
        println!("  Pending digs: {}", seat.dig_marks);
        if let Some(state) = &seat.gold_search {
            println!("  Gold search: {}", state);
        }
    }
}
