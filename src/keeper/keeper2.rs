//! Keeper2 - the standard computer keeper
//!
//! Each turn runs its policies in a fixed priority order:
//! rescue, defense, treasury, room project, gold. Rescue and defense always
//! run; the first of the remaining three that ends the turn stops the rest.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::types::SeatId;
use crate::keeper::actions::KeeperActions;
use crate::keeper::defense::{handle_defense, rescue_wounded};
use crate::keeper::gold::look_for_gold;
use crate::keeper::memory::KeeperMemory;
use crate::keeper::project::handle_rooms;
use crate::keeper::treasury::check_treasury;
use crate::keeper::{KeeperContext, KeeperStrategy, TurnOutcome};

pub struct Keeper2 {
    context: KeeperContext,
    memory: KeeperMemory,
    rng: ChaCha8Rng,
}

impl Keeper2 {
    pub fn new(context: KeeperContext) -> Self {
        Self::with_memory(context, KeeperMemory::new())
    }

    /// Resume a keeper from previously held memory, e.g. a saved game
    pub fn with_memory(context: KeeperContext, memory: KeeperMemory) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(context.seed);
        Self {
            context,
            memory,
            rng,
        }
    }

    pub fn memory(&self) -> &KeeperMemory {
        &self.memory
    }

    pub fn context(&self) -> &KeeperContext {
        &self.context
    }
}

impl KeeperStrategy for Keeper2 {
    fn name(&self) -> &str {
        "keeper2"
    }

    fn seat(&self) -> SeatId {
        self.context.seat
    }

    fn advance(&mut self, actions: &mut dyn KeeperActions, elapsed: f64) -> TurnOutcome {
        if actions.home_anchor().is_none() {
            tracing::info!(seat = self.context.seat.0, "temple lost, keeper stops");
            return TurnOutcome::Stop;
        }

        let config = &self.context.config;
        rescue_wounded(actions, config);
        handle_defense(actions, config, &mut self.memory, &mut self.rng);

        if check_treasury(actions, config).ends_turn() {
            return TurnOutcome::Continue;
        }
        if handle_rooms(actions, config, &mut self.memory, elapsed).ends_turn() {
            return TurnOutcome::Continue;
        }
        look_for_gold(actions, config, &mut self.memory, &mut self.rng, elapsed);
        TurnOutcome::Continue
    }

    fn state(&self) -> Option<&KeeperMemory> {
        Some(&self.memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::KeeperConfig;
    use crate::core::types::TilePos;
    use crate::dungeon::{Creature, CreatureClass, Dungeon, DungeonRules, RoomType};
    use crate::spatial::Footprint;

    const SEAT: SeatId = SeatId(1);

    fn keeper() -> Keeper2 {
        Keeper2::new(KeeperContext::new(SEAT, KeeperConfig::default(), 42))
    }

    fn dungeon() -> Dungeon {
        let mut dungeon = Dungeon::new(24, 24, DungeonRules::default());
        dungeon.add_seat(SEAT, 1);
        dungeon.place_temple(SEAT, TilePos::new(12, 12));
        dungeon.add_creature(Creature::new(SEAT, CreatureClass::Worker, TilePos::new(12, 12)));
        dungeon
    }

    #[test]
    fn test_stops_without_temple() {
        let mut dungeon = dungeon();
        let temple = dungeon.seat(SEAT).unwrap().temple.unwrap();
        dungeon.destroy_room(temple);

        let mut keeper = keeper();
        let outcome = keeper.advance(&mut dungeon.seat_view(SEAT), 0.1);
        assert_eq!(outcome, TurnOutcome::Stop);
    }

    #[test]
    fn test_treasury_comes_before_rooms() {
        let mut dungeon = dungeon();
        dungeon.claim_area(SEAT, Footprint::new(TilePos::new(14, 12), 2, 1));

        let mut keeper = keeper();
        let outcome = keeper.advance(&mut dungeon.seat_view(SEAT), 0.1);
        assert_eq!(outcome, TurnOutcome::Continue);

        assert_eq!(dungeon.rooms_of(SEAT, RoomType::Treasury).len(), 1);
        // The room project never got a look in
        assert!(keeper.memory().project.pending().is_none());
        assert_eq!(dungeon.dig_marks(SEAT).count(), 0);
    }

    #[test]
    fn test_room_project_starts_once_treasury_is_big_enough() {
        let mut dungeon = dungeon();
        let treasury = Footprint::new(TilePos::new(14, 12), 3, 1);
        dungeon.claim_area(SEAT, treasury);
        dungeon.add_room(SEAT, RoomType::Treasury, treasury.cells().collect());

        let mut keeper = keeper();
        keeper.advance(&mut dungeon.seat_view(SEAT), 0.1);

        assert!(keeper.memory().project.pending().is_some());
        assert!(dungeon.dig_marks(SEAT).count() > 0);
    }

    #[test]
    fn test_name_and_seat() {
        let keeper = keeper();
        assert_eq!(keeper.name(), "keeper2");
        assert_eq!(keeper.seat(), SEAT);
    }
}
