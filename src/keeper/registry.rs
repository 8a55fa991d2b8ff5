//! Strategy lookup by name
//!
//! Scenario files and the sim runner pick a keeper by name; the registry
//! turns that name and a context into a boxed strategy.

use ahash::AHashMap;

use crate::core::error::{KeeperError, Result};
use crate::core::types::SeatId;
use crate::keeper::actions::KeeperActions;
use crate::keeper::keeper2::Keeper2;
use crate::keeper::{KeeperContext, KeeperStrategy, TurnOutcome};

pub type StrategyFactory = fn(KeeperContext) -> Box<dyn KeeperStrategy>;

#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    factories: AHashMap<String, StrategyFactory>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in strategy
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("keeper2", new_keeper2);
        registry.register("passive", new_passive);
        registry
    }

    /// Add or replace the factory for `name`
    pub fn register(&mut self, name: &str, factory: StrategyFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn create(&self, name: &str, context: KeeperContext) -> Result<Box<dyn KeeperStrategy>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| KeeperError::UnknownStrategy(name.to_string()))?;
        Ok(factory(context))
    }
}

fn new_keeper2(context: KeeperContext) -> Box<dyn KeeperStrategy> {
    Box::new(Keeper2::new(context))
}

fn new_passive(context: KeeperContext) -> Box<dyn KeeperStrategy> {
    Box::new(PassiveKeeper::new(context.seat))
}

/// A keeper that never acts; it only notices when its temple is gone
#[derive(Debug, Clone)]
pub struct PassiveKeeper {
    seat: SeatId,
}

impl PassiveKeeper {
    pub fn new(seat: SeatId) -> Self {
        Self { seat }
    }
}

impl KeeperStrategy for PassiveKeeper {
    fn name(&self) -> &str {
        "passive"
    }

    fn seat(&self) -> SeatId {
        self.seat
    }

    fn advance(&mut self, actions: &mut dyn KeeperActions, _elapsed: f64) -> TurnOutcome {
        if actions.home_anchor().is_none() {
            return TurnOutcome::Stop;
        }
        TurnOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::KeeperConfig;
    use crate::core::types::TilePos;
    use crate::dungeon::{Dungeon, DungeonRules};

    fn context() -> KeeperContext {
        KeeperContext::new(SeatId(1), KeeperConfig::default(), 1)
    }

    #[test]
    fn test_defaults_registered() {
        let registry = StrategyRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["keeper2", "passive"]);

        let keeper = registry.create("keeper2", context()).unwrap();
        assert_eq!(keeper.name(), "keeper2");
        assert_eq!(keeper.seat(), SeatId(1));
    }

    #[test]
    fn test_unknown_strategy() {
        let registry = StrategyRegistry::with_defaults();
        let err = registry.create("keeper9", context()).err().unwrap();
        assert!(matches!(err, KeeperError::UnknownStrategy(name) if name == "keeper9"));
    }

    #[test]
    fn test_passive_keeper_leaves_dungeon_alone() {
        let mut dungeon = Dungeon::new(12, 12, DungeonRules::default());
        dungeon.add_seat(SeatId(1), 1);
        dungeon.place_temple(SeatId(1), TilePos::new(6, 6));
        let events_before = dungeon.events().len();

        let mut keeper = StrategyRegistry::with_defaults()
            .create("passive", context())
            .unwrap();
        assert_eq!(keeper.advance(&mut dungeon.seat_view(SeatId(1)), 1.0), TurnOutcome::Continue);
        assert_eq!(dungeon.events().len(), events_before);

        let temple = dungeon.seat(SeatId(1)).unwrap().temple.unwrap();
        dungeon.destroy_room(temple);
        assert_eq!(keeper.advance(&mut dungeon.seat_view(SeatId(1)), 1.0), TurnOutcome::Stop);
    }
}
