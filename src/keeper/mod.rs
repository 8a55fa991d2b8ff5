//! Computer-controlled dungeon keepers
//!
//! Architecture: Trait + Data hybrid
//! - `KeeperStrategy` is the swappable per-seat decision maker
//! - `KeeperConfig` holds the TOML-loaded timers and thresholds
//! - `KeeperActions` is the only window onto the game a strategy gets
//!
//! The policies themselves are free functions over `&mut dyn KeeperActions`
//! so any strategy can compose them.

pub mod actions;
pub mod build_order;
pub mod defense;
pub mod gold;
pub mod keeper2;
pub mod ledger;
pub mod memory;
pub mod planner;
pub mod project;
pub mod registry;
pub mod treasury;

pub use actions::{BuildableArea, KeeperActions};
pub use build_order::{BuildDecision, Holdings};
pub use keeper2::Keeper2;
pub use ledger::TreasuryLedger;
pub use memory::{GoldSearch, KeeperMemory, PendingRoom, RoomProject};
pub use planner::{BuildError, PlannedRoom};
pub use registry::{PassiveKeeper, StrategyRegistry};

use crate::core::config::KeeperConfig;
use crate::core::types::SeatId;

/// Result of one policy step within a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Issued at least one command; the rest of the turn is skipped
    Acted,
    /// Nothing issued, but the rest of the turn is skipped anyway
    Handled,
    /// Nothing to do here; later steps run
    Pass,
}

impl Step {
    pub fn ends_turn(self) -> bool {
        !matches!(self, Step::Pass)
    }
}

/// What the caller should do with a keeper after its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    /// The keeper has lost its home and will not act again
    Stop,
}

/// Everything a strategy is created from
#[derive(Debug, Clone)]
pub struct KeeperContext {
    pub seat: SeatId,
    pub config: KeeperConfig,
    /// Seed for the strategy's own RNG
    pub seed: u64,
}

impl KeeperContext {
    pub fn new(seat: SeatId, config: KeeperConfig, seed: u64) -> Self {
        Self { seat, config, seed }
    }
}

/// Trait for keeper AI implementations
pub trait KeeperStrategy {
    fn name(&self) -> &str;

    fn seat(&self) -> SeatId;

    /// Run one turn. `elapsed` is the wall time since the previous turn,
    /// in seconds.
    fn advance(&mut self, actions: &mut dyn KeeperActions, elapsed: f64) -> TurnOutcome;

    /// Memory carried between turns, for strategies that keep any
    fn state(&self) -> Option<&KeeperMemory> {
        None
    }
}
