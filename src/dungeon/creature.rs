//! Creatures owned by seats

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, SeatId, TilePos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureClass {
    /// Digs, claims and carries gold
    Worker,
    Fighter,
}

/// What the creature is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    Idle,
    Working,
    Fleeing,
    Fighting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: EntityId,
    pub seat: SeatId,
    pub class: CreatureClass,
    pub behavior: Behavior,
    /// `None` while carried or not yet placed
    pub position: Option<TilePos>,
}

impl Creature {
    pub fn new(seat: SeatId, class: CreatureClass, position: TilePos) -> Self {
        Self {
            id: EntityId::new(),
            seat,
            class,
            behavior: Behavior::Idle,
            position: Some(position),
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn is_fleeing(&self) -> bool {
        self.behavior == Behavior::Fleeing
    }

    pub fn is_fighting(&self) -> bool {
        self.behavior == Behavior::Fighting
    }

    /// A fighter that is free to be sent somewhere else
    pub fn is_reserve_fighter(&self) -> bool {
        self.class == CreatureClass::Fighter
            && matches!(self.behavior, Behavior::Idle | Behavior::Working)
            && self.position.is_some()
    }
}
