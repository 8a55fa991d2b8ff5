//! Rescue of fleeing creatures and reinforcement of fights

use rand::Rng;

use crate::core::config::KeeperConfig;
use crate::core::types::{EntityId, TilePos};
use crate::keeper::actions::KeeperActions;
use crate::keeper::memory::KeeperMemory;

/// Bring fleeing creatures of the seat back onto the home anchor.
///
/// Creatures already inside the rescue square around home are left where
/// they are. Returns how many were moved.
pub fn rescue_wounded(actions: &mut dyn KeeperActions, config: &KeeperConfig) -> usize {
    let Some(home) = actions.home_anchor() else {
        return 0;
    };
    let radius = config.layout.rescue_radius;

    let fleeing: Vec<(EntityId, TilePos)> = actions
        .own_creatures()
        .into_iter()
        .filter(|c| c.is_fleeing())
        .filter_map(|c| c.position.map(|pos| (c.id, pos)))
        .collect();

    let mut rescued = 0;
    for (id, pos) in fleeing {
        if (home.x - pos.x).abs() <= radius && (home.y - pos.y).abs() <= radius {
            continue;
        }
        if !actions.can_pick_up(id) {
            continue;
        }
        if actions.relocate(id, home) {
            tracing::debug!(seat = actions.seat().0, from = %pos, "fleeing creature taken home");
            rescued += 1;
        } else {
            tracing::warn!(seat = actions.seat().0, from = %pos, "could not drop rescued creature at home");
        }
    }
    rescued
}

/// Drop one reserve fighter next to an allied creature that is fighting.
///
/// Runs only when the defense cooldown has elapsed; a successful drop
/// rolls a new cooldown. Returns whether a fighter was sent.
pub fn handle_defense<R: Rng + ?Sized>(
    actions: &mut dyn KeeperActions,
    config: &KeeperConfig,
    memory: &mut KeeperMemory,
    rng: &mut R,
) -> bool {
    if memory.defense_cooldown > 0 {
        memory.defense_cooldown -= 1;
        return false;
    }

    let fights: Vec<TilePos> = actions
        .allied_creatures()
        .into_iter()
        .filter(|c| c.is_fighting())
        .filter_map(|c| c.position)
        .collect();

    for fight in fights {
        let Some(fighter) = actions.reserve_fighter() else {
            continue;
        };
        if !actions.can_pick_up(fighter) {
            continue;
        }

        let Some(drop_at) = actions
            .neighbors(fight)
            .into_iter()
            .find(|pos| actions.can_drop_at(fighter, *pos))
        else {
            continue;
        };

        if !actions.relocate(fighter, drop_at) {
            tracing::warn!(seat = actions.seat().0, pos = %drop_at, "reinforcement refused after drop check");
            return false;
        }

        memory.defense_cooldown = rng.gen_range(0..=config.timers.defense_cooldown_max);
        tracing::debug!(
            seat = actions.seat().0,
            pos = %drop_at,
            cooldown = memory.defense_cooldown,
            "reinforcement dropped"
        );
        return true;
    }
    false
}
