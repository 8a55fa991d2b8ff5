//! Breadth-first search over the tile grid
//!
//! Uniform tile costs make plain BFS sufficient; the passability rule is
//! supplied by the caller so walking and digging share one search.

use ahash::AHashMap;
use std::collections::VecDeque;

use crate::core::types::TilePos;
use crate::dungeon::tile::Tile;
use crate::spatial::Grid;

/// Shortest 4-connected path from `start` to `goal`, both included.
///
/// `passable` is checked for every tile entered, `goal` included; `start`
/// is exempt. Returns `None` if no path exists.
pub fn find_path<F>(grid: &Grid<Tile>, start: TilePos, goal: TilePos, passable: F) -> Option<Vec<TilePos>>
where
    F: Fn(&Tile) -> bool,
{
    if !grid.contains(start) || !grid.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut came_from: AHashMap<TilePos, TilePos> = AHashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);
    came_from.insert(start, start);

    while let Some(current) = queue.pop_front() {
        for next in grid.neighbors(current) {
            if came_from.contains_key(&next) {
                continue;
            }
            let Some(tile) = grid.get(next) else {
                continue;
            };
            if !passable(tile) {
                continue;
            }
            came_from.insert(next, current);
            if next == goal {
                return Some(reconstruct_path(&came_from, start, goal));
            }
            queue.push_back(next);
        }
    }

    None
}

fn reconstruct_path(
    came_from: &AHashMap<TilePos, TilePos>,
    start: TilePos,
    goal: TilePos,
) -> Vec<TilePos> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = came_from[&current];
        path.push(current);
    }
    path.reverse();
    path
}
