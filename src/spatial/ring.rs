//! Expanding ring search around a center tile
//!
//! Rings grow by Chebyshev distance. Within a ring the cells come out in a
//! fixed compass order, so the first match is a deterministic tie-break
//! rather than a true Euclidean nearest neighbor:
//!
//! for each `k` in `0..=d`: `(+k,+d)`, `(-k,+d)`, `(+k,-d)`, `(-k,-d)`,
//! `(+d,+k)`, `(+d,-k)`, `(-d,+k)`, `(-d,-k)`.
//!
//! Mirrored variants are dropped at `k = 0`, and the column variants at
//! `k = d` (those corners already came out of the row variants), so every
//! ring cell is produced exactly once.

use rand::Rng;

use crate::core::types::TilePos;

/// Ring search bounded by a map of `width` x `height` tiles
#[derive(Debug, Clone, Copy)]
pub struct RingSearch {
    center: TilePos,
    width: i32,
    height: i32,
}

impl RingSearch {
    pub fn new(center: TilePos, width: i32, height: i32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Rings are searched while `distance < max_distance()`
    pub fn max_distance(&self) -> i32 {
        self.width.max(self.height)
    }

    fn in_map(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// In-map cells at exactly `distance` from the center, in traversal order
    pub fn ring(&self, distance: i32) -> Vec<TilePos> {
        ring_offsets(distance)
            .into_iter()
            .map(|(dx, dy)| self.center.offset(dx, dy))
            .filter(|p| self.in_map(*p))
            .collect()
    }

    /// Every in-map cell except the center, ring by ring
    pub fn cells(&self) -> impl Iterator<Item = TilePos> + '_ {
        (1..self.max_distance()).flat_map(move |d| self.ring(d))
    }

    /// First cell in traversal order satisfying `predicate`
    pub fn find<F>(&self, mut predicate: F) -> Option<TilePos>
    where
        F: FnMut(TilePos) -> bool,
    {
        self.cells().find(|p| predicate(*p))
    }

    /// Like [`find`](Self::find), but matches at the same offset step `k`
    /// of the nearest matching ring compete: each later match of that step
    /// replaces the held one with probability 1/2. Lower steps still win
    /// outright, so a cell on the axis beats a corner of the same ring.
    pub fn find_shuffled<R, F>(&self, rng: &mut R, mut predicate: F) -> Option<TilePos>
    where
        R: Rng + ?Sized,
        F: FnMut(TilePos) -> bool,
    {
        for distance in 1..self.max_distance() {
            for k in 0..=distance {
                let mut held = None;
                for (dx, dy) in step_offsets(distance, k) {
                    let pos = self.center.offset(dx, dy);
                    if !self.in_map(pos) || !predicate(pos) {
                        continue;
                    }
                    if held.is_none() || rng.gen_bool(0.5) {
                        held = Some(pos);
                    }
                }
                if held.is_some() {
                    return held;
                }
            }
        }
        None
    }
}

fn ring_offsets(d: i32) -> Vec<(i32, i32)> {
    if d <= 0 {
        return Vec::new();
    }
    (0..=d).flat_map(|k| step_offsets(d, k)).collect()
}

/// The up to eight offsets of ring `d` at step `k`, in traversal order
fn step_offsets(d: i32, k: i32) -> Vec<(i32, i32)> {
    let mut offsets = Vec::with_capacity(8);
    offsets.push((k, d));
    if k > 0 {
        offsets.push((-k, d));
    }
    offsets.push((k, -d));
    if k > 0 {
        offsets.push((-k, -d));
    }
    if k < d {
        offsets.push((d, k));
        if k > 0 {
            offsets.push((d, -k));
        }
        offsets.push((-d, k));
        if k > 0 {
            offsets.push((-d, -k));
        }
    }
    offsets
}
