//! Keeper AI - autonomous dungeon keeper controller
//!
//! A computer opponent for a dungeon-building game, plus a small reference
//! dungeon it can play against headlessly.

pub mod core;
pub mod dungeon;
pub mod keeper;
pub mod spatial;
