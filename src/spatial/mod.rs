//! Spatial primitives - tile grid, footprints, and ring search

pub mod footprint;
pub mod grid;
pub mod ring;

pub use footprint::Footprint;
pub use grid::Grid;
pub use ring::RingSearch;
