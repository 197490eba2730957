//! World module
//!
//! The dig grid explored on expeditions.

pub mod map;
pub mod tile;

pub use map::{DigGrid, Position, GRID_SIZE};
pub use tile::{Cell, CellState};
