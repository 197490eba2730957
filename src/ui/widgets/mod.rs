//! UI widgets

pub mod dig_grid;

pub use dig_grid::{DigGridWidget, CELL_WIDTH};
