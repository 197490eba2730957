//! Entity definitions

pub mod player;

pub use player::{Player, STARTING_MONEY, STARTING_FOOD};
