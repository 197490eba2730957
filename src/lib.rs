//! Digsite - a terminal treasure-digging game
//!
//! Buy tools at base camp, pay your way to a dig site, and bring the
//! finds home to sell or put in the museum.

pub mod base;
pub mod data;
pub mod entities;
pub mod expedition;
pub mod game;
pub mod items;
pub mod render;
pub mod save;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use game::{Action, Game, Scene};
pub use entities::Player;
pub use items::{Inventory, LootKind, ToolKind};
pub use world::DigGrid;
