//! Item system

pub mod tool;
pub mod loot;
pub mod inventory;

pub use tool::{Tool, ToolKind, FRESH_DURABILITY};
pub use loot::{Loot, LootKind};
pub use inventory::{Inventory, DEFAULT_TOOL_CAPACITY, DEFAULT_LOOT_CAPACITY};
