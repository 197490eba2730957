//! Player actions
//!
//! Keys are mapped to these by the UI; the game decides what each one
//! means in the current scene.

use crate::items::{LootKind, ToolKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the game from anywhere
    Quit,
    /// Go back one screen (exits from the base)
    Back,

    // Base
    OpenExpeditionChoice,
    OpenStore,
    OpenMuseum,
    OpenInventory,
    Save,
    Load,

    /// Depart to the site at this table index
    ChooseSite(usize),

    // Expedition
    Equip(ToolKind),
    Dig,
    Move { dx: i32, dy: i32 },
    PickUp,

    // Store
    BuyTool(ToolKind),
    BuyFood,
    SellLoot(LootKind),
}
