//! Digging tools
//!
//! Tools wear down with every dig. Durability is a plain counter and is
//! allowed to go below zero.

use serde::{Deserialize, Serialize};

/// Durability a tool has when bought or handed out at the start.
pub const FRESH_DURABILITY: i32 = 100;

/// Kinds of tool a player can hold
///
/// The discriminants are the integers written to the save file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    /// Bare hands - always available, never wears out
    Hands = 0,
    Axe = 1,
    Pickaxe = 2,
    Hammer = 3,
    Shovel = 4,
}

impl ToolKind {
    /// Every tool kind, in save-file order
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Hands,
        ToolKind::Axe,
        ToolKind::Pickaxe,
        ToolKind::Hammer,
        ToolKind::Shovel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Hands => "Hands",
            ToolKind::Axe => "Axe",
            ToolKind::Pickaxe => "Pickaxe",
            ToolKind::Hammer => "Hammer",
            ToolKind::Shovel => "Shovel",
        }
    }

    /// Texture key in the asset store
    pub fn texture_key(&self) -> &'static str {
        match self {
            ToolKind::Hands => "hands",
            ToolKind::Axe => "axe",
            ToolKind::Pickaxe => "pickaxe",
            ToolKind::Hammer => "hammer",
            ToolKind::Shovel => "shovel",
        }
    }

    /// Hands are not an inventory item
    pub fn is_bare_hands(&self) -> bool {
        matches!(self, ToolKind::Hands)
    }

    /// Save-file integer for this kind
    pub fn as_index(&self) -> i32 {
        *self as i32
    }

    /// Parse a save-file integer
    pub fn from_index(index: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_index() == index)
    }
}

/// A tool instance in the player's inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub kind: ToolKind,
    pub durability: i32,
    pub name: String,
    pub texture_key: String,
    pub price: i32,
}

impl Tool {
    /// A tool with default naming and the given durability and price
    pub fn new(kind: ToolKind, durability: i32, price: i32) -> Self {
        Self {
            kind,
            durability,
            name: kind.name().to_string(),
            texture_key: kind.texture_key().to_string(),
            price,
        }
    }

    /// Apply wear from a dig. No floor is enforced.
    pub fn wear(&mut self, penalty: i32) {
        self.durability -= penalty;
    }

    /// A tool at or below zero durability is worn out, but still usable
    pub fn is_worn_out(&self) -> bool {
        self.durability <= 0
    }
}
