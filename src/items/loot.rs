//! Loot found on expeditions

use serde::{Deserialize, Serialize};

/// Kinds of loot
///
/// The discriminants are the integers written to the save file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LootKind {
    Wood = 0,
    Gold = 1,
    Diamond = 2,
    MoonDust = 3,
}

impl LootKind {
    /// Every loot kind, in save-file order
    pub const ALL: [LootKind; 4] = [
        LootKind::Wood,
        LootKind::Gold,
        LootKind::Diamond,
        LootKind::MoonDust,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LootKind::Wood => "Wood",
            LootKind::Gold => "Gold",
            LootKind::Diamond => "Diamonds",
            LootKind::MoonDust => "Moon dust",
        }
    }

    pub fn texture_key(&self) -> &'static str {
        match self {
            LootKind::Wood => "wood",
            LootKind::Gold => "gold",
            LootKind::Diamond => "diamond",
            LootKind::MoonDust => "moondust",
        }
    }

    pub fn as_index(&self) -> i32 {
        *self as i32
    }

    pub fn from_index(index: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_index() == index)
    }
}

/// A single piece of loot
///
/// The inventory keeps one entry per item, so five gold bars are five
/// identical `Loot` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loot {
    pub kind: LootKind,
    pub name: String,
    pub texture_key: String,
    pub price: i32,
}

impl Loot {
    pub fn new(kind: LootKind, price: i32) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            texture_key: kind.texture_key().to_string(),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for kind in LootKind::ALL {
            assert_eq!(LootKind::from_index(kind.as_index()), Some(kind));
        }
        assert_eq!(LootKind::from_index(4), None);
    }
}
