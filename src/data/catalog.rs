//! Store catalogue and loot prices
//!
//! Prices live here rather than on saved items, so a loaded save always
//! sells at current prices.

use serde::{Deserialize, Serialize};

use crate::items::{Loot, LootKind, Tool, ToolKind, FRESH_DURABILITY};

/// A tool on the store shelf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOffer {
    pub kind: ToolKind,
    pub price: i32,
    pub durability: i32,
}

/// Sell price of a loot kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootPrice {
    pub kind: LootKind,
    pub price: i32,
}

/// Store stock, food pricing and starting kit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Tools for sale, in store menu order
    pub tools: Vec<ToolOffer>,
    /// Loot sell prices
    pub loot: Vec<LootPrice>,
    /// Price of one food bundle
    pub food_price: i32,
    /// Food units in one bundle
    pub food_amount: i32,
    /// Tools a new player starts with
    pub starting_tools: Vec<ToolKind>,
}

impl Catalog {
    /// Shelf entry for a tool kind
    pub fn tool_offer(&self, kind: ToolKind) -> Option<&ToolOffer> {
        self.tools.iter().find(|t| t.kind == kind)
    }

    /// Sell price of a loot kind, zero if unlisted
    pub fn loot_price(&self, kind: LootKind) -> i32 {
        self.loot.iter()
            .find(|l| l.kind == kind)
            .map(|l| l.price)
            .unwrap_or(0)
    }

    /// Build a loot entry with catalogue pricing
    pub fn make_loot(&self, kind: LootKind) -> Loot {
        Loot::new(kind, self.loot_price(kind))
    }

    /// Build a tool with catalogue pricing and the given durability
    pub fn make_tool(&self, kind: ToolKind, durability: i32) -> Tool {
        let price = self.tool_offer(kind).map(|o| o.price).unwrap_or(0);
        Tool::new(kind, durability, price)
    }

    /// The starting kit at fresh durability
    pub fn starting_kit(&self) -> Vec<Tool> {
        self.starting_tools.iter()
            .map(|&kind| self.make_tool(kind, FRESH_DURABILITY))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        default_catalog()
    }
}

/// Create default catalogue (hardcoded fallback)
pub fn default_catalog() -> Catalog {
    let offer = |kind, price| ToolOffer { kind, price, durability: FRESH_DURABILITY };
    Catalog {
        tools: vec![
            offer(ToolKind::Axe, 200),
            offer(ToolKind::Pickaxe, 300),
            offer(ToolKind::Hammer, 250),
            offer(ToolKind::Shovel, 150),
        ],
        loot: vec![
            LootPrice { kind: LootKind::Wood, price: 150 },
            LootPrice { kind: LootKind::Gold, price: 250 },
            LootPrice { kind: LootKind::Diamond, price: 750 },
            LootPrice { kind: LootKind::MoonDust, price: 1300 },
        ],
        food_price: 50,
        food_amount: 5,
        starting_tools: vec![
            ToolKind::Axe,
            ToolKind::Hammer,
            ToolKind::Pickaxe,
            ToolKind::Shovel,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loot_prices() {
        let catalog = default_catalog();
        assert_eq!(catalog.loot_price(LootKind::Wood), 150);
        assert_eq!(catalog.loot_price(LootKind::MoonDust), 1300);
        assert_eq!(catalog.make_loot(LootKind::Gold).price, 250);
    }

    #[test]
    fn test_hands_are_not_for_sale() {
        let catalog = default_catalog();
        assert!(catalog.tool_offer(ToolKind::Hands).is_none());
        assert_eq!(catalog.make_tool(ToolKind::Hands, 0).price, 0);
    }

    #[test]
    fn test_starting_kit() {
        let kit = default_catalog().starting_kit();
        assert_eq!(kit.len(), 4);
        assert!(kit.iter().all(|t| t.durability == FRESH_DURABILITY));
    }
}
