//! The player
//!
//! Money and food counters plus the inventory and the equipped tool.

use serde::{Deserialize, Serialize};

use crate::data::Catalog;
use crate::items::{Inventory, Loot, Tool, ToolKind};

/// Money a new player starts with
pub const STARTING_MONEY: i32 = 1000;
/// Food a new player starts with
pub const STARTING_FOOD: i32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub money: i32,
    pub food: i32,
    pub inventory: Inventory,
    /// Tool kind in hand, if any
    equipped: Option<ToolKind>,
}

impl Player {
    /// An empty-handed player with nothing in the inventory
    pub fn new(money: i32, food: i32, inventory: Inventory) -> Self {
        Self {
            money,
            food,
            inventory,
            equipped: None,
        }
    }

    /// A new player carrying the catalogue's starting kit
    pub fn with_starting_kit(money: i32, food: i32, mut inventory: Inventory, catalog: &Catalog) -> Self {
        for tool in catalog.starting_kit() {
            if !inventory.add_tool(tool) {
                log::warn!("Starting kit does not fit the tool capacity");
                break;
            }
        }
        Self::new(money, food, inventory)
    }

    /// Pay an amount if affordable. Money never goes negative this way.
    pub fn spend_money(&mut self, amount: i32) -> bool {
        if self.money >= amount {
            self.money -= amount;
            true
        } else {
            false
        }
    }

    pub fn earn(&mut self, amount: i32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Eat one unit of food, stopping at zero
    pub fn use_food(&mut self) {
        if self.food > 0 {
            self.food -= 1;
        }
    }

    /// Take a food penalty with no floor
    pub fn drain_food(&mut self, amount: i32) {
        self.food -= amount;
    }

    pub fn add_food(&mut self, amount: i32) {
        self.food = self.food.saturating_add(amount);
    }

    pub fn equip(&mut self, kind: ToolKind) {
        self.equipped = Some(kind);
    }

    pub fn equipped(&self) -> Option<ToolKind> {
        self.equipped
    }

    /// The inventory tool matching the equipped kind
    pub fn equipped_tool(&self) -> Option<&Tool> {
        self.equipped.and_then(|kind| self.inventory.tool(kind))
    }

    pub fn equipped_tool_mut(&mut self) -> Option<&mut Tool> {
        match self.equipped {
            Some(kind) => self.inventory.tool_mut(kind),
            None => None,
        }
    }

    pub fn has_tool(&self, kind: ToolKind) -> bool {
        self.inventory.has_tool(kind)
    }

    pub fn add_tool(&mut self, tool: Tool) -> bool {
        self.inventory.add_tool(tool)
    }

    pub fn add_loot(&mut self, loot: Loot) -> bool {
        self.inventory.add_loot(loot)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::with_starting_kit(
            STARTING_MONEY,
            STARTING_FOOD,
            Inventory::new(),
            &Catalog::default(),
        )
    }
}
