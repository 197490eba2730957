//! Store transactions
//!
//! Buying tools and food, and selling loot back at catalogue prices.

use crate::data::Catalog;
use crate::entities::Player;
use crate::items::{LootKind, ToolKind};

/// Result of a store transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trade {
    BoughtTool { kind: ToolKind, price: i32 },
    BoughtFood { amount: i32, price: i32 },
    Sold { kind: LootKind, count: usize, total: i32 },
    NotForSale(ToolKind),
    NotEnoughMoney { price: i32 },
    InventoryFull,
    NothingToSell(LootKind),
}

impl Trade {
    /// Whether money or goods changed hands
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Trade::BoughtTool { .. } | Trade::BoughtFood { .. } | Trade::Sold { .. }
        )
    }

    /// Status line for the player
    pub fn message(&self) -> String {
        match self {
            Trade::BoughtTool { kind, price } => format!("Bought {} for {}.", kind.name(), price),
            Trade::BoughtFood { amount, price } => format!("Bought {} food for {}.", amount, price),
            Trade::Sold { kind, count, total } => {
                format!("Sold {} x {} for {}.", count, kind.name(), total)
            }
            Trade::NotForSale(kind) => format!("{} is not for sale.", kind.name()),
            Trade::NotEnoughMoney { price } => format!("Not enough money! ({} needed)", price),
            Trade::InventoryFull => "Inventory full!".to_string(),
            Trade::NothingToSell(kind) => format!("You have no {} to sell.", kind.name()),
        }
    }
}

/// Buy a fresh tool of `kind`
pub fn buy_tool(player: &mut Player, catalog: &Catalog, kind: ToolKind) -> Trade {
    let offer = match catalog.tool_offer(kind) {
        Some(offer) => *offer,
        None => return Trade::NotForSale(kind),
    };
    if !player.inventory.has_tool_space() {
        return Trade::InventoryFull;
    }
    if !player.spend_money(offer.price) {
        return Trade::NotEnoughMoney { price: offer.price };
    }

    if !player.add_tool(catalog.make_tool(kind, offer.durability)) {
        // Refund if the tool did not fit after all
        player.earn(offer.price);
        return Trade::InventoryFull;
    }

    log::info!("Bought {:?} for {}", kind, offer.price);
    Trade::BoughtTool { kind, price: offer.price }
}

/// Buy one food bundle
pub fn buy_food(player: &mut Player, catalog: &Catalog) -> Trade {
    if !player.spend_money(catalog.food_price) {
        return Trade::NotEnoughMoney { price: catalog.food_price };
    }
    player.add_food(catalog.food_amount);
    log::info!("Bought {} food for {}", catalog.food_amount, catalog.food_price);
    Trade::BoughtFood { amount: catalog.food_amount, price: catalog.food_price }
}

/// Sell every carried piece of `kind` at the current price
pub fn sell_loot(player: &mut Player, catalog: &Catalog, kind: LootKind) -> Trade {
    let sold = player.inventory.take_all_loot(kind);
    if sold.is_empty() {
        return Trade::NothingToSell(kind);
    }

    let count = sold.len();
    let total = catalog.loot_price(kind).saturating_mul(count as i32);
    player.earn(total);
    log::info!("Sold {} {:?} for {}", count, kind, total);
    Trade::Sold { kind, count, total }
}
