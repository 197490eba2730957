//! Museum
//!
//! Read-only view of the collected loot, grouped into exhibits.

use crate::data::Catalog;
use crate::items::{Inventory, LootKind};

/// One display case: every piece of a single loot kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exhibit {
    pub kind: LootKind,
    pub name: &'static str,
    pub texture_key: &'static str,
    pub count: usize,
    pub unit_price: i32,
}

impl Exhibit {
    pub fn value(&self) -> i32 {
        self.unit_price.saturating_mul(self.count as i32)
    }
}

/// The exhibits of a collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Museum {
    pub exhibits: Vec<Exhibit>,
}

impl Museum {
    /// Build exhibits in the order the loot was first collected
    pub fn from_inventory(inventory: &Inventory, catalog: &Catalog) -> Self {
        let exhibits = inventory.loot_summary()
            .into_iter()
            .map(|(kind, count)| Exhibit {
                kind,
                name: kind.name(),
                texture_key: kind.texture_key(),
                count,
                unit_price: catalog.loot_price(kind),
            })
            .collect();
        Self { exhibits }
    }

    pub fn is_empty(&self) -> bool {
        self.exhibits.is_empty()
    }

    pub fn total_pieces(&self) -> usize {
        self.exhibits.iter().map(|e| e.count).sum()
    }

    pub fn total_value(&self) -> i32 {
        self.exhibits.iter().map(Exhibit::value).fold(0, i32::saturating_add)
    }
}
