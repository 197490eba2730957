//! Expedition site definitions
//!
//! A site is a themed dig location with its own cost, obtainable loot and
//! tool compatibility table. Sites are plain data and are loaded from RON.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::items::{LootKind, ToolKind};

/// Food spent when digging bare-handed at a site that allows it
pub const DEFAULT_HANDS_FOOD_COST: i32 = 2;

/// How a tool fares at a particular site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRule {
    /// Percent chance (0-100) that the find is lost
    pub loss_chance: u32,
    /// Durability taken off the tool on every dig, found or lost
    pub durability_penalty: i32,
}

impl ToolRule {
    pub const fn new(loss_chance: u32, durability_penalty: i32) -> Self {
        Self { loss_chance, durability_penalty }
    }
}

/// A dig site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Unique id for reference
    pub id: String,
    /// Display name
    pub name: String,
    /// Money paid on departure
    pub cost: i32,
    /// Optional flavour text
    #[serde(default)]
    pub description: Option<String>,
    /// Loot this site can yield. Digs grant the first entry.
    pub loot: Vec<LootKind>,
    /// Tool compatibility table
    pub rules: BTreeMap<ToolKind, ToolRule>,
    /// Food spent per bare-handed dig (only used if hands have a rule)
    #[serde(default = "default_hands_food_cost")]
    pub hands_food_cost: i32,
}

fn default_hands_food_cost() -> i32 {
    DEFAULT_HANDS_FOOD_COST
}

impl Site {
    /// Look up the rule for a tool kind
    pub fn rule(&self, kind: ToolKind) -> Option<ToolRule> {
        self.rules.get(&kind).copied()
    }

    /// Whether digging with bare hands is allowed here
    pub fn allows_bare_hands(&self) -> bool {
        self.rules.contains_key(&ToolKind::Hands)
    }

    /// The loot a successful dig yields
    pub fn primary_loot(&self) -> Option<LootKind> {
        self.loot.first().copied()
    }

    /// Tool kinds usable here, in kind order
    pub fn usable_tools(&self) -> impl Iterator<Item = ToolKind> + '_ {
        self.rules.keys().copied()
    }
}

/// Collection of sites, in menu order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteTable {
    pub sites: Vec<Site>,
}

impl SiteTable {
    /// Find a site by id
    pub fn find(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    /// Site at a menu position
    pub fn get(&self, index: usize) -> Option<&Site> {
        self.sites.get(index)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }
}
