//! Inventory system
//!
//! Holds the player's tools and loot in two ordered, capacity-bounded lists.

use serde::{Deserialize, Serialize};
use super::loot::{Loot, LootKind};
use super::tool::{Tool, ToolKind};

/// Default number of tools a player can carry
pub const DEFAULT_TOOL_CAPACITY: usize = 8;
/// Default number of loot entries a player can carry
pub const DEFAULT_LOOT_CAPACITY: usize = 40;

/// Player inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    tools: Vec<Tool>,
    loot: Vec<Loot>,
    tool_capacity: usize,
    loot_capacity: usize,
}

impl Inventory {
    /// Create an empty inventory with default capacities
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TOOL_CAPACITY, DEFAULT_LOOT_CAPACITY)
    }

    /// Create an empty inventory with explicit capacities
    pub fn with_capacity(tool_capacity: usize, loot_capacity: usize) -> Self {
        Self {
            tools: Vec::new(),
            loot: Vec::new(),
            tool_capacity,
            loot_capacity,
        }
    }

    pub fn tool_capacity(&self) -> usize {
        self.tool_capacity
    }

    pub fn loot_capacity(&self) -> usize {
        self.loot_capacity
    }

    /// Check if another tool fits
    pub fn has_tool_space(&self) -> bool {
        self.tools.len() < self.tool_capacity
    }

    /// Check if another piece of loot fits
    pub fn has_loot_space(&self) -> bool {
        self.loot.len() < self.loot_capacity
    }

    /// Add a tool. Returns false if the tool list is full.
    pub fn add_tool(&mut self, tool: Tool) -> bool {
        if !self.has_tool_space() {
            return false;
        }
        self.tools.push(tool);
        true
    }

    /// Add one piece of loot. Returns false if the loot list is full.
    pub fn add_loot(&mut self, loot: Loot) -> bool {
        if !self.has_loot_space() {
            return false;
        }
        self.loot.push(loot);
        true
    }

    pub fn has_tool(&self, kind: ToolKind) -> bool {
        self.tools.iter().any(|t| t.kind == kind)
    }

    /// First tool of the given kind
    pub fn tool(&self, kind: ToolKind) -> Option<&Tool> {
        self.tools.iter().find(|t| t.kind == kind)
    }

    /// First tool of the given kind, mutable
    pub fn tool_mut(&mut self, kind: ToolKind) -> Option<&mut Tool> {
        self.tools.iter_mut().find(|t| t.kind == kind)
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn loot(&self) -> &[Loot] {
        &self.loot
    }

    /// Number of loot entries of a kind
    pub fn loot_count(&self, kind: LootKind) -> usize {
        self.loot.iter().filter(|l| l.kind == kind).count()
    }

    /// Loot merged by kind, in the order each kind was first collected
    pub fn loot_summary(&self) -> Vec<(LootKind, usize)> {
        let mut summary: Vec<(LootKind, usize)> = Vec::new();
        for entry in &self.loot {
            match summary.iter_mut().find(|(kind, _)| *kind == entry.kind) {
                Some((_, count)) => *count += 1,
                None => summary.push((entry.kind, 1)),
            }
        }
        summary
    }

    /// Remove every entry of a kind and return them
    pub fn take_all_loot(&mut self, kind: LootKind) -> Vec<Loot> {
        let (taken, kept): (Vec<Loot>, Vec<Loot>) =
            self.loot.drain(..).partition(|l| l.kind == kind);
        self.loot = kept;
        taken
    }

    /// Drop all tools and loot, keeping capacities
    pub fn clear(&mut self) {
        self.tools.clear();
        self.loot.clear();
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
