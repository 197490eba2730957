//! Dig grid cells

use serde::{Deserialize, Serialize};

use crate::items::LootKind;

/// What the player knows about a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Not visited yet
    Hidden,
    /// Visited, nothing here
    Opened,
    /// Holds loot (picked or not)
    Loot,
}

/// A single cell of the dig grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub state: CellState,
    pub loot: Option<LootKind>,
    pub picked: bool,
}

impl Cell {
    pub fn hidden() -> Self {
        Self {
            state: CellState::Hidden,
            loot: None,
            picked: false,
        }
    }

    pub fn with_loot(kind: LootKind) -> Self {
        Self {
            state: CellState::Loot,
            loot: Some(kind),
            picked: false,
        }
    }

    /// Reveal on entry. Loot cells keep their state.
    pub fn open(&mut self) {
        if self.state == CellState::Hidden {
            self.state = CellState::Opened;
        }
    }

    /// Loot still waiting to be picked up
    pub fn available_loot(&self) -> Option<LootKind> {
        match (self.state, self.picked) {
            (CellState::Loot, false) => self.loot,
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::hidden()
    }
}
