//! Dig grid
//!
//! The fixed 10x10 field explored on an expedition.

use serde::{Deserialize, Serialize};

use super::tile::{Cell, CellState};
use crate::items::LootKind;

/// Side length of the dig grid
pub const GRID_SIZE: usize = 10;

/// A cell coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset and clamp into the grid
    pub fn step_clamped(self, dx: i32, dy: i32) -> Self {
        let max = GRID_SIZE as i32 - 1;
        Self {
            x: self.x.saturating_add(dx).clamp(0, max),
            y: self.y.saturating_add(dy).clamp(0, max),
        }
    }
}

/// The expedition field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigGrid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
    player: Position,
}

impl DigGrid {
    /// Generate a field with a single loot cell at the centre.
    /// The player starts in the top-left corner, which is opened.
    pub fn generate(loot: Option<LootKind>) -> Self {
        let mut cells = [[Cell::hidden(); GRID_SIZE]; GRID_SIZE];
        if let Some(kind) = loot {
            let centre = Self::centre();
            cells[centre.y as usize][centre.x as usize] = Cell::with_loot(kind);
        }

        let mut grid = Self {
            cells,
            player: Position::new(0, 0),
        };
        grid.open_at_player();
        grid
    }

    /// Centre cell coordinate
    pub const fn centre() -> Position {
        Position::new((GRID_SIZE / 2) as i32, (GRID_SIZE / 2) as i32)
    }

    pub fn player(&self) -> Position {
        self.player
    }

    /// Cell at a coordinate, if in bounds
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if !Self::in_bounds(pos) {
            return None;
        }
        Some(&self.cells[pos.y as usize][pos.x as usize])
    }

    #[inline]
    pub fn in_bounds(pos: Position) -> bool {
        let size = GRID_SIZE as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Move the player by an offset, clamped to the grid.
    /// Hidden cells open on entry.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> Position {
        self.player = self.player.step_clamped(dx, dy);
        self.open_at_player();
        self.player
    }

    /// Pick up loot under the player. Returns the kind only the first time.
    pub fn pick_up(&mut self) -> Option<LootKind> {
        let cell = self.cell_mut(self.player)?;
        let kind = cell.available_loot()?;
        cell.picked = true;
        Some(kind)
    }

    /// Loot under the player that has not been picked up
    pub fn loot_here(&self) -> Option<LootKind> {
        self.cell(self.player).and_then(|c| c.available_loot())
    }

    /// Count cells that are no longer hidden
    pub fn explored_count(&self) -> usize {
        self.cells.iter()
            .flatten()
            .filter(|c| c.state != CellState::Hidden)
            .count()
    }

    /// Iterate rows for rendering
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; GRID_SIZE]> {
        self.cells.iter()
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if !Self::in_bounds(pos) {
            return None;
        }
        Some(&mut self.cells[pos.y as usize][pos.x as usize])
    }

    fn open_at_player(&mut self) {
        let pos = self.player;
        if let Some(cell) = self.cell_mut(pos) {
            cell.open();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_places_single_loot_at_centre() {
        let grid = DigGrid::generate(Some(LootKind::Gold));
        let loot_cells: Vec<Position> = (0..GRID_SIZE as i32)
            .flat_map(|y| (0..GRID_SIZE as i32).map(move |x| Position::new(x, y)))
            .filter(|&p| grid.cell(p).map_or(false, |c| c.state == CellState::Loot))
            .collect();
        assert_eq!(loot_cells, vec![Position::new(5, 5)]);
        assert_eq!(grid.player(), Position::new(0, 0));
        assert_eq!(grid.cell(Position::new(0, 0)).unwrap().state, CellState::Opened);
        assert_eq!(grid.explored_count(), 2);
    }

    #[test]
    fn test_movement_is_clamped() {
        let mut grid = DigGrid::generate(None);
        for _ in 0..25 {
            grid.move_player(-1, -1);
        }
        assert_eq!(grid.player(), Position::new(0, 0));

        for _ in 0..25 {
            grid.move_player(1, 0);
        }
        assert_eq!(grid.player(), Position::new(9, 0));

        grid.move_player(i32::MAX, i32::MAX);
        assert_eq!(grid.player(), Position::new(9, 9));

        grid.move_player(i32::MIN, 0);
        assert_eq!(grid.player(), Position::new(0, 9));
    }

    #[test]
    fn test_entry_opens_hidden_cells() {
        let mut grid = DigGrid::generate(None);
        let target = Position::new(1, 1);
        assert_eq!(grid.cell(target).unwrap().state, CellState::Hidden);
        grid.move_player(1, 1);
        assert_eq!(grid.cell(target).unwrap().state, CellState::Opened);
    }

    #[test]
    fn test_pick_up_is_idempotent() {
        let mut grid = DigGrid::generate(Some(LootKind::Diamond));
        grid.move_player(5, 5);
        assert_eq!(grid.cell(DigGrid::centre()).unwrap().state, CellState::Loot);

        assert_eq!(grid.pick_up(), Some(LootKind::Diamond));
        assert_eq!(grid.pick_up(), None);
        assert_eq!(grid.loot_here(), None);
    }

    #[test]
    fn test_pick_up_off_loot_does_nothing() {
        let mut grid = DigGrid::generate(Some(LootKind::Wood));
        assert_eq!(grid.pick_up(), None);
        grid.move_player(5, 5);
        assert_eq!(grid.loot_here(), Some(LootKind::Wood));
    }
}
