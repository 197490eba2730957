//! Glyphs and colours for text rendering
//!
//! Kitty mode still draws the grid as text; only item art uses images.

use ratatui::style::Color;

use super::RenderMode;
use crate::items::{LootKind, ToolKind};
use crate::world::{Cell, CellState};

/// Character pair plus colour for one thing on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ascii: char,
    pub unicode: char,
    pub fg: (u8, u8, u8),
}

impl Glyph {
    const fn new(ascii: char, unicode: char, fg: (u8, u8, u8)) -> Self {
        Self { ascii, unicode, fg }
    }

    pub fn char_for_mode(&self, mode: RenderMode) -> char {
        match mode {
            RenderMode::Ascii => self.ascii,
            RenderMode::Unicode | RenderMode::Kitty => self.unicode,
        }
    }

    pub fn fg_color(&self) -> Color {
        Color::Rgb(self.fg.0, self.fg.1, self.fg.2)
    }
}

pub const PLAYER: Glyph = Glyph::new('@', '☺', (255, 255, 200));
pub const HIDDEN: Glyph = Glyph::new('#', '▓', (70, 60, 50));
pub const OPENED: Glyph = Glyph::new('.', '·', (110, 100, 85));
/// Loot cell after pickup
pub const DUG_OUT: Glyph = Glyph::new('o', '○', (120, 110, 95));

pub fn loot_glyph(kind: LootKind) -> Glyph {
    match kind {
        LootKind::Wood => Glyph::new('w', '♣', (150, 105, 60)),
        LootKind::Gold => Glyph::new('$', '◆', (255, 215, 0)),
        LootKind::Diamond => Glyph::new('*', '◇', (170, 230, 255)),
        LootKind::MoonDust => Glyph::new(':', '✦', (210, 210, 230)),
    }
}

pub fn tool_glyph(kind: ToolKind) -> Glyph {
    match kind {
        ToolKind::Hands => Glyph::new('h', '✋', (230, 190, 160)),
        ToolKind::Axe => Glyph::new('P', '🪓', (180, 180, 200)),
        ToolKind::Pickaxe => Glyph::new('T', '⛏', (160, 160, 170)),
        ToolKind::Hammer => Glyph::new('Y', '🔨', (170, 140, 110)),
        ToolKind::Shovel => Glyph::new('J', '♠', (150, 150, 140)),
    }
}

/// Glyph for a grid cell as the player sees it
pub fn cell_glyph(cell: &Cell) -> Glyph {
    match cell.state {
        CellState::Hidden => HIDDEN,
        CellState::Opened => OPENED,
        CellState::Loot => match cell.available_loot() {
            Some(kind) => loot_glyph(kind),
            None => DUG_OUT,
        },
    }
}

/// Background colour for a grid cell
pub fn cell_bg(cell: &Cell) -> Color {
    let (r, g, b) = match cell.state {
        CellState::Hidden => (35, 28, 20),
        CellState::Opened => (20, 18, 15),
        CellState::Loot => (45, 38, 15),
    };
    Color::Rgb(r, g, b)
}
