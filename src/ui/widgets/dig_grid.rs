//! Dig grid widget for ratatui
//!
//! Renders the 10x10 expedition field, two columns per cell.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::render::{glyphs, RenderMode};
use crate::world::{DigGrid, Position, GRID_SIZE};

/// Terminal columns per grid cell
pub const CELL_WIDTH: u16 = 2;

/// Widget for rendering the dig grid
pub struct DigGridWidget<'a> {
    grid: &'a DigGrid,
    mode: RenderMode,
    show_marker: bool,
    title: &'a str,
}

impl<'a> DigGridWidget<'a> {
    pub fn new(grid: &'a DigGrid) -> Self {
        Self {
            grid,
            mode: RenderMode::Ascii,
            show_marker: true,
            title: "Dig Site",
        }
    }

    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Blink phase of the player marker
    pub fn show_marker(mut self, show: bool) -> Self {
        self.show_marker = show;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Size including the border
    pub fn required_size() -> (u16, u16) {
        (GRID_SIZE as u16 * CELL_WIDTH + 2, GRID_SIZE as u16 + 2)
    }

    fn cell_style(&self, pos: Position) -> (char, Style) {
        let cell = match self.grid.cell(pos) {
            Some(cell) => cell,
            None => return (' ', Style::default()),
        };
        let bg = glyphs::cell_bg(cell);

        if pos == self.grid.player() {
            let glyph = glyphs::PLAYER;
            let mut style = Style::default()
                .fg(glyph.fg_color())
                .bg(Color::Rgb(60, 50, 30))
                .add_modifier(Modifier::BOLD);
            if self.show_marker {
                return (glyph.char_for_mode(self.mode), style);
            }
            // Marker off: show what is under the player
            let under = glyphs::cell_glyph(cell);
            style = style.fg(under.fg_color());
            return (under.char_for_mode(self.mode), style);
        }

        let glyph = glyphs::cell_glyph(cell);
        (glyph.char_for_mode(self.mode), Style::default().fg(glyph.fg_color()).bg(bg))
    }
}

impl<'a> Widget for DigGridWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(120, 100, 70)));

        let inner = block.inner(area);
        block.render(area, buf);

        for y in 0..GRID_SIZE as u16 {
            for x in 0..GRID_SIZE as u16 {
                let (glyph, style) = self.cell_style(Position::new(x as i32, y as i32));

                let cell_x = inner.x + x * CELL_WIDTH;
                let cell_y = inner.y + y;
                if cell_x + 1 >= inner.x + inner.width || cell_y >= inner.y + inner.height {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((cell_x, cell_y)) {
                    cell.set_char(glyph).set_style(style);
                }
                if let Some(cell) = buf.cell_mut((cell_x + 1, cell_y)) {
                    cell.set_char(' ').set_style(style);
                }
            }
        }
    }
}
