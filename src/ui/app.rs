//! Main UI Application
//!
//! Draws the current scene and turns key presses into game actions.

use std::io::Write;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::input::map_key;
use super::widgets::DigGridWidget;
use crate::game::{Game, MessageCategory, Scene};
use crate::items::{LootKind, ToolKind};
use crate::render::{glyphs, RenderMode, SpriteLayer};

const GOLD: Color = Color::Rgb(255, 215, 0);
const FOOD: Color = Color::Rgb(160, 220, 120);
const KEY: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Main UI application
pub struct App {
    render_mode: RenderMode,
    /// Texture layer, present only when images can be shown
    sprites: Option<SpriteLayer>,
}

impl App {
    pub fn new(render_mode: RenderMode) -> Self {
        log::info!("Using render mode: {:?}", render_mode);
        Self {
            render_mode,
            sprites: None,
        }
    }

    /// Use an uploaded texture layer for item art
    pub fn attach_sprites(&mut self, sprites: SpriteLayer) {
        if self.render_mode.supports_images() {
            self.sprites = Some(sprites);
        }
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_input(&mut self, key: KeyEvent, game: &mut Game) -> Result<bool> {
        if let Some(action) = map_key(game.scene(), key) {
            game.handle_action(action);
        }
        Ok(!game.is_running())
    }

    /// Place this frame's textures. Call after the terminal has drawn.
    pub fn flush_sprites<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if let Some(sprites) = self.sprites.as_mut() {
            sprites.flush(out)?;
            out.flush()?;
        }
        Ok(())
    }

    /// Remove textures from the terminal before exit
    pub fn cleanup<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if let Some(sprites) = self.sprites.as_mut() {
            sprites.cleanup(out)?;
        }
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame, game: &Game) {
        frame.render_widget(Clear, frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(12),   // Scene
                Constraint::Length(7), // Messages
            ])
            .split(frame.area());

        self.render_header(frame, game, chunks[0]);
        match game.scene() {
            Scene::Base => self.render_base(frame, game, chunks[1]),
            Scene::ExpeditionChoice => self.render_expedition_choice(frame, game, chunks[1]),
            Scene::Expedition => self.render_expedition(frame, game, chunks[1]),
            Scene::Store => self.render_store(frame, game, chunks[1]),
            Scene::Museum => self.render_museum(frame, game, chunks[1]),
            Scene::Inventory => self.render_inventory(frame, game, chunks[1]),
            Scene::Exit => {}
        }
        self.render_messages(frame, game, chunks[2]);
    }

    fn queue_sprite(&mut self, key: &str, area: Rect) {
        if let Some(sprites) = self.sprites.as_mut() {
            sprites.queue(key, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let player = game.player();
        let food_color = if player.food > 0 { FOOD } else { Color::LightRed };
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", game.scene().title()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("Money: {}", player.money), Style::default().fg(GOLD)),
            Span::raw("   "),
            Span::styled(format!("Food: {}", player.food), Style::default().fg(food_color)),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(120, 100, 70)));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_base(&mut self, frame: &mut Frame, _game: &Game, area: Rect) {
        let menu = [
            ("1", "Expedition"),
            ("2", "Store"),
            ("3", "Museum"),
            ("4", "Save"),
            ("5", "Inventory"),
            ("6", "Load"),
            ("Esc", "Exit"),
        ];
        let mut lines = vec![Line::from("")];
        for (key, label) in menu {
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", key), KEY),
                Span::styled(label, Style::default().fg(Color::White)),
            ]));
            lines.push(Line::from(""));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Base Camp ")
            .border_style(Style::default().fg(Color::Yellow));
        let menu_area = centered_rect(40, 90, area);
        frame.render_widget(
            Paragraph::new(lines).block(block).alignment(Alignment::Center),
            menu_area,
        );
        self.queue_sprite("base", backdrop_area(area, menu_area));
    }

    fn render_expedition_choice(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let money = game.player().money;
        let mut lines = vec![Line::from("")];

        for (i, site) in game.sites().iter().enumerate() {
            let affordable = money >= site.cost;
            let name_style = if affordable {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let loot = site.primary_loot().map_or("nothing", |k| k.name());
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), KEY),
                Span::styled(format!("{:<20}", site.name), name_style),
                Span::styled(
                    format!(" {:>5} ", site.cost),
                    Style::default().fg(if affordable { GOLD } else { Color::LightRed }),
                ),
                Span::styled(format!(" {}", loot), Style::default().fg(Color::Cyan)),
            ]));

            let tools: Vec<&str> = site.usable_tools().map(|k| k.name()).collect();
            lines.push(Line::from(Span::styled(
                format!("      tools: {}", tools.join(", ")),
                Style::default().fg(Color::Gray),
            )));
            if let Some(description) = &site.description {
                lines.push(Line::from(Span::styled(
                    format!("      {}", description),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                )));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled("[Esc] ", KEY),
            Span::styled("Back", Style::default().fg(Color::Gray)),
        ]));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Where to? ")
            .border_style(Style::default().fg(Color::Yellow));
        frame.render_widget(Paragraph::new(lines).block(block), centered_rect(70, 100, area));
    }

    fn render_expedition(&mut self, frame: &mut Frame, game: &Game, area: Rect) {
        let expedition = match game.expedition() {
            Some(expedition) => expedition,
            None => return,
        };

        let (grid_w, grid_h) = DigGridWidget::required_size();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(grid_w + 2), Constraint::Min(30)])
            .split(area);

        let grid_area = Rect {
            x: chunks[0].x + 1,
            y: chunks[0].y,
            width: grid_w.min(chunks[0].width),
            height: grid_h.min(chunks[0].height),
        };
        let title = format!(" {} ", expedition.name());
        frame.render_widget(
            DigGridWidget::new(expedition.grid())
                .mode(self.render_mode)
                .show_marker(game.marker_visible())
                .title(&title),
            grid_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Expedition ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        let player = game.player();
        let site = expedition.site();
        let mut lines = Vec::new();

        let in_hand = match player.equipped() {
            Some(kind) => {
                let glyph = glyphs::tool_glyph(kind);
                let detail = match player.equipped_tool() {
                    Some(tool) => format!("  (durability {})", tool.durability),
                    None if kind.is_bare_hands() => String::new(),
                    None => "  (not owned)".to_string(),
                };
                Line::from(vec![
                    Span::styled("In hand: ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!("{} {}", glyph.char_for_mode(self.render_mode), kind.name()),
                        Style::default().fg(glyph.fg_color()).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(detail, Style::default().fg(Color::DarkGray)),
                ])
            }
            None => Line::from(Span::styled("In hand: nothing", Style::default().fg(Color::Gray))),
        };
        lines.push(in_hand);
        lines.push(Line::from(Span::styled(
            format!("Digs: {}   Explored: {}", expedition.digs(), expedition.grid().explored_count()),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled("Tools here", Style::default().fg(Color::Cyan))));
        for kind in ToolKind::ALL {
            if let Some(rule) = site.rule(kind) {
                let hint = if kind.is_bare_hands() {
                    format!("{}% loss, {} food", rule.loss_chance, site.hands_food_cost)
                } else {
                    format!("{}% loss, -{} durability", rule.loss_chance, rule.durability_penalty)
                };
                lines.push(Line::from(format!("  {:<8} {}", kind.name(), hint)));
            }
        }
        lines.push(Line::from(""));

        let help = [
            ("1-5", "Axe Hammer Pickaxe Shovel Hands"),
            ("Space", "Dig"),
            ("Arrows/WASD", "Move  (y u b n diagonals)"),
            ("g", "Pick up"),
            ("i", "Inventory"),
            ("Esc", "Back to base"),
        ];
        for (key, desc) in help {
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", key), KEY),
                Span::styled(desc, Style::default().fg(Color::DarkGray)),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(kind) = player.equipped() {
            let art = Rect {
                x: inner.x + inner.width.saturating_sub(9),
                y: inner.y,
                width: 8.min(inner.width),
                height: 4.min(inner.height),
            };
            self.queue_sprite(kind.texture_key(), art);
        }
    }

    fn render_store(&mut self, frame: &mut Frame, game: &Game, area: Rect) {
        let catalog = game.catalog();
        let player = game.player();
        let mut lines = vec![Line::from(Span::styled("Buy", Style::default().fg(Color::Cyan)))];

        let buy_keys = [ToolKind::Axe, ToolKind::Pickaxe, ToolKind::Hammer, ToolKind::Shovel];
        for (i, kind) in buy_keys.iter().enumerate() {
            let (price, style) = match catalog.tool_offer(*kind) {
                Some(offer) => (
                    offer.price.to_string(),
                    price_style(player.money >= offer.price),
                ),
                None => ("-".to_string(), Style::default().fg(Color::DarkGray)),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), KEY),
                Span::raw(format!("{:<10}", kind.name())),
                Span::styled(price, style),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("[5] ", KEY),
            Span::raw(format!("{:<10}", format!("Food x{}", catalog.food_amount))),
            Span::styled(
                catalog.food_price.to_string(),
                price_style(player.money >= catalog.food_price),
            ),
        ]));
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled("Sell", Style::default().fg(Color::Cyan))));
        let sell_keys = [LootKind::Wood, LootKind::Gold, LootKind::Diamond, LootKind::MoonDust];
        for (i, kind) in sell_keys.iter().enumerate() {
            let count = player.inventory.loot_count(*kind);
            let price = catalog.loot_price(*kind);
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", i + 6), KEY),
                Span::raw(format!("{:<10}", kind.name())),
                Span::styled(format!("{} each", price), Style::default().fg(GOLD)),
                Span::styled(
                    format!("   carrying {}", count),
                    Style::default().fg(if count > 0 { Color::White } else { Color::DarkGray }),
                ),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[Esc] ", KEY),
            Span::styled("Back", Style::default().fg(Color::Gray)),
        ]));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Store ")
            .border_style(Style::default().fg(Color::Yellow));
        let store_area = centered_rect(60, 100, area);
        frame.render_widget(Paragraph::new(lines).block(block), store_area);
        self.queue_sprite("store", backdrop_area(area, store_area));
    }

    fn render_museum(&mut self, frame: &mut Frame, game: &Game, area: Rect) {
        let museum = game.museum();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Museum ")
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if museum.is_empty() {
            let empty = Paragraph::new("The halls are empty. Bring back something from an expedition!")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }

        // One row per exhibit; textures sit to the left of the label
        let art_width = if self.sprites.is_some() { 6 } else { 0 };
        let mut row_y = inner.y;
        for exhibit in &museum.exhibits {
            if row_y + 2 > inner.y + inner.height {
                break;
            }
            let glyph = glyphs::loot_glyph(exhibit.kind);
            let label = Line::from(vec![
                Span::styled(
                    format!("{} ", glyph.char_for_mode(self.render_mode)),
                    Style::default().fg(glyph.fg_color()),
                ),
                Span::styled(
                    format!("{:<10}", exhibit.name),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" x{:<4}", exhibit.count)),
                Span::styled(
                    format!(" {} each, worth {}", exhibit.unit_price, exhibit.value()),
                    Style::default().fg(GOLD),
                ),
            ]);
            let row = Rect {
                x: inner.x + art_width,
                y: row_y,
                width: inner.width.saturating_sub(art_width),
                height: 2,
            };
            frame.render_widget(Paragraph::new(label), row);
            self.queue_sprite(exhibit.texture_key, Rect { x: inner.x, y: row_y, width: art_width, height: 2 });
            row_y += 3;
        }

        let total = Paragraph::new(format!(
            "{} pieces, collection value {}",
            museum.total_pieces(),
            museum.total_value()
        ))
        .style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Right);
        let total_area = Rect {
            y: inner.y + inner.height.saturating_sub(1),
            height: 1.min(inner.height),
            ..inner
        };
        frame.render_widget(total, total_area);
    }

    fn render_inventory(&mut self, frame: &mut Frame, game: &Game, area: Rect) {
        let area = fullscreen_overlay(area);
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Inventory ")
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.queue_sprite("inventory", Rect { x: inner.x, y: inner.y, width: 6.min(inner.width), height: 3.min(inner.height) });

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let inventory = &game.player().inventory;
        let equipped = game.player().equipped();

        let mut tools = vec![Line::from(Span::styled(
            format!("Tools {}/{}", inventory.tools().len(), inventory.tool_capacity()),
            Style::default().fg(Color::Cyan),
        ))];
        for tool in inventory.tools() {
            let glyph = glyphs::tool_glyph(tool.kind);
            let durability_color = if tool.is_worn_out() {
                Color::LightRed
            } else if tool.durability < 30 {
                Color::Yellow
            } else {
                Color::Green
            };
            let marker = if Some(tool.kind) == equipped { "> " } else { "  " };
            tools.push(Line::from(vec![
                Span::styled(marker, KEY),
                Span::styled(
                    format!("{} {:<8}", glyph.char_for_mode(self.render_mode), truncate_name(&tool.name, 8)),
                    Style::default().fg(glyph.fg_color()),
                ),
                Span::styled(format!(" {:>4}", tool.durability), Style::default().fg(durability_color)),
            ]));
        }
        frame.render_widget(Paragraph::new(tools), columns[0]);

        let mut loot = vec![Line::from(Span::styled(
            format!("Loot {}/{}", inventory.loot().len(), inventory.loot_capacity()),
            Style::default().fg(Color::Cyan),
        ))];
        for (kind, count) in inventory.loot_summary() {
            let glyph = glyphs::loot_glyph(kind);
            loot.push(Line::from(vec![
                Span::styled(
                    format!("  {} {:<10}", glyph.char_for_mode(self.render_mode), kind.name()),
                    Style::default().fg(glyph.fg_color()),
                ),
                Span::raw(format!(" x{}", count)),
            ]));
        }
        if inventory.loot().is_empty() {
            loot.push(Line::from(Span::styled("  (empty)", Style::default().fg(Color::DarkGray))));
        }
        frame.render_widget(Paragraph::new(loot), columns[1]);
    }

    fn render_messages(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);

        let messages: Vec<Line> = game
            .messages()
            .iter()
            .rev()
            .take(inner.height as usize)
            .rev()
            .map(|msg| {
                let color = match msg.category {
                    MessageCategory::Dig => Color::Yellow,
                    MessageCategory::Trade => GOLD,
                    MessageCategory::System => Color::Cyan,
                    MessageCategory::Warning => Color::LightRed,
                };
                Line::from(Span::styled(msg.text.as_str(), Style::default().fg(color)))
            })
            .collect();

        frame.render_widget(Paragraph::new(messages).block(block), area);
    }
}

fn price_style(affordable: bool) -> Style {
    Style::default().fg(if affordable { GOLD } else { Color::LightRed })
}

/// Truncate a string to fit within max_len characters, adding "…" if truncated
fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else if max_len <= 1 {
        "…".to_string()
    } else {
        let truncated: String = name.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

/// Space left of a centered panel, for a backdrop picture
fn backdrop_area(area: Rect, panel: Rect) -> Rect {
    let width = panel.x.saturating_sub(area.x).saturating_sub(1).min(24);
    Rect {
        x: area.x,
        y: area.y,
        width,
        height: area.height.min(width / 2),
    }
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Near-fullscreen overlay with a small margin
fn fullscreen_overlay(r: Rect) -> Rect {
    let margin = if r.width > 100 && r.height > 40 { 2 } else { 1 };
    Rect {
        x: r.x + margin,
        y: r.y + margin,
        width: r.width.saturating_sub(margin * 2),
        height: r.height.saturating_sub(margin * 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataManager;
    use crate::game::Action;
    use crate::save::Settings;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn game() -> Game {
        let settings = Settings {
            save_file: Some(std::env::temp_dir().join(format!("digsite_app_{}.txt", std::process::id()))),
            rng_seed: Some(5),
            ..Settings::default()
        };
        Game::new(settings, DataManager::default())
    }

    fn screen_text(app: &mut App, game: &Game) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("terminal");
        terminal.draw(|frame| app.render(frame, game)).expect("draw");
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_input_drives_scenes() {
        let mut app = App::new(RenderMode::Ascii);
        let mut game = game();
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert!(!app.handle_input(press(KeyCode::Char('2')), &mut game).expect("input"));
        assert_eq!(game.scene(), Scene::Store);
        assert!(!app.handle_input(press(KeyCode::Esc), &mut game).expect("input"));
        assert!(app.handle_input(press(KeyCode::Esc), &mut game).expect("input"));
    }

    #[test]
    fn test_every_scene_renders() {
        let mut app = App::new(RenderMode::Unicode);
        let mut game = game();

        assert!(screen_text(&mut app, &game).contains("Expedition"));

        game.handle_action(Action::OpenStore);
        assert!(screen_text(&mut app, &game).contains("Pickaxe"));
        game.handle_action(Action::Back);

        game.handle_action(Action::OpenMuseum);
        assert!(screen_text(&mut app, &game).contains("halls are empty"));
        game.handle_action(Action::Back);

        game.handle_action(Action::OpenExpeditionChoice);
        assert!(screen_text(&mut app, &game).contains("Forest"));
        game.handle_action(Action::ChooseSite(0));
        assert!(screen_text(&mut app, &game).contains("Space"));

        game.handle_action(Action::OpenInventory);
        assert!(screen_text(&mut app, &game).contains("Tools 4/8"));
    }

    #[test]
    fn test_sprites_need_image_mode() {
        let mut app = App::new(RenderMode::Ascii);
        app.attach_sprites(SpriteLayer::new());
        assert!(app.sprites.is_none());

        let mut out = Vec::new();
        app.flush_sprites(&mut out).expect("flush");
        assert!(out.is_empty());
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Pickaxe", 8), "Pickaxe");
        assert_eq!(truncate_name("Moon dust", 5), "Moon…");
    }
}
