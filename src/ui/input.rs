//! Key bindings
//!
//! Each scene has its own small key table.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Scene};
use crate::items::{LootKind, ToolKind};

/// Map a key press to an action for the current scene
pub fn map_key(scene: Scene, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    if key.code == KeyCode::Esc {
        return Some(Action::Back);
    }

    match scene {
        Scene::Base => base_key(key.code),
        Scene::ExpeditionChoice => match key.code {
            KeyCode::Char(c @ '1'..='9') => Some(Action::ChooseSite(digit(c) - 1)),
            _ => None,
        },
        Scene::Expedition => expedition_key(key.code),
        Scene::Store => store_key(key.code),
        Scene::Museum | Scene::Inventory | Scene::Exit => None,
    }
}

fn digit(c: char) -> usize {
    c.to_digit(10).unwrap_or(0) as usize
}

fn base_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('1') => Some(Action::OpenExpeditionChoice),
        KeyCode::Char('2') => Some(Action::OpenStore),
        KeyCode::Char('3') => Some(Action::OpenMuseum),
        KeyCode::Char('4') => Some(Action::Save),
        KeyCode::Char('5') => Some(Action::OpenInventory),
        KeyCode::Char('6') => Some(Action::Load),
        _ => None,
    }
}

fn expedition_key(code: KeyCode) -> Option<Action> {
    let step = |dx, dy| Some(Action::Move { dx, dy });
    match code {
        KeyCode::Char('1') => Some(Action::Equip(ToolKind::Axe)),
        KeyCode::Char('2') => Some(Action::Equip(ToolKind::Hammer)),
        KeyCode::Char('3') => Some(Action::Equip(ToolKind::Pickaxe)),
        KeyCode::Char('4') => Some(Action::Equip(ToolKind::Shovel)),
        KeyCode::Char('5') => Some(Action::Equip(ToolKind::Hands)),
        KeyCode::Char(' ') => Some(Action::Dig),
        KeyCode::Char('g') | KeyCode::Char('e') => Some(Action::PickUp),
        KeyCode::Char('i') => Some(Action::OpenInventory),

        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => step(0, -1),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => step(0, 1),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => step(-1, 0),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => step(1, 0),
        KeyCode::Char('y') => step(-1, -1),
        KeyCode::Char('u') => step(1, -1),
        KeyCode::Char('b') => step(-1, 1),
        KeyCode::Char('n') => step(1, 1),
        _ => None,
    }
}

fn store_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('1') => Some(Action::BuyTool(ToolKind::Axe)),
        KeyCode::Char('2') => Some(Action::BuyTool(ToolKind::Pickaxe)),
        KeyCode::Char('3') => Some(Action::BuyTool(ToolKind::Hammer)),
        KeyCode::Char('4') => Some(Action::BuyTool(ToolKind::Shovel)),
        KeyCode::Char('5') => Some(Action::BuyFood),
        KeyCode::Char('6') => Some(Action::SellLoot(LootKind::Wood)),
        KeyCode::Char('7') => Some(Action::SellLoot(LootKind::Gold)),
        KeyCode::Char('8') => Some(Action::SellLoot(LootKind::Diamond)),
        KeyCode::Char('9') => Some(Action::SellLoot(LootKind::MoonDust)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_q_quits_everywhere() {
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        for scene in [Scene::Base, Scene::Expedition, Scene::Store, Scene::Inventory] {
            assert_eq!(map_key(scene, ctrl_q), Some(Action::Quit));
        }
        assert_eq!(map_key(Scene::Base, key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_escape_is_back() {
        assert_eq!(map_key(Scene::Museum, key(KeyCode::Esc)), Some(Action::Back));
        assert_eq!(map_key(Scene::Inventory, key(KeyCode::Esc)), Some(Action::Back));
    }

    #[test]
    fn test_same_digit_means_different_things() {
        let one = key(KeyCode::Char('1'));
        assert_eq!(map_key(Scene::Base, one), Some(Action::OpenExpeditionChoice));
        assert_eq!(map_key(Scene::ExpeditionChoice, one), Some(Action::ChooseSite(0)));
        assert_eq!(map_key(Scene::Expedition, one), Some(Action::Equip(ToolKind::Axe)));
        assert_eq!(map_key(Scene::Store, one), Some(Action::BuyTool(ToolKind::Axe)));
        assert_eq!(map_key(Scene::Museum, one), None);

        let two = key(KeyCode::Char('2'));
        assert_eq!(map_key(Scene::Expedition, two), Some(Action::Equip(ToolKind::Hammer)));
        assert_eq!(map_key(Scene::Store, two), Some(Action::BuyTool(ToolKind::Pickaxe)));
    }

    #[test]
    fn test_movement_keys() {
        let moves = [
            (KeyCode::Up, (0, -1)),
            (KeyCode::Char('a'), (-1, 0)),
            (KeyCode::Char('j'), (0, 1)),
            (KeyCode::Char('n'), (1, 1)),
            (KeyCode::Char('y'), (-1, -1)),
        ];
        for (code, (dx, dy)) in moves {
            assert_eq!(map_key(Scene::Expedition, key(code)), Some(Action::Move { dx, dy }));
        }
        assert_eq!(map_key(Scene::Base, key(KeyCode::Up)), None);
    }
}
