//! Game state machine
//!
//! Owns the player, the loaded game data and the current expedition, and
//! moves between scenes in response to actions.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::action::Action;
use super::time::AnimationTimer;
use crate::base::{self, Museum, Trade};
use crate::data::{Catalog, DataManager};
use crate::entities::Player;
use crate::expedition::{DigOutcome, Expedition, PickupOutcome, SiteTable};
use crate::items::{LootKind, ToolKind};
use crate::save::{default_save_path, SaveManager, Settings};

/// Messages kept in the log
const MAX_MESSAGES: usize = 50;

/// The screens of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Base,
    ExpeditionChoice,
    Expedition,
    Store,
    Museum,
    Inventory,
    /// Leave the game
    Exit,
}

impl Scene {
    pub fn title(&self) -> &'static str {
        match self {
            Scene::Base => "Base Camp",
            Scene::ExpeditionChoice => "Choose an Expedition",
            Scene::Expedition => "Expedition",
            Scene::Store => "Store",
            Scene::Museum => "Museum",
            Scene::Inventory => "Inventory",
            Scene::Exit => "Goodbye",
        }
    }
}

/// A message to display in the game log
#[derive(Debug, Clone)]
pub struct GameMessage {
    pub text: String,
    pub category: MessageCategory,
}

/// Categories for message coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Dig,
    Trade,
    System,
    Warning,
}

/// The main game struct that holds all game data
pub struct Game {
    scene: Scene,
    /// Where the inventory screen returns to
    inventory_return: Scene,
    player: Player,
    data: DataManager,
    settings: Settings,
    expedition: Option<Expedition>,
    rng: StdRng,
    messages: Vec<GameMessage>,
    animation: AnimationTimer,
    saves: SaveManager,
}

impl Game {
    /// Create a new game at the base camp
    pub fn new(settings: Settings, data: DataManager) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let saves = SaveManager::new(
            settings.save_file.clone().unwrap_or_else(default_save_path),
        );
        let player = Self::fresh_player(&settings, data.catalog());

        let mut game = Self {
            scene: Scene::Base,
            inventory_return: Scene::Base,
            player,
            data,
            settings,
            expedition: None,
            rng,
            messages: Vec::new(),
            animation: AnimationTimer::default(),
            saves,
        };
        game.add_message("Welcome to base camp.", MessageCategory::System);
        game
    }

    fn fresh_player(settings: &Settings, catalog: &Catalog) -> Player {
        Player::with_starting_kit(
            settings.starting_money,
            settings.starting_food,
            settings.empty_inventory(),
            catalog,
        )
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn set_scene(&mut self, scene: Scene) {
        log::debug!("Scene transition: {:?} -> {:?}", self.scene, scene);
        self.scene = scene;
    }

    pub fn is_running(&self) -> bool {
        self.scene != Scene::Exit
    }

    pub fn quit(&mut self) {
        self.set_scene(Scene::Exit);
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn sites(&self) -> &SiteTable {
        self.data.sites()
    }

    pub fn catalog(&self) -> &Catalog {
        self.data.catalog()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn expedition(&self) -> Option<&Expedition> {
        self.expedition.as_ref()
    }

    pub fn save_manager(&self) -> &SaveManager {
        &self.saves
    }

    /// Current museum exhibits
    pub fn museum(&self) -> Museum {
        Museum::from_inventory(&self.player.inventory, self.data.catalog())
    }

    /// Whether the blinking player marker is drawn this frame
    pub fn marker_visible(&self) -> bool {
        self.animation.is_visible()
    }

    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    /// The status line: the most recent message
    pub fn status(&self) -> Option<&GameMessage> {
        self.messages.last()
    }

    pub fn add_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push(GameMessage {
            text: text.into(),
            category,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    /// Update game state (called every frame)
    pub fn update(&mut self, delta: Duration) {
        self.animation.update(delta);
    }

    /// Apply one action in the current scene.
    /// Actions that mean nothing in this scene are ignored.
    pub fn handle_action(&mut self, action: Action) {
        if action == Action::Quit {
            self.quit();
            return;
        }

        match (self.scene, action) {
            (Scene::Base, Action::OpenExpeditionChoice) => self.set_scene(Scene::ExpeditionChoice),
            (Scene::Base, Action::OpenStore) => self.set_scene(Scene::Store),
            (Scene::Base, Action::OpenMuseum) => self.set_scene(Scene::Museum),
            (Scene::Base, Action::Save) => self.save(),
            (Scene::Base, Action::Load) => self.load(),
            (Scene::Base, Action::Back) => self.quit(),

            (Scene::ExpeditionChoice, Action::ChooseSite(index)) => self.start_expedition(index),
            (Scene::ExpeditionChoice, Action::Back) => self.set_scene(Scene::Base),

            (Scene::Expedition, Action::Equip(kind)) => self.equip(kind),
            (Scene::Expedition, Action::Dig) => self.dig(),
            (Scene::Expedition, Action::Move { dx, dy }) => {
                if let Some(expedition) = self.expedition.as_mut() {
                    expedition.move_player(dx, dy);
                }
            }
            (Scene::Expedition, Action::PickUp) => self.pick_up(),
            (Scene::Expedition, Action::Back) => self.end_expedition(),

            (Scene::Base | Scene::Expedition, Action::OpenInventory) => {
                self.inventory_return = self.scene;
                self.set_scene(Scene::Inventory);
            }
            (Scene::Inventory, Action::Back) => self.set_scene(self.inventory_return),

            (Scene::Store, Action::BuyTool(kind)) => {
                let trade = base::buy_tool(&mut self.player, self.data.catalog(), kind);
                self.report_trade(trade);
            }
            (Scene::Store, Action::BuyFood) => {
                let trade = base::buy_food(&mut self.player, self.data.catalog());
                self.report_trade(trade);
            }
            (Scene::Store, Action::SellLoot(kind)) => self.sell(kind),
            (Scene::Store | Scene::Museum, Action::Back) => self.set_scene(Scene::Base),

            (scene, action) => log::debug!("Ignoring {:?} in {:?}", action, scene),
        }
    }

    /// Pay for a site and travel there
    fn start_expedition(&mut self, index: usize) {
        let site = match self.data.sites().get(index) {
            Some(site) => site.clone(),
            None => {
                self.add_message("There is no such expedition.", MessageCategory::Warning);
                return;
            }
        };

        if !self.player.spend_money(site.cost) {
            self.add_message(
                format!("Not enough money for {}! ({} needed)", site.name, site.cost),
                MessageCategory::Warning,
            );
            return;
        }

        log::info!("Departing to {} for {}", site.id, site.cost);
        self.add_message(format!("You travel to {}.", site.name), MessageCategory::System);
        self.expedition = Some(Expedition::new(site));
        self.animation.reset();
        self.set_scene(Scene::Expedition);
    }

    fn end_expedition(&mut self) {
        if let Some(expedition) = self.expedition.take() {
            log::info!("Returning from {} after {} digs", expedition.site().id, expedition.digs());
        }
        self.add_message("You return to base camp.", MessageCategory::System);
        self.set_scene(Scene::Base);
    }

    fn equip(&mut self, kind: ToolKind) {
        self.player.equip(kind);
        if kind.is_bare_hands() || self.player.has_tool(kind) {
            self.add_message(format!("In hand: {}", kind.name()), MessageCategory::System);
        } else {
            self.add_message(
                format!("In hand: {} (you don't own one)", kind.name()),
                MessageCategory::Warning,
            );
        }
    }

    fn dig(&mut self) {
        let expedition = match self.expedition.as_mut() {
            Some(expedition) => expedition,
            None => return,
        };
        let report = expedition.dig(&mut self.player, self.data.catalog(), &mut self.rng);
        let category = match report.outcome {
            DigOutcome::Found(_) => MessageCategory::Dig,
            DigOutcome::Lost | DigOutcome::WrongTool | DigOutcome::InventoryFull(_) => {
                MessageCategory::Warning
            }
        };
        self.add_message(report.message, category);
    }

    fn pick_up(&mut self) {
        let expedition = match self.expedition.as_mut() {
            Some(expedition) => expedition,
            None => return,
        };
        match expedition.pick_up(&mut self.player, self.data.catalog()) {
            PickupOutcome::PickedUp(kind) => {
                self.add_message(format!("You picked up: {}", kind.name()), MessageCategory::Dig)
            }
            PickupOutcome::InventoryFull(kind) => self.add_message(
                format!("No room to carry the {}.", kind.name()),
                MessageCategory::Warning,
            ),
            PickupOutcome::NothingHere => {
                self.add_message("Nothing to pick up here.", MessageCategory::System)
            }
        }
    }

    fn sell(&mut self, kind: LootKind) {
        let trade = base::sell_loot(&mut self.player, self.data.catalog(), kind);
        self.report_trade(trade);
    }

    fn report_trade(&mut self, trade: Trade) {
        let category = if trade.is_success() {
            MessageCategory::Trade
        } else {
            MessageCategory::Warning
        };
        self.add_message(trade.message(), category);
    }

    /// Write the player to the save file
    pub fn save(&mut self) {
        match self.saves.save(&self.player) {
            Ok(()) => self.add_message("Game saved.", MessageCategory::System),
            Err(e) => {
                log::warn!("Save failed: {}", e);
                self.add_message(format!("Save failed: {}", e), MessageCategory::Warning);
            }
        }
    }

    /// Replace the player with the saved one, if a save exists
    pub fn load(&mut self) {
        match self.saves.load() {
            Ok(Some(data)) => {
                self.player = data.into_player(self.data.catalog(), self.settings.empty_inventory());
                self.add_message("Game loaded.", MessageCategory::System);
            }
            Ok(None) => self.add_message("No saved game found.", MessageCategory::Warning),
            Err(e) => {
                log::warn!("Load failed: {}", e);
                self.add_message(format!("Load failed: {}", e), MessageCategory::Warning);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_save(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("digsite_game_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("save.txt")
    }

    fn game(name: &str) -> Game {
        let settings = Settings {
            save_file: Some(scratch_save(name)),
            rng_seed: Some(1234),
            ..Settings::default()
        };
        Game::new(settings, DataManager::default())
    }

    #[test]
    fn test_base_menu_transitions() {
        let mut game = game("menu");
        assert_eq!(game.scene(), Scene::Base);

        game.handle_action(Action::OpenStore);
        assert_eq!(game.scene(), Scene::Store);
        game.handle_action(Action::Back);
        game.handle_action(Action::OpenMuseum);
        assert_eq!(game.scene(), Scene::Museum);
        game.handle_action(Action::Back);
        game.handle_action(Action::OpenExpeditionChoice);
        assert_eq!(game.scene(), Scene::ExpeditionChoice);
        game.handle_action(Action::Back);
        assert_eq!(game.scene(), Scene::Base);

        game.handle_action(Action::Back);
        assert_eq!(game.scene(), Scene::Exit);
        assert!(!game.is_running());
    }

    #[test]
    fn test_quit_from_anywhere() {
        let mut game = game("quit");
        game.handle_action(Action::OpenStore);
        game.handle_action(Action::Quit);
        assert!(!game.is_running());
    }

    #[test]
    fn test_expedition_requires_money() {
        let mut game = game("afford");
        game.handle_action(Action::OpenExpeditionChoice);

        // Moon costs 3000, the player has 1000
        game.handle_action(Action::ChooseSite(3));
        assert_eq!(game.scene(), Scene::ExpeditionChoice);
        assert_eq!(game.player().money, 1000);
        assert_eq!(game.status().map(|m| m.category), Some(MessageCategory::Warning));

        game.handle_action(Action::ChooseSite(2));
        assert_eq!(game.scene(), Scene::Expedition);
        assert_eq!(game.player().money, 0);
        assert_eq!(game.expedition().map(|e| e.site().id.as_str()), Some("africa"));
    }

    #[test]
    fn test_unknown_site_index() {
        let mut game = game("unknown_site");
        game.handle_action(Action::OpenExpeditionChoice);
        game.handle_action(Action::ChooseSite(9));
        assert_eq!(game.scene(), Scene::ExpeditionChoice);
        assert_eq!(game.player().money, 1000);
    }

    #[test]
    fn test_dig_in_forest_with_axe() {
        let mut game = game("dig");
        game.handle_action(Action::OpenExpeditionChoice);
        game.handle_action(Action::ChooseSite(0));
        game.handle_action(Action::Equip(ToolKind::Axe));
        game.handle_action(Action::Dig);

        assert_eq!(game.player().inventory.loot_count(LootKind::Wood), 1);
        assert_eq!(game.player().food, 9);
        assert_eq!(game.status().map(|m| m.text.as_str()), Some("You found: Wood"));

        game.handle_action(Action::Equip(ToolKind::Pickaxe));
        game.handle_action(Action::Dig);
        assert_eq!(
            game.status().map(|m| m.text.as_str()),
            Some(crate::expedition::WRONG_TOOL_MESSAGE)
        );
    }

    #[test]
    fn test_inventory_returns_to_opener() {
        let mut game = game("inventory");
        game.handle_action(Action::OpenInventory);
        assert_eq!(game.scene(), Scene::Inventory);
        game.handle_action(Action::Back);
        assert_eq!(game.scene(), Scene::Base);

        game.handle_action(Action::OpenExpeditionChoice);
        game.handle_action(Action::ChooseSite(0));
        game.handle_action(Action::Move { dx: 2, dy: 1 });
        game.handle_action(Action::OpenInventory);
        game.handle_action(Action::Back);
        assert_eq!(game.scene(), Scene::Expedition);
        assert_eq!(
            game.expedition().map(|e| e.grid().player()),
            Some(crate::world::Position::new(2, 1))
        );

        game.handle_action(Action::Back);
        assert_eq!(game.scene(), Scene::Base);
        assert!(game.expedition().is_none());
    }

    #[test]
    fn test_grid_pickup_through_game() {
        let mut game = game("pickup");
        game.handle_action(Action::OpenExpeditionChoice);
        game.handle_action(Action::ChooseSite(1));
        game.handle_action(Action::Move { dx: 5, dy: 5 });
        game.handle_action(Action::PickUp);
        game.handle_action(Action::PickUp);

        assert_eq!(game.player().inventory.loot_count(LootKind::Gold), 1);
        assert_eq!(game.status().map(|m| m.text.as_str()), Some("Nothing to pick up here."));
    }

    #[test]
    fn test_store_actions_only_in_store() {
        let mut game = game("store");
        game.handle_action(Action::BuyFood);
        assert_eq!(game.player().food, 10);

        game.handle_action(Action::OpenStore);
        game.handle_action(Action::BuyFood);
        assert_eq!((game.player().money, game.player().food), (950, 15));
        assert_eq!(game.status().map(|m| m.category), Some(MessageCategory::Trade));
    }

    #[test]
    fn test_save_and_load_through_game() {
        let mut game = game("save_load");
        game.handle_action(Action::Load);
        assert_eq!(game.status().map(|m| m.text.as_str()), Some("No saved game found."));

        game.player_mut().money = 777;
        game.handle_action(Action::Save);
        game.player_mut().money = 1;
        game.handle_action(Action::Load);
        assert_eq!(game.player().money, 777);
        assert_eq!(game.player().inventory.tools().len(), 4);

        if let Some(dir) = game.save_manager().path().parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_message_log_is_bounded() {
        let mut game = game("log");
        for i in 0..120 {
            game.add_message(format!("note {}", i), MessageCategory::System);
        }
        assert_eq!(game.messages().len(), MAX_MESSAGES);
        assert_eq!(game.status().map(|m| m.text.as_str()), Some("note 119"));
    }
}
