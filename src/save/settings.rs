//! User settings
//!
//! A JSON file in the platform config directory. Anything that cannot be
//! read falls back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::data::DEFAULT_DATA_DIR;
use crate::entities::player::{STARTING_FOOD, STARTING_MONEY};
use crate::items::{Inventory, DEFAULT_LOOT_CAPACITY, DEFAULT_TOOL_CAPACITY};
use crate::render::RenderMode;

/// Default assets directory
pub const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Save file override; the platform data dir is used when unset
    pub save_file: Option<PathBuf>,
    pub assets_dir: PathBuf,
    pub data_dir: PathBuf,
    /// Force a render mode instead of detecting one
    pub render_mode: Option<RenderMode>,
    pub starting_money: i32,
    pub starting_food: i32,
    pub tool_capacity: usize,
    pub loot_capacity: usize,
    /// Fixed seed for reproducible digs
    pub rng_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_file: None,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            render_mode: None,
            starting_money: STARTING_MONEY,
            starting_food: STARTING_FOOD,
            tool_capacity: DEFAULT_TOOL_CAPACITY,
            loot_capacity: DEFAULT_LOOT_CAPACITY,
            rng_seed: None,
        }
    }
}

impl Settings {
    /// An empty inventory with the configured capacities
    pub fn empty_inventory(&self) -> Inventory {
        Inventory::with_capacity(self.tool_capacity, self.loot_capacity)
    }
}

/// Get the settings file path
pub fn settings_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "digsite", "Digsite") {
        let mut path = proj_dirs.config_dir().to_path_buf();
        path.push("settings.json");
        path
    } else {
        PathBuf::from("./settings.json")
    }
}

/// Load settings (or defaults)
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &std::path::Path) -> Settings {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(settings) => {
                    log::info!("Settings loaded from {:?}", path);
                    return settings;
                }
                Err(e) => {
                    log::warn!("Failed to parse settings: {}, using defaults", e);
                }
            },
            Err(e) => {
                log::warn!("Failed to read settings: {}, using defaults", e);
            }
        }
    }

    Settings::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("digsite_settings_{}_{}", name, std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = scratch_path("partial");
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, r#"{ "starting_money": 5, "render_mode": "Ascii" }"#).expect("write");

        let settings = load_settings_from(&path);
        assert_eq!(settings.starting_money, 5);
        assert_eq!(settings.render_mode, Some(RenderMode::Ascii));
        assert_eq!(settings.starting_food, STARTING_FOOD);
        assert_eq!(settings.loot_capacity, DEFAULT_LOOT_CAPACITY);

        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn test_broken_file_gives_defaults() {
        let path = scratch_path("broken");
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, "{ not json").expect("write");

        assert_eq!(load_settings_from(&path), Settings::default());
        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("round_trip");
        let settings = Settings {
            rng_seed: Some(99),
            tool_capacity: 3,
            ..Settings::default()
        };
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, serde_json::to_string_pretty(&settings).expect("json")).expect("write");
        assert_eq!(load_settings_from(&path), settings);
        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }
}
