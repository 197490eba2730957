//! Save/load system
//!
//! Handles the game save file and user settings.

pub mod save_game;
pub mod settings;

pub use save_game::{
    SaveData, SaveError, SaveManager,
    format_save, parse_save, default_save_path, SAVE_FILE_NAME,
};

pub use settings::{
    Settings, DEFAULT_ASSETS_DIR,
    load_settings, load_settings_from, settings_path,
};
