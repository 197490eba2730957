//! Game save/load system
//!
//! The save is a small line-oriented text file:
//!
//! ```text
//! <money> <food>
//! T <tool-kind> <durability>
//! L <loot-kind> [<count>]
//! ```
//!
//! Names, textures and prices are not stored; they come from the
//! catalogue when the save is applied.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::data::Catalog;
use crate::entities::Player;
use crate::items::{Inventory, LootKind, ToolKind};

/// Default save file name
pub const SAVE_FILE_NAME: &str = "save.txt";

/// Save error types
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to access save file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed save data on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Persistent part of the player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveData {
    pub money: i32,
    pub food: i32,
    /// Tool kinds and durabilities in inventory order
    pub tools: Vec<(ToolKind, i32)>,
    /// Loot counts per kind
    pub loot: Vec<(LootKind, usize)>,
}

impl SaveData {
    /// Snapshot a player
    pub fn from_player(player: &Player) -> Self {
        Self {
            money: player.money,
            food: player.food,
            tools: player.inventory.tools().iter()
                .map(|t| (t.kind, t.durability))
                .collect(),
            loot: player.inventory.loot_summary(),
        }
    }

    /// Rebuild a player into an empty `inventory`.
    /// Entries beyond the inventory's capacity are dropped with a warning.
    pub fn into_player(self, catalog: &Catalog, mut inventory: Inventory) -> Player {
        inventory.clear();

        for (kind, durability) in self.tools {
            if !inventory.add_tool(catalog.make_tool(kind, durability)) {
                log::warn!("Save holds more tools than fit, dropping {:?}", kind);
            }
        }
        for (kind, count) in self.loot {
            let room = inventory.loot_capacity().saturating_sub(inventory.loot().len());
            if count > room {
                log::warn!("Save holds more loot than fits, dropping {} {:?}", count - room, kind);
            }
            for _ in 0..count.min(room) {
                inventory.add_loot(catalog.make_loot(kind));
            }
        }

        Player::new(self.money, self.food, inventory)
    }
}

/// Serialize save data to the text format
pub fn format_save(data: &SaveData) -> String {
    let mut out = format!("{} {}\n", data.money, data.food);
    for (kind, durability) in &data.tools {
        out.push_str(&format!("T {} {}\n", kind.as_index(), durability));
    }
    for (kind, count) in &data.loot {
        out.push_str(&format!("L {} {}\n", kind.as_index(), count));
    }
    out
}

/// Parse the text format.
///
/// Unknown tags and kinds are skipped with a warning. A missing or
/// malformed header is an error.
pub fn parse_save(text: &str) -> Result<SaveData, SaveError> {
    let mut lines = text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (header_line, header) = lines.next().ok_or(SaveError::Parse {
        line: 1,
        reason: "missing money/food header".to_string(),
    })?;
    let (money, food) = parse_header(header).ok_or_else(|| SaveError::Parse {
        line: header_line,
        reason: format!("expected '<money> <food>', got '{}'", header),
    })?;

    let mut data = SaveData { money, food, ..SaveData::default() };

    for (line_no, line) in lines {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("T") => {
                let kind = parts.next()
                    .and_then(|s| s.parse().ok())
                    .and_then(ToolKind::from_index);
                let durability = parts.next().and_then(|s| s.parse::<i32>().ok());
                match (kind, durability) {
                    (Some(kind), Some(durability)) => data.tools.push((kind, durability)),
                    _ => log::warn!("Skipping bad tool entry on save line {}: '{}'", line_no, line),
                }
            }
            Some("L") => {
                let kind = parts.next()
                    .and_then(|s| s.parse().ok())
                    .and_then(LootKind::from_index);
                let count = match parts.next() {
                    Some(s) => s.parse::<usize>().ok(),
                    None => Some(1),
                };
                match (kind, count) {
                    (Some(kind), Some(count)) => {
                        if !add_loot_count(&mut data.loot, kind, count) {
                            log::warn!("Skipping loot entry on save line {}: count overflows", line_no);
                        }
                    }
                    _ => log::warn!("Skipping bad loot entry on save line {}: '{}'", line_no, line),
                }
            }
            _ => log::warn!("Skipping unknown save line {}: '{}'", line_no, line),
        }
    }

    Ok(data)
}

fn parse_header(line: &str) -> Option<(i32, i32)> {
    let mut parts = line.split_whitespace();
    let money = parts.next()?.parse().ok()?;
    let food = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((money, food))
}

/// Repeated `L` lines of one kind add up. Returns false, leaving the
/// total untouched, if the sum would overflow.
fn add_loot_count(loot: &mut Vec<(LootKind, usize)>, kind: LootKind, count: usize) -> bool {
    match loot.iter_mut().find(|(k, _)| *k == kind) {
        Some((_, total)) => match total.checked_add(count) {
            Some(sum) => {
                *total = sum;
                true
            }
            None => false,
        },
        None => {
            loot.push((kind, count));
            true
        }
    }
}

/// Get the default save file path
pub fn default_save_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "digsite", "Digsite") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push(SAVE_FILE_NAME);
        path
    } else {
        // Fallback to current directory
        PathBuf::from(".").join(SAVE_FILE_NAME)
    }
}

/// Reads and writes the save file at a fixed path
#[derive(Debug, Clone)]
pub struct SaveManager {
    path: PathBuf,
}

impl SaveManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the player's state, replacing any previous save
    pub fn save(&self, player: &Player) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SaveError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let text = format_save(&SaveData::from_player(player));
        fs::write(&self.path, text).map_err(|source| SaveError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::info!("Game saved to {:?}", self.path);
        Ok(())
    }

    /// Read the save. An absent file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<SaveData>, SaveError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SaveError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let data = parse_save(&text)?;
        log::info!("Game loaded from {:?}", self.path);
        Ok(Some(data))
    }
}

impl Default for SaveManager {
    fn default() -> Self {
        Self::new(default_save_path())
    }
}
