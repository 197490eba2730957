//! RON data loader
//!
//! Loads expedition sites and the store catalogue from external RON files,
//! with fallback to hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::expedition::SiteTable;
use super::catalog::{Catalog, default_catalog};
use super::sites::default_sites;

/// Default directory for data files, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "assets/data";

const SITES_FILE: &str = "sites.ron";
const CATALOG_FILE: &str = "catalog.ron";

/// Errors raised while reading or writing data files
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize {name}: {source}")]
    Serialize {
        name: &'static str,
        #[source]
        source: ron::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Manages all external game data
#[derive(Debug, Clone)]
pub struct DataManager {
    /// Expedition sites
    pub sites: SiteTable,
    /// Store stock and prices
    pub catalog: Catalog,
}

impl DataManager {
    /// Load data from a directory, falling back to defaults per file
    pub fn load_from_dir(dir: &Path) -> Self {
        let sites = load_or_default(&dir.join(SITES_FILE), default_sites);
        let catalog = load_or_default(&dir.join(CATALOG_FILE), default_catalog);

        log::info!(
            "Loaded {} expedition sites and {} store offers",
            sites.len(),
            catalog.tools.len()
        );

        Self { sites, catalog }
    }

    pub fn sites(&self) -> &SiteTable {
        &self.sites
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            sites: default_sites(),
            catalog: default_catalog(),
        }
    }
}

/// Read and parse a single RON file
pub fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_or_default<T: DeserializeOwned>(path: &Path, default: fn() -> T) -> T {
    if !path.exists() {
        log::debug!("{} not found, using defaults", path.display());
        return default();
    }
    match read_ron(path) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            default()
        }
    }
}

fn write_ron<T: Serialize>(dir: &Path, file: &'static str, value: &T) -> Result<(), DataError> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|source| DataError::Serialize { name: file, source })?;
    let path = dir.join(file);
    fs::write(&path, text).map_err(|source| DataError::Write { path, source })
}

/// Export all default data to RON files for easy editing
pub fn export_default_data(dir: &Path) -> Result<(), DataError> {
    fs::create_dir_all(dir).map_err(|source| DataError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    write_ron(dir, SITES_FILE, &default_sites())?;
    write_ron(dir, CATALOG_FILE, &default_catalog())?;

    log::info!("Exported default data to {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{LootKind, ToolKind};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("digsite-data-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_export_then_load() {
        let dir = scratch_dir("export");
        let result = export_default_data(&dir);
        assert!(result.is_ok(), "Failed to export default data: {:?}", result.err());
        assert!(dir.join(SITES_FILE).exists(), "sites.ron not created");
        assert!(dir.join(CATALOG_FILE).exists(), "catalog.ron not created");

        let manager = DataManager::load_from_dir(&dir);
        assert_eq!(manager.sites.len(), 4);
        let moon = manager.sites.find("moon").expect("moon site");
        assert_eq!(moon.rule(ToolKind::Hands).map(|r| r.loss_chance), Some(25));
        assert_eq!(manager.catalog.loot_price(LootKind::Diamond), 750);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_dir_uses_defaults() {
        let dir = scratch_dir("missing");
        let manager = DataManager::load_from_dir(&dir);
        assert_eq!(manager.sites.len(), default_sites().len());
        assert_eq!(manager.catalog.food_price, 50);
    }

    #[test]
    fn test_broken_file_uses_defaults() {
        let dir = scratch_dir("broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SITES_FILE), "(sites: [ oops").unwrap();

        assert!(matches!(
            read_ron::<SiteTable>(&dir.join(SITES_FILE)),
            Err(DataError::Parse { .. })
        ));
        let manager = DataManager::load_from_dir(&dir);
        assert_eq!(manager.sites.len(), 4);

        let _ = fs::remove_dir_all(&dir);
    }
}
