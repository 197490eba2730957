//! Asset store
//!
//! Textures and fonts are loaded once at start-up from a fixed manifest
//! and looked up by key afterwards. A missing or broken file is an error.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{DynamicImage, GenericImageView};

use crate::items::{LootKind, ToolKind};
use crate::save::settings_path;

/// Background textures for the base-camp screens
pub const SCENE_TEXTURES: [(&str, &str); 4] = [
    ("inventory", "inventory.png"),
    ("base", "base.png"),
    ("store", "store.png"),
    ("museum", "museum.png"),
];

/// Fonts by key
pub const FONTS: [(&str, &str); 1] = [("main", "segoescb.ttf")];

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load texture '{key}' from {path}: {source}")]
    Texture {
        key: String,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to load font '{key}' from {path}: {reason}")]
    Font {
        key: String,
        path: PathBuf,
        reason: String,
    },
    #[error("no asset registered under '{0}'")]
    UnknownKey(String),
}

/// A decoded texture
#[derive(Clone)]
pub struct Texture {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn new(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self { image, width, height }
    }
}

/// Every texture key and its path relative to the assets directory
pub fn texture_manifest() -> Vec<(String, PathBuf)> {
    let loot = LootKind::ALL.iter()
        .map(|k| (k.texture_key(), PathBuf::from("loot").join(format!("{}.png", k.texture_key()))));
    let tools = ToolKind::ALL.iter()
        .map(|k| (k.texture_key(), PathBuf::from("tools").join(format!("{}.png", k.texture_key()))));
    let scenes = SCENE_TEXTURES.iter().map(|&(key, file)| (key, PathBuf::from(file)));

    loot.chain(tools)
        .chain(scenes)
        .map(|(key, path)| (key.to_string(), path))
        .collect()
}

/// Read-only registry of loaded assets
#[derive(Default)]
pub struct AssetStore {
    textures: HashMap<String, Texture>,
    fonts: HashMap<String, Vec<u8>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the whole manifest from `dir`
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let mut store = Self::new();
        for (key, rel) in texture_manifest() {
            store.load_texture(&key, &dir.join(rel))?;
        }
        for (key, file) in FONTS {
            store.load_font(key, &dir.join(file))?;
        }
        log::info!(
            "Loaded {} textures and {} fonts from {:?}",
            store.textures.len(),
            store.fonts.len(),
            dir
        );
        Ok(store)
    }

    pub fn load_texture(&mut self, key: &str, path: &Path) -> Result<(), AssetError> {
        let image = image::open(path).map_err(|source| AssetError::Texture {
            key: key.to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        self.textures.insert(key.to_string(), Texture::new(image));
        Ok(())
    }

    pub fn load_font(&mut self, key: &str, path: &Path) -> Result<(), AssetError> {
        let font_error = |reason: String| AssetError::Font {
            key: key.to_string(),
            path: path.to_path_buf(),
            reason,
        };
        let bytes = fs::read(path).map_err(|e| font_error(e.to_string()))?;
        if !is_font_data(&bytes) {
            return Err(font_error("not a TrueType/OpenType font".to_string()));
        }
        self.fonts.insert(key.to_string(), bytes);
        Ok(())
    }

    pub fn texture(&self, key: &str) -> Result<&Texture, AssetError> {
        self.textures.get(key).ok_or_else(|| AssetError::UnknownKey(key.to_string()))
    }

    pub fn font(&self, key: &str) -> Result<&[u8], AssetError> {
        self.fonts.get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| AssetError::UnknownKey(key.to_string()))
    }

    pub fn texture_keys(&self) -> impl Iterator<Item = &str> {
        self.textures.keys().map(String::as_str)
    }
}

/// Load the manifest for an image render mode. A failure also names the
/// setting that switches back to text glyphs.
pub fn load_for_images(dir: &Path) -> anyhow::Result<AssetStore> {
    AssetStore::load(dir).with_context(|| {
        format!(
            "image rendering needs the art under {}; add it, or set \"render_mode\": \"Unicode\" in {}",
            dir.display(),
            settings_path().display()
        )
    })
}

/// Font files start with a known sfnt tag
fn is_font_data(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("digsite_assets_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn write_full_manifest(dir: &Path) {
        for (_, rel) in texture_manifest() {
            let path = dir.join(rel);
            fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 255]))
                .save(&path)
                .expect("write png");
        }
        fs::write(dir.join("segoescb.ttf"), [0x00, 0x01, 0x00, 0x00, 0x00, 0x0a]).expect("write font");
    }

    #[test]
    fn test_manifest_covers_items_and_scenes() {
        let keys: Vec<String> = texture_manifest().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), 13);
        for key in ["wood", "moondust", "hands", "shovel", "museum"] {
            assert!(keys.iter().any(|k| k == key), "missing {}", key);
        }
    }

    #[test]
    fn test_load_full_manifest() {
        let dir = scratch_dir("full");
        write_full_manifest(&dir);

        let store = AssetStore::load(&dir).expect("assets load");
        assert_eq!(store.texture("gold").map(|t| (t.width, t.height)).ok(), Some((2, 2)));
        assert!(store.font("main").is_ok());
        assert!(matches!(store.texture("lava"), Err(AssetError::UnknownKey(_))));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_texture_names_the_file() {
        let dir = scratch_dir("missing");
        write_full_manifest(&dir);
        fs::remove_file(dir.join("tools").join("axe.png")).expect("remove");

        let err = AssetStore::load(&dir).err().expect("load must fail");
        assert!(matches!(err, AssetError::Texture { ref key, .. } if key == "axe"));
        assert!(err.to_string().contains("axe.png"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_bad_font_is_rejected() {
        let dir = scratch_dir("font");
        write_full_manifest(&dir);
        fs::write(dir.join("segoescb.ttf"), b"hello").expect("write");

        assert!(matches!(AssetStore::load(&dir), Err(AssetError::Font { .. })));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_art_points_at_render_mode() {
        let dir = scratch_dir("absent");
        let err = load_for_images(&dir).err().expect("load must fail");
        let report = format!("{:#}", err);
        assert!(report.contains("\"render_mode\": \"Unicode\""), "{}", report);
        assert!(report.contains("wood.png"), "{}", report);
    }
}
