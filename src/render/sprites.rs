//! Sprite layer
//!
//! In Kitty mode textures from the asset store are uploaded once. Each
//! frame the UI queues where they should appear, and the queue is placed
//! on top of the text after ratatui has drawn.

use std::collections::HashMap;
use std::io::{self, Write};

use ratatui::layout::Rect;

use super::assets::AssetStore;
use super::kitty::KittyGraphics;

/// A texture placed over a cell rectangle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub key: String,
    pub area: Rect,
}

/// Uploaded textures plus the current frame's placements
pub struct SpriteLayer {
    kitty: KittyGraphics,
    /// Texture key -> Kitty image id
    uploaded: HashMap<String, u32>,
    queued: Vec<Placement>,
    /// What is on screen now, to skip redundant redraws
    shown: Vec<Placement>,
}

impl SpriteLayer {
    pub fn new() -> Self {
        Self {
            kitty: KittyGraphics::new(),
            uploaded: HashMap::new(),
            queued: Vec::new(),
            shown: Vec::new(),
        }
    }

    /// Upload every texture in the store
    pub fn upload_all<W: Write>(&mut self, out: &mut W, assets: &AssetStore) -> io::Result<()> {
        let mut keys: Vec<&str> = assets.texture_keys().collect();
        keys.sort_unstable();
        for key in keys {
            if let Ok(texture) = assets.texture(key) {
                let id = self.kitty.upload_image(out, &texture.image)?;
                self.uploaded.insert(key.to_string(), id);
            }
        }
        log::info!("Uploaded {} textures via Kitty protocol", self.uploaded.len());
        Ok(())
    }

    pub fn is_uploaded(&self, key: &str) -> bool {
        self.uploaded.contains_key(key)
    }

    /// Queue a texture for this frame. Unknown keys are ignored.
    pub fn queue(&mut self, key: &str, area: Rect) {
        if area.width == 0 || area.height == 0 || !self.is_uploaded(key) {
            return;
        }
        self.queued.push(Placement { key: key.to_string(), area });
    }

    pub fn queued(&self) -> &[Placement] {
        &self.queued
    }

    /// Place the queued textures and start a new frame
    pub fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let frame = std::mem::take(&mut self.queued);
        if frame == self.shown {
            return Ok(());
        }

        self.kitty.clear_placements(out)?;
        for placement in &frame {
            if let Some(&id) = self.uploaded.get(&placement.key) {
                let Rect { x, y, width, height } = placement.area;
                self.kitty.display_image_at(out, id, x, y, width, height)?;
            }
        }
        self.shown = frame;
        Ok(())
    }

    /// Remove everything from the terminal
    pub fn cleanup<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.kitty.clear_all(out)?;
        self.uploaded.clear();
        self.queued.clear();
        self.shown.clear();
        Ok(())
    }
}

impl Default for SpriteLayer {
    fn default() -> Self {
        Self::new()
    }
}
