//! Rendering support
//!
//! Supports multiple rendering modes:
//! - ASCII: plain characters
//! - Unicode: symbol glyphs
//! - Kitty: item textures drawn via the Kitty graphics protocol

pub mod mode;
pub mod kitty;
pub mod assets;
pub mod glyphs;
pub mod sprites;

pub use mode::{RenderMode, detect_render_mode, resolve_render_mode};
pub use kitty::KittyGraphics;
pub use assets::{AssetStore, AssetError, Texture, texture_manifest, load_for_images};
pub use glyphs::Glyph;
pub use sprites::{SpriteLayer, Placement};
