//! Render mode detection
//!
//! Picks how the dig grid and item art are drawn for the current terminal.

use serde::{Deserialize, Serialize};
use std::env;

/// Available rendering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Plain ASCII glyphs, works everywhere
    #[default]
    Ascii,

    /// Unicode block and symbol glyphs
    Unicode,

    /// Kitty graphics protocol; textures are drawn as images
    /// Supported by: Ghostty, Kitty, WezTerm, iTerm2
    Kitty,
}

impl RenderMode {
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Ascii => "ASCII",
            RenderMode::Unicode => "Unicode",
            RenderMode::Kitty => "Kitty Graphics",
        }
    }

    /// Textures are only loaded for modes that can show them
    pub fn supports_images(&self) -> bool {
        matches!(self, RenderMode::Kitty)
    }
}

/// Use the configured mode if there is one, otherwise detect
pub fn resolve_render_mode(configured: Option<RenderMode>) -> RenderMode {
    match configured {
        Some(mode) => {
            log::info!("Using configured render mode: {}", mode.name());
            mode
        }
        None => detect_render_mode(),
    }
}

/// Detect the best rendering mode for the current terminal
pub fn detect_render_mode() -> RenderMode {
    let mode = detect_with(|key| env::var(key).ok());
    log::info!("Detected render mode: {}", mode.name());
    mode
}

/// Detection over an arbitrary variable lookup
fn detect_with(var: impl Fn(&str) -> Option<String>) -> RenderMode {
    let contains_any = |key: &str, needles: &[&str]| {
        var(key)
            .map(|v| v.to_lowercase())
            .map_or(false, |v| needles.iter().any(|n| v.contains(n)))
    };

    let kitty = contains_any("TERM", &["kitty", "ghostty"])
        || contains_any("TERM_PROGRAM", &["kitty", "ghostty", "wezterm", "iterm"])
        || var("KITTY_WINDOW_ID").is_some()
        || var("GHOSTTY_RESOURCES_DIR").is_some()
        || var("WEZTERM_PANE").is_some();
    if kitty {
        return RenderMode::Kitty;
    }

    if contains_any("LC_ALL", &["utf"]) || contains_any("LANG", &["utf"]) {
        return RenderMode::Unicode;
    }

    // Dumb terminals and the linux console get plain ASCII
    match var("TERM").as_deref() {
        Some("dumb") | Some("linux") | None => RenderMode::Ascii,
        Some(_) => RenderMode::Unicode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn detect(vars: &[(&str, &str)]) -> RenderMode {
        let map: HashMap<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        detect_with(|key| map.get(key).cloned())
    }

    #[test]
    fn test_kitty_detection() {
        assert_eq!(detect(&[("TERM", "xterm-kitty")]), RenderMode::Kitty);
        assert_eq!(detect(&[("TERM_PROGRAM", "WezTerm")]), RenderMode::Kitty);
        assert_eq!(detect(&[("KITTY_WINDOW_ID", "1")]), RenderMode::Kitty);
    }

    #[test]
    fn test_unicode_and_ascii_fallbacks() {
        assert_eq!(detect(&[("TERM", "xterm"), ("LANG", "en_US.UTF-8")]), RenderMode::Unicode);
        assert_eq!(detect(&[("TERM", "xterm-256color")]), RenderMode::Unicode);
        assert_eq!(detect(&[("TERM", "linux")]), RenderMode::Ascii);
        assert_eq!(detect(&[]), RenderMode::Ascii);
    }

    #[test]
    fn test_configured_mode_wins() {
        assert_eq!(resolve_render_mode(Some(RenderMode::Ascii)), RenderMode::Ascii);
        assert!(RenderMode::Kitty.supports_images());
        assert!(!RenderMode::Unicode.supports_images());
    }
}
