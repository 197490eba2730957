//! User Interface module
//!
//! Terminal UI using ratatui: one screen per scene plus a message log.

pub mod app;
pub mod widgets;
pub mod input;

pub use app::App;
pub use input::map_key;
