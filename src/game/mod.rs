//! Game module - Core game logic and state management

mod state;
mod action;
mod time;

pub use state::{Game, Scene, GameMessage, MessageCategory};
pub use action::Action;
pub use time::{AnimationTimer, BLINK_INTERVAL};
