//! Base camp services: the store and the museum.

pub mod store;
pub mod museum;

pub use store::{Trade, buy_tool, buy_food, sell_loot};
pub use museum::{Museum, Exhibit};
