//! Data loading and external game content
//!
//! Expedition sites and the store catalogue are data-driven so they can be
//! tuned without a rebuild.

pub mod loader;
pub mod catalog;
pub mod sites;

pub use loader::{DataManager, DataError, export_default_data, DEFAULT_DATA_DIR};
pub use catalog::{Catalog, ToolOffer, LootPrice, default_catalog};
pub use sites::default_sites;
