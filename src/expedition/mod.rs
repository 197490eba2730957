//! Expeditions
//!
//! An expedition pairs a site's rule table with a freshly generated dig
//! grid. It lives from departure until the player heads back to base.

pub mod site;
pub mod dig;

pub use site::{Site, SiteTable, ToolRule, DEFAULT_HANDS_FOOD_COST};
pub use dig::{DigOutcome, DigReport, resolve_dig, WRONG_TOOL_MESSAGE, LOST_MESSAGE};

use rand::Rng;

use crate::data::Catalog;
use crate::entities::Player;
use crate::items::LootKind;
use crate::world::{DigGrid, Position};

/// Result of trying to pick up loot from the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    PickedUp(LootKind),
    NothingHere,
    InventoryFull(LootKind),
}

/// An expedition in progress
#[derive(Debug, Clone)]
pub struct Expedition {
    site: Site,
    grid: DigGrid,
    digs: u32,
}

impl Expedition {
    /// Start an expedition at a site. The grid is generated once, here.
    pub fn new(site: Site) -> Self {
        let grid = DigGrid::generate(site.primary_loot());
        Self { site, grid, digs: 0 }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn grid(&self) -> &DigGrid {
        &self.grid
    }

    pub fn name(&self) -> &str {
        &self.site.name
    }

    /// Number of digs attempted on this expedition
    pub fn digs(&self) -> u32 {
        self.digs
    }

    pub fn dig<R: Rng>(&mut self, player: &mut Player, catalog: &Catalog, rng: &mut R) -> DigReport {
        self.digs += 1;
        resolve_dig(&self.site, player, catalog, rng)
    }

    pub fn move_player(&mut self, dx: i32, dy: i32) -> Position {
        self.grid.move_player(dx, dy)
    }

    /// Pick up grid loot into the player's inventory.
    /// The cell stays unpicked if there is no room.
    pub fn pick_up(&mut self, player: &mut Player, catalog: &Catalog) -> PickupOutcome {
        let kind = match self.grid.loot_here() {
            Some(kind) => kind,
            None => return PickupOutcome::NothingHere,
        };
        if !player.inventory.has_loot_space() {
            return PickupOutcome::InventoryFull(kind);
        }
        match self.grid.pick_up() {
            Some(kind) => {
                player.add_loot(catalog.make_loot(kind));
                PickupOutcome::PickedUp(kind)
            }
            None => PickupOutcome::NothingHere,
        }
    }
}
