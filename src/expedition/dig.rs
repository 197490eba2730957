//! Dig resolution
//!
//! One dig is evaluated per key press against the site's tool table.

use rand::Rng;

use super::site::Site;
use crate::data::Catalog;
use crate::entities::Player;
use crate::items::{LootKind, ToolKind};

/// Result of a single dig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigOutcome {
    /// Loot granted to the inventory
    Found(LootKind),
    /// The roll failed; the tool still wore down
    Lost,
    /// Equipped tool has no rule here, or is not in the inventory
    WrongTool,
    /// Loot was found but the inventory had no room for it
    InventoryFull(LootKind),
}

/// Outcome plus the status line shown to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigReport {
    pub outcome: DigOutcome,
    pub message: String,
}

impl DigReport {
    fn new(outcome: DigOutcome, message: impl Into<String>) -> Self {
        Self { outcome, message: message.into() }
    }

    /// Loot granted by this dig, if any
    pub fn loot(&self) -> Option<LootKind> {
        match self.outcome {
            DigOutcome::Found(kind) => Some(kind),
            _ => None,
        }
    }
}

pub const WRONG_TOOL_MESSAGE: &str = "This tool is useless here!";
pub const LOST_MESSAGE: &str = "The find crumbled to pieces!";

/// Resolve a dig at `site` with the player's equipped tool.
///
/// Food is spent before the tool is checked, so a rejected dig still
/// costs a meal.
pub fn resolve_dig<R: Rng>(
    site: &Site,
    player: &mut Player,
    catalog: &Catalog,
    rng: &mut R,
) -> DigReport {
    let equipped = player.equipped();

    match equipped {
        Some(ToolKind::Hands) if site.allows_bare_hands() => player.drain_food(site.hands_food_cost),
        _ => player.use_food(),
    }

    let (kind, rule) = match equipped.and_then(|k| site.rule(k).map(|r| (k, r))) {
        Some(found) => found,
        None => return DigReport::new(DigOutcome::WrongTool, WRONG_TOOL_MESSAGE),
    };
    if !kind.is_bare_hands() && !player.has_tool(kind) {
        return DigReport::new(DigOutcome::WrongTool, WRONG_TOOL_MESSAGE);
    }

    let roll: u32 = rng.gen_range(0..100);
    if let Some(tool) = player.equipped_tool_mut() {
        tool.wear(rule.durability_penalty);
    }

    if roll < rule.loss_chance {
        log::debug!("Dig at {} lost (roll {} < {})", site.id, roll, rule.loss_chance);
        return DigReport::new(DigOutcome::Lost, LOST_MESSAGE);
    }

    let loot_kind = match site.primary_loot() {
        Some(k) => k,
        None => return DigReport::new(DigOutcome::Lost, LOST_MESSAGE),
    };
    let loot = catalog.make_loot(loot_kind);
    let name = loot.name.clone();
    if !player.add_loot(loot) {
        return DigReport::new(
            DigOutcome::InventoryFull(loot_kind),
            format!("You found {} but have no room to carry it.", name),
        );
    }

    log::info!("Dug up {} at {}", name, site.id);
    DigReport::new(DigOutcome::Found(loot_kind), format!("You found: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::data::{default_catalog, default_sites};
    use crate::items::{Inventory, FRESH_DURABILITY};

    fn site(id: &str) -> Site {
        default_sites().find(id).cloned().expect("default site")
    }

    fn durabilities(player: &Player) -> Vec<i32> {
        player.inventory.tools().iter().map(|t| t.durability).collect()
    }

    #[test]
    fn test_unlisted_tools_are_rejected_without_wear() {
        let catalog = default_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        for site in default_sites().iter() {
            for kind in ToolKind::ALL {
                if site.rule(kind).is_some() {
                    continue;
                }
                let mut player = Player::default();
                player.equip(kind);
                let before = durabilities(&player);

                let report = resolve_dig(site, &mut player, &catalog, &mut rng);
                assert_eq!(report.outcome, DigOutcome::WrongTool, "{:?} at {}", kind, site.id);
                assert_eq!(report.message, WRONG_TOOL_MESSAGE);
                assert_eq!(report.loot(), None);
                assert_eq!(durabilities(&player), before);
                assert!(player.inventory.loot().is_empty());
            }
        }
    }

    #[test]
    fn test_nothing_equipped_is_wrong_tool() {
        let catalog = default_catalog();
        let mut player = Player::default();
        let mut rng = StdRng::seed_from_u64(1);

        let report = resolve_dig(&site("forest"), &mut player, &catalog, &mut rng);
        assert_eq!(report.outcome, DigOutcome::WrongTool);
        assert_eq!(player.food, 9);
    }

    #[test]
    fn test_zero_loss_tool_always_finds() {
        let catalog = default_catalog();
        let forest = site("forest");

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut player = Player::default();
            player.equip(ToolKind::Axe);

            let report = resolve_dig(&forest, &mut player, &catalog, &mut rng);
            assert_eq!(report.outcome, DigOutcome::Found(LootKind::Wood));
            assert_eq!(player.inventory.loot_count(LootKind::Wood), 1);
            assert_eq!(
                player.inventory.tool(ToolKind::Axe).map(|t| t.durability),
                Some(FRESH_DURABILITY - 10)
            );
        }
    }

    #[test]
    fn test_certain_loss_still_wears_tool() {
        let catalog = default_catalog();
        let mut forest = site("forest");
        forest.rules.insert(ToolKind::Hammer, crate::expedition::ToolRule::new(100, 25));

        let mut rng = StdRng::seed_from_u64(3);
        let mut player = Player::default();
        player.equip(ToolKind::Hammer);

        let report = resolve_dig(&forest, &mut player, &catalog, &mut rng);
        assert_eq!(report.outcome, DigOutcome::Lost);
        assert_eq!(report.message, LOST_MESSAGE);
        assert_eq!(player.inventory.tool(ToolKind::Hammer).map(|t| t.durability), Some(75));
        assert!(player.inventory.loot().is_empty());
    }

    #[test]
    fn test_risky_tool_mixes_outcomes() {
        let catalog = default_catalog();
        let forest = site("forest");
        let mut rng = StdRng::seed_from_u64(42);
        let mut player = Player::new(0, 1000, Inventory::with_capacity(1, 1000));
        player.add_tool(catalog.make_tool(ToolKind::Hammer, 100_000));
        player.equip(ToolKind::Hammer);

        let mut found = 0;
        let mut lost = 0;
        for _ in 0..500 {
            match resolve_dig(&forest, &mut player, &catalog, &mut rng).outcome {
                DigOutcome::Found(_) => found += 1,
                DigOutcome::Lost => lost += 1,
                other => panic!("unexpected outcome {:?}", other),
            }
        }
        assert!(found > 0 && lost > found, "found {} lost {}", found, lost);
        assert_eq!(
            player.inventory.tool(ToolKind::Hammer).map(|t| t.durability),
            Some(100_000 - 500 * 25)
        );
    }

    #[test]
    fn test_bare_hands_cost_two_food_without_floor() {
        let catalog = default_catalog();
        let moon = site("moon");
        let mut rng = StdRng::seed_from_u64(11);
        let mut player = Player::new(0, 1, Inventory::new());
        player.equip(ToolKind::Hands);

        let report = resolve_dig(&moon, &mut player, &catalog, &mut rng);
        assert_ne!(report.outcome, DigOutcome::WrongTool);
        assert_eq!(player.food, -1);
    }

    #[test]
    fn test_bare_hands_elsewhere_cost_one_food() {
        let catalog = default_catalog();
        let mut rng = StdRng::seed_from_u64(11);
        let mut player = Player::new(0, 5, Inventory::new());
        player.equip(ToolKind::Hands);

        let report = resolve_dig(&site("egypt"), &mut player, &catalog, &mut rng);
        assert_eq!(report.outcome, DigOutcome::WrongTool);
        assert_eq!(player.food, 4);
    }

    #[test]
    fn test_listed_tool_missing_from_inventory() {
        let catalog = default_catalog();
        let mut rng = StdRng::seed_from_u64(5);
        let mut player = Player::new(0, 5, Inventory::new());
        player.equip(ToolKind::Pickaxe);

        let report = resolve_dig(&site("africa"), &mut player, &catalog, &mut rng);
        assert_eq!(report.outcome, DigOutcome::WrongTool);
    }

    #[test]
    fn test_full_inventory_discards_find() {
        let catalog = default_catalog();
        let mut rng = StdRng::seed_from_u64(9);
        let mut player = Player::new(0, 5, Inventory::with_capacity(4, 0));
        player.add_tool(catalog.make_tool(ToolKind::Shovel, 100));
        player.equip(ToolKind::Shovel);

        let report = resolve_dig(&site("moon"), &mut player, &catalog, &mut rng);
        assert_eq!(report.outcome, DigOutcome::InventoryFull(LootKind::MoonDust));
        assert_eq!(player.inventory.tool(ToolKind::Shovel).map(|t| t.durability), Some(90));
    }
}
