//! Default expedition sites
//!
//! Used when `sites.ron` is missing or unreadable.

use std::collections::BTreeMap;

use crate::expedition::{Site, SiteTable, ToolRule, DEFAULT_HANDS_FOOD_COST};
use crate::items::{LootKind, ToolKind};

/// Create default site table (hardcoded fallback)
pub fn default_sites() -> SiteTable {
    SiteTable {
        sites: vec![
            site(
                "forest",
                "Forest expedition",
                100,
                "Old timber for the patient woodcutter.",
                LootKind::Wood,
                &[
                    (ToolKind::Axe, ToolRule::new(0, 10)),
                    (ToolKind::Hammer, ToolRule::new(70, 25)),
                ],
            ),
            site(
                "egypt",
                "Egyptian expedition",
                600,
                "Gold under the sand, if you know where to knock.",
                LootKind::Gold,
                &[
                    (ToolKind::Hammer, ToolRule::new(0, 10)),
                    (ToolKind::Axe, ToolRule::new(25, 25)),
                    (ToolKind::Pickaxe, ToolRule::new(50, 25)),
                ],
            ),
            site(
                "africa",
                "African expedition",
                1000,
                "Diamond pipes deep in the rock.",
                LootKind::Diamond,
                &[
                    (ToolKind::Pickaxe, ToolRule::new(0, 10)),
                    (ToolKind::Shovel, ToolRule::new(70, 25)),
                ],
            ),
            site(
                "moon",
                "Lunar expedition",
                3000,
                "Fine dust that sells for a fortune. Hands work, but you'll get hungry.",
                LootKind::MoonDust,
                &[
                    (ToolKind::Hands, ToolRule::new(25, 0)),
                    (ToolKind::Shovel, ToolRule::new(0, 10)),
                ],
            ),
        ],
    }
}

fn site(
    id: &str,
    name: &str,
    cost: i32,
    description: &str,
    loot: LootKind,
    rules: &[(ToolKind, ToolRule)],
) -> Site {
    Site {
        id: id.to_string(),
        name: name.to_string(),
        cost,
        description: Some(description.to_string()),
        loot: vec![loot],
        rules: rules.iter().copied().collect::<BTreeMap<_, _>>(),
        hands_food_cost: DEFAULT_HANDS_FOOD_COST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_site_order_and_costs() {
        let table = default_sites();
        let costs: Vec<i32> = table.iter().map(|s| s.cost).collect();
        assert_eq!(costs, vec![100, 600, 1000, 3000]);
    }

    #[test]
    fn test_only_moon_allows_hands() {
        let table = default_sites();
        let with_hands: Vec<&str> = table.iter()
            .filter(|s| s.allows_bare_hands())
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(with_hands, vec!["moon"]);
    }

    #[test]
    fn test_every_site_has_a_safe_tool() {
        for site in default_sites().iter() {
            assert!(
                site.rules.values().any(|r| r.loss_chance == 0),
                "{} has no zero-loss tool",
                site.id
            );
        }
    }
}
