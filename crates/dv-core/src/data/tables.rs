//! Built-in monster and item tables

use super::colors::*;
use super::{ItemTemplate, MonsterTemplate, OnHit};
use crate::combat::StatusKind;
use crate::object::{EquipSlot, ItemKind, PotionEffect, RingEffect, ScrollEffect, WandEffect};
use crate::{FAST_SPEED, MAX_DEPTH, NORMAL_SPEED, SLOW_SPEED};

#[allow(clippy::too_many_arguments)]
fn monster(
    name: &str,
    glyph: char,
    color: u8,
    hp: i32,
    [strength, defense, accuracy, evasion]: [i32; 4],
    speed: i32,
    xp: u32,
    weight: u32,
    depths: (u8, u8),
) -> MonsterTemplate {
    MonsterTemplate {
        name: name.to_string(),
        glyph,
        color,
        hp,
        strength,
        defense,
        accuracy,
        evasion,
        speed,
        xp,
        sight: 8,
        flee_threshold_pct: 25,
        weight,
        min_depth: depths.0,
        max_depth: depths.1,
        on_hit: None,
    }
}

fn item(name: &str, color: u8, kind: ItemKind, weight: u32, depths: (u8, u8)) -> ItemTemplate {
    ItemTemplate {
        name: name.to_string(),
        color,
        kind,
        weight,
        min_depth: depths.0,
        max_depth: depths.1,
        cursed_pct: 0,
    }
}

/// Weapons, armor and shields come out cursed one time in ten
fn gear(name: &str, kind: ItemKind, weight: u32, depths: (u8, u8)) -> ItemTemplate {
    ItemTemplate {
        cursed_pct: 10,
        ..item(name, HI_METAL, kind, weight, depths)
    }
}

/// Monsters, shallowest first
pub fn builtin_monsters() -> Vec<MonsterTemplate> {
    vec![
        MonsterTemplate {
            flee_threshold_pct: 40,
            ..monster("rat", 'r', CLR_BROWN, 4, [2, 0, 1, 3], FAST_SPEED, 10, 60, (1, 5))
        },
        monster("kobold", 'k', CLR_RED, 6, [3, 0, 2, 1], NORMAL_SPEED, 20, 50, (1, 7)),
        monster("orc", 'o', CLR_GREEN, 10, [4, 0, 2, 1], NORMAL_SPEED, 35, 80, (1, 10)),
        MonsterTemplate {
            on_hit: Some(OnHit {
                kind: StatusKind::Poison,
                chance_pct: 30,
                turns: 4,
            }),
            ..monster("giant spider", 's', CLR_MAGENTA, 12, [4, 1, 4, 3], FAST_SPEED, 60, 30, (4, 14))
        },
        MonsterTemplate {
            flee_threshold_pct: 10,
            ..monster("troll", 'T', CLR_BRIGHT_GREEN, 16, [6, 1, 3, 0], NORMAL_SPEED, 100, 40, (3, 18))
        },
        MonsterTemplate {
            on_hit: Some(OnHit {
                kind: StatusKind::Blindness,
                chance_pct: 20,
                turns: 3,
            }),
            ..monster("wraith", 'W', CLR_BLACK, 18, [6, 2, 5, 4], NORMAL_SPEED, 150, 25, (8, MAX_DEPTH))
        },
        MonsterTemplate {
            flee_threshold_pct: 0,
            ..monster("ogre", 'O', CLR_BROWN, 30, [9, 2, 3, 0], SLOW_SPEED, 200, 30, (10, MAX_DEPTH))
        },
        MonsterTemplate {
            on_hit: Some(OnHit {
                kind: StatusKind::Confusion,
                chance_pct: 25,
                turns: 3,
            }),
            ..monster("mind flayer", 'h', CLR_BRIGHT_MAGENTA, 24, [8, 3, 6, 4], NORMAL_SPEED, 300, 15, (14, MAX_DEPTH))
        },
        MonsterTemplate {
            flee_threshold_pct: 0,
            sight: 10,
            ..monster("dragon", 'D', CLR_RED, 50, [12, 4, 7, 2], NORMAL_SPEED, 600, 10, (18, MAX_DEPTH))
        },
    ]
}

/// Items, consumables first
pub fn builtin_items() -> Vec<ItemTemplate> {
    vec![
        item(
            "healing potion",
            CLR_BRIGHT_MAGENTA,
            ItemKind::Potion(PotionEffect::Healing { amount: 8 }),
            40,
            (1, MAX_DEPTH),
        ),
        item(
            "poison potion",
            CLR_GREEN,
            ItemKind::Potion(PotionEffect::Poison { turns: 5 }),
            10,
            (2, MAX_DEPTH),
        ),
        item(
            "lightning scroll",
            HI_PAPER,
            ItemKind::Scroll(ScrollEffect::Lightning {
                damage: 20,
                range: 5,
            }),
            25,
            (2, MAX_DEPTH),
        ),
        item(
            "confusion scroll",
            HI_PAPER,
            ItemKind::Scroll(ScrollEffect::Confusion {
                turns: 10,
                range: 8,
            }),
            15,
            (2, MAX_DEPTH),
        ),
        item(
            "magic mapping scroll",
            HI_PAPER,
            ItemKind::Scroll(ScrollEffect::Mapping),
            10,
            (3, MAX_DEPTH),
        ),
        item(
            "identify scroll",
            HI_PAPER,
            ItemKind::Scroll(ScrollEffect::Identify),
            25,
            (1, MAX_DEPTH),
        ),
        item(
            "enchant weapon scroll",
            HI_PAPER,
            ItemKind::Scroll(ScrollEffect::Enchant {
                slot: EquipSlot::Weapon,
            }),
            15,
            (2, MAX_DEPTH),
        ),
        item(
            "enchant armor scroll",
            HI_PAPER,
            ItemKind::Scroll(ScrollEffect::Enchant {
                slot: EquipSlot::Armor,
            }),
            10,
            (3, MAX_DEPTH),
        ),
        item(
            "remove curse scroll",
            HI_PAPER,
            ItemKind::Scroll(ScrollEffect::RemoveCurse),
            10,
            (2, MAX_DEPTH),
        ),
        item(
            "fireball scroll",
            HI_PAPER,
            ItemKind::Scroll(ScrollEffect::Fireball {
                damage: 12,
                radius: 3,
                range: 8,
            }),
            15,
            (4, MAX_DEPTH),
        ),
        item("food ration", CLR_BROWN, ItemKind::Food { nutrition: 800 }, 30, (1, MAX_DEPTH)),
        item("gold", HI_GOLD, ItemKind::Gold { amount: 20 }, 30, (1, MAX_DEPTH)),
        gear("dagger", ItemKind::Weapon { power_bonus: 1 }, 15, (1, 6)),
        gear("sword", ItemKind::Weapon { power_bonus: 3 }, 10, (4, MAX_DEPTH)),
        gear("battle axe", ItemKind::Weapon { power_bonus: 4 }, 6, (10, MAX_DEPTH)),
        ItemTemplate {
            color: HI_LEATHER,
            ..gear("leather armor", ItemKind::Armor { defense_bonus: 1 }, 15, (1, 8))
        },
        gear("chain mail", ItemKind::Armor { defense_bonus: 2 }, 10, (5, MAX_DEPTH)),
        gear("plate mail", ItemKind::Armor { defense_bonus: 3 }, 5, (12, MAX_DEPTH)),
        ItemTemplate {
            color: HI_WOOD,
            ..gear("wooden shield", ItemKind::Shield { defense_bonus: 1 }, 12, (1, 9))
        },
        gear("iron shield", ItemKind::Shield { defense_bonus: 2 }, 8, (6, MAX_DEPTH)),
        gear("tower shield", ItemKind::Shield { defense_bonus: 3 }, 4, (14, MAX_DEPTH)),
        item(
            "ring of regeneration",
            CLR_YELLOW,
            ItemKind::Ring(RingEffect::Regeneration { interval: 5 }),
            5,
            (6, MAX_DEPTH),
        ),
        item(
            "wand of striking",
            HI_ZAP,
            ItemKind::Wand {
                effect: WandEffect::Striking {
                    damage: 12,
                    range: 6,
                },
                charges: 4,
            },
            6,
            (4, MAX_DEPTH),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique() {
        let monsters = builtin_monsters();
        let names: HashSet<_> = monsters.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names.len(), monsters.len());
        let items = builtin_items();
        let names: HashSet<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names.len(), items.len());
    }

    #[test]
    fn test_harder_monsters_deeper() {
        let monsters = builtin_monsters();
        let rat = monsters.iter().find(|m| m.name == "rat").unwrap();
        let dragon = monsters.iter().find(|m| m.name == "dragon").unwrap();
        assert!(dragon.min_depth > rat.max_depth);
        assert!(dragon.xp > rat.xp);
    }

    #[test]
    fn test_only_gear_can_be_cursed() {
        for template in builtin_items() {
            let enchantable = template.kind.class().is_enchantable();
            assert_eq!(template.cursed_pct > 0, enchantable, "{}", template.name);
        }
    }
}
