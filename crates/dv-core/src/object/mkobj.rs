//! Item creation

use crate::data::ItemTemplate;
use crate::dungeon::Position;
use crate::ecs::{EntityId, Item, RenderOrder, Registry, Renderable};
use crate::rng::GameRng;

/// Spawn an item from its template, on the floor at `pos` or unplaced
pub fn make_item(registry: &mut Registry, template: &ItemTemplate, pos: Option<Position>) -> EntityId {
    let id = registry.create();
    registry.attach(id, Item::new(template.kind, template.name.clone()));
    registry.attach(
        id,
        Renderable {
            glyph: template.kind.symbol(),
            color: template.color,
            name: template.name.clone(),
            order: RenderOrder::Item,
        },
    );
    if let Some(pos) = pos {
        registry.attach(id, pos);
    }
    id
}

/// Whether a fresh item comes out cursed, and the enchantment it then carries
///
/// Cursed items sit at -1 to -3.
pub fn roll_curse(template: &ItemTemplate, rng: &mut GameRng) -> Option<i32> {
    if template.cursed_pct == 0 || !template.kind.class().is_enchantable() {
        return None;
    }
    rng.percent(template.cursed_pct).then(|| -(rng.rnd(3) as i32))
}

/// Mark an item cursed with the given enchantment
pub fn curse(registry: &mut Registry, id: EntityId, enchantment: i32) {
    if let Some(item) = registry.get_mut::<Item>(id) {
        item.cursed = true;
        item.enchantment = enchantment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameConfig;

    #[test]
    fn test_make_item_on_floor_or_carried() {
        let config = GameConfig::builtin();
        let template = config.item("healing potion").unwrap();
        let mut reg = Registry::new();

        let floor = make_item(&mut reg, template, Some(Position::new(3, 3)));
        assert_eq!(reg.get::<Position>(floor), Some(&Position::new(3, 3)));
        assert_eq!(reg.get::<Renderable>(floor).unwrap().glyph, '!');

        let carried = make_item(&mut reg, template, None);
        assert!(!reg.has::<Position>(carried));
        let item = reg.get::<Item>(carried).unwrap();
        assert_eq!(item.name, "healing potion");
        assert!(!item.cursed);
        assert_eq!(item.enchantment, 0);
    }

    #[test]
    fn test_curse_rolls() {
        let config = GameConfig::builtin();
        let mut rng = GameRng::new(3);
        let potion = config.item("healing potion").unwrap();
        assert!((0..100).all(|_| roll_curse(potion, &mut rng).is_none()));

        let mut always = config.item("dagger").unwrap().clone();
        always.cursed_pct = 100;
        for _ in 0..50 {
            let ench = roll_curse(&always, &mut rng).unwrap();
            assert!((-3..=-1).contains(&ench));
        }

        let mut reg = Registry::new();
        let dagger = make_item(&mut reg, &always, None);
        curse(&mut reg, dagger, -2);
        let item = reg.get::<Item>(dagger).unwrap();
        assert!(item.cursed);
        assert_eq!(item.power_bonus(), -1);
    }
}
