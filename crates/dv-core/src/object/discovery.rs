//! Item discovery
//!
//! Potions, scrolls, rings and wands go by a random appearance until the
//! player uses or identifies one of their kind. Appearances are dealt once
//! per run, so two games with the same seed label things the same way.
//! Weapons, armor and shields always show their names; their curse and
//! enchantment stay hidden per item until worn or identified.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::ItemClass;
use crate::data::ItemTemplate;
use crate::ecs::Item;
use crate::rng::GameRng;

const SCROLL_LABELS: &[&str] = &[
    "ZELGO MER",
    "JUYED AWK YACC",
    "NR 9",
    "XIXAXA XOXAXA XUXAXA",
    "PRATYAVAYAH",
    "DAIYEN FOOELS",
    "LEP GEX VEN ZEA",
    "PRIRUTSENIE",
    "ELBIB YLOH",
    "VERR YED HORRE",
    "VENZAR BORGAVVE",
    "THARR",
    "YUM YUM",
    "KERNOD WEL",
    "ELAM EBOW",
    "DUAM XNAHT",
    "ANDOVA BEGARIN",
    "KIRJE",
    "VE FORBRYDERNE",
    "HACKEM MUCHE",
    "VELOX NEB",
    "FOOBIE BLETCH",
    "TEMOV",
    "GARVEN DEH",
    "READ ME",
];

const POTION_COLORS: &[&str] = &[
    "ruby",
    "pink",
    "orange",
    "yellow",
    "emerald",
    "dark green",
    "cyan",
    "sky blue",
    "brilliant blue",
    "magenta",
    "purple-red",
    "puce",
    "milky",
    "swirly",
    "bubbly",
    "smoky",
    "cloudy",
    "effervescent",
    "black",
    "golden",
    "brown",
    "fizzy",
    "dark",
    "white",
    "murky",
];

const RING_GEMS: &[&str] = &[
    "wooden",
    "granite",
    "opal",
    "clay",
    "coral",
    "black onyx",
    "moonstone",
    "tiger eye",
    "jade",
    "bronze",
    "agate",
    "topaz",
    "sapphire",
    "ruby",
    "diamond",
    "ivory",
    "emerald",
    "silver",
    "gold",
    "pearl",
    "iron",
    "brass",
    "twisted",
    "steel",
    "shiny",
];

const WAND_MATERIALS: &[&str] = &[
    "glass",
    "balsa",
    "crystal",
    "maple",
    "pine",
    "oak",
    "ebony",
    "marble",
    "tin",
    "brass",
    "copper",
    "silver",
    "platinum",
    "iridium",
    "zinc",
    "aluminum",
    "uranium",
    "iron",
    "steel",
    "hexagonal",
    "short",
    "runed",
    "long",
    "curved",
    "forked",
];

fn pool(class: ItemClass) -> &'static [&'static str] {
    match class {
        ItemClass::Scroll => SCROLL_LABELS,
        ItemClass::Potion => POTION_COLORS,
        ItemClass::Ring => RING_GEMS,
        ItemClass::Wand => WAND_MATERIALS,
        _ => &[],
    }
}

fn disguise(class: ItemClass, appearance: &str) -> String {
    match class {
        ItemClass::Scroll => format!("scroll labeled {appearance}"),
        ItemClass::Potion => format!("{appearance} potion"),
        ItemClass::Ring => format!("{appearance} ring"),
        ItemClass::Wand => format!("{appearance} wand"),
        _ => appearance.to_string(),
    }
}

/// What the player knows about item kinds in this run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Discoveries {
    /// Unidentified name, by template name
    appearances: BTreeMap<String, String>,
    /// Template names the player has identified
    known: BTreeSet<String>,
}

impl Discoveries {
    /// Deal a distinct appearance to every disguised template
    ///
    /// A template left over once its class runs out of appearances is
    /// simply known by name.
    pub fn deal(items: &[ItemTemplate], rng: &mut GameRng) -> Self {
        let mut appearances = BTreeMap::new();
        for class in [
            ItemClass::Potion,
            ItemClass::Scroll,
            ItemClass::Ring,
            ItemClass::Wand,
        ] {
            let mut looks = pool(class).to_vec();
            rng.shuffle(&mut looks);
            let names = items
                .iter()
                .filter(|t| t.kind.class() == class)
                .map(|t| t.name.clone());
            for (name, look) in names.zip(looks) {
                appearances.insert(name, disguise(class, look));
            }
        }
        Self {
            appearances,
            known: BTreeSet::new(),
        }
    }

    /// Unidentified name of a kind, if it has one
    pub fn appearance(&self, name: &str) -> Option<&str> {
        self.appearances.get(name).map(String::as_str)
    }

    /// Whether the true name of this kind shows
    pub fn knows_kind(&self, name: &str) -> bool {
        self.known.contains(name) || !self.appearances.contains_key(name)
    }

    /// Record a kind as identified; true if it was not already
    pub fn learn(&mut self, name: &str) -> bool {
        if self.knows_kind(name) {
            return false;
        }
        self.known.insert(name.to_string())
    }

    /// Whether nothing about the item is hidden any more
    pub fn is_identified(&self, item: &Item) -> bool {
        let class = item.kind.class();
        if class.is_enchantable() {
            return item.known;
        }
        !class.is_disguised() || self.knows_kind(&item.name)
    }

    /// The name the player sees for an item
    pub fn display_name(&self, item: &Item) -> String {
        let class = item.kind.class();
        if class.is_enchantable() {
            if !item.known {
                return item.name.clone();
            }
            let curse = if item.cursed { "cursed " } else { "" };
            return format!("{curse}{:+} {}", item.enchantment, item.name);
        }
        match self.appearance(&item.name) {
            Some(look) if !self.known.contains(&item.name) => look.to_string(),
            _ => item.name.clone(),
        }
    }

    /// Identified kinds, in name order
    pub fn known(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }
}
