//! SRD magic item dataset.
//!
//! 239 items loaded from the bundled `magic_items.json`:
//! common 12, uncommon 69, rare 79, very rare 51, legendary 27, artifact 1.
//!
//! Random selection takes an injected index picker (`pick(len) -> index`)
//! instead of reaching for ambient randomness, so callers decide the RNG and
//! tests stay deterministic.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Item rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    VeryRare,
    Legendary,
    Artifact,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::VeryRare,
        Rarity::Legendary,
        Rarity::Artifact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::VeryRare => "very-rare",
            Rarity::Legendary => "legendary",
            Rarity::Artifact => "artifact",
        }
    }
}

/// Mechanical extras some items carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<String>>,
}

/// One SRD magic item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicItem {
    pub name: String,
    pub rarity: Rarity,
    #[serde(rename = "type")]
    pub item_type: String,
    pub requires_attunement: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ItemProperties>,
}

/// The full dataset, parsed once on first access.
pub static MAGIC_ITEMS: Lazy<Vec<MagicItem>> = Lazy::new(|| {
    serde_json::from_str(include_str!("magic_items.json"))
        .expect("bundled magic_items.json is valid")
});

/// All items of one rarity tier.
pub fn magic_items_by_rarity(rarity: Rarity) -> Vec<&'static MagicItem> {
    MAGIC_ITEMS.iter().filter(|item| item.rarity == rarity).collect()
}

/// All items of one type (e.g. "Wondrous Item"), exact match.
pub fn magic_items_by_type(item_type: &str) -> Vec<&'static MagicItem> {
    MAGIC_ITEMS.iter().filter(|item| item.item_type == item_type).collect()
}

/// Look up an item by name, case-insensitively.
pub fn magic_item_by_name(name: &str) -> Option<&'static MagicItem> {
    let lower_name = name.to_lowercase();
    MAGIC_ITEMS.iter().find(|item| item.name.to_lowercase() == lower_name)
}

/// All items that require attunement.
pub fn attunement_items() -> Vec<&'static MagicItem> {
    MAGIC_ITEMS.iter().filter(|item| item.requires_attunement).collect()
}

/// Filters for random selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagicItemFilter {
    pub rarity: Option<Rarity>,
    pub item_type: Option<&'static str>,
    pub requires_attunement: Option<bool>,
}

impl MagicItemFilter {
    fn matches(&self, item: &MagicItem) -> bool {
        if let Some(rarity) = self.rarity {
            if item.rarity != rarity {
                return false;
            }
        }
        if let Some(item_type) = self.item_type {
            if item.item_type != item_type {
                return false;
            }
        }
        if let Some(requires_attunement) = self.requires_attunement {
            if item.requires_attunement != requires_attunement {
                return false;
            }
        }
        true
    }
}

/// One random item, optionally restricted to a rarity tier.
///
/// `pick` receives the pool size and returns an index below it.
pub fn random_magic_item(
    rarity: Option<Rarity>,
    pick: &mut dyn FnMut(usize) -> usize,
) -> Option<&'static MagicItem> {
    let pool: Vec<&'static MagicItem> = match rarity {
        Some(rarity) => magic_items_by_rarity(rarity),
        None => MAGIC_ITEMS.iter().collect(),
    };
    if pool.is_empty() {
        return None;
    }
    let index = pick(pool.len()).min(pool.len() - 1);
    Some(pool[index])
}

/// Up to `count` distinct random items matching the filter.
///
/// Draws without replacement (partial Fisher-Yates over the filtered pool),
/// driven by the injected picker.
pub fn random_magic_items(
    count: usize,
    filter: MagicItemFilter,
    pick: &mut dyn FnMut(usize) -> usize,
) -> Vec<&'static MagicItem> {
    let mut pool: Vec<&'static MagicItem> =
        MAGIC_ITEMS.iter().filter(|item| filter.matches(item)).collect();

    let take = count.min(pool.len());
    let mut selected = Vec::with_capacity(take);
    for _ in 0..take {
        let index = pick(pool.len()).min(pool.len() - 1);
        selected.push(pool.swap_remove(index));
    }
    selected
}
