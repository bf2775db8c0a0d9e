//! Bundled SRD reference data.
//!
//! Static tables with accessor functions. The magic item dataset ships as a
//! JSON file parsed once on first access; the smaller tables are plain
//! `&'static` arrays.

pub mod alignments;
pub mod backgrounds;
pub mod classes;
pub mod magic_items;
pub mod races;
pub mod skills;

pub use alignments::{
    alignment_by_code, alignment_by_name, is_chaotic, is_evil_aligned, is_good_aligned,
    is_lawful, Alignment, ALIGNMENTS,
};
pub use backgrounds::{background_by_name, Background, BACKGROUNDS};
pub use classes::{class_by_name, CharacterClass, CLASSES};
pub use magic_items::{
    attunement_items, magic_item_by_name, magic_items_by_rarity, magic_items_by_type,
    random_magic_item, random_magic_items, ItemProperties, MagicItem, MagicItemFilter, Rarity,
    MAGIC_ITEMS,
};
pub use races::{race_by_name, Race, RACES};
pub use skills::{skill_by_name, AbilityScore, Skill, SKILLS};
