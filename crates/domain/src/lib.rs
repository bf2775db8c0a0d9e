//! Ashfen domain layer.
//!
//! Pure rules and reference data for the campaign world: map/zone value
//! objects, the attunement engine, spell slot progression, and the bundled
//! SRD datasets. No I/O lives here - persistence and HTTP are in
//! `ashfen-engine`, and anything nondeterministic (time, randomness) is
//! injected by callers.

pub mod attunement;
pub mod error;
pub mod ids;
pub mod map;
pub mod spellcasting;
pub mod srd;

pub use attunement::{
    can_attune_to_item, AttunedItem, AttunementEligibility, AttunementError,
    CharacterAttunement, ATTUNEMENT_TIME_HOURS, MAX_ATTUNEMENT_SLOTS,
};
pub use error::DomainError;
pub use ids::{CharacterId, MapId};
pub use map::{MapTile, SpawnPoint, ZoneType, MAX_HEIGHT, MAX_TILES, MAX_WIDTH};
pub use spellcasting::{
    convert_slots_to_db_format, is_spellcaster, level_up_message, needs_spell_selection,
    new_cantrips_learned, new_spells_learned, slots_for_level, spell_level_unlocked,
    spellcasting_ability, spellcasting_info, updated_spell_slots, CasterSlots, CasterType,
    PactMagicSlots, SpellSelection, SpellSlots, SpellcastingAbility, SpellcastingInfo,
};
pub use srd::magic_items::{ItemProperties, MagicItem, Rarity};
