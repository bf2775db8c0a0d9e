//! Spellcasting rules: slot progression tables and level-up integration.

pub mod leveling;
pub mod progression;

pub use leveling::{
    convert_slots_to_db_format, level_up_message, needs_spell_selection, updated_spell_slots,
    SpellSelection,
};
pub use progression::{
    is_spellcaster, new_cantrips_learned, new_spells_learned, slots_for_level,
    spell_level_unlocked, spellcasting_ability, spellcasting_info, CasterSlots, CasterType,
    PactMagicSlots, SpellSlots, SpellcastingAbility, SpellcastingInfo,
};
