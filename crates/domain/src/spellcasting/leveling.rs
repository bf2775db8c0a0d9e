//! Level-up integration for spell slots.
//!
//! Adapts the progression tables to the flat persistence format and builds
//! the player-facing narration shown when a character levels up.

use std::collections::BTreeMap;

use serde::Serialize;

use super::progression::{
    is_spellcaster, spellcasting_info, CasterSlots, CasterType, SpellSlots,
};

/// Convert a slot table entry to the flat storage format, e.g. Wizard 5
/// becomes `{"1": 4, "2": 3, "3": 2}`. Zero-count levels are omitted.
///
/// Pact Magic emits `{"<slot level>": <count>, "pact_magic": 1}` - the flag
/// lets downstream consumers distinguish pact-refresh slots from standard
/// slots.
pub fn convert_slots_to_db_format(slots: &CasterSlots) -> BTreeMap<String, u8> {
    let mut db_slots = BTreeMap::new();
    match slots {
        CasterSlots::Pact(pact) => {
            db_slots.insert(pact.slot_level.to_string(), pact.slots);
            db_slots.insert("pact_magic".to_string(), 1);
        }
        CasterSlots::Standard(standard) => {
            for (spell_level, count) in standard.levels() {
                if count > 0 {
                    db_slots.insert(spell_level.to_string(), count);
                }
            }
        }
    }
    db_slots
}

/// Storage-format slots for a class at its new level.
///
/// `None` when the character is not a spellcaster or the level has no table
/// entry. An empty map means "spellcaster with zero slots at this level"
/// (e.g. Paladin 1).
pub fn updated_spell_slots(class_name: &str, new_level: u8) -> Option<BTreeMap<String, u8>> {
    if !is_spellcaster(class_name) {
        return None;
    }
    let info = spellcasting_info(class_name, new_level)?;
    Some(convert_slots_to_db_format(&info.slots))
}

/// Ordinal suffix (1st, 2nd, 3rd, 4th, ... with 11th/12th/13th exceptions).
fn ordinal_suffix(num: u8) -> &'static str {
    let j = num % 10;
    let k = num % 100;
    if j == 1 && k != 11 {
        "st"
    } else if j == 2 && k != 12 {
        "nd"
    } else if j == 3 && k != 13 {
        "rd"
    } else {
        "th"
    }
}

fn plural(count: u8) -> &'static str {
    if count > 1 { "s" } else { "" }
}

/// Player-facing description of the spell slot changes between two levels.
///
/// `None` when nothing changed (and always for non-spellcasters).
pub fn level_up_message(class_name: &str, old_level: u8, new_level: u8) -> Option<String> {
    if !is_spellcaster(class_name) {
        return None;
    }

    let old_info = spellcasting_info(class_name, old_level);
    let new_info = spellcasting_info(class_name, new_level)?;

    let mut messages: Vec<String> = Vec::new();

    match new_info.slots {
        CasterSlots::Pact(new_slots) => {
            let old_slots = old_info.and_then(|i| i.slots.as_pact().copied());
            match old_slots {
                None => {
                    let level = new_slots.slot_level;
                    messages.push(format!(
                        "You gain {} spell slot{} of {}{} level (Pact Magic)!",
                        new_slots.slots,
                        plural(new_slots.slots),
                        level,
                        ordinal_suffix(level),
                    ));
                }
                Some(old_slots) if new_slots.slots > old_slots.slots => {
                    messages.push(format!(
                        "You gain an additional spell slot (now {} total)!",
                        new_slots.slots
                    ));
                }
                Some(old_slots) if new_slots.slot_level > old_slots.slot_level => {
                    messages.push(format!(
                        "Your spell slots upgrade to {}{} level!",
                        new_slots.slot_level,
                        ordinal_suffix(new_slots.slot_level),
                    ));
                }
                Some(_) => {}
            }
        }
        CasterSlots::Standard(new_slots) => {
            let old_slots: Option<SpellSlots> =
                old_info.and_then(|i| i.slots.as_standard().copied());

            for (spell_level, new_count) in new_slots.levels() {
                let old_count = old_slots.map(|o| o.slot_count(spell_level)).unwrap_or(0);
                if new_count > old_count {
                    if old_count == 0 {
                        messages.push(format!(
                            "You unlock {} {}{}-level spell slot{}!",
                            new_count,
                            spell_level,
                            ordinal_suffix(spell_level),
                            plural(new_count),
                        ));
                    } else {
                        let gained = new_count - old_count;
                        messages.push(format!(
                            "You gain {} additional {}{}-level spell slot{}!",
                            gained,
                            spell_level,
                            ordinal_suffix(spell_level),
                            plural(gained),
                        ));
                    }
                }
            }
        }
    }

    if new_info.cantrips_learned > 0 {
        messages.push(format!(
            "You can learn {} new cantrip{}!",
            new_info.cantrips_learned,
            plural(new_info.cantrips_learned),
        ));
    }

    if new_info.spells_learned > 0 {
        messages.push(format!(
            "You can learn {} new spell{}!",
            new_info.spells_learned,
            plural(new_info.spells_learned),
        ));
    }

    // First-time spellcasters get a banner line up front.
    let caster = super::progression::caster_type(class_name);
    if old_level == 1 && new_level == 2 && caster == Some(CasterType::Half) {
        messages.insert(0, "You gain the ability to cast spells!".to_string());
    }
    if old_level == 2 && new_level == 3 && caster == Some(CasterType::Third) {
        messages.insert(0, "You gain the ability to cast spells!".to_string());
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join(" "))
    }
}

/// What a character must pick after leveling up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellSelection {
    pub needs_selection: bool,
    pub cantrips_needed: u8,
    pub spells_needed: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_spell_level: Option<u8>,
}

/// Whether new spells or cantrips must be chosen at this level.
pub fn needs_spell_selection(class_name: &str, new_level: u8) -> SpellSelection {
    let Some(info) = spellcasting_info(class_name, new_level) else {
        return SpellSelection {
            needs_selection: false,
            cantrips_needed: 0,
            spells_needed: 0,
            new_spell_level: None,
        };
    };

    SpellSelection {
        needs_selection: info.cantrips_learned > 0 || info.spells_learned > 0,
        cantrips_needed: info.cantrips_learned,
        spells_needed: info.spells_learned,
        new_spell_level: info.new_spell_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spellcasting::progression::slots_for_level;

    fn db_format(class_name: &str, level: u8) -> BTreeMap<String, u8> {
        let slots = slots_for_level(class_name, level).expect("slots");
        convert_slots_to_db_format(&slots)
    }

    #[test]
    fn db_format_keeps_nonzero_levels_only() {
        let wizard5 = db_format("Wizard", 5);
        let expected: BTreeMap<String, u8> =
            [("1".to_string(), 4), ("2".to_string(), 3), ("3".to_string(), 2)]
                .into_iter()
                .collect();
        assert_eq!(wizard5, expected);
    }

    #[test]
    fn db_format_flags_pact_magic() {
        let warlock5 = db_format("Warlock", 5);
        let expected: BTreeMap<String, u8> =
            [("3".to_string(), 2), ("pact_magic".to_string(), 1)]
                .into_iter()
                .collect();
        assert_eq!(warlock5, expected);
    }

    #[test]
    fn updated_slots_for_non_caster_is_none() {
        assert_eq!(updated_spell_slots("Fighter", 5), None);
        assert_eq!(updated_spell_slots("Wizard", 0), None);
    }

    #[test]
    fn paladin_level_one_is_a_caster_with_no_slots() {
        let slots = updated_spell_slots("Paladin", 1).expect("paladin is a caster");
        assert!(slots.is_empty());
    }

    #[test]
    fn ordinal_suffixes_follow_english_rules() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
    }

    #[test]
    fn wizard_level_three_message() {
        let message = level_up_message("Wizard", 2, 3).expect("message");
        assert_eq!(
            message,
            "You gain 1 additional 1st-level spell slot! You unlock 2 2nd-level spell slots!"
        );
    }

    #[test]
    fn paladin_gains_casting_at_level_two() {
        let message = level_up_message("Paladin", 1, 2).expect("message");
        assert!(message.starts_with("You gain the ability to cast spells!"));
        assert!(message.contains("You unlock 2 1st-level spell slots!"));
    }

    #[test]
    fn arcane_trickster_gains_casting_at_level_three() {
        let message = level_up_message("Arcane Trickster", 2, 3).expect("message");
        assert!(message.starts_with("You gain the ability to cast spells!"));
    }

    #[test]
    fn warlock_slot_level_upgrade_message() {
        let message = level_up_message("Warlock", 2, 3).expect("message");
        assert_eq!(
            message,
            "Your spell slots upgrade to 2nd level! You can learn 1 new spell!"
        );
    }

    #[test]
    fn warlock_extra_slot_message() {
        let message = level_up_message("Warlock", 10, 11).expect("message");
        assert!(message.contains("You gain an additional spell slot (now 3 total)!"));
    }

    #[test]
    fn no_change_yields_no_message() {
        // Paladin 5 -> 6 changes neither slots nor known spells.
        assert_eq!(level_up_message("Paladin", 5, 6), None);
        assert_eq!(level_up_message("Fighter", 1, 2), None);
    }

    #[test]
    fn selection_tracks_learned_counts() {
        let selection = needs_spell_selection("Sorcerer", 2);
        assert!(selection.needs_selection);
        assert_eq!(selection.spells_needed, 1);
        assert_eq!(selection.cantrips_needed, 0);

        let selection = needs_spell_selection("Wizard", 4);
        assert!(selection.needs_selection);
        assert_eq!(selection.cantrips_needed, 1);

        let selection = needs_spell_selection("Fighter", 4);
        assert!(!selection.needs_selection);
        assert_eq!(selection.new_spell_level, None);
    }

    #[test]
    fn selection_reports_new_spell_level() {
        let selection = needs_spell_selection("Wizard", 5);
        assert_eq!(selection.new_spell_level, Some(3));
    }
}
