//! Spell slot progression tables (PHB).
//!
//! Every function here is total over its string/level inputs: an unknown
//! class or an out-of-range level yields `None`/`0`/`false`, never a panic,
//! so UI code can call these unconditionally.

use serde::{Deserialize, Serialize};

/// Shape and pace of spell-slot acquisition by level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasterType {
    Full,
    Half,
    Third,
    Pact,
}

/// Slot counts per spell level for standard casters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlots {
    pub level1: u8,
    pub level2: u8,
    pub level3: u8,
    pub level4: u8,
    pub level5: u8,
    pub level6: u8,
    pub level7: u8,
    pub level8: u8,
    pub level9: u8,
}

impl SpellSlots {
    fn from_row(row: [u8; 9]) -> Self {
        Self {
            level1: row[0],
            level2: row[1],
            level3: row[2],
            level4: row[3],
            level5: row[4],
            level6: row[5],
            level7: row[6],
            level8: row[7],
            level9: row[8],
        }
    }

    /// Slot count for a spell level (1-9); 0 for anything else.
    pub fn slot_count(&self, spell_level: u8) -> u8 {
        match spell_level {
            1 => self.level1,
            2 => self.level2,
            3 => self.level3,
            4 => self.level4,
            5 => self.level5,
            6 => self.level6,
            7 => self.level7,
            8 => self.level8,
            9 => self.level9,
            _ => 0,
        }
    }

    /// Iterate `(spell_level, count)` pairs for levels 1-9.
    pub fn levels(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (1..=9).map(|l| (l, self.slot_count(l)))
    }
}

/// Pact Magic: few slots, all at one shared slot level. Refresh timing is
/// out of scope - only "how many at what level" is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PactMagicSlots {
    pub slots: u8,
    pub slot_level: u8,
}

/// Slot table entry for any caster archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CasterSlots {
    Pact(PactMagicSlots),
    Standard(SpellSlots),
}

impl CasterSlots {
    pub fn as_standard(&self) -> Option<&SpellSlots> {
        match self {
            CasterSlots::Standard(slots) => Some(slots),
            CasterSlots::Pact(_) => None,
        }
    }

    pub fn as_pact(&self) -> Option<&PactMagicSlots> {
        match self {
            CasterSlots::Pact(slots) => Some(slots),
            CasterSlots::Standard(_) => None,
        }
    }
}

/// Ability score used for spell save DC and attack bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpellcastingAbility {
    Int,
    Wis,
    Cha,
}

impl SpellcastingAbility {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpellcastingAbility::Int => "INT",
            SpellcastingAbility::Wis => "WIS",
            SpellcastingAbility::Cha => "CHA",
        }
    }
}

/// Everything a level-up flow needs to know about a caster at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingInfo {
    pub slots: CasterSlots,
    pub cantrips_known: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spells_known: Option<u8>,
    pub spells_learned: u8,
    pub cantrips_learned: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_spell_level: Option<u8>,
}

// Rows are character levels 1-20; columns are spell levels 1-9.

const FULL_CASTER_SLOTS: [[u8; 9]; 20] = [
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 2, 1, 1],
];

const HALF_CASTER_SLOTS: [[u8; 9]; 20] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
];

const THIRD_CASTER_SLOTS: [[u8; 9]; 20] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
];

fn warlock_slots(level: u8) -> PactMagicSlots {
    let (slots, slot_level) = match level {
        1 => (1, 1),
        2 => (2, 1),
        3..=4 => (2, 2),
        5..=6 => (2, 3),
        7..=8 => (2, 4),
        9..=10 => (2, 5),
        11..=16 => (3, 5),
        _ => (4, 5), // 17-20; callers guarantee level is in range
    };
    PactMagicSlots { slots, slot_level }
}

// Known-count tables, indexed by character level (index 0 unused).

const BARD_CANTRIPS: [u8; 21] = [0, 2, 2, 2, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4];
const CLERIC_CANTRIPS: [u8; 21] = [0, 3, 3, 3, 4, 4, 4, 4, 4, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5];
const DRUID_CANTRIPS: [u8; 21] = [0, 2, 2, 2, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4];
const SORCERER_CANTRIPS: [u8; 21] = [0, 4, 4, 4, 5, 5, 5, 5, 5, 5, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6];
const WIZARD_CANTRIPS: [u8; 21] = [0, 3, 3, 3, 4, 4, 4, 4, 4, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5];
const ELDRITCH_KNIGHT_CANTRIPS: [u8; 21] =
    [0, 0, 0, 2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3];
const ARCANE_TRICKSTER_CANTRIPS: [u8; 21] =
    [0, 0, 0, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4];
const WARLOCK_CANTRIPS: [u8; 21] = [0, 2, 2, 2, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4];

const BARD_SPELLS_KNOWN: [u8; 21] =
    [0, 4, 5, 6, 7, 8, 9, 10, 11, 12, 14, 15, 15, 16, 18, 19, 19, 20, 22, 22, 22];
const SORCERER_SPELLS_KNOWN: [u8; 21] =
    [0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 12, 13, 13, 14, 14, 15, 15, 15, 15];
const RANGER_SPELLS_KNOWN: [u8; 21] =
    [0, 0, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11];
const WARLOCK_SPELLS_KNOWN: [u8; 21] =
    [0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 11, 11, 12, 12, 13, 13, 14, 14, 15, 15];
const ELDRITCH_KNIGHT_SPELLS_KNOWN: [u8; 21] =
    [0, 0, 0, 3, 4, 4, 4, 5, 6, 6, 7, 8, 8, 9, 10, 10, 11, 11, 11, 12, 13];
const ARCANE_TRICKSTER_SPELLS_KNOWN: [u8; 21] =
    [0, 0, 0, 3, 4, 4, 4, 5, 6, 6, 7, 8, 8, 9, 10, 10, 11, 11, 11, 12, 13];

/// Caster archetype for a class name, or `None` for non-casters.
/// Matching is case-insensitive.
pub fn caster_type(class_name: &str) -> Option<CasterType> {
    match class_name.to_lowercase().as_str() {
        "bard" | "cleric" | "druid" | "sorcerer" | "wizard" => Some(CasterType::Full),
        "paladin" | "ranger" => Some(CasterType::Half),
        "eldritch knight" | "arcane trickster" => Some(CasterType::Third),
        "warlock" => Some(CasterType::Pact),
        _ => None,
    }
}

fn cantrips_table(class_name: &str) -> Option<&'static [u8; 21]> {
    match class_name.to_lowercase().as_str() {
        "bard" => Some(&BARD_CANTRIPS),
        "cleric" => Some(&CLERIC_CANTRIPS),
        "druid" => Some(&DRUID_CANTRIPS),
        "sorcerer" => Some(&SORCERER_CANTRIPS),
        "wizard" => Some(&WIZARD_CANTRIPS),
        "eldritch knight" => Some(&ELDRITCH_KNIGHT_CANTRIPS),
        "arcane trickster" => Some(&ARCANE_TRICKSTER_CANTRIPS),
        "warlock" => Some(&WARLOCK_CANTRIPS),
        // Paladin and Ranger do not get cantrips
        _ => None,
    }
}

fn spells_known_table(class_name: &str) -> Option<&'static [u8; 21]> {
    match class_name.to_lowercase().as_str() {
        "bard" => Some(&BARD_SPELLS_KNOWN),
        "sorcerer" => Some(&SORCERER_SPELLS_KNOWN),
        "ranger" => Some(&RANGER_SPELLS_KNOWN),
        "warlock" => Some(&WARLOCK_SPELLS_KNOWN),
        "eldritch knight" => Some(&ELDRITCH_KNIGHT_SPELLS_KNOWN),
        "arcane trickster" => Some(&ARCANE_TRICKSTER_SPELLS_KNOWN),
        // Cleric, Druid, Wizard, and Paladin prepare spells from the full list
        _ => None,
    }
}

fn level_in_range(level: u8) -> bool {
    (1..=20).contains(&level)
}

/// Slot table entry for a class at a character level.
///
/// `None` when the class is not a recognized spellcasting class or the
/// level is outside 1-20.
pub fn slots_for_level(class_name: &str, level: u8) -> Option<CasterSlots> {
    if !level_in_range(level) {
        return None;
    }

    let index = (level - 1) as usize;
    match caster_type(class_name)? {
        CasterType::Full => Some(CasterSlots::Standard(SpellSlots::from_row(
            FULL_CASTER_SLOTS[index],
        ))),
        CasterType::Half => Some(CasterSlots::Standard(SpellSlots::from_row(
            HALF_CASTER_SLOTS[index],
        ))),
        CasterType::Third => Some(CasterSlots::Standard(SpellSlots::from_row(
            THIRD_CASTER_SLOTS[index],
        ))),
        CasterType::Pact => Some(CasterSlots::Pact(warlock_slots(level))),
    }
}

/// Number of NEW spells learned at exactly this level, versus the previous
/// one. 0 for out-of-range levels, prepared casters, and non-casters.
pub fn new_spells_learned(class_name: &str, level: u8) -> u8 {
    if !level_in_range(level) {
        return 0;
    }
    let Some(table) = spells_known_table(class_name) else {
        return 0;
    };

    let current = table[level as usize];
    let previous = if level > 1 { table[(level - 1) as usize] } else { 0 };
    current.saturating_sub(previous)
}

/// Number of NEW cantrips learned at exactly this level. 0 for out-of-range
/// levels and classes without cantrips.
pub fn new_cantrips_learned(class_name: &str, level: u8) -> u8 {
    if !level_in_range(level) {
        return 0;
    }
    let Some(table) = cantrips_table(class_name) else {
        return 0;
    };

    let current = table[level as usize];
    let previous = if level > 1 { table[(level - 1) as usize] } else { 0 };
    current.saturating_sub(previous)
}

/// The highest NEW spell level unlocked at exactly this level, or `None`
/// when no new level opened up (including invalid input).
pub fn spell_level_unlocked(class_name: &str, level: u8) -> Option<u8> {
    if !level_in_range(level) {
        return None;
    }
    let current = slots_for_level(class_name, level)?;

    match current {
        CasterSlots::Pact(current) => {
            let previous = if level > 1 {
                slots_for_level(class_name, level - 1).and_then(|s| s.as_pact().copied())
            } else {
                None
            };
            match previous {
                None => Some(current.slot_level),
                Some(previous) if current.slot_level > previous.slot_level => {
                    Some(current.slot_level)
                }
                Some(_) => None,
            }
        }
        CasterSlots::Standard(current) => {
            let previous = if level > 1 {
                slots_for_level(class_name, level - 1).and_then(|s| s.as_standard().copied())
            } else {
                None
            };

            for spell_level in (1..=9).rev() {
                let current_count = current.slot_count(spell_level);
                let previous_count =
                    previous.map(|p| p.slot_count(spell_level)).unwrap_or(0);
                if current_count > 0 && previous_count == 0 {
                    return Some(spell_level);
                }
            }
            None
        }
    }
}

/// Whether the class casts spells at all (at any level).
pub fn is_spellcaster(class_name: &str) -> bool {
    caster_type(class_name).is_some()
}

/// Complete spellcasting picture for a class at one level, or `None` for
/// non-casters and out-of-range levels.
///
/// `spells_known` is populated only for classes that know a fixed number of
/// spells; prepared casters (Wizard, Cleric, Druid, Paladin) never carry it.
pub fn spellcasting_info(class_name: &str, level: u8) -> Option<SpellcastingInfo> {
    if !is_spellcaster(class_name) {
        return None;
    }
    let slots = slots_for_level(class_name, level)?;

    let cantrips_known = cantrips_table(class_name)
        .map(|t| t[level as usize])
        .unwrap_or(0);
    let spells_known = spells_known_table(class_name)
        .map(|t| t[level as usize])
        .filter(|&n| n > 0);

    Some(SpellcastingInfo {
        slots,
        cantrips_known,
        spells_known,
        spells_learned: new_spells_learned(class_name, level),
        cantrips_learned: new_cantrips_learned(class_name, level),
        new_spell_level: spell_level_unlocked(class_name, level),
    })
}

/// Spellcasting ability for a class, or `None` for non-casters.
pub fn spellcasting_ability(class_name: &str) -> Option<SpellcastingAbility> {
    match class_name.to_lowercase().as_str() {
        "wizard" | "eldritch knight" | "arcane trickster" => Some(SpellcastingAbility::Int),
        "cleric" | "druid" | "ranger" => Some(SpellcastingAbility::Wis),
        "bard" | "sorcerer" | "paladin" | "warlock" => Some(SpellcastingAbility::Cha),
        _ => None,
    }
}
