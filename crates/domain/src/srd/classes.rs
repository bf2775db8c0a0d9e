//! Character class reference data.

use crate::spellcasting::progression::{CasterType, SpellcastingAbility};

/// Spellcasting profile for classes that cast at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spellcasting {
    pub ability: SpellcastingAbility,
    pub caster: CasterType,
}

/// One playable class with its mechanical properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterClass {
    pub name: &'static str,
    pub description: &'static str,
    pub hit_die: u8,
    pub spellcasting: Option<Spellcasting>,
    pub skills: &'static [&'static str],
    pub skill_count: u8,
}

use CasterType::{Full, Half, Pact};
use SpellcastingAbility::{Cha, Int, Wis};

pub const CLASSES: &[CharacterClass] = &[
    CharacterClass {
        name: "Barbarian",
        description: "A fierce warrior of primitive background who can enter a battle rage, shrugging off punishment while dealing devastating blows.",
        hit_die: 12,
        spellcasting: None,
        skills: &["Animal Handling", "Athletics", "Intimidation", "Nature", "Perception", "Survival"],
        skill_count: 2,
    },
    CharacterClass {
        name: "Bard",
        description: "An inspiring magician whose power echoes the music of creation, supporting allies and debilitating foes.",
        hit_die: 8,
        spellcasting: Some(Spellcasting { ability: Cha, caster: Full }),
        skills: &["Any"],
        skill_count: 3,
    },
    CharacterClass {
        name: "Cleric",
        description: "A priestly champion who wields divine magic in service of a higher power.",
        hit_die: 8,
        spellcasting: Some(Spellcasting { ability: Wis, caster: Full }),
        skills: &["History", "Insight", "Medicine", "Persuasion", "Religion"],
        skill_count: 2,
    },
    CharacterClass {
        name: "Druid",
        description: "A priest of the Old Faith, wielding the powers of nature and adopting animal forms.",
        hit_die: 8,
        spellcasting: Some(Spellcasting { ability: Wis, caster: Full }),
        skills: &["Arcana", "Animal Handling", "Insight", "Medicine", "Nature", "Perception", "Religion", "Survival"],
        skill_count: 2,
    },
    CharacterClass {
        name: "Fighter",
        description: "A master of martial combat, skilled with a variety of weapons and armor.",
        hit_die: 10,
        spellcasting: None,
        skills: &["Acrobatics", "Animal Handling", "Athletics", "History", "Insight", "Intimidation", "Perception", "Survival"],
        skill_count: 2,
    },
    CharacterClass {
        name: "Monk",
        description: "A master of martial arts, harnessing the power of the body in pursuit of physical and spiritual perfection.",
        hit_die: 8,
        spellcasting: None,
        skills: &["Acrobatics", "Athletics", "History", "Insight", "Religion", "Stealth"],
        skill_count: 2,
    },
    CharacterClass {
        name: "Paladin",
        description: "A holy warrior bound to a sacred oath, smiting foes and shielding allies.",
        hit_die: 10,
        spellcasting: Some(Spellcasting { ability: Cha, caster: Half }),
        skills: &["Athletics", "Insight", "Intimidation", "Medicine", "Persuasion", "Religion"],
        skill_count: 2,
    },
    CharacterClass {
        name: "Ranger",
        description: "A warrior of the wilderness, using martial prowess and nature magic to hunt threats on the edges of civilization.",
        hit_die: 10,
        spellcasting: Some(Spellcasting { ability: Wis, caster: Half }),
        skills: &["Animal Handling", "Athletics", "Insight", "Investigation", "Nature", "Perception", "Stealth", "Survival"],
        skill_count: 3,
    },
    CharacterClass {
        name: "Rogue",
        description: "A scoundrel who uses stealth and trickery to overcome obstacles and enemies.",
        hit_die: 8,
        spellcasting: None,
        skills: &["Acrobatics", "Athletics", "Deception", "Insight", "Intimidation", "Investigation", "Perception", "Performance", "Persuasion", "Sleight of Hand", "Stealth"],
        skill_count: 4,
    },
    CharacterClass {
        name: "Sorcerer",
        description: "A spellcaster who draws on inherent magic from a gift or bloodline.",
        hit_die: 6,
        spellcasting: Some(Spellcasting { ability: Cha, caster: Full }),
        skills: &["Arcana", "Deception", "Insight", "Intimidation", "Persuasion", "Religion"],
        skill_count: 2,
    },
    CharacterClass {
        name: "Warlock",
        description: "A wielder of magic that is derived from a bargain with an extraplanar entity.",
        hit_die: 8,
        spellcasting: Some(Spellcasting { ability: Cha, caster: Pact }),
        skills: &["Arcana", "Deception", "History", "Intimidation", "Investigation", "Nature", "Religion"],
        skill_count: 2,
    },
    CharacterClass {
        name: "Wizard",
        description: "A scholarly magic-user capable of manipulating the structures of reality.",
        hit_die: 6,
        spellcasting: Some(Spellcasting { ability: Int, caster: CasterType::Full }),
        skills: &["Arcana", "History", "Insight", "Investigation", "Medicine", "Religion"],
        skill_count: 2,
    },
];

/// Look up a class by name, case-insensitively.
pub fn class_by_name(name: &str) -> Option<&'static CharacterClass> {
    CLASSES.iter().find(|class| class.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spellcasting::progression::spellcasting_ability;

    #[test]
    fn dataset_has_twelve_classes() {
        assert_eq!(CLASSES.len(), 12);
    }

    #[test]
    fn hit_dice_match_the_rules() {
        assert_eq!(class_by_name("Barbarian").map(|c| c.hit_die), Some(12));
        assert_eq!(class_by_name("fighter").map(|c| c.hit_die), Some(10));
        assert_eq!(class_by_name("Cleric").map(|c| c.hit_die), Some(8));
        assert_eq!(class_by_name("WIZARD").map(|c| c.hit_die), Some(6));
    }

    #[test]
    fn class_table_agrees_with_the_progression_engine() {
        for class in CLASSES {
            let engine_ability = spellcasting_ability(class.name);
            assert_eq!(
                class.spellcasting.map(|s| s.ability),
                engine_ability,
                "{} spellcasting ability mismatch",
                class.name
            );
        }
    }
}
