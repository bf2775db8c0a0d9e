//! Skill reference data.

use serde::{Deserialize, Serialize};

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AbilityScore {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl AbilityScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbilityScore::Str => "STR",
            AbilityScore::Dex => "DEX",
            AbilityScore::Con => "CON",
            AbilityScore::Int => "INT",
            AbilityScore::Wis => "WIS",
            AbilityScore::Cha => "CHA",
        }
    }
}

/// One skill and its governing ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub ability: AbilityScore,
    pub description: &'static str,
}

use AbilityScore::{Cha, Dex, Int, Str, Wis};

pub const SKILLS: &[Skill] = &[
    Skill {
        name: "Acrobatics",
        ability: Dex,
        description: "Staying on your feet in tricky situations: balancing on ice, tumbling, or keeping upright on a rocking deck.",
    },
    Skill {
        name: "Animal Handling",
        ability: Wis,
        description: "Calming a domesticated animal, keeping a mount from being spooked, or intuiting an animal's intentions.",
    },
    Skill {
        name: "Arcana",
        ability: Int,
        description: "Recalling lore about spells, magic items, eldritch symbols, magical traditions, and the planes of existence.",
    },
    Skill {
        name: "Athletics",
        ability: Str,
        description: "Difficult physical feats while climbing, jumping, or swimming.",
    },
    Skill {
        name: "Deception",
        ability: Cha,
        description: "Convincingly hiding the truth, whether through misleading words, ambiguity, or outright lies.",
    },
    Skill {
        name: "History",
        ability: Int,
        description: "Recalling lore about historical events, legendary people, ancient kingdoms, past disputes, and lost civilizations.",
    },
    Skill {
        name: "Insight",
        ability: Wis,
        description: "Determining the true intentions of a creature by reading body language, speech habits, and changes in mannerisms.",
    },
    Skill {
        name: "Intimidation",
        ability: Cha,
        description: "Influencing others through overt threats, hostile actions, and physical menace.",
    },
    Skill {
        name: "Investigation",
        ability: Int,
        description: "Looking around for clues and making deductions: finding a hidden object, reading a wound, or spotting a weak point.",
    },
    Skill {
        name: "Medicine",
        ability: Wis,
        description: "Stabilizing a dying companion or diagnosing an illness.",
    },
    Skill {
        name: "Nature",
        ability: Int,
        description: "Recalling lore about terrain, plants and animals, the weather, and natural cycles.",
    },
    Skill {
        name: "Perception",
        ability: Wis,
        description: "Spotting, hearing, or otherwise detecting the presence of something using your general awareness and senses.",
    },
    Skill {
        name: "Performance",
        ability: Cha,
        description: "Delighting an audience with music, dance, acting, storytelling, or another form of entertainment.",
    },
    Skill {
        name: "Persuasion",
        ability: Cha,
        description: "Influencing someone or a group with tact, social graces, or good nature.",
    },
    Skill {
        name: "Religion",
        ability: Int,
        description: "Recalling lore about deities, rites and prayers, religious hierarchies, holy symbols, and secret cults.",
    },
    Skill {
        name: "Sleight of Hand",
        ability: Dex,
        description: "Acts of legerdemain and manual trickery: planting something on someone, concealing an object, or lifting a coin purse.",
    },
    Skill {
        name: "Stealth",
        ability: Dex,
        description: "Concealing yourself from enemies, slinking past guards, slipping away unnoticed, or sneaking up on someone.",
    },
    Skill {
        name: "Survival",
        ability: Wis,
        description: "Following tracks, hunting wild game, guiding a group through wastes, or avoiding natural hazards.",
    },
];

/// Look up a skill by name, case-insensitively.
pub fn skill_by_name(name: &str) -> Option<&'static Skill> {
    SKILLS.iter().find(|skill| skill.name.eq_ignore_ascii_case(name))
}
