//! Playable race reference data.

use super::skills::AbilityScore;

/// One playable race with its mechanical properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Race {
    pub name: &'static str,
    pub description: &'static str,
    pub ability_bonuses: &'static [(AbilityScore, i8)],
    pub speed: u32,
    pub languages: &'static [&'static str],
    pub traits: &'static [&'static str],
}

use AbilityScore::{Cha, Con, Dex, Int, Str, Wis};

pub const RACES: &[Race] = &[
    Race {
        name: "Aasimar",
        description: "Aasimar bear within their souls the light of the heavens, descended from humans touched by the power of the celestial realms.",
        ability_bonuses: &[(Cha, 2)],
        speed: 30,
        languages: &["Common", "Celestial"],
        traits: &[
            "Darkvision (60 ft)",
            "Celestial Resistance (resistance to necrotic and radiant damage)",
            "Healing Hands (heal HP equal to your level as an action, 1/long rest)",
            "Light Bearer (know the Light cantrip)",
        ],
    },
    Race {
        name: "Dragonborn",
        description: "Born of dragons, the dragonborn walk proudly through a world that greets them with fearful incomprehension.",
        ability_bonuses: &[(Str, 2), (Cha, 1)],
        speed: 30,
        languages: &["Common", "Draconic"],
        traits: &[
            "Draconic Ancestry (choose dragon type)",
            "Breath Weapon (exhale destructive energy, 2d6 damage at level 1)",
            "Damage Resistance (resistance to your ancestry's damage type)",
        ],
    },
    Race {
        name: "Dwarf",
        description: "Bold and hardy, dwarves are known as skilled warriors, miners, and workers of stone and metal.",
        ability_bonuses: &[(Con, 2)],
        speed: 25,
        languages: &["Common", "Dwarvish"],
        traits: &[
            "Darkvision (60 ft)",
            "Dwarven Resilience (advantage on saves against poison, resistance to poison damage)",
            "Dwarven Combat Training (proficiency with battleaxe, handaxe, light hammer, warhammer)",
            "Stonecunning (double proficiency on History checks about stonework)",
            "Tool Proficiency (artisan's tools of your choice)",
        ],
    },
    Race {
        name: "Elf",
        description: "Elves are a magical people of otherworldly grace, living in the world but not entirely part of it.",
        ability_bonuses: &[(Dex, 2)],
        speed: 30,
        languages: &["Common", "Elvish"],
        traits: &[
            "Darkvision (60 ft)",
            "Keen Senses (proficiency in Perception)",
            "Fey Ancestry (advantage on saves against being charmed, immune to magical sleep)",
            "Trance (4 hours of meditation counts as 8 hours of sleep)",
        ],
    },
    Race {
        name: "Gnome",
        description: "A gnome's energy and enthusiasm for living shines through every inch of their tiny body.",
        ability_bonuses: &[(Int, 2)],
        speed: 25,
        languages: &["Common", "Gnomish"],
        traits: &[
            "Darkvision (60 ft)",
            "Gnome Cunning (advantage on INT, WIS, and CHA saves against magic)",
        ],
    },
    Race {
        name: "Goliath",
        description: "At the highest mountain peaks dwell the reclusive goliaths, wandering a bleak realm of rock, wind, and cold.",
        ability_bonuses: &[(Str, 2), (Con, 1)],
        speed: 30,
        languages: &["Common", "Giant"],
        traits: &[
            "Natural Athlete (proficiency in Athletics)",
            "Stone's Endurance (reduce damage by 1d12 + CON mod as a reaction, 1/short rest)",
            "Powerful Build (count as one size larger for carrying capacity)",
            "Mountain Born (acclimated to high altitude and cold climate)",
        ],
    },
    Race {
        name: "Halfling",
        description: "The diminutive halflings survive in a world full of larger creatures by avoiding notice or, barring that, avoiding offense.",
        ability_bonuses: &[(Dex, 2)],
        speed: 25,
        languages: &["Common", "Halfling"],
        traits: &[
            "Lucky (reroll 1s on attack rolls, ability checks, and saving throws)",
            "Brave (advantage on saves against being frightened)",
            "Halfling Nimbleness (move through the space of larger creatures)",
        ],
    },
    Race {
        name: "Human",
        description: "Humans are the most adaptable and ambitious people among the common races, with widely varying tastes, morals, and customs.",
        ability_bonuses: &[(Str, 1), (Dex, 1), (Con, 1), (Int, 1), (Wis, 1), (Cha, 1)],
        speed: 30,
        languages: &["Common", "One extra language of your choice"],
        traits: &[
            "Versatile (bonus to all ability scores)",
            "Extra Language (choose one additional language)",
        ],
    },
    Race {
        name: "Orc",
        description: "Orcs are rugged raiders with prominent lower canines resembling tusks, some of whom rise above their savage kin to find honor and purpose.",
        ability_bonuses: &[(Str, 2), (Con, 1)],
        speed: 30,
        languages: &["Common", "Orc"],
        traits: &[
            "Darkvision (60 ft)",
            "Aggressive (bonus action to move toward an enemy)",
            "Menacing (proficiency in Intimidation)",
            "Powerful Build (count as one size larger for carrying capacity)",
        ],
    },
    Race {
        name: "Tiefling",
        description: "To be greeted with stares and whispers, to see mistrust in every eye: this is the lot of the tiefling, marked by an infernal heritage.",
        ability_bonuses: &[(Cha, 2), (Int, 1)],
        speed: 30,
        languages: &["Common", "Infernal"],
        traits: &[
            "Darkvision (60 ft)",
            "Hellish Resistance (resistance to fire damage)",
            "Infernal Legacy (Thaumaturgy cantrip, later Hellish Rebuke and Darkness, 1/long rest)",
        ],
    },
];

/// Look up a race by name, case-insensitively.
pub fn race_by_name(name: &str) -> Option<&'static Race> {
    RACES.iter().find(|race| race.name.eq_ignore_ascii_case(name))
}
