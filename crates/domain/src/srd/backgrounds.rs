//! Character background reference data.

/// One background with its proficiencies and feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub name: &'static str,
    pub description: &'static str,
    pub skill_proficiencies: &'static [&'static str],
    pub languages: u8,
    pub feature_name: &'static str,
    pub feature_description: &'static str,
}

pub const BACKGROUNDS: &[Background] = &[
    Background {
        name: "Acolyte",
        description: "You have spent your life in the service of a temple, acting as an intermediary between the realm of the holy and the mortal world.",
        skill_proficiencies: &["Insight", "Religion"],
        languages: 2,
        feature_name: "Shelter of the Faithful",
        feature_description: "You and your companions can expect free healing and care at a temple of your faith, and you can call on the priests for support.",
    },
    Background {
        name: "Criminal",
        description: "You are an experienced criminal with a history of breaking the law and contacts deep in the underworld.",
        skill_proficiencies: &["Deception", "Stealth"],
        languages: 0,
        feature_name: "Criminal Contact",
        feature_description: "You have a reliable and trustworthy contact who acts as your liaison to a network of other criminals.",
    },
    Background {
        name: "Folk Hero",
        description: "You come from a humble social rank, but you are destined for so much more. The people of your home village regard you as their champion.",
        skill_proficiencies: &["Animal Handling", "Survival"],
        languages: 0,
        feature_name: "Rustic Hospitality",
        feature_description: "Common folk will shelter you and shield you from the law or anyone searching for you, though they will not risk their lives.",
    },
    Background {
        name: "Noble",
        description: "You understand wealth, power, and privilege. You carry a noble title, and your family owns land and wields influence.",
        skill_proficiencies: &["History", "Persuasion"],
        languages: 1,
        feature_name: "Position of Privilege",
        feature_description: "People are inclined to think the best of you. You are welcome in high society, and common folk make every effort to accommodate you.",
    },
    Background {
        name: "Sage",
        description: "You spent years learning the lore of the multiverse, poring over manuscripts and listening to the greatest experts.",
        skill_proficiencies: &["Arcana", "History"],
        languages: 2,
        feature_name: "Researcher",
        feature_description: "When you attempt to recall a piece of lore, if you do not know it, you often know where and from whom you can obtain it.",
    },
    Background {
        name: "Soldier",
        description: "War has been your life for as long as you care to remember. You trained as a youth and learned basic survival techniques, including how to stay alive on the battlefield.",
        skill_proficiencies: &["Athletics", "Intimidation"],
        languages: 0,
        feature_name: "Military Rank",
        feature_description: "You have a military rank from your career as a soldier. Soldiers loyal to your former organization still recognize your authority.",
    },
];

/// Look up a background by name, case-insensitively.
pub fn background_by_name(name: &str) -> Option<&'static Background> {
    BACKGROUNDS.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}
