//! Alignment reference data.

/// One of the nine alignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub philosophy: &'static str,
}

pub const ALIGNMENTS: &[Alignment] = &[
    Alignment {
        code: "LG",
        name: "Lawful Good",
        description: "Creatures that act with compassion and honor within a structured code, combining a commitment to oppose evil with discipline.",
        philosophy: "Society and order protect all. Honor, truth, and justice guide all actions.",
    },
    Alignment {
        code: "NG",
        name: "Neutral Good",
        description: "Folk who do the best they can to help others according to their needs, without strong feelings about order or chaos.",
        philosophy: "Do good without being bound by law or tradition. The right thing matters more than the method.",
    },
    Alignment {
        code: "CG",
        name: "Chaotic Good",
        description: "Creatures that act as their conscience directs, with little regard for what others expect, but kind and benevolent.",
        philosophy: "Freedom is essential to goodness. Follow your heart, even if it breaks unjust laws.",
    },
    Alignment {
        code: "LN",
        name: "Lawful Neutral",
        description: "Individuals who act in accordance with law, tradition, or personal codes, valuing order and organization above all else.",
        philosophy: "Order and reliability are paramount. Follow the rules without bias toward good or evil.",
    },
    Alignment {
        code: "N",
        name: "True Neutral",
        description: "Those who steer clear of moral questions and do not take sides, doing what seems best at the time.",
        philosophy: "Balance is essential. Extremism in any direction is dangerous.",
    },
    Alignment {
        code: "CN",
        name: "Chaotic Neutral",
        description: "Creatures that follow their whims, holding personal freedom above all else and resenting authority.",
        philosophy: "Total freedom is the only truth. Authority and rules are chains to be broken.",
    },
    Alignment {
        code: "LE",
        name: "Lawful Evil",
        description: "Creatures that methodically take what they want within the limits of a code of tradition, loyalty, or order.",
        philosophy: "Power and order should serve the strong. Domination through structure.",
    },
    Alignment {
        code: "NE",
        name: "Neutral Evil",
        description: "Those who do whatever they can get away with, without compassion or qualms, purely self-interested.",
        philosophy: "Self-interest above all. Use any means necessary to get ahead.",
    },
    Alignment {
        code: "CE",
        name: "Chaotic Evil",
        description: "Creatures that act with arbitrary violence, spurred by greed, hatred, or bloodlust, recognizing no authority.",
        philosophy: "Strength and destruction prove superiority. Rules and mercy are weakness.",
    },
];

/// Look up an alignment by its two-letter code, case-insensitively.
pub fn alignment_by_code(code: &str) -> Option<&'static Alignment> {
    ALIGNMENTS.iter().find(|a| a.code.eq_ignore_ascii_case(code))
}

/// Look up an alignment by its full name, case-insensitively.
pub fn alignment_by_name(name: &str) -> Option<&'static Alignment> {
    ALIGNMENTS.iter().find(|a| a.name.eq_ignore_ascii_case(name))
}

/// Whether the code is one of the good alignments.
pub fn is_good_aligned(code: &str) -> bool {
    matches!(code.to_ascii_uppercase().as_str(), "LG" | "NG" | "CG")
}

/// Whether the code is one of the evil alignments.
pub fn is_evil_aligned(code: &str) -> bool {
    matches!(code.to_ascii_uppercase().as_str(), "LE" | "NE" | "CE")
}

/// Whether the code is one of the lawful alignments.
pub fn is_lawful(code: &str) -> bool {
    matches!(code.to_ascii_uppercase().as_str(), "LG" | "LN" | "LE")
}

/// Whether the code is one of the chaotic alignments.
pub fn is_chaotic(code: &str) -> bool {
    matches!(code.to_ascii_uppercase().as_str(), "CG" | "CN" | "CE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_has_nine_alignments() {
        assert_eq!(ALIGNMENTS.len(), 9);
    }

    #[test]
    fn lookups_are_case_insensitive() {
        assert_eq!(alignment_by_code("lg").map(|a| a.name), Some("Lawful Good"));
        assert_eq!(alignment_by_name("chaotic evil").map(|a| a.code), Some("CE"));
        assert!(alignment_by_code("XX").is_none());
    }

    #[test]
    fn axis_predicates() {
        assert!(is_good_aligned("NG"));
        assert!(!is_good_aligned("NE"));
        assert!(is_evil_aligned("le"));
        assert!(is_lawful("LG"));
        assert!(is_chaotic("cn"));
        assert!(!is_lawful("CG"));
    }
}
