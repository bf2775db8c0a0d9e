//! Attunement engine.
//!
//! Characters bond with at most `max_slots` magic items at a time (three in
//! the standard rules). Every mutation returns a new `CharacterAttunement`
//! value instead of mutating in place; the caller threads the returned
//! record forward. Timestamps are injected so the engine stays
//! deterministic.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::srd::magic_items::MagicItem;

/// Maximum number of attunement slots per character (standard rules).
pub const MAX_ATTUNEMENT_SLOTS: usize = 3;

/// Attuning takes a short rest (one hour) spent focused on the item.
pub const ATTUNEMENT_TIME_HOURS: u32 = 1;

/// One bonded item, in attunement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttunedItem {
    pub item_name: String,
    pub attuned_at: DateTime<Utc>,
}

/// A character's current attunements. Insertion order is attunement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterAttunement {
    pub character_id: String,
    pub attuned_items: Vec<AttunedItem>,
    pub max_slots: usize,
}

/// Failures from attunement mutations. These are misuse signals for callers
/// that skipped precondition checks; queries never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttunementError {
    #[error("{item} does not require attunement")]
    AttunementNotRequired { item: String },

    #[error("Already attuned to {item}")]
    AlreadyAttuned { item: String },

    #[error("No available attunement slots ({used}/{total}). Break attunement to another item first.")]
    NoAvailableSlots { used: usize, total: usize },

    #[error("Not attuned to {item}")]
    NotAttuned { item: String },
}

impl CharacterAttunement {
    /// Create an empty attunement record with the standard slot count.
    pub fn new(character_id: impl Into<String>) -> Self {
        Self::with_max_slots(character_id, MAX_ATTUNEMENT_SLOTS)
    }

    /// Create an empty attunement record with an explicit slot count
    /// (variant rules and tests).
    pub fn with_max_slots(character_id: impl Into<String>, max_slots: usize) -> Self {
        Self {
            character_id: character_id.into(),
            attuned_items: Vec::new(),
            max_slots,
        }
    }

    /// Whether at least one slot is free.
    pub fn has_available_slot(&self) -> bool {
        self.attuned_items.len() < self.max_slots
    }

    /// Number of free slots, never negative.
    pub fn available_slots(&self) -> usize {
        self.max_slots.saturating_sub(self.attuned_items.len())
    }

    /// Whether the character is attuned to the named item.
    pub fn is_attuned_to(&self, item_name: &str) -> bool {
        self.attuned_items.iter().any(|i| i.item_name == item_name)
    }

    /// Names of all attuned items, in attunement order.
    pub fn attuned_item_names(&self) -> Vec<&str> {
        self.attuned_items.iter().map(|i| i.item_name.as_str()).collect()
    }

    /// Attune to a magic item, returning the updated record.
    pub fn attune(
        &self,
        item: &MagicItem,
        now: DateTime<Utc>,
    ) -> Result<CharacterAttunement, AttunementError> {
        if !item.requires_attunement {
            return Err(AttunementError::AttunementNotRequired {
                item: item.name.clone(),
            });
        }
        if self.is_attuned_to(&item.name) {
            return Err(AttunementError::AlreadyAttuned {
                item: item.name.clone(),
            });
        }
        if !self.has_available_slot() {
            return Err(AttunementError::NoAvailableSlots {
                used: self.attuned_items.len(),
                total: self.max_slots,
            });
        }

        let mut attuned_items = self.attuned_items.clone();
        attuned_items.push(AttunedItem {
            item_name: item.name.clone(),
            attuned_at: now,
        });
        Ok(CharacterAttunement {
            character_id: self.character_id.clone(),
            attuned_items,
            max_slots: self.max_slots,
        })
    }

    /// Break attunement to the named item, returning the updated record.
    /// Order of the remaining items is preserved.
    pub fn break_attunement(&self, item_name: &str) -> Result<CharacterAttunement, AttunementError> {
        if !self.is_attuned_to(item_name) {
            return Err(AttunementError::NotAttuned {
                item: item_name.to_string(),
            });
        }

        let attuned_items = self
            .attuned_items
            .iter()
            .filter(|i| i.item_name != item_name)
            .cloned()
            .collect();
        Ok(CharacterAttunement {
            character_id: self.character_id.clone(),
            attuned_items,
            max_slots: self.max_slots,
        })
    }

    /// Break one attunement and attune to another item in a single step.
    /// Works on a full record because the slot is freed first.
    pub fn replace(
        &self,
        remove_item_name: &str,
        new_item: &MagicItem,
        now: DateTime<Utc>,
    ) -> Result<CharacterAttunement, AttunementError> {
        let after_break = self.break_attunement(remove_item_name)?;
        after_break.attune(new_item, now)
    }

    /// Human-readable slot summary for display.
    pub fn summary(&self, now: DateTime<Utc>) -> String {
        let used = self.attuned_items.len();
        let total = self.max_slots;
        let available = self.available_slots();

        let mut lines = vec![
            format!("Attunement Slots: {used}/{total} used, {available} available"),
            String::new(),
        ];

        if self.attuned_items.is_empty() {
            lines.push("No attuned items".to_string());
        } else {
            lines.push("Attuned Items:".to_string());
            for (index, item) in self.attuned_items.iter().enumerate() {
                let days_since = (now - item.attuned_at).num_days().max(0);
                lines.push(format!("  {}. {} ({}d ago)", index + 1, item.item_name, days_since));
            }
        }

        lines.join("\n")
    }
}

/// Outcome of a restriction check against an item's description text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttunementEligibility {
    pub can_attune: bool,
    pub reason: Option<String>,
}

impl AttunementEligibility {
    fn allowed() -> Self {
        Self { can_attune: true, reason: None }
    }

    fn rejected(reason: String) -> Self {
        Self { can_attune: false, reason: Some(reason) }
    }
}

// Restriction phrasing in the dataset follows the SRD convention
// "requires attunement by a <class list>." - the capture stops at the first
// period or closing parenthesis.
static CLASS_REQUIREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"by a ([\w\s,]+?)[\.)]").expect("class requirement pattern is valid")
});

static REQUIREMENT_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",|\sor\s").expect("requirement separator pattern is valid"));

const ALIGNMENT_WORDS: [&str; 5] = ["good", "evil", "lawful", "chaotic", "neutral"];

/// Check whether a character may attune to an item at all, based on the
/// class/alignment restrictions parsed out of its description text.
///
/// The parse is deliberately loose: class names are matched case-insensitively
/// with substring containment so phrasing like "a cleric, druid, or ranger"
/// resolves. Items with no recognizable restriction are allowed by default.
/// The race parameter is accepted for call-site symmetry but no race-gated
/// item exists in the bundled dataset, so it is not consulted.
pub fn can_attune_to_item(
    item: &MagicItem,
    character_class: Option<&str>,
    _character_race: Option<&str>,
    character_alignment: Option<&str>,
) -> AttunementEligibility {
    if !item.requires_attunement {
        return AttunementEligibility::allowed();
    }

    let desc = item.description.to_lowercase();

    if let Some(class) = character_class {
        if let Some(caps) = CLASS_REQUIREMENT.captures(&desc) {
            let requirements = &caps[1];
            let allowed_classes: Vec<&str> = REQUIREMENT_SEPARATOR
                .split(requirements)
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .collect();

            let class_lower = class.to_lowercase();
            let is_allowed = allowed_classes.iter().any(|req_class| {
                let req_lower = req_class.to_lowercase();
                req_lower == class_lower || class_lower.contains(&req_lower)
            });

            if !is_allowed {
                return AttunementEligibility::rejected(format!(
                    "Requires attunement by a {requirements}"
                ));
            }
        }
    }

    if let Some(alignment) = character_alignment {
        if desc.contains("alignment") {
            let alignment_lower = alignment.to_lowercase();
            for word in ALIGNMENT_WORDS {
                if desc.contains(&format!("{word} creature"))
                    || desc.contains(&format!("{word} alignment"))
                {
                    if !alignment_lower.contains(word) {
                        return AttunementEligibility::rejected(format!(
                            "Requires {word} alignment"
                        ));
                    }
                }
            }
        }
    }

    AttunementEligibility::allowed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn attunable(name: &str) -> MagicItem {
        MagicItem {
            name: name.to_string(),
            rarity: crate::srd::magic_items::Rarity::Rare,
            item_type: "Wondrous Item".to_string(),
            requires_attunement: true,
            description: "A test item.".to_string(),
            properties: None,
        }
    }

    fn mundane(name: &str) -> MagicItem {
        MagicItem {
            requires_attunement: false,
            ..attunable(name)
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("valid timestamp")
    }

    #[test]
    fn attune_appends_in_order() {
        let record = CharacterAttunement::new("pc-1");
        let record = record.attune(&attunable("Ring of Protection"), now()).expect("first");
        let record = record.attune(&attunable("Amulet of Health"), now()).expect("second");

        assert_eq!(
            record.attuned_item_names(),
            vec!["Ring of Protection", "Amulet of Health"]
        );
        assert_eq!(record.available_slots(), 1);
    }

    #[test]
    fn original_record_is_untouched_by_attune() {
        let record = CharacterAttunement::new("pc-1");
        let _updated = record.attune(&attunable("Ring of Protection"), now()).expect("attune");
        assert!(record.attuned_items.is_empty());
    }

    #[test]
    fn fourth_attune_on_full_record_fails() {
        let mut record = CharacterAttunement::new("pc-1");
        for name in ["A", "B", "C"] {
            record = record.attune(&attunable(name), now()).expect("within capacity");
        }

        let err = record.attune(&attunable("D"), now()).unwrap_err();
        assert_eq!(err, AttunementError::NoAvailableSlots { used: 3, total: 3 });
        assert_eq!(
            err.to_string(),
            "No available attunement slots (3/3). Break attunement to another item first."
        );
    }

    #[test]
    fn duplicate_attune_fails() {
        let record = CharacterAttunement::new("pc-1")
            .attune(&attunable("Cloak of Displacement"), now())
            .expect("attune");
        let err = record.attune(&attunable("Cloak of Displacement"), now()).unwrap_err();
        assert_eq!(err.to_string(), "Already attuned to Cloak of Displacement");
    }

    #[test]
    fn non_attunement_item_is_rejected() {
        let record = CharacterAttunement::new("pc-1");
        let err = record.attune(&mundane("Bag of Holding"), now()).unwrap_err();
        assert_eq!(err.to_string(), "Bag of Holding does not require attunement");
    }

    #[test]
    fn break_then_reattune_succeeds() {
        let mut record = CharacterAttunement::new("pc-1");
        for name in ["A", "B", "C"] {
            record = record.attune(&attunable(name), now()).expect("within capacity");
        }

        let record = record.break_attunement("B").expect("break");
        assert_eq!(record.attuned_item_names(), vec!["A", "C"]);

        let record = record.attune(&attunable("B"), now()).expect("slot was freed");
        assert_eq!(record.attuned_items.len(), 3);
    }

    #[test]
    fn break_unknown_item_fails() {
        let record = CharacterAttunement::new("pc-1");
        let err = record.break_attunement("Flame Tongue").unwrap_err();
        assert_eq!(err.to_string(), "Not attuned to Flame Tongue");
    }

    #[test]
    fn replace_works_on_a_full_record() {
        let mut record = CharacterAttunement::new("pc-1");
        for name in ["A", "B", "C"] {
            record = record.attune(&attunable(name), now()).expect("within capacity");
        }

        let record = record.replace("A", &attunable("D"), now()).expect("replace");
        assert_eq!(record.attuned_item_names(), vec!["B", "C", "D"]);
    }

    #[test]
    fn custom_slot_count_is_respected() {
        let record = CharacterAttunement::with_max_slots("pc-1", 1)
            .attune(&attunable("A"), now())
            .expect("attune");
        assert!(!record.has_available_slot());
        let err = record.attune(&attunable("B"), now()).unwrap_err();
        assert_eq!(err, AttunementError::NoAvailableSlots { used: 1, total: 1 });
    }

    #[test]
    fn class_restriction_parses_comma_or_list() {
        let mut staff = attunable("Staff of the Magi");
        staff.description =
            "This staff can be wielded as a magic quarterstaff. (Requires attunement by a sorcerer, warlock, or wizard.)"
                .to_string();

        assert!(can_attune_to_item(&staff, Some("wizard"), None, None).can_attune);
        assert!(can_attune_to_item(&staff, Some("Warlock"), None, None).can_attune);

        let rejected = can_attune_to_item(&staff, Some("fighter"), None, None);
        assert!(!rejected.can_attune);
        assert_eq!(
            rejected.reason.as_deref(),
            Some("Requires attunement by a sorcerer, warlock, or wizard")
        );
    }

    #[test]
    fn alignment_restriction_uses_substring_match() {
        let mut talisman = attunable("Talisman of Pure Good");
        talisman.description =
            "A creature of good alignment that wears this talisman gains its blessing.".to_string();

        assert!(can_attune_to_item(&talisman, None, None, Some("Lawful Good")).can_attune);

        let rejected = can_attune_to_item(&talisman, None, None, Some("Neutral Evil"));
        assert!(!rejected.can_attune);
        assert_eq!(rejected.reason.as_deref(), Some("Requires good alignment"));
    }

    #[test]
    fn unrestricted_attunement_item_allows_any_class() {
        let item = attunable("Amulet of Health");
        assert!(can_attune_to_item(&item, Some("fighter"), None, Some("Chaotic Neutral")).can_attune);
    }

    #[test]
    fn non_attunement_item_is_always_eligible() {
        let item = mundane("Bag of Holding");
        assert!(can_attune_to_item(&item, Some("fighter"), None, None).can_attune);
    }

    #[test]
    fn summary_lists_items_with_age() {
        let attuned_at = Utc.with_ymd_and_hms(2024, 5, 29, 12, 0, 0).single().expect("valid");
        let record = CharacterAttunement::new("pc-1")
            .attune(&attunable("Sun Blade"), attuned_at)
            .expect("attune");

        let summary = record.summary(now());
        assert!(summary.starts_with("Attunement Slots: 1/3 used, 2 available"));
        assert!(summary.contains("1. Sun Blade (3d ago)"));
    }

    #[test]
    fn summary_reports_empty_record() {
        let record = CharacterAttunement::new("pc-1");
        assert!(record.summary(now()).contains("No attuned items"));
    }
}
