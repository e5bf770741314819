//! Role entities: canonical roles and the occurrences that support them.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fmt;

/// What kind of thing an extracted name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A person, office, or body that carries responsibility.
    Role,
    /// A work product (plan, report, specification).
    Deliverable,
    /// Neither signal was strong enough.
    #[default]
    Unknown,
}

impl EntityKind {
    /// Lowercase label used in reports.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Deliverable => "deliverable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Provenance of a role: how curated its origin is.
///
/// Variants are declared in priority order, so `Ord` ranks `Dictionary`
/// highest-priority (smallest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleSource {
    /// Listed in the known-role dictionary.
    Dictionary,
    /// Matched an alias or a curated whitelist set.
    Known,
    /// Found only through pattern discovery.
    Discovered,
}

impl RoleSource {
    /// Lowercase label used in reports.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::Dictionary => "dictionary",
            Self::Known => "known",
            Self::Discovered => "discovered",
        }
    }
}

impl fmt::Display for RoleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Coarse classification of the duty attached to an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// approve, authorize, sign, accept
    Approve,
    /// review, assess, evaluate, audit
    Review,
    /// perform, conduct, execute, implement
    Perform,
    /// coordinate, communicate, liaise, chair
    Coordinate,
    /// verify, validate, test, inspect
    Verify,
    /// manage, lead, oversee, direct, ensure
    Manage,
    /// prepare, develop, submit, provide, maintain
    Produce,
    /// support, assist, participate
    Support,
    /// No recognizable leading verb.
    #[default]
    Other,
}

impl ActionType {
    /// Classify a responsibility phrase by its leading verb.
    ///
    /// Modal and auxiliary words at the front ("shall", "is responsible for")
    /// are skipped before the verb is read.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        const SKIP: &[&str] = &[
            "shall", "will", "must", "should", "may", "is", "are", "be", "responsible",
            "accountable", "for", "to", "also", "then", "directly", "and", "the",
        ];
        let verb = phrase
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .find(|w| !SKIP.contains(&w.as_str()));
        match verb {
            Some(v) => Self::from_verb(&v),
            None => Self::Other,
        }
    }

    fn from_verb(verb: &str) -> Self {
        let stem = |prefixes: &[&str]| prefixes.iter().any(|p| verb.starts_with(p));
        if stem(&["approv", "authoriz", "sign", "accept", "concur", "certif"]) {
            Self::Approve
        } else if stem(&["review", "assess", "evaluat", "audit", "examin"]) {
            Self::Review
        } else if stem(&["verif", "validat", "test", "inspect", "check"]) {
            Self::Verify
        } else if stem(&["perform", "conduct", "execut", "implement", "carr", "operat"]) {
            Self::Perform
        } else if stem(&["coordinat", "communicat", "liais", "chair", "facilitat", "notif"]) {
            Self::Coordinate
        } else if stem(&["manag", "lead", "oversee", "direct", "ensur", "supervis", "control"]) {
            Self::Manage
        } else if stem(&[
            "prepar", "develop", "submit", "provid", "maintain", "document", "deliver", "record",
            "establish", "defin", "creat", "generat", "updat", "writ",
        ]) {
            Self::Produce
        } else if stem(&["support", "assist", "participat", "help", "advis"]) {
            Self::Support
        } else {
            Self::Other
        }
    }

    /// Lowercase label used in reports.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Review => "review",
            Self::Perform => "perform",
            Self::Coordinate => "coordinate",
            Self::Verify => "verify",
            Self::Manage => "manage",
            Self::Produce => "produce",
            Self::Support => "support",
            Self::Other => "other",
        }
    }
}

/// A single sighting of a role in the source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleOccurrence {
    /// Surface text as it appeared.
    pub role_text: String,
    /// Enclosing sentence.
    pub context: String,
    /// Duty phrase inferred from the surrounding clause, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibility: Option<String>,
    /// Classification of `responsibility`.
    pub action_type: ActionType,
    /// Human-readable location ("Paragraph 4", "SOW.docx, paragraph 4").
    pub location: String,
    /// Character offset of `role_text` in the source document.
    pub offset: usize,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Name of the rule that produced this sighting.
    pub pattern: String,
}

/// One canonical role and everything gathered about it.
///
/// `variants` is owned here exclusively; merging aliases only ever adds to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRole {
    /// Normalized display name; the key in any role map.
    pub canonical_name: String,
    /// Role vs deliverable classification.
    pub entity_kind: EntityKind,
    /// Confidence of `entity_kind`.
    pub kind_confidence: f64,
    /// Which rule decided `entity_kind`.
    pub kind_reason: String,
    /// Alternate surface forms merged into this role.
    pub variants: BTreeSet<String>,
    /// Sightings, ordered by offset.
    pub occurrences: Vec<RoleOccurrence>,
    /// Provenance classification.
    pub role_source: RoleSource,
    /// Whether the role was proven present in the source text.
    pub is_verified_in_text: bool,
    /// Character offsets that proved presence, ascending.
    pub text_positions: Vec<usize>,
}

impl ExtractedRole {
    /// Create an empty, unverified role.
    #[must_use]
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            entity_kind: EntityKind::Unknown,
            kind_confidence: 0.0,
            kind_reason: String::new(),
            variants: BTreeSet::new(),
            occurrences: Vec::new(),
            role_source: RoleSource::Discovered,
            is_verified_in_text: false,
            text_positions: Vec::new(),
        }
    }

    /// Number of occurrences.
    #[must_use]
    pub fn frequency(&self) -> usize {
        self.occurrences.len()
    }

    /// Mean occurrence confidence, `0.0` when there are no occurrences.
    #[must_use]
    pub fn avg_confidence(&self) -> f64 {
        if self.occurrences.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.occurrences.iter().map(|o| o.confidence).sum();
        (sum / self.occurrences.len() as f64).clamp(0.0, 1.0)
    }

    /// Distinct responsibility phrases in occurrence order.
    #[must_use]
    pub fn responsibilities(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.occurrences
            .iter()
            .filter_map(|o| o.responsibility.as_deref())
            .filter(|r| seen.insert(*r))
            .collect()
    }

    /// Whether the canonical name is a single word.
    #[must_use]
    pub fn is_single_word(&self) -> bool {
        self.canonical_name.split_whitespace().count() == 1
    }

    /// JSON rendering with every field plus `frequency` and `avg_confidence`.
    #[must_use]
    pub fn to_dict(&self) -> Value {
        let occurrences: Vec<Value> = self
            .occurrences
            .iter()
            .map(|o| {
                json!({
                    "role_text": o.role_text,
                    "context": o.context,
                    "responsibility": o.responsibility,
                    "action_type": o.action_type.as_label(),
                    "location": o.location,
                    "offset": o.offset,
                    "confidence": o.confidence,
                    "pattern": o.pattern,
                })
            })
            .collect();
        json!({
            "canonical_name": self.canonical_name,
            "entity_kind": self.entity_kind.as_label(),
            "kind_confidence": self.kind_confidence,
            "kind_reason": self.kind_reason,
            "variants": self.variants.iter().collect::<Vec<_>>(),
            "occurrences": occurrences,
            "role_source": self.role_source.as_label(),
            "is_verified_in_text": self.is_verified_in_text,
            "text_positions": self.text_positions,
            "frequency": self.frequency(),
            "avg_confidence": self.avg_confidence(),
            "responsibilities": self.responsibilities(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence(offset: usize, confidence: f64, duty: Option<&str>) -> RoleOccurrence {
        RoleOccurrence {
            role_text: "Systems Engineer".into(),
            context: String::new(),
            responsibility: duty.map(str::to_string),
            action_type: ActionType::Other,
            location: "document".into(),
            offset,
            confidence,
            pattern: "test".into(),
        }
    }

    #[test]
    fn derived_fields() {
        let mut role = ExtractedRole::new("Systems Engineer");
        assert_eq!(role.frequency(), 0);
        assert_eq!(role.avg_confidence(), 0.0);

        role.occurrences.push(occurrence(0, 0.9, Some("review the plan")));
        role.occurrences.push(occurrence(40, 0.7, Some("review the plan")));
        assert_eq!(role.frequency(), 2);
        assert!((role.avg_confidence() - 0.8).abs() < 1e-9);
        assert_eq!(role.responsibilities(), vec!["review the plan"]);
    }

    #[test]
    fn to_dict_exposes_all_fields() {
        let mut role = ExtractedRole::new("Program Manager");
        role.variants.insert("PM".into());
        role.occurrences.push(occurrence(3, 1.0, None));
        let dict = role.to_dict();
        for key in [
            "canonical_name",
            "entity_kind",
            "kind_confidence",
            "kind_reason",
            "variants",
            "occurrences",
            "role_source",
            "is_verified_in_text",
            "text_positions",
            "frequency",
            "avg_confidence",
        ] {
            assert!(dict.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(dict["frequency"], 1);
        assert_eq!(dict["role_source"], "discovered");
    }

    #[test]
    fn action_type_reads_leading_verb() {
        assert_eq!(ActionType::from_phrase("shall approve the baseline"), ActionType::Approve);
        assert_eq!(
            ActionType::from_phrase("is responsible for coordinating reviews"),
            ActionType::Coordinate
        );
        assert_eq!(ActionType::from_phrase("verify test results"), ActionType::Verify);
        assert_eq!(ActionType::from_phrase("submit the report"), ActionType::Produce);
        assert_eq!(ActionType::from_phrase(""), ActionType::Other);
        assert_eq!(ActionType::from_phrase("shall"), ActionType::Other);
    }

    #[test]
    fn role_source_priority_order() {
        assert!(RoleSource::Dictionary < RoleSource::Known);
        assert!(RoleSource::Known < RoleSource::Discovered);
    }
}
