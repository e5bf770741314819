//! Acronym entries and the consistency findings derived from them.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Definition state of an acronym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcronymStatus {
    /// Defined in the document.
    Defined,
    /// Used but never defined and not in the dictionary.
    Undefined,
    /// Not defined in the document but found in the dictionary.
    Known,
    /// Defined more than once with differing expansions.
    Inconsistent,
}

impl AcronymStatus {
    /// Lowercase label used in reports.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::Defined => "defined",
            Self::Undefined => "undefined",
            Self::Known => "known",
            Self::Inconsistent => "inconsistent",
        }
    }
}

impl fmt::Display for AcronymStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Where an acronym's expansion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionSource {
    /// Recovered by the Schwartz-Hearst long-form search.
    SchwartzHearst,
    /// One of the static definition patterns.
    Pattern,
    /// The acronym dictionary.
    Dictionary,
    /// Seen only as a usage; no expansion.
    Usage,
}

impl DefinitionSource {
    /// Lowercase label used in reports.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::SchwartzHearst => "schwartz_hearst",
            Self::Pattern => "pattern",
            Self::Dictionary => "dictionary",
            Self::Usage => "usage",
        }
    }
}

/// Everything known about one acronym in one document.
///
/// Invariants (maintained by the extractor): `status == Inconsistent` iff
/// `alternatives` is non-empty, and `status == Undefined` iff `expansion`
/// is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcronymEntry {
    /// The short form.
    pub acronym: String,
    /// The accepted long form.
    pub expansion: Option<String>,
    /// Definition state.
    pub status: AcronymStatus,
    /// Character offset of the first definition.
    pub definition_location: Option<usize>,
    /// Character offsets of every standalone usage, ascending.
    pub usage_locations: Vec<usize>,
    /// Confidence in `expansion`.
    pub confidence: f64,
    /// Where `expansion` came from.
    pub source: DefinitionSource,
    /// Conflicting expansions seen after the first definition.
    pub alternatives: Vec<String>,
}

impl AcronymEntry {
    /// Entry for an acronym seen only in use.
    #[must_use]
    pub fn undefined(acronym: impl Into<String>) -> Self {
        Self {
            acronym: acronym.into(),
            expansion: None,
            status: AcronymStatus::Undefined,
            definition_location: None,
            usage_locations: Vec::new(),
            confidence: 0.5,
            source: DefinitionSource::Usage,
            alternatives: Vec::new(),
        }
    }

    /// Number of recorded usages.
    #[must_use]
    pub fn usage_count(&self) -> usize {
        self.usage_locations.len()
    }

    /// First usage offset, if any.
    #[must_use]
    pub fn first_usage(&self) -> Option<usize> {
        self.usage_locations.iter().copied().min()
    }

    /// True when the acronym has a definition and no usage precedes it.
    #[must_use]
    pub fn defined_before_use(&self) -> bool {
        match (self.definition_location, self.first_usage()) {
            (Some(def), Some(first)) => first >= def,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// JSON rendering with every field plus `usage_count` and `defined_before_use`.
    #[must_use]
    pub fn to_dict(&self) -> Value {
        json!({
            "acronym": self.acronym,
            "expansion": self.expansion,
            "status": self.status.as_label(),
            "definition_location": self.definition_location,
            "usage_locations": self.usage_locations,
            "usage_count": self.usage_count(),
            "defined_before_use": self.defined_before_use(),
            "confidence": self.confidence,
            "source": self.source.as_label(),
            "alternatives": self.alternatives,
        })
    }
}

/// Category of an acronym consistency finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Never defined and not in the dictionary.
    Undefined,
    /// Used before its definition.
    UsedBeforeDefined,
    /// Defined with more than one expansion.
    MultipleDefinitions,
}

impl IssueType {
    /// Snake-case label used in reports.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::UsedBeforeDefined => "used_before_defined",
            Self::MultipleDefinitions => "multiple_definitions",
        }
    }
}

/// Severity of a finding. Ordered so that errors sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Must be fixed.
    Error,
    /// Should be reviewed.
    Warning,
    /// Informational.
    Info,
}

impl Severity {
    /// Lowercase label used in reports.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// A structured finding about acronym usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyIssue {
    /// The acronym concerned.
    pub acronym: String,
    /// What is wrong.
    pub issue_type: IssueType,
    /// Human-readable description.
    pub message: String,
    /// Relevant character offsets.
    pub locations: Vec<usize>,
    /// How serious it is.
    pub severity: Severity,
}

impl ConsistencyIssue {
    /// JSON rendering.
    #[must_use]
    pub fn to_dict(&self) -> Value {
        json!({
            "acronym": self.acronym,
            "issue_type": self.issue_type.as_label(),
            "message": self.message,
            "locations": self.locations,
            "severity": self.severity.as_label(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_entry_defaults() {
        let e = AcronymEntry::undefined("PDR");
        assert_eq!(e.status, AcronymStatus::Undefined);
        assert!(e.expansion.is_none());
        assert_eq!(e.source, DefinitionSource::Usage);
        assert!(!e.defined_before_use());
    }

    #[test]
    fn defined_before_use_compares_first_usage() {
        let mut e = AcronymEntry::undefined("SE");
        e.expansion = Some("Systems Engineer".into());
        e.status = AcronymStatus::Defined;
        e.definition_location = Some(10);
        e.usage_locations = vec![18, 40];
        assert!(e.defined_before_use());
        e.usage_locations.insert(0, 2);
        assert!(!e.defined_before_use());
    }

    #[test]
    fn severity_sorts_errors_first() {
        let mut v = vec![Severity::Info, Severity::Warning, Severity::Error];
        v.sort();
        assert_eq!(v, vec![Severity::Error, Severity::Warning, Severity::Info]);
    }

    #[test]
    fn dict_labels() {
        let issue = ConsistencyIssue {
            acronym: "QA".into(),
            issue_type: IssueType::MultipleDefinitions,
            message: "x".into(),
            locations: vec![0],
            severity: Severity::Warning,
        };
        let d = issue.to_dict();
        assert_eq!(d["issue_type"], "multiple_definitions");
        assert_eq!(d["severity"], "warning");
    }
}
