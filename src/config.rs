//! Extraction configuration.
//!
//! Configuration is plain data: it can be built in code with the `with_*`
//! methods or loaded from TOML.
//!
//! ```toml
//! extraction_mode = "strict"
//! custom_roles = ["Flight Readiness Reviewer"]
//! custom_false_positives = ["Design Authority Memo"]
//! case_sensitive = false
//!
//! [custom_dictionary]
//! FRR = "Flight Readiness Review"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Default per-segment regex input cap, in characters.
pub const DEFAULT_MAX_SEGMENT_CHARS: usize = 10_000;
/// Default adjacency window for multi-word verification, in characters.
pub const DEFAULT_ADJACENCY_WINDOW: usize = 20;

/// Role extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExtractionMode {
    /// Recall-oriented: pattern cascade, validation, canonicalization, verification.
    #[default]
    Discovery,
    /// Precision-oriented: exact whitelist matches only.
    Strict,
}

impl ExtractionMode {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionMode {
    type Err = std::convert::Infallible;

    /// Unrecognized names fall back to `Discovery`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Self::Strict,
            _ => Self::Discovery,
        })
    }
}

impl From<String> for ExtractionMode {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<ExtractionMode> for String {
    fn from(mode: ExtractionMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Settings for one analyzer instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Discovery or strict role extraction.
    pub extraction_mode: ExtractionMode,
    /// Extra known roles, added to the built-in dictionary.
    pub custom_roles: Vec<String>,
    /// Extra false positives, added to the built-in list.
    pub custom_false_positives: Vec<String>,
    /// Extra acronym expansions, added to the built-in dictionary.
    pub custom_dictionary: BTreeMap<String, String>,
    /// Whether the built-in acronym dictionary is consulted at all.
    pub use_default_dictionary: bool,
    /// Case-sensitive acronym matching.
    pub case_sensitive: bool,
    /// Cap on each regex input segment, in characters.
    pub max_segment_chars: usize,
    /// Window for out-of-order multi-word verification, in characters.
    pub adjacency_window: usize,
    /// Roles whose mean confidence falls below this are dropped.
    pub min_avg_confidence: f64,
    /// Discovered single-word roles need at least this many occurrences.
    pub min_single_word_frequency: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            extraction_mode: ExtractionMode::Discovery,
            custom_roles: Vec::new(),
            custom_false_positives: Vec::new(),
            custom_dictionary: BTreeMap::new(),
            use_default_dictionary: true,
            case_sensitive: false,
            max_segment_chars: DEFAULT_MAX_SEGMENT_CHARS,
            adjacency_window: DEFAULT_ADJACENCY_WINDOW,
            min_avg_confidence: 0.4,
            min_single_word_frequency: 3,
        }
    }
}

impl ExtractionConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    fn validated(self) -> Result<Self> {
        if self.max_segment_chars == 0 {
            return Err(Error::config("max_segment_chars must be positive"));
        }
        if !(0.0..=1.0).contains(&self.min_avg_confidence) {
            return Err(Error::config(format!(
                "min_avg_confidence must be within [0, 1], got {}",
                self.min_avg_confidence
            )));
        }
        Ok(self)
    }

    /// Set the extraction mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ExtractionMode) -> Self {
        self.extraction_mode = mode;
        self
    }

    /// Add known roles.
    #[must_use]
    pub fn with_custom_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Add false positives.
    #[must_use]
    pub fn with_custom_false_positives<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_false_positives
            .extend(items.into_iter().map(Into::into));
        self
    }

    /// Add one acronym expansion.
    #[must_use]
    pub fn with_acronym(mut self, acronym: impl Into<String>, expansion: impl Into<String>) -> Self {
        self.custom_dictionary.insert(acronym.into(), expansion.into());
        self
    }

    /// Consult only the custom acronym dictionary.
    #[must_use]
    pub fn without_default_dictionary(mut self) -> Self {
        self.use_default_dictionary = false;
        self
    }

    /// Toggle case-sensitive acronym matching.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set the multi-word verification window.
    #[must_use]
    pub fn with_adjacency_window(mut self, window: usize) -> Self {
        self.adjacency_window = window;
        self
    }

    /// Set the per-segment regex input cap.
    #[must_use]
    pub fn with_max_segment_chars(mut self, max: usize) -> Self {
        self.max_segment_chars = max.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mode_defaults_to_discovery() {
        assert_eq!("strict".parse::<ExtractionMode>().unwrap(), ExtractionMode::Strict);
        assert_eq!(" STRICT ".parse::<ExtractionMode>().unwrap(), ExtractionMode::Strict);
        assert_eq!("aggressive".parse::<ExtractionMode>().unwrap(), ExtractionMode::Discovery);
        assert_eq!("".parse::<ExtractionMode>().unwrap(), ExtractionMode::Discovery);
    }

    #[test]
    fn toml_round_trip_of_fields() {
        let cfg = ExtractionConfig::from_toml_str(
            r#"
            extraction_mode = "strict"
            custom_roles = ["Flight Readiness Reviewer"]
            case_sensitive = true
            adjacency_window = 25

            [custom_dictionary]
            FRR = "Flight Readiness Review"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.extraction_mode, ExtractionMode::Strict);
        assert_eq!(cfg.custom_roles, vec!["Flight Readiness Reviewer"]);
        assert!(cfg.case_sensitive);
        assert_eq!(cfg.adjacency_window, 25);
        assert_eq!(cfg.custom_dictionary["FRR"], "Flight Readiness Review");
        assert_eq!(cfg.max_segment_chars, DEFAULT_MAX_SEGMENT_CHARS);
    }

    #[test]
    fn invalid_mode_in_toml_is_not_an_error() {
        let cfg = ExtractionConfig::from_toml_str(r#"extraction_mode = "turbo""#).unwrap();
        assert_eq!(cfg.extraction_mode, ExtractionMode::Discovery);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = ExtractionConfig::from_toml_str("extraction_mode = [").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let err = ExtractionConfig::from_toml_str("min_avg_confidence = 1.5").unwrap_err();
        assert!(err.to_string().contains("min_avg_confidence"));
    }

    #[test]
    fn builder_methods_are_additive() {
        let cfg = ExtractionConfig::new()
            .with_custom_roles(["A Role Lead"])
            .with_custom_roles(vec!["B Role Lead".to_string()])
            .with_acronym("XYZ", "Xeno Yield Zone")
            .without_default_dictionary();
        assert_eq!(cfg.custom_roles.len(), 2);
        assert!(!cfg.use_default_dictionary);
        assert_eq!(cfg.custom_dictionary.len(), 1);
    }
}
