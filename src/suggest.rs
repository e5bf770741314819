//! Optional semantic role suggester.
//!
//! An [`EntitySuggester`] proposes role names a rule cascade might miss.
//! Its output is advisory: a suggestion can raise the confidence of a role
//! the pipeline already found, or enter as a new candidate that still has
//! to pass validation and source verification. Nothing it returns bypasses
//! either.
//!
//! The default is [`NoopSuggester`], which makes the pipeline pattern-only.
//!
//! # Example
//!
//! ```rust
//! use docent::suggest::{EntitySuggester, StaticSuggester, SuggestedEntity};
//!
//! let mut s = StaticSuggester::new("glossary");
//! s.insert(SuggestedEntity::new("Flight Director", 0.9, "glossary"));
//! assert_eq!(s.suggest("any text").unwrap().len(), 1);
//! ```

use crate::Result;
use serde::{Deserialize, Serialize};

/// One suggested role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedEntity {
    /// Role name as the suggester writes it.
    pub name: String,
    /// Suggester confidence in `[0, 1]`.
    pub confidence: f64,
    /// Where the suggestion came from (model or list name).
    pub source_tag: String,
    /// Text the suggestion was drawn from, if any.
    #[serde(default)]
    pub context: Option<String>,
    /// Modifiers the suggester attached ("senior", "deputy", ...).
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl SuggestedEntity {
    /// Suggestion without context or modifiers.
    #[must_use]
    pub fn new(name: impl Into<String>, confidence: f64, source_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            confidence: confidence.clamp(0.0, 1.0),
            source_tag: source_tag.into(),
            context: None,
            modifiers: Vec::new(),
        }
    }
}

/// Capability interface for external role suggestion.
///
/// Implementations must not depend on or mutate pipeline state; they see
/// only the document text.
pub trait EntitySuggester: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether the suggester can run. An unavailable suggester is skipped
    /// with a warning.
    fn is_available(&self) -> bool {
        true
    }

    /// Suggest roles for `text`.
    fn suggest(&self, text: &str) -> Result<Vec<SuggestedEntity>>;
}

/// Suggests nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSuggester;

impl EntitySuggester for NoopSuggester {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn suggest(&self, _text: &str) -> Result<Vec<SuggestedEntity>> {
        Ok(Vec::new())
    }
}

/// Returns a fixed list of suggestions for every document.
///
/// Useful for glossary-driven enrichment and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggester {
    source: String,
    entries: Vec<SuggestedEntity>,
}

impl StaticSuggester {
    /// Empty suggester tagged with `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entries: Vec::new(),
        }
    }

    /// Add a suggestion.
    pub fn insert(&mut self, entity: SuggestedEntity) {
        self.entries.push(entity);
    }

    /// The source tag.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of suggestions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no suggestions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntitySuggester for StaticSuggester {
    fn name(&self) -> &'static str {
        "static"
    }

    fn suggest(&self, _text: &str) -> Result<Vec<SuggestedEntity>> {
        Ok(self.entries.clone())
    }
}
