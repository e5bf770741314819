//! Canonical role names.
//!
//! Surface forms are mapped to one display name, in order:
//!
//! 1. whitespace collapse, possessive strip, and (for all-caps phrases)
//!    case folding
//! 2. alias table ("Sys Engineer" → "Systems Engineer")
//! 3. known-role dictionary
//! 4. plural role suffix → singular ("Test Engineers" → "Test Engineer")
//! 5. near-miss match against known roles with trailing `s` stripped from
//!    every word ("System Engineer" ~ "Systems Engineer")
//! 6. title case, abbreviations kept upper-case

use crate::library::PatternLibrary;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Maps role surface forms to canonical display names.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    lib: Arc<PatternLibrary>,
    /// suffix-normalized key → display name
    near_miss: BTreeMap<String, String>,
}

impl Canonicalizer {
    /// Create a canonicalizer over `lib`.
    #[must_use]
    pub fn new(lib: Arc<PatternLibrary>) -> Self {
        let mut near_miss = BTreeMap::new();
        for (key, display) in lib.known_roles() {
            near_miss
                .entry(strip_plurals(key))
                .or_insert_with(|| display.to_string());
        }
        Self { lib, near_miss }
    }

    /// Surface form as recorded in `variants`: whitespace collapsed,
    /// possessive removed.
    #[must_use]
    pub fn surface(text: &str) -> String {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        for possessive in ["'s", "’s"] {
            if let Some(stripped) = collapsed.strip_suffix(possessive) {
                return stripped.to_string();
            }
        }
        collapsed
    }

    /// Canonical display name for `text`.
    #[must_use]
    pub fn canonicalize(&self, text: &str) -> String {
        let lib = &self.lib;
        let mut surface = Self::surface(text);
        if surface.is_empty() {
            return surface;
        }
        if lib.is_acronym_role(&surface) {
            return lib.alias(&surface).map_or(surface, str::to_string);
        }
        let multi_word = surface.contains(' ');
        if multi_word && !surface.chars().any(char::is_lowercase) {
            surface = surface.to_lowercase();
        }

        if let Some(name) = self.lookup(&surface) {
            return name;
        }
        let singular = self.singularize(&surface);
        if let Some(name) = self.lookup(&singular) {
            return name;
        }
        if let Some(name) = self.near_miss.get(&strip_plurals(&singular.to_lowercase())) {
            return name.clone();
        }
        lib.display_case(&singular)
    }

    fn lookup(&self, text: &str) -> Option<String> {
        self.lib
            .alias(text)
            .or_else(|| self.lib.known_role(text))
            .map(str::to_string)
    }

    /// Singularize a plural role suffix in last position.
    fn singularize(&self, text: &str) -> String {
        let (head, last) = text.rsplit_once(' ').unwrap_or(("", text));
        let lower = last.to_lowercase();
        let cut = if lower.ends_with("es") && self.lib.is_suffix(&lower[..lower.len() - 2]) {
            2
        } else if lower.ends_with('s') && self.lib.is_suffix(&lower[..lower.len() - 1]) {
            1
        } else {
            0
        };
        if cut == 0 {
            return text.to_string();
        }
        let stem = &last[..last.len() - cut];
        if head.is_empty() {
            stem.to_string()
        } else {
            format!("{} {}", head, stem)
        }
    }
}

/// Lowercase key with a trailing `s` removed from every word.
fn strip_plurals(key: &str) -> String {
    key.split_whitespace()
        .map(|w| w.strip_suffix('s').filter(|b| b.len() > 2).unwrap_or(w))
        .collect::<Vec<_>>()
        .join(" ")
}
