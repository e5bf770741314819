//! The pattern library: every static rule table the extractors consult.
//!
//! A [`PatternLibrary`] is built once (from the built-in tables plus any
//! caller-supplied additions) and then shared read-only, usually behind an
//! `Arc`, by the role and acronym pipelines. Nothing mutates it after
//! [`PatternLibraryBuilder::build`].
//!
//! ```rust
//! use docent::library::PatternLibrary;
//!
//! let lib = PatternLibrary::builder()
//!     .custom_roles(["Flight Readiness Reviewer"])
//!     .build();
//! assert!(lib.is_known_role("flight readiness reviewer"));
//! assert_eq!(lib.alias("sys engineer"), Some("Systems Engineer"));
//! ```

mod acronyms;
pub(crate) mod roles;

use crate::config::ExtractionConfig;
use crate::Error;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// Immutable role and acronym rule tables.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    /// lowercase → display name
    known_roles: BTreeMap<String, String>,
    /// lowercase surface form → canonical display name
    aliases: BTreeMap<String, String>,
    acronym_roles: BTreeSet<String>,
    /// lowercase word → confidence
    single_word_roles: BTreeMap<String, f64>,
    suffixes: BTreeSet<String>,
    modifiers: BTreeSet<String>,
    false_positives: BTreeSet<String>,
    organizations: BTreeSet<String>,
    stopwords: BTreeSet<String>,
    deliverables: BTreeSet<String>,
    leading_noise: BTreeSet<String>,
    trailing_noise: BTreeSet<String>,
    /// lowercase → upper-case form
    uppercase_words: BTreeMap<String, String>,
    acronym_dictionary: BTreeMap<String, String>,
    non_acronyms: BTreeSet<String>,
    case_sensitive: bool,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PatternLibrary {
    /// Library with only the built-in tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a library with caller additions.
    #[must_use]
    pub fn builder() -> PatternLibraryBuilder {
        PatternLibraryBuilder::default()
    }

    /// Library carrying the additions named in `config`.
    #[must_use]
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::builder()
            .custom_roles(config.custom_roles.iter().cloned())
            .custom_false_positives(config.custom_false_positives.iter().cloned())
            .custom_acronyms(config.custom_dictionary.clone())
            .use_default_dictionary(config.use_default_dictionary)
            .case_sensitive(config.case_sensitive)
            .build()
    }

    // =========================================================================
    // Roles
    // =========================================================================

    /// Display name of a known role, looked up case-insensitively.
    #[must_use]
    pub fn known_role(&self, name: &str) -> Option<&str> {
        self.known_roles.get(&normalize_key(name)).map(String::as_str)
    }

    /// Whether `name` is in the known-role dictionary.
    #[must_use]
    pub fn is_known_role(&self, name: &str) -> bool {
        self.known_roles.contains_key(&normalize_key(name))
    }

    /// Canonical display name registered for an alias.
    #[must_use]
    pub fn alias(&self, surface: &str) -> Option<&str> {
        self.aliases.get(&normalize_key(surface)).map(String::as_str)
    }

    /// Whether `name` is an organizational title acronym (exact case).
    #[must_use]
    pub fn is_acronym_role(&self, name: &str) -> bool {
        self.acronym_roles.contains(name.trim())
    }

    /// Confidence for a domain single-word role, if `word` is one.
    #[must_use]
    pub fn single_word_role(&self, word: &str) -> Option<f64> {
        self.single_word_roles.get(&normalize_key(word)).copied()
    }

    /// Whether `word` is a role suffix.
    #[must_use]
    pub fn is_suffix(&self, word: &str) -> bool {
        self.suffixes.contains(&word.to_lowercase())
    }

    /// Whether `word` is a role modifier.
    #[must_use]
    pub fn is_modifier(&self, word: &str) -> bool {
        self.modifiers.contains(&word.to_lowercase())
    }

    /// Whether `phrase` is a registered false positive.
    #[must_use]
    pub fn is_false_positive(&self, phrase: &str) -> bool {
        self.false_positives.contains(&normalize_key(phrase))
    }

    /// Whether `phrase` names an organization rather than a role.
    #[must_use]
    pub fn is_organization(&self, phrase: &str) -> bool {
        let key = normalize_key(phrase);
        self.organizations.contains(&key)
            || key.ends_with(" agency")
            || key.ends_with(" administration")
    }

    /// Whether `word` may never stand alone as a role.
    #[must_use]
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&normalize_key(word))
    }

    /// Whether `word` is a work-product noun.
    #[must_use]
    pub fn is_deliverable_noun(&self, word: &str) -> bool {
        self.deliverables.contains(&word.to_lowercase())
    }

    /// Whether `word` is a sentence-fragment signal at the start of a phrase.
    #[must_use]
    pub fn is_leading_noise(&self, word: &str) -> bool {
        self.leading_noise.contains(&word.to_lowercase())
    }

    /// Whether `word` is a sentence-fragment signal at the end of a phrase.
    #[must_use]
    pub fn is_trailing_noise(&self, word: &str) -> bool {
        self.trailing_noise.contains(&word.to_lowercase())
    }

    /// Upper-case form of an abbreviation that must stay upper-case.
    #[must_use]
    pub fn uppercase_form(&self, word: &str) -> Option<&str> {
        self.uppercase_words.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Known roles as (lowercase key, display name).
    pub fn known_roles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.known_roles.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Aliases as (lowercase surface form, canonical display name).
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Terms scanned in strict mode, paired with the canonical name they
    /// report under: known roles and aliases, minus false positives and
    /// organizations. Sorted longest first.
    #[must_use]
    pub fn whitelist_terms(&self) -> Vec<(String, String)> {
        let mut terms: Vec<(String, String)> = self
            .known_roles
            .iter()
            .chain(self.aliases.iter())
            .filter(|(k, _)| !self.is_false_positive(k) && !self.is_organization(k))
            // bare two-letter alias keys ("co", "pi") are too ambiguous for exact scanning
            .filter(|(k, _)| k.len() > 2)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        terms.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        terms.dedup_by(|a, b| a.0 == b.0);
        terms
    }

    /// Title-case `text`, keeping registered abbreviations upper-case.
    ///
    /// Words already written fully upper-case (two letters or more) are kept.
    #[must_use]
    pub fn display_case(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| {
                if let Some(upper) = self.uppercase_form(word) {
                    return upper.to_string();
                }
                let letters = word.chars().filter(|c| c.is_alphabetic()).count();
                if letters >= 2 && word.chars().all(|c| !c.is_lowercase()) {
                    return word.to_string();
                }
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    // =========================================================================
    // Acronyms
    // =========================================================================

    /// Dictionary expansion for an acronym.
    #[must_use]
    pub fn acronym_expansion(&self, acronym: &str) -> Option<&str> {
        self.acronym_dictionary
            .get(&self.acronym_key(acronym))
            .map(String::as_str)
    }

    /// Key an acronym is stored under: exact when case-sensitive,
    /// upper-cased otherwise.
    #[must_use]
    pub fn acronym_key(&self, acronym: &str) -> String {
        if self.case_sensitive {
            acronym.trim().to_string()
        } else {
            acronym.trim().to_uppercase()
        }
    }

    /// Whether acronym matching is case-sensitive.
    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Whether an upper-case token is an ordinary word, never an acronym.
    #[must_use]
    pub fn is_non_acronym(&self, token: &str) -> bool {
        self.non_acronyms.contains(&token.to_uppercase())
    }

    /// Number of acronym dictionary entries.
    #[must_use]
    pub fn dictionary_len(&self) -> usize {
        self.acronym_dictionary.len()
    }
}

/// Compile one rule pattern. A rule that fails to compile is logged and
/// disabled; the remaining rules keep working.
pub(crate) fn compile_rule(name: &str, source: &str) -> Option<Regex> {
    match Regex::new(source) {
        Ok(re) => Some(re),
        Err(e) => {
            let err = Error::from(e);
            log::warn!("rule {} disabled: {}", name, err);
            None
        }
    }
}

/// Lowercased, whitespace-collapsed lookup key.
pub(crate) fn normalize_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Additive construction of a [`PatternLibrary`].
#[derive(Debug, Clone)]
pub struct PatternLibraryBuilder {
    custom_roles: Vec<String>,
    custom_false_positives: Vec<String>,
    custom_acronyms: BTreeMap<String, String>,
    use_default_dictionary: bool,
    case_sensitive: bool,
}

impl Default for PatternLibraryBuilder {
    fn default() -> Self {
        Self {
            custom_roles: Vec::new(),
            custom_false_positives: Vec::new(),
            custom_acronyms: BTreeMap::new(),
            use_default_dictionary: true,
            case_sensitive: false,
        }
    }
}

impl PatternLibraryBuilder {
    /// Add known roles.
    #[must_use]
    pub fn custom_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Add false positives.
    #[must_use]
    pub fn custom_false_positives<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_false_positives
            .extend(items.into_iter().map(Into::into));
        self
    }

    /// Add acronym expansions. Custom entries override built-in ones.
    #[must_use]
    pub fn custom_acronyms<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_acronyms
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Whether the built-in acronym dictionary is included.
    #[must_use]
    pub fn use_default_dictionary(mut self, yes: bool) -> Self {
        self.use_default_dictionary = yes;
        self
    }

    /// Case-sensitive acronym keys.
    #[must_use]
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// Freeze the tables.
    #[must_use]
    pub fn build(self) -> PatternLibrary {
        let lower_set = |items: &[&str]| -> BTreeSet<String> {
            items.iter().map(|s| s.to_lowercase()).collect()
        };

        let uppercase_words: BTreeMap<String, String> = roles::UPPERCASE_WORDS
            .iter()
            .map(|w| (w.to_lowercase(), (*w).to_string()))
            .collect();

        let mut lib = PatternLibrary {
            known_roles: BTreeMap::new(),
            aliases: roles::ROLE_ALIASES
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            acronym_roles: roles::ACRONYM_ROLES.iter().map(|s| (*s).to_string()).collect(),
            single_word_roles: BTreeMap::new(),
            suffixes: lower_set(roles::ROLE_SUFFIXES),
            modifiers: lower_set(roles::ROLE_MODIFIERS),
            false_positives: lower_set(roles::FALSE_POSITIVES),
            organizations: lower_set(roles::ORGANIZATIONS),
            stopwords: lower_set(roles::SINGLE_WORD_STOPWORDS),
            deliverables: lower_set(roles::DELIVERABLE_NOUNS),
            leading_noise: lower_set(roles::LEADING_NOISE),
            trailing_noise: lower_set(roles::TRAILING_NOISE),
            uppercase_words,
            acronym_dictionary: BTreeMap::new(),
            non_acronyms: acronyms::NON_ACRONYMS.iter().map(|s| (*s).to_string()).collect(),
            case_sensitive: self.case_sensitive,
        };

        for (words, confidence) in [
            (roles::WORKFORCE_ROLES, 0.85),
            (roles::ACADEMIC_ROLES, 0.86),
            (roles::DEFENSE_ROLES, 0.88),
        ] {
            for w in words {
                lib.single_word_roles.insert((*w).to_string(), confidence);
            }
        }

        for role in roles::KNOWN_ROLES {
            let display = lib.display_case(role);
            lib.known_roles.insert((*role).to_string(), display);
        }
        for role in &self.custom_roles {
            let key = normalize_key(role);
            if key.is_empty() {
                continue;
            }
            let display = lib.display_case(role);
            lib.false_positives.remove(&key);
            lib.known_roles.insert(key, display);
        }
        for fp in &self.custom_false_positives {
            let key = normalize_key(fp);
            if !key.is_empty() {
                lib.false_positives.insert(key);
            }
        }

        if self.use_default_dictionary {
            for (acr, exp) in acronyms::ACRONYM_DICTIONARY {
                let key = lib.acronym_key(acr);
                lib.acronym_dictionary.insert(key, (*exp).to_string());
            }
        }
        for (acr, exp) in &self.custom_acronyms {
            let key = lib.acronym_key(acr);
            if !key.is_empty() {
                lib.acronym_dictionary.insert(key, exp.trim().to_string());
            }
        }

        log::debug!(
            "pattern library: {} known roles, {} aliases, {} acronyms",
            lib.known_roles.len(),
            lib.aliases.len(),
            lib.acronym_dictionary.len()
        );
        lib
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broken_rule_is_disabled_not_fatal() {
        assert!(compile_rule("broken", "(unclosed").is_none());
        assert!(compile_rule("ok", r"\bPM\b").is_some());
    }

    #[test]
    fn builtin_lookups_are_case_insensitive() {
        let lib = PatternLibrary::new();
        assert_eq!(lib.known_role("SYSTEMS   engineer"), Some("Systems Engineer"));
        assert_eq!(lib.alias("System Engineer"), Some("Systems Engineer"));
        assert!(lib.is_false_positive("Configuration Management"));
        assert!(lib.is_organization("NASA"));
        assert!(lib.is_organization("Missile Defense Agency"));
        assert!(lib.is_stopword("Review"));
    }

    #[test]
    fn acronym_roles_need_exact_case() {
        let lib = PatternLibrary::new();
        assert!(lib.is_acronym_role("COR"));
        assert!(!lib.is_acronym_role("cor"));
    }

    #[test]
    fn custom_additions_are_additive() {
        let lib = PatternLibrary::builder()
            .custom_roles(["Range Safety Officer", "configuration management"])
            .custom_false_positives(["Safety Officer Handbook"])
            .custom_acronyms([("RSO", "Range Safety Officer")])
            .build();
        assert_eq!(lib.known_role("range safety officer"), Some("Range Safety Officer"));
        assert!(lib.is_known_role("systems engineer"));
        // a custom role overrides a built-in false positive
        assert!(!lib.is_false_positive("configuration management"));
        assert!(lib.is_false_positive("safety officer handbook"));
        assert_eq!(lib.acronym_expansion("RSO"), Some("Range Safety Officer"));
        assert_eq!(lib.acronym_expansion("PDR"), Some("Preliminary Design Review"));
    }

    #[test]
    fn minimal_dictionary() {
        let lib = PatternLibrary::builder()
            .use_default_dictionary(false)
            .custom_acronyms([("XYZ", "Xeno Yield Zone")])
            .build();
        assert_eq!(lib.dictionary_len(), 1);
        assert!(lib.acronym_expansion("PDR").is_none());
        assert_eq!(lib.acronym_expansion("xyz"), Some("Xeno Yield Zone"));
    }

    #[test]
    fn case_sensitive_dictionary() {
        let lib = PatternLibrary::builder().case_sensitive(true).build();
        assert_eq!(lib.acronym_expansion("DoD"), Some("Department of Defense"));
        assert!(lib.acronym_expansion("DOD").is_none());
        let folded = PatternLibrary::new();
        assert_eq!(folded.acronym_expansion("dod"), Some("Department of Defense"));
    }

    #[test]
    fn display_case_keeps_abbreviations() {
        let lib = PatternLibrary::new();
        assert_eq!(lib.display_case("qa   manager"), "QA Manager");
        assert_eq!(lib.display_case("iv&v agent"), "IV&V Agent");
        assert_eq!(lib.display_case("contracting officer's representative"), "Contracting Officer's Representative");
        assert_eq!(lib.display_case("SYSTEMS ENGINEER"), "SYSTEMS ENGINEER");
    }

    #[test]
    fn whitelist_excludes_false_positives_and_short_aliases() {
        let lib = PatternLibrary::builder()
            .custom_false_positives(["test engineer"])
            .build();
        let terms = lib.whitelist_terms();
        assert!(terms.iter().any(|(k, _)| k == "systems engineer"));
        assert!(!terms.iter().any(|(k, _)| k == "test engineer"));
        assert!(!terms.iter().any(|(k, _)| k == "co"));
        // longest first
        assert!(terms.windows(2).all(|w| w[0].0.len() >= w[1].0.len()));
    }
}
