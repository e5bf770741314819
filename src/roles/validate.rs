//! Candidate validation, scoring, and role/deliverable classification.
//!
//! [`RoleValidator::score`] is a priority-ordered decision procedure: the
//! first rule that applies decides.
//!
//! | # | Rule | Outcome |
//! |---|------|---------|
//! | 1 | organizational title acronym (exact case) | 0.92 |
//! | 2 | domain single-word role | 0.85-0.88 |
//! | 3 | bad shape (length, word count, digits, noise edges, embedded "the") | reject |
//! | 4 | false positive | reject |
//! | 5 | known role or alias | 0.95 |
//! | 6 | ends in a role suffix | 0.90 / 0.75 / 0.60 / 0.50 |
//! | 7 | multi-word, overlapping a known role (length difference < 15) | 0.70 |
//! | 8 | anything else | reject |

use crate::library::PatternLibrary;
use docent_core::EntityKind;
use std::sync::Arc;

/// Outcome of scoring one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validation {
    /// Confidence in `[0, 1]`; `0.0` when rejected.
    pub confidence: f64,
    /// The rule that decided.
    pub reason: &'static str,
}

impl Validation {
    fn accept(confidence: f64, reason: &'static str) -> Self {
        Self { confidence, reason }
    }

    fn reject(reason: &'static str) -> Self {
        Self {
            confidence: 0.0,
            reason,
        }
    }

    /// Whether the candidate was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.confidence > 0.0
    }
}

/// Scores role candidates against the pattern library.
#[derive(Debug, Clone)]
pub struct RoleValidator {
    lib: Arc<PatternLibrary>,
}

const MIN_CHARS: usize = 4;
const MAX_CHARS: usize = 60;
const MAX_WORDS: usize = 6;
const MAX_DIGIT_RATIO: f64 = 0.3;

impl RoleValidator {
    /// Create a validator over `lib`.
    #[must_use]
    pub fn new(lib: Arc<PatternLibrary>) -> Self {
        Self { lib }
    }

    /// Score a cleaned candidate.
    #[must_use]
    pub fn score(&self, candidate: &str) -> Validation {
        let lib = &self.lib;
        let text = candidate.trim();
        let words: Vec<&str> = text.split_whitespace().collect();

        if lib.is_acronym_role(text) {
            return Validation::accept(0.92, "acronym_role");
        }
        if words.len() == 1 {
            if let Some(conf) = lib.single_word_role(text) {
                return Validation::accept(conf, "domain_word");
            }
        }

        if let Some(reason) = self.shape_problem(text, &words) {
            log::trace!("rejected {:?}: {}", text, reason);
            return Validation::reject(reason);
        }
        if lib.is_false_positive(text) {
            return Validation::reject("false_positive");
        }
        if lib.is_known_role(text) || lib.alias(text).is_some() {
            return Validation::accept(0.95, "known_role");
        }

        if let Some((_, prefix)) = words.split_last().filter(|(last, _)| self.is_suffix_word(last)) {
            let conf = if prefix.is_empty() {
                0.50
            } else if prefix.iter().any(|w| lib.is_modifier(w)) {
                0.90
            } else if prefix.len() <= 2 {
                0.75
            } else {
                0.60
            };
            return Validation::accept(conf, "role_suffix");
        }

        let lower = text.to_lowercase();
        let contained = words.len() > 1
            && lib.known_roles().any(|(known, _)| {
                known.len().abs_diff(lower.len()) < 15
                    && (contains_words(known, &lower) || contains_words(&lower, known))
            });
        if contained {
            return Validation::accept(0.70, "partial_known");
        }
        Validation::reject("no_signal")
    }

    fn shape_problem(&self, text: &str, words: &[&str]) -> Option<&'static str> {
        let chars = text.chars().count();
        if !(MIN_CHARS..=MAX_CHARS).contains(&chars) {
            return Some("length");
        }
        if words.len() > MAX_WORDS {
            return Some("word_count");
        }
        let digits = text.chars().filter(char::is_ascii_digit).count();
        if digits as f64 / chars as f64 > MAX_DIGIT_RATIO {
            return Some("digits");
        }
        if words.first().is_some_and(|w| self.lib.is_leading_noise(w)) {
            return Some("leading_noise");
        }
        if words.last().is_some_and(|w| self.lib.is_trailing_noise(w)) {
            return Some("trailing_noise");
        }
        if words.len() > 2 && words[1..words.len() - 1].iter().any(|w| w.eq_ignore_ascii_case("the")) {
            return Some("embedded_the");
        }
        None
    }

    /// Whether `word` is a role suffix, allowing a plural.
    #[must_use]
    pub fn is_suffix_word(&self, word: &str) -> bool {
        let w = word.to_lowercase();
        self.lib.is_suffix(&w)
            || w.strip_suffix("es").is_some_and(|b| self.lib.is_suffix(b))
            || w.strip_suffix('s').is_some_and(|b| self.lib.is_suffix(b))
    }

    /// Classify a canonical name as role, deliverable, or unknown.
    ///
    /// A role suffix wins over a deliverable noun ("Test Plan Lead" is a role).
    #[must_use]
    pub fn classify_kind(&self, name: &str) -> (EntityKind, f64, &'static str) {
        let lib = &self.lib;
        let words: Vec<&str> = name.split_whitespace().collect();
        let Some(last) = words.last() else {
            return (EntityKind::Unknown, 0.0, "empty");
        };
        if lib.is_known_role(name) || lib.alias(name).is_some() || lib.is_acronym_role(name) {
            return (EntityKind::Role, 0.95, "known_role");
        }
        if self.is_suffix_word(last) {
            return (EntityKind::Role, 0.90, "role_suffix");
        }
        if words.len() == 1 && lib.single_word_role(name).is_some() {
            return (EntityKind::Role, 0.85, "domain_word");
        }
        if lib.is_deliverable_noun(last) {
            return (EntityKind::Deliverable, 0.80, "deliverable_noun");
        }
        (EntityKind::Unknown, 0.50, "no_signal")
    }
}

/// Whether `needle` occurs in `hay` on word boundaries.
fn contains_words(hay: &str, needle: &str) -> bool {
    !crate::offset::find_word_bounded(hay, needle).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> RoleValidator {
        RoleValidator::new(Arc::new(PatternLibrary::new()))
    }

    fn conf(text: &str) -> f64 {
        validator().score(text).confidence
    }

    #[test]
    fn priority_order() {
        assert_eq!(conf("COR"), 0.92);
        assert_eq!(conf("Contractor"), 0.85);
        assert_eq!(conf("Government"), 0.88);
        assert_eq!(conf("Systems Engineer"), 0.95);
        assert_eq!(conf("System Engineer"), 0.95);
        assert_eq!(conf("Thermal Analysis Engineer"), 0.90);
        assert_eq!(conf("Widget Engineer"), 0.75);
        assert_eq!(conf("Blue Green Widget Engineer"), 0.60);
        assert_eq!(conf("Board"), 0.50);
        assert_eq!(conf("Review Board Secretary"), 0.70);
    }

    #[test]
    fn shape_rejections() {
        let v = validator();
        assert_eq!(v.score("QA").reason, "length");
        assert_eq!(v.score("One Two Three Four Five Six Engineer").reason, "word_count");
        assert_eq!(v.score("Engineer 1234567").reason, "digits");
        assert_eq!(v.score("and Manager").reason, "leading_noise");
        assert_eq!(v.score("Systems Engineer shall").reason, "trailing_noise");
        assert_eq!(v.score("Plan of the Engineer").reason, "embedded_the");
    }

    #[test]
    fn false_positives_rejected_before_known() {
        let v = validator();
        assert_eq!(v.score("Configuration Management").reason, "false_positive");
        assert!(!v.score("Review").is_accepted());
    }

    #[test]
    fn suffix_wins_over_deliverable() {
        let v = validator();
        assert_eq!(v.classify_kind("Test Plan Lead").0, EntityKind::Role);
        assert_eq!(v.classify_kind("Safety Plan").0, EntityKind::Deliverable);
        assert_eq!(v.classify_kind("Contractor").0, EntityKind::Role);
        assert_eq!(v.classify_kind("Widget").0, EntityKind::Unknown);
    }

    #[test]
    fn plural_suffixes() {
        let v = validator();
        assert!(v.is_suffix_word("Engineers"));
        assert!(v.is_suffix_word("Boards"));
        assert!(!v.is_suffix_word("Engineering"));
    }
}
