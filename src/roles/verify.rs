//! Source verification and post-verification filtering.
//!
//! A canonical role only survives if the source text proves it is there:
//!
//! ```text
//! (a) canonical name, word-bounded           "Systems Engineer"
//! (b) a retained variant, word-bounded       "System Engineer"
//!     (a one-word variant never proves a multi-word name)
//! (c) every word of a multi-word name        "Engineer ... Safety"
//!     within `window` chars of an anchor      \___ <= 20 ___/
//! ```
//!
//! Roles failing all three are dropped, never flagged.

use crate::library::PatternLibrary;
use crate::offset::{find_word_bounded_folded, SpanConverter};
use docent_core::{ExtractedRole, RoleSource};
use std::collections::BTreeMap;

/// Proves roles present in the source text.
#[derive(Debug, Clone, Copy)]
pub struct SourceVerifier {
    window: usize,
}

/// Source text prepared once for many verifications.
#[derive(Debug)]
pub struct PreparedText<'a> {
    text: &'a str,
    folded: String,
    converter: SpanConverter,
}

impl<'a> PreparedText<'a> {
    /// Prepare `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            folded: text.to_ascii_lowercase(),
            converter: SpanConverter::new(text),
        }
    }

    fn find(&self, needle: &str) -> Vec<(usize, usize)> {
        let pat = needle.trim().to_ascii_lowercase();
        if pat.is_empty() {
            return Vec::new();
        }
        find_word_bounded_folded(self.text, &self.folded, &pat)
    }

    fn char_gap(&self, left_end: usize, right_start: usize) -> usize {
        self.converter
            .byte_to_char(right_start)
            .saturating_sub(self.converter.byte_to_char(left_end))
    }
}

impl SourceVerifier {
    /// Verifier with the given adjacency window, in characters.
    #[must_use]
    pub const fn new(window: usize) -> Self {
        Self { window }
    }

    /// The adjacency window.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Verify a role. Returns the ascending char offsets that prove it, or
    /// `None` when nothing does.
    #[must_use]
    pub fn verify<'v>(
        &self,
        canonical: &str,
        variants: impl IntoIterator<Item = &'v str>,
        source: &PreparedText<'_>,
    ) -> Option<Vec<usize>> {
        let multi_word = canonical.split_whitespace().count() > 1;
        let mut hits: Vec<usize> = source.find(canonical).into_iter().map(|(s, _)| s).collect();

        for variant in variants {
            if multi_word && variant.split_whitespace().count() < 2 {
                continue;
            }
            hits.extend(source.find(variant).into_iter().map(|(s, _)| s));
        }

        if hits.is_empty() && multi_word {
            hits = self.adjacency_anchors(canonical, source);
        }
        if hits.is_empty() {
            return None;
        }
        let mut positions: Vec<usize> = hits
            .into_iter()
            .map(|b| source.converter.byte_to_char(b))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        Some(positions)
    }

    /// Byte offsets of first-word occurrences that have every other word of
    /// `canonical` within the window, in either direction.
    fn adjacency_anchors(&self, canonical: &str, source: &PreparedText<'_>) -> Vec<usize> {
        let words: Vec<&str> = canonical.split_whitespace().collect();
        let Some((first, rest)) = words.split_first() else {
            return Vec::new();
        };
        let others: Vec<Vec<(usize, usize)>> = rest.iter().map(|w| source.find(w)).collect();
        if others.iter().any(Vec::is_empty) {
            return Vec::new();
        }

        source
            .find(first)
            .into_iter()
            .filter(|&(a_start, a_end)| {
                others.iter().all(|occurrences| {
                    occurrences.iter().any(|&(s, e)| {
                        let gap = if s >= a_end {
                            source.char_gap(a_end, s)
                        } else if e <= a_start {
                            source.char_gap(e, a_start)
                        } else {
                            0
                        };
                        gap <= self.window
                    })
                })
            })
            .map(|(s, _)| s)
            .collect()
    }
}

/// Remove text positions that fall inside another role's occurrence.
///
/// "Systems Engineer" inside "Lead Systems Engineer" was credited to the
/// longer role when overlaps were resolved, so the shorter role does not
/// report it either. A position where the role has its own occurrence is
/// kept, and a role never loses its last position.
pub fn drop_nested_positions(roles: &mut BTreeMap<String, ExtractedRole>) {
    // (char start, char end, role)
    let mut spans: Vec<(usize, usize, String)> = roles
        .values()
        .flat_map(|r| {
            r.occurrences.iter().map(|o| {
                let end = o.offset + o.role_text.chars().count();
                (o.offset, end, r.canonical_name.clone())
            })
        })
        .collect();
    spans.sort_unstable();
    let longest = spans.iter().map(|(s, e, _)| e - s).max().unwrap_or(0);

    for role in roles.values_mut() {
        let own: Vec<usize> = role.occurrences.iter().map(|o| o.offset).collect();
        let claimed = |p: usize| {
            let upto = spans.partition_point(|(s, _, _)| *s <= p);
            spans[..upto]
                .iter()
                .rev()
                .take_while(|(s, _, _)| p < s + longest)
                .any(|(_, e, owner)| p < *e && *owner != role.canonical_name)
        };
        let kept: Vec<usize> = role
            .text_positions
            .iter()
            .copied()
            .filter(|&p| own.contains(&p) || !claimed(p))
            .collect();
        if !kept.is_empty() && kept.len() < role.text_positions.len() {
            log::trace!(
                "{:?}: {} positions nested in other roles",
                role.canonical_name,
                role.text_positions.len() - kept.len()
            );
            role.text_positions = kept;
        }
    }
}

/// Provenance of a verified role.
#[must_use]
pub fn role_source(lib: &PatternLibrary, role: &ExtractedRole) -> RoleSource {
    if lib.is_known_role(&role.canonical_name) {
        return RoleSource::Dictionary;
    }
    let whitelisted = |s: &str| {
        lib.alias(s).is_some() || lib.is_acronym_role(s) || lib.single_word_role(s).is_some()
    };
    if whitelisted(&role.canonical_name) || role.variants.iter().any(|v| whitelisted(v)) {
        RoleSource::Known
    } else {
        RoleSource::Discovered
    }
}

/// Thresholds for [`drop_reason`].
#[derive(Debug, Clone, Copy)]
pub struct PostFilter {
    /// Minimum mean occurrence confidence.
    pub min_avg_confidence: f64,
    /// Minimum occurrences for a discovered single-word role.
    pub min_single_word_frequency: usize,
}

/// Why a verified role is dropped by the post-verification filters, if it is.
///
/// Organizations, low mean confidence, single-word stopwords, and rare
/// discovered single words do not survive.
#[must_use]
pub fn drop_reason(lib: &PatternLibrary, role: &ExtractedRole, filter: PostFilter) -> Option<&'static str> {
    let name = role.canonical_name.as_str();
    if lib.is_organization(name) {
        return Some("organization");
    }
    if role.avg_confidence() < filter.min_avg_confidence {
        return Some("low_confidence");
    }
    if role.is_single_word() {
        if lib.is_stopword(name) {
            return Some("stopword");
        }
        if role.role_source == RoleSource::Discovered
            && role.frequency() < filter.min_single_word_frequency
        {
            return Some("rare_single_word");
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use docent_core::{ActionType, RoleOccurrence};

    fn verify(name: &str, variants: &[&str], text: &str) -> Option<Vec<usize>> {
        SourceVerifier::new(20).verify(name, variants.iter().copied(), &PreparedText::new(text))
    }

    #[test]
    fn canonical_name_verifies() {
        let text = "Then the systems engineer signs.";
        assert_eq!(verify("Systems Engineer", &[], text), Some(vec![9]));
    }

    #[test]
    fn variant_verifies() {
        let text = "The Sys Engineer signs.";
        assert_eq!(verify("Systems Engineer", &["Sys Engineer"], text), Some(vec![4]));
    }

    #[test]
    fn single_word_variant_never_verifies_compound() {
        let text = "An engineer signs.";
        assert_eq!(verify("Systems Engineer", &["Engineer"], text), None);
    }

    #[test]
    fn out_of_order_words_within_window() {
        let text = "The engineer for systems signs.";
        assert_eq!(verify("Systems Engineer", &[], text), Some(vec![17]));
    }

    #[test]
    fn unverifiable_role_is_none() {
        assert_eq!(verify("Flight Director", &["Flight Directors"], "No roles here."), None);
        assert_eq!(verify("Director", &[], "Directorate"), None);
    }

    #[test]
    fn positions_are_chars_and_deduped() {
        let text = "Coût: Systems Engineer, systems engineer";
        let got = verify("Systems Engineer", &["systems engineer"], text).unwrap();
        assert_eq!(got, vec![6, 24]);
    }

    fn role(name: &str, confidences: &[f64]) -> ExtractedRole {
        let mut r = ExtractedRole::new(name);
        for (i, c) in confidences.iter().enumerate() {
            r.occurrences.push(RoleOccurrence {
                role_text: name.to_string(),
                context: String::new(),
                responsibility: None,
                action_type: ActionType::Other,
                location: "document".into(),
                offset: i * 10,
                confidence: *c,
                pattern: "test".into(),
            });
        }
        r
    }

    #[test]
    fn nested_positions_go_to_the_longer_role() {
        let mut lead = role("Lead Systems Engineer", &[0.9]);
        lead.occurrences[0].offset = 30;
        lead.text_positions = vec![30];
        let mut se = role("Systems Engineer", &[0.9]);
        se.occurrences[0].offset = 4;
        se.text_positions = vec![4, 35];
        let mut roles: BTreeMap<String, ExtractedRole> = [lead, se]
            .into_iter()
            .map(|r| (r.canonical_name.clone(), r))
            .collect();
        drop_nested_positions(&mut roles);
        assert_eq!(roles["Systems Engineer"].text_positions, vec![4]);
        assert_eq!(roles["Lead Systems Engineer"].text_positions, vec![30]);
    }

    #[test]
    fn last_position_is_never_dropped() {
        let mut lead = role("Lead Systems Engineer", &[0.9]);
        lead.occurrences[0].offset = 0;
        let mut se = role("Systems Engineer", &[0.9]);
        se.occurrences.clear();
        se.text_positions = vec![5];
        let mut roles: BTreeMap<String, ExtractedRole> = [lead, se]
            .into_iter()
            .map(|r| (r.canonical_name.clone(), r))
            .collect();
        drop_nested_positions(&mut roles);
        assert_eq!(roles["Systems Engineer"].text_positions, vec![5]);
    }

    #[test]
    fn provenance_priority() {
        let lib = PatternLibrary::new();
        assert_eq!(role_source(&lib, &role("Systems Engineer", &[1.0])), RoleSource::Dictionary);
        assert_eq!(role_source(&lib, &role("CISO", &[1.0])), RoleSource::Known);
        assert_eq!(role_source(&lib, &role("Widget Engineer", &[1.0])), RoleSource::Discovered);
    }

    #[test]
    fn post_filters() {
        let lib = PatternLibrary::new();
        let f = PostFilter {
            min_avg_confidence: 0.4,
            min_single_word_frequency: 3,
        };
        assert_eq!(drop_reason(&lib, &role("NASA", &[0.9]), f), Some("organization"));
        assert_eq!(drop_reason(&lib, &role("Widget Engineer", &[0.3]), f), Some("low_confidence"));
        assert_eq!(drop_reason(&lib, &role("Review", &[0.7]), f), Some("stopword"));
        assert_eq!(drop_reason(&lib, &role("Gizmologist", &[0.7]), f), Some("rare_single_word"));
        assert_eq!(drop_reason(&lib, &role("Gizmologist", &[0.7, 0.7, 0.7]), f), None);
        assert_eq!(drop_reason(&lib, &role("Widget Engineer", &[0.75]), f), None);
    }
}
