//! Strict mode: exact whitelist matching only.
//!
//! No rule cascade, no scoring. Every known role and alias (minus false
//! positives and organizations) is searched for literally, on word
//! boundaries, and each hit becomes an occurrence with confidence 1.0.
//! Hits nested inside a longer hit are not counted twice.

use super::context::{occurrence, LocationIndex};
use super::validate::RoleValidator;
use super::verify::role_source;
use crate::library::PatternLibrary;
use crate::offset::{find_word_bounded_folded, SpanConverter};
use docent_core::ExtractedRole;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Pattern name recorded on strict-mode occurrences.
pub const STRICT_PATTERN: &str = "strict_whitelist";

#[derive(Debug)]
struct Hit {
    start: usize,
    end: usize,
    canonical: String,
}

/// Run strict extraction over `text`.
pub(crate) fn extract(
    text: &str,
    lib: &Arc<PatternLibrary>,
    locations: &LocationIndex,
) -> BTreeMap<String, ExtractedRole> {
    let folded = text.to_ascii_lowercase();
    let mut hits: Vec<Hit> = Vec::new();

    for (key, canonical) in lib.whitelist_terms() {
        let short = key.chars().count() <= 3;
        for (start, end) in find_word_bounded_folded(text, &folded, &key) {
            if short && text[start..end] != key.to_uppercase() {
                continue;
            }
            hits.push(Hit {
                start,
                end,
                canonical: canonical.clone(),
            });
        }
    }

    // longest first, then leftmost
    hits.sort_by(|a, b| (b.end - b.start).cmp(&(a.end - a.start)).then(a.start.cmp(&b.start)));
    let mut kept: Vec<Hit> = Vec::with_capacity(hits.len());
    for hit in hits {
        let nested = kept.iter().any(|k| k.start <= hit.start && hit.end <= k.end);
        if !nested {
            kept.push(hit);
        }
    }
    kept.sort_by_key(|h| h.start);
    log::debug!("strict mode kept {} whitelist hits", kept.len());

    let converter = SpanConverter::new(text);
    let validator = RoleValidator::new(Arc::clone(lib));
    let mut roles: BTreeMap<String, ExtractedRole> = BTreeMap::new();

    for hit in kept {
        let char_start = converter.byte_to_char(hit.start);
        let occ = occurrence(text, hit.start, hit.end, char_start, 1.0, STRICT_PATTERN, None, locations);
        let role = roles
            .entry(hit.canonical.clone())
            .or_insert_with(|| ExtractedRole::new(hit.canonical.clone()));
        role.variants.insert(occ.role_text.clone());
        role.text_positions.push(char_start);
        role.occurrences.push(occ);
    }

    for role in roles.values_mut() {
        let (kind, conf, reason) = validator.classify_kind(&role.canonical_name);
        role.entity_kind = kind;
        role.kind_confidence = conf;
        role.kind_reason = reason.to_string();
        role.is_verified_in_text = true;
        role.role_source = role_source(lib, role);
    }
    roles
}
