//! Role extraction.
//!
//! # Pipeline (discovery mode)
//!
//! ```text
//! text ─┬─ rule cascade ───────┐
//!       ├─ direct whitelist scan ├─► validate ─► resolve overlaps ─► canonicalize
//!       └─ responsibilities list ┘                                       │
//!                                                                        ▼
//!        post-filter ◄─ tag provenance ◄─ verify in source ◄─ suggester (optional)
//! ```
//!
//! Strict mode replaces everything before verification with an exact
//! whitelist scan (see [`strict`]).
//!
//! Every role in the output is verified in the source text; unverifiable
//! roles are dropped, never flagged.

pub mod candidates;
pub mod canonical;
pub mod context;
pub mod responsibilities;
mod strict;
pub mod validate;
pub mod verify;

pub use candidates::Candidate;
pub use canonical::Canonicalizer;
pub use responsibilities::{parse_responsibilities, ResponsibilityEntry};
pub use strict::STRICT_PATTERN;
pub use validate::{RoleValidator, Validation};
pub use verify::{PostFilter, SourceVerifier};

use crate::config::{ExtractionConfig, ExtractionMode};
use crate::library::PatternLibrary;
use crate::offset::{find_word_bounded, SpanConverter};
use crate::suggest::{EntitySuggester, NoopSuggester, SuggestedEntity};
use candidates::{direct_scan, list_candidates, pattern_candidates};
use context::{occurrence, LocationIndex};
use docent_core::{ExtractedRole, Paragraph};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use verify::{drop_nested_positions, drop_reason, role_source, PreparedText};

/// Extracts roles from document text.
///
/// Construction compiles nothing; rule tables are compiled once per process
/// and the [`PatternLibrary`] is shared.
///
/// ```rust
/// use docent::{ExtractionConfig, PatternLibrary, RoleExtractor};
/// use std::sync::Arc;
///
/// let config = ExtractionConfig::default();
/// let lib = Arc::new(PatternLibrary::from_config(&config));
/// let roles = RoleExtractor::new(lib, &config)
///     .extract("The Systems Engineer shall maintain the baseline.");
/// assert!(roles.contains_key("Systems Engineer"));
/// ```
pub struct RoleExtractor {
    lib: Arc<PatternLibrary>,
    mode: ExtractionMode,
    max_segment_chars: usize,
    filter: PostFilter,
    validator: RoleValidator,
    canonicalizer: Canonicalizer,
    verifier: SourceVerifier,
    suggester: Arc<dyn EntitySuggester>,
}

impl fmt::Debug for RoleExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleExtractor")
            .field("mode", &self.mode)
            .field("max_segment_chars", &self.max_segment_chars)
            .field("filter", &self.filter)
            .field("window", &self.verifier.window())
            .field("suggester", &self.suggester.name())
            .finish_non_exhaustive()
    }
}

/// A validated candidate.
#[derive(Debug, Clone)]
struct Scored {
    cand: Candidate,
    confidence: f64,
}

impl RoleExtractor {
    /// Extractor over `lib` with the mode and thresholds from `config`.
    #[must_use]
    pub fn new(lib: Arc<PatternLibrary>, config: &ExtractionConfig) -> Self {
        Self {
            validator: RoleValidator::new(Arc::clone(&lib)),
            canonicalizer: Canonicalizer::new(Arc::clone(&lib)),
            verifier: SourceVerifier::new(config.adjacency_window),
            mode: config.extraction_mode,
            max_segment_chars: config.max_segment_chars,
            filter: PostFilter {
                min_avg_confidence: config.min_avg_confidence,
                min_single_word_frequency: config.min_single_word_frequency,
            },
            suggester: Arc::new(NoopSuggester),
            lib,
        }
    }

    /// Consult `suggester` during discovery.
    #[must_use]
    pub fn with_suggester(mut self, suggester: Arc<dyn EntitySuggester>) -> Self {
        self.suggester = suggester;
        self
    }

    /// The extraction mode.
    #[must_use]
    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    /// The shared pattern library.
    #[must_use]
    pub fn library(&self) -> &Arc<PatternLibrary> {
        &self.lib
    }

    /// Extract roles from `text`, locating occurrences as "document".
    #[must_use]
    pub fn extract(&self, text: &str) -> BTreeMap<String, ExtractedRole> {
        self.extract_with_paragraphs(text, &[], None)
    }

    /// Extract roles, labelling occurrences with paragraph numbers and
    /// `source_label`.
    #[must_use]
    pub fn extract_with_paragraphs(
        &self,
        text: &str,
        paragraphs: &[Paragraph],
        source_label: Option<&str>,
    ) -> BTreeMap<String, ExtractedRole> {
        let locations = LocationIndex::new(text, paragraphs, source_label);
        let roles = match self.mode {
            ExtractionMode::Strict => strict::extract(text, &self.lib, &locations),
            ExtractionMode::Discovery => self.discover(text, &locations),
        };
        log::debug!("{} mode returned {} roles", self.mode, roles.len());
        roles
    }

    fn discover(&self, text: &str, locations: &LocationIndex) -> BTreeMap<String, ExtractedRole> {
        let mut raw = pattern_candidates(text, &self.lib, self.max_segment_chars);
        raw.extend(direct_scan(text, &self.lib));
        raw.extend(list_candidates(text, &self.lib, self.max_segment_chars));
        let generated = raw.len();

        let accepted: Vec<Scored> = raw
            .into_iter()
            .filter_map(|cand| {
                let v = self.validator.score(&cand.text);
                if v.is_accepted() {
                    Some(Scored {
                        cand,
                        confidence: v.confidence,
                    })
                } else {
                    log::trace!("{} rejected {:?} ({})", cand.pattern, cand.text, v.reason);
                    None
                }
            })
            .collect();
        log::debug!("validator accepted {} of {} candidates", accepted.len(), generated);

        let resolved = resolve_overlaps(accepted);
        let mut roles = self.aggregate(text, resolved, locations);
        log::debug!("canonicalized into {} roles", roles.len());

        self.apply_suggestions(text, &mut roles, locations);

        let prepared = PreparedText::new(text);
        let before = roles.len();
        roles.retain(|name, role| {
            let variants = role.variants.iter().map(String::as_str);
            match self.verifier.verify(name, variants, &prepared) {
                Some(positions) => {
                    role.is_verified_in_text = true;
                    role.text_positions = positions;
                    true
                }
                None => {
                    log::trace!("unverified role dropped: {:?}", name);
                    false
                }
            }
        });
        log::debug!("verifier dropped {} of {} roles", before - roles.len(), before);

        roles.retain(|name, role| {
            role.role_source = role_source(&self.lib, role);
            match drop_reason(&self.lib, role, self.filter) {
                Some(reason) => {
                    log::trace!("post-filter dropped {:?} ({})", name, reason);
                    false
                }
                None => true,
            }
        });
        drop_nested_positions(&mut roles);
        roles
    }

    fn aggregate(
        &self,
        text: &str,
        accepted: Vec<Scored>,
        locations: &LocationIndex,
    ) -> BTreeMap<String, ExtractedRole> {
        let mut roles: BTreeMap<String, ExtractedRole> = BTreeMap::new();
        for Scored { cand, confidence } in accepted {
            let canonical = self.canonicalizer.canonicalize(&cand.text);
            if canonical.is_empty() {
                continue;
            }
            let role = roles
                .entry(canonical.clone())
                .or_insert_with(|| ExtractedRole::new(canonical));
            role.variants.insert(Canonicalizer::surface(&cand.text));
            if let Some(v) = &cand.variant {
                role.variants.insert(v.clone());
            }
            role.occurrences.push(occurrence(
                text,
                cand.byte_start,
                cand.byte_end,
                cand.start,
                confidence,
                cand.pattern,
                cand.responsibility,
                locations,
            ));
        }

        for role in roles.values_mut() {
            role.occurrences.sort_by_key(|o| o.offset);
            self.classify(role);
        }
        roles
    }

    fn classify(&self, role: &mut ExtractedRole) {
        let (kind, conf, reason) = self.validator.classify_kind(&role.canonical_name);
        role.entity_kind = kind;
        role.kind_confidence = conf;
        role.kind_reason = reason.to_string();
    }

    /// Merge suggester output. Known roles only gain confidence; new names
    /// must validate and occur literally.
    fn apply_suggestions(
        &self,
        text: &str,
        roles: &mut BTreeMap<String, ExtractedRole>,
        locations: &LocationIndex,
    ) {
        let suggester = &self.suggester;
        if !suggester.is_available() {
            log::warn!("suggester {} unavailable; continuing pattern-only", suggester.name());
            return;
        }
        let suggestions = match suggester.suggest(text) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("suggester {} failed: {}; continuing pattern-only", suggester.name(), e);
                return;
            }
        };

        let converter = SpanConverter::new(text);
        let mut added = 0;
        for SuggestedEntity {
            name,
            confidence,
            source_tag,
            ..
        } in suggestions
        {
            let canonical = self.canonicalizer.canonicalize(&name);
            if let Some(role) = roles.get_mut(&canonical) {
                for occ in &mut role.occurrences {
                    occ.confidence = occ.confidence.max(confidence.clamp(0.0, 1.0));
                }
                continue;
            }

            let v = self.validator.score(&name);
            if !v.is_accepted() {
                log::trace!("suggestion {:?} rejected ({})", name, v.reason);
                continue;
            }
            let hits = find_word_bounded(text, &name);
            if hits.is_empty() {
                log::trace!("suggestion {:?} not in text", name);
                continue;
            }
            let pattern = format!("suggester:{}", source_tag);
            let mut role = ExtractedRole::new(canonical.clone());
            role.variants.insert(Canonicalizer::surface(&name));
            for (s, e) in hits {
                role.occurrences.push(occurrence(
                    text,
                    s,
                    e,
                    converter.byte_to_char(s),
                    v.confidence,
                    &pattern,
                    None,
                    locations,
                ));
            }
            self.classify(&mut role);
            roles.insert(canonical, role);
            added += 1;
        }
        log::debug!("suggester {} added {} roles", suggester.name(), added);
    }
}

/// Merge identical spans and drop spans nested in a longer accepted span.
///
/// Identical spans keep the highest confidence (first candidate on a tie)
/// and inherit any variant or duty the others carried.
fn resolve_overlaps(accepted: Vec<Scored>) -> Vec<Scored> {
    let mut by_span: BTreeMap<(usize, usize), Scored> = BTreeMap::new();
    for s in accepted {
        let key = (s.cand.byte_start, s.cand.byte_end);
        match by_span.get_mut(&key) {
            None => {
                by_span.insert(key, s);
            }
            Some(existing) => {
                let variant = existing.cand.variant.take().or_else(|| s.cand.variant.clone());
                let duty = existing
                    .cand
                    .responsibility
                    .take()
                    .or_else(|| s.cand.responsibility.clone());
                if s.confidence > existing.confidence {
                    *existing = s;
                }
                existing.cand.variant = variant;
                existing.cand.responsibility = duty;
            }
        }
    }

    let mut spans: Vec<Scored> = by_span.into_values().collect();
    spans.sort_by(|a, b| {
        b.cand
            .span_len()
            .cmp(&a.cand.span_len())
            .then(a.cand.byte_start.cmp(&b.cand.byte_start))
    });
    let mut kept: Vec<Scored> = Vec::with_capacity(spans.len());
    for s in spans {
        if kept.iter().any(|k| s.cand.within(&k.cand)) {
            continue;
        }
        kept.push(s);
    }
    kept.sort_by_key(|s| s.cand.byte_start);
    kept
}
