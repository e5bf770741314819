//! Acronym extraction.
//!
//! One pass over the document, in stages:
//!
//! 1. static definition patterns, confidence fixed per form:
//!
//!    | Form | Confidence | Definition location |
//!    |------|------------|---------------------|
//!    | `Long Form (LF)` | 0.95 | start of the long form |
//!    | `LF (Long Form)` | 0.90 | start of the acronym |
//!    | `LF – Long Form` | 0.85 | start of the acronym |
//!
//! 2. [Schwartz-Hearst](schwartz_hearst) at parenthesized short forms the
//!    patterns did not consume (0.88);
//! 3. every standalone acronym-shaped token is recorded as a usage;
//! 4. acronyms still without an expansion fall back to the dictionary
//!    (0.80, status `Known`);
//! 5. status is settled: `Inconsistent` > `Known` > `Defined` > `Undefined`.
//!
//! Definitions are applied in document order. The first one wins; a later,
//! differing expansion is kept as an alternative.

pub mod consistency;
pub mod schwartz_hearst;

pub use consistency::check_consistency;

use crate::config::ExtractionConfig;
use crate::library::{compile_rule, PatternLibrary};
use crate::offset::{segments, Segment};
use docent_core::{AcronymEntry, AcronymStatus, DefinitionSource};
use once_cell::sync::Lazy;
use regex::Regex;
use schwartz_hearst::{find_long_form, is_short_form};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Confidence of `Long Form (LF)`.
pub const LONG_THEN_SHORT_CONFIDENCE: f64 = 0.95;
/// Confidence of `LF (Long Form)`.
pub const SHORT_THEN_LONG_CONFIDENCE: f64 = 0.90;
/// Confidence of `LF – Long Form`.
pub const SHORT_DASH_LONG_CONFIDENCE: f64 = 0.85;
/// Confidence of a dictionary expansion.
pub const DICTIONARY_CONFIDENCE: f64 = 0.80;

/// Longest heading token taken as an acronym without other evidence.
const HEADING_ACRONYM_MAX_CHARS: usize = 3;

static LONG_THEN_SHORT: Lazy<Option<Regex>> = Lazy::new(|| {
    compile_rule(
        "long_then_short",
        r"\b((?:[A-Za-z][A-Za-z0-9'’&\-]*,?[ \t]+){1,10})\(([A-Za-z0-9][A-Za-z0-9&/\-]{1,11})\)",
    )
});

static SHORT_THEN_LONG: Lazy<Option<Regex>> = Lazy::new(|| {
    compile_rule(
        "short_then_long",
        r"\b([A-Z][A-Za-z0-9&/\-]{1,11})[ \t]*\(([A-Za-z][A-Za-z0-9'’&,/\- \t]{2,100})\)",
    )
});

static SHORT_DASH_LONG: Lazy<Option<Regex>> = Lazy::new(|| {
    compile_rule(
        "short_dash_long",
        r"\b([A-Z][A-Za-z0-9&/]{1,11})(?:[ \t]*[–—][ \t]*|[ \t]+-[ \t]+)([A-Z][A-Za-z'’\-]*(?:[ \t]+[A-Za-z][A-Za-z'’\-]*){0,9})",
    )
});

static PAREN_SITE: Lazy<Option<Regex>> =
    Lazy::new(|| compile_rule("paren_site", r"\(([^()\n]{2,12})\)"));

static USAGE: Lazy<Option<Regex>> =
    Lazy::new(|| compile_rule("acronym_usage", r"\b([A-Z][A-Za-z0-9&]*[A-Z0-9])s?\b"));

/// A definition seen in the text, before first-sight resolution.
#[derive(Debug, Clone)]
struct Definition {
    acronym: String,
    expansion: String,
    /// Char offset of the definition.
    location: usize,
    confidence: f64,
    source: DefinitionSource,
    /// Tie-break between forms starting at the same offset.
    rank: u8,
}

/// Extracts acronyms, their definitions and usages.
#[derive(Debug, Clone)]
pub struct AcronymExtractor {
    lib: Arc<PatternLibrary>,
    max_segment_chars: usize,
}

impl AcronymExtractor {
    /// Extractor over `lib`, segment cap from `config`.
    #[must_use]
    pub fn new(lib: Arc<PatternLibrary>, config: &ExtractionConfig) -> Self {
        Self {
            lib,
            max_segment_chars: config.max_segment_chars,
        }
    }

    /// Extract every acronym in `text`, keyed by acronym (upper-cased unless
    /// matching is case-sensitive).
    #[must_use]
    pub fn extract(&self, text: &str) -> BTreeMap<String, AcronymEntry> {
        let segs = segments(text, self.max_segment_chars);
        let mut defs = Vec::new();
        let mut consumed = BTreeSet::new();

        for seg in &segs {
            self.long_then_short(seg, &mut defs, &mut consumed);
            self.short_then_long(seg, &mut defs, &mut consumed);
            self.short_dash_long(seg, &mut defs);
        }
        let pattern_defs = defs.len();
        for seg in &segs {
            self.schwartz_hearst(seg, &consumed, &mut defs);
        }
        log::debug!(
            "acronym definitions: {} from patterns, {} from Schwartz-Hearst",
            pattern_defs,
            defs.len() - pattern_defs
        );

        defs.sort_by_key(|d| (d.location, d.rank));
        let mut entries: BTreeMap<String, AcronymEntry> = BTreeMap::new();
        for d in defs {
            self.record(&mut entries, d);
        }

        self.scan_usages(&segs, &mut entries);
        self.apply_dictionary(&mut entries);
        for entry in entries.values_mut() {
            entry.usage_locations.sort_unstable();
            entry.usage_locations.dedup();
            entry.status = status_of(entry);
        }
        log::debug!("extracted {} acronyms", entries.len());
        entries
    }

    /// Whether `token` can be an acronym at all.
    fn is_candidate(&self, token: &str) -> bool {
        is_short_form(token) && !self.lib.is_non_acronym(token)
    }

    fn long_then_short(
        &self,
        seg: &Segment<'_>,
        defs: &mut Vec<Definition>,
        consumed: &mut BTreeSet<usize>,
    ) {
        let Some(re) = (*LONG_THEN_SHORT).as_ref() else {
            return;
        };
        for caps in re.captures_iter(seg.text) {
            let (Some(phrase), Some(short)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let acronym = short.as_str();
            if !self.is_candidate(acronym) {
                continue;
            }
            let Some(start) = long_form_start(acronym, phrase.as_str()) else {
                continue;
            };
            let expansion = tidy(&phrase.as_str()[start..]);
            if expansion.is_empty() {
                continue;
            }
            consumed.insert(seg.byte_at(short.start() - 1));
            defs.push(Definition {
                acronym: acronym.to_string(),
                expansion,
                location: seg.char_at(phrase.start() + start),
                confidence: LONG_THEN_SHORT_CONFIDENCE,
                source: DefinitionSource::Pattern,
                rank: 0,
            });
        }
    }

    fn short_then_long(
        &self,
        seg: &Segment<'_>,
        defs: &mut Vec<Definition>,
        consumed: &mut BTreeSet<usize>,
    ) {
        let Some(re) = (*SHORT_THEN_LONG).as_ref() else {
            return;
        };
        for caps in re.captures_iter(seg.text) {
            let (Some(short), Some(long)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let acronym = short.as_str();
            let expansion = tidy(long.as_str());
            if !self.is_candidate(acronym)
                || expansion.split_whitespace().count() < 2
                || (initials_end(acronym, &expansion) != Some(expansion.len())
                    && !letters_cover(acronym, &expansion))
            {
                continue;
            }
            consumed.insert(seg.byte_at(long.start() - 1));
            defs.push(Definition {
                acronym: acronym.to_string(),
                expansion,
                location: seg.char_at(short.start()),
                confidence: SHORT_THEN_LONG_CONFIDENCE,
                source: DefinitionSource::Pattern,
                rank: 1,
            });
        }
    }

    fn short_dash_long(&self, seg: &Segment<'_>, defs: &mut Vec<Definition>) {
        let Some(re) = (*SHORT_DASH_LONG).as_ref() else {
            return;
        };
        for caps in re.captures_iter(seg.text) {
            let (Some(short), Some(long)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let acronym = short.as_str();
            if !self.is_candidate(acronym) {
                continue;
            }
            let long = long.as_str();
            let Some(end) = initials_end(acronym, long).or_else(|| letters_end(acronym, long)) else {
                continue;
            };
            let expansion = tidy(&long[..end]);
            if expansion.chars().count() <= acronym.chars().count() {
                continue;
            }
            defs.push(Definition {
                acronym: acronym.to_string(),
                expansion,
                location: seg.char_at(short.start()),
                confidence: SHORT_DASH_LONG_CONFIDENCE,
                source: DefinitionSource::Pattern,
                rank: 2,
            });
        }
    }

    fn schwartz_hearst(
        &self,
        seg: &Segment<'_>,
        consumed: &BTreeSet<usize>,
        defs: &mut Vec<Definition>,
    ) {
        let Some(re) = (*PAREN_SITE).as_ref() else {
            return;
        };
        for caps in re.captures_iter(seg.text) {
            let (Some(site), Some(short)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let acronym = short.as_str().trim();
            if consumed.contains(&seg.byte_at(site.start())) || !self.is_candidate(acronym) {
                continue;
            }
            let Some(long) = find_long_form(acronym, &seg.text[..site.start()]) else {
                log::trace!("no long form for ({})", acronym);
                continue;
            };
            defs.push(Definition {
                acronym: acronym.to_string(),
                expansion: tidy(&long.text),
                location: seg.char_at(long.start),
                confidence: schwartz_hearst::CONFIDENCE,
                source: DefinitionSource::SchwartzHearst,
                rank: 3,
            });
        }
    }

    /// Apply one definition: first sight wins, differing later ones become
    /// alternatives.
    fn record(&self, entries: &mut BTreeMap<String, AcronymEntry>, d: Definition) {
        let entry = entries
            .entry(self.lib.acronym_key(&d.acronym))
            .or_insert_with(|| AcronymEntry::undefined(d.acronym.clone()));
        let wanted = normalize_expansion(&d.expansion);
        match entry.expansion.as_deref().map(normalize_expansion) {
            None => {
                entry.expansion = Some(d.expansion);
                entry.definition_location = Some(d.location);
                entry.confidence = d.confidence;
                entry.source = d.source;
                entry.status = AcronymStatus::Defined;
            }
            Some(existing) if existing != wanted => {
                let seen = entry
                    .alternatives
                    .iter()
                    .any(|a| normalize_expansion(a) == wanted);
                if !seen {
                    log::debug!("{}: conflicting definition {:?}", entry.acronym, d.expansion);
                    entry.alternatives.push(d.expansion);
                }
            }
            Some(_) => {}
        }
    }

    /// Record every acronym-shaped token as a usage.
    ///
    /// Inside all-capital headings ("PDR AND CDR SCHEDULE") only tokens that
    /// are already established count: defined in the document, used outside
    /// a heading, known to the dictionary, or at most three characters long.
    fn scan_usages(&self, segs: &[Segment<'_>], entries: &mut BTreeMap<String, AcronymEntry>) {
        let Some(re) = (*USAGE).as_ref() else {
            return;
        };
        let (headings, body): (Vec<&Segment<'_>>, Vec<&Segment<'_>>) =
            segs.iter().partition(|seg| is_heading(seg.text));

        for seg in body {
            for token in re.captures_iter(seg.text).filter_map(|c| c.get(1)) {
                if self.is_candidate(token.as_str()) {
                    self.record_usage(entries, token.as_str(), seg.char_at(token.start()));
                }
            }
        }
        for seg in headings {
            for token in re.captures_iter(seg.text).filter_map(|c| c.get(1)) {
                let t = token.as_str();
                let established = entries.contains_key(&self.lib.acronym_key(t))
                    || self.lib.acronym_expansion(t).is_some()
                    || t.chars().count() <= HEADING_ACRONYM_MAX_CHARS;
                if established && self.is_candidate(t) {
                    self.record_usage(entries, t, seg.char_at(token.start()));
                }
            }
        }
    }

    fn record_usage(&self, entries: &mut BTreeMap<String, AcronymEntry>, token: &str, at: usize) {
        entries
            .entry(self.lib.acronym_key(token))
            .or_insert_with(|| AcronymEntry::undefined(token))
            .usage_locations
            .push(at);
    }

    fn apply_dictionary(&self, entries: &mut BTreeMap<String, AcronymEntry>) {
        let mut found = 0;
        for entry in entries.values_mut().filter(|e| e.expansion.is_none()) {
            if let Some(expansion) = self.lib.acronym_expansion(&entry.acronym) {
                entry.expansion = Some(expansion.to_string());
                entry.confidence = DICTIONARY_CONFIDENCE;
                entry.source = DefinitionSource::Dictionary;
                found += 1;
            }
        }
        log::debug!("dictionary supplied {} expansions", found);
    }
}

fn status_of(entry: &AcronymEntry) -> AcronymStatus {
    if !entry.alternatives.is_empty() {
        AcronymStatus::Inconsistent
    } else if entry.source == DefinitionSource::Dictionary {
        AcronymStatus::Known
    } else if entry.expansion.is_some() {
        AcronymStatus::Defined
    } else {
        AcronymStatus::Undefined
    }
}

/// Lowercase alphanumeric characters of an acronym.
fn acronym_chars(acronym: &str) -> Vec<char> {
    acronym
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Byte ranges of words split on whitespace, hyphen and slash.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        let sep = c.is_whitespace() || c == '-' || c == '/';
        match (sep, start) {
            (true, Some(s)) => {
                out.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, text.len()));
    }
    out
}

fn initial(word: &str) -> Option<char> {
    word.chars()
        .find(|c| c.is_alphanumeric())
        .and_then(|c| c.to_lowercase().next())
}

/// End of the word whose initial consumes the last acronym character, when
/// word initials alone spell the acronym from the first word on.
fn initials_end(acronym: &str, long: &str) -> Option<usize> {
    let wanted = acronym_chars(acronym);
    let words = word_spans(long);
    if words.first().and_then(|&(s, e)| initial(&long[s..e])) != wanted.first().copied() {
        return None;
    }
    let mut k = 0;
    for (s, e) in words {
        if initial(&long[s..e]) == wanted.get(k).copied() {
            k += 1;
            if k == wanted.len() {
                return Some(e);
            }
        }
    }
    None
}

/// End of the word where the acronym characters, matched in order against
/// all letters, are used up. The first word must start with the first one.
fn letters_end(acronym: &str, long: &str) -> Option<usize> {
    let wanted = acronym_chars(acronym);
    let words = word_spans(long);
    if words.first().and_then(|&(s, e)| initial(&long[s..e])) != wanted.first().copied() {
        return None;
    }
    let mut k = 0;
    for (s, e) in words {
        for c in long[s..e].chars().flat_map(char::to_lowercase) {
            if wanted.get(k) == Some(&c) {
                k += 1;
            }
        }
        if k == wanted.len() {
            return Some(e);
        }
    }
    None
}

fn letters_cover(acronym: &str, long: &str) -> bool {
    letters_end(acronym, long).is_some()
}

/// Byte offset in `phrase` where the long form for `acronym` starts: the
/// rightmost word that begins with the acronym's first character and from
/// which the acronym's characters appear in order.
fn long_form_start(acronym: &str, phrase: &str) -> Option<usize> {
    let first = *acronym_chars(acronym).first()?;
    word_spans(phrase)
        .into_iter()
        .rev()
        .filter(|&(s, e)| initial(&phrase[s..e]) == Some(first))
        .map(|(s, _)| s)
        .find(|&s| letters_cover(acronym, &phrase[s..]))
}

/// Collapse whitespace and trim trailing separators.
fn tidy(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(&[',', ';', ':', '-', '–', '—'][..])
        .trim()
        .to_string()
}

/// Comparison key for expansions: lowercase alphanumeric words.
fn normalize_expansion(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// All-capital heading line of three or more words.
fn is_heading(line: &str) -> bool {
    let words = line
        .split_whitespace()
        .filter(|w| w.chars().any(char::is_alphabetic))
        .count();
    words >= 3 && !line.chars().any(char::is_lowercase)
}
