//! Role candidate generation.
//!
//! Candidates come from three places:
//!
//! - [`pattern_candidates`]: an ordered, declarative table of syntactic rules,
//!   each targeting one grammatical context ("The X shall", "approved by the
//!   X", "X's responsibility", ...). One generic driver runs every rule over
//!   every line segment.
//! - [`direct_scan`]: a literal, word-bounded search for every known role and
//!   alias, so whitelist roles are never missed by the rule cascade.
//! - [`list_candidates`]: the roles named in a responsibilities list, read by
//!   [`super::responsibilities`], each with its duty attached.
//!
//! Every candidate records the rule that produced it.
//!
//! # Templates
//!
//! Rule sources use placeholders, expanded once at compile time:
//!
//! | Placeholder | Matches |
//! |-------------|---------|
//! | `{T}` | a run of 1-6 capitalized words ("Lead Systems Engineer") |
//! | `{S}` | up to 4 words ending in a role suffix, any case ("the test engineer") |
//! | `{TS}` | up to 4 capitalized words ending in a capitalized role suffix |
//! | `{M}` | a directive modal (shall, will, must, should, may) |

use super::responsibilities::parse_responsibilities;
use crate::library::{compile_rule, roles::ROLE_SUFFIXES, PatternLibrary};
use crate::offset::{segments, Segment, SpanConverter};
use once_cell::sync::Lazy;
use regex::Regex;

/// A raw role mention before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Cleaned surface text, whitespace collapsed.
    pub text: String,
    /// Document byte range of the cleaned text.
    pub byte_start: usize,
    /// Exclusive end of the byte range.
    pub byte_end: usize,
    /// Document char offset of the cleaned text.
    pub start: usize,
    /// Name of the rule that produced it.
    pub pattern: &'static str,
    /// Extra surface form tied to the mention (the acronym in "X (ACR)").
    pub variant: Option<String>,
    /// Duty attached by the responsibilities parser.
    pub responsibility: Option<String>,
}

impl Candidate {
    /// Length of the byte span.
    #[must_use]
    pub fn span_len(&self) -> usize {
        self.byte_end - self.byte_start
    }

    /// Whether this span lies within `other`'s.
    #[must_use]
    pub fn within(&self, other: &Candidate) -> bool {
        other.byte_start <= self.byte_start && self.byte_end <= other.byte_end
    }
}

// =============================================================================
// Rule table
// =============================================================================

struct RuleDef {
    name: &'static str,
    template: &'static str,
    /// Capture group holding an abbreviation rather than a role.
    variant_group: Option<usize>,
}

/// A compiled rule.
pub(crate) struct RoleRule {
    pub name: &'static str,
    pub regex: Regex,
    variant_group: Option<usize>,
}

const MODALS: &str = r"(?:shall|will|must|should|may)";

/// Ordered rule table. Order only affects which rule is credited when two
/// produce the identical span.
const RULE_DEFS: &[RuleDef] = &[
    RuleDef {
        name: "subject_directive",
        template: r"\b(?:[Tt]he|[Aa]n?|[Ee]ach|[Aa]ny)[ \t]+({T})[ \t]+(?:{M})\b",
        variant_group: None,
    },
    RuleDef {
        name: "subject_directive_suffix",
        template: r"(?i)\b(?:the|each|any)[ \t]+({S})[ \t]+(?:{M})\b",
        variant_group: None,
    },
    RuleDef {
        name: "responsible_for",
        template: r"\b({T})[ \t]+(?:is|are)[ \t]+(?:responsible|accountable)[ \t]+for\b",
        variant_group: None,
    },
    RuleDef {
        name: "responsible_for_suffix",
        template: r"(?i)\b({S})[ \t]+(?:is|are)[ \t]+(?:responsible|accountable)[ \t]+for\b",
        variant_group: None,
    },
    RuleDef {
        name: "agent_by",
        template: r"\b(?:by|from)[ \t]+(?:the[ \t]+)?({T})",
        variant_group: None,
    },
    RuleDef {
        name: "agent_by_suffix",
        template: r"(?i)\b(?:approved|reviewed|signed|performed|conducted|prepared|submitted|verified|authorized|accepted|maintained|managed|led|chaired|provided|developed|issued|owned)[ \t]+by[ \t]+(?:the[ \t]+)?({S})",
        variant_group: None,
    },
    RuleDef {
        name: "possessive",
        template: r"\b({T})['’]s[ \t]+(?:responsibilit|authority|approval|role|dut|concurrence|signature|review|direction|discretion)",
        variant_group: None,
    },
    RuleDef {
        name: "acronym_definition",
        template: r"\b({T})[ \t]*\(([A-Z][A-Za-z&]{1,9})\)",
        variant_group: Some(2),
    },
    RuleDef {
        name: "sentence_initial_directive",
        template: r"(?:^|[.!?][ \t]+)[ \t]*(?:[-*•][ \t]*|\d+[.)][ \t]*)?({T})[ \t]+(?:shall|will|must)\b",
        variant_group: None,
    },
    RuleDef {
        name: "coordinated_pair",
        template: r"(?i)\b(?:by|from|between|with)[ \t]+the[ \t]+({S})[ \t]+and[ \t]+(?:the[ \t]+)?({S})",
        variant_group: None,
    },
    RuleDef {
        name: "role_as",
        template: r"(?i)\b(?:serves?|serving|acts?|acting|designated|appointed|assigned)[ \t]+as[ \t]+(?:the[ \t]+|an?[ \t]+)?({S})",
        variant_group: None,
    },
    RuleDef {
        name: "in_coordination_with",
        template: r"(?i)\b(?:in[ \t]+coordination[ \t]+with|in[ \t]+consultation[ \t]+with|coordinates?[ \t]+with|consults?[ \t]+with)[ \t]+the[ \t]+({S})",
        variant_group: None,
    },
    RuleDef {
        name: "report_to",
        template: r"(?i)\breports?[ \t]+(?:directly[ \t]+)?to[ \t]+the[ \t]+({S})",
        variant_group: None,
    },
    RuleDef {
        name: "submit_to",
        template: r"(?i)\b(?:submitted|submit|provided|delivered|forwarded|sent|escalated)[ \t]+to[ \t]+the[ \t]+({S})",
        variant_group: None,
    },
    RuleDef {
        name: "role_title_colon",
        template: r"^[ \t]*(?:[-*•][ \t]*)?({T})[ \t]*:",
        variant_group: None,
    },
    RuleDef {
        name: "approval_verb",
        template: r"(?i)\bthe[ \t]+({S})[ \t]+(?:approves|reviews|signs|authorizes|concurs|verifies|chairs|leads|oversees|manages|coordinates|ensures|maintains|prepares)\b",
        variant_group: None,
    },
    RuleDef {
        name: "with_approval_of",
        template: r"(?i)\b(?:approval|concurrence|signature|authorization|direction)[ \t]+of[ \t]+the[ \t]+({S})",
        variant_group: None,
    },
    RuleDef {
        name: "title_case_suffix",
        template: r"\b((?:[A-Z][\w'’&\-]*[ \t]+){0,4}(?:{TS})s?)\b",
        variant_group: None,
    },
    RuleDef {
        name: "team_membership",
        template: r"(?i)\b(?:members?|chair|chairperson|representatives?)[ \t]+of[ \t]+the[ \t]+({S})",
        variant_group: None,
    },
    RuleDef {
        name: "responsible_party_field",
        template: r"^[ \t]*(?i:responsible[ \t]+(?:party|organization|role)|owner|approver|approval[ \t]+authority|point[ \t]+of[ \t]+contact)[ \t]*:[ \t]*(?:[Tt]he[ \t]+)?({T})",
        variant_group: None,
    },
];

fn suffix_alternation(title_case: bool) -> String {
    let mut suffixes: Vec<String> = ROLE_SUFFIXES
        .iter()
        .map(|s| {
            if title_case {
                let mut c = s.chars();
                c.next()
                    .map(|f| f.to_uppercase().chain(c).collect())
                    .unwrap_or_default()
            } else {
                (*s).to_string()
            }
        })
        .collect();
    // longest first so "leader" is tried before "lead"
    suffixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    suffixes.join("|")
}

fn expand(template: &str) -> String {
    let title = r"[A-Z][\w'’&\-]*(?:[ \t]+[A-Z][\w'’&\-]*){0,5}";
    let suffix = format!(
        r"(?:[A-Za-z][\w'’&\-]*[ \t]+){{0,4}}(?:{})s?\b",
        suffix_alternation(false)
    );
    template
        .replace("{TS}", &suffix_alternation(true))
        .replace("{T}", title)
        .replace("{S}", &suffix)
        .replace("{M}", MODALS)
}

static RULES: Lazy<Vec<RoleRule>> = Lazy::new(|| {
    RULE_DEFS
        .iter()
        .filter_map(|def| {
            compile_rule(def.name, &expand(def.template)).map(|regex| RoleRule {
                name: def.name,
                regex,
                variant_group: def.variant_group,
            })
        })
        .collect()
});

/// Names of the active rules, in table order.
#[must_use]
pub fn rule_names() -> Vec<&'static str> {
    RULES.iter().map(|r| r.name).collect()
}

// =============================================================================
// Cleanup
// =============================================================================

/// Words after which everything to the left is dropped.
const CUT_WORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "all", "any", "such",
    "by", "to", "for", "with", "from", "under", "per", "at", "on", "in", "into", "upon", "our",
    "its", "their", "your",
];

const EDGE_PUNCT: &[char] = &[
    ',', ';', ':', '.', '(', ')', '[', ']', '"', '\'', '’', '“', '”', '-', '–', '—', '!', '?',
];

static PHONE_OR_ZIP: Lazy<Option<Regex>> = Lazy::new(|| {
    compile_rule(
        "phone_or_zip",
        r"\d{3}[-. )][ \t]?\d{3}[-. ]\d{4}|\b\d{5}(?:-\d{4})?\b",
    )
});

/// Trim boundary words and punctuation from a raw match.
///
/// Returns the byte range of the cleaned phrase inside `raw`, or `None`
/// when the phrase is junk (phone/ZIP digits, slash alternatives, OCR
/// letter spacing, nothing left after trimming).
pub(crate) fn clean(raw: &str, lib: &PatternLibrary) -> Option<(usize, usize)> {
    let mut words: Vec<(usize, usize)> = Vec::new();
    let mut start = None;
    for (i, c) in raw.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, raw.len()));
    }

    let bare = |w: &(usize, usize)| raw[w.0..w.1].trim_matches(EDGE_PUNCT).to_lowercase();

    if let Some(cut) = words[..words.len().saturating_sub(1)]
        .iter()
        .rposition(|w| CUT_WORDS.contains(&bare(w).as_str()))
    {
        words.drain(..=cut);
    }
    while words.first().is_some_and(|w| lib.is_leading_noise(&bare(w))) {
        words.remove(0);
    }
    while words.last().is_some_and(|w| lib.is_trailing_noise(&bare(w))) {
        words.pop();
    }

    let (first, last) = (words.first()?, words.last()?);
    let mut s = first.0;
    let mut e = last.1;
    let slice = &raw[s..e];
    let trimmed_start = slice.len() - slice.trim_start_matches(EDGE_PUNCT).len();
    s += trimmed_start;
    let mut slice = &raw[s..e];
    for possessive in ["'s", "’s"] {
        if let Some(stripped) = slice.strip_suffix(possessive) {
            slice = stripped;
        }
    }
    slice = slice.trim_end_matches(EDGE_PUNCT);
    e = s + slice.len();
    if s >= e {
        return None;
    }

    let phrase = &raw[s..e];
    if !phrase.chars().any(char::is_alphabetic) || phrase.contains('/') {
        return None;
    }
    if (*PHONE_OR_ZIP).as_ref().is_some_and(|re| re.is_match(phrase)) {
        return None;
    }
    let mut single_letters = 0;
    for w in phrase.split_whitespace() {
        if w.chars().count() == 1 && w.chars().all(char::is_alphabetic) {
            single_letters += 1;
            if single_letters >= 3 {
                return None;
            }
        } else {
            single_letters = 0;
        }
    }
    Some((s, e))
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// =============================================================================
// Drivers
// =============================================================================

fn push_match(
    out: &mut Vec<Candidate>,
    seg: &Segment<'_>,
    local_start: usize,
    raw: &str,
    rule: &RoleRule,
    variant: Option<&str>,
    lib: &PatternLibrary,
) {
    let Some((s, e)) = clean(raw, lib) else {
        log::trace!("rule {}: discarded {:?}", rule.name, raw);
        return;
    };
    let local = local_start + s;
    out.push(Candidate {
        text: collapse(&raw[s..e]),
        byte_start: seg.byte_at(local),
        byte_end: seg.byte_at(local_start + e),
        start: seg.char_at(local),
        pattern: rule.name,
        variant: variant.map(str::to_string),
        responsibility: None,
    });
}

/// Run every rule over every segment of `text`.
#[must_use]
pub fn pattern_candidates(
    text: &str,
    lib: &PatternLibrary,
    max_segment_chars: usize,
) -> Vec<Candidate> {
    let mut out = Vec::new();
    for seg in segments(text, max_segment_chars) {
        for rule in RULES.iter() {
            for caps in rule.regex.captures_iter(seg.text) {
                let variant = rule
                    .variant_group
                    .and_then(|g| caps.get(g))
                    .map(|m| m.as_str());
                for (group, m) in caps.iter().enumerate().skip(1) {
                    let Some(m) = m else { continue };
                    if Some(group) == rule.variant_group {
                        continue;
                    }
                    push_match(&mut out, &seg, m.start(), m.as_str(), rule, variant, lib);
                }
            }
        }
    }
    log::debug!("rule cascade produced {} candidates", out.len());
    out
}

/// Literal, word-bounded scan for every known role and alias.
///
/// Keys of three characters or fewer ("pm", "cor") only match when written
/// upper-case in the text.
#[must_use]
pub fn direct_scan(text: &str, lib: &PatternLibrary) -> Vec<Candidate> {
    let folded = text.to_ascii_lowercase();
    let converter = SpanConverter::new(text);
    let mut out = Vec::new();

    for (key, _) in lib.known_roles().chain(lib.aliases()) {
        let short = key.chars().count() <= 3;
        for (s, e) in crate::offset::find_word_bounded_folded(text, &folded, key) {
            let literal = &text[s..e];
            if short && literal != key.to_uppercase() {
                continue;
            }
            out.push(Candidate {
                text: collapse(literal),
                byte_start: s,
                byte_end: e,
                start: converter.byte_to_char(s),
                pattern: "direct_scan",
                variant: None,
                responsibility: None,
            });
        }
    }
    log::debug!("direct scan produced {} candidates", out.len());
    out
}

/// Candidates for the roles named in a responsibilities list, each carrying
/// its duty.
#[must_use]
pub fn list_candidates(text: &str, lib: &PatternLibrary, max_line_chars: usize) -> Vec<Candidate> {
    let converter = SpanConverter::new(text);
    let out: Vec<Candidate> = parse_responsibilities(text, max_line_chars)
        .into_iter()
        .filter_map(|entry| {
            let (s, e) = clean(&entry.role, lib)?;
            let byte_start = entry.byte_offset + s;
            Some(Candidate {
                text: collapse(&entry.role[s..e]),
                byte_start,
                byte_end: entry.byte_offset + e,
                start: converter.byte_to_char(byte_start),
                pattern: "responsibilities_list",
                variant: None,
                responsibility: Some(entry.duty),
            })
        })
        .collect();
    log::debug!("responsibilities lists produced {} candidates", out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib() -> PatternLibrary {
        PatternLibrary::new()
    }

    fn from_rule<'a>(cands: &'a [Candidate], rule: &str) -> Vec<&'a str> {
        cands
            .iter()
            .filter(|c| c.pattern == rule)
            .map(|c| c.text.as_str())
            .collect()
    }

    // =========================================================================
    // Rule table
    // =========================================================================

    #[test]
    fn every_rule_compiles() {
        assert_eq!(rule_names().len(), RULE_DEFS.len());
    }

    #[test]
    fn subject_directive() {
        let c = pattern_candidates("The Lead Systems Engineer shall chair the board.", &lib(), 10_000);
        assert!(from_rule(&c, "subject_directive").contains(&"Lead Systems Engineer"));
    }

    #[test]
    fn lowercase_subject_directive() {
        let c = pattern_candidates("Each month the test engineer shall file a log.", &lib(), 10_000);
        assert!(from_rule(&c, "subject_directive_suffix").contains(&"test engineer"));
    }

    #[test]
    fn responsible_for() {
        let c = pattern_candidates(
            "The Configuration Manager is responsible for baselines.",
            &lib(),
            10_000,
        );
        assert!(from_rule(&c, "responsible_for").contains(&"Configuration Manager"));
    }

    #[test]
    fn agent_by_suffix() {
        let c = pattern_candidates("Changes are approved by the chief engineer.", &lib(), 10_000);
        assert!(from_rule(&c, "agent_by_suffix").contains(&"chief engineer"));
    }

    #[test]
    fn possessive_strips_apostrophe() {
        let c = pattern_candidates(
            "It is the Mission Director's responsibility to decide.",
            &lib(),
            10_000,
        );
        assert!(from_rule(&c, "possessive").contains(&"Mission Director"));
    }

    #[test]
    fn acronym_definition_records_variant() {
        let c = pattern_candidates("The Test Conductor (TC) leads runs.", &lib(), 10_000);
        let hit = c
            .iter()
            .find(|c| c.pattern == "acronym_definition")
            .expect("acronym rule should fire");
        assert_eq!(hit.text, "Test Conductor");
        assert_eq!(hit.variant.as_deref(), Some("TC"));
    }

    #[test]
    fn coordinated_pair_yields_both() {
        let c = pattern_candidates(
            "Plans are signed by the program manager and the safety engineer.",
            &lib(),
            10_000,
        );
        let hits = from_rule(&c, "coordinated_pair");
        assert!(hits.contains(&"program manager"));
        assert!(hits.contains(&"safety engineer"));
    }

    #[test]
    fn report_and_submit() {
        let c = pattern_candidates(
            "The analyst reports to the risk manager. Results are submitted to the review board.",
            &lib(),
            10_000,
        );
        assert!(from_rule(&c, "report_to").contains(&"risk manager"));
        assert!(from_rule(&c, "submit_to").contains(&"review board"));
    }

    #[test]
    fn field_and_heading_rules() {
        let c = pattern_candidates("Responsible Party: Quality Engineer", &lib(), 10_000);
        assert!(from_rule(&c, "responsible_party_field").contains(&"Quality Engineer"));
        let c = pattern_candidates("Software Lead: owns the build", &lib(), 10_000);
        assert!(from_rule(&c, "role_title_colon").contains(&"Software Lead"));
    }

    #[test]
    fn offsets_are_char_offsets() {
        let text = "Coût.\nThe Risk Manager shall log risks.";
        let c = pattern_candidates(text, &lib(), 10_000);
        let hit = c.iter().find(|c| c.text == "Risk Manager").unwrap();
        let chars: Vec<char> = text.chars().collect();
        let sliced: String = chars[hit.start..hit.start + 12].iter().collect();
        assert_eq!(sliced, "Risk Manager");
        assert_eq!(&text[hit.byte_start..hit.byte_end], "Risk Manager");
    }

    // =========================================================================
    // Cleanup
    // =========================================================================

    fn cleaned(raw: &str) -> Option<String> {
        clean(raw, &lib()).map(|(s, e)| raw[s..e].to_string())
    }

    #[test]
    fn cleanup_trims_boundary_words() {
        assert_eq!(cleaned("the Systems Engineer").as_deref(), Some("Systems Engineer"));
        assert_eq!(cleaned("plan by the test engineer").as_deref(), Some("test engineer"));
        assert_eq!(cleaned("Then Safety Manager,").as_deref(), Some("Safety Manager"));
        assert_eq!(cleaned("Program Manager's").as_deref(), Some("Program Manager"));
    }

    #[test]
    fn cleanup_rejects_junk() {
        assert!(cleaned("Engineer 555-123-4567").is_none());
        assert!(cleaned("Office 20546").is_none());
        assert!(cleaned("Engineer/Manager").is_none());
        assert!(cleaned("S y s Engineer").is_none());
        assert!(cleaned("the").is_none());
    }

    // =========================================================================
    // Direct scan
    // =========================================================================

    #[test]
    fn direct_scan_finds_whitelist_roles() {
        let text = "Coordinate with the contracting officer and the PM.";
        let c = direct_scan(text, &lib());
        let texts: Vec<&str> = c.iter().map(|c| c.text.as_str()).collect();
        assert!(texts.contains(&"contracting officer"));
        assert!(texts.contains(&"PM"));
    }

    #[test]
    fn direct_scan_short_keys_need_upper_case() {
        let c = direct_scan("The meeting is at 3 pm.", &lib());
        assert!(c.iter().all(|c| c.text != "pm"));
    }

    #[test]
    fn list_candidates_carry_duties() {
        let text = "Responsibilities\n- The Data Manager: archives records.";
        let c = list_candidates(text, &lib(), 2_000);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].text, "Data Manager");
        assert_eq!(&text[c[0].byte_start..c[0].byte_end], "Data Manager");
        assert_eq!(c[0].responsibility.as_deref(), Some("archives records"));
    }
}
