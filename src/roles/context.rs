//! Occurrence context: enclosing sentence, duty phrase, location label.

use crate::library::compile_rule;
use crate::offset::{sentence_bounds, truncate_chars, SpanConverter};
use docent_core::{ActionType, Paragraph, RoleOccurrence};
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum characters kept of an enclosing sentence.
pub const MAX_CONTEXT_CHARS: usize = 300;
/// Maximum characters kept of a responsibility phrase.
pub const MAX_RESPONSIBILITY_CHARS: usize = 150;
/// Maximum characters after a mention scanned for its duty phrase.
const DUTY_WINDOW_CHARS: usize = MAX_RESPONSIBILITY_CHARS * 4;

/// Enclosing sentence of the byte index, whitespace collapsed and capped.
#[must_use]
pub fn sentence_at(text: &str, byte_idx: usize) -> String {
    let (s, e) = sentence_bounds(text, byte_idx, MAX_CONTEXT_CHARS * 2);
    let collapsed = text[s..e].split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, MAX_CONTEXT_CHARS).to_string()
}

static AFTER_MODAL: Lazy<Option<Regex>> = Lazy::new(|| {
    compile_rule(
        "duty_after_modal",
        r"(?i)^['’]?s?(?:[ \t]*\([^()\n]{1,12}\))?[ \t]*(?:(?:shall|will|must|should)(?:[ \t]+also)?|(?:is|are)[ \t]+(?:responsible|accountable)[ \t]+for|[:–—]|-[ \t])[ \t]*([^.;\n]{3,})",
    )
});

static PRESENT_VERB: Lazy<Option<Regex>> = Lazy::new(|| {
    compile_rule(
        "duty_present_verb",
        r"(?i)^[ \t]+((?:approves|reviews|signs|authorizes|verifies|validates|manages|leads|oversees|coordinates|chairs|prepares|develops|submits|maintains|ensures|conducts|performs|supports|provides|establishes)\b[^.;\n]*)",
    )
});

/// Duty phrase that follows a role mention ending at `byte_end`.
///
/// Recognizes "X shall ...", "X is responsible for ...", "X: ...",
/// and "X approves ...", with an optional "(ACR)" between the mention and
/// the modal. The modal itself is not part of the phrase. Only the next
/// few hundred characters are read.
#[must_use]
pub fn responsibility_after(text: &str, byte_end: usize) -> Option<String> {
    let rest = truncate_chars(text.get(byte_end..)?, DUTY_WINDOW_CHARS);
    let duty = (*AFTER_MODAL)
        .as_ref()
        .and_then(|re| re.captures(rest))
        .and_then(|c| c.get(1))
        .or_else(|| {
            (*PRESENT_VERB)
                .as_ref()
                .and_then(|re| re.captures(rest))
                .and_then(|c| c.get(1))
        })?;
    let phrase = duty.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
    let phrase = phrase.trim_end_matches(&[',', ':'][..]).trim();
    if phrase.is_empty() {
        return None;
    }
    Some(truncate_chars(phrase, MAX_RESPONSIBILITY_CHARS).to_string())
}

/// Build an occurrence for the mention at `text[byte_start..byte_end]`.
///
/// An explicit `duty` (from a responsibilities list) wins over the phrase
/// read after the mention.
#[allow(clippy::too_many_arguments)]
pub(crate) fn occurrence(
    text: &str,
    byte_start: usize,
    byte_end: usize,
    char_start: usize,
    confidence: f64,
    pattern: &str,
    duty: Option<String>,
    locations: &LocationIndex,
) -> RoleOccurrence {
    let responsibility = duty.or_else(|| responsibility_after(text, byte_end));
    let action_type = responsibility
        .as_deref()
        .map_or(ActionType::Other, ActionType::from_phrase);
    RoleOccurrence {
        role_text: text[byte_start..byte_end].to_string(),
        context: sentence_at(text, byte_start),
        responsibility,
        action_type,
        location: locations.label_for(char_start),
        offset: char_start,
        confidence: confidence.clamp(0.0, 1.0),
        pattern: pattern.to_string(),
    }
}

/// Maps char offsets to human-readable location labels.
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    /// (char start, paragraph index), ascending by start
    starts: Vec<(usize, usize)>,
    label: Option<String>,
}

impl LocationIndex {
    /// Locate each paragraph in `text`, in order.
    ///
    /// Paragraphs that cannot be found verbatim after the previous one are
    /// skipped; offsets falling in them are attributed to the preceding
    /// paragraph.
    #[must_use]
    pub fn new(text: &str, paragraphs: &[Paragraph], label: Option<&str>) -> Self {
        let converter = SpanConverter::new(text);
        let mut starts = Vec::with_capacity(paragraphs.len());
        let mut cursor = 0;
        for p in paragraphs {
            let needle = p.text.trim();
            if needle.is_empty() {
                continue;
            }
            if let Some(found) = text.get(cursor..).and_then(|rest| rest.find(needle)) {
                let byte = cursor + found;
                starts.push((converter.byte_to_char(byte), p.index));
                cursor = byte + needle.len();
            } else {
                log::trace!("paragraph {} not found in text", p.index);
            }
        }
        Self {
            starts,
            label: label.map(str::to_string).filter(|l| !l.trim().is_empty()),
        }
    }

    /// Label for a char offset: "Paragraph N", "<label>, paragraph N",
    /// "<label>", or "document".
    #[must_use]
    pub fn label_for(&self, char_offset: usize) -> String {
        let paragraph = match self.starts.partition_point(|(s, _)| *s <= char_offset) {
            0 => None,
            i => Some(self.starts[i - 1].1),
        };
        match (&self.label, paragraph) {
            (Some(l), Some(n)) => format!("{}, paragraph {}", l, n),
            (None, Some(n)) => format!("Paragraph {}", n),
            (Some(l), None) => l.clone(),
            (None, None) => "document".to_string(),
        }
    }
}
