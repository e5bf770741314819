//! Schwartz-Hearst long-form search.
//!
//! Given a parenthesized short form and the text before it, match the short
//! form's characters right-to-left against word initials, walking the words
//! right-to-left:
//!
//! ```text
//! Guidance, Navigation and Control (GN&C)
//! ^G        ^N             ^C      <- G N C consumed backward
//! ```
//!
//! Non-alphanumeric short-form characters (`&`, `/`, `-`) are skipped. The
//! search window is the 200 characters before the parenthesis, cut at the
//! last sentence terminator or parenthesis, and limited to the last
//! `min(n + 5 + 2n, W)` words, where `n` is the short-form length and `W`
//! the word count of the window.
//!
//! Schwartz, A. and Hearst, M. (2003). "A Simple Algorithm for Identifying
//! Abbreviation Definitions in Biomedical Text".

/// Characters of preceding text considered.
pub const WINDOW_CHARS: usize = 200;
/// Confidence assigned to a recovered long form.
pub const CONFIDENCE: f64 = 0.88;

const MIN_SHORT: usize = 2;
const MAX_SHORT: usize = 12;

/// A recovered long form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongForm {
    /// Byte offset of the long form inside the `preceding` text passed in.
    pub start: usize,
    /// The long form, trimmed.
    pub text: String,
}

/// Whether a parenthesized token looks like a short form: 2-12 characters,
/// no whitespace, starts alphanumeric, and is mostly upper-case.
#[must_use]
pub fn is_short_form(token: &str) -> bool {
    let len = token.chars().count();
    if !(MIN_SHORT..=MAX_SHORT).contains(&len) || token.chars().any(char::is_whitespace) {
        return false;
    }
    if !token.chars().next().is_some_and(char::is_alphanumeric) {
        return false;
    }
    let letters = token.chars().filter(|c| c.is_alphabetic()).count();
    let upper = token.chars().filter(|c| c.is_uppercase()).count();
    letters > 0 && upper >= 2 && upper * 2 >= letters
}

/// Find the long form for `short` in the text immediately before its
/// opening parenthesis.
#[must_use]
pub fn find_long_form(short: &str, preceding: &str) -> Option<LongForm> {
    let wanted: Vec<char> = short
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    if wanted.is_empty() {
        return None;
    }

    let window_start = window_start(preceding);
    let window = &preceding[window_start..];
    let words = words(window);
    let n = short.chars().count();
    let limit = (n + 5 + 2 * n).min(words.len());
    let considered = &words[words.len() - limit..];

    let mut remaining = wanted.len();
    let mut first_word = None;
    for &(start, initial) in considered.iter().rev() {
        if remaining == 0 {
            break;
        }
        if initial == wanted[remaining - 1] {
            remaining -= 1;
            first_word = Some(start);
        }
    }
    if remaining > 0 {
        return None;
    }

    let start = first_word?;
    let text = window[start..]
        .trim_end()
        .trim_end_matches(&[',', ':', ';', '-', '–', '—'][..])
        .trim_end();
    if text.chars().count() <= short.chars().count() {
        return None;
    }
    Some(LongForm {
        start: window_start + start,
        text: text.to_string(),
    })
}

/// Byte offset where the search window begins.
fn window_start(preceding: &str) -> usize {
    let floor = preceding
        .char_indices()
        .rev()
        .nth(WINDOW_CHARS - 1)
        .map_or(0, |(i, _)| i);
    preceding[floor..]
        .rfind(&['.', '!', '?', ';', '(', ')', '\n'][..])
        .map_or(floor, |i| floor + i + 1)
}

/// (byte start, lowercase initial) of each word; words split on whitespace,
/// hyphen and slash, and start at their first alphanumeric character.
fn words(window: &str) -> Vec<(usize, char)> {
    let mut out = Vec::new();
    let mut in_word = false;
    for (i, c) in window.char_indices() {
        if c.is_whitespace() || c == '-' || c == '/' {
            in_word = false;
            continue;
        }
        if !in_word && c.is_alphanumeric() {
            in_word = true;
            if let Some(lower) = c.to_lowercase().next() {
                out.push((i, lower));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long(short: &str, preceding: &str) -> Option<String> {
        find_long_form(short, preceding).map(|l| l.text)
    }

    #[test]
    fn skips_non_alphanumeric_short_form_chars() {
        assert_eq!(long("A/C", "The Air Conditioning ").as_deref(), Some("Air Conditioning"));
        assert_eq!(
            long("GN&C", "Subsystems include Guidance, Navigation and Control ").as_deref(),
            Some("Guidance, Navigation and Control")
        );
    }

    #[test]
    fn hyphenated_words_split() {
        assert_eq!(long("BIT", "A Built-In Test ").as_deref(), Some("Built-In Test"));
    }

    #[test]
    fn window_cut_at_sentence_end() {
        assert_eq!(long("TP", "Tests pass. The budget "), None);
        assert_eq!(long("TP", "Tests pass. The Test Plan ").as_deref(), Some("Test Plan"));
    }

    #[test]
    fn word_limit_applies() {
        // n = 2 allows 2 + 5 + 4 = 11 words
        let far = "Alpha one two three four five six seven eight nine ten Bravo ";
        assert_eq!(long("AB", far), None);
        let near = "Alpha one two three four five six seven eight Bravo ";
        assert!(long("AB", near).is_some());
    }

    #[test]
    fn start_is_byte_offset_in_preceding() {
        let pre = "Coût: the Flight Readiness Review ";
        let lf = find_long_form("FRR", pre).unwrap();
        assert_eq!(&pre[lf.start..lf.start + 6], "Flight");
    }

    #[test]
    fn short_form_shape() {
        assert!(is_short_form("GN&C"));
        assert!(is_short_form("DoD"));
        assert!(is_short_form("A/C"));
        assert!(!is_short_form("a"));
        assert!(!is_short_form("see above"));
        assert!(!is_short_form("Optional"));
        assert!(!is_short_form("-AB"));
        assert!(!is_short_form("ABCDEFGHIJKLM"));
    }
}
