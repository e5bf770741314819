//! Offset handling: byte/char conversion, bounded segments, word-bounded search.
//!
//! # The Problem
//!
//! `regex` and `str::match_indices` report **byte** offsets, while every
//! offset docent reports is a **character** offset (Unicode scalar values),
//! so that consumers in other languages can slice the text directly.
//!
//! ```text
//! Text: "Coût: Systems Engineer"
//!        C  o  û     t  :     S
//! Byte:  0  1  2  3  4  5  6  7
//! Char:  0  1  2     3  4  5  6
//! ```
//!
//! [`SpanConverter`] precomputes the mapping once per text so each
//! conversion is O(1). [`segments`] splits a document into line segments,
//! each capped in length, so that every regex pass has a bounded input.

/// Byte-to-char table: `map[byte_idx]` is the char index.
fn build_byte_to_char_map(text: &str) -> Vec<usize> {
    let mut map = vec![0usize; text.len() + 1];

    for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
        for i in 0..ch.len_utf8() {
            if byte_idx + i < map.len() {
                map[byte_idx + i] = char_idx;
            }
        }
    }

    if !map.is_empty() {
        map[text.len()] = text.chars().count();
    }

    map
}

/// Byte-to-char converter for many offsets into the same text.
#[derive(Debug, Clone)]
pub struct SpanConverter {
    byte_to_char: Vec<usize>,
    is_ascii: bool,
}

impl SpanConverter {
    /// Create a converter for the given text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            // identity
            Self {
                byte_to_char: Vec::new(),
                is_ascii: true,
            }
        } else {
            Self {
                byte_to_char: build_byte_to_char_map(text),
                is_ascii: false,
            }
        }
    }

    /// Convert byte offset to char offset.
    #[must_use]
    pub fn byte_to_char(&self, byte_idx: usize) -> usize {
        if self.is_ascii {
            byte_idx
        } else {
            self.byte_to_char
                .get(byte_idx)
                .copied()
                .unwrap_or(self.byte_to_char.last().copied().unwrap_or(0))
        }
    }

    /// Check if this text is ASCII.
    #[must_use]
    pub const fn is_ascii(&self) -> bool {
        self.is_ascii
    }
}

/// Truncate `text` to at most `max_chars` characters, on a char boundary.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// A line of the document, capped in length, with its document position.
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    /// The (possibly truncated) line text.
    pub text: &'a str,
    /// Byte offset of the line start in the document.
    pub byte_offset: usize,
    /// Char offset of the line start in the document.
    pub char_offset: usize,
    converter: SpanConverter,
}

impl Segment<'_> {
    /// Document char offset of a byte index local to this segment.
    #[must_use]
    pub fn char_at(&self, local_byte: usize) -> usize {
        self.char_offset + self.converter.byte_to_char(local_byte)
    }

    /// Document byte offset of a byte index local to this segment.
    #[must_use]
    pub fn byte_at(&self, local_byte: usize) -> usize {
        self.byte_offset + local_byte
    }
}

/// Split `text` into line segments, each truncated to `max_chars` characters.
///
/// Lines longer than the cap are cut, never dropped; this bounds the input of
/// every regex pass run over a segment.
#[must_use]
pub fn segments(text: &str, max_chars: usize) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut byte_offset = 0;
    let mut char_offset = 0;

    for line in text.split('\n') {
        let capped = truncate_chars(line, max_chars);
        if capped.len() < line.len() {
            log::debug!(
                "segment at char {} truncated from {} to {} bytes",
                char_offset,
                line.len(),
                capped.len()
            );
        }
        if !capped.trim().is_empty() {
            out.push(Segment {
                text: capped,
                byte_offset,
                char_offset,
                converter: SpanConverter::new(capped),
            });
        }
        byte_offset += line.len() + 1;
        char_offset += line.chars().count() + 1;
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Find every case-insensitive, word-bounded occurrence of `needle` in `text`.
///
/// Returns byte ranges. Case folding is ASCII-only so byte offsets in the
/// folded text line up with the original.
#[must_use]
pub fn find_word_bounded(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle = needle.trim();
    if needle.is_empty() || needle.len() > text.len() {
        return Vec::new();
    }
    let hay = text.to_ascii_lowercase();
    let pat = needle.to_ascii_lowercase();
    find_word_bounded_folded(text, &hay, &pat)
}

/// Same as [`find_word_bounded`] with the haystack already ASCII-lowercased.
///
/// `folded` must be `text.to_ascii_lowercase()` and `pat` lowercase.
#[must_use]
pub fn find_word_bounded_folded(text: &str, folded: &str, pat: &str) -> Vec<(usize, usize)> {
    if pat.is_empty() {
        return Vec::new();
    }
    folded
        .match_indices(pat)
        .filter_map(|(start, m)| {
            let end = start + m.len();
            let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
            let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
            (before_ok && after_ok).then_some((start, end))
        })
        .collect()
}

/// Byte range of the sentence enclosing `byte_idx`, capped at `max_len` bytes
/// on each side of the index.
#[must_use]
pub fn sentence_bounds(text: &str, byte_idx: usize, max_len: usize) -> (usize, usize) {
    let byte_idx = byte_idx.min(text.len());
    let bytes = text.as_bytes();
    let floor = byte_idx.saturating_sub(max_len);
    let ceil = (byte_idx + max_len).min(text.len());

    let mut start = floor;
    let mut i = byte_idx;
    while i > floor {
        let c = bytes[i - 1];
        if c == b'\n' {
            start = i;
            break;
        }
        if i >= 2 && matches!(bytes[i - 2], b'.' | b'!' | b'?') && c.is_ascii_whitespace() {
            start = i;
            break;
        }
        i -= 1;
    }

    let mut end = ceil;
    let mut j = byte_idx;
    while j < ceil {
        let c = bytes[j];
        if c == b'\n' {
            end = j;
            break;
        }
        if matches!(c, b'.' | b'!' | b'?')
            && bytes.get(j + 1).map_or(true, |n| n.is_ascii_whitespace())
        {
            end = j + 1;
            break;
        }
        j += 1;
    }

    let start = floor_char_boundary(text, start);
    let end = ceil_char_boundary(text, end.max(start));
    (start, end)
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx.min(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_identity() {
        let conv = SpanConverter::new("Hello World");
        assert!(conv.is_ascii());
        assert_eq!(conv.byte_to_char(5), 5);
    }

    #[test]
    fn multibyte_offsets() {
        let text = "Coût: Systems Engineer";
        let byte = text.find("Systems").unwrap();
        assert_eq!(byte, 7);
        let conv = SpanConverter::new(text);
        assert!(!conv.is_ascii());
        assert_eq!((conv.byte_to_char(byte), conv.byte_to_char(byte + 7)), (6, 13));
        assert_eq!(conv.byte_to_char(text.len()), text.chars().count());
    }

    #[test]
    fn segments_track_offsets_and_cap() {
        let text = "first line\n\nsécond line here";
        let segs = segments(text, 6);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].text, "first ");
        assert_eq!(segs[1].char_offset, 12);
        assert_eq!(segs[1].text, "sécond");
        assert_eq!(segs[1].char_at(3), 14);
        assert_eq!(segs[1].byte_at(3), segs[1].byte_offset + 3);
    }

    #[test]
    fn word_bounded_search() {
        let text = "The Engineer and the Engineers met the ENGINEER's lead.";
        let hits = find_word_bounded(text, "engineer");
        assert_eq!(hits.len(), 2);
        assert_eq!(&text[hits[0].0..hits[0].1], "Engineer");
        assert_eq!(&text[hits[1].0..hits[1].1], "ENGINEER");
    }

    #[test]
    fn word_bounded_rejects_inner_matches() {
        assert!(find_word_bounded("reengineering", "engineer").is_empty());
        assert!(find_word_bounded("", "engineer").is_empty());
        assert!(find_word_bounded("engineer", "").is_empty());
    }

    #[test]
    fn sentence_bounds_split_on_terminators() {
        let text = "First one. The SE shall approve it. Last.";
        let idx = text.find("SE").unwrap();
        let (s, e) = sentence_bounds(text, idx, 300);
        assert_eq!(&text[s..e], "The SE shall approve it.");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
