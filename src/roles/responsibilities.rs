//! "Responsibilities" section parser.
//!
//! Recognizes a heading such as `Responsibilities`, `3.2 Roles and
//! Responsibilities:` and reads the list that follows, one `role: duty`
//! pair per item:
//!
//! ```text
//! Roles and Responsibilities
//! - Systems Engineer: maintains the requirements baseline
//! - Test Director – approves test procedures
//! 2. Safety Engineer - reviews hazard reports
//! ```
//!
//! The section ends at the first line that is neither blank nor a list item.
//! Lines are capped in length before any rule runs on them.

use crate::library::compile_rule;
use crate::offset::{truncate_chars, SpanConverter};
use once_cell::sync::Lazy;
use regex::Regex;

/// One role/duty pair read from a responsibilities list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsibilityEntry {
    /// Role text as written.
    pub role: String,
    /// Duty text, trimmed.
    pub duty: String,
    /// Document char offset of `role`.
    pub offset: usize,
    /// Document byte offset of `role`.
    pub byte_offset: usize,
}

static HEADING: Lazy<Option<Regex>> = Lazy::new(|| {
    compile_rule(
        "responsibilities_heading",
        r"(?i)^[ \t]*(?:\d+(?:\.\d+)*\.?[ \t]+)?(?:roles[ \t]+and[ \t]+)?responsibilities[ \t]*:?[ \t]*$",
    )
});

static BULLET: Lazy<Option<Regex>> = Lazy::new(|| {
    compile_rule(
        "responsibilities_bullet",
        r"^[ \t]*(?:[-*•·▪]|\d+[.)]|[a-z][.)])[ \t]+",
    )
});

static ITEM: Lazy<Option<Regex>> = Lazy::new(|| {
    compile_rule(
        "responsibilities_item",
        r"^[ \t]*(?:(?:[-*•·▪]|\d+[.)]|[a-z][.)])[ \t]+)?([A-Z][^:\-–—\n]{1,60}?)[ \t]*(?::|–|—|[ \t]-)[ \t]*(\S.*)$",
    )
});

/// Parse every responsibilities section in `text`, reading at most
/// `max_line_chars` characters of each line.
#[must_use]
pub fn parse_responsibilities(text: &str, max_line_chars: usize) -> Vec<ResponsibilityEntry> {
    let (Some(heading), Some(bullet), Some(item)) =
        ((*HEADING).as_ref(), (*BULLET).as_ref(), (*ITEM).as_ref())
    else {
        return Vec::new();
    };
    let converter = SpanConverter::new(text);
    let mut out = Vec::new();
    let mut in_section = false;
    let mut byte_offset = 0;

    for full_line in text.split('\n') {
        let line_start = byte_offset;
        byte_offset += full_line.len() + 1;
        let line = truncate_chars(full_line, max_line_chars);

        if heading.is_match(line) {
            in_section = true;
            continue;
        }
        if !in_section || line.trim().is_empty() {
            continue;
        }
        match item.captures(line) {
            Some(caps) => {
                let (Some(role), Some(duty)) = (caps.get(1), caps.get(2)) else {
                    continue;
                };
                let role_text = role.as_str().trim_end();
                let duty_text = duty.as_str().trim();
                if role_text.is_empty() || duty_text.is_empty() {
                    continue;
                }
                let b = line_start + role.start();
                out.push(ResponsibilityEntry {
                    role: role_text.to_string(),
                    duty: duty_text.trim_end_matches('.').to_string(),
                    offset: converter.byte_to_char(b),
                    byte_offset: b,
                });
            }
            None if bullet.is_match(line) => {}
            None => in_section = false,
        }
    }

    log::debug!("responsibilities parser found {} entries", out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_separators() {
        let text = "Intro text.\n\
                    Roles and Responsibilities\n\
                    - Systems Engineer: maintains the requirements baseline.\n\
                    - Test Director – approves test procedures\n\
                    2. Safety Engineer - reviews hazard reports\n\
                    \n\
                    Next section starts here.\n\
                    - Ignored Role: not in a section";
        let entries = parse_responsibilities(text, 2_000);
        let pairs: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.role.as_str(), e.duty.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Systems Engineer", "maintains the requirements baseline"),
                ("Test Director", "approves test procedures"),
                ("Safety Engineer", "reviews hazard reports"),
            ]
        );
    }

    #[test]
    fn offsets_point_at_role() {
        let text = "3.1 Responsibilities:\n* Data Manager: archives records";
        let entries = parse_responsibilities(text, 2_000);
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(&text[e.byte_offset..e.byte_offset + e.role.len()], "Data Manager");
        assert_eq!(e.offset, e.byte_offset);
    }

    #[test]
    fn long_items_are_capped() {
        let text = format!("Responsibilities\n- Data Manager: {}", "archives records, ".repeat(2_000));
        let entries = parse_responsibilities(&text, 100);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, "Data Manager");
        assert!(entries[0].duty.chars().count() < 100);
    }

    #[test]
    fn no_heading_no_entries() {
        assert!(parse_responsibilities("- Systems Engineer: does things", 2_000).is_empty());
        assert!(parse_responsibilities("", 2_000).is_empty());
    }
}
