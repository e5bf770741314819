//! Boundary cases for out-of-order multi-word verification.
//!
//! A multi-word name with no literal hit is still proven when all of its
//! words occur within the adjacency window of each other.

use docent::roles::verify::PreparedText;
use docent::roles::SourceVerifier;

/// "Safety" and "Officer" separated by exactly `gap` characters.
fn spaced(gap: usize) -> String {
    format!("Safety {} Officer", "x".repeat(gap - 2))
}

fn proven(window: usize, name: &str, text: &str) -> bool {
    SourceVerifier::new(window)
        .verify(name, std::iter::empty(), &PreparedText::new(text))
        .is_some()
}

#[test]
fn gap_of_19_is_within_window() {
    let text = spaced(19);
    assert!(proven(20, "Safety Officer", &text));
}

#[test]
fn gap_of_20_is_within_window() {
    assert!(proven(20, "Safety Officer", &spaced(20)));
}

#[test]
fn gap_of_21_is_outside_window() {
    let text = spaced(21);
    assert!(!proven(20, "Safety Officer", &text));
}

#[test]
fn either_order_counts() {
    assert!(proven(20, "Safety Officer", "The Officer for Safety signs."));
}

#[test]
fn window_is_tunable() {
    let text = spaced(21);
    assert!(proven(25, "Safety Officer", &text));
    assert!(!proven(10, "Safety Officer", &spaced(11)));
}

#[test]
fn anchor_is_first_word_position() {
    let text = spaced(19);
    let got = SourceVerifier::new(20)
        .verify("Safety Officer", std::iter::empty(), &PreparedText::new(&text))
        .unwrap();
    assert_eq!(got, vec![0]);
}

#[test]
fn literal_hit_needs_no_window() {
    let got = SourceVerifier::new(0)
        .verify("Safety Officer", std::iter::empty(), &PreparedText::new("The Safety Officer."))
        .unwrap();
    assert_eq!(got, vec![4]);
}

#[test]
fn missing_word_never_proven() {
    assert!(!proven(1000, "Safety Officer", "Safety first, always."));
}

#[test]
fn config_window_reaches_discovery() {
    use docent::{DocumentAnalyzer, ExtractionConfig};
    let config = ExtractionConfig::default().with_adjacency_window(5);
    let analyzer = DocumentAnalyzer::new(config);
    let roles = analyzer.extract_roles("The Test Director shall approve procedures.");
    assert!(roles["Test Director"].is_verified_in_text);
}
