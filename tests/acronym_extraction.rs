//! Acronym extraction and consistency checking through the public API.

use docent::{
    check_consistency, AcronymStatus, DefinitionSource, DocumentAnalyzer, ExtractionConfig,
    IssueType, Severity,
};

fn analyzer() -> DocumentAnalyzer {
    DocumentAnalyzer::new(ExtractionConfig::default())
}

// =============================================================================
// Definitions
// =============================================================================

#[test]
fn definition_precedes_usage() {
    let text = "Systems Engineer (SE) shall review. The SE shall approve it.";
    let se = &analyzer().extract_acronyms(text)["SE"];
    assert_eq!(se.expansion.as_deref(), Some("Systems Engineer"));
    assert_eq!(se.status, AcronymStatus::Defined);
    assert!(se.usage_count() >= 2);
    assert!(se.defined_before_use());
    assert_eq!(se.definition_location, Some(0));
}

#[test]
fn hyphenated_long_form() {
    let text = "The vehicle carries a Built-In Test (BIT) suite.";
    let bit = &analyzer().extract_acronyms(text)["BIT"];
    assert_eq!(bit.expansion.as_deref(), Some("Built-In Test"));
    assert_eq!(bit.status, AcronymStatus::Defined);
}

#[test]
fn ampersand_short_form() {
    let text = "Subsystems include Guidance, Navigation and Control (GN&C) units.";
    let gnc = &analyzer().extract_acronyms(text)["GN&C"];
    assert_eq!(gnc.expansion.as_deref(), Some("Guidance, Navigation and Control"));
}

#[test]
fn custom_dictionary_entry() {
    let config = ExtractionConfig::default().with_acronym("FRR", "Flight Readiness Review");
    let got = DocumentAnalyzer::new(config).extract_acronyms("Hold the FRR in May.");
    let frr = &got["FRR"];
    assert_eq!(frr.status, AcronymStatus::Known);
    assert_eq!(frr.source, DefinitionSource::Dictionary);
    assert_eq!(frr.expansion.as_deref(), Some("Flight Readiness Review"));
}

// =============================================================================
// Consistency
// =============================================================================

#[test]
fn undefined_with_minimal_dictionary() {
    let config = ExtractionConfig::default().without_default_dictionary();
    let report = DocumentAnalyzer::new(config).analyze("The PDR shall be scheduled.", &[], None);
    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.acronym, "PDR");
    assert_eq!(issue.issue_type, IssueType::Undefined);
    assert_eq!(issue.severity, Severity::Error);
    assert_eq!(issue.locations, vec![4]);
}

#[test]
fn conflicting_definitions() {
    let text = "Quality Assurance (QA) is staffed early. \
                The plan also needs Quality Assessment (QA) reviews.";
    let report = analyzer().analyze(text, &[], None);
    let qa = &report.acronyms["QA"];
    assert_eq!(qa.expansion.as_deref(), Some("Quality Assurance"));
    assert_eq!(qa.alternatives, vec!["Quality Assessment".to_string()]);
    assert_eq!(qa.status, AcronymStatus::Inconsistent);

    let multiple: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.issue_type == IssueType::MultipleDefinitions)
        .collect();
    assert_eq!(multiple.len(), 1);
    assert_eq!(multiple[0].severity, Severity::Warning);
}

#[test]
fn used_before_defined() {
    let text = "The CCB meets weekly. The Configuration Control Board (CCB) approves changes.";
    let report = analyzer().analyze(text, &[], None);
    let issue = report
        .issues
        .iter()
        .find(|i| i.issue_type == IssueType::UsedBeforeDefined)
        .unwrap();
    assert_eq!(issue.acronym, "CCB");
    assert_eq!(issue.locations, vec![4]);
}

#[test]
fn issues_sorted_errors_first() {
    let config = ExtractionConfig::default().without_default_dictionary();
    let text = "The ZZQ and the AAQ. Quality Assurance (QA) then Quality Assessment (QA). \
                The MMQ is late.";
    let issues = DocumentAnalyzer::new(config).analyze(text, &[], None).issues;
    let keys: Vec<(Severity, &str)> = issues.iter().map(|i| (i.severity, i.acronym.as_str())).collect();
    assert_eq!(
        keys,
        vec![
            (Severity::Error, "AAQ"),
            (Severity::Error, "MMQ"),
            (Severity::Error, "ZZQ"),
            (Severity::Warning, "QA"),
        ]
    );
}

#[test]
fn checker_is_pure() {
    let text = "The XQZ is new. Systems Engineer (SE) and the SE.";
    let acronyms = analyzer().extract_acronyms(text);
    assert_eq!(check_consistency(&acronyms), check_consistency(&acronyms));
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn to_dict_contract() {
    let text = "Systems Engineer (SE) shall review. The SE shall approve it.";
    let d = analyzer().extract_acronyms(text)["SE"].to_dict();
    assert_eq!(d["acronym"], "SE");
    assert_eq!(d["status"], "defined");
    assert_eq!(d["usage_count"], 2);
    assert_eq!(d["defined_before_use"], true);
}

#[test]
fn report_round_trips_through_serde() {
    let text = "Systems Engineer (SE) shall review. The PDR follows.";
    let report = analyzer().analyze(text, &[], None);
    let json = serde_json::to_string(&report).unwrap();
    let back: docent::AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.issues, report.issues);
    assert_eq!(back.roles.keys().collect::<Vec<_>>(), report.roles.keys().collect::<Vec<_>>());
    assert_eq!(back.acronyms["SE"].usage_locations, report.acronyms["SE"].usage_locations);
}
