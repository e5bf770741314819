//! One-call document analysis: roles, acronyms, and acronym findings.

use crate::acronyms::{check_consistency, AcronymExtractor};
use crate::config::ExtractionConfig;
use crate::library::PatternLibrary;
use crate::roles::RoleExtractor;
use crate::suggest::EntitySuggester;
use docent_core::{AcronymEntry, ConsistencyIssue, ExtractedRole, Paragraph, Severity};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything extracted from one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Canonical role name → role.
    pub roles: BTreeMap<String, ExtractedRole>,
    /// Acronym key → entry.
    pub acronyms: BTreeMap<String, AcronymEntry>,
    /// Acronym findings, errors first.
    pub issues: Vec<ConsistencyIssue>,
}

impl AnalysisReport {
    /// Number of error-severity findings.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning-severity findings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// JSON rendering using each type's `to_dict`, plus a summary.
    #[must_use]
    pub fn to_dict(&self) -> Value {
        let roles: serde_json::Map<String, Value> = self
            .roles
            .iter()
            .map(|(k, r)| (k.clone(), r.to_dict()))
            .collect();
        let acronyms: serde_json::Map<String, Value> = self
            .acronyms
            .iter()
            .map(|(k, a)| (k.clone(), a.to_dict()))
            .collect();
        json!({
            "roles": roles,
            "acronyms": acronyms,
            "issues": self.issues.iter().map(ConsistencyIssue::to_dict).collect::<Vec<_>>(),
            "summary": {
                "role_count": self.roles.len(),
                "acronym_count": self.acronyms.len(),
                "error_count": self.error_count(),
                "warning_count": self.warning_count(),
            },
        })
    }
}

/// Runs both extraction pipelines over one shared [`PatternLibrary`].
///
/// ```rust
/// use docent::{DocumentAnalyzer, ExtractionConfig};
///
/// let analyzer = DocumentAnalyzer::new(ExtractionConfig::default());
/// let report = analyzer.analyze(
///     "Systems Engineer (SE) shall review. The SE shall approve it.",
///     &[],
///     None,
/// );
/// assert!(report.roles.contains_key("Systems Engineer"));
/// assert_eq!(report.acronyms["SE"].expansion.as_deref(), Some("Systems Engineer"));
/// ```
#[derive(Debug)]
pub struct DocumentAnalyzer {
    config: ExtractionConfig,
    lib: Arc<PatternLibrary>,
    roles: RoleExtractor,
    acronyms: AcronymExtractor,
}

impl DocumentAnalyzer {
    /// Build the library and both extractors from `config`.
    #[must_use]
    pub fn new(config: ExtractionConfig) -> Self {
        let lib = Arc::new(PatternLibrary::from_config(&config));
        Self {
            roles: RoleExtractor::new(Arc::clone(&lib), &config),
            acronyms: AcronymExtractor::new(Arc::clone(&lib), &config),
            lib,
            config,
        }
    }

    /// Consult `suggester` during role discovery.
    #[must_use]
    pub fn with_suggester(mut self, suggester: Arc<dyn EntitySuggester>) -> Self {
        self.roles = self.roles.with_suggester(suggester);
        self
    }

    /// The shared pattern library.
    #[must_use]
    pub fn library(&self) -> &Arc<PatternLibrary> {
        &self.lib
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Roles only.
    #[must_use]
    pub fn extract_roles(&self, text: &str) -> BTreeMap<String, ExtractedRole> {
        self.roles.extract(text)
    }

    /// Acronyms only.
    #[must_use]
    pub fn extract_acronyms(&self, text: &str) -> BTreeMap<String, AcronymEntry> {
        self.acronyms.extract(text)
    }

    /// Full analysis. `paragraphs` and `source_label` only affect occurrence
    /// location labels.
    #[must_use]
    pub fn analyze(
        &self,
        text: &str,
        paragraphs: &[Paragraph],
        source_label: Option<&str>,
    ) -> AnalysisReport {
        let roles = self.roles.extract_with_paragraphs(text, paragraphs, source_label);
        let acronyms = self.acronyms.extract(text);
        let issues = check_consistency(&acronyms);
        log::info!(
            "analyzed {} chars: {} roles, {} acronyms, {} issues",
            text.chars().count(),
            roles.len(),
            acronyms.len(),
            issues.len()
        );
        AnalysisReport {
            roles,
            acronyms,
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionMode;
    use docent_core::IssueType;

    const SOW: &str = "Systems Engineer (SE) shall review. The SE shall approve it.\n\
                       The PDR shall be scheduled by the Program Manager.";

    #[test]
    fn report_combines_pipelines() {
        let report = DocumentAnalyzer::new(ExtractionConfig::default()).analyze(SOW, &[], None);
        assert!(report.roles.contains_key("Systems Engineer"));
        assert!(report.roles.contains_key("Program Manager"));
        assert_eq!(report.acronyms["PDR"].expansion.as_deref(), Some("Preliminary Design Review"));
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn minimal_dictionary_reports_undefined() {
        let config = ExtractionConfig::default().without_default_dictionary();
        let report = DocumentAnalyzer::new(config).analyze(SOW, &[], None);
        let undefined: Vec<&str> = report
            .issues
            .iter()
            .filter(|i| i.issue_type == IssueType::Undefined)
            .map(|i| i.acronym.as_str())
            .collect();
        assert_eq!(undefined, vec!["PDR"]);
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn to_dict_has_summary() {
        let report = DocumentAnalyzer::new(ExtractionConfig::default()).analyze(SOW, &[], None);
        let d = report.to_dict();
        assert_eq!(d["summary"]["role_count"], report.roles.len());
        assert!(d["roles"]["Systems Engineer"]["frequency"].as_u64().unwrap() >= 1);
        assert_eq!(d["acronyms"]["SE"]["status"], "defined");
    }

    #[test]
    fn config_mode_reaches_role_extractor() {
        let analyzer =
            DocumentAnalyzer::new(ExtractionConfig::default().with_mode(ExtractionMode::Strict));
        let roles = analyzer.extract_roles(SOW);
        assert!(roles
            .values()
            .all(|r| r.occurrences.iter().all(|o| o.confidence == 1.0)));
        assert_eq!(analyzer.config().extraction_mode, ExtractionMode::Strict);
    }
}
