//! Acronym consistency checks.

use docent_core::{AcronymEntry, AcronymStatus, ConsistencyIssue, IssueType, Severity};
use std::collections::BTreeMap;

/// Findings for every acronym in `entries`.
///
/// Per acronym, in order: undefined (error), used before its definition
/// (warning), defined more than once (warning). The result is sorted by
/// severity, errors first, then by acronym; the sort is stable so one
/// acronym's findings keep that order.
#[must_use]
pub fn check_consistency(entries: &BTreeMap<String, AcronymEntry>) -> Vec<ConsistencyIssue> {
    let mut issues = Vec::new();
    for entry in entries.values() {
        let acronym = entry.acronym.clone();

        if entry.status == AcronymStatus::Undefined {
            issues.push(ConsistencyIssue {
                message: format!(
                    "{} is used {} time{} but never defined",
                    acronym,
                    entry.usage_count(),
                    if entry.usage_count() == 1 { "" } else { "s" }
                ),
                acronym: acronym.clone(),
                issue_type: IssueType::Undefined,
                locations: entry.usage_locations.clone(),
                severity: Severity::Error,
            });
        }

        if let (Some(def), Some(first)) = (entry.definition_location, entry.first_usage()) {
            if first < def {
                let early: Vec<usize> = entry
                    .usage_locations
                    .iter()
                    .copied()
                    .filter(|&u| u < def)
                    .collect();
                issues.push(ConsistencyIssue {
                    message: format!(
                        "{} is used at offset {} before its definition at offset {}",
                        acronym, first, def
                    ),
                    acronym: acronym.clone(),
                    issue_type: IssueType::UsedBeforeDefined,
                    locations: early,
                    severity: Severity::Warning,
                });
            }
        }

        if !entry.alternatives.is_empty() {
            let mut all = Vec::with_capacity(entry.alternatives.len() + 1);
            all.extend(entry.expansion.iter().cloned());
            all.extend(entry.alternatives.iter().cloned());
            issues.push(ConsistencyIssue {
                message: format!("{} has conflicting definitions: {}", acronym, all.join("; ")),
                acronym,
                issue_type: IssueType::MultipleDefinitions,
                locations: entry.definition_location.into_iter().collect(),
                severity: Severity::Warning,
            });
        }
    }

    issues.sort_by(|a, b| a.severity.cmp(&b.severity).then_with(|| a.acronym.cmp(&b.acronym)));
    log::debug!("consistency check found {} issues", issues.len());
    issues
}
