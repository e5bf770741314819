//! # docent
//!
//! Rule-based role and acronym extraction for technical and regulatory
//! documents (statements of work, management plans, requirement specs).
//!
//! - **Roles**: who is responsible for what ("The Systems Engineer shall ...")
//! - **Acronyms**: where each acronym is defined, used, or left undefined
//! - **Consistency**: undefined, used-before-defined, and conflicting acronyms
//!
//! ## Quick Start
//!
//! ```rust
//! use docent::{DocumentAnalyzer, ExtractionConfig};
//!
//! let analyzer = DocumentAnalyzer::new(ExtractionConfig::default());
//! let report = analyzer.analyze(
//!     "The Systems Engineer (SE) shall maintain the baseline. The SE reports to the CCB.",
//!     &[],
//!     None,
//! );
//!
//! let se = &report.roles["Systems Engineer"];
//! assert!(se.is_verified_in_text);
//! assert_eq!(report.acronyms["SE"].definition_location, Some(4));
//! ```
//!
//! ## Extraction Modes
//!
//! | Mode | Finds | Confidence | Use when |
//! |------|-------|------------|----------|
//! | `Discovery` | pattern cascade + dictionary | 0.0-1.0 | exploring an unfamiliar document |
//! | `Strict` | whitelist terms only | 1.0 | producing an audited role list |
//!
//! Discovery runs candidate patterns, a validation gate, canonicalization,
//! and a final check that every reported role actually appears in the text.
//! Strict mode skips discovery entirely.
//!
//! ## Acronym Sources
//!
//! | Source | Example | Confidence |
//! |--------|---------|------------|
//! | long form (SHORT) | `Systems Engineer (SE)` | 0.95 |
//! | SHORT (long form) | `SE (Systems Engineer)` | 0.90 |
//! | SHORT - long form | `SE – Systems Engineer` | 0.85 |
//! | Schwartz-Hearst | `Guidance, Navigation and Control (GN&C)` | 0.88 |
//! | dictionary | `PDR` | 0.80 |
//!
//! ## Design Notes
//!
//! - **Never fails on text**: a rule that cannot compile is logged and skipped
//! - **Deterministic**: results are ordered maps; identical input gives identical output
//! - **Char offsets**: every reported position counts Unicode scalar values
//! - **Pluggable**: an [`EntitySuggester`](suggest::EntitySuggester) may add
//!   or boost role candidates

#![warn(missing_docs)]

pub mod acronyms;
pub mod analyzer;
pub mod config;
mod error;
pub mod library;
pub mod offset;
pub mod roles;
pub mod suggest;

pub use docent_core::{
    AcronymEntry, AcronymStatus, ActionType, ConsistencyIssue, DefinitionSource, EntityKind,
    ExtractedRole, IssueType, Paragraph, RoleOccurrence, RoleSource, Severity,
};

pub use acronyms::{check_consistency, AcronymExtractor};
pub use analyzer::{AnalysisReport, DocumentAnalyzer};
pub use config::{ExtractionConfig, ExtractionMode};
pub use error::{Error, Result};
pub use library::PatternLibrary;
pub use roles::RoleExtractor;
