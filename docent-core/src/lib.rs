//! # docent-core
//!
//! Core types for docent: the data structures shared between the extraction
//! engine and anything that consumes its output.
//!
//! This crate provides:
//! - **Role types**: `ExtractedRole`, `RoleOccurrence`, `EntityKind`, `RoleSource`, `ActionType`
//! - **Acronym types**: `AcronymEntry`, `AcronymStatus`, `DefinitionSource`
//! - **Findings**: `ConsistencyIssue`, `IssueType`, `Severity`
//! - **Input**: `Paragraph`
//!
//! Every output type serializes with serde and exposes `to_dict()`, which
//! renders the type (including derived fields) as a `serde_json::Value`.

pub mod acronym;
pub mod role;

pub use acronym::{
    AcronymEntry, AcronymStatus, ConsistencyIssue, DefinitionSource, IssueType, Severity,
};
pub use role::{ActionType, EntityKind, ExtractedRole, RoleOccurrence, RoleSource};

use serde::{Deserialize, Serialize};

/// One paragraph handed over by the document-ingestion collaborator.
///
/// Paragraphs are expected in document order; `index` is the collaborator's
/// own numbering and is echoed back in occurrence locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph number as assigned by the ingestion side.
    pub index: usize,
    /// Paragraph text.
    pub text: String,
}

impl Paragraph {
    /// Create a paragraph.
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}
