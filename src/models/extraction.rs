//! Document extraction result
//!
//! What the backend returns after an uploaded document has been run through
//! OCR and turned into journal entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::journal::JournalEntry;

/// How serious a compliance note is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Error,
    Warning,
    #[default]
    Info,
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A validation or compliance remark attached to an extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceNote {
    pub kind: NoteKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Canonical form of an upload-and-process response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Storage key of the uploaded document, used to fetch it back
    pub storage_key: String,
    pub entries: Vec<JournalEntry>,
    #[serde(default)]
    pub notes: Vec<ComplianceNote>,
}

impl Extraction {
    pub fn has_errors(&self) -> bool {
        self.notes.iter().any(|n| n.kind == NoteKind::Error)
    }
}
