//! Service layer for ledgerdesk
//!
//! The service layer sits between the CLI and the backend client, handling
//! validation before submit, document blobs and the chat session.

pub mod chat;
pub mod document;
pub mod journal;
pub mod sink;
pub mod validation;

pub use chat::ChatService;
pub use document::{DocumentService, Download};
pub use journal::JournalService;
pub use sink::{DirectorySink, FileSink};
pub use validation::{
    check_draft, check_journal_entry, BalanceSummary, EntryCheck, ValidationIssue,
    ValidationRules,
};
