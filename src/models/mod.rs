//! Core data models for ledgerdesk
//!
//! This module contains the data structures of the accounting domain as the
//! client sees it: journal entries and their drafts, money, chat messages and
//! document extractions.

pub mod chat;
pub mod draft;
pub mod extraction;
pub mod ids;
pub mod journal;
pub mod money;

pub use chat::{ChatMessage, ChatSession, MessageOptions, MessageUpdate, Role};
pub use draft::{DraftLine, JournalEntryDraft, MIN_DRAFT_LINES};
pub use extraction::{ComplianceNote, Extraction, NoteKind};
pub use ids::{AccountCode, EntryId, LineId};
pub use journal::{JournalEntry, JournalEntryLine, LineAmounts};
pub use money::{Money, MoneyParseError};
