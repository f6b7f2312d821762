//! Display formatting for terminal output
//!
//! Formats journal entries, check results, extractions and chat messages.

pub mod chat;
pub mod journal;

pub use chat::format_message;
pub use journal::{format_check, format_entry_details, format_entry_list, format_extraction};
