//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod chat;
pub mod document;
pub mod entry;
pub mod ledger;

pub use chat::handle_chat_command;
pub use document::{handle_document_command, DocumentCommands};
pub use entry::{handle_entry_command, EntryCommands};
pub use ledger::{handle_ledger_command, LedgerCommands};

use crate::api::{ApiClient, BlobRegistry};
use crate::config::{DeskPaths, Settings};
use crate::error::LedgerDeskResult;

/// Everything a command handler needs
pub struct AppContext {
    pub paths: DeskPaths,
    pub settings: Settings,
    pub client: ApiClient,
    pub blobs: BlobRegistry,
}

impl AppContext {
    /// Build the context; `api_url` overrides the configured backend
    pub fn new(paths: DeskPaths, settings: Settings, api_url: Option<&str>) -> LedgerDeskResult<Self> {
        let base_url = api_url.unwrap_or(&settings.api_url);
        let client = ApiClient::new(base_url)?;
        Ok(Self {
            paths,
            settings,
            client,
            blobs: BlobRegistry::new(),
        })
    }
}
