//! ledgerdesk - Terminal client for an accounting backend
//!
//! This library provides the core functionality behind the `ledgerdesk`
//! command: journal entries are checked for balance before they are
//! submitted, stored documents are streamed back with progress reporting,
//! and extraction results from uploaded documents are normalized into one
//! canonical shape.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, journal entries, drafts, chat)
//! - `api`: HTTP client, payload decoding, streaming download, blob registry
//! - `services`: Business logic layer (validation, journal, documents, chat)
//! - `reports`: General ledger
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerdesk::api::ApiClient;
//! use ledgerdesk::services::{JournalService, ValidationRules};
//!
//! let client = ApiClient::new("http://localhost:8000")?;
//! let rules = ValidationRules::default();
//! let entries = JournalService::new(&client, &rules).list().await?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{LedgerDeskError, LedgerDeskResult};
