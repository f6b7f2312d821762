//! Backend access
//!
//! - `client`: the reqwest-based HTTP client
//! - `wire`: request and raw response bodies
//! - `decode`: normalization of raw payloads into models
//! - `download`: chunked body collection with progress
//! - `blob`: revocable in-memory blob URLs

pub mod blob;
pub mod client;
pub mod decode;
pub mod download;
pub mod wire;

pub use blob::{Blob, BlobRegistry, BlobUrl};
pub use client::ApiClient;
pub use decode::{decode_draft, EntrySource};
pub use download::{Progress, PDF_MIME};
