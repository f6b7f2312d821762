//! Configuration module for ledgerdesk
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::DeskPaths;
pub use settings::Settings;
