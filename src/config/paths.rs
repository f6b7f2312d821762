//! Path management for ledgerdesk
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGERDESK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/ledgerdesk` on Linux,
//!    `~/Library/Application Support/ledgerdesk` on macOS, `%APPDATA%\ledgerdesk`
//!    on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LedgerDeskError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "LEDGERDESK_DATA_DIR";

/// Manages all paths used by ledgerdesk
#[derive(Debug, Clone)]
pub struct DeskPaths {
    base_dir: PathBuf,
}

impl DeskPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LedgerDeskError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "ledgerdesk")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    LedgerDeskError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default destination for saved documents and exports
    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join("downloads")
    }

    pub fn ensure_directories(&self) -> Result<(), LedgerDeskError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerDeskError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.downloads_dir()).map_err(|e| {
            LedgerDeskError::Io(format!("Failed to create downloads directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DeskPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.downloads_dir(), temp_dir.path().join("downloads"));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DeskPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.downloads_dir().exists());
    }
}
