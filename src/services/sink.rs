//! File-save port
//!
//! Where downloaded documents end up. The document service only talks to
//! the `FileSink` trait; `DirectorySink` writes into a local directory.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::api::Blob;
use crate::error::{LedgerDeskError, LedgerDeskResult};

/// Something that can persist a blob under a file name
pub trait FileSink {
    /// Save `blob` as `file_name` and return where it was written
    fn save(&self, blob: &Blob, file_name: &str) -> LedgerDeskResult<PathBuf>;
}

/// Saves files into one directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn save(&self, blob: &Blob, file_name: &str) -> LedgerDeskResult<PathBuf> {
        if blob.is_empty() {
            return Err(LedgerDeskError::Validation(format!(
                "Refusing to save empty file '{}'",
                file_name
            )));
        }
        let path = self.dir.join(safe_file_name(file_name)?);
        write_atomic(&path, &blob.bytes)?;
        tracing::debug!(path = %path.display(), size = blob.len(), "Saved file");
        Ok(path)
    }
}

/// Reduce a requested name to a single path component
///
/// Storage keys may contain `/`, which would otherwise escape the directory.
pub fn safe_file_name(file_name: &str) -> LedgerDeskResult<String> {
    let name: String = file_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '-',
            c => c,
        })
        .collect();
    let name = name.trim_start_matches('.').to_string();

    if name.is_empty() {
        return Err(LedgerDeskError::Validation(format!(
            "Invalid file name: '{}'",
            file_name
        )));
    }
    Ok(name)
}

/// Write bytes to a file atomically (write to temp, then rename)
pub fn write_atomic(path: &Path, bytes: &[u8]) -> LedgerDeskResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerDeskError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut temp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    temp_name.push(".part");
    let temp_path = path.with_file_name(temp_name);

    let file = File::create(&temp_path)
        .map_err(|e| LedgerDeskError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .and_then(|_| writer.get_ref().sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            LedgerDeskError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LedgerDeskError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_writes_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path().join("downloads"));

        let path = sink
            .save(&Blob::new("application/pdf", b"%PDF-1.7".to_vec()), "invoice.pdf")
            .unwrap();

        assert_eq!(path, temp_dir.path().join("downloads").join("invoice.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.7");
        assert!(!temp_dir.path().join("downloads").join("invoice.pdf.part").exists());
    }

    #[test]
    fn test_empty_blob_is_not_written() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path());

        let err = sink
            .save(&Blob::new("application/pdf", Vec::new()), "empty.pdf")
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!temp_dir.path().join("empty.pdf").exists());
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path());

        sink.save(&Blob::new("text/plain", "old"), "a.txt").unwrap();
        let path = sink.save(&Blob::new("text/plain", "new"), "a.txt").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_safe_file_name() {
        assert_eq!(
            safe_file_name("document-uploads/2025/inv.pdf").unwrap(),
            "document-uploads-2025-inv.pdf"
        );
        assert_eq!(safe_file_name("../../etc").unwrap(), "-..-etc");
        assert!(safe_file_name("  ").is_err());
        assert!(safe_file_name("..").is_err());
    }
}
