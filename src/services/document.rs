//! Document service
//!
//! Uploads source documents for extraction and fetches stored documents
//! back as blobs. A fetched blob stays registered until it is revoked;
//! `save` revokes its own URL once the file is written.

use std::path::{Path, PathBuf};

use crate::api::{ApiClient, Blob, BlobRegistry, BlobUrl, Progress, PDF_MIME};
use crate::error::{LedgerDeskError, LedgerDeskResult};
use crate::models::Extraction;
use crate::services::sink::FileSink;

/// A document held in the blob registry
#[derive(Debug, Clone)]
pub struct Download {
    pub url: BlobUrl,
    pub blob: Blob,
    pub size: usize,
}

/// Service for uploading and fetching documents
pub struct DocumentService<'a> {
    client: &'a ApiClient,
    blobs: &'a BlobRegistry,
}

impl<'a> DocumentService<'a> {
    /// Create a new document service
    pub fn new(client: &'a ApiClient, blobs: &'a BlobRegistry) -> Self {
        Self { client, blobs }
    }

    /// Upload a local file for extraction
    pub async fn upload(&self, path: &Path, user_id: &str) -> LedgerDeskResult<Extraction> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                LedgerDeskError::Validation(format!("Not a file: {}", path.display()))
            })?
            .to_string();

        let contents = tokio::fs::read(path).await.map_err(|e| {
            LedgerDeskError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        if contents.is_empty() {
            return Err(LedgerDeskError::Validation(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        self.client
            .upload_and_process(&file_name, contents, user_id)
            .await
    }

    /// Stream a stored document into the blob registry
    pub async fn download<F>(&self, key: &str, on_progress: F) -> LedgerDeskResult<Download>
    where
        F: FnMut(Progress),
    {
        let bytes = self.client.fetch_document(key, on_progress).await?;
        let blob = Blob::new(PDF_MIME, bytes);
        let size = blob.len();
        let url = self.blobs.register(blob.clone());
        Ok(Download { url, blob, size })
    }

    /// Release a download's URL
    pub fn revoke(&self, download: &Download) -> bool {
        self.blobs.revoke(&download.url)
    }

    /// Download a document and hand it to `sink`
    ///
    /// The file is named `file_name`, or `document-{key}.pdf` when none is
    /// given. The blob URL is revoked whether or not the save succeeds.
    pub async fn save<S, F>(
        &self,
        key: &str,
        file_name: Option<&str>,
        sink: &S,
        on_progress: F,
    ) -> LedgerDeskResult<PathBuf>
    where
        S: FileSink + ?Sized,
        F: FnMut(Progress),
    {
        let download = self.download(key, on_progress).await?;
        let name = match file_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => default_file_name(key),
        };

        let saved = sink.save(&download.blob, &name);
        self.revoke(&download);
        saved
    }
}

/// File name used when the caller doesn't pick one
pub fn default_file_name(key: &str) -> String {
    format!("document-{}.pdf", key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name() {
        assert_eq!(default_file_name("abc123"), "document-abc123.pdf");
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.pdf");
        std::fs::write(&path, b"").unwrap();

        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let blobs = BlobRegistry::new();
        let service = DocumentService::new(&client, &blobs);

        let err = service.upload(&path, "123").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let blobs = BlobRegistry::new();
        let service = DocumentService::new(&client, &blobs);

        let err = service
            .upload(Path::new("/nonexistent/ledgerdesk/invoice.pdf"), "123")
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerDeskError::Io(_)));
    }
}
