//! HTTP client for the accounting backend

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_LENGTH};
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde_json::Value;

use super::decode::{decode_created, decode_entries, decode_upload_response, EntrySource};
use super::download::{collect_chunks, Progress, PDF_MIME};
use super::wire::{JournalEntryRequest, PromptRequest, PromptResponse};
use crate::error::{LedgerDeskError, LedgerDeskResult};
use crate::models::{Extraction, JournalEntry, JournalEntryDraft};

const USER_AGENT: &str = concat!("ledgerdesk/", env!("CARGO_PKG_VERSION"));

/// Client bound to one backend base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> LedgerDeskResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LedgerDeskError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /v0/db/journal-entry`
    pub async fn list_journal_entries(&self) -> LedgerDeskResult<Vec<JournalEntry>> {
        let url = self.url("/v0/db/journal-entry");
        tracing::debug!(url = %url, "Listing journal entries");

        let response = check_status(self.http.get(&url).send().await?).await?;
        let body = read_json(response).await?;
        let entries = decode_entries(body, EntrySource::Stored)?;

        tracing::info!(count = entries.len(), "Retrieved journal entries");
        Ok(entries)
    }

    /// `POST /v0/db/journal-entry`
    ///
    /// Sends the draft as-is; callers validate first.
    pub async fn create_journal_entry(
        &self,
        draft: &JournalEntryDraft,
    ) -> LedgerDeskResult<JournalEntry> {
        let url = self.url("/v0/db/journal-entry");
        let request = JournalEntryRequest::from(draft);
        tracing::debug!(url = %url, reference = %request.reference, "Creating journal entry");

        let response = check_status(self.http.post(&url).json(&request).send().await?).await?;
        let text = response.text().await?;
        Ok(decode_created(created_body(&text)?, draft))
    }

    /// `POST /v0/db/upload-and-process?user_id=...` with the document as multipart field `file`
    pub async fn upload_and_process(
        &self,
        file_name: &str,
        contents: impl Into<Bytes>,
        user_id: &str,
    ) -> LedgerDeskResult<Extraction> {
        let url = self.url("/v0/db/upload-and-process");
        let contents: Bytes = contents.into();
        tracing::debug!(url = %url, file = %file_name, size = contents.len(), "Uploading document");

        let size = contents.len() as u64;
        let part = Part::stream_with_length(contents, size)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))?;
        let form = Form::new().part("file", part);

        let response = check_status(
            self.http
                .post(&url)
                .query(&[("user_id", user_id)])
                .multipart(form)
                .send()
                .await?,
        )
        .await?;

        let text = response.text().await?;
        let extraction = decode_upload_response(&text)?;
        tracing::info!(
            key = %extraction.storage_key,
            entries = extraction.entries.len(),
            notes = extraction.notes.len(),
            "Document processed"
        );
        Ok(extraction)
    }

    /// `POST /v0/bedrock/test`
    pub async fn prompt(&self, message: &str) -> LedgerDeskResult<String> {
        let url = self.url("/v0/bedrock/test");
        tracing::debug!(url = %url, "Sending prompt");

        let response = check_status(
            self.http
                .post(&url)
                .json(&PromptRequest { message })
                .send()
                .await?,
        )
        .await?;

        let reply: PromptResponse = response
            .json()
            .await
            .map_err(|e| LedgerDeskError::Parse(format!("Invalid prompt response: {}", e)))?;
        Ok(reply.response)
    }

    /// `GET /v0/db/s3/{key}`, streamed
    ///
    /// `on_progress` is called per chunk when the response declares a
    /// positive Content-Length.
    pub async fn fetch_document<F>(&self, key: &str, on_progress: F) -> LedgerDeskResult<Bytes>
    where
        F: FnMut(Progress),
    {
        let url = self.url(&format!("/v0/db/s3/{}", key.trim_start_matches('/')));
        tracing::debug!(url = %url, "Fetching document");

        let response = check_status(self.http.get(&url).header(ACCEPT, PDF_MIME).send().await?)
            .await?;

        let total = declared_length(&response);
        if total == Some(0) {
            return Err(LedgerDeskError::network(
                "Response body has no streamable content",
            ));
        }

        let bytes = collect_chunks(response.bytes_stream(), total, on_progress).await?;
        tracing::info!(key = %key, size = bytes.len(), "Document downloaded");
        Ok(bytes)
    }
}

/// Turn a non-success status into a transfer error carrying the body text
async fn check_status(response: Response) -> LedgerDeskResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), body = %body, "Request failed");
    Err(LedgerDeskError::http_status(status.as_u16(), body))
}

async fn read_json(response: Response) -> LedgerDeskResult<Value> {
    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| LedgerDeskError::Parse(format!("Invalid JSON from backend: {}", e)))
}

/// An empty acknowledgement is fine; anything else must be JSON
fn created_body(text: &str) -> LedgerDeskResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
        .map_err(|e| LedgerDeskError::Parse(format!("Invalid create response: {}", e)))
}

fn declared_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn mime_for(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        PDF_MIME
    } else if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url("/v0/db/journal-entry"),
            "http://localhost:8000/v0/db/journal-entry"
        );
    }

    #[test]
    fn test_created_body() {
        assert_eq!(created_body("").unwrap(), Value::Null);
        assert_eq!(created_body("  \n").unwrap(), Value::Null);
        assert_eq!(created_body(r#"{"id": 42}"#).unwrap()["id"], 42);

        let err = created_body("<html>Created</html>").unwrap_err();
        assert!(matches!(err, LedgerDeskError::Parse(_)));
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("Invoice.PDF"), "application/pdf");
        assert_eq!(mime_for("receipt.jpeg"), "image/jpeg");
        assert_eq!(mime_for("notes"), "application/octet-stream");
    }
}
