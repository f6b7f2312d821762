//! In-memory blob registry
//!
//! Downloaded documents are kept as blobs addressed by revocable `blob:`
//! URLs. A URL stays valid until it is revoked; `live_count` reports how many
//! are still outstanding so callers (and tests) can check nothing leaks.

use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::{LedgerDeskError, LedgerDeskResult};

const SCHEME: &str = "blob:";

/// Handle to a registered blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlobUrl(Uuid);

impl BlobUrl {
    /// Parse a `blob:<uuid>` string
    pub fn parse(s: &str) -> LedgerDeskResult<Self> {
        let raw = s
            .strip_prefix(SCHEME)
            .ok_or_else(|| LedgerDeskError::Parse(format!("Not a blob URL: {}", s)))?;
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|e| LedgerDeskError::Parse(format!("Invalid blob URL '{}': {}", s, e)))
    }
}

impl fmt::Display for BlobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SCHEME, self.0)
    }
}

/// Immutable binary content with its media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime: String,
    pub bytes: Bytes,
}

impl Blob {
    pub fn new(mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Shared registry of live blobs; clones refer to the same registry
#[derive(Debug, Clone, Default)]
pub struct BlobRegistry {
    inner: Arc<Mutex<HashMap<Uuid, Blob>>>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Blob>> {
        // A panic while holding the lock cannot leave the map half-updated
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a blob and hand out a fresh URL for it
    pub fn register(&self, blob: Blob) -> BlobUrl {
        let id = Uuid::new_v4();
        self.lock().insert(id, blob);
        let url = BlobUrl(id);
        tracing::debug!(%url, "Registered blob");
        url
    }

    /// Look up a live blob
    pub fn get(&self, url: &BlobUrl) -> Option<Blob> {
        self.lock().get(&url.0).cloned()
    }

    /// Release a URL. Returns false if it was already revoked or never issued.
    pub fn revoke(&self, url: &BlobUrl) -> bool {
        let removed = self.lock().remove(&url.0).is_some();
        if removed {
            tracing::debug!(%url, "Revoked blob");
        }
        removed
    }

    /// Number of URLs not yet revoked
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_get_revoke() {
        let registry = BlobRegistry::new();
        let url = registry.register(Blob::new("application/pdf", b"%PDF-1.7".to_vec()));

        assert_eq!(registry.live_count(), 1);
        let blob = registry.get(&url).unwrap();
        assert_eq!(blob.mime, "application/pdf");
        assert_eq!(blob.len(), 8);

        assert!(registry.revoke(&url));
        assert!(!registry.revoke(&url));
        assert!(registry.get(&url).is_none());
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_urls_are_distinct() {
        let registry = BlobRegistry::new();
        let a = registry.register(Blob::new("text/plain", "a"));
        let b = registry.register(Blob::new("text/plain", "a"));
        assert_ne!(a, b);
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let registry = BlobRegistry::new();
        let other = registry.clone();
        let url = registry.register(Blob::new("text/plain", "x"));
        assert!(other.revoke(&url));
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_url_round_trip() {
        let registry = BlobRegistry::new();
        let url = registry.register(Blob::new("text/plain", "x"));
        let text = url.to_string();
        assert!(text.starts_with("blob:"));
        assert_eq!(BlobUrl::parse(&text).unwrap(), url);
        assert!(BlobUrl::parse("http://x").is_err());
    }
}
