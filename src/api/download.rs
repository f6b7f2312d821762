//! Streaming body reader
//!
//! Reads a response body chunk by chunk into one contiguous buffer, reporting
//! progress when the sender declared a total length. The stream is consumed
//! by value, so it is released on every exit path including errors.

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};

use crate::error::{LedgerDeskError, LedgerDeskResult};

/// Media type requested for stored documents
pub const PDF_MIME: &str = "application/pdf";

/// Download progress snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub received: u64,
    pub total: u64,
}

impl Progress {
    /// Percentage received, never above 100
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.received as f64 / self.total as f64 * 100.0).min(100.0)
    }
}

/// Accumulate every chunk of `stream` in order
///
/// `on_progress` runs after each chunk, and only when `total` is a positive
/// declared length. A body that yields no bytes at all is a transfer error.
pub async fn collect_chunks<S, E, F>(
    stream: S,
    total: Option<u64>,
    mut on_progress: F,
) -> LedgerDeskResult<Bytes>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<LedgerDeskError>,
    F: FnMut(Progress),
{
    let total = total.filter(|t| *t > 0);
    let capacity = total.map_or(0, |t| usize::try_from(t).unwrap_or(0));
    let mut buffer = BytesMut::with_capacity(capacity);

    let mut stream = Box::pin(stream);
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Into::into)?;
        buffer.extend_from_slice(&chunk);

        if let Some(total) = total {
            on_progress(Progress {
                received: buffer.len() as u64,
                total,
            });
        }
    }

    if buffer.is_empty() {
        return Err(LedgerDeskError::network("Response body has no streamable content"));
    }

    Ok(buffer.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn chunks(parts: &[&'static [u8]]) -> impl Stream<Item = Result<Bytes, LedgerDeskError>> {
        let items: Vec<Result<Bytes, LedgerDeskError>> =
            parts.iter().map(|&p| Ok(Bytes::from_static(p))).collect();
        stream::iter(items)
    }

    #[tokio::test]
    async fn test_chunks_concatenated_in_order() {
        let mut seen = Vec::new();
        let body = collect_chunks(chunks(&[b"%PDF", b"-1.", b"7"]), Some(8), |p| {
            seen.push(p.percent())
        })
        .await
        .unwrap();

        assert_eq!(&body[..], b"%PDF-1.7");
        assert_eq!(seen, vec![50.0, 87.5, 100.0]);
    }

    #[tokio::test]
    async fn test_no_progress_without_total() {
        let mut calls = 0;
        let body = collect_chunks(chunks(&[b"abc"]), None, |_| calls += 1)
            .await
            .unwrap();
        assert_eq!(body.len(), 3);
        assert_eq!(calls, 0);

        let mut calls = 0;
        collect_chunks(chunks(&[b"abc"]), Some(0), |_| calls += 1)
            .await
            .unwrap();
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_progress_clamped_when_total_understated() {
        let mut last = 0.0;
        collect_chunks(chunks(&[b"abcd", b"efgh"]), Some(4), |p| last = p.percent())
            .await
            .unwrap();
        assert_eq!(last, 100.0);
    }

    #[tokio::test]
    async fn test_empty_stream_is_error() {
        let err = collect_chunks(chunks(&[]), Some(10), |_| {}).await.unwrap_err();
        assert!(err.is_transfer());
    }

    #[tokio::test]
    async fn test_mid_stream_error_propagates() {
        let items = vec![
            Ok(Bytes::from_static(b"abc")),
            Err(LedgerDeskError::network("connection reset")),
            Ok(Bytes::from_static(b"def")),
        ];
        let err = collect_chunks(stream::iter(items), None, |_| {})
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }
}
