//! Object transfer: direct PUT of file bytes to the presigned URL.
//!
//! The presigned URL embeds its own credentials, so no API auth headers are
//! attached and the backend never sees the bytes. The body is a chunked
//! stream that reports cumulative progress as chunks are handed to the
//! connection.

use anyhow::{Context, Result};
use bytes::Bytes;
use lectern_core::models::{UploadSource, UploadTarget};
use lectern_core::UploadError;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client};

use crate::progress::ProgressFn;

const TRANSFER_CHUNK_SIZE: usize = 64 * 1024;

/// Plain HTTP client for presigned PUTs. Kept separate from `ApiClient` so
/// auth headers never reach object storage; transfers also run without the
/// API client's request timeout, since large files ride on transport
/// defaults.
#[derive(Clone, Debug)]
pub struct TransferClient {
    client: Client,
}

impl TransferClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create transfer client")?;
        Ok(Self { client })
    }

    /// PUT the file bytes to the presigned URL, reporting 0-100 transfer
    /// progress through the callback.
    pub async fn put_object(
        &self,
        target: &UploadTarget,
        source: &UploadSource,
        on_progress: Option<ProgressFn>,
    ) -> Result<(), UploadError> {
        let total = source.size();
        tracing::debug!(
            file_key = %target.file_key,
            file_size = total,
            "Transferring object to storage"
        );

        let response = self
            .client
            .put(&target.upload_url)
            .header(CONTENT_TYPE, source.mime_type.clone())
            .header(CONTENT_LENGTH, total)
            .body(progress_body(source.data.clone(), on_progress))
            .send()
            .await
            .map_err(|e| UploadError::UploadFailed(format!("Failed to transfer object: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::UploadFailed(format!(
                "Object storage rejected the transfer with status {}",
                status
            )));
        }

        tracing::debug!(file_key = %target.file_key, "Object transferred");
        Ok(())
    }
}

/// Body yielding fixed-size chunks, reporting cumulative progress as each
/// chunk is pulled onto the wire.
fn progress_body(data: Bytes, on_progress: Option<ProgressFn>) -> Body {
    let total = data.len() as u64;
    let len = data.len();
    let mut sent: u64 = 0;

    let chunks = (0..len).step_by(TRANSFER_CHUNK_SIZE).map(move |start| {
        let end = usize::min(start + TRANSFER_CHUNK_SIZE, len);
        let chunk = data.slice(start..end);
        sent += chunk.len() as u64;
        if let Some(callback) = &on_progress {
            callback(transfer_percent(sent, total));
        }
        Ok::<Bytes, std::convert::Infallible>(chunk)
    });

    Body::wrap_stream(futures::stream::iter(chunks))
}

fn transfer_percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((sent * 100) / total).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_percent_scales_and_saturates() {
        assert_eq!(transfer_percent(0, 200), 0);
        assert_eq!(transfer_percent(50, 200), 25);
        assert_eq!(transfer_percent(199, 200), 99);
        assert_eq!(transfer_percent(200, 200), 100);
        assert_eq!(transfer_percent(0, 0), 100);
    }
}
