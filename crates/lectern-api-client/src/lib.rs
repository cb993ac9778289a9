//! Shared HTTP client for the Lectern backend.
//!
//! Provides a minimal client with configurable auth (Bearer token or X-API-Key)
//! plus the direct-upload pipeline: presign requester, object transfer,
//! metadata registrar, batch orchestrator, and the progress tracker. The CLI
//! uses this client directly.

pub mod presign;
pub mod progress;
pub mod register;
pub mod transfer;
pub mod uploader;

use anyhow::{Context, Result};
use lectern_core::UploadError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// API version prefix (e.g. "/api/v1"). Set LECTERN_API_VERSION to match the server.
pub fn api_prefix() -> String {
    let version = std::env::var("LECTERN_API_VERSION").unwrap_or_else(|_| "v1".to_string());
    format!("/api/{}", version)
}

/// HTTP client for the Lectern backend with configurable auth.
///
/// Only backend calls go through this client. Presigned PUTs to object
/// storage use [`transfer::TransferClient`], which never attaches auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Auth) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Create client from environment: LECTERN_API_URL, then LECTERN_API_TOKEN
    /// (Bearer) or LECTERN_API_KEY (X-API-Key). The token wins when both are set.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("LECTERN_API_URL").unwrap_or_else(|_| "http://localhost:4000".to_string());

        if let Ok(token) = std::env::var("LECTERN_API_TOKEN") {
            return Self::new(base_url, Auth::Bearer(token));
        }

        let api_key = std::env::var("LECTERN_API_KEY")
            .context("Missing credentials. Set LECTERN_API_TOKEN or LECTERN_API_KEY")?;

        Self::new(base_url, Auth::XApiKey(api_key))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::XApiKey(key) => request.header("X-API-Key", key.as_str()),
        }
    }

    /// POST JSON body and deserialize the response. Non-success statuses are
    /// surfaced as `UploadFailed` carrying the backend-provided message.
    pub(crate) async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, UploadError> {
        let url = self.build_url(path);
        let request = self.client.post(&url).json(body);
        let request = self.apply_auth(request);

        let response = request
            .send()
            .await
            .map_err(|e| UploadError::UploadFailed(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UploadError::UploadFailed(backend_message(
                status,
                &error_text,
            )));
        }

        response.json().await.map_err(|e| {
            UploadError::UploadFailed(format!("Failed to parse response as JSON: {}", e))
        })
    }
}

/// Prefer the backend's own message (`{"error": "..."}`), then the raw body,
/// then the status line.
fn backend_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        format!("API request failed with status {}", status)
    } else {
        format!("API request failed with status {}: {}", status, body)
    }
}

// Re-export pipeline types for convenience.
pub use progress::{ProgressFn, UploadState, UploadTracker};
pub use transfer::TransferClient;
pub use uploader::{UploadOptions, Uploader};
