use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::OwnerType;

/// File queued for upload, held in memory
#[derive(Debug, Clone)]
pub struct UploadSource {
    /// Original filename, shown in listings and error reports
    pub file_name: String,
    /// Declared MIME type (e.g. "application/pdf")
    pub mime_type: String,
    /// File contents
    pub data: Bytes,
}

impl UploadSource {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// File size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Request for a short-lived direct-upload URL
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    /// Original filename
    pub file_name: String,
    /// File size in bytes
    pub file_size: u64,
    /// Content type (MIME type)
    pub mime_type: String,
    /// Content domain the file belongs to
    pub owner_type: OwnerType,
    /// Identifier of the owning record
    pub owner_id: String,
}

/// Response containing the presigned URL and reserved object key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    /// Presigned URL for the direct PUT to object storage
    pub upload_url: String,
    /// Object key reserved for this file
    pub file_key: String,
    /// Public URL the object will be served from, when the bucket exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    /// URL expiration time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Request to record a transferred object with the backend
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUploadRequest {
    /// Object key returned by the presign call
    pub file_key: String,
    /// Original filename
    pub file_name: String,
    /// File size in bytes
    pub file_size: u64,
    /// Content type (MIME type)
    pub mime_type: String,
    /// Content domain the file belongs to
    pub owner_type: OwnerType,
    /// Identifier of the owning record
    pub owner_id: String,
}

/// Response after the backend records the upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredFile {
    /// Durable file record id
    pub id: Uuid,
    /// URL the file is served from
    pub public_url: String,
}

/// Outcome of a fully successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    /// Object key in storage
    pub file_key: String,
    /// Durable record id; absent when registration was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<Uuid>,
    /// Original filename
    pub original_name: String,
    /// File size in bytes
    pub file_size: u64,
    /// Content type
    pub mime_type: String,
    /// Public URL, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presign_request_matches_wire_contract() {
        let request = PresignRequest {
            file_name: "notice.pdf".to_string(),
            file_size: 2048,
            mime_type: "application/pdf".to_string(),
            owner_type: OwnerType::Post,
            owner_id: "17".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["fileName"], "notice.pdf");
        assert_eq!(value["fileSize"], 2048);
        assert_eq!(value["mimeType"], "application/pdf");
        assert_eq!(value["ownerType"], "post");
        assert_eq!(value["ownerId"], "17");
    }

    #[test]
    fn upload_target_tolerates_missing_optional_fields() {
        let target: UploadTarget = serde_json::from_str(
            r#"{"uploadUrl":"https://bucket.example/key?sig=abc","fileKey":"post/17/notice.pdf"}"#,
        )
        .unwrap();
        assert!(target.public_url.is_none());
        assert!(target.expires_at.is_none());
    }

    #[test]
    fn upload_source_reports_byte_size() {
        let source = UploadSource::new("a.txt", "text/plain", Bytes::from_static(b"hello"));
        assert_eq!(source.size(), 5);
    }
}
