//! Presign requester: first stage of the upload pipeline.
//!
//! One POST per file. The owner reference travels with the request so the
//! backend can namespace the reserved object key under the owning record.

use lectern_core::models::{PresignRequest, UploadTarget};
use lectern_core::UploadError;

use crate::{api_prefix, ApiClient};

impl ApiClient {
    /// Request a short-lived direct-upload URL for one file.
    pub async fn request_upload_target(
        &self,
        request: &PresignRequest,
    ) -> Result<UploadTarget, UploadError> {
        tracing::debug!(
            file_name = %request.file_name,
            file_size = request.file_size,
            owner_type = %request.owner_type,
            owner_id = %request.owner_id,
            "Requesting upload target"
        );

        let target: UploadTarget = self
            .post_json(&format!("{}/uploads/presigned", api_prefix()), request)
            .await?;

        tracing::debug!(file_key = %target.file_key, "Upload target issued");
        Ok(target)
    }
}
