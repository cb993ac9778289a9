//! Metadata registrar: final stage of the upload pipeline.
//!
//! Runs only after the object transfer succeeded. A failure here leaves the
//! transferred object in storage without a file record; the pipeline never
//! attempts cleanup.

use lectern_core::models::{RegisterUploadRequest, RegisteredFile};
use lectern_core::UploadError;

use crate::{api_prefix, ApiClient};

impl ApiClient {
    /// Record a transferred object as a durable file attached to its owner.
    pub async fn register_upload(
        &self,
        request: &RegisterUploadRequest,
    ) -> Result<RegisteredFile, UploadError> {
        tracing::debug!(
            file_key = %request.file_key,
            owner_type = %request.owner_type,
            owner_id = %request.owner_id,
            "Registering upload"
        );

        let registered: RegisteredFile = self
            .post_json(&format!("{}/uploads/complete", api_prefix()), request)
            .await?;

        tracing::debug!(file_id = %registered.id, "Upload registered");
        Ok(registered)
    }
}
