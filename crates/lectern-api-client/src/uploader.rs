//! Upload orchestrator
//!
//! Drives each file through validate -> presign -> transfer -> register and
//! maps per-stage progress onto one 0-100 scale. Stage weights: presign ends
//! at 30, transfer fills 30-70, registration completes at 100.
//!
//! A failure at any stage aborts that file's pipeline immediately and is
//! propagated untouched. An object already transferred when registration
//! fails stays in storage without a file record.

use std::sync::Arc;

use lectern_core::models::{
    OwnerReference, PresignRequest, RegisterUploadRequest, UploadResult, UploadSource, UploadTarget,
};
use lectern_core::validation::{validate_file, UploadConstraints};
use lectern_core::UploadError;

use crate::progress::ProgressFn;
use crate::transfer::TransferClient;
use crate::ApiClient;

const PRESIGNED_PROGRESS: u8 = 30;
const TRANSFERRED_PROGRESS: u8 = 70;

/// Per-run settings for the orchestrator.
#[derive(Clone)]
pub struct UploadOptions {
    /// Record the file(s) will be attached to
    pub owner: OwnerReference,
    /// Pre-flight validation constraints
    pub constraints: UploadConstraints,
    /// Progress observer (0-100)
    pub on_progress: Option<ProgressFn>,
}

impl UploadOptions {
    pub fn new(owner: OwnerReference) -> Self {
        Self {
            owner,
            constraints: UploadConstraints::default(),
            on_progress: None,
        }
    }
}

/// Orchestrates the upload pipeline against the backend and object storage.
#[derive(Clone)]
pub struct Uploader {
    api: ApiClient,
    transfer: TransferClient,
}

impl Uploader {
    pub fn new(api: ApiClient) -> anyhow::Result<Self> {
        Ok(Self {
            api,
            transfer: TransferClient::new()?,
        })
    }

    /// Upload one file end to end: validate, presign, transfer, register.
    pub async fn upload_file(
        &self,
        source: UploadSource,
        options: &UploadOptions,
    ) -> Result<UploadResult, UploadError> {
        validate_file(&source, &options.constraints)?;

        let target = self.presign(&source, options).await?;
        self.transfer_with_progress(&target, &source, options)
            .await?;

        let request = RegisterUploadRequest {
            file_key: target.file_key.clone(),
            file_name: source.file_name.clone(),
            file_size: source.size(),
            mime_type: source.mime_type.clone(),
            owner_type: options.owner.owner_type,
            owner_id: options.owner.owner_id.clone(),
        };
        let registered = self.api.register_upload(&request).await?;
        emit(&options.on_progress, 100);

        tracing::info!(
            file_name = %source.file_name,
            file_key = %target.file_key,
            file_id = %registered.id,
            "Upload completed"
        );

        let file_size = source.size();
        Ok(UploadResult {
            file_key: target.file_key,
            file_id: Some(registered.id),
            original_name: source.file_name,
            file_size,
            mime_type: source.mime_type,
            public_url: Some(registered.public_url),
        })
    }

    /// Upload one file without the registration stage. The object lands in
    /// storage under its reserved key but no file record is created; progress
    /// reaches 100 when the transfer completes.
    pub async fn upload_file_s3_only(
        &self,
        source: UploadSource,
        options: &UploadOptions,
    ) -> Result<UploadResult, UploadError> {
        validate_file(&source, &options.constraints)?;

        let target = self.presign(&source, options).await?;
        self.transfer_with_progress(&target, &source, options)
            .await?;
        emit(&options.on_progress, 100);

        tracing::info!(
            file_name = %source.file_name,
            file_key = %target.file_key,
            "Upload completed without registration"
        );

        let file_size = source.size();
        Ok(UploadResult {
            file_key: target.file_key,
            file_id: None,
            original_name: source.file_name,
            file_size,
            mime_type: source.mime_type,
            public_url: target.public_url,
        })
    }

    /// Upload several files strictly in input order under one aggregate
    /// progress scale. The first failure aborts the whole batch: earlier
    /// results are discarded, later files are never attempted, and the error
    /// names the file that failed.
    pub async fn upload_multiple_files(
        &self,
        sources: Vec<UploadSource>,
        options: &UploadOptions,
    ) -> Result<Vec<UploadResult>, UploadError> {
        let total = sources.len();
        let mut results = Vec::with_capacity(total);

        for (index, source) in sources.into_iter().enumerate() {
            let file_name = source.file_name.clone();
            let per_file = UploadOptions {
                owner: options.owner.clone(),
                constraints: options.constraints.clone(),
                on_progress: options.on_progress.clone().map(|callback| {
                    Arc::new(move |file_progress: u8| {
                        callback(batch_progress(index, total, file_progress));
                    }) as ProgressFn
                }),
            };

            match self.upload_file(source, &per_file).await {
                Ok(result) => results.push(result),
                Err(err) => {
                    tracing::warn!(
                        file_name = %file_name,
                        position = index + 1,
                        total,
                        error = %err,
                        "Batch upload aborted"
                    );
                    return Err(UploadError::MultipleUploadFailed {
                        file_name,
                        reason: err.to_string(),
                    });
                }
            }
        }

        Ok(results)
    }

    async fn presign(
        &self,
        source: &UploadSource,
        options: &UploadOptions,
    ) -> Result<UploadTarget, UploadError> {
        let request = PresignRequest {
            file_name: source.file_name.clone(),
            file_size: source.size(),
            mime_type: source.mime_type.clone(),
            owner_type: options.owner.owner_type,
            owner_id: options.owner.owner_id.clone(),
        };
        let target = self.api.request_upload_target(&request).await?;
        emit(&options.on_progress, PRESIGNED_PROGRESS);
        Ok(target)
    }

    async fn transfer_with_progress(
        &self,
        target: &UploadTarget,
        source: &UploadSource,
        options: &UploadOptions,
    ) -> Result<(), UploadError> {
        let transfer_progress = options.on_progress.clone().map(|callback| {
            Arc::new(move |percent: u8| {
                callback(scale_transfer_progress(percent));
            }) as ProgressFn
        });
        self.transfer
            .put_object(target, source, transfer_progress)
            .await?;
        emit(&options.on_progress, TRANSFERRED_PROGRESS);
        Ok(())
    }
}

fn emit(on_progress: &Option<ProgressFn>, value: u8) {
    if let Some(callback) = on_progress {
        callback(value);
    }
}

/// Map raw transfer progress (0-100) onto the 30-70 band of the overall scale.
fn scale_transfer_progress(percent: u8) -> u8 {
    PRESIGNED_PROGRESS + ((u16::from(percent.min(100)) * 40) / 100) as u8
}

/// Aggregate progress for file `index` of `total` at `file_progress` percent:
/// round(((index + file_progress/100) / total) * 100), capped at 99 until the
/// last file completes.
fn batch_progress(index: usize, total: usize, file_progress: u8) -> u8 {
    if total == 0 {
        return 100;
    }
    let file_fraction = f64::from(file_progress.min(100)) / 100.0;
    let aggregate = ((index as f64 + file_fraction) / total as f64 * 100.0).round() as u8;
    if index + 1 == total && file_progress >= 100 {
        100
    } else {
        aggregate.min(99)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_progress_fills_middle_band() {
        assert_eq!(scale_transfer_progress(0), 30);
        assert_eq!(scale_transfer_progress(50), 50);
        assert_eq!(scale_transfer_progress(100), 70);
    }

    #[test]
    fn batch_progress_matches_per_file_weighting() {
        // second file of four at 50% -> (1 + 0.5) / 4 -> 37.5 -> 38
        assert_eq!(batch_progress(1, 4, 50), 38);
        assert_eq!(batch_progress(0, 2, 0), 0);
        assert_eq!(batch_progress(0, 2, 100), 50);
        assert_eq!(batch_progress(1, 2, 100), 100);
    }

    #[test]
    fn batch_progress_is_monotonic_across_file_boundaries() {
        let mut last = 0;
        for index in 0..3 {
            for file_progress in [0u8, 30, 42, 70, 100] {
                let aggregate = batch_progress(index, 3, file_progress);
                assert!(aggregate >= last);
                last = aggregate;
            }
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn batch_progress_reaches_100_only_at_the_very_end() {
        // large batches would otherwise round up early
        assert!(batch_progress(61, 62, 70) < 100);
        assert!(batch_progress(60, 62, 100) < 100);
        assert_eq!(batch_progress(61, 62, 100), 100);
    }
}
