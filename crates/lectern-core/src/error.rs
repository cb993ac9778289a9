//! Error types module
//!
//! Upload failures are unified under the `UploadError` enum. The two
//! validation variants are raised before any network call. `UploadFailed`
//! covers presign, transfer, and registration failures and carries the
//! backend-provided message when one exists. `MultipleUploadFailed` wraps
//! the first failure inside a batch with the name of the file that caused it.

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File size exceeds maximum allowed size of {limit_mb}MB")]
    FileTooLarge { limit_mb: u64 },

    #[error("Unsupported file type: {mime_type}")]
    UnsupportedFileType { mime_type: String },

    #[error("File upload failed: {0}")]
    UploadFailed(String),

    #[error("Failed to upload {file_name}: {reason}")]
    MultipleUploadFailed { file_name: String, reason: String },
}

impl UploadError {
    /// Machine-readable error code (e.g. "FILE_TOO_LARGE").
    pub fn code(&self) -> &'static str {
        match self {
            UploadError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            UploadError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            UploadError::UploadFailed(_) => "UPLOAD_FAILED",
            UploadError::MultipleUploadFailed { .. } => "MULTIPLE_UPLOAD_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_too_large_names_limit_in_megabytes() {
        let err = UploadError::FileTooLarge { limit_mb: 10 };
        assert_eq!(err.code(), "FILE_TOO_LARGE");
        assert!(err.to_string().contains("10MB"));
    }

    #[test]
    fn unsupported_file_type_names_offending_type() {
        let err = UploadError::UnsupportedFileType {
            mime_type: "application/x-msdownload".to_string(),
        };
        assert_eq!(err.code(), "UNSUPPORTED_FILE_TYPE");
        assert!(err.to_string().contains("application/x-msdownload"));
    }

    #[test]
    fn upload_failed_keeps_backend_message() {
        let err = UploadError::UploadFailed("Owner record not found".to_string());
        assert_eq!(err.code(), "UPLOAD_FAILED");
        assert!(err.to_string().contains("Owner record not found"));
    }

    #[test]
    fn multiple_upload_failed_names_file_and_cause() {
        let err = UploadError::MultipleUploadFailed {
            file_name: "syllabus.pdf".to_string(),
            reason: "File upload failed: connection reset".to_string(),
        };
        assert_eq!(err.code(), "MULTIPLE_UPLOAD_FAILED");
        let message = err.to_string();
        assert!(message.contains("syllabus.pdf"));
        assert!(message.contains("connection reset"));
    }
}
