//! Pre-flight file validation
//!
//! Both checks run before any network call, so a file that fails validation
//! costs zero HTTP requests.

use crate::error::UploadError;
use crate::models::UploadSource;

/// Default upload size limit: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted by default: images, PDF, office documents, archives,
/// and plain text. Department content rarely needs more than attachments and
/// banner images.
pub const DEFAULT_ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/zip",
    "text/plain",
];

/// Image MIME types, for call sites that only accept images (popups, header
/// banners).
pub const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Size and type constraints applied before an upload starts.
#[derive(Debug, Clone)]
pub struct UploadConstraints {
    pub max_size: u64,
    pub allowed_types: Vec<String>,
}

impl Default for UploadConstraints {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_types: DEFAULT_ALLOWED_MIME_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl UploadConstraints {
    /// Constraints narrowed to image types only.
    pub fn images_only() -> Self {
        Self {
            max_size: DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_types: IMAGE_MIME_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Validate file size
pub fn validate_file_size(file_size: u64, max_size: u64) -> Result<(), UploadError> {
    if file_size > max_size {
        return Err(UploadError::FileTooLarge {
            limit_mb: max_size / 1024 / 1024,
        });
    }
    Ok(())
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(mime_type: &str) -> &str {
    mime_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(mime_type)
}

/// Validate MIME type against allowlist. Compares the normalized type only (no parameter bypass).
pub fn validate_mime_type(mime_type: &str, allowed_types: &[String]) -> Result<(), UploadError> {
    let normalized = normalize_mime_type(mime_type).to_lowercase();
    if !allowed_types.iter().any(|ct| normalized == ct.to_lowercase()) {
        return Err(UploadError::UnsupportedFileType {
            mime_type: mime_type.to_string(),
        });
    }
    Ok(())
}

/// Run both pre-flight checks on a queued file. Size is checked first.
pub fn validate_file(
    file: &UploadSource,
    constraints: &UploadConstraints,
) -> Result<(), UploadError> {
    validate_file_size(file.size(), constraints.max_size)?;
    validate_mime_type(&file.mime_type, &constraints.allowed_types)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn pdf_source(size: usize) -> UploadSource {
        UploadSource::new("notes.pdf", "application/pdf", Bytes::from(vec![0u8; size]))
    }

    #[test]
    fn accepts_file_within_limits() {
        let source = pdf_source(1024);
        assert!(validate_file(&source, &UploadConstraints::default()).is_ok());
    }

    #[test]
    fn rejects_oversized_file_with_limit_in_message() {
        let err =
            validate_file_size(DEFAULT_MAX_FILE_SIZE_BYTES + 1, DEFAULT_MAX_FILE_SIZE_BYTES)
                .unwrap_err();
        assert_eq!(err.code(), "FILE_TOO_LARGE");
        assert!(err.to_string().contains("10MB"));
    }

    #[test]
    fn accepts_file_exactly_at_limit() {
        assert!(validate_file_size(DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_MAX_FILE_SIZE_BYTES).is_ok());
    }

    #[test]
    fn zero_byte_file_passes_size_check() {
        assert!(validate_file_size(0, DEFAULT_MAX_FILE_SIZE_BYTES).is_ok());
    }

    #[test]
    fn rejects_unsupported_type_naming_it() {
        let source = UploadSource::new(
            "setup.exe",
            "application/x-msdownload",
            Bytes::from_static(b"MZ"),
        );
        let err = validate_file(&source, &UploadConstraints::default()).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_FILE_TYPE");
        assert!(err.to_string().contains("application/x-msdownload"));
    }

    #[test]
    fn mime_comparison_ignores_parameters_and_case() {
        let allowed = vec!["image/jpeg".to_string()];
        assert!(validate_mime_type("image/jpeg; charset=utf-8", &allowed).is_ok());
        assert!(validate_mime_type("IMAGE/JPEG", &allowed).is_ok());
        assert!(validate_mime_type("image/pjpeg", &allowed).is_err());
    }

    #[test]
    fn size_check_runs_before_type_check() {
        let source = UploadSource::new(
            "setup.exe",
            "application/x-msdownload",
            Bytes::from(vec![0u8; 32]),
        );
        let constraints = UploadConstraints {
            max_size: 16,
            ..UploadConstraints::default()
        };
        let err = validate_file(&source, &constraints).unwrap_err();
        assert_eq!(err.code(), "FILE_TOO_LARGE");
    }

    #[test]
    fn images_only_constraints_reject_documents() {
        let source = pdf_source(10);
        let err = validate_file(&source, &UploadConstraints::images_only()).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_FILE_TYPE");
    }

    #[test]
    fn validation_is_repeatable() {
        let source = pdf_source(64);
        let constraints = UploadConstraints::images_only();
        let first = validate_file(&source, &constraints).unwrap_err();
        let second = validate_file(&source, &constraints).unwrap_err();
        assert_eq!(first.code(), second.code());
        assert_eq!(first.to_string(), second.to_string());
    }
}
