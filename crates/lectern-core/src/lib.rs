//! Lectern Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! file validation shared across all Lectern components.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::UploadSettings;
pub use error::UploadError;
pub use models::{
    OwnerReference, OwnerType, PresignRequest, RegisterUploadRequest, RegisteredFile, UploadResult,
    UploadSource, UploadTarget,
};
pub use validation::{validate_file, validate_file_size, validate_mime_type, UploadConstraints};
