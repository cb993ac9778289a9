//! Validation modules

pub mod file;

pub use file::{
    validate_file, validate_file_size, validate_mime_type, UploadConstraints,
    DEFAULT_ALLOWED_MIME_TYPES, DEFAULT_MAX_FILE_SIZE_BYTES, IMAGE_MIME_TYPES,
};
