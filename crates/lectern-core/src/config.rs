//! Configuration module
//!
//! Environment-driven settings for the upload pipeline. Defaults mirror what
//! the backend enforces, so oversized or mistyped files are rejected locally
//! before any network call.

use std::env;

use crate::validation::{UploadConstraints, DEFAULT_ALLOWED_MIME_TYPES};

/// Upload limits, overridable through the environment.
#[derive(Clone, Debug)]
pub struct UploadSettings {
    pub max_file_size_bytes: u64,
    pub allowed_mime_types: Vec<String>,
}

impl UploadSettings {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        const MAX_FILE_SIZE_MB: u64 = 10;

        let max_file_size_mb = env::var("LECTERN_MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("LECTERN_MAX_FILE_SIZE_MB must be a valid number"))?;

        let allowed_mime_types = env::var("LECTERN_ALLOWED_TYPES")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_MIME_TYPES.join(","))
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_mime_types,
        })
    }

    /// Constraints for the pre-flight validator.
    pub fn constraints(&self) -> UploadConstraints {
        UploadConstraints {
            max_size: self.max_file_size_bytes,
            allowed_types: self.allowed_mime_types.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations never race.
    #[test]
    fn from_env_applies_defaults_and_overrides() {
        env::remove_var("LECTERN_MAX_FILE_SIZE_MB");
        env::remove_var("LECTERN_ALLOWED_TYPES");
        let settings = UploadSettings::from_env().unwrap();
        assert_eq!(settings.max_file_size_bytes, 10 * 1024 * 1024);
        assert!(settings
            .allowed_mime_types
            .iter()
            .any(|t| t == "application/pdf"));

        env::set_var("LECTERN_MAX_FILE_SIZE_MB", "25");
        env::set_var("LECTERN_ALLOWED_TYPES", "image/png, Image/JPEG");
        let settings = UploadSettings::from_env().unwrap();
        assert_eq!(settings.max_file_size_bytes, 25 * 1024 * 1024);
        assert_eq!(settings.allowed_mime_types, vec!["image/png", "image/jpeg"]);
        assert_eq!(settings.constraints().max_size, 25 * 1024 * 1024);

        env::set_var("LECTERN_MAX_FILE_SIZE_MB", "not-a-number");
        assert!(UploadSettings::from_env().is_err());

        env::remove_var("LECTERN_MAX_FILE_SIZE_MB");
        env::remove_var("LECTERN_ALLOWED_TYPES");
    }
}
