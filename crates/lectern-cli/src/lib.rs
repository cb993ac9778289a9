use std::path::Path;

use anyhow::Context;
use lectern_core::models::UploadSource;

/// Map a file extension to the MIME type the backend expects.
///
/// Covers the default allowed set; anything else needs an explicit
/// `--mime-type`.
pub fn mime_for_extension(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "zip" => "application/zip",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mime)
}

/// Read a file from disk into an upload source.
///
/// The MIME type comes from `override_mime` when given, otherwise from the
/// file extension.
pub fn source_from_path(path: &Path, override_mime: Option<&str>) -> anyhow::Result<UploadSource> {
    if path
        .components()
        .any(|c| c == std::path::Component::ParentDir)
    {
        return Err(anyhow::anyhow!("Invalid input: {}", path.display()));
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?
        .to_string();

    let mime_type = match override_mime {
        Some(mime) => mime.to_string(),
        None => mime_for_extension(path)
            .with_context(|| {
                format!(
                    "Cannot infer MIME type for {}; pass --mime-type",
                    path.display()
                )
            })?
            .to_string(),
    };

    let data =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(UploadSource::new(file_name, mime_type, data))
}


/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
