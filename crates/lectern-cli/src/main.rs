//! Lectern CLI — command-line client for the Lectern API.
//!
//! Set LECTERN_API_TOKEN (or LECTERN_API_KEY) and LECTERN_API_URL. Uploads
//! run through presign, direct transfer to storage, and registration.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lectern_api_client::{ApiClient, ProgressFn, UploadOptions, Uploader};
use lectern_cli::{init_tracing, source_from_path};
use lectern_core::models::{OwnerReference, OwnerType, UploadResult, UploadSource};
use lectern_core::validation::UploadConstraints;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "lectern", about = "Lectern API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload files and attach them to a content record
    Upload {
        /// Paths of the files to upload
        #[arg(required = true)]
        files: Vec<std::path::PathBuf>,
        /// Owning record type: post, popup, faculty, header, feedback, course
        #[arg(long)]
        owner_type: String,
        /// Identifier of the owning record
        #[arg(long)]
        owner_id: String,
        /// MIME type applied to every file (skips extension inference)
        #[arg(long)]
        mime_type: Option<String>,
        /// Maximum accepted file size in megabytes
        #[arg(long)]
        max_size_mb: Option<u64>,
        /// Accept image types only
        #[arg(long)]
        images_only: bool,
        /// Transfer to storage but skip the registration call
        #[arg(long)]
        no_register: bool,
        /// Attempt every file and report per-file outcomes instead of
        /// stopping at the first failure
        #[arg(long)]
        continue_on_error: bool,
    },
}

#[derive(Serialize)]
struct FileFailure {
    file: String,
    code: &'static str,
    error: String,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn stderr_progress() -> ProgressFn {
    Arc::new(|value| eprint!("\rUploading... {}%", value))
}

/// Catch-and-continue batch: every file is attempted, outcomes are reported
/// per file, and a non-zero exit signals any failure.
async fn upload_each(
    uploader: &Uploader,
    sources: Vec<UploadSource>,
    options: &UploadOptions,
    no_register: bool,
) -> anyhow::Result<()> {
    let total = sources.len();
    let mut succeeded: Vec<UploadResult> = Vec::new();
    let mut failed: Vec<FileFailure> = Vec::new();

    for source in sources {
        let file_name = source.file_name.clone();
        let outcome = if no_register {
            uploader.upload_file_s3_only(source, options).await
        } else {
            uploader.upload_file(source, options).await
        };
        match outcome {
            Ok(result) => succeeded.push(result),
            Err(err) => failed.push(FileFailure {
                file: file_name,
                code: err.code(),
                error: err.to_string(),
            }),
        }
    }
    eprintln!();

    print_json(&serde_json::json!({
        "succeeded": succeeded,
        "failed": failed,
    }))?;

    if !failed.is_empty() {
        anyhow::bail!("{} of {} uploads failed", failed.len(), total);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            files,
            owner_type,
            owner_id,
            mime_type,
            max_size_mb,
            images_only,
            no_register,
            continue_on_error,
        } => {
            let owner_type: OwnerType = owner_type.parse()?;
            let client = ApiClient::from_env()?;
            let uploader = Uploader::new(client)?;

            let mut options = UploadOptions::new(OwnerReference::new(owner_type, owner_id));
            if images_only {
                options.constraints = UploadConstraints::images_only();
            }
            if let Some(limit_mb) = max_size_mb {
                options.constraints.max_size = limit_mb * 1024 * 1024;
            }
            options.on_progress = Some(stderr_progress());

            let mut sources = Vec::with_capacity(files.len());
            for path in &files {
                sources.push(source_from_path(path, mime_type.as_deref())?);
            }

            if continue_on_error {
                upload_each(&uploader, sources, &options, no_register).await?;
            } else if no_register {
                let mut results = Vec::with_capacity(sources.len());
                for source in sources {
                    results.push(uploader.upload_file_s3_only(source, &options).await?);
                }
                eprintln!();
                print_json(&results)?;
            } else if sources.len() == 1 {
                let source = sources.remove(0);
                let result = uploader.upload_file(source, &options).await?;
                eprintln!();
                print_json(&result)?;
            } else {
                let results = uploader.upload_multiple_files(sources, &options).await?;
                eprintln!();
                print_json(&results)?;
            }
        }
    }

    Ok(())
}
