//! Output dispatch - turning a composed document into a print job or a file
//!
//! Both paths stage the bytes in an [`ArtifactHandle`], a temporary file
//! that is removed when the handle is dropped unless it is persisted.

mod artifact;
mod print;

pub use artifact::ArtifactHandle;
pub use print::{PrintSpooler, SystemSpooler};

use crate::constants::{ARTIFACT_EXTENSION, DEFAULT_FILE_PREFIX, DEFAULT_PRINT_COMMAND};
use crate::types::*;
use std::path::PathBuf;

/// Where and how artifacts are delivered
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOptions {
    /// File name prefix for saved artifacts
    pub file_prefix: String,
    /// Directory for downloads and print fallbacks
    pub output_dir: PathBuf,
    /// Print command; the artifact path is appended as the last argument
    pub print_command: String,
    pub print_args: Vec<String>,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            output_dir: PathBuf::from("."),
            print_command: DEFAULT_PRINT_COMMAND.to_string(),
            print_args: Vec::new(),
        }
    }
}

impl DispatchOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.file_prefix.is_empty() {
            return Err(QuadrantError::Config("File prefix is empty".to_string()));
        }
        if self.file_prefix.contains(['/', '\\']) {
            return Err(QuadrantError::Config(format!(
                "File prefix '{}' contains a path separator",
                self.file_prefix
            )));
        }
        if self.print_command.trim().is_empty() {
            return Err(QuadrantError::Config("Print command is empty".to_string()));
        }
        Ok(())
    }

    /// Destination for an artifact generated at `timestamp_ms`
    pub fn artifact_path(&self, paper_size: PaperSize, timestamp_ms: i64) -> PathBuf {
        self.output_dir
            .join(artifact_file_name(&self.file_prefix, paper_size, timestamp_ms))
    }
}

/// `<prefix>-<papersize>-<unix-ms>.pdf`
pub fn artifact_file_name(prefix: &str, paper_size: PaperSize, timestamp_ms: i64) -> String {
    format!(
        "{}-{}-{}.{}",
        prefix,
        paper_size.label(),
        timestamp_ms,
        ARTIFACT_EXTENSION
    )
}

/// Result of a print dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum PrintOutcome {
    /// The spooler accepted the job
    Submitted,
    /// The spooler could not be used; the artifact was saved here instead
    Fallback { path: PathBuf },
}

/// Hand a composed document to the print spooler.
///
/// If the spooler cannot start or rejects the job, the artifact is saved
/// under `options.output_dir` once and its path returned. There is no
/// further retry.
pub async fn render_for_print<S: PrintSpooler>(
    result: &CompositionResult,
    options: &DispatchOptions,
    spooler: &S,
) -> Result<PrintOutcome> {
    options.validate()?;

    let artifact = ArtifactHandle::acquire(&options.output_dir, &result.bytes).await?;

    match spooler.submit(artifact.path()).await {
        Ok(()) => {
            log::info!("Submitted {:?} sheet to the print spooler", result.paper_size);
            if let Err(e) = artifact.release() {
                log::warn!("Failed to release print artifact: {}", e);
            }
            Ok(PrintOutcome::Submitted)
        }
        Err(e) => {
            log::warn!("Print spooler unavailable ({}), saving artifact instead", e);
            let path = artifact.persist(&options.artifact_path(result.paper_size, now_millis()))?;
            Ok(PrintOutcome::Fallback { path })
        }
    }
}

/// Save a composed document under a generated file name.
///
/// Bytes are written to a temporary file beside the destination and renamed
/// into place, so a failed save leaves nothing behind. An existing file with
/// the same name is kept and the new one gets a numbered name.
pub async fn render_for_download(
    result: &CompositionResult,
    options: &DispatchOptions,
) -> Result<PathBuf> {
    options.validate()?;

    let artifact = ArtifactHandle::acquire(&options.output_dir, &result.bytes).await?;
    let path = artifact.persist(&options.artifact_path(result.paper_size, now_millis()))?;

    log::info!("Saved {}", path.display());
    Ok(path)
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
