//! Scoped temporary artifacts

use crate::constants::{ARTIFACT_EXTENSION, DEFAULT_FILE_PREFIX};
use crate::types::Result;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Suffixed names tried before giving up on a taken destination
const MAX_NAME_ATTEMPTS: usize = 100;

/// A composed document staged on disk.
///
/// Dropping the handle deletes the file; [`ArtifactHandle::persist`] moves
/// it to its final name instead.
#[derive(Debug)]
pub struct ArtifactHandle {
    file: NamedTempFile,
}

impl ArtifactHandle {
    /// Stage `bytes` in a new temporary file inside `dir`.
    pub async fn acquire(dir: &Path, bytes: &[u8]) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(&format!(".{}-", DEFAULT_FILE_PREFIX))
            .suffix(&format!(".{}", ARTIFACT_EXTENSION))
            .tempfile_in(dir)?;
        let handle = Self { file };

        // On failure the handle drops here and takes the file with it
        tokio::fs::write(handle.path(), bytes).await?;
        log::debug!("Staged artifact {}", handle.path().display());

        Ok(handle)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Move the artifact to `path`, keeping it past the handle's lifetime.
    ///
    /// Existing files are never replaced: if `path` is taken, `-1`, `-2`, ...
    /// is appended to the file stem. Returns the path actually written.
    pub fn persist(self, path: &Path) -> Result<PathBuf> {
        let mut file = self.file;
        let mut candidate = path.to_path_buf();

        for attempt in 1..=MAX_NAME_ATTEMPTS {
            match file.persist_noclobber(&candidate) {
                Ok(_) => return Ok(candidate),
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!("{} exists, trying another name", candidate.display());
                    file = e.file;
                    candidate = numbered_path(path, attempt);
                }
                Err(e) => return Err(e.error.into()),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("No free file name for {}", path.display()),
        )
        .into())
    }

    /// Delete the artifact now, reporting any error.
    pub fn release(self) -> Result<()> {
        log::debug!("Releasing artifact {}", self.path().display());
        self.file.close()?;
        Ok(())
    }
}

/// `dir/name.pdf` -> `dir/name-<n>.pdf`
fn numbered_path(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}-{}.{}", stem, n, ext.to_string_lossy()),
        None => format!("{}-{}", stem, n),
    };
    path.with_file_name(name)
}
