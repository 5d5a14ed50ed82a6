//! Build artifact cleanup.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, UnrealCiError};

/// What `dist` found at the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
    Removed,
    NotFound,
}

/// Recursively delete the archive/dist directory at `directory`.
///
/// A missing directory is not an error, so repeated CI runs stay green.
pub fn dist(directory: &Path) -> Result<CleanOutcome> {
    match fs::symlink_metadata(directory) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %directory.display(), "nothing to clean");
            Ok(CleanOutcome::NotFound)
        }
        Err(e) => Err(e.into()),
        Ok(metadata) if !metadata.is_dir() => Err(UnrealCiError::config(format!(
            "refusing to clean {}: not a directory",
            directory.display()
        ))),
        Ok(_) => {
            fs::remove_dir_all(directory)?;
            tracing::info!(path = %directory.display(), "removed dist directory");
            Ok(CleanOutcome::Removed)
        }
    }
}
