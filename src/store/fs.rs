use crate::error::StoreError;
use crate::store::IniBackend;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// An INI file on disk
///
/// Writes go to a temporary file in the same directory which is then renamed over
/// the original, so a crash mid-write leaves the old file in place.
#[derive(Debug, Clone)]
pub struct FsIniFile {
    path: PathBuf,
}

impl FsIniFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FsIniFile { path: path.into() }
    }

    /// Directory that receives the temporary file for `target`.
    fn directory_of(target: &Path) -> &Path {
        match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_permission(&self, source: io::Error) -> StoreError {
        StoreError::WritePermission {
            path: self.path.clone(),
            source,
        }
    }
}

impl IniBackend for FsIniFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<String, StoreError> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::FileNotFound {
                path: self.path.clone(),
            },
            _ => StoreError::Io {
                path: self.path.clone(),
                source: e,
            },
        })?;

        String::from_utf8(bytes).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }

    fn replace(&self, contents: &str) -> Result<(), StoreError> {
        let metadata = fs::metadata(&self.path).map_err(|e| StoreError::from_io(&self.path, e))?;
        let permissions = metadata.permissions();
        if permissions.readonly() {
            return Err(self.write_permission(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file is read-only",
            )));
        }

        // Symlinked configs are written through to the file they point at.
        let target = fs::canonicalize(&self.path).map_err(|e| StoreError::from_io(&self.path, e))?;

        // Mode bits alone miss files owned by another user.
        OpenOptions::new()
            .write(true)
            .open(&target)
            .map_err(|e| StoreError::from_io(&self.path, e))?;

        let mut temp = NamedTempFile::new_in(Self::directory_of(&target)).map_err(|e| match e.kind() {
            io::ErrorKind::PermissionDenied => self.write_permission(e),
            _ => StoreError::from_io(&self.path, e),
        })?;

        let io_err = |e: io::Error| StoreError::from_io(&self.path, e);
        temp.write_all(contents.as_bytes()).map_err(io_err)?;
        temp.flush().map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;
        fs::set_permissions(temp.path(), permissions).map_err(io_err)?;

        temp.persist(&target)
            .map_err(|e| StoreError::from_io(&self.path, e.error))?;

        tracing::debug!(path = %target.display(), bytes = contents.len(), "config file replaced");
        Ok(())
    }
}
