use crate::error::StoreError;
use crate::store::IniBackend;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory INI file for testing without touching the disk
pub struct MemoryIniFile {
    path: PathBuf,
    contents: Mutex<Option<String>>,
    read_only: bool,
}

impl MemoryIniFile {
    /// A writable file holding `contents`
    pub fn new(contents: impl Into<String>) -> Self {
        MemoryIniFile {
            path: PathBuf::from("memory://DefaultGame.ini"),
            contents: Mutex::new(Some(contents.into())),
            read_only: false,
        }
    }

    /// A file that does not exist
    pub fn missing() -> Self {
        MemoryIniFile {
            path: PathBuf::from("memory://DefaultGame.ini"),
            contents: Mutex::new(None),
            read_only: false,
        }
    }

    /// A file that can be read but not replaced
    pub fn read_only(contents: impl Into<String>) -> Self {
        MemoryIniFile {
            read_only: true,
            ..MemoryIniFile::new(contents)
        }
    }

    /// Current contents, `None` if the file does not exist
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl IniBackend for MemoryIniFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<String, StoreError> {
        self.contents().ok_or_else(|| StoreError::FileNotFound {
            path: self.path.clone(),
        })
    }

    fn replace(&self, contents: &str) -> Result<(), StoreError> {
        let mut slot = self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.is_none() {
            return Err(StoreError::FileNotFound {
                path: self.path.clone(),
            });
        }
        if self.read_only {
            return Err(StoreError::WritePermission {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"),
            });
        }
        *slot = Some(contents.to_string());
        Ok(())
    }
}
