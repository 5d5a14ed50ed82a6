//! Project version persistence
//!
//! The version lives as a single `Key=Value` line inside an Unreal config file
//! (`Config/DefaultGame.ini` by default). All access goes through the [IniBackend]
//! trait so the version logic never holds an ambient file handle:
//!
//! - [fs::FsIniFile]: the real file, rewritten atomically (temp file + rename)
//! - [memory::MemoryIniFile]: an in-memory stand-in for tests
//!
//! [IniVersionStore] adds the section/key lookup and version validation on top of
//! any backend.
//!
//! ```rust
//! # use unreal_ci::store::{IniVersionStore, MemoryIniFile, IniKey};
//! # use unreal_ci::domain::Version;
//! let file = MemoryIniFile::new(
//!     "[/Script/EngineSettings.GeneralProjectSettings]\nProjectVersion=0.1.0\n",
//! );
//! let store = IniVersionStore::new(file, IniKey::default());
//! store.write_version(&Version::new(0, 2, 0)).unwrap();
//! assert_eq!(store.read_version().unwrap(), Version::new(0, 2, 0));
//! ```

pub mod fs;
pub mod ini;
pub mod memory;

pub use fs::FsIniFile;
pub use ini::{IniEdit, IniKey};
pub use memory::MemoryIniFile;

use crate::domain::Version;
use crate::error::StoreError;
use std::path::Path;

/// Whole-document access to one INI file
///
/// Implementations must make [IniBackend::replace] all-or-nothing: after a failed
/// call the previous contents are still in place.
pub trait IniBackend: Send + Sync {
    /// Location used in error messages
    fn path(&self) -> &Path;

    /// Read the full document
    ///
    /// # Returns
    /// * `Err(StoreError::FileNotFound)` - If the file does not exist
    fn load(&self) -> Result<String, StoreError>;

    /// Replace the full document
    ///
    /// # Returns
    /// * `Err(StoreError::FileNotFound)` - If the file does not exist
    /// * `Err(StoreError::WritePermission)` - If the file cannot be written
    fn replace(&self, contents: &str) -> Result<(), StoreError>;
}

/// Reads and writes the project version through an [IniBackend]
pub struct IniVersionStore<B: IniBackend> {
    backend: B,
    key: IniKey,
}

impl<B: IniBackend> IniVersionStore<B> {
    pub fn new(backend: B, key: IniKey) -> Self {
        IniVersionStore { backend, key }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load and validate the stored version
    pub fn read_version(&self) -> Result<Version, StoreError> {
        let contents = self.backend.load()?;
        let raw = ini::get_value(&contents, &self.key).ok_or_else(|| StoreError::SectionMissing {
            path: self.backend.path().to_path_buf(),
            section: self.key.section.clone(),
            key: self.key.key.clone(),
        })?;

        Version::parse(raw).map_err(|source| StoreError::MalformedVersion {
            path: self.backend.path().to_path_buf(),
            value: raw.to_string(),
            source,
        })
    }

    /// Store `version`, leaving every other byte of the document as it was
    pub fn write_version(&self, version: &Version) -> Result<IniEdit, StoreError> {
        let contents = self.backend.load()?;
        let (updated, edit) = ini::set_value(&contents, &self.key, &version.to_string());

        match edit {
            IniEdit::Replaced => {}
            IniEdit::InsertedKey => tracing::warn!(
                path = %self.backend.path().display(),
                key = %self.key.key,
                "version key missing, inserting it under [{}]",
                self.key.section
            ),
            IniEdit::AppendedSection => tracing::warn!(
                path = %self.backend.path().display(),
                section = %self.key.section,
                "version section missing, appending it"
            ),
        }

        self.backend.replace(&updated)?;
        tracing::debug!(path = %self.backend.path().display(), %version, "project version written");
        Ok(edit)
    }
}

/// Read the project version from the default section/key of the file at `path`
pub fn read_version(path: impl AsRef<Path>) -> Result<Version, StoreError> {
    IniVersionStore::new(FsIniFile::new(path.as_ref()), IniKey::default()).read_version()
}

/// Write `version` into the default section/key of the file at `path`
pub fn write_version(path: impl AsRef<Path>, version: &Version) -> Result<(), StoreError> {
    IniVersionStore::new(FsIniFile::new(path.as_ref()), IniKey::default())
        .write_version(version)
        .map(|_| ())
}
