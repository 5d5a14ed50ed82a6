//! `projectVersion` entry points.
//!
//! Each operation validates every raw input before the store is touched, so bad
//! arguments can never leave a half-written config file behind.

use crate::domain::{BranchToken, Version};
use crate::error::Result;
use crate::policy::derive_next_version;
use crate::store::{IniBackend, IniVersionStore};

/// Return the stored project version.
pub fn get_version<B: IniBackend>(store: &IniVersionStore<B>) -> Result<Version> {
    Ok(store.read_version()?)
}

/// Validate `value` and store it verbatim.
pub fn manually_set_version<B: IniBackend>(value: &str, store: &IniVersionStore<B>) -> Result<Version> {
    let version = Version::parse(value)?;
    store.write_version(&version)?;
    tracing::info!(%version, "project version set manually");
    Ok(version)
}

/// Outcome of a perforce-style version update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerforceUpdate {
    /// Value stored before the update, if it was readable
    pub previous: Option<Version>,
    pub version: Version,
    pub branch: BranchToken,
}

impl PerforceUpdate {
    /// True when the new version has lower precedence than the one it replaced.
    pub fn is_downgrade(&self) -> bool {
        self.previous.as_ref().is_some_and(|previous| {
            self.version.to_semver().cmp_precedence(&previous.to_semver())
                == std::cmp::Ordering::Less
        })
    }
}

/// Derive the version for a build of `branch` and store it.
pub fn set_version_with_perforce<B: IniBackend>(
    dev_version: &str,
    rel_version: &str,
    branch: &str,
    store: &IniVersionStore<B>,
) -> Result<PerforceUpdate> {
    let dev = Version::parse(dev_version)?;
    let rel = Version::parse(rel_version)?;
    let branch = BranchToken::parse(branch)?;

    let version = derive_next_version(&rel, &dev, &branch);
    tracing::info!(%branch, kind = %branch.kind, %rel, %dev, %version, "derived project version");

    let previous = match store.read_version() {
        Ok(previous) => Some(previous),
        Err(e) => {
            tracing::debug!(error = %e, "previous project version unavailable");
            None
        }
    };

    store.write_version(&version)?;

    let update = PerforceUpdate {
        previous,
        version,
        branch,
    };
    if update.is_downgrade() {
        tracing::warn!(
            previous = %update.previous.as_ref().map(ToString::to_string).unwrap_or_default(),
            version = %update.version,
            "project version moved backwards"
        );
    }
    Ok(update)
}
