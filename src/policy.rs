//! Maps a branch kind onto the next project version.
//!
//! The rules, for a branch token `<kind>X.Y`:
//!
//! - **Release**: `max(rel.major.minor, X.Y).0` - the release line moves forward to at
//!   least the branch's own numbering, patch resets to 0
//! - **Development**: `dev.major.dev.minor.(dev.patch + 1)` - an unreleased build off
//!   the development line
//! - **Patch**: `rel.major.rel.minor.Y` - a hotfix against the shipped release
//! - **Task**: `dev` unchanged with `+Y` attached - task branches are never release points
//!
//! Every rule is a pure function of its inputs so re-running CI on the same
//! commit and branch writes the same version.

use crate::domain::{BranchKind, BranchToken, Label, Version};

/// Compute the version to persist for a build of `branch`.
pub fn derive_next_version(rel: &Version, dev: &Version, branch: &BranchToken) -> Version {
    match branch.kind {
        BranchKind::Release => {
            let (major, minor) = (rel.major, rel.minor).max((branch.major, branch.minor));
            Version::new(major, minor, 0)
        }
        BranchKind::Development => {
            Version::new(dev.major, dev.minor, dev.patch.saturating_add(1))
        }
        BranchKind::Patch => Version::new(rel.major, rel.minor, branch.minor),
        BranchKind::Task => Version::new(dev.major, dev.minor, dev.patch)
            .with_label(Label::build(branch.minor.to_string())),
    }
}
