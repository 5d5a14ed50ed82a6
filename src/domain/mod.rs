//! Domain logic - pure version and branch values independent of any file

pub mod branch;
pub mod version;

pub use branch::{BranchKind, BranchToken};
pub use version::{Label, LabelSeparator, Version};
