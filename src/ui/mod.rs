//! User interface module.
//!
//! The tool runs unattended in CI, so there are no prompts; everything here is output.

pub mod formatter;

pub use formatter::{
    display_error, display_status, display_success, display_version, display_version_change,
    display_warning,
};
