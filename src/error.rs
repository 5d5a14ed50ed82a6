use std::path::PathBuf;
use thiserror::Error;

/// Rejections produced while turning raw CLI strings into domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed version '{input}': expected MAJOR.MINOR.PATCH with an optional -label or +label")]
    MalformedVersion { input: String },

    #[error("Unknown branch kind in '{input}': expected a rel, dev, patch or task prefix")]
    UnknownBranchKind { input: String },

    #[error("Malformed branch suffix in '{input}': expected <prefix>MAJOR.MINOR")]
    MalformedBranchSuffix { input: String },
}

impl ParseError {
    pub fn malformed_version(input: impl Into<String>) -> Self {
        ParseError::MalformedVersion {
            input: input.into(),
        }
    }

    pub fn unknown_branch_kind(input: impl Into<String>) -> Self {
        ParseError::UnknownBranchKind {
            input: input.into(),
        }
    }

    pub fn malformed_branch_suffix(input: impl Into<String>) -> Self {
        ParseError::MalformedBranchSuffix {
            input: input.into(),
        }
    }
}

/// Failures of the project version store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Config file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Key '{key}' under section [{section}] not found in {}", .path.display())]
    SectionMissing {
        path: PathBuf,
        section: String,
        key: String,
    },

    #[error("Stored version '{value}' in {} is not a semantic version", .path.display())]
    MalformedVersion {
        path: PathBuf,
        value: String,
        #[source]
        source: ParseError,
    },

    #[error("Config file is not writable: {}", .path.display())]
    WritePermission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => StoreError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => StoreError::WritePermission { path, source },
            _ => StoreError::Io { path, source },
        }
    }
}

/// Unified error type for unreal-ci operations
#[derive(Error, Debug)]
pub enum UnrealCiError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in unreal-ci
pub type Result<T> = std::result::Result<T, UnrealCiError>;

impl UnrealCiError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        UnrealCiError::Config(msg.into())
    }

    /// Create a report conversion error with context
    pub fn report(msg: impl Into<String>) -> Self {
        UnrealCiError::Report(msg.into())
    }
}
