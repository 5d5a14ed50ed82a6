pub mod clean;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod policy;
pub mod report;
pub mod store;
pub mod ui;

pub use error::{ParseError, Result, StoreError, UnrealCiError};
