use crate::error::{Result, UnrealCiError};
use crate::store::IniKey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "unreal-ci.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".unreal-ci.toml";

/// Represents the complete configuration for unreal-ci.
///
/// Every field has a default so an absent or partial file still yields a usable config.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub project_version: ProjectVersionConfig,

    #[serde(default)]
    pub reports: ReportsConfig,

    #[serde(default)]
    pub clean: CleanConfig,
}

fn default_ini_path() -> PathBuf {
    PathBuf::from("./Config/DefaultGame.ini")
}

fn default_section() -> String {
    IniKey::default().section
}

fn default_key() -> String {
    IniKey::default().key
}

/// Where the project version is stored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectVersionConfig {
    /// Ini file used when `--iniPath` is not given
    #[serde(default = "default_ini_path")]
    pub ini_path: PathBuf,

    #[serde(default = "default_section")]
    pub section: String,

    #[serde(default = "default_key")]
    pub key: String,
}

impl ProjectVersionConfig {
    pub fn ini_key(&self) -> IniKey {
        IniKey::new(self.section.clone(), self.key.clone())
    }
}

impl Default for ProjectVersionConfig {
    fn default() -> Self {
        ProjectVersionConfig {
            ini_path: default_ini_path(),
            section: default_section(),
            key: default_key(),
        }
    }
}

fn default_test_suite_name() -> String {
    "Unreal Automation Testing JUnit Report".to_string()
}

/// Settings for report conversion.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReportsConfig {
    #[serde(default = "default_test_suite_name")]
    pub test_suite_name: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        ReportsConfig {
            test_suite_name: default_test_suite_name(),
        }
    }
}

fn default_dist_directory() -> PathBuf {
    PathBuf::from("dist")
}

/// Settings for build artifact cleanup.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CleanConfig {
    #[serde(default = "default_dist_directory")]
    pub dist_directory: PathBuf,
}

impl Default for CleanConfig {
    fn default() -> Self {
        CleanConfig {
            dist_directory: default_dist_directory(),
        }
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| UnrealCiError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `unreal-ci.toml` in current directory
/// 3. `.unreal-ci.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or if `config_path` is missing
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            user_path
        } else {
            tracing::debug!("no config file found, using defaults");
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let text = fs::read_to_string(&path).map_err(|e| {
        UnrealCiError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config = parse_config(&text).map_err(|e| match e {
        UnrealCiError::Config(message) => {
            UnrealCiError::config(format!("{}: {}", path.display(), message))
        }
        other => other,
    })?;

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
