//! Configuration directory resolution.

use crate::error::ApiError;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration directory.
pub const CLI_HOME_ENV: &str = "F5_CLI_HOME";

const CLI_DIR_NAME: &str = ".f5_cli";
const AUTH_FILE_NAME: &str = "auth.yaml";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Locations of the files the CLI keeps state in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliPaths {
    home: PathBuf,
}

impl CliPaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Resolve the configuration directory.
    ///
    /// Precedence: explicit override, `F5_CLI_HOME`, `~/.f5_cli`.
    pub fn resolve(home_override: Option<PathBuf>) -> Result<Self, ApiError> {
        if let Some(home) = home_override.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(Self::new(home));
        }
        if let Ok(home) = std::env::var(CLI_HOME_ENV) {
            if !home.trim().is_empty() {
                return Ok(Self::new(home));
            }
        }

        let base_dirs = directories::BaseDirs::new().ok_or_else(|| {
            ApiError::ConfigError(
                "Could not determine home directory for CLI configuration".to_string(),
            )
        })?;
        Ok(Self::new(base_dirs.home_dir().join(CLI_DIR_NAME)))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `<home>/auth.yaml`
    pub fn auth_file(&self) -> PathBuf {
        self.home.join(AUTH_FILE_NAME)
    }

    /// `<home>/config.yaml`
    pub fn config_file(&self) -> PathBuf {
        self.home.join(CONFIG_FILE_NAME)
    }
}
