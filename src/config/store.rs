//! Settings store: the small key-value `config.yaml` next to `auth.yaml`.

use crate::config::paths::CliPaths;
use crate::config::settings::{CliSettings, RawSettings};
use crate::config::sources::environment;
use crate::error::ApiError;
use config::{Config, File, FileFormat};
use serde_yaml::Mapping;
use std::fs;
use std::path::{Path, PathBuf};

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn at_home(paths: &CliPaths) -> Self {
        Self::new(paths.config_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents; empty when the file does not exist.
    pub fn list(&self) -> Result<Mapping, ApiError> {
        let Some(content) = self.read()? else {
            return Ok(Mapping::new());
        };
        let mapping: Option<Mapping> =
            serde_yaml::from_str(&content).map_err(|e| ApiError::BackendRead {
                location: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(mapping.unwrap_or_default())
    }

    /// Merge `updates` into the stored mapping and write it back.
    pub fn create_or_update(&self, updates: Mapping) -> Result<Mapping, ApiError> {
        let mut current = self.list()?;
        for (key, value) in updates {
            current.insert(key, value);
        }

        let write_error = |e: &dyn std::fmt::Display| ApiError::BackendWrite {
            location: self.path.display().to_string(),
            reason: e.to_string(),
        };
        let content = serde_yaml::to_string(&current).map_err(|e| write_error(&e))?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| write_error(&e))?;
        }
        fs::write(&self.path, content).map_err(|e| write_error(&e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|e| write_error(&e))?;
        }

        tracing::debug!("Updated CLI defaults in {}", self.path.display());
        Ok(current)
    }

    /// Layer the file and the environment into effective settings.
    ///
    /// Precedence: environment (highest), config file, built-in defaults.
    pub fn resolve(&self) -> Result<CliSettings, ApiError> {
        let mut builder = Config::builder();
        if let Some(content) = self.read()? {
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        let builder = environment::add_to_builder(builder)?;

        let raw: RawSettings = builder.build()?.try_deserialize()?;
        CliSettings::from_raw(raw)
    }

    fn read(&self) -> Result<Option<String>, ApiError> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| ApiError::BackendRead {
            location: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }
}
