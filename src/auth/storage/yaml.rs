use crate::auth::profile::Profile;
use crate::auth::storage::ProfileStorage;
use crate::config::paths::CliPaths;
use crate::error::ApiError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Profile storage backed by a single YAML file (`auth.yaml`).
///
/// Writes go to a sibling temp file with owner-only permissions and are then
/// renamed over the target, so a failed write leaves the old content intact.
#[derive(Debug, Clone)]
pub struct YamlProfileStorage {
    path: PathBuf,
}

impl YamlProfileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at `<home>/auth.yaml`.
    pub fn at_home(paths: &CliPaths) -> Self {
        Self::new(paths.auth_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "auth.yaml".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, reason: impl ToString) -> ApiError {
        ApiError::BackendWrite {
            location: self.location(),
            reason: reason.to_string(),
        }
    }

    fn write_temp(&self, temp_path: &Path, content: &str) -> std::io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(temp_path)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(content.as_bytes())?;
        file.sync_all()
    }
}

impl ProfileStorage for YamlProfileStorage {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn ensure_directory(&self) -> Result<(), ApiError> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        if dir.as_os_str().is_empty() || dir.exists() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| ApiError::BackendWrite {
            location: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!("Created configuration directory {}", dir.display());
        Ok(())
    }

    fn load(&self) -> Result<Vec<Profile>, ApiError> {
        if !self.path.is_file() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| ApiError::BackendRead {
            location: self.location(),
            reason: e.to_string(),
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let profiles: Option<Vec<Profile>> =
            serde_yaml::from_str(&content).map_err(|e| ApiError::BackendRead {
                location: self.location(),
                reason: e.to_string(),
            })?;
        Ok(profiles.unwrap_or_default())
    }

    fn save(&self, profiles: &[Profile]) -> Result<(), ApiError> {
        let content = serde_yaml::to_string(profiles).map_err(|e| self.write_error(e))?;

        self.ensure_directory()?;
        let temp_path = self.temp_path();
        if let Err(e) = self.write_temp(&temp_path, &content) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.write_error(e));
        }
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.write_error(e));
        }

        tracing::debug!(
            "Wrote {} profile(s) to {}",
            profiles.len(),
            self.path.display()
        );
        Ok(())
    }
}
