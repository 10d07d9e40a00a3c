//! Error types for the F5 CLI.
//!
//! Every user-visible failure maps to one variant with a stable message so
//! scripts can match on known failure strings.

use thiserror::Error;

/// Errors surfaced by the auth store, the settings store and the command layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backing file exists but could not be read or parsed.
    #[error("Command failed. Unable to read {location} contents: {reason}")]
    BackendRead { location: String, reason: String },

    /// The backing file or its directory could not be written.
    #[error("Unable to write {location}: {reason}")]
    BackendWrite { location: String, reason: String },

    #[error("Create command failed. An account named {0} already exists.")]
    DuplicateName(String),

    #[error("{operation} command failed. No account named {name} exists.")]
    NotFound { operation: String, name: String },

    /// No default profile is stored for the requested provider type.
    #[error("Command failed. You must configure a default authentication for {0}!")]
    NoDefaultConfigured(String),

    #[error("Unknown authentication provider: {0} (expected one of: bigip, cloud-services)")]
    UnknownProviderType(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Settings(#[from] config::ConfigError),

    #[error("Login failed: {0}")]
    SessionError(String),

    /// The user declined a confirmation prompt.
    #[error("Aborted!")]
    Aborted,
}

impl ApiError {
    pub(crate) fn not_found(operation: &str, name: &str) -> Self {
        ApiError::NotFound {
            operation: operation.to_string(),
            name: name.to_string(),
        }
    }
}
