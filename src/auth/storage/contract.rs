use crate::auth::profile::Profile;
use crate::error::ApiError;

/// Backend persisting the whole profile collection.
///
/// Implementations are pure I/O; every rule about names and defaults lives in
/// the repository.
pub trait ProfileStorage: Send + Sync {
    /// Human readable location used in error messages.
    fn location(&self) -> String;
    /// Create the backing directory if it is missing. Idempotent.
    fn ensure_directory(&self) -> Result<(), ApiError>;
    /// Read the collection; a missing backend yields an empty collection.
    fn load(&self) -> Result<Vec<Profile>, ApiError>;
    /// Replace the stored collection.
    fn save(&self, profiles: &[Profile]) -> Result<(), ApiError>;
}
