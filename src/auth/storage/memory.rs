use crate::auth::profile::Profile;
use crate::auth::storage::ProfileStorage;
use crate::error::ApiError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-process profile storage, used by tests and by embedders that keep
/// credentials elsewhere.
#[derive(Debug, Default)]
pub struct MemoryProfileStorage {
    profiles: Mutex<Vec<Profile>>,
    fail_writes: AtomicBool,
}

impl MemoryProfileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `save` fail with a write error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Profile> {
        self.profiles.lock().clone()
    }
}

impl ProfileStorage for MemoryProfileStorage {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn ensure_directory(&self) -> Result<(), ApiError> {
        Ok(())
    }

    fn load(&self) -> Result<Vec<Profile>, ApiError> {
        Ok(self.snapshot())
    }

    fn save(&self, profiles: &[Profile]) -> Result<(), ApiError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ApiError::BackendWrite {
                location: self.location(),
                reason: "writes disabled".to_string(),
            });
        }
        *self.profiles.lock() = profiles.to_vec();
        Ok(())
    }
}
