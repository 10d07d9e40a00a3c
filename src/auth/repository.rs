//! Auth profile repository: invariant-preserving operations over a profile store.
//!
//! Every operation loads the full collection, mutates a private copy and
//! persists it once. Nothing is written when an operation fails.
//!
//! Invariants after any successful mutation:
//! - profile names are unique across all provider types;
//! - at most one profile per provider type is the default;
//! - a provider type with at least one profile keeps a default, except when
//!   the file was edited by hand to have none.

use crate::auth::profile::{Profile, ProfileUpdate, ProviderType};
use crate::auth::registry;
use crate::auth::storage::ProfileStorage;
use crate::error::ApiError;
use tracing::{info, warn};

pub struct AuthRepository<S: ProfileStorage> {
    storage: S,
}

impl<S: ProfileStorage> AuthRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Add a new profile.
    ///
    /// The profile becomes the default of its type when it asks to be, or
    /// when no default of that type exists yet.
    pub fn create(&self, profile: Profile) -> Result<(), ApiError> {
        if profile.name.trim().is_empty() {
            return Err(ApiError::InvalidProfile(
                "Profile name cannot be empty".to_string(),
            ));
        }

        self.storage.ensure_directory()?;
        let mut profiles = self.storage.load()?;
        if position(&profiles, &profile.name).is_some() {
            return Err(ApiError::DuplicateName(profile.name));
        }

        let name = profile.name.clone();
        let provider_type = profile.provider_type;
        let requested_default = profile.is_default;
        let has_default = find_default(&profiles, provider_type).is_some();

        profiles.push(Profile {
            is_default: false,
            ..profile
        });
        if requested_default || !has_default {
            promote(&mut profiles, &name);
        }

        self.storage.save(&profiles)?;
        info!(profile = %name, provider_type = %provider_type, "Created authentication profile");
        Ok(())
    }

    /// Merge the populated fields of `partial` onto the stored profile.
    pub fn update(&self, partial: ProfileUpdate) -> Result<(), ApiError> {
        let mut profiles = self.storage.load()?;
        let index = position(&profiles, &partial.name)
            .ok_or_else(|| ApiError::not_found("Update", &partial.name))?;

        let previous_type = profiles[index].provider_type;
        let was_default = profiles[index].is_default;
        partial.apply_to(&mut profiles[index]);
        let current_type = profiles[index].provider_type;

        if current_type != previous_type {
            // Leaving the old type behaves like a delete there and a create here.
            registry::spec_for(current_type).strip_foreign_fields(&mut profiles[index]);
            profiles[index].is_default = false;
            if was_default {
                promote_first(&mut profiles, previous_type);
            }
            if find_default(&profiles, current_type).is_none() {
                profiles[index].is_default = true;
            }
        }

        match partial.is_default {
            Some(true) => promote(&mut profiles, &partial.name),
            Some(false) if profiles[index].is_default => {
                let successor = profiles
                    .iter()
                    .find(|p| p.provider_type == current_type && p.name != partial.name)
                    .map(|p| p.name.clone());
                match successor {
                    Some(successor) => promote(&mut profiles, &successor),
                    None => info!(
                        profile = %partial.name,
                        "Profile stays default: no other {} profile exists", current_type
                    ),
                }
            }
            _ => {}
        }

        self.storage.save(&profiles)?;
        info!(profile = %partial.name, "Updated authentication profile");
        Ok(())
    }

    /// Remove a profile, promoting the next profile of the same type when the
    /// removed one was the default.
    pub fn delete(&self, name: &str) -> Result<Profile, ApiError> {
        let mut profiles = self.storage.load()?;
        let index = position(&profiles, name).ok_or_else(|| ApiError::not_found("Delete", name))?;

        let removed = profiles.remove(index);
        if removed.is_default {
            promote_first(&mut profiles, removed.provider_type);
        }

        self.storage.save(&profiles)?;
        info!(profile = %name, "Deleted authentication profile");
        Ok(removed)
    }

    /// The default profile for `provider_type`.
    pub fn read_default(&self, provider_type: ProviderType) -> Result<Profile, ApiError> {
        let profiles = match self.storage.load() {
            Ok(profiles) => profiles,
            Err(e) => {
                warn!("Unable to read authentication profiles: {}", e);
                return Err(ApiError::NoDefaultConfigured(provider_type.to_string()));
            }
        };

        profiles
            .into_iter()
            .find(|p| p.provider_type == provider_type && p.is_default)
            .ok_or_else(|| ApiError::NoDefaultConfigured(provider_type.to_string()))
    }

    /// Every stored profile, secrets included.
    pub fn list_all(&self) -> Result<Vec<Profile>, ApiError> {
        self.storage.load()
    }

    pub fn get(&self, name: &str) -> Result<Profile, ApiError> {
        self.storage
            .load()?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ApiError::not_found("Show", name))
    }
}

fn position(profiles: &[Profile], name: &str) -> Option<usize> {
    profiles.iter().position(|p| p.name == name)
}

fn find_default(profiles: &[Profile], provider_type: ProviderType) -> Option<&Profile> {
    profiles
        .iter()
        .find(|p| p.provider_type == provider_type && p.is_default)
}

/// Make `name` the default of its type and demote every other profile of that type.
fn promote(profiles: &mut [Profile], name: &str) {
    let Some(provider_type) = profiles
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.provider_type)
    else {
        return;
    };

    for profile in profiles.iter_mut() {
        if profile.provider_type == provider_type {
            profile.is_default = profile.name == name;
        }
    }
}

/// Promote the first profile of `provider_type` in collection order, if any.
fn promote_first(profiles: &mut [Profile], provider_type: ProviderType) {
    let first = profiles
        .iter()
        .find(|p| p.provider_type == provider_type)
        .map(|p| p.name.clone());
    if let Some(name) = first {
        promote(profiles, &name);
    }
}
