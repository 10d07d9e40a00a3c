use super::config::{Profile, ProviderType};
use serde_yaml::Mapping;

/// Partial update of an existing profile, located by `name`.
///
/// Only populated fields are merged; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub provider_type: Option<ProviderType>,
    pub is_default: Option<bool>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub api_endpoint: Option<String>,
    /// Extra metadata keys to set, merged key by key.
    pub extra: Mapping,
}

impl ProfileUpdate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Update that overwrites every field of `profile` onto the stored record.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            provider_type: Some(profile.provider_type),
            is_default: Some(profile.is_default),
            host: profile.host.clone(),
            port: profile.port,
            user: profile.user.clone(),
            password: profile.password.clone(),
            api_endpoint: profile.api_endpoint.clone(),
            extra: profile.extra.clone(),
        }
    }

    pub fn set_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    pub fn provider_type(mut self, provider_type: ProviderType) -> Self {
        self.provider_type = Some(provider_type);
        self
    }

    /// True when the update carries nothing to merge.
    pub fn is_empty(&self) -> bool {
        self.provider_type.is_none()
            && self.is_default.is_none()
            && self.host.is_none()
            && self.port.is_none()
            && self.user.is_none()
            && self.password.is_none()
            && self.api_endpoint.is_none()
            && self.extra.is_empty()
    }

    /// Merge the populated fields onto `profile`.
    ///
    /// Default status is not touched here; the repository owns promotion.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(provider_type) = self.provider_type {
            profile.provider_type = provider_type;
        }
        if let Some(host) = &self.host {
            profile.host = Some(host.clone());
        }
        if let Some(port) = self.port {
            profile.port = Some(port);
        }
        if let Some(user) = &self.user {
            profile.user = Some(user.clone());
        }
        if let Some(password) = &self.password {
            profile.password = Some(password.clone());
        }
        if let Some(endpoint) = &self.api_endpoint {
            profile.api_endpoint = Some(endpoint.clone());
        }
        for (key, value) in &self.extra {
            profile.extra.insert(key.clone(), value.clone());
        }
    }
}
