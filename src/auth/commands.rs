//! Command-side services for `auth` and `login`: turn adapter input into
//! profiles and partial updates, then call the repository.

use crate::auth::profile::{Profile, ProfileUpdate, ProviderType};
use crate::auth::registry;
use crate::auth::repository::AuthRepository;
use crate::auth::storage::ProfileStorage;
use crate::error::ApiError;

/// Profile name `login` stores BIG-IP credentials under.
pub const BIGIP_LOGIN_PROFILE: &str = "login_bigip";
/// Profile name `login` stores Cloud Services credentials under.
pub const CLOUD_SERVICES_LOGIN_PROFILE: &str = "login_cloud_services";

/// Input collected by `auth create`.
#[derive(Debug, Clone, Default)]
pub struct CreateAuthRequest {
    pub provider_type: String,
    pub name: String,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub api_endpoint: Option<String>,
    pub set_default: bool,
}

/// Input collected by `auth update`.
#[derive(Debug, Clone, Default)]
pub struct UpdateAuthRequest {
    pub name: String,
    pub provider_type: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub api_endpoint: Option<String>,
    pub set_default: bool,
}

pub struct AuthCommandService;

impl AuthCommandService {
    pub fn parse_provider_type(type_str: &str) -> Result<ProviderType, ApiError> {
        registry::shape_of(type_str).map(|spec| spec.provider_type)
    }

    /// Build a validated candidate profile for `create`.
    ///
    /// Fields the provider type does not use are dropped with a warning.
    pub fn build_profile(request: &CreateAuthRequest) -> Result<Profile, ApiError> {
        let spec = registry::shape_of(&request.provider_type)?;
        let mut profile = Profile::new(request.name.trim(), spec.provider_type);
        profile.host = request.host.clone();
        profile.port = request.port;
        profile.user = request.user.clone();
        profile.password = request.password.clone();
        profile.api_endpoint = request.api_endpoint.clone();
        profile.is_default = request.set_default;

        spec.strip_foreign_fields(&mut profile);
        spec.apply_defaults(&mut profile);
        spec.validate(&profile)?;
        Ok(profile)
    }

    /// Build the partial update for `update`; only supplied fields are carried.
    pub fn build_update(request: &UpdateAuthRequest) -> Result<ProfileUpdate, ApiError> {
        let provider_type = request
            .provider_type
            .as_deref()
            .map(Self::parse_provider_type)
            .transpose()?;

        Ok(ProfileUpdate {
            name: request.name.trim().to_string(),
            provider_type,
            is_default: request.set_default.then_some(true),
            host: request.host.clone(),
            port: request.port,
            user: request.user.clone(),
            password: request.password.clone(),
            api_endpoint: request.api_endpoint.clone(),
            ..Default::default()
        })
    }

    pub fn run_create<S: ProfileStorage>(
        repository: &AuthRepository<S>,
        request: &CreateAuthRequest,
    ) -> Result<Profile, ApiError> {
        let profile = Self::build_profile(request)?;
        repository.create(profile.clone())?;
        Ok(profile)
    }

    pub fn run_update<S: ProfileStorage>(
        repository: &AuthRepository<S>,
        request: &UpdateAuthRequest,
    ) -> Result<(), ApiError> {
        let update = Self::build_update(request)?;
        if update.is_empty() {
            tracing::info!(profile = %update.name, "Update carries no changes");
        }
        repository.update(update)
    }

    pub fn run_default<S: ProfileStorage>(
        repository: &AuthRepository<S>,
        provider_type: &str,
    ) -> Result<Profile, ApiError> {
        let provider_type = Self::parse_provider_type(provider_type)?;
        repository.read_default(provider_type)
    }

    /// Profile `login` stores: fixed name per provider type, always default.
    pub fn login_profile(
        provider_type: ProviderType,
        host: Option<String>,
        port: Option<u16>,
        api_endpoint: Option<String>,
        user: String,
        password: String,
    ) -> Result<Profile, ApiError> {
        let name = match provider_type {
            ProviderType::Bigip => BIGIP_LOGIN_PROFILE,
            ProviderType::CloudServices => CLOUD_SERVICES_LOGIN_PROFILE,
        };
        let spec = registry::spec_for(provider_type);
        let mut profile = Profile::new(name, provider_type)
            .with_credentials(user, password)
            .as_default(true);
        profile.host = host;
        profile.port = port;
        profile.api_endpoint = api_endpoint;

        spec.strip_foreign_fields(&mut profile);
        spec.apply_defaults(&mut profile);
        spec.validate(&profile)?;
        Ok(profile)
    }

    /// Create the login profile, or overwrite it when it already exists.
    pub fn store_login<S: ProfileStorage>(
        repository: &AuthRepository<S>,
        profile: Profile,
    ) -> Result<(), ApiError> {
        let update = ProfileUpdate::from_profile(&profile);
        match repository.create(profile) {
            Err(ApiError::DuplicateName(_)) => repository.update(update),
            other => other,
        }
    }
}
