//! Provider-type registry: the field shape each provider type expects.

use crate::auth::profile::{Profile, ProviderType};
use crate::error::ApiError;

pub const DEFAULT_BIGIP_PORT: u16 = 443;

/// Fields a provider type requires and accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub provider_type: ProviderType,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub default_port: Option<u16>,
}

static BIGIP: FieldSpec = FieldSpec {
    provider_type: ProviderType::Bigip,
    required: &["host"],
    optional: &["port", "user", "password"],
    default_port: Some(DEFAULT_BIGIP_PORT),
};

static CLOUD_SERVICES: FieldSpec = FieldSpec {
    provider_type: ProviderType::CloudServices,
    required: &[],
    optional: &["user", "password", "api_endpoint"],
    default_port: None,
};

const CREDENTIAL_FIELDS: [&str; 5] = ["host", "port", "user", "password", "api_endpoint"];

/// Look up the field shape for a provider type name.
pub fn shape_of(provider_type: &str) -> Result<&'static FieldSpec, ApiError> {
    let provider_type: ProviderType = provider_type.parse()?;
    Ok(spec_for(provider_type))
}

pub fn spec_for(provider_type: ProviderType) -> &'static FieldSpec {
    match provider_type {
        ProviderType::Bigip => &BIGIP,
        ProviderType::CloudServices => &CLOUD_SERVICES,
    }
}

impl FieldSpec {
    pub fn accepts(&self, field: &str) -> bool {
        self.required.contains(&field) || self.optional.contains(&field)
    }

    pub fn missing_fields(&self, profile: &Profile) -> Vec<&'static str> {
        self.required
            .iter()
            .copied()
            .filter(|field| !profile.has_field(field))
            .collect()
    }

    /// Fill defaults (the BIG-IP port) that the caller left empty.
    pub fn apply_defaults(&self, profile: &mut Profile) {
        if profile.port.is_none() {
            profile.port = self.default_port;
        }
    }

    /// Credential fields set on `profile` that this provider does not use.
    pub fn foreign_fields(&self, profile: &Profile) -> Vec<&'static str> {
        CREDENTIAL_FIELDS
            .iter()
            .copied()
            .filter(|field| profile.has_field(field) && !self.accepts(field))
            .collect()
    }

    /// Clear the fields `foreign_fields` reports, warning for each one.
    pub fn strip_foreign_fields(&self, profile: &mut Profile) -> Vec<&'static str> {
        let foreign = self.foreign_fields(profile);
        for field in &foreign {
            tracing::warn!(
                "Ignoring {} for {} profile {}",
                field,
                self.provider_type,
                profile.name
            );
            profile.clear_field(field);
        }
        foreign
    }

    /// Validate a candidate profile against this shape.
    pub fn validate(&self, profile: &Profile) -> Result<(), ApiError> {
        let missing = self.missing_fields(profile);
        if !missing.is_empty() {
            return Err(ApiError::InvalidProfile(format!(
                "{} profiles require: {}",
                self.provider_type,
                missing.join(", ")
            )));
        }
        Ok(())
    }
}
