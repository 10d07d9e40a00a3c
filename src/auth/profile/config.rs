use crate::error::ApiError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::fmt;
use std::str::FromStr;

/// Key some older files carry instead of (or next to) `api_endpoint`.
const DASHED_API_ENDPOINT_KEY: &str = "api-endpoint";

/// A named authentication record for one device or cloud account.
///
/// Serialized as one mapping of the `auth.yaml` sequence. Keys the CLI does
/// not know about are kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProfileRecord")]
pub struct Profile {
    /// Unique profile name.
    pub name: String,

    /// Provider type this profile authenticates to.
    #[serde(rename = "authentication-type")]
    pub provider_type: ProviderType,

    /// Whether this is the default profile for its provider type.
    #[serde(rename = "default")]
    pub is_default: bool,

    /// BIG-IP management host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// BIG-IP management port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Cloud Services API endpoint override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,

    /// Opaque metadata carried through verbatim.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// On-disk shape of a profile, before legacy keys are folded in.
#[derive(Deserialize)]
struct ProfileRecord {
    name: String,
    #[serde(rename = "authentication-type")]
    provider_type: ProviderType,
    #[serde(rename = "default", default)]
    is_default: bool,
    #[serde(default)]
    host: Option<String>,
    #[serde(default, deserialize_with = "deserialize_port")]
    port: Option<u16>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    api_endpoint: Option<String>,
    #[serde(flatten)]
    extra: Mapping,
}

impl From<ProfileRecord> for Profile {
    /// `api-endpoint` is only ever written by later updates, so it wins over
    /// `api_endpoint` when a record has both.
    fn from(record: ProfileRecord) -> Self {
        let mut extra = record.extra;
        let api_endpoint = match extra.remove(DASHED_API_ENDPOINT_KEY) {
            Some(serde_yaml::Value::String(endpoint)) => Some(endpoint),
            _ => record.api_endpoint,
        };
        Self {
            name: record.name,
            provider_type: record.provider_type,
            is_default: record.is_default,
            host: record.host,
            port: record.port,
            user: record.user,
            password: record.password,
            api_endpoint,
            extra,
        }
    }
}

/// Provider type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderType {
    #[serde(rename = "bigip")]
    Bigip,
    #[serde(rename = "cloud-services", alias = "cs")]
    CloudServices,
}

impl ProviderType {
    pub const ALL: [ProviderType; 2] = [ProviderType::Bigip, ProviderType::CloudServices];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Bigip => "bigip",
            ProviderType::CloudServices => "cloud-services",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bigip" => Ok(ProviderType::Bigip),
            "cloud-services" | "cs" => Ok(ProviderType::CloudServices),
            other => Err(ApiError::UnknownProviderType(other.to_string())),
        }
    }
}

impl Profile {
    pub fn new(name: impl Into<String>, provider_type: ProviderType) -> Self {
        Self {
            name: name.into(),
            provider_type,
            is_default: false,
            host: None,
            port: None,
            user: None,
            password: None,
            api_endpoint: None,
            extra: Mapping::new(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    /// Request (or decline) default status when the profile is created.
    pub fn as_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Whether a named credential field is populated.
    pub fn has_field(&self, field: &str) -> bool {
        match field {
            "host" => self.host.is_some(),
            "port" => self.port.is_some(),
            "user" => self.user.is_some(),
            "password" => self.password.is_some(),
            "api_endpoint" => self.api_endpoint.is_some(),
            other => self.extra.contains_key(other),
        }
    }

    /// Drop a credential field that does not belong to this provider's shape.
    pub(crate) fn clear_field(&mut self, field: &str) {
        match field {
            "host" => self.host = None,
            "port" => self.port = None,
            "user" => self.user = None,
            "password" => self.password = None,
            "api_endpoint" => self.api_endpoint = None,
            _ => {}
        }
    }
}

/// Ports were historically written both as integers and as strings.
fn deserialize_port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u16),
        Text(String),
    }

    match Option::<PortValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PortValue::Number(port)) => Ok(Some(port)),
        Some(PortValue::Text(text)) => text
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid port: {}", text))),
    }
}
