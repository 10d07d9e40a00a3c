//! Credential verification against BIG-IP devices and Cloud Services.
//!
//! `login` opens a session with the supplied credentials before storing them.
//! The verifier is a trait so the command layer can be exercised without a
//! device on the other end.

use crate::auth::profile::{Profile, ProviderType};
use crate::auth::registry::DEFAULT_BIGIP_PORT;
use crate::error::ApiError;
use async_trait::async_trait;
use owo_colors::OwoColorize;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_CLOUD_SERVICES_ENDPOINT: &str = "https://api.cloudservices.f5.com";
pub const BIGIP_LOGIN_PATH: &str = "/mgmt/shared/authn/login";
pub const CLOUD_SERVICES_LOGIN_PATH: &str = "/v1/svc-auth/login";
pub const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("f5cli/", env!("CARGO_PKG_VERSION"));

#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Open a session with the profile's credentials; `Ok` means they work.
    async fn verify(&self, profile: &Profile) -> Result<(), ApiError>;
}

/// Verifier that performs the vendor login call over HTTPS.
pub struct HttpSessionVerifier {
    timeout: Duration,
    warn_insecure: bool,
}

impl HttpSessionVerifier {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            warn_insecure: true,
        }
    }

    /// Whether to warn that BIG-IP certificates are not verified.
    pub fn with_ssl_warnings(mut self, enabled: bool) -> Self {
        self.warn_insecure = enabled;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Login URL for the profile's provider type.
    pub fn login_url(profile: &Profile) -> Result<String, ApiError> {
        match profile.provider_type {
            ProviderType::Bigip => {
                let host = profile.host.as_deref().ok_or_else(|| {
                    ApiError::InvalidProfile("bigip profiles require: host".to_string())
                })?;
                let port = profile.port.unwrap_or(DEFAULT_BIGIP_PORT);
                Ok(format!("https://{}:{}{}", host, port, BIGIP_LOGIN_PATH))
            }
            ProviderType::CloudServices => {
                let endpoint = profile
                    .api_endpoint
                    .as_deref()
                    .unwrap_or(DEFAULT_CLOUD_SERVICES_ENDPOINT)
                    .trim_end_matches('/');
                let endpoint = if endpoint.starts_with("http://") || endpoint.starts_with("https://")
                {
                    endpoint.to_string()
                } else {
                    format!("https://{}", endpoint)
                };
                Ok(format!("{}{}", endpoint, CLOUD_SERVICES_LOGIN_PATH))
            }
        }
    }

    pub fn login_body(profile: &Profile) -> Result<Value, ApiError> {
        let (Some(user), Some(password)) = (profile.user.as_deref(), profile.password.as_deref())
        else {
            return Err(ApiError::InvalidProfile(
                "login requires both user and password".to_string(),
            ));
        };
        Ok(match profile.provider_type {
            ProviderType::Bigip => json!({
                "username": user,
                "password": password,
                "loginProviderName": "tmos",
            }),
            ProviderType::CloudServices => json!({
                "username": user,
                "password": password,
            }),
        })
    }
}

impl Default for HttpSessionVerifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_LOGIN_TIMEOUT_SECS))
    }
}

#[async_trait]
impl SessionVerifier for HttpSessionVerifier {
    async fn verify(&self, profile: &Profile) -> Result<(), ApiError> {
        let url = Self::login_url(profile)?;
        let body = Self::login_body(profile)?;

        // BIG-IP management interfaces ship self-signed certificates.
        let insecure = profile.provider_type == ProviderType::Bigip;
        if insecure && self.warn_insecure {
            eprintln!(
                "{} certificate verification is disabled for {}",
                "Warning:".yellow(),
                url
            );
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|e| ApiError::SessionError(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(url = %url, "Verifying credentials");
        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::SessionError(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::SessionError(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }
        Ok(())
    }
}

/// Run a verifier to completion from synchronous command code.
pub fn verify_blocking(
    verifier: &dyn SessionVerifier,
    profile: &Profile,
    timeout: Duration,
) -> Result<(), ApiError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ApiError::SessionError(format!("Failed to create runtime: {}", e)))?;
    rt.block_on(async {
        tokio::time::timeout(timeout, verifier.verify(profile))
            .await
            .map_err(|_| {
                ApiError::SessionError(format!("timed out after {}s", timeout.as_secs()))
            })?
    })
}
