//! Resolved CLI defaults.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const OUTPUT_KEY: &str = "output";
pub const ALLOW_TELEMETRY_KEY: &str = "allowTelemetry";
pub const DISABLE_SSL_WARNINGS_KEY: &str = "disableSSLWarnings";

/// Output data format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            other => Err(ApiError::ConfigError(format!(
                "Unsupported format {} (must be 'json' or 'table')",
                other
            ))),
        }
    }
}

/// Settings as they come out of the layered config sources.
///
/// Key case may be folded by the loader, hence the lowercase aliases.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSettings {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(rename = "allowTelemetry", alias = "allowtelemetry", default)]
    pub allow_telemetry: Option<bool>,
    #[serde(rename = "disableSSLWarnings", alias = "disablesslwarnings", default)]
    pub disable_ssl_warnings: Option<bool>,
}

/// CLI defaults after file and environment layering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliSettings {
    pub output: OutputFormat,
    pub allow_telemetry: bool,
    pub disable_ssl_warnings: bool,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            output: OutputFormat::Json,
            allow_telemetry: true,
            disable_ssl_warnings: false,
        }
    }
}

impl CliSettings {
    pub(crate) fn from_raw(raw: RawSettings) -> Result<Self, ApiError> {
        let output = match raw.output.as_deref() {
            Some(value) if !value.trim().is_empty() => {
                value.parse().unwrap_or_else(|e: ApiError| {
                    tracing::warn!("{}; falling back to {}", e, OutputFormat::default());
                    OutputFormat::default()
                })
            }
            _ => OutputFormat::default(),
        };
        Ok(Self {
            output,
            allow_telemetry: raw.allow_telemetry.unwrap_or(true),
            disable_ssl_warnings: raw.disable_ssl_warnings.unwrap_or(false),
        })
    }
}
