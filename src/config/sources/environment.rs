//! Environment variable source: F5_* overrides for the CLI defaults.

use crate::config::settings::{ALLOW_TELEMETRY_KEY, DISABLE_SSL_WARNINGS_KEY, OUTPUT_KEY};
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;

pub const OUTPUT_FORMAT_ENV: &str = "F5_OUTPUT_FORMAT";
pub const ALLOW_TELEMETRY_ENV: &str = "F5_ALLOW_TELEMETRY";
pub const DISABLE_SSL_WARNINGS_ENV: &str = "F5_DISABLE_SSL_WARNINGS";

/// Add environment overrides to builder.
///
/// The variable names do not follow the file keys, so each one is mapped
/// explicitly instead of through a prefix source.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_override_option(OUTPUT_KEY, env_value(OUTPUT_FORMAT_ENV))?
        .set_override_option(ALLOW_TELEMETRY_KEY, env_value(ALLOW_TELEMETRY_ENV))?
        .set_override_option(DISABLE_SSL_WARNINGS_KEY, env_value(DISABLE_SSL_WARNINGS_ENV))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
