//! Command output rendering (JSON or table).

use crate::auth::profile::Profile;
use crate::config::settings::OutputFormat;
use crate::error::ApiError;
use comfy_table::{presets, Table};
use serde_json::{json, Value};
use std::collections::BTreeSet;

const MASK: &str = "********";

/// Wrap a plain text message the way every command reports it.
pub fn message(text: impl Into<String>) -> Value {
    json!({ "message": text.into() })
}

/// Render `data` in the configured format.
///
/// JSON output is pretty-printed with sorted keys. Table output shows the
/// string-valued keys common to every row.
pub fn format_output(data: &Value, format: OutputFormat) -> Result<String, ApiError> {
    let data = match data {
        Value::Object(_) | Value::Array(_) => data.clone(),
        other => json!({ "message": other }),
    };

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&data)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render output: {}", e))),
        OutputFormat::Table => Ok(format_table(&data)),
    }
}

fn format_table(data: &Value) -> String {
    let rows: Vec<&serde_json::Map<String, Value>> = match data {
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        Value::Object(map) => vec![map],
        _ => Vec::new(),
    };
    let Some(first) = rows.first() else {
        return String::new();
    };

    let mut columns: BTreeSet<&str> = first
        .iter()
        .filter(|(_, value)| value.is_string())
        .map(|(key, _)| key.as_str())
        .collect();
    for row in rows.iter().skip(1) {
        columns.retain(|key| row.contains_key(*key));
    }

    let mut table = Table::new();
    table.load_preset(presets::ASCII_MARKDOWN);
    table.set_header(columns.iter().copied());
    for row in &rows {
        table.add_row(columns.iter().map(|key| match row.get(*key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }));
    }
    table.to_string()
}

/// JSON view of a profile; the password is masked unless `show_secrets`.
pub fn profile_view(profile: &Profile, show_secrets: bool) -> Result<Value, ApiError> {
    let mut value = serde_json::to_value(profile)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render profile: {}", e)))?;
    if !show_secrets {
        if let Some(password) = value.get_mut("password") {
            *password = Value::String(MASK.to_string());
        }
    }
    Ok(value)
}

pub fn profiles_view(profiles: &[Profile], show_secrets: bool) -> Result<Value, ApiError> {
    profiles
        .iter()
        .map(|p| profile_view(p, show_secrets))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}
