// Loading parts from files and `key=value` assignments

use std::{fs, path::Path};

use bparser::{Parts, Value};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Read a parts map from a JSON, YAML or TOML file, picked by extension
///
/// Files without a known extension are read as JSON.
pub fn load_parts(path: &Path) -> CliResult<Parts> {
    let content = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let data_error = |message: String| CliError::Data {
        path: path.to_path_buf(),
        message,
    };

    let value: Value = match extension.as_deref() {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|e| data_error(e.to_string()))?
        }
        Some("toml") => toml::from_str(&content).map_err(|e| data_error(e.to_string()))?,
        _ => serde_json::from_str(&content).map_err(|e| data_error(e.to_string()))?,
    };

    let parts = match value {
        Value::Object(map) => map.into_iter().collect::<Parts>(),
        Value::Null => Parts::new(),
        other => {
            return Err(data_error(format!(
                "expected a map at the top level, found {}",
                kind(&other)
            )))
        }
    };

    debug!(path = %path.display(), parts = parts.len(), "Loaded parts");
    Ok(parts)
}

/// Split a `key=value` assignment; the value is always a string
pub fn parse_assignment(assignment: &str) -> CliResult<(String, Value)> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), Value::String(value.to_string())))
        }
        _ => Err(CliError::InvalidArgument {
            message: format!("expected KEY=VALUE, got '{}'", assignment),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a map",
    }
}
