//! Decode an optional serialized blob onto the target record.
//!
//! Without a forced format the blob is tried as JSON, then as YAML. Whatever
//! the format, the document is read into a YAML value tree, deep-merged over
//! the target's current serialized state and deserialized back, so keys the
//! blob does not mention keep their values. YAML values keep non-finite
//! floats intact, which a JSON tree would turn into `null`. The target is
//! only replaced once a format fully succeeds.

use std::any::type_name;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::EnvconfError;
use crate::merge::deep_merge;

/// Serialization format of a config blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    /// Only used when requested explicitly; never sniffed.
    Toml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
            Format::Toml => "TOML",
        })
    }
}

/// Decode `blob` into `target`, returning the format that matched.
pub fn decode_into<T>(
    blob: &[u8],
    target: &mut T,
    forced: Option<Format>,
) -> Result<Format, EnvconfError>
where
    T: Serialize + DeserializeOwned,
{
    let base = current_state(target)?;

    if let Some(format) = forced {
        apply(format, blob, base, target)
            .map_err(|reason| EnvconfError::Decode { format, reason })?;
        debug!(%format, "decoded config blob");
        return Ok(format);
    }

    let json = match apply(Format::Json, blob, base.clone(), target) {
        Ok(()) => {
            debug!(format = %Format::Json, "decoded config blob");
            return Ok(Format::Json);
        }
        Err(reason) => reason,
    };
    let yaml = match apply(Format::Yaml, blob, base, target) {
        Ok(()) => {
            debug!(format = %Format::Yaml, "decoded config blob");
            return Ok(Format::Yaml);
        }
        Err(reason) => reason,
    };
    Err(EnvconfError::UnsupportedFormat { json, yaml })
}

fn current_state<T: Serialize>(target: &T) -> Result<Mapping, EnvconfError> {
    match serde_yaml::to_value(target) {
        Ok(Value::Mapping(map)) => Ok(map),
        _ => Err(EnvconfError::NotARecord {
            type_name: type_name::<T>(),
        }),
    }
}

fn apply<T: DeserializeOwned>(
    format: Format,
    blob: &[u8],
    base: Mapping,
    target: &mut T,
) -> Result<(), String> {
    let overlay = decode(format, blob)?;
    let merged = deep_merge(base, overlay);
    *target = serde_yaml::from_value(Value::Mapping(merged)).map_err(|e| e.to_string())?;
    Ok(())
}

/// Decode `blob` into a top-level mapping. An empty/null document is an
/// empty mapping; any other non-mapping document is an error.
fn decode(format: Format, blob: &[u8]) -> Result<Mapping, String> {
    let value: Value = match format {
        Format::Json => serde_json::from_slice(blob).map_err(|e| e.to_string())?,
        Format::Yaml => serde_yaml::from_slice(blob).map_err(|e| e.to_string())?,
        Format::Toml => {
            let text = std::str::from_utf8(blob).map_err(|e| e.to_string())?;
            toml::from_str(text).map_err(|e| e.to_string())?
        }
    };
    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        other => Err(format!(
            "expected a mapping at the top level, found {}",
            value_kind(&other)
        )),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
