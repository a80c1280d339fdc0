use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::coerce::ScalarKind;
use crate::format::Format;

#[derive(Debug, Error)]
pub enum EnvconfError {
    #[error("Expected a structured record, got {type_name}")]
    NotARecord { type_name: &'static str },

    #[error("Unsupported config format (not JSON: {json}; not YAML: {yaml})")]
    UnsupportedFormat { json: String, yaml: String },

    #[error("Failed to decode {format} config: {reason}")]
    Decode { format: Format, reason: String },

    #[error("Required environment variable {key} is not set")]
    RequiredMissing { key: String },

    #[error("Env option '{option}' is not supported")]
    UnsupportedOption { option: String },

    #[error("Invalid value '{value}' for '{field}': expected {kind}: {source}")]
    TypeMismatch {
        field: String,
        value: String,
        kind: ScalarKind,
        #[source]
        source: ParseFailure,
    },

    #[error("Type {type_name} of '{field}' is not supported")]
    UnsupportedType {
        field: String,
        type_name: &'static str,
    },

    #[error("Slice type {type_name} of '{field}' is not supported")]
    UnsupportedSliceType {
        field: String,
        type_name: &'static str,
    },
}

/// Why a raw string could not be turned into a scalar.
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error("not a boolean literal")]
    Bool,

    #[error(transparent)]
    Duration(#[from] humantime::DurationError),
}
