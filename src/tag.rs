//! Pick the raw string value for one leaf field.
//!
//! The env annotation is `KEY` optionally followed by comma-separated
//! options. Environment wins over the default literal; `required` ignores the
//! default and insists on a non-empty environment value. An empty result
//! means "nothing to apply" and the walker leaves the field as it is.

use tracing::trace;

use crate::env::Environment;
use crate::error::EnvconfError;
use crate::field::Tag;

const OPTION_SEPARATOR: char = ',';
const REQUIRED: &str = "required";

/// Split an env annotation into its key and option tokens.
pub fn split_annotation(annotation: &str) -> (&str, Vec<&str>) {
    let mut parts = annotation.split(OPTION_SEPARATOR);
    let key = parts.next().unwrap_or_default();
    (key, parts.collect())
}

/// Resolve the winning raw value for a field, possibly empty.
pub fn resolve(field: &str, tag: &Tag, env: &dyn Environment) -> Result<String, EnvconfError> {
    let (key, opts) = split_annotation(tag.env);

    let mut value = match lookup(env, key) {
        Some(v) => {
            trace!(field, key, "value from environment");
            v
        }
        None => {
            if !tag.default.is_empty() {
                trace!(field, key, "value from default");
            }
            tag.default.to_string()
        }
    };

    for opt in opts {
        match opt {
            "" => {}
            REQUIRED => {
                value = lookup(env, key).ok_or_else(|| EnvconfError::RequiredMissing {
                    key: key.to_string(),
                })?;
            }
            other => {
                return Err(EnvconfError::UnsupportedOption {
                    option: other.to_string(),
                });
            }
        }
    }

    Ok(value)
}

fn lookup(env: &dyn Environment, key: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }
    env.var(key).filter(|v| !v.is_empty())
}
