//! Populate a typed config record from an optional JSON/YAML blob and the
//! process environment.
//!
//! ```no_run
//! use envconf::{EnvRecord, Field};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Default)]
//! struct AppConfig {
//!     port: i64,
//!     database: String,
//! }
//!
//! impl EnvRecord for AppConfig {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("port", &mut self.port).env("PORT").default("3000"),
//!             Field::new("database", &mut self.database).env("DATABASE_URL,required"),
//!         ]
//!     }
//! }
//!
//! let blob = std::fs::read("config.yml")?;
//! let mut config = AppConfig::default();
//! envconf::parse(Some(&blob), &mut config)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Layer precedence
//!
//! ```text
//! Existing field values   whatever the record held before the call
//!        ↑ overridden by
//! Blob                    JSON, else YAML (keys the blob omits are kept)
//!        ↑ overridden by
//! Default literal         .default("...")
//!        ↑ overridden by
//! Environment variable    .env("KEY") when set and non-empty
//! ```
//!
//! A field whose environment variable is unset and which has no default is
//! left alone, so a blob-sourced value survives. An environment variable set
//! to the empty string counts as unset. A field annotated `"KEY,required"`
//! must be set in the environment; its default is never used.
//!
//! # Describing a record
//!
//! There is no reflection. A record implements [`EnvRecord`] and lists its
//! fields in declaration order with [`Field::new`] (leaf values) and
//! [`Field::nested`] (records inside records, walked recursively). The field
//! type decides how the raw string is coerced:
//!
//! | Field type | Accepted text |
//! |------------|---------------|
//! | `String` | anything |
//! | `bool` | `1 t T TRUE true True`, `0 f F FALSE false False` |
//! | `i8`..`i64`, `isize`, `u8`..`u64`, `usize` | base-10 integer in range |
//! | `f32`, `f64` | decimal float |
//! | `Duration` | `5s`, `1h30m`, `300ms`, ... |
//! | `Vec<String/i32/i64/bool/f32/f64>` | items split on `,` or [`Field::separator`] |
//!
//! Vectors of unsigned integers or durations, `Option<T>`, and maps have no
//! coercion rule. They only fail, with
//! [`UnsupportedSliceType`](EnvconfError::UnsupportedSliceType) or
//! [`UnsupportedType`](EnvconfError::UnsupportedType), once a value actually
//! resolves for them.
//!
//! # Durations in a blob
//!
//! Serde's own `Duration` format is a `{secs, nanos}` map. Annotate duration
//! fields with `#[serde(with = "envconf::duration")]` so a blob can use the
//! same text the environment accepts:
//!
//! ```
//! # use std::time::Duration;
//! # use serde::{Deserialize, Serialize};
//! #[derive(Serialize, Deserialize, Default)]
//! struct Timeouts {
//!     #[serde(with = "envconf::duration")]
//!     connect: Duration,
//! }
//! ```
//!
//! # Concurrency
//!
//! Resolution is synchronous and reads one snapshot of the environment per
//! call. Distinct records can be resolved from different threads; a single
//! record is borrowed mutably for the whole call.

pub mod coerce;
pub mod duration;
pub mod env;
pub mod error;
pub mod field;
pub mod format;
pub mod tag;

mod builder;
mod merge;
mod walk;

#[cfg(test)]
mod fixtures;

pub use builder::{Envconf, EnvconfBuilder};
pub use env::{Environment, NoEnv, ProcessEnv};
pub use error::{EnvconfError, ParseFailure};
pub use field::{EnvField, EnvRecord, Field, ListSlot, Slot, Tag};
pub use format::Format;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Populate `target` from `blob` (if given) and the process environment.
///
/// With `None`, deserialization is skipped and only environment variables and
/// defaults apply. Otherwise the blob is decoded as JSON, then YAML, before
/// the environment pass.
pub fn parse<T>(blob: Option<&[u8]>, target: &mut T) -> Result<(), EnvconfError>
where
    T: EnvRecord + Serialize + DeserializeOwned,
{
    let builder = Envconf::builder();
    match blob {
        Some(blob) => builder.blob(blob).load(target),
        None => builder.load(target),
    }
}

/// Populate `target` from the process environment and defaults only.
pub fn parse_env<T: EnvRecord>(target: &mut T) -> Result<(), EnvconfError> {
    Envconf::builder().load_env(target)
}
