//! Serde helper for `Duration` fields in human-readable form.
//!
//! Use with `#[serde(with = "envconf::duration")]` so a blob can say
//! `timeout: 5s` or `"timeout": "1h30m"`, the same grammar the environment
//! coercer accepts. Values serialize back as `humantime` text (`"1h 30m"`).

use std::time::Duration;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::Serializer;

pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&humantime::format_duration(*value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let text = String::deserialize(deserializer)?;
    humantime::parse_duration(&text).map_err(de::Error::custom)
}
