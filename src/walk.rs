//! Depth-first traversal of a record's field descriptors.
//!
//! Nested records are always entered. Leaf fields get their raw value from
//! [`tag::resolve`]; an empty value leaves the field untouched so whatever a
//! decoded blob already wrote survives. The first error aborts the walk.

use tracing::{debug, trace};

use crate::coerce;
use crate::env::Environment;
use crate::error::EnvconfError;
use crate::field::{EnvRecord, Target};
use crate::tag;

pub fn walk(record: &mut dyn EnvRecord, env: &dyn Environment) -> Result<(), EnvconfError> {
    for field in record.fields() {
        match field.target {
            Target::Nested(inner) => {
                debug!(field = field.name, "entering nested record");
                walk(inner, env)?;
            }
            Target::Leaf(slot) => {
                let raw = tag::resolve(field.name, &field.tag, env)?;
                if raw.is_empty() {
                    trace!(field = field.name, "no value resolved, leaving untouched");
                    continue;
                }
                coerce::assign(slot, &raw, Some(field.tag.separator), field.name)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Internal, TestConfig};
    use std::collections::HashMap;
    use std::time::Duration;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_only() {
        let mut config = TestConfig::default();
        walk(&mut config, &env(&[])).unwrap();
        assert_eq!(config.port, -1);
        assert_eq!(config.some, "koko");
        assert_eq!(config.not_an_env, "popo");
        assert_eq!(config.database_url, "postgres://localhost:5432/db");
        assert_eq!(config.duration, Duration::from_secs(5));
        assert!(config.other);
        assert_eq!(config.internal.internal_field, "dudu");
        assert_eq!(config.internal.strings, vec!["\"4\"", "\"5\""]);
    }

    #[test]
    fn env_overrides_default() {
        let mut config = TestConfig::default();
        walk(&mut config, &env(&[("PORT", "666")])).unwrap();
        assert_eq!(config.port, 666);
    }

    #[test]
    fn unset_without_default_leaves_field() {
        let mut config = TestConfig {
            float64: 2.5,
            ..TestConfig::default()
        };
        walk(&mut config, &env(&[])).unwrap();
        assert_eq!(config.float64, 2.5);
        assert!(config.numbers.is_empty());
    }

    #[test]
    fn empty_env_value_counts_as_unset() {
        let mut config = TestConfig {
            float32: 1.0,
            ..TestConfig::default()
        };
        walk(&mut config, &env(&[("FLOAT32", "")])).unwrap();
        assert_eq!(config.float32, 1.0);
    }

    #[test]
    fn env_overrides_preexisting_value() {
        let mut config = TestConfig {
            database_url: "http://cool_db".into(),
            ..TestConfig::default()
        };
        walk(&mut config, &env(&[("DATABASE_URL", "pg://env")])).unwrap();
        assert_eq!(config.database_url, "pg://env");
    }

    #[test]
    fn default_overrides_preexisting_value() {
        let mut config = TestConfig {
            port: 8080,
            ..TestConfig::default()
        };
        walk(&mut config, &env(&[])).unwrap();
        assert_eq!(config.port, -1);
    }

    #[test]
    fn slices_from_env() {
        let mut config = TestConfig::default();
        let vars = env(&[
            ("STRINGS", "a,b"),
            ("SEPSTRINGS", "a:b:c"),
            ("NUMBERS", "1,2"),
            ("NUMBERS64", "1,2"),
            ("BOOLS", "true,true"),
            ("FLOAT32S", "0.5,1"),
            ("FLOAT64S", "2.25"),
        ]);
        walk(&mut config, &vars).unwrap();
        assert_eq!(config.strings, vec!["a", "b"]);
        assert_eq!(config.sep_strings, vec!["a", "b", "c"]);
        assert_eq!(config.numbers, vec![1, 2]);
        assert_eq!(config.numbers64, vec![1i64, 2]);
        assert_eq!(config.bools, vec![true, true]);
        assert_eq!(config.float32s, vec![0.5f32, 1.0]);
        assert_eq!(config.float64s, vec![2.25]);
        // The nested record shares the STRINGS binding.
        assert_eq!(config.internal.strings, vec!["a", "b"]);
    }

    #[test]
    fn nested_field_resolves_independently() {
        let mut config = TestConfig::default();
        walk(&mut config, &env(&[("INTERNAL_FIELD", "cupcake")])).unwrap();
        assert_eq!(config.internal.internal_field, "cupcake");
        assert_eq!(config.port, -1);
    }

    #[test]
    fn nested_record_walks_on_its_own() {
        let mut internal = Internal::default();
        walk(&mut internal, &env(&[("INTERNAL_FIELD", "x")])).unwrap();
        assert_eq!(internal.internal_field, "x");
    }

    #[test]
    fn duration_from_env() {
        let mut config = TestConfig::default();
        walk(&mut config, &env(&[("DURATION", "1h30m")])).unwrap();
        assert_eq!(config.duration, Duration::from_secs(5400));
    }

    #[test]
    fn coercion_error_stops_walk() {
        let mut config = TestConfig::default();
        let err = walk(&mut config, &env(&[("PORT", "abc")])).unwrap_err();
        match err {
            EnvconfError::TypeMismatch { field, value, .. } => {
                assert_eq!(field, "port");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Fields after `port` were never visited.
        assert_eq!(config.duration, Duration::ZERO);
    }

    #[test]
    fn empty_slice_env_falls_back_to_default() {
        let mut config = TestConfig::default();
        walk(&mut config, &env(&[("STRINGS", "")])).unwrap();
        assert_eq!(config.internal.strings, vec!["\"4\"", "\"5\""]);
        assert!(config.strings.is_empty());
    }

    #[test]
    fn error_after_nested_record() {
        let mut config = TestConfig::default();
        let err = walk(&mut config, &env(&[("NUMBERS", "1,x")])).unwrap_err();
        assert!(matches!(err, EnvconfError::TypeMismatch { .. }));
        // The nested record comes first and was already resolved.
        assert_eq!(config.internal.internal_field, "dudu");
    }

    struct Strict {
        url: String,
        timeout: Duration,
    }

    impl EnvRecord for Strict {
        fn fields(&mut self) -> Vec<crate::Field<'_>> {
            vec![
                crate::Field::new("url", &mut self.url)
                    .env("STRICT_URL,required")
                    .default("ignored"),
                crate::Field::new("timeout", &mut self.timeout).env("STRICT_TIMEOUT"),
            ]
        }
    }

    #[test]
    fn required_missing_fails_even_with_default() {
        let mut strict = Strict {
            url: String::new(),
            timeout: Duration::ZERO,
        };
        let err = walk(&mut strict, &env(&[])).unwrap_err();
        assert!(matches!(err, EnvconfError::RequiredMissing { key } if key == "STRICT_URL"));
        assert_eq!(strict.url, "");
    }

    #[test]
    fn required_present_applies() {
        let mut strict = Strict {
            url: String::new(),
            timeout: Duration::ZERO,
        };
        let vars = env(&[("STRICT_URL", "pg://x"), ("STRICT_TIMEOUT", "250ms")]);
        walk(&mut strict, &vars).unwrap();
        assert_eq!(strict.url, "pg://x");
        assert_eq!(strict.timeout, Duration::from_millis(250));
    }

    struct Unsupported {
        limits: HashMap<String, String>,
        ports: Vec<u16>,
    }

    impl EnvRecord for Unsupported {
        fn fields(&mut self) -> Vec<crate::Field<'_>> {
            vec![
                crate::Field::new("limits", &mut self.limits).env("LIMITS"),
                crate::Field::new("ports", &mut self.ports).env("PORTS"),
            ]
        }
    }

    #[test]
    fn unsupported_types_only_fail_when_resolved() {
        let mut rec = Unsupported {
            limits: HashMap::new(),
            ports: vec![],
        };
        walk(&mut rec, &env(&[])).unwrap();

        let err = walk(&mut rec, &env(&[("LIMITS", "a=1")])).unwrap_err();
        assert!(matches!(err, EnvconfError::UnsupportedType { .. }));

        let err = walk(&mut rec, &env(&[("PORTS", "80,443")])).unwrap_err();
        assert!(matches!(err, EnvconfError::UnsupportedSliceType { .. }));
    }
}
