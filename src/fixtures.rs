#[cfg(test)]
pub mod test {
    use std::time::Duration;

    use serde::{Deserialize, Serialize};

    use crate::{EnvRecord, Field};

    #[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
    pub struct Internal {
        pub internal_field: String,
        pub strings: Vec<String>,
    }

    impl EnvRecord for Internal {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::new("internal_field", &mut self.internal_field)
                    .env("INTERNAL_FIELD")
                    .default("dudu"),
                Field::new("strings", &mut self.strings)
                    .env("STRINGS")
                    .default("\"4\",\"5\""),
            ]
        }
    }

    /// Covers every supported leaf kind plus one nested record.
    #[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
    pub struct TestConfig {
        pub internal: Internal,
        pub strings: Vec<String>,
        pub sep_strings: Vec<String>,
        pub numbers: Vec<i32>,
        pub numbers64: Vec<i64>,
        pub bools: Vec<bool>,
        pub float32s: Vec<f32>,
        pub float64s: Vec<f64>,
        #[serde(rename = "somevar")]
        pub some: String,
        #[serde(rename = "notAnEnv")]
        pub not_an_env: String,
        #[serde(rename = "database")]
        pub database_url: String,
        pub port: i64,
        #[serde(with = "crate::duration")]
        pub duration: Duration,
        pub float64: f64,
        pub float32: f32,
        #[serde(rename = "othervar")]
        pub other: bool,
    }

    impl EnvRecord for TestConfig {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::nested("internal", &mut self.internal),
                Field::new("strings", &mut self.strings).env("STRINGS"),
                Field::new("sep_strings", &mut self.sep_strings)
                    .env("SEPSTRINGS")
                    .separator(":"),
                Field::new("numbers", &mut self.numbers).env("NUMBERS"),
                Field::new("numbers64", &mut self.numbers64).env("NUMBERS64"),
                Field::new("bools", &mut self.bools).env("BOOLS"),
                Field::new("float32s", &mut self.float32s).env("FLOAT32S"),
                Field::new("float64s", &mut self.float64s).env("FLOAT64S"),
                Field::new("some", &mut self.some)
                    .env("somevar")
                    .default("koko"),
                Field::new("not_an_env", &mut self.not_an_env)
                    .env("")
                    .default("popo"),
                Field::new("database_url", &mut self.database_url)
                    .env("DATABASE_URL")
                    .default("postgres://localhost:5432/db"),
                Field::new("port", &mut self.port).env("PORT").default("-1"),
                Field::new("duration", &mut self.duration)
                    .env("DURATION")
                    .default("5s"),
                Field::new("float64", &mut self.float64).env("FLOAT64"),
                Field::new("float32", &mut self.float32).env("FLOAT32"),
                Field::new("other", &mut self.other)
                    .env("othervar")
                    .default("true"),
            ]
        }
    }

    #[test]
    fn default_record_is_blank() {
        let config = TestConfig::default();
        assert_eq!(config.port, 0);
        assert!(config.strings.is_empty());
        assert_eq!(config.internal, Internal::default());
    }
}
