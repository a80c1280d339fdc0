use std::collections::{BTreeMap, HashMap};

/// Read-only view of environment variables for one resolution pass.
///
/// The process environment is one implementation; maps are another, so tests
/// can pass synthetic data instead of mutating the real environment.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// Snapshot of the process environment taken at the start of a pass.
///
/// Entries whose key or value is not valid UTF-8 are skipped.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv {
    vars: HashMap<String, String>,
}

impl ProcessEnv {
    pub fn snapshot() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }
}

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// An environment with nothing set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnv;

impl Environment for NoEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }
}

impl<S: std::hash::BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
