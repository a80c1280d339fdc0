use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::env::{Environment, NoEnv, ProcessEnv};
use crate::error::EnvconfError;
use crate::field::EnvRecord;
use crate::format::{self, Format};
use crate::walk;

/// Entry point for building an envconf resolution pass.
pub struct Envconf;

impl Envconf {
    pub fn builder<'b>() -> EnvconfBuilder<'b> {
        EnvconfBuilder::new()
    }
}

/// Builder for one resolution pass over a config record.
///
/// - **Blob**: [`blob()`](Self::blob) and [`format()`](Self::format) — what
///   gets decoded onto the record before the environment pass.
/// - **Environment**: [`vars()`](Self::vars) and [`no_env()`](Self::no_env) —
///   where variable lookups go (default: a snapshot of the process env).
pub struct EnvconfBuilder<'b> {
    blob: Option<&'b [u8]>,
    format: Option<Format>,
    vars: Option<Vec<(String, String)>>,
    env_enabled: bool,
}

impl<'b> EnvconfBuilder<'b> {
    fn new() -> Self {
        Self {
            blob: None,
            format: None,
            vars: None,
            env_enabled: true,
        }
    }

    /// Serialized config decoded onto the record before environment values
    /// are applied. Without one, only the environment and defaults are used.
    pub fn blob(mut self, blob: &'b [u8]) -> Self {
        self.blob = Some(blob);
        self
    }

    /// Decode the blob as `format` instead of trying JSON, then YAML.
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Replace the process environment with these pairs.
    /// Later pairs win when a key repeats.
    pub fn vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.vars = Some(vars.into_iter().collect());
        self
    }

    /// Disable environment lookups entirely; only defaults apply.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    fn environment(&self) -> Box<dyn Environment> {
        if !self.env_enabled {
            return Box::new(NoEnv);
        }
        match &self.vars {
            Some(vars) => Box::new(vars.iter().cloned().collect::<HashMap<_, _>>()),
            None => Box::new(ProcessEnv::snapshot()),
        }
    }

    /// Decode the blob (if any) onto `target`, then resolve every field from
    /// the environment and declared defaults.
    pub fn load<T>(self, target: &mut T) -> Result<(), EnvconfError>
    where
        T: EnvRecord + Serialize + DeserializeOwned,
    {
        if let Some(blob) = self.blob {
            format::decode_into(blob, target, self.format)?;
        }
        let env = self.environment();
        walk::walk(target, env.as_ref())
    }

    /// Resolve `target` from the environment and defaults only. Any blob set
    /// on the builder is ignored.
    pub fn load_env<T: EnvRecord>(self, target: &mut T) -> Result<(), EnvconfError> {
        let env = self.environment();
        walk::walk(target, env.as_ref())
    }
}
