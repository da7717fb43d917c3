//! Script invocation
//!
//! [`ScriptInvoker`] resolves a script reference, pulls its source from a
//! [`ResourceProvider`] and either evaluates it or compiles it. Resource
//! absence is the one condition translated here (into
//! [`ScriptError::NotFound`]); engine failures pass through as reported.

use crate::{Bindings, CompiledScript, ScriptError, ScriptPath, ScriptSettings};
use crate::runtime::ScriptRuntime;
use latch_asset::{ResourceError, ResourceProvider, ResourceRegistry};
use serde_json::Value;
use std::io::Read;
use tracing::debug;

/// Loads and runs scripts from plugin resources.
#[derive(Debug, Clone, Default)]
pub struct ScriptInvoker {
    settings: ScriptSettings,
}

impl ScriptInvoker {
    pub fn new(settings: ScriptSettings) -> Self {
        Self { settings }
    }

    /// Canonical resource path for `script`.
    pub fn resolve(&self, script: &str) -> Result<ScriptPath, ScriptError> {
        ScriptPath::resolve(&self.settings.scripts_root, script)
    }

    /// Evaluate `script` with `bindings` defined as globals and return the
    /// value of its last expression.
    pub fn evaluate(
        &self,
        resources: &dyn ResourceProvider,
        script: &str,
        bindings: &Bindings,
    ) -> Result<Value, ScriptError> {
        let (path, source) = self.open_script(resources, script)?;
        debug!(%path, bindings = bindings.len(), "evaluating script");

        let runtime = ScriptRuntime::with_settings(&self.settings, path.as_str())?;
        runtime.bind(bindings)?;
        runtime.eval(&source)
    }

    /// Compile `script` into a [`CompiledScript`].
    pub fn parse_class(
        &self,
        resources: &dyn ResourceProvider,
        script: &str,
    ) -> Result<CompiledScript, ScriptError> {
        let (path, source) = self.open_script(resources, script)?;
        debug!(%path, "compiling script");

        CompiledScript::compile(&self.settings, path, &source)
    }

    /// Compile `script` from whichever registered plugin provides it first.
    pub fn parse_class_any(
        &self,
        registry: &ResourceRegistry,
        script: &str,
    ) -> Result<CompiledScript, ScriptError> {
        self.parse_class(registry, script)
    }

    fn open_script(
        &self,
        resources: &dyn ResourceProvider,
        script: &str,
    ) -> Result<(ScriptPath, String), ScriptError> {
        let path = self.resolve(script)?;
        debug!(script, %path, provider = resources.name(), "resolving script");

        let mut stream = resources.open(path.as_str()).map_err(|err| match err {
            absent @ ResourceError::Absent { .. } => ScriptError::NotFound {
                path: path.to_string(),
                source: absent,
            },
            other => ScriptError::Resource(other),
        })?;

        let mut source = String::new();
        stream
            .read_to_string(&mut source)
            .map_err(|source| ScriptError::Read {
                path: path.to_string(),
                source,
            })?;
        Ok((path, source))
    }
}
