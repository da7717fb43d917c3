//! Parsed scripts
//!
//! A [`CompiledScript`] owns the runtime its source was evaluated in, so the
//! functions and classes the script declares stay callable for as long as
//! the handle lives.

use crate::runtime::ScriptRuntime;
use crate::{ScriptError, ScriptPath, ScriptSettings};
use rquickjs::{Object, Persistent};
use serde_json::Value;

/// A script whose top-level declarations have been evaluated.
pub struct CompiledScript {
    path: ScriptPath,
    runtime: ScriptRuntime,
}

impl CompiledScript {
    /// Evaluate `source` in a fresh runtime.
    ///
    /// Syntax errors and exceptions thrown at the top level fail with
    /// [`ScriptError::Interpreter`].
    pub fn compile(
        settings: &ScriptSettings,
        path: ScriptPath,
        source: &str,
    ) -> Result<Self, ScriptError> {
        let runtime = ScriptRuntime::with_settings(settings, path.as_str())?;
        runtime.execute(source)?;
        Ok(Self { path, runtime })
    }

    pub fn path(&self) -> &ScriptPath {
        &self.path
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.runtime.has_function(name)
    }

    /// Call a top-level function.
    pub fn call(&self, function: &str, args: &[Value]) -> Result<Value, ScriptError> {
        self.runtime.call_function(function, args)
    }

    /// Create an instance of a class declared by the script.
    pub fn instantiate(&self, class: &str, args: &[Value]) -> Result<ScriptInstance<'_>, ScriptError> {
        let object = self.runtime.construct(class, args)?;
        Ok(ScriptInstance {
            script: self,
            class: class.to_string(),
            object,
        })
    }
}

impl std::fmt::Debug for CompiledScript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledScript")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// An object created from one of a [`CompiledScript`]'s classes.
///
/// Borrows the script so the object cannot outlive its runtime.
pub struct ScriptInstance<'a> {
    script: &'a CompiledScript,
    class: String,
    object: Persistent<Object<'static>>,
}

impl ScriptInstance<'_> {
    pub fn class_name(&self) -> &str {
        &self.class
    }

    pub fn call_method(&self, method: &str, args: &[Value]) -> Result<Value, ScriptError> {
        self.script.runtime.call_method(&self.object, method, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compile(source: &str) -> Result<CompiledScript, ScriptError> {
        let path = ScriptPath::new("test.js").unwrap();
        CompiledScript::compile(&ScriptSettings::default(), path, source)
    }

    #[test]
    fn instances_keep_state_between_calls() {
        let script = compile(
            "class Greeter {
                 constructor(greeting) { this.greeting = greeting; this.count = 0; }
                 greet(name) { this.count++; return `${this.greeting}, ${name}`; }
                 greeted() { return this.count; }
             }",
        )
        .unwrap();

        let greeter = script.instantiate("Greeter", &[json!("Hi")]).unwrap();
        assert_eq!(greeter.class_name(), "Greeter");
        assert_eq!(greeter.call_method("greet", &[json!("Ada")]).unwrap(), json!("Hi, Ada"));
        assert_eq!(greeter.call_method("greeted", &[]).unwrap(), json!(1));

        let err = greeter.call_method("wave", &[]).unwrap_err();
        assert!(matches!(err, ScriptError::MissingMember { ref name, .. } if name == "wave"));
    }

    #[test]
    fn syntax_errors_fail_compilation() {
        let err = compile("function broken( {").unwrap_err();
        assert!(matches!(err, ScriptError::Interpreter { ref path, .. } if path == "/resources/scripts/test.js"));
    }

    #[test]
    fn missing_class_is_reported() {
        let script = compile("const VALUE = 1;").unwrap();
        assert!(matches!(
            script.instantiate("Nope", &[]),
            Err(ScriptError::MissingMember { .. })
        ));
    }
}
