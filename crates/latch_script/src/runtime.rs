//! Script runtime management
//!
//! Wraps one QuickJS runtime and context. Values cross the boundary as
//! JSON: bindings and call arguments are parsed into the context with
//! `JSON.parse`, results come back through `JSON.stringify`. Anything
//! without a JSON form (`undefined`, functions, symbols) becomes `null`.

use crate::{Bindings, ScriptError, ScriptSettings};
use rquickjs::function::{Rest, This};
use rquickjs::{CatchResultExt, CaughtError, Context, Ctx, Function, Object, Persistent, Runtime, Value};
use serde_json::Value as JsonValue;

/// Script execution context
pub struct ScriptRuntime {
    #[allow(dead_code)] // Kept alive for context lifetime
    runtime: Runtime,
    context: Context,
    origin: String,
}

impl ScriptRuntime {
    pub fn new() -> Result<Self, ScriptError> {
        Self::with_settings(&ScriptSettings::default(), "<inline>")
    }

    /// Create a runtime with the engine limits from `settings`.
    ///
    /// `origin` names the script in error messages.
    pub fn with_settings(
        settings: &ScriptSettings,
        origin: impl Into<String>,
    ) -> Result<Self, ScriptError> {
        let runtime = Runtime::new()?;
        if let Some(limit) = settings.memory_limit {
            runtime.set_memory_limit(limit);
        }
        if let Some(size) = settings.max_stack_size {
            runtime.set_max_stack_size(size);
        }
        let context = Context::full(&runtime)?;

        Ok(Self {
            runtime,
            context,
            origin: origin.into(),
        })
    }

    /// Define every binding as a global variable.
    pub fn bind(&self, bindings: &Bindings) -> Result<(), ScriptError> {
        self.context.with(|ctx| -> Result<(), ScriptError> {
            let globals = ctx.globals();
            for (name, value) in bindings.iter() {
                let value = self.to_js(&ctx, value)?;
                globals.set(name, value)?;
            }
            Ok(())
        })
    }

    /// Run `source` for its side effects.
    pub fn execute(&self, source: &str) -> Result<(), ScriptError> {
        self.context.with(|ctx| {
            ctx.eval::<(), _>(source)
                .catch(&ctx)
                .map_err(|e| self.interpreter_error(e))
        })
    }

    /// Run `source` and return the value of its last expression.
    pub fn eval(&self, source: &str) -> Result<JsonValue, ScriptError> {
        self.context.with(|ctx| -> Result<JsonValue, ScriptError> {
            let value: Value = ctx
                .eval(source)
                .catch(&ctx)
                .map_err(|e| self.interpreter_error(e))?;
            self.to_json(&ctx, value)
        })
    }

    /// Whether `name` resolves to a callable in the global scope.
    pub fn has_function(&self, name: &str) -> bool {
        self.context.with(|ctx| {
            matches!(self.lookup(&ctx, name), Ok(Some(value)) if value.is_function())
        })
    }

    /// Call a global function by name.
    pub fn call_function(&self, name: &str, args: &[JsonValue]) -> Result<JsonValue, ScriptError> {
        self.context.with(|ctx| -> Result<JsonValue, ScriptError> {
            let func = self
                .lookup(&ctx, name)?
                .and_then(Value::into_function)
                .ok_or_else(|| self.missing(name))?;
            let args = self.to_js_args(&ctx, args)?;
            let result: Value = func
                .call((Rest(args),))
                .catch(&ctx)
                .map_err(|e| self.interpreter_error(e))?;
            self.to_json(&ctx, result)
        })
    }

    /// Instantiate the class (or constructor function) `class`.
    pub fn construct(
        &self,
        class: &str,
        args: &[JsonValue],
    ) -> Result<Persistent<Object<'static>>, ScriptError> {
        self.context.with(|ctx| -> Result<Persistent<Object<'static>>, ScriptError> {
            let constructor = self
                .lookup(&ctx, class)?
                .filter(Value::is_function)
                .ok_or_else(|| self.missing(class))?;
            let args = self.to_js_args(&ctx, args)?;

            let reflect: Object = ctx.globals().get("Reflect")?;
            let construct: Function = reflect.get("construct")?;
            let instance: Object = construct
                .call((constructor, args))
                .catch(&ctx)
                .map_err(|e| self.interpreter_error(e))?;

            Ok(Persistent::save(&ctx, instance))
        })
    }

    /// Call `method` on an object created by [`construct`](Self::construct).
    pub fn call_method(
        &self,
        instance: &Persistent<Object<'static>>,
        method: &str,
        args: &[JsonValue],
    ) -> Result<JsonValue, ScriptError> {
        self.context.with(|ctx| -> Result<JsonValue, ScriptError> {
            let object = instance.clone().restore(&ctx)?;
            let func = object
                .get::<_, Value>(method)?
                .into_function()
                .ok_or_else(|| self.missing(method))?;
            let args = self.to_js_args(&ctx, args)?;
            let result: Value = func
                .call((This(object), Rest(args)))
                .catch(&ctx)
                .map_err(|e| self.interpreter_error(e))?;
            self.to_json(&ctx, result)
        })
    }

    // Top-level `class`/`let`/`const` declarations live in the global lexical
    // scope rather than on `globalThis`, so names are resolved by evaluating
    // them.
    fn lookup<'js>(&self, ctx: &Ctx<'js>, name: &str) -> Result<Option<Value<'js>>, ScriptError> {
        if !is_identifier(name) {
            return Ok(None);
        }
        let expr = format!("typeof {name} === 'undefined' ? undefined : {name}");
        let value = ctx
            .eval::<Value, _>(expr)
            .catch(ctx)
            .map_err(|e| self.interpreter_error(e))?;
        Ok((!value.is_undefined()).then_some(value))
    }

    fn to_js<'js>(&self, ctx: &Ctx<'js>, value: &JsonValue) -> Result<Value<'js>, ScriptError> {
        ctx.json_parse(value.to_string())
            .catch(ctx)
            .map_err(|e| self.interpreter_error(e))
    }

    fn to_js_args<'js>(
        &self,
        ctx: &Ctx<'js>,
        args: &[JsonValue],
    ) -> Result<Vec<Value<'js>>, ScriptError> {
        args.iter().map(|arg| self.to_js(ctx, arg)).collect()
    }

    fn to_json<'js>(&self, ctx: &Ctx<'js>, value: Value<'js>) -> Result<JsonValue, ScriptError> {
        if value.is_undefined() {
            return Ok(JsonValue::Null);
        }
        let text = ctx
            .json_stringify(value)
            .catch(ctx)
            .map_err(|e| self.conversion_error(e))?;
        let Some(text) = text else {
            return Ok(JsonValue::Null);
        };
        let text = text.to_string().map_err(|e| self.conversion_error(e))?;
        serde_json::from_str(&text).map_err(|e| self.conversion_error(e))
    }

    // The script ran; only its result has no JSON form (BigInt, cycles).
    fn conversion_error(&self, err: impl std::fmt::Display) -> ScriptError {
        ScriptError::Conversion {
            path: self.origin.clone(),
            message: err.to_string(),
        }
    }

    fn interpreter_error(&self, caught: CaughtError<'_>) -> ScriptError {
        ScriptError::Interpreter {
            path: self.origin.clone(),
            message: caught.to_string(),
        }
    }

    fn missing(&self, name: &str) -> ScriptError {
        ScriptError::MissingMember {
            path: self.origin.clone(),
            name: name.to_string(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
