//! Latch Scripting System
//!
//! Loads JavaScript from plugin resources and runs it on QuickJS.
//!
//! ## Architecture
//!
//! - **Paths:** script references are resolved under `/resources/scripts/`
//!   with forward slashes, whatever the host platform
//! - **Lookup:** any [`ResourceProvider`] supplies the source; a missing
//!   resource always surfaces as [`ScriptError::NotFound`]
//! - **Evaluate:** run a script once with caller-supplied [`Bindings`]
//! - **Parse:** compile a script into a [`CompiledScript`] whose functions
//!   and classes can be called afterwards
//!
//! Every call builds its own QuickJS runtime; nothing is shared between
//! calls.

pub mod bindings;
pub mod compiled;
pub mod error;
pub mod invoker;
pub mod path;
pub mod runtime;
pub mod settings;

pub use bindings::Bindings;
pub use compiled::{CompiledScript, ScriptInstance};
pub use error::ScriptError;
pub use invoker::ScriptInvoker;
pub use latch_asset::{ResourceError, ResourceProvider, ResourceRegistry};
pub use path::{ScriptPath, DEFAULT_SCRIPTS_ROOT};
pub use settings::{ScriptSettings, SettingsError};

pub use rquickjs;

/// Scripting system version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Evaluate `script` from `resources` with default settings.
pub fn evaluate_script(
    resources: &dyn ResourceProvider,
    script: &str,
    bindings: &Bindings,
) -> Result<serde_json::Value, ScriptError> {
    ScriptInvoker::default().evaluate(resources, script, bindings)
}

/// Compile `script` from `resources` with default settings.
pub fn parse_class(
    resources: &dyn ResourceProvider,
    script: &str,
) -> Result<CompiledScript, ScriptError> {
    ScriptInvoker::default().parse_class(resources, script)
}
