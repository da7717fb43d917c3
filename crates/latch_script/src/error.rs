use latch_asset::ResourceError;
use thiserror::Error;

/// Errors that can occur while loading or running a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The resource provider does not hold the script.
    #[error("script not found: {path}")]
    NotFound {
        path: String,
        #[source]
        source: ResourceError,
    },

    /// The reference climbs above the resource root with `..`. This is the
    /// one lookup failure that is not absence: no resource path exists to
    /// look up, so no provider is consulted.
    #[error("script reference '{script}' escapes the resource root")]
    InvalidPath { script: String },

    /// The provider holds the script but failed to hand it over.
    #[error(transparent)]
    Resource(ResourceError),

    #[error("failed to read script '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An exception raised by QuickJS while parsing or running the script.
    #[error("{path}: {message}")]
    Interpreter { path: String, message: String },

    /// The script ran but its result has no JSON form.
    #[error("{path}: result cannot be converted to JSON: {message}")]
    Conversion { path: String, message: String },

    #[error("'{name}' is not defined by script '{path}'")]
    MissingMember { path: String, name: String },

    #[error("script engine error: {0}")]
    Runtime(#[from] rquickjs::Error),
}

impl ScriptError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScriptError::NotFound { .. })
    }
}
