use std::io;
use thiserror::Error;

/// Errors reported by a [`ResourceProvider`](crate::ResourceProvider).
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource '{path}' does not exist")]
    Absent { path: String },

    #[error("failed to open resource '{path}'")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ResourceError {
    pub fn absent(path: impl Into<String>) -> Self {
        ResourceError::Absent { path: path.into() }
    }

    /// True when the provider simply does not hold the resource.
    pub fn is_absent(&self) -> bool {
        matches!(self, ResourceError::Absent { .. })
    }

    /// The resource path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            ResourceError::Absent { path } | ResourceError::Io { path, .. } => path,
        }
    }
}
