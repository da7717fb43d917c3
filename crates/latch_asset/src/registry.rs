//! Lookup across every registered plugin

use crate::{ResourceError, ResourceProvider};
use std::io::Read;
use tracing::debug;

/// Ordered set of plugin resource providers.
///
/// [`open`](ResourceProvider::open) returns the first provider holding the
/// resource. A provider failing with anything other than
/// [`ResourceError::Absent`] stops the search.
#[derive(Default)]
pub struct ResourceRegistry {
    providers: Vec<Box<dyn ResourceProvider>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: impl ResourceProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    pub fn with(mut self, provider: impl ResourceProvider + 'static) -> Self {
        self.register(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Names of the registered providers, in search order.
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }
}

impl ResourceProvider for ResourceRegistry {
    fn name(&self) -> &str {
        "registry"
    }

    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, ResourceError> {
        for provider in &self.providers {
            match provider.open(path) {
                Ok(stream) => {
                    debug!(provider = provider.name(), path, "resource resolved");
                    return Ok(stream);
                }
                Err(ResourceError::Absent { .. }) => continue,
                Err(err) => return Err(err),
            }
        }
        Err(ResourceError::absent(path))
    }
}

impl std::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.provider_names()).finish()
    }
}
