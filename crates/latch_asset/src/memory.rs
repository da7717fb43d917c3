//! In-memory resources

use crate::{ResourceError, ResourceProvider};
use std::collections::HashMap;
use std::io::Read;

/// Resources held in memory, keyed by canonical path.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    name: String,
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryResources {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a resource, returning the previous contents.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Option<Vec<u8>> {
        self.entries.insert(path.into(), contents.into())
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.entries.remove(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceProvider for MemoryResources {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, ResourceError> {
        self.entries
            .get(path)
            .map(|bytes| Box::new(bytes.as_slice()) as Box<dyn Read + '_>)
            .ok_or_else(|| ResourceError::absent(path))
    }

    fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }
}
