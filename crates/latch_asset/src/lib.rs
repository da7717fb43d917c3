//! Latch Asset Resources
//!
//! Resource lookup for plugin bundles. Every lookup goes through a
//! [`ResourceProvider`], which resolves a canonical resource path
//! (`/resources/scripts/foo.js`) to a byte stream or reports the resource
//! as absent.
//!
//! ## Providers
//!
//! - [`DirectoryResources`]: a plugin bundle unpacked on disk
//! - [`MemoryResources`]: resources held in memory (bundled or generated)
//! - [`ResourceRegistry`]: searches every registered plugin in order

pub mod directory;
pub mod error;
pub mod memory;
pub mod registry;

use std::io::Read;

pub use directory::DirectoryResources;
pub use error::ResourceError;
pub use memory::MemoryResources;
pub use registry::ResourceRegistry;

/// Resolves canonical resource paths to byte streams.
///
/// Paths are always forward-slash separated and rooted at `/`. A provider
/// that does not hold the requested resource must return
/// [`ResourceError::Absent`]; every other failure is reported as
/// [`ResourceError::Io`].
pub trait ResourceProvider: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Open the resource at `path`.
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, ResourceError>;

    /// Whether `path` can be opened by this provider.
    fn contains(&self, path: &str) -> bool {
        self.open(path).is_ok()
    }
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, ResourceError> {
        (**self).open(path)
    }

    fn contains(&self, path: &str) -> bool {
        (**self).contains(path)
    }
}
