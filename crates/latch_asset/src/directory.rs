//! Plugin bundles unpacked on disk

use crate::{ResourceError, ResourceProvider};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};

/// Serves resources from a directory.
///
/// The canonical path `/resources/scripts/a.js` maps to
/// `<root>/resources/scripts/a.js`. Paths that try to leave the root
/// (`..`, drive prefixes) are treated as absent.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    name: String,
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            name: root.display().to_string(),
            root,
        }
    }

    pub fn named(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    fn locate(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        contained.then(|| self.root.join(relative))
    }
}

impl ResourceProvider for DirectoryResources {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, ResourceError> {
        let file = self
            .locate(path)
            .ok_or_else(|| ResourceError::absent(path))?;

        tracing::trace!(provider = %self.name, file = %file.display(), "opening resource");
        let io_error = |source: io::Error| ResourceError::Io {
            path: path.to_string(),
            source,
        };
        let handle = match File::open(&file) {
            Ok(handle) => handle,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ResourceError::absent(path))
            }
            Err(err) => return Err(io_error(err)),
        };
        // Directories open fine on unix; only regular files are resources.
        if !handle.metadata().map_err(io_error)?.is_file() {
            return Err(ResourceError::absent(path));
        }
        Ok(Box::new(BufReader::new(handle)))
    }
}
