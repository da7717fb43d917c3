//! Settings management

use crate::path::DEFAULT_SCRIPTS_ROOT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Script system settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    /// Resource directory that script references are relative to.
    pub scripts_root: String,
    /// QuickJS heap limit in bytes. `None` leaves the engine default.
    pub memory_limit: Option<usize>,
    /// QuickJS stack limit in bytes. `None` leaves the engine default.
    pub max_stack_size: Option<usize>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings")]
    Parse(#[from] serde_json::Error),

    #[error("scripts root '{root}' must be an absolute resource path")]
    RelativeRoot { root: String },
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            scripts_root: DEFAULT_SCRIPTS_ROOT.to_string(),
            memory_limit: None,
            max_stack_size: None,
        }
    }
}

impl ScriptSettings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.scripts_root.replace('\\', "/").starts_with('/') {
            return Err(SettingsError::RelativeRoot {
                root: self.scripts_root.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let settings = ScriptSettings::from_json_str(r#"{ "memory_limit": 1048576 }"#).unwrap();
        assert_eq!(settings.scripts_root, DEFAULT_SCRIPTS_ROOT);
        assert_eq!(settings.memory_limit, Some(1 << 20));
        assert_eq!(settings.max_stack_size, None);
    }

    #[test]
    fn relative_root_is_rejected() {
        let err = ScriptSettings::from_json_str(r#"{ "scripts_root": "scripts/" }"#).unwrap_err();
        assert!(matches!(err, SettingsError::RelativeRoot { .. }));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("scripts.json");
        std::fs::write(&file, r#"{ "scripts_root": "/plugin/js/" }"#).unwrap();

        let settings = ScriptSettings::from_json_file(&file).unwrap();
        assert_eq!(settings.scripts_root, "/plugin/js/");

        let missing = ScriptSettings::from_json_file(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(SettingsError::Io { .. })));
    }
}
