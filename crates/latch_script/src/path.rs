//! Script path resolution
//!
//! Script references are relative to a scripts root inside the plugin's
//! resources. Resolution joins the reference onto the root, converts `\` to
//! `/` and folds `.`/`..` segments, so `util\helper.js`, `./util/helper.js`
//! and `util/helper.js` all name `/resources/scripts/util/helper.js`.
//!
//! References that already start with `/` are taken as canonical resource
//! paths and only normalized. Resolving a resolved path therefore returns it
//! unchanged.

use crate::ScriptError;
use std::fmt;

/// Root that script references are resolved against by default.
pub const DEFAULT_SCRIPTS_ROOT: &str = "/resources/scripts/";

/// Canonical resource path of a script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptPath(String);

impl ScriptPath {
    /// Resolve `script` against [`DEFAULT_SCRIPTS_ROOT`].
    pub fn new(script: &str) -> Result<Self, ScriptError> {
        Self::resolve(DEFAULT_SCRIPTS_ROOT, script)
    }

    /// Resolve `script` against `root`.
    ///
    /// Fails with [`ScriptError::InvalidPath`] when `..` segments climb
    /// above the resource root.
    pub fn resolve(root: &str, script: &str) -> Result<Self, ScriptError> {
        let reference = script.replace('\\', "/");
        let joined = if reference.starts_with('/') {
            reference
        } else {
            format!("{}/{}", root.replace('\\', "/"), reference)
        };

        normalize(&joined)
            .map(ScriptPath)
            .ok_or_else(|| ScriptError::InvalidPath {
                script: script.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment, e.g. `helper.js`.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn normalize(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            name => segments.push(name),
        }
    }

    let mut out = String::with_capacity(path.len());
    for segment in &segments {
        out.push('/');
        out.push_str(segment);
    }
    if segments.is_empty() || path.ends_with('/') {
        out.push('/');
    }
    Some(out)
}

impl fmt::Display for ScriptPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScriptPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ScriptPath> for String {
    fn from(path: ScriptPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(script: &str) -> String {
        ScriptPath::new(script).unwrap().into_string()
    }

    #[test]
    fn joins_onto_scripts_root() {
        assert_eq!(resolve("missing.script"), "/resources/scripts/missing.script");
        assert_eq!(resolve("util/helper.script"), "/resources/scripts/util/helper.script");
    }

    #[test]
    fn separators_are_unix_style() {
        assert_eq!(resolve("util\\helper.js"), "/resources/scripts/util/helper.js");
        assert_eq!(
            ScriptPath::resolve("\\plugin\\js\\", "a\\b.js").unwrap().as_str(),
            "/plugin/js/a/b.js"
        );
    }

    #[test]
    fn dot_segments_are_folded() {
        assert_eq!(resolve("./util//./helper.js"), "/resources/scripts/util/helper.js");
        assert_eq!(resolve("util/../shared/x.js"), "/resources/scripts/shared/x.js");
        assert_eq!(resolve("../other/x.js"), "/resources/other/x.js");
    }

    #[test]
    fn absolute_references_bypass_root() {
        assert_eq!(resolve("/lib/x.js"), "/lib/x.js");
    }

    #[test]
    fn resolution_is_idempotent() {
        for script in [
            "greet.script",
            "util\\helper.script",
            "./a/../b/c.js",
            "dir/",
            "",
            "../../x.js",
            "/already/canonical.js",
        ] {
            let once = ScriptPath::new(script).unwrap();
            let twice = ScriptPath::new(once.as_str()).unwrap();
            assert_eq!(once, twice, "resolving {script:?} twice");
        }
    }

    #[test]
    fn trailing_separator_is_kept() {
        assert_eq!(resolve("dir/"), "/resources/scripts/dir/");
        assert_eq!(resolve(""), "/resources/scripts/");
    }

    #[test]
    fn escaping_the_root_fails() {
        let err = ScriptPath::new("../../../etc/passwd").unwrap_err();
        assert!(matches!(err, ScriptError::InvalidPath { ref script } if script == "../../../etc/passwd"));
    }

    #[test]
    fn file_name_is_last_segment() {
        assert_eq!(ScriptPath::new("util/helper.js").unwrap().file_name(), "helper.js");
    }
}
