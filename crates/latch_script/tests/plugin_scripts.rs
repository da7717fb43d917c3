//! Scripts loaded from plugin bundles on disk

use latch_asset::{DirectoryResources, MemoryResources, ResourceRegistry};
use latch_script::{Bindings, ScriptError, ScriptInvoker, ScriptPath};
use serde_json::json;
use std::fs;
use std::path::Path;

fn write_script(bundle: &Path, relative: &str, source: &str) {
    let file = bundle.join("resources/scripts").join(relative);
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, source).unwrap();
}

#[test]
fn greet_script_from_directory() {
    let bundle = tempfile::tempdir().unwrap();
    write_script(bundle.path(), "greet.script", "`Hello, ${name}`");

    let resources = DirectoryResources::new(bundle.path());
    let value = ScriptInvoker::default()
        .evaluate(&resources, "greet.script", &Bindings::new().with("name", "Ada"))
        .unwrap();

    assert_eq!(value, json!("Hello, Ada"));
}

#[test]
fn missing_script_reports_normalized_path() {
    let bundle = tempfile::tempdir().unwrap();
    let resources = DirectoryResources::new(bundle.path());

    let err = ScriptInvoker::default()
        .evaluate(&resources, "missing.script", &Bindings::new())
        .unwrap_err();

    match err {
        ScriptError::NotFound { path, source } => {
            assert_eq!(path, "/resources/scripts/missing.script");
            assert!(source.is_absent());
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn helper_found_in_second_plugin() {
    let core = tempfile::tempdir().unwrap();
    let extra = tempfile::tempdir().unwrap();
    write_script(
        extra.path(),
        "util/helper.script",
        "class Helper { scale(x) { return x * 10; } }
         function version() { return 'extra'; }",
    );

    let registry = ResourceRegistry::new()
        .with(DirectoryResources::named("core", core.path()))
        .with(DirectoryResources::named("extra", extra.path()));

    let helper = ScriptInvoker::default()
        .parse_class_any(&registry, "util\\helper.script")
        .unwrap();

    assert_eq!(helper.call("version", &[]).unwrap(), json!("extra"));
    let instance = helper.instantiate("Helper", &[]).unwrap();
    assert_eq!(instance.call_method("scale", &[json!(4)]).unwrap(), json!(40));
}

#[test]
fn bundled_scripts_shadow_disk_scripts() {
    let disk = tempfile::tempdir().unwrap();
    write_script(disk.path(), "mode.js", "'disk'");

    let registry = ResourceRegistry::new()
        .with(MemoryResources::new("bundled").with("/resources/scripts/mode.js", "'bundled'"))
        .with(DirectoryResources::new(disk.path()));

    let value = ScriptInvoker::default()
        .evaluate(&registry, "mode.js", &Bindings::new())
        .unwrap();
    assert_eq!(value, json!("bundled"));
}

#[test]
fn runtime_errors_are_not_rewrapped() {
    let bundle = tempfile::tempdir().unwrap();
    write_script(bundle.path(), "throws.js", "undefinedFunction()");

    let resources = DirectoryResources::new(bundle.path());
    let err = ScriptInvoker::default()
        .evaluate(&resources, "throws.js", &Bindings::new())
        .unwrap_err();

    assert!(!err.is_not_found());
    assert!(matches!(err, ScriptError::Interpreter { .. }));
}

#[test]
fn normalized_path_round_trips_through_invoker() {
    let invoker = ScriptInvoker::default();
    let path = invoker.resolve("a\\.\\b\\..\\c.js").unwrap();
    assert_eq!(path, ScriptPath::new("/resources/scripts/a/c.js").unwrap());
    assert_eq!(invoker.resolve(path.as_str()).unwrap(), path);
}
