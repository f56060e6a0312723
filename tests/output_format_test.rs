//! Tests for the JSON output format.
//!
//! These tests run the CLI analysis path over the testdata fixtures and check
//! the shape of the JSON document consumers rely on.

use std::path::PathBuf;

use structscan::cli::analyze_files;
use structscan::report::{self, JsonReport};
use structscan::Registry;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn run_and_get_json(names: &[&str]) -> (JsonReport, serde_json::Value, usize) {
    let files: Vec<PathBuf> = names.iter().map(|n| testdata_path().join(n)).collect();
    let outcome = analyze_files(&Registry::default(), &files);

    let json = report::to_json(&outcome.reports).expect("should serialize");
    let parsed: JsonReport = serde_json::from_str(&json).expect("should round-trip");
    let value: serde_json::Value = serde_json::from_str(&json).expect("should be valid JSON");
    (parsed, value, outcome.failed)
}

#[test]
fn test_json_has_required_fields() {
    let (_, value, failed) = run_and_get_json(&["store.ts"]);
    assert_eq!(failed, 0);

    assert!(value.get("version").is_some(), "missing version field");
    let file = &value["files"][0];
    for field in ["path", "language", "summary"] {
        assert!(file.get(field).is_some(), "missing {} field", field);
    }
    for field in ["classes", "functions", "imports", "variables"] {
        assert!(file["summary"].get(field).is_some(), "missing summary.{}", field);
    }
}

#[test]
fn test_json_statement_imports() {
    let (_, value, _) = run_and_get_json(&["store.ts"]);
    let imports = &value["files"][0]["summary"]["imports"];

    assert!(imports.is_array());
    assert_eq!(imports[0]["module"], "react");
    assert_eq!(imports[0]["default_import"], "React");
    assert_eq!(imports[0]["line"], 1);
    // Absent bindings are omitted rather than null.
    assert!(imports[0].get("namespace_import").is_none());
}

#[test]
fn test_json_class_members_are_tagged() {
    let (_, value, _) = run_and_get_json(&["store.ts"]);
    let members = &value["files"][0]["summary"]["classes"][0]["members"];

    assert_eq!(members[0]["kind"], "method");
    assert_eq!(members[0]["name"], "constructor");
    assert_eq!(members[0]["returns"], "void");
    assert_eq!(members[0]["is_async"], false);
}

#[test]
#[cfg(feature = "tree-sitter")]
fn test_json_files_sorted_by_path() {
    let (parsed, _, failed) = run_and_get_json(&["store.ts", "inventory.py", "broken.py"]);
    assert_eq!(failed, 0);

    let paths: Vec<String> = parsed
        .files
        .iter()
        .map(|f| {
            PathBuf::from(&f.path)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .to_string()
        })
        .collect();
    assert_eq!(paths, vec!["broken.py", "inventory.py", "store.ts"]);

    // A file that fails to parse still reports, with an empty summary.
    assert!(parsed.files[0].summary.is_empty());
}

#[test]
#[cfg(feature = "tree-sitter")]
fn test_json_python_imports_are_names() {
    let (_, value, _) = run_and_get_json(&["inventory.py"]);
    let file = &value["files"][0];
    assert_eq!(file["language"], "python");

    let imports = file["summary"]["imports"].as_array().unwrap();
    assert!(imports.iter().all(|i| i.is_string()));
    assert!(imports.contains(&serde_json::json!("typing.Dict")));

    let members = &file["summary"]["classes"][0]["members"];
    assert_eq!(members[0]["kind"], "nested_class");
    assert_eq!(members[0]["name"], "Entry");
    // Absent return annotations are omitted.
    assert!(members[1].get("returns").is_none());
}

#[test]
fn test_unreadable_and_unsupported_files_are_counted() {
    let (parsed, _, failed) = run_and_get_json(&["missing.ts", "notes.txt"]);
    assert_eq!(failed, 2);
    assert!(parsed.files.is_empty());
}
