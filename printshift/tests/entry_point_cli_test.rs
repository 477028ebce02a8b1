//! Tests for entry_point.rs CLI argument handling and run_with_args function.
#![allow(clippy::unwrap_used)]

use printshift::entry_point::{run_with_args, run_with_args_to};
use std::fs;
use tempfile::tempdir;

/// Test that --version flag works correctly.
#[test]
fn test_version_flag() {
    let mut buffer = Vec::new();
    let result = run_with_args_to(vec!["--version".to_owned()], &mut buffer);
    assert_eq!(result.unwrap(), 0);
    assert!(String::from_utf8(buffer).unwrap().contains("printshift"));
}

/// Test that --help flag works correctly.
#[test]
fn test_help_flag() {
    let mut buffer = Vec::new();
    let result = run_with_args_to(vec!["--help".to_owned()], &mut buffer);
    assert_eq!(result.unwrap(), 0);
    let output = String::from_utf8(buffer).unwrap();
    assert!(output.contains("Usage"));
    assert!(output.contains("CONFIGURATION FILE"));
}

/// Test error handling for non-existent path.
#[test]
fn test_nonexistent_path() {
    let result = run_with_args(vec!["/nonexistent/path/to/Sources".to_owned()]);
    assert_eq!(result.unwrap(), 1);
}

/// Conflicting flags are a usage error, reported with exit code 1.
#[test]
fn test_dry_run_conflicts_with_check() {
    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec!["--dry-run".to_owned(), "--check".to_owned(), ".".to_owned()],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 1);
}

#[test]
fn test_migrate_directory_end_to_end() {
    let dir = tempdir().unwrap();
    let sources = dir.path().join("Sources");
    fs::create_dir(&sources).unwrap();

    let view = sources.join("JournalView.swift");
    fs::write(
        &view,
        "import SwiftUI\n\nprint(\"💾 JournalView: Saving photos to iCloud\")\n",
    )
    .unwrap();
    let clean = sources.join("Model.swift");
    fs::write(&clean, "struct Model {}\n").unwrap();

    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec![dir.path().to_string_lossy().to_string()],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 0);

    let rewritten = fs::read_to_string(&view).unwrap();
    assert!(rewritten.contains("import PerformanceLogger"));
    assert!(rewritten.contains(r#"logPerformance("Saving photos to iCloud")"#));
    assert_eq!(fs::read_to_string(&clean).unwrap(), "struct Model {}\n");

    let output = String::from_utf8(buffer).unwrap();
    assert!(output.contains("[SUMMARY] 2 files scanned, 1 rewritten"));
    assert!(output.contains("[TIME] Completed in"));
}

#[test]
fn test_check_fails_while_pending_then_passes() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("App.swift");
    let original = "import SwiftUI\n\nprint(\"✅ booted\")\n";
    fs::write(&file_path, original).unwrap();

    // Check mode: pending rewrite fails and must not touch the file
    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec![
            dir.path().to_string_lossy().to_string(),
            "--check".to_owned(),
        ],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 1);
    assert_eq!(fs::read_to_string(&file_path).unwrap(), original);

    // Apply, then the same check passes
    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec![dir.path().to_string_lossy().to_string()],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 0);

    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec![
            dir.path().to_string_lossy().to_string(),
            "--check".to_owned(),
        ],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 0);
    let output = String::from_utf8(buffer).unwrap();
    assert!(output.contains("[CHECK]"));
    assert!(output.contains("PASSED"));
}

#[test]
fn test_json_report_structure() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("App.swift"),
        "import SwiftUI\n\nprint(\"✅ saved\")\nprint(\"❌ failed\")\n",
    )
    .unwrap();

    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec![
            dir.path().to_string_lossy().to_string(),
            "--json".to_owned(),
        ],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 0);

    let output = String::from_utf8(buffer).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&output).expect("Output should be valid JSON");
    assert_eq!(json["files_scanned"], 1);
    assert_eq!(json["files_changed"], 1);
    assert_eq!(json["replacements"], 2);
    assert_eq!(json["imports_inserted"], 1);
    assert_eq!(json["dry_run"], false);
    assert_eq!(json["changes"].as_array().unwrap().len(), 1);
    assert_eq!(json["changes"][0]["import_inserted"], true);
}

#[test]
fn test_rules_subcommand_table() {
    let mut buffer = Vec::new();
    let result = run_with_args_to(vec!["rules".to_owned()], &mut buffer);
    assert_eq!(result.unwrap(), 0);

    let output = String::from_utf8(buffer).unwrap();
    assert!(output.contains("Active ruleset"));
    assert!(output.contains("Pattern"));
    assert!(output.contains("literal"));
    assert!(output.contains("regex"));
    assert!(output.contains("25 rules"));
}

#[test]
fn test_rules_subcommand_json() {
    let mut buffer = Vec::new();
    let result = run_with_args_to(vec!["rules".to_owned(), "--json".to_owned()], &mut buffer);
    assert_eq!(result.unwrap(), 0);

    let output = String::from_utf8(buffer).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&output).expect("Output should be valid JSON");
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 25);
    assert_eq!(rows[0]["kind"], "literal");
    assert_eq!(rows[24]["kind"], "regex");
    assert!(rows[24]["pattern"].as_str().unwrap().contains("📥"));
    assert_eq!(rows[24]["replacement"], r#"logPerformance("${1}")"#);
}

#[test]
fn test_no_import_flag() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("App.swift");
    fs::write(&file_path, "import SwiftUI\n\nprint(\"✅ ok\")\n").unwrap();

    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec![
            dir.path().to_string_lossy().to_string(),
            "--no-import".to_owned(),
        ],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 0);

    let rewritten = fs::read_to_string(&file_path).unwrap();
    assert!(rewritten.contains(r#"logInfo("ok")"#));
    assert!(!rewritten.contains("import PerformanceLogger"));
}

#[test]
fn test_root_flag() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("App.swift");
    fs::write(&file_path, "print(\"🔄 syncing\")\n").unwrap();

    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec![
            "--root".to_owned(),
            dir.path().to_string_lossy().to_string(),
        ],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 0);
    assert!(fs::read_to_string(&file_path)
        .unwrap()
        .contains(r#"logPerformance("syncing")"#));
}

#[test]
fn test_exclude_folders_flag() {
    let dir = tempdir().unwrap();
    let fixtures = dir.path().join("Fixtures");
    fs::create_dir(&fixtures).unwrap();
    let fixture_file = fixtures.join("Sample.swift");
    let original = "print(\"✅ fixture\")\n";
    fs::write(&fixture_file, original).unwrap();

    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec![
            dir.path().to_string_lossy().to_string(),
            "--exclude-folders".to_owned(),
            "Fixtures".to_owned(),
        ],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 0);
    assert_eq!(fs::read_to_string(&fixture_file).unwrap(), original);
}

#[test]
fn test_default_excludes_skip_build_folders() {
    let dir = tempdir().unwrap();
    let pods = dir.path().join("Pods");
    fs::create_dir(&pods).unwrap();
    let pod_file = pods.join("Dep.swift");
    let original = "print(\"✅ vendored\")\n";
    fs::write(&pod_file, original).unwrap();

    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec![dir.path().to_string_lossy().to_string()],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 0);
    assert_eq!(fs::read_to_string(&pod_file).unwrap(), original);

    // Force-including Pods brings the file back in
    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec![
            dir.path().to_string_lossy().to_string(),
            "--include-folders".to_owned(),
            "Pods".to_owned(),
        ],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 0);
    assert!(fs::read_to_string(&pod_file)
        .unwrap()
        .contains(r#"logInfo("vendored")"#));
}

#[test]
fn test_single_file_target() {
    let dir = tempdir().unwrap();
    let wanted = dir.path().join("A.swift");
    fs::write(&wanted, "print(\"✅ a\")\n").unwrap();
    let ignored = dir.path().join("B.swift");
    let original = "print(\"✅ b\")\n";
    fs::write(&ignored, original).unwrap();

    let mut buffer = Vec::new();
    let result = run_with_args_to(
        vec![wanted.to_string_lossy().to_string()],
        &mut buffer,
    );
    assert_eq!(result.unwrap(), 0);
    assert!(fs::read_to_string(&wanted).unwrap().contains("logInfo"));
    assert_eq!(fs::read_to_string(&ignored).unwrap(), original);
}
