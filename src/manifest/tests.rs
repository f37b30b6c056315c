// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::scan::{DiscoveredVariable, VariableReference};
use tempfile::TempDir;

fn variable(name: &str, locations: &[(&str, usize)]) -> DiscoveredVariable {
    DiscoveredVariable {
        name: name.to_string(),
        locations: locations
            .iter()
            .map(|&(file, line)| VariableReference {
                file: file.to_string(),
                line,
                column: 0,
                snippet: String::new(),
            })
            .collect(),
        in_example: false,
        in_env: false,
    }
}

fn sync_in(
    temp: &TempDir,
    initial: Option<&str>,
    missing: &[DiscoveredVariable],
    unused: &[&str],
    flags: SyncFlags,
) -> (String, SyncReport) {
    let path = temp.path().join(".env.example");
    if let Some(initial) = initial {
        std::fs::write(&path, initial).unwrap();
    }
    let unused: Vec<String> = unused.iter().map(ToString::to_string).collect();
    let report = sync_manifest(&path, missing, &unused, flags).unwrap();
    let content = std::fs::read_to_string(&path).unwrap_or_default();
    (content, report)
}

// =============================================================================
// Reader
// =============================================================================

#[test]
fn test_parse_str_declarations() {
    let manifest = Manifest::parse_str(
        "# Database\nDATABASE_URL=postgres://localhost/app\n\n  PORT = 3000\nnot a line\n=orphan\n_private=1\n",
    );
    insta::assert_debug_snapshot!(manifest.entries(), @r#"
    [
        ManifestEntry {
            key: "DATABASE_URL",
            value: "postgres://localhost/app",
        },
        ManifestEntry {
            key: "PORT",
            value: " 3000",
        },
        ManifestEntry {
            key: "_private",
            value: "1",
        },
    ]
    "#);
}

#[test]
fn test_value_after_first_equals() {
    let manifest = Manifest::parse_str("QUERY=a=b&c=d\n");
    assert_eq!(manifest.get("QUERY"), Some("a=b&c=d"));
}

#[test]
fn test_comment_lines_are_not_declarations() {
    let manifest = Manifest::parse_str("# API_KEY=commented\n   # PORT=1\n");
    assert!(manifest.is_empty());
}

#[test]
fn test_duplicate_key_keeps_position_takes_last_value() {
    let manifest = Manifest::parse_str("A=1\nB=2\nA=3\n");
    assert_eq!(manifest.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(manifest.get("A"), Some("3"));
    assert_eq!(manifest.len(), 2);
}

#[test]
fn test_keys_are_case_sensitive() {
    let manifest = Manifest::parse_str("api_key=1\n");
    assert!(manifest.contains_key("api_key"));
    assert!(!manifest.contains_key("API_KEY"));
}

#[test]
fn test_parse_crlf() {
    let manifest = Manifest::parse_str("A=1\r\nB=2\r\n");
    assert_eq!(manifest.get("A"), Some("1"));
    assert_eq!(manifest.get("B"), Some("2"));
}

#[test]
fn test_declaration_key() {
    assert_eq!(declaration_key("  API_KEY = x"), Some("API_KEY"));
    assert_eq!(declaration_key("API_KEY"), None);
    assert_eq!(declaration_key("9LIVES=1"), None);
    assert_eq!(declaration_key("export API_KEY=1"), None);
    assert_eq!(declaration_key("# API_KEY=1"), None);
    assert_eq!(declaration_key(""), None);
}

#[test]
fn test_parse_missing_file_is_empty() {
    let temp = tempfile::tempdir().unwrap();
    let manifest = Manifest::parse(temp.path().join(".env.example")).unwrap();
    assert!(manifest.is_empty());
}

#[test]
fn test_parse_unreadable_path_is_error() {
    let temp = tempfile::tempdir().unwrap();
    // A directory exists but cannot be read as text
    let result = Manifest::parse(temp.path());
    assert!(result.is_err());
}

// =============================================================================
// Sync writer
// =============================================================================

#[test]
fn test_sync_flags_from_switches() {
    assert_eq!(SyncFlags::from_switches(false, false, false), SyncFlags::empty());
    assert_eq!(
        SyncFlags::from_switches(true, false, true),
        SyncFlags::APPEND_MISSING | SyncFlags::ANNOTATE
    );
    assert_eq!(
        SyncFlags::from_switches(false, true, false),
        SyncFlags::REMOVE_UNUSED
    );
}

#[test]
fn test_append_into_absent_file() {
    let temp = tempfile::tempdir().unwrap();
    let missing = [variable("API_KEY", &[("a.ts", 1)]), variable("PORT", &[("b.ts", 2)])];
    let (content, report) = sync_in(&temp, None, &missing, &[], SyncFlags::APPEND_MISSING);

    assert_eq!(content, "API_KEY=\n\nPORT=\n");
    assert_eq!(report.added, vec!["API_KEY", "PORT"]);
    assert!(report.removed.is_empty());
}

#[test]
fn test_append_with_comments() {
    let temp = tempfile::tempdir().unwrap();
    let missing = [
        variable("PORT", &[("a.ts", 5)]),
        variable("API_KEY", &[("src/x.ts", 1), ("src/y.ts", 9), ("src/z.ts", 3)]),
    ];
    let (content, _) = sync_in(
        &temp,
        Some("EXISTING=1\n"),
        &missing,
        &[],
        SyncFlags::APPEND_MISSING | SyncFlags::ANNOTATE,
    );

    insta::assert_snapshot!(content, @r"
    EXISTING=1

    # Used in a.ts:5
    PORT=

    # Used in src/x.ts:1
    # Also used in 2 other location(s)
    API_KEY=
    ");
}

#[test]
fn test_append_without_trailing_newline() {
    let temp = tempfile::tempdir().unwrap();
    let missing = [variable("PORT", &[("a.ts", 5)])];
    let (content, _) = sync_in(&temp, Some("A=1"), &missing, &[], SyncFlags::APPEND_MISSING);
    assert_eq!(content, "A=1\n\nPORT=\n");
}

#[test]
fn test_append_never_doubles_blank_line() {
    let temp = tempfile::tempdir().unwrap();
    let missing = [variable("PORT", &[("a.ts", 5)])];
    let (content, _) = sync_in(&temp, Some("A=1\n\n"), &missing, &[], SyncFlags::APPEND_MISSING);
    assert_eq!(content, "A=1\n\nPORT=\n");
}

#[test]
fn test_append_skips_already_declared() {
    let temp = tempfile::tempdir().unwrap();
    let missing = [variable("PORT", &[("a.ts", 5)]), variable("PORT", &[("b.ts", 1)])];
    let (content, report) = sync_in(
        &temp,
        Some("HOST=x\n"),
        &missing,
        &[],
        SyncFlags::APPEND_MISSING,
    );
    assert_eq!(content, "HOST=x\n\nPORT=\n");
    assert_eq!(report.added, vec!["PORT"]);

    let again = sync_manifest(
        &temp.path().join(".env.example"),
        &missing,
        &[],
        SyncFlags::APPEND_MISSING,
    )
    .unwrap();
    assert!(again.is_empty());
}

#[test]
fn test_remove_unused() {
    let temp = tempfile::tempdir().unwrap();
    let (content, report) = sync_in(
        &temp,
        Some("# keep\nAPI_KEY=1\nOLD_VAR=2\n  DEPRECATED_KEY = 3\nPORT=4\n"),
        &[],
        &["OLD_VAR", "DEPRECATED_KEY"],
        SyncFlags::REMOVE_UNUSED,
    );
    assert_eq!(content, "# keep\nAPI_KEY=1\nPORT=4\n");
    assert_eq!(report.removed, vec!["OLD_VAR", "DEPRECATED_KEY"]);
}

#[test]
fn test_remove_leaves_commented_declarations() {
    let temp = tempfile::tempdir().unwrap();
    let (content, report) = sync_in(
        &temp,
        Some("# OLD_VAR=2\nOLD_VAR=2\n"),
        &[],
        &["OLD_VAR"],
        SyncFlags::REMOVE_UNUSED,
    );
    assert_eq!(content, "# OLD_VAR=2\n");
    assert_eq!(report.removed, vec!["OLD_VAR"]);
}

#[test]
fn test_remove_reports_duplicated_key_once() {
    let temp = tempfile::tempdir().unwrap();
    let (content, report) = sync_in(
        &temp,
        Some("OLD_VAR=1\nKEEP=2\nOLD_VAR=3\n"),
        &[],
        &["OLD_VAR"],
        SyncFlags::REMOVE_UNUSED,
    );
    assert_eq!(content, "KEEP=2\n");
    assert_eq!(report.removed, vec!["OLD_VAR"]);
}

#[test]
fn test_append_keeps_crlf_line_endings() {
    let temp = tempfile::tempdir().unwrap();
    let missing = [
        variable("PORT", &[("a.ts", 5), ("b.ts", 1)]),
        variable("HOST", &[("a.ts", 6)]),
    ];
    let (content, _) = sync_in(
        &temp,
        Some("# header\r\nOLD_VAR=1\r\nA=1"),
        &missing,
        &["OLD_VAR"],
        SyncFlags::all(),
    );
    assert_eq!(
        content,
        "# header\r\nA=1\r\n\r\n# Used in a.ts:5\r\n# Also used in 1 other location(s)\r\nPORT=\r\n\r\n# Used in a.ts:6\r\nHOST=\r\n"
    );
    assert!(!content.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_remove_then_append() {
    let temp = tempfile::tempdir().unwrap();
    let missing = [variable("NEW_VAR", &[("a.ts", 1)])];
    let (content, report) = sync_in(
        &temp,
        Some("OLD_VAR=1\nKEEP=2\n"),
        &missing,
        &["OLD_VAR"],
        SyncFlags::APPEND_MISSING | SyncFlags::REMOVE_UNUSED,
    );
    assert_eq!(content, "KEEP=2\n\nNEW_VAR=\n");
    insta::assert_debug_snapshot!(report, @r#"
    SyncReport {
        added: [
            "NEW_VAR",
        ],
        removed: [
            "OLD_VAR",
        ],
    }
    "#);
}

#[test]
fn test_flags_gate_each_action() {
    let temp = tempfile::tempdir().unwrap();
    let missing = [variable("NEW_VAR", &[("a.ts", 1)])];
    let (content, report) = sync_in(
        &temp,
        Some("OLD_VAR=1\n"),
        &missing,
        &["OLD_VAR"],
        SyncFlags::empty(),
    );
    assert_eq!(content, "OLD_VAR=1\n");
    assert!(report.is_empty());
}

#[test]
fn test_unchanged_sync_does_not_create_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join(".env.example");
    let report = sync_manifest(&path, &[], &[], SyncFlags::all()).unwrap();
    assert!(report.is_empty());
    assert!(!path.exists());
}

// =============================================================================
// Example creation
// =============================================================================

#[test]
fn test_create_example() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join(".env.example");

    assert!(create_example(&path).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), EXAMPLE_HEADER);
    assert!(Manifest::parse(&path).unwrap().is_empty());
}

#[test]
fn test_create_example_refuses_existing() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join(".env.example");
    std::fs::write(&path, "API_KEY=\n").unwrap();

    assert!(!create_example(&path).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "API_KEY=\n");
}
