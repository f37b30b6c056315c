// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::destructure::{DestructuringExtractor, EnvSource, parse_binding_list};
use super::patterns::{PatternKind, PatternSet, is_identifier};
use super::position::LineIndex;
use super::{DiscoveredSet, MatchOrigin, ScanOptions, Scanner, VariableReference, merge_results};
use std::io;
use std::path::Path;
use tempfile::TempDir;

fn scanner() -> Scanner {
    Scanner::new().expect("recognizers compile")
}

fn scan_one(text: &str) -> DiscoveredSet {
    let mut discovered = DiscoveredSet::new();
    scanner().scan_text("src/config.ts", text, &mut discovered);
    discovered
}

fn names(discovered: &DiscoveredSet) -> Vec<&str> {
    discovered.names().collect()
}

fn reference(file: &str, line: usize) -> VariableReference {
    VariableReference {
        file: file.to_string(),
        line,
        column: 0,
        snippet: String::new(),
    }
}

// =============================================================================
// Pattern Set
// =============================================================================

#[test]
fn test_pattern_set_compiles_all_kinds() {
    let set = PatternSet::new().unwrap();
    assert_eq!(set.len(), PatternKind::ALL.len());
}

#[test]
fn test_process_env_property() {
    let discovered = scan_one(
        "
        const apiKey = process.env.API_KEY;
        const dbUrl = process.env.DATABASE_URL;
        ",
    );
    assert_eq!(names(&discovered), vec!["API_KEY", "DATABASE_URL"]);
}

#[test]
fn test_process_env_index_both_quotes() {
    let discovered = scan_one(
        r#"
        const apiKey = process.env['API_KEY'];
        const dbUrl = process.env["DATABASE_URL"];
        "#,
    );
    assert_eq!(names(&discovered), vec!["API_KEY", "DATABASE_URL"]);
}

#[test]
fn test_import_meta_env() {
    let discovered = scan_one(
        r#"
        const apiUrl = import.meta.env.VITE_API_URL;
        const mode = import.meta.env["VITE_MODE"];
        "#,
    );
    assert_eq!(names(&discovered), vec!["VITE_API_URL", "VITE_MODE"]);
}

#[test]
fn test_deno_and_powershell() {
    let discovered = scan_one(
        r#"
        const token = Deno.env.get("DENO_TOKEN");
        // $env:APPDATA is read by the install script
        "#,
    );
    assert_eq!(names(&discovered), vec!["DENO_TOKEN", "APPDATA"]);
}

#[test]
fn test_prefix_is_case_insensitive() {
    let discovered = scan_one("const a = PROCESS.ENV.UPPER_PREFIX; const b = Process.Env.MIXED;");
    assert_eq!(names(&discovered), vec!["UPPER_PREFIX", "MIXED"]);
}

#[test]
fn test_interpolation_counted_once() {
    let discovered = scan_one("const url = `${process.env.API_HOST}:${process.env.API_PORT}`;");
    assert_eq!(names(&discovered), vec!["API_HOST", "API_PORT"]);
    assert_eq!(discovered.get("API_HOST").unwrap().locations.len(), 1);
}

#[test]
fn test_comments_and_strings_are_not_excluded() {
    let discovered = scan_one(
        r#"
        // process.env.IN_COMMENT
        const doc = "set process.env.IN_STRING first";
        "#,
    );
    assert_eq!(names(&discovered), vec!["IN_COMMENT", "IN_STRING"]);
}

#[test]
fn test_no_references() {
    let discovered = scan_one(
        "
        export function add(a: number, b: number) {
            return a + b;
        }
        ",
    );
    assert!(discovered.is_empty());
}

#[test]
fn test_pattern_offsets_point_at_match_start() {
    let set = PatternSet::new().unwrap();
    let text = "x = process.env.PORT";
    let found = set.find_all(text);
    assert_eq!(found.len(), 1);
    let (kind, m) = found[0];
    assert_eq!(kind, PatternKind::ProcessEnvProperty);
    assert_eq!(m.name, "PORT");
    assert_eq!(&text[m.offset..], "process.env.PORT");
}

#[test]
fn test_is_identifier() {
    assert!(is_identifier("API_KEY"));
    assert!(is_identifier("_private"));
    assert!(is_identifier("v2"));
    assert!(!is_identifier("2FA"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("my-var"));
    assert!(!is_identifier("rest }"));
}

// =============================================================================
// Destructuring Extractor
// =============================================================================

#[test]
fn test_destructuring_basic() {
    let discovered = scan_one("const { API_KEY, DATABASE_URL, REDIS_URL } = process.env;");
    assert_eq!(names(&discovered), vec!["API_KEY", "DATABASE_URL", "REDIS_URL"]);
}

#[test]
fn test_destructuring_rest_is_skipped() {
    let discovered = scan_one("const { API_KEY, ...rest } = process.env;");
    assert_eq!(names(&discovered), vec!["API_KEY"]);
    assert!(!discovered.contains("rest"));
}

#[test]
fn test_destructuring_rename_and_default() {
    let discovered = scan_one(
        "let { PORT: port, HOST = 'localhost', LOG_LEVEL: level = 'info' } = import.meta.env",
    );
    assert_eq!(names(&discovered), vec!["PORT", "HOST", "LOG_LEVEL"]);
}

#[test]
fn test_destructuring_multiline() {
    let text = "const {\n  API_KEY,\n  SECRET,\n} = process.env;\n";
    let discovered = scan_one(text);
    assert_eq!(names(&discovered), vec!["API_KEY", "SECRET"]);

    let secret = &discovered.get("SECRET").unwrap().locations[0];
    assert_eq!(secret.line, 3);
    assert_eq!(secret.column, 2);
    assert_eq!(secret.snippet, "SECRET,");
}

#[test]
fn test_destructuring_from_property_is_ignored() {
    let extractor = DestructuringExtractor::new().unwrap();
    assert!(extractor.find_all("const { a } = process.env.CONFIG;").is_empty());
    assert!(extractor.find_all("const { a } = process.environment;").is_empty());
}

#[test]
fn test_destructuring_reports_source() {
    let extractor = DestructuringExtractor::new().unwrap();
    let found = extractor.find_all("var { A } = process.env\nvar { B } = import.meta.env\n");
    let sources: Vec<(EnvSource, &str)> = found.iter().map(|(s, m)| (*s, m.name)).collect();
    assert_eq!(
        sources,
        vec![(EnvSource::ProcessEnv, "A"), (EnvSource::ImportMetaEnv, "B")]
    );
}

#[test]
fn test_parse_binding_list_first_occurrence() {
    // PORT is first found inside REPORT: a known approximation
    let parsed = parse_binding_list(" REPORT, PORT ");
    insta::assert_debug_snapshot!(parsed, @r#"
    [
        (
            "REPORT",
            1,
        ),
        (
            "PORT",
            3,
        ),
    ]
    "#);
}

#[test]
fn test_parse_binding_list_rejects_non_identifiers() {
    let parsed = parse_binding_list(" A, , 'quoted', B = 1, ...others ");
    let names: Vec<&str> = parsed.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["A", "B"]);
}

// =============================================================================
// Aggregation
// =============================================================================

#[test]
fn test_destructuring_dedup_against_same_line() {
    // Same name, same line, found by a pattern and by destructuring
    let discovered =
        scan_one("const { API_KEY } = process.env; console.log(process.env.API_KEY);");
    assert_eq!(discovered.get("API_KEY").unwrap().locations.len(), 1);
}

#[test]
fn test_pattern_matches_are_not_deduplicated() {
    let discovered = scan_one("check(process.env.API_KEY, process.env.API_KEY);");
    let locations = &discovered.get("API_KEY").unwrap().locations;
    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].line, locations[1].line);
    assert_ne!(locations[0].column, locations[1].column);
}

#[test]
fn test_locations_accumulate_across_files() {
    let scanner = scanner();
    let mut discovered = DiscoveredSet::new();
    scanner.scan_text("src/config.ts", "const key = process.env.API_KEY;", &mut discovered);
    scanner.scan_text("src/utils.ts", "const key2 = process.env.API_KEY;", &mut discovered);

    assert_eq!(discovered.len(), 1);
    let files: Vec<&str> = discovered.get("API_KEY").unwrap().locations.iter().map(|l| l.file.as_str()).collect();
    assert_eq!(files, vec!["src/config.ts", "src/utils.ts"]);
}

#[test]
fn test_location_line_column_snippet() {
    let discovered = scan_one(
        "
const port = 3000;
const apiKey = process.env.API_KEY;
const dbUrl = process.env.DATABASE_URL;
            ",
    );
    let location = &discovered.get("API_KEY").unwrap().locations[0];
    insta::assert_debug_snapshot!(location, @r#"
    VariableReference {
        file: "src/config.ts",
        line: 3,
        column: 15,
        snippet: "const apiKey = process.env.API_KEY;",
    }
    "#);
}

#[test]
fn test_scanner_flags_start_false() {
    let discovered = scan_one("process.env.A");
    let variable = discovered.get("A").unwrap();
    assert!(!variable.in_example);
    assert!(!variable.in_env);
}

#[test]
fn test_match_origins_order() {
    let matches = scanner().find_matches("const { A } = process.env;\nprocess.env.B\n");
    let origins: Vec<MatchOrigin> = matches.iter().map(|m| m.origin).collect();
    assert_eq!(
        origins,
        vec![
            MatchOrigin::Pattern(PatternKind::ProcessEnvProperty),
            MatchOrigin::Destructuring(EnvSource::ProcessEnv),
        ]
    );
}

#[test]
fn test_record_unique_line() {
    let mut set = DiscoveredSet::new();
    set.record("A", reference("a.ts", 1));
    assert!(!set.record_unique_line("A", reference("a.ts", 1)));
    assert!(set.record_unique_line("A", reference("a.ts", 2)));
    assert!(set.record_unique_line("A", reference("b.ts", 1)));
    assert_eq!(set.get("A").unwrap().locations.len(), 3);
}

// =============================================================================
// Line index
// =============================================================================

#[test]
fn test_line_index_positions() {
    let text = "a\nbc process.env.X\r\nlast";
    let index = LineIndex::new(text);
    assert_eq!(index.len(), 3);
    assert_eq!(index.position(0), (1, 0));
    assert_eq!(index.position(5), (2, 3));
    assert_eq!(index.line_text(2), "bc process.env.X");
    assert_eq!(index.line_text(3), "last");
    assert_eq!(index.line_text(9), "");
}

#[test]
fn test_line_index_counts_chars() {
    let text = "const é = process.env.ACCENT;";
    let offset = text.find("process").unwrap();
    assert_eq!(LineIndex::new(text).position(offset), (1, 10));
}

// =============================================================================
// Directory scan
// =============================================================================

#[test]
fn test_scan_directory_relative_paths() {
    let temp: TempDir = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("package.json"), "{}").unwrap();
    std::fs::create_dir_all(temp.path().join("src/lib")).unwrap();
    std::fs::write(temp.path().join("src/lib/db.ts"), "process.env.DATABASE_URL").unwrap();
    std::fs::write(temp.path().join("src/app.js"), "process.env.API_KEY").unwrap();
    std::fs::create_dir_all(temp.path().join("node_modules/x")).unwrap();
    std::fs::write(temp.path().join("node_modules/x/i.js"), "process.env.VENDOR").unwrap();

    let options = ScanOptions::builder().root(temp.path()).build();
    let discovered = scanner().scan(&options).unwrap();

    let summary: Vec<(&str, &str)> = discovered
        .iter()
        .map(|v| (v.name.as_str(), v.locations[0].file.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![("API_KEY", "src/app.js"), ("DATABASE_URL", "src/lib/db.ts")]
    );
}

#[test]
fn test_scan_options_walk_settings() {
    let options = ScanOptions::builder()
        .root("/project")
        .exclude(vec!["gen/**".to_string()])
        .include_hidden(true)
        .build();
    let walk = options.walk_options();

    assert!(walk.include_hidden());
    assert!(!walk.respect_gitignore());
    assert_eq!(walk.exclude(), ["gen/**"]);
    assert!(walk.skip_dirs().iter().any(|d| d == "node_modules"));
    assert_eq!(walk.extensions().len(), 6);
}

#[test]
fn test_scan_skips_unreadable_files() {
    let root = Path::new("/project");
    let results = vec![
        (
            root.join("bad.ts"),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        ),
        (
            root.join("good.ts"),
            Ok(scanner().find_matches("process.env.GOOD")),
        ),
    ];

    let discovered = merge_results(results, root);
    assert_eq!(names(&discovered), vec!["GOOD"]);
    assert_eq!(discovered.get("GOOD").unwrap().locations[0].file, "good.ts");
}

#[test]
fn test_scan_keeps_references_in_non_utf8_files() {
    let temp: TempDir = tempfile::tempdir().unwrap();
    // Latin-1 "café" in a comment
    std::fs::write(
        temp.path().join("legacy.js"),
        b"// caf\xE9\nconst key = process.env.API_KEY;\n",
    )
    .unwrap();
    std::fs::write(temp.path().join("good.ts"), "process.env.GOOD").unwrap();

    let options = ScanOptions::builder()
        .root(temp.path())
        .project_root(temp.path())
        .build();
    let discovered = scanner().scan(&options).unwrap();

    assert_eq!(names(&discovered), vec!["GOOD", "API_KEY"]);
    let location = &discovered.get("API_KEY").unwrap().locations[0];
    assert_eq!(location.file, "legacy.js");
    assert_eq!(location.line, 2);
}
