// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Static discovery of environment variable references.
//!
//! ```text
//! scan(root, exclude)
//!   |
//!   v
//! parallel_map_files (ignore + flume workers)
//!   per file: read -> PatternSet::find_all
//!                  -> DestructuringExtractor::find_all
//!                  -> LineIndex (line, column, snippet)
//!   |
//!   v  sorted by path, merged on one thread
//! DiscoveredSet  name -> [VariableReference]
//! ```
//!
//! Scanning is purely textual: references in comments and strings count.
//! Invalid UTF-8 is decoded lossily; a file that cannot be read at all is
//! logged and skipped. Destructuring references are
//! dropped when the same name is already recorded on that file and line;
//! pattern references are always recorded.

pub mod destructure;
pub mod patterns;
pub mod position;
pub mod types;

#[cfg(test)]
mod tests;

use bon::Builder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::error::EnvoyResult;
use crate::utility::fs;
use crate::utility::fs::root::{display_relative, find_project_root};
use crate::utility::fs::walk::{WalkOptions, parallel_map_files};

use destructure::{DestructuringExtractor, EnvSource};
use patterns::{PatternKind, PatternMatch, PatternSet};
use position::LineIndex;
pub use types::{DiscoveredSet, DiscoveredVariable, VariableReference};

/// Where a reference was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOrigin {
    Pattern(PatternKind),
    Destructuring(EnvSource),
}

/// A reference found in one file, before aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    pub name: String,
    pub origin: MatchOrigin,
    pub line: usize,
    pub column: usize,
    pub snippet: String,
}

/// Options for a project scan.
#[derive(Debug, Clone, Builder)]
pub struct ScanOptions {
    /// Directory to scan.
    #[builder(into)]
    root: PathBuf,
    /// Root that reported paths are relative to (default: detected from `root`).
    #[builder(into)]
    project_root: Option<PathBuf>,
    /// Extra glob patterns to leave out, relative to `root`.
    #[builder(default)]
    exclude: Vec<String>,
    #[builder(default = false)]
    include_hidden: bool,
    #[builder(default = false)]
    respect_gitignore: bool,
}

impl ScanOptions {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root that reported paths are relative to.
    #[must_use]
    pub fn project_root(&self) -> PathBuf {
        self.project_root
            .clone()
            .unwrap_or_else(|| find_project_root(&self.root))
    }

    #[must_use]
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    fn walk_options(&self) -> WalkOptions {
        let base = WalkOptions::for_source_scan(&self.exclude);
        WalkOptions::builder()
            .with_skip_dirs(base.skip_dirs().to_vec())
            .with_extensions(base.extensions().to_vec())
            .with_exclude(base.exclude().to_vec())
            .with_include_hidden(self.include_hidden)
            .with_respect_gitignore(self.respect_gitignore)
            .build()
    }
}

/// Source scanner holding the compiled recognizers.
#[derive(Debug, Clone)]
pub struct Scanner {
    patterns: PatternSet,
    destructuring: DestructuringExtractor,
}

impl Scanner {
    /// Compiles the recognizers.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidPattern` if a recognizer fails to compile.
    pub fn new() -> EnvoyResult<Self> {
        Ok(Self {
            patterns: PatternSet::new()?,
            destructuring: DestructuringExtractor::new()?,
        })
    }

    /// Scans every eligible file below `options.root()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist or an exclude pattern is
    /// invalid. Unreadable files are not errors.
    pub fn scan(&self, options: &ScanOptions) -> EnvoyResult<DiscoveredSet> {
        let project_root = options.project_root();
        debug!(
            root = %options.root().display(),
            project_root = %project_root.display(),
            exclude = ?options.exclude(),
            "scanning sources"
        );

        let results = parallel_map_files(options.root(), &options.walk_options(), |path| {
            fs::read_lossy(path).map(|text| self.find_matches(&text))
        })?;

        Ok(merge_results(results, &project_root))
    }

    /// Scans one in-memory file and merges its references into `discovered`.
    pub fn scan_text(&self, file: &str, text: &str, discovered: &mut DiscoveredSet) {
        merge_file_matches(discovered, file, self.find_matches(text));
    }

    /// Runs every recognizer, then the destructuring extractor, over `text`.
    #[must_use]
    pub fn find_matches(&self, text: &str) -> Vec<FileMatch> {
        let lines = LineIndex::new(text);
        let to_match = |origin: MatchOrigin, m: PatternMatch<'_>| {
            let (line, column) = lines.position(m.offset);
            FileMatch {
                name: m.name.to_string(),
                origin,
                line,
                column,
                snippet: lines.line_text(line).trim().to_string(),
            }
        };

        let mut matches: Vec<FileMatch> = self
            .patterns
            .find_all(text)
            .into_iter()
            .map(|(kind, m)| to_match(MatchOrigin::Pattern(kind), m))
            .collect();
        matches.extend(
            self.destructuring
                .find_all(text)
                .into_iter()
                .map(|(source, m)| to_match(MatchOrigin::Destructuring(source), m)),
        );
        matches
    }
}

/// Merges per-file results in order. A file that could not be read is
/// logged and skipped.
fn merge_results(
    results: Vec<(PathBuf, std::io::Result<Vec<FileMatch>>)>,
    project_root: &Path,
) -> DiscoveredSet {
    let mut discovered = DiscoveredSet::new();
    let mut files_read = 0usize;
    for (path, result) in results {
        let file = display_relative(&path, project_root);
        match result {
            Ok(matches) => {
                files_read += 1;
                trace!(file = %file, matches = matches.len(), "scanned file");
                merge_file_matches(&mut discovered, &file, matches);
            }
            Err(e) => warn!("Failed to read {file}: {e}"),
        }
    }

    debug!(
        files = files_read,
        variables = discovered.len(),
        "scan complete"
    );
    discovered
}

fn merge_file_matches(discovered: &mut DiscoveredSet, file: &str, matches: Vec<FileMatch>) {
    for m in matches {
        let reference = VariableReference {
            file: file.to_string(),
            line: m.line,
            column: m.column,
            snippet: m.snippet,
        };
        match m.origin {
            MatchOrigin::Pattern(_) => discovered.record(&m.name, reference),
            MatchOrigin::Destructuring(_) => {
                discovered.record_unique_line(&m.name, reference);
            }
        }
    }
}

/// Scans `root` with the default options plus `exclude`.
///
/// # Errors
///
/// See [`Scanner::scan`].
pub fn scan<P: AsRef<Path>>(root: P, exclude: &[String]) -> EnvoyResult<DiscoveredSet> {
    let options = ScanOptions::builder()
        .root(root.as_ref())
        .exclude(exclude.to_vec())
        .build();
    Scanner::new()?.scan(&options)
}
