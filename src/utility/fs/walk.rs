// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{EnvoyResult, ScanError};
use bon::Builder;
use flume::bounded;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use wax::{Glob, Program as _};

/// Source file extensions considered by the scanner.
pub const SOURCE_EXTENSIONS: [&str; 6] = ["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// Directory names never descended into.
pub const DEFAULT_SKIP_DIRS: [&str; 5] = ["node_modules", "dist", "build", ".git", "coverage"];

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = false)]
    respect_gitignore: bool,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
    /// Glob patterns, relative to the walk root, of paths to leave out
    #[builder(setters(name = with_exclude), default)]
    exclude: Vec<String>,
    /// Accepted file extensions (empty = any)
    #[builder(setters(name = with_extensions), default)]
    extensions: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Returns whether to include hidden files/directories.
    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Returns whether to respect .gitignore files.
    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    /// Returns the skip directories list.
    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Returns the exclude glob patterns.
    #[must_use]
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Returns the accepted file extensions.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Creates options for scanning ECMAScript-family sources.
    ///
    /// - Only `ts`, `tsx`, `js`, `jsx`, `mjs` and `cjs` files
    /// - Skips `node_modules`, build output, `.git` and coverage directories
    /// - Adds the caller's exclude globs on top
    #[must_use]
    pub fn for_source_scan(exclude: &[String]) -> Self {
        Self::builder()
            .with_skip_dirs(DEFAULT_SKIP_DIRS.iter().map(ToString::to_string).collect())
            .with_extensions(SOURCE_EXTENSIONS.iter().map(ToString::to_string).collect())
            .with_exclude(exclude.to_vec())
            .build()
    }
}

/// Compiled exclude globs.
///
/// A pattern such as `dist/**` excludes every file below `dist`; the `dist`
/// prefix is kept as a separate directory glob so whole subtrees are pruned
/// before the walker descends into them.
#[derive(Debug, Default)]
pub struct ExcludeSet {
    files: Vec<Glob<'static>>,
    dirs: Vec<Glob<'static>>,
}

impl ExcludeSet {
    /// Compiles the given glob patterns.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidExclude` for the first pattern that is not a
    /// valid glob.
    pub fn new(patterns: &[String]) -> EnvoyResult<Self> {
        let compile = |pattern: &str| {
            Glob::new(pattern)
                .map(Glob::into_owned)
                .map_err(|e| ScanError::InvalidExclude {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })
        };

        let mut set = Self::default();
        for pattern in patterns {
            let pattern = pattern.trim_start_matches("./");
            set.files.push(compile(pattern)?);
            if let Some(dir) = pattern.strip_suffix("/**")
                && !dir.is_empty()
            {
                set.dirs.push(compile(dir)?);
            }
        }
        Ok(set)
    }

    /// Returns true if the file at `rel_path` (relative to the walk root) is excluded.
    #[must_use]
    pub fn excludes_file(&self, rel_path: &Path) -> bool {
        self.files.iter().any(|glob| glob.is_match(rel_path))
    }

    /// Returns true if the directory at `rel_path` should not be descended into.
    #[must_use]
    pub fn excludes_dir(&self, rel_path: &Path) -> bool {
        self.dirs.iter().any(|glob| glob.is_match(rel_path))
    }

    /// Returns true if no pattern was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn has_accepted_extension(path: &Path, extensions: &[String]) -> bool {
    extensions.is_empty()
        || path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|accepted| accepted == ext))
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
pub(super) fn build_walker(
    root: &Path,
    options: &WalkOptions,
    exclude: Arc<ExcludeSet>,
) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.hidden(!options.include_hidden());

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());
    builder.require_git(false);

    // filter_entry is evaluated BEFORE descending
    let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
    let root_path = root.to_path_buf();
    builder.filter_entry(move |entry| {
        if !entry.file_type().is_some_and(|ft| ft.is_dir()) || entry.depth() == 0 {
            return true;
        }
        if let Some(name) = entry.file_name().to_str()
            && skip_dirs.iter().any(|skip| skip == name)
        {
            return false;
        }
        match entry.path().strip_prefix(&root_path) {
            Ok(rel_path) => !exclude.excludes_dir(rel_path),
            Err(_) => true,
        }
    });

    builder
}

/// Runs `f` on every eligible file using `ignore::WalkParallel`.
///
/// Each worker thread sends `(path, f(path))` through a bounded flume
/// channel; the results are collected once the walk finishes and returned
/// sorted by path, so callers can merge them deterministically on a single
/// thread.
///
/// # Errors
///
/// Returns an error if the root directory does not exist or an exclude
/// pattern is invalid.
///
/// # Example
/// ```no_run
/// use envoy_rs::utility::fs::walk::{parallel_map_files, WalkOptions};
///
/// let sizes = parallel_map_files(".", &WalkOptions::for_source_scan(&[]), |path| {
///     path.metadata().map(|m| m.len()).unwrap_or(0)
/// })?;
/// println!("Scanned {} files", sizes.len());
/// # Ok::<(), envoy_rs::error::EnvoyError>(())
/// ```
pub fn parallel_map_files<P, T, F>(
    root: P,
    options: &WalkOptions,
    f: F,
) -> EnvoyResult<Vec<(PathBuf, T)>>
where
    P: AsRef<Path>,
    T: Send,
    F: Fn(&Path) -> T + Send + Sync,
{
    let root = root.as_ref();

    if !root.is_dir() {
        return Err(ScanError::RootNotFound {
            path: root.display().to_string(),
        }
        .into());
    }

    let exclude = Arc::new(ExcludeSet::new(options.exclude())?);
    let extensions: Arc<Vec<String>> = Arc::new(options.extensions().to_vec());
    let root_path = root.to_path_buf();

    // Bounded to keep memory flat on huge trees
    let (tx, rx) = bounded::<(PathBuf, T)>(1000);
    let f = &f;

    let builder = build_walker(root, options, Arc::clone(&exclude));
    let parallel = builder.build_parallel();

    std::thread::scope(|scope| {
        let collector = scope.spawn(move || rx.iter().collect::<Vec<_>>());

        parallel.run(|| {
            let tx = tx.clone();
            let exclude = Arc::clone(&exclude);
            let extensions = Arc::clone(&extensions);
            let root_path = root_path.clone();

            Box::new(move |entry_result| {
                match entry_result {
                    Ok(entry) => {
                        let path = entry.path();
                        if entry.file_type().is_some_and(|ft| ft.is_file())
                            && has_accepted_extension(path, &extensions)
                            && !path
                                .strip_prefix(&root_path)
                                .is_ok_and(|rel| exclude.excludes_file(rel))
                        {
                            let _ = tx.send((path.to_path_buf(), f(path)));
                        }
                    }
                    Err(e) => warn!(error = %e, "walk error"),
                }
                ignore::WalkState::Continue
            })
        });

        // Drop the last sender to signal completion
        drop(tx);
        let mut results = collector.join().unwrap_or_default();
        results.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(results)
    })
}

/// Finds every eligible file under `root`.
///
/// # Errors
///
/// Returns an error if the root directory does not exist or an exclude
/// pattern is invalid.
pub fn find_files<P: AsRef<Path>>(root: P, options: &WalkOptions) -> EnvoyResult<Vec<PathBuf>> {
    Ok(parallel_map_files(root, options, |_| ())?
        .into_iter()
        .map(|(path, ())| path)
        .collect())
}
