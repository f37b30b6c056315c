// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reconciliation of discovered variables against the manifests.
//!
//! ```text
//! DiscoveredSet ----+
//!                   |
//! .env.example -----+--> reconcile() --> AnalysisResult
//!                   |                      missing  (not in example)
//! .env -------------+                      synced   (in example)
//!                                          unused   (example only)
//!                                          total
//! ```
//!
//! `in_env` is informational and never changes the classification.


use bon::Builder;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::EnvoyResult;
use crate::manifest::Manifest;
use crate::scan::{DiscoveredSet, DiscoveredVariable, ScanOptions, Scanner};

/// Default example manifest name.
pub const DEFAULT_EXAMPLE_FILE: &str = ".env.example";

/// Default local environment file name.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Classification of every discovered and declared variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub missing: Vec<DiscoveredVariable>,
    pub unused: Vec<String>,
    pub synced: Vec<DiscoveredVariable>,
    /// Number of distinct discovered names.
    pub total: usize,
}

impl AnalysisResult {
    /// Returns true if anything is missing from or unused in the example.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.missing.is_empty() || !self.unused.is_empty()
    }
}

/// Classifies `discovered` against the example and env manifests.
///
/// Output lists follow the input iteration order.
#[must_use]
pub fn reconcile(discovered: DiscoveredSet, example: &Manifest, env: &Manifest) -> AnalysisResult {
    let mut result = AnalysisResult {
        total: discovered.len(),
        ..AnalysisResult::default()
    };

    result.unused = example
        .keys()
        .filter(|key| !discovered.contains(key))
        .map(ToString::to_string)
        .collect();

    for mut variable in discovered {
        variable.in_example = example.contains_key(&variable.name);
        variable.in_env = env.contains_key(&variable.name);
        if variable.in_example {
            result.synced.push(variable);
        } else {
            result.missing.push(variable);
        }
    }

    result
}

/// Inputs of a full analysis run.
#[derive(Debug, Clone, Builder)]
pub struct AnalyzeOptions {
    /// Directory to scan; relative manifest paths are resolved against it.
    #[builder(into)]
    root: PathBuf,
    #[builder(into)]
    project_root: Option<PathBuf>,
    #[builder(default)]
    exclude: Vec<String>,
    #[builder(into, default = PathBuf::from(DEFAULT_EXAMPLE_FILE))]
    example_file: PathBuf,
    #[builder(into, default = PathBuf::from(DEFAULT_ENV_FILE))]
    env_file: PathBuf,
    #[builder(default = false)]
    include_hidden: bool,
    #[builder(default = false)]
    respect_gitignore: bool,
}

impl AnalyzeOptions {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Example manifest path, resolved against the scan root.
    #[must_use]
    pub fn example_path(&self) -> PathBuf {
        self.root.join(&self.example_file)
    }

    /// Local env file path, resolved against the scan root.
    #[must_use]
    pub fn env_path(&self) -> PathBuf {
        self.root.join(&self.env_file)
    }

    fn scan_options(&self) -> ScanOptions {
        ScanOptions::builder()
            .root(self.root.clone())
            .maybe_project_root(self.project_root.clone())
            .exclude(self.exclude.clone())
            .include_hidden(self.include_hidden)
            .respect_gitignore(self.respect_gitignore)
            .build()
    }
}

/// Scans the sources and reconciles them with both manifests.
///
/// # Errors
///
/// Returns an error if the scan root is missing, an exclude glob is invalid,
/// or a manifest exists but cannot be read.
pub fn analyze(options: &AnalyzeOptions) -> EnvoyResult<AnalysisResult> {
    let discovered = Scanner::new()?.scan(&options.scan_options())?;
    let example = Manifest::parse(options.example_path())?;
    let env = Manifest::parse(options.env_path())?;
    debug!(
        discovered = discovered.len(),
        example_keys = example.len(),
        env_keys = env.len(),
        "reconciling"
    );
    Ok(reconcile(discovered, &example, &env))
}
