// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project root detection.
//!
//! ```text
//! /home/me/app/            <- package.json here: project root
//!   packages/web/src/      <- start
//! ```

use std::path::{Path, PathBuf};

/// File whose presence marks a project root.
pub const PROJECT_MANIFEST: &str = "package.json";

/// Returns the nearest ancestor of `start` (inclusive) containing `package.json`.
///
/// Falls back to `start` itself when no ancestor qualifies.
#[must_use]
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_MANIFEST).is_file())
        .unwrap_or(start)
        .to_path_buf()
}

/// Formats `path` relative to `root` with forward slashes.
///
/// Paths outside `root` are returned unchanged.
#[must_use]
pub fn display_relative(path: &Path, root: &Path) -> String {
    let Ok(rel) = path.strip_prefix(root) else {
        return path.display().to_string();
    };
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
