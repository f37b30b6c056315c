// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Example manifest rewriting.
//!
//! ```text
//! read (absent = "")
//!   |
//!   v  REMOVE_UNUSED: drop declarations of unused keys
//! filtered content
//!   |
//!   v  APPEND_MISSING: one block per missing key not yet declared
//!      +--------------------------------------+
//!      | (blank line)                         |
//!      | # Used in src/app.ts:5      ANNOTATE |
//!      | # Also used in 2 other location(s)   |
//!      | PORT=                                |
//!      +--------------------------------------+
//!   |
//!   v
//! write whole file
//! ```
//!
//! Blocks are separated from each other and from earlier content by exactly
//! one blank line. Appended lines use CRLF when the file already does.

use bitflags::bitflags;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{Manifest, declaration_key};
use crate::error::EnvoyResult;
use crate::scan::DiscoveredVariable;
use crate::utility::fs;

/// Content of a freshly created example manifest.
pub const EXAMPLE_HEADER: &str = "# Environment Variables\n# Add your environment variables here\n";

bitflags! {
    /// What a sync run may change in the example manifest.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SyncFlags: u8 {
        /// Append a `NAME=` declaration for every missing variable.
        const APPEND_MISSING = 0x01;

        /// Delete declarations of variables no longer referenced.
        const REMOVE_UNUSED = 0x02;

        /// Precede appended declarations with their first usage.
        const ANNOTATE = 0x04;
    }
}

impl SyncFlags {
    /// Builds flags from the `sync` command switches.
    #[must_use]
    pub fn from_switches(auto: bool, remove: bool, comments: bool) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::APPEND_MISSING, auto);
        flags.set(Self::REMOVE_UNUSED, remove);
        flags.set(Self::ANNOTATE, comments);
        flags
    }
}

/// Keys changed by a sync run, in the order they were applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl SyncReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Rewrites the example manifest at `path`.
///
/// The file is only written when something changed.
///
/// # Errors
///
/// Returns `FsError::IoError` if the manifest cannot be read or written.
pub fn sync_manifest(
    path: &Path,
    missing: &[DiscoveredVariable],
    unused: &[String],
    flags: SyncFlags,
) -> EnvoyResult<SyncReport> {
    let original = fs::read_optional(path)?.unwrap_or_default();
    let eol = line_ending(&original);
    let mut report = SyncReport::default();

    let mut content = if flags.contains(SyncFlags::REMOVE_UNUSED) && !unused.is_empty() {
        remove_declarations(&original, unused, path, &mut report)
    } else {
        original
    };

    if flags.contains(SyncFlags::APPEND_MISSING) {
        let present = Manifest::parse_str(&content);
        let mut appended: HashSet<&str> = HashSet::new();
        for variable in missing {
            if present.contains_key(&variable.name) || !appended.insert(&variable.name) {
                continue;
            }
            let block = declaration_block(variable, flags.contains(SyncFlags::ANNOTATE), eol);
            append_block(&mut content, &block, eol);
            debug!(path = %path.display(), "Added {}", variable.name);
            report.added.push(variable.name.clone());
        }
    }

    if report.is_empty() {
        debug!(path = %path.display(), "manifest unchanged");
        return Ok(report);
    }

    fs::write(path, &content)?;
    debug!(
        path = %path.display(),
        added = report.added.len(),
        removed = report.removed.len(),
        "manifest rewritten"
    );
    Ok(report)
}

fn remove_declarations(
    content: &str,
    unused: &[String],
    path: &Path,
    report: &mut SyncReport,
) -> String {
    let unused: HashSet<&str> = unused.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    content
        .split('\n')
        .filter(|line| match declaration_key(line) {
            Some(key) if unused.contains(key) => {
                // Every duplicate line goes; the key is reported once
                if seen.insert(key) {
                    info!(path = %path.display(), "Removed {key}");
                    report.removed.push(key.to_string());
                }
                false
            }
            _ => true,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line ending already used by `content`, `\n` for a new file.
fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

fn declaration_block(variable: &DiscoveredVariable, annotate: bool, eol: &str) -> String {
    let mut block = String::new();
    if annotate && let Some(first) = variable.first_location() {
        let _ = write!(block, "# Used in {}:{}{eol}", first.file, first.line);
        let others = variable.locations.len().saturating_sub(1);
        if others > 0 {
            let _ = write!(block, "# Also used in {others} other location(s){eol}");
        }
    }
    let _ = write!(block, "{}={eol}", variable.name);
    block
}

fn append_block(content: &mut String, block: &str, eol: &str) {
    if !content.is_empty() {
        if !content.ends_with('\n') {
            content.push_str(eol);
        }
        let blank_line = format!("{eol}{eol}");
        if !(content.as_str() == eol || content.ends_with(&blank_line)) {
            content.push_str(eol);
        }
    }
    content.push_str(block);
}

/// Creates the example manifest at `path` with a short header.
///
/// Returns false, and changes nothing, if the file already exists.
///
/// # Errors
///
/// Returns `FsError::IoError` if the file cannot be written.
pub fn create_example(path: &Path) -> EnvoyResult<bool> {
    if fs::exists(path) {
        warn!("{} already exists", path.display());
        return Ok(false);
    }
    fs::write(path, EXAMPLE_HEADER)?;
    info!("Created {}", path.display());
    Ok(true)
}
