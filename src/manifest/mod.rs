// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `.env`-style manifests.
//!
//! ```text
//! # comment            ignored
//!                      ignored (blank)
//! API_KEY=secret       key "API_KEY", value "secret"
//!   PORT = 3000        key "PORT",    value " 3000"
//! not a declaration    skipped
//! ```
//!
//! A declaration is a trimmed line starting with `[A-Za-z_][A-Za-z0-9_]*`,
//! optional whitespace and `=`. The value is everything after the first `=`,
//! kept verbatim. A repeated key keeps its first position and takes the last
//! value.
//!
//! Reading goes through [`Manifest::parse`]; [`writer`] rewrites the example
//! manifest during `sync` and creates it during `init`.

pub mod writer;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::path::Path;

use crate::error::EnvoyResult;
use crate::utility::fs;

pub use writer::{EXAMPLE_HEADER, SyncFlags, SyncReport, create_example, sync_manifest};

/// One declared line of a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub key: String,
    pub value: String,
}

/// Declared keys of a manifest file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
    index: HashMap<String, usize>,
}

impl Manifest {
    /// Reads and parses a manifest file.
    ///
    /// A missing file yields an empty manifest.
    ///
    /// # Errors
    ///
    /// Returns `FsError::IoError` if the file exists but cannot be read.
    pub fn parse<P: AsRef<Path>>(path: P) -> EnvoyResult<Self> {
        Ok(fs::read_optional(path)?
            .map(|content| Self::parse_str(&content))
            .unwrap_or_default())
    }

    /// Parses manifest text. Malformed lines are skipped.
    #[must_use]
    pub fn parse_str(content: &str) -> Self {
        let mut manifest = Self::default();
        for line in content.lines() {
            let trimmed = line.trim();
            if let Some((key, value)) = split_declaration(trimmed) {
                manifest.insert(key, value);
            }
        }
        manifest
    }

    fn insert(&mut self, key: &str, value: &str) {
        match self.index.get(key) {
            Some(&i) => value.clone_into(&mut self.entries[i].value),
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push(ManifestEntry {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    /// Raw value declared for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&i| self.entries[i].value.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns the declared key of a manifest line, if it is a declaration.
///
/// Comment and blank lines never declare a key.
#[must_use]
pub fn declaration_key(line: &str) -> Option<&str> {
    split_declaration(line.trim()).map(|(key, _)| key)
}

fn split_declaration(trimmed: &str) -> Option<(&str, &str)> {
    let first = trimmed.chars().next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    let key_len = trimmed
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(trimmed.len());
    let (key, rest) = trimmed.split_at(key_len);
    let value = rest.trim_start().strip_prefix('=')?;
    Some((key, value))
}
