// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities: parallel source discovery and whole-file I/O.
//!
//! ```text
//! walk:  parallel_map_files()  ignore::WalkParallel + flume (multi-core)
//!        find_files()          eligible file list
//!        WalkOptions           skip dirs, exclude globs (wax), extensions
//! root:  find_project_root()   nearest ancestor with package.json
//!        display_relative()    forward-slash path relative to a root
//! io:    read_optional(), read_to_string(), write()
//! ```
//!
//! Every I/O failure carries the offending path as `FsError::IoError`.

pub mod root;
pub mod walk;


use std::io::ErrorKind;
use std::path::Path;

use crate::error::{EnvoyResult, FsError};

/// Returns true if `path` exists.
#[must_use]
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Reads a whole UTF-8 file.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the file does not exist and
/// `FsError::IoError` if it cannot be read.
pub fn read_to_string<P: AsRef<Path>>(path: P) -> EnvoyResult<String> {
    read_optional(path.as_ref())?
        .ok_or_else(|| FsError::NotFound(path.as_ref().display().to_string()).into())
}

/// Reads a whole file as text, replacing invalid UTF-8 sequences with
/// U+FFFD instead of failing.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be read at all.
pub fn read_lossy<P: AsRef<Path>>(path: P) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Reads a whole UTF-8 file, treating a missing file as `None`.
///
/// # Errors
///
/// Returns `FsError::IoError` if the file exists but cannot be read.
pub fn read_optional<P: AsRef<Path>>(path: P) -> EnvoyResult<Option<String>> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FsError::io(path, e).into()),
    }
}

/// Replaces the whole content of a file.
///
/// # Errors
///
/// Returns `FsError::IoError` if the file cannot be written.
pub fn write<P: AsRef<Path>>(path: P, content: &str) -> EnvoyResult<()> {
    let path = path.as_ref();
    std::fs::write(path, content).map_err(|e| FsError::io(path, e).into())
}
