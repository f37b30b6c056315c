// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!        EnvoyError (<= 24 bytes)
//!               |
//!   +--------+--+-----+--------+
//!   |        |        |        |
//!   v        v        v        v
//!  Cfg      Scan      Fs       Io
//!  Box      Box       Box      Box
//!
//! Sub-errors (unboxed internally):
//!   Config  ParseError, InvalidValue
//!   Scan    InvalidPattern, InvalidExclude, RootNotFound
//!   Fs      NotFound, IoError { path, source }
//!
//! All variants boxed => EnvoyError stays within 24 bytes.
//! ```
//!
//! Core operations (scan, manifest, sync) return [`EnvoyResult`]; glue code
//! (commands, config loading, logging) uses the `anyhow`-backed [`Result`].

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvoyError`].
pub type EnvoyResult<T> = std::result::Result<T, EnvoyError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum EnvoyError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Source scanning error.
    #[error("scan error: {0}")]
    Scan(#[from] Box<ScanError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EnvoyError {
                fn from(err: $error) -> Self {
                    EnvoyError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ScanError => Scan,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

// --- Scan Errors ---

/// Source scanning errors.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A built-in recognizer failed to compile.
    #[error("failed to compile pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A caller-supplied exclude glob is invalid.
    #[error("invalid exclude pattern '{pattern}': {message}")]
    InvalidExclude { pattern: String, message: String },

    /// The directory to scan does not exist.
    #[error("scan root does not exist: {path}")]
    RootNotFound { path: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wraps an I/O error together with the path it occurred on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}
