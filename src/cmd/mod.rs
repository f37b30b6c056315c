// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! GlobalOptions --> CommandContext::load
//!                     root    canonical --dir
//!                     config  files + ENVOY_* + CLI overrides
//!                     painter colour choice
//!                        |
//!                        v
//!          cmd::run_* handlers: init, check, sync
//! ```

pub mod check;
pub mod init;
pub mod output;
pub mod sync;


use anyhow::Context as _;
use std::path::{Path, PathBuf};

use crate::cli::global::GlobalOptions;
use crate::config::EnvoyConfig;
use crate::error::Result;

use output::Painter;

/// Everything a command handler needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Canonical directory to scan.
    pub root: PathBuf,
    pub config: EnvoyConfig,
    pub painter: Painter,
}

impl CommandContext {
    /// Resolves the scan directory and loads the layered configuration,
    /// then applies the command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist, a `--config`
    /// file is missing or malformed, or the result is invalid.
    pub fn load(global: &GlobalOptions) -> Result<Self> {
        let root = resolve_dir(&global.scan_dir())?;
        let mut config = EnvoyConfig::load(&root, global.config.as_deref())?;
        let (example, env) = global.manifest_overrides();
        config.apply_overrides(&global.exclude, example, env);
        config.validate()?;
        Ok(Self {
            root,
            config,
            painter: Painter::detect(global.no_color),
        })
    }

    /// Context for `root` with an already loaded configuration.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: EnvoyConfig, painter: Painter) -> Self {
        Self {
            root: root.into(),
            config,
            painter,
        }
    }

    /// Example manifest path resolved against the scan root.
    #[must_use]
    pub fn example_path(&self) -> PathBuf {
        self.root.join(&self.config.example_file)
    }

    /// Example manifest name as configured, for messages.
    #[must_use]
    pub fn example_name(&self) -> String {
        self.config.example_file.display().to_string()
    }

    /// Env file name as configured, for messages.
    #[must_use]
    pub fn env_name(&self) -> String {
        self.config.env_file.display().to_string()
    }
}

/// Resolves `dir` to an absolute path with `.` and `..` collapsed and
/// symlinks followed.
fn resolve_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(dir).with_context(|| format!("Failed to resolve {}", dir.display()))
}
