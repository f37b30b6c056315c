// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for envoy-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. .envoyrc.json   (optional, project dir)
//! 3. envoy.toml      (optional, project dir)
//! 4. --config FILE   (required when given)
//! 5. ENVOY_* env vars
//! 6. CLI overrides   (--exclude appends, --example, --env)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ENVOY_EXCLUDE=tmp/**,gen/**    → exclude = ["tmp/**", "gen/**"]
//! ENVOY_EXAMPLE_FILE=.env.sample → example_file = ".env.sample"
//! ENVOY_INCLUDE_HIDDEN=true      → include_hidden = true
//! ```
//!
//! # Example
//!
//! ```toml
//! exclude = ["dist/**", "generated/**"]
//! example_file = ".env.example"
//! env_file = ".env.local"
//! ```

pub mod loader;


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::analyze::{AnalyzeOptions, DEFAULT_ENV_FILE, DEFAULT_EXAMPLE_FILE};
use crate::error::{ConfigError, Result};
use crate::utility::fs::walk::ExcludeSet;

use loader::ConfigLoader;

/// JSON config file read from the project directory.
pub const JSON_CONFIG_FILE: &str = ".envoyrc.json";

/// TOML config file read from the project directory.
pub const TOML_CONFIG_FILE: &str = "envoy.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "ENVOY";

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvoyConfig {
    /// Glob patterns left out of the scan, relative to the scanned directory.
    pub exclude: Vec<String>,
    /// Example manifest, relative to the scanned directory.
    pub example_file: PathBuf,
    /// Local environment file, relative to the scanned directory.
    pub env_file: PathBuf,
    /// Honour `.gitignore` files while scanning.
    pub respect_gitignore: bool,
    /// Scan dot-files and dot-directories.
    pub include_hidden: bool,
}

impl Default for EnvoyConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
            example_file: PathBuf::from(DEFAULT_EXAMPLE_FILE),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            respect_gitignore: false,
            include_hidden: false,
        }
    }
}

fn default_exclude() -> Vec<String> {
    ["dist/**", "build/**", "coverage/**"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl EnvoyConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envoy_rs::config::EnvoyConfig;
    ///
    /// let config = EnvoyConfig::builder()
    ///     .add_json_file_optional(".envoyrc.json")
    ///     .add_toml_file_optional("envoy.toml")
    ///     .with_env_prefix("ENVOY")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Loads the standard layers for a project directory: defaults, the
    /// optional `.envoyrc.json` and `envoy.toml` in `dir`, then `extra` (if
    /// any), then `ENVOY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `extra` is missing or malformed, or the merged
    /// configuration is invalid.
    pub fn load(dir: &Path, extra: Option<&Path>) -> Result<Self> {
        let mut loader = Self::builder()
            .add_json_file_optional(dir.join(JSON_CONFIG_FILE))
            .add_toml_file_optional(dir.join(TOML_CONFIG_FILE));
        if let Some(path) = extra {
            loader = loader.add_file_auto(path);
        }
        debug!(files = ?loader.format_loaded_files(), "configuration sources");
        loader.with_env_prefix(ENV_PREFIX).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `EnvoyConfig` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty manifest path or an
    /// exclude pattern that is not a valid glob.
    pub fn validate(&self) -> Result<()> {
        for (key, path) in [
            ("example_file", &self.example_file),
            ("env_file", &self.env_file),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "path must not be empty".to_string(),
                }
                .into());
            }
        }
        ExcludeSet::new(&self.exclude).map_err(|e| ConfigError::InvalidValue {
            key: "exclude".to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Applies command-line overrides: `exclude` is appended, manifest paths
    /// replace the configured ones.
    pub fn apply_overrides(
        &mut self,
        exclude: &[String],
        example_file: Option<&Path>,
        env_file: Option<&Path>,
    ) {
        self.exclude.extend(exclude.iter().cloned());
        if let Some(path) = example_file {
            self.example_file = path.to_path_buf();
        }
        if let Some(path) = env_file {
            self.env_file = path.to_path_buf();
        }
    }

    /// Analysis options for scanning `root` with this configuration.
    #[must_use]
    pub fn analyze_options(&self, root: &Path) -> AnalyzeOptions {
        AnalyzeOptions::builder()
            .root(root)
            .exclude(self.exclude.clone())
            .example_file(self.example_file.clone())
            .env_file(self.env_file.clone())
            .include_hidden(self.include_hidden)
            .respect_gitignore(self.respect_gitignore)
            .build()
    }
}
