// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_json_file_optional()   malformed => warn, skipped
//!   .add_toml_file_optional()   malformed => warn, skipped
//!   .add_toml_file(req)         missing/malformed => build() error
//!   .add_toml_str()
//!   .with_env_prefix()          ENVOY_EXCLUDE is a comma list
//!   .set()
//!        |
//!        v
//!    build() --> EnvoyConfig (validated)
//! ```

use config::{File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::EnvoyConfig;
use crate::error::{ConfigError, Result};

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    env_source: Option<config::Map<String, String>>,
    files: Vec<(String, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            env_source: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML configuration file to the loader.
    ///
    /// The file will be read when `build()` is called. If the file doesn't exist
    /// or contains invalid TOML, `build()` will return an error.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), FileFormat::Toml)
    }

    /// Adds a required JSON configuration file.
    #[must_use]
    pub fn add_json_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), FileFormat::Json)
    }

    /// Adds a required file, picking the format from its extension
    /// (`.json` is JSON, anything else TOML).
    #[must_use]
    pub fn add_file_auto<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        self.add_file(path, format_for(path))
    }

    fn add_file(mut self, path: &Path, format: FileFormat) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(format).required(true));
        self.files.push(("file".to_string(), path.to_path_buf()));
        self
    }

    /// Adds an optional TOML file. See [`add_json_file_optional`](Self::add_json_file_optional).
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file_optional(path.as_ref(), FileFormat::Toml)
    }

    /// Adds an optional JSON file.
    ///
    /// A missing file is skipped silently. A file that does not parse into an
    /// [`EnvoyConfig`] is skipped with a warning, so the remaining layers apply.
    #[must_use]
    pub fn add_json_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file_optional(path.as_ref(), FileFormat::Json)
    }

    fn add_file_optional(mut self, path: &Path, format: FileFormat) -> Self {
        if !path.is_file() {
            return self;
        }
        if let Err(e) = check_file(path, format) {
            warn!("{e}");
            warn!("Using default configuration instead");
            return self;
        }
        self.builder = self
            .builder
            .add_source(File::from(path).format(format).required(false));
        self.files.push(("optional".to_string(), path.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Reads prefixed variables from `vars` instead of the process environment.
    #[must_use]
    pub fn with_env_source(mut self, vars: config::Map<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or if the value cannot be converted
    /// to a configuration value.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing or malformed.
    /// - Environment variables cannot be parsed.
    /// - The merged configuration cannot be deserialized into `EnvoyConfig`.
    /// - A value fails [`EnvoyConfig::validate`].
    pub fn build(self) -> Result<EnvoyConfig> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("exclude")
                    .source(self.env_source),
            ),
            None => self.builder,
        };
        let cfg = builder.build()?;
        let config: EnvoyConfig = cfg.try_deserialize()?;
        config.validate()?;
        debug!(
            sources = self.files.len(),
            exclude = ?config.exclude,
            "configuration loaded"
        );
        Ok(config)
    }

    #[must_use]
    pub fn loaded_files(&self) -> Vec<(String, PathBuf)> {
        self.files.clone()
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn format_for(path: &Path) -> FileFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
        _ => FileFormat::Toml,
    }
}

fn check_file(path: &Path, format: FileFormat) -> std::result::Result<(), ConfigError> {
    config::Config::builder()
        .add_source(File::from(path).format(format))
        .build()
        .and_then(|cfg| cfg.try_deserialize::<EnvoyConfig>())
        .map(drop)
        .map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}
