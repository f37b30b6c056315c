// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config file (TOML, or JSON by extension)
//! --dir DIR         ← Directory to scan (default: current directory)
//! --exclude GLOB    ← Appended to configured excludes (can repeat)
//! --example FILE    ← example_file override
//! --env FILE        ← env_file override
//! --log-level N     ← Console verbosity (0-6)
//! --log-file FILE   ← Also log to a file
//! --no-color        ← Plain output (also NO_COLOR)
//!
//! Precedence: CLI flags > ENVOY_* > --config > envoy.toml > .envoyrc.json > defaults
//! ```

use clap::Args;
use std::path::{Path, PathBuf};

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to an additional configuration file.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory to scan; relative manifest paths are resolved against it.
    #[arg(short = 'd', long = "dir", value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Glob pattern to leave out of the scan.
    /// Can be specified multiple times.
    #[arg(short = 'e', long = "exclude", value_name = "GLOB", action = clap::ArgAction::Append, global = true)]
    pub exclude: Vec<String>,

    /// Example manifest file (default: .env.example).
    #[arg(long = "example", value_name = "FILE", global = true)]
    pub example: Option<PathBuf>,

    /// Local environment file (default: .env).
    #[arg(long = "env", value_name = "FILE", global = true)]
    pub env: Option<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Disables colored output.
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        global = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,
}

impl GlobalOptions {
    /// Directory to scan, defaulting to the current directory.
    #[must_use]
    pub fn scan_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Manifest path overrides as `(example, env)`.
    #[must_use]
    pub fn manifest_overrides(&self) -> (Option<&Path>, Option<&Path>) {
        (self.example.as_deref(), self.env.as_deref())
    }
}
