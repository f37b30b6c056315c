// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for envoy-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envoy [global options] <command>
//! init
//! check [--ci] [--json]
//! sync [--auto] [--remove] [--comments]
//! version
//! ```

pub mod check;
pub mod global;
pub mod sync;


use crate::cli::check::CheckArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::sync::SyncArgs;
use clap::{Parser, Subcommand};

/// Environment variable manifest checker.
///
/// Finds the environment variables a JavaScript/TypeScript project reads and
/// keeps `.env.example` in step with them.
#[derive(Debug, Parser)]
#[command(
    name = "envoy",
    author,
    version,
    about = "Environment variable manifest checker",
    long_about = "envoy-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Scans JavaScript and TypeScript sources for environment\n\
                  variable reads (process.env, import.meta.env, Deno.env.get,\n\
                  destructuring) and compares them with .env.example and .env.\n\
                  Run `envoy check` for a report and `envoy sync --auto` to add\n\
                  missing variables to .env.example.",
    after_help = "CONFIG FILES:\n\n\
                  envoy reads `.envoyrc.json` and then `envoy.toml` from the\n\
                  scanned directory when present. A file passed with --config\n\
                  is loaded after those, and ENVOY_* environment variables\n\
                  (ENVOY_EXCLUDE=a/**,b/**) override all files."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Creates .env.example with a short header.
    Init,

    /// Checks for missing or unused environment variables.
    Check(CheckArgs),

    /// Synchronizes .env.example with the variables used in code.
    Sync(SyncArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
