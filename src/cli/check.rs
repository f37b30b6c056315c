// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Check command arguments.

use clap::Args;

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    /// Exit with a failure code if issues are found (for CI pipelines).
    #[arg(long)]
    pub ci: bool,

    /// Print the analysis as JSON instead of the report.
    #[arg(long)]
    pub json: bool,
}
