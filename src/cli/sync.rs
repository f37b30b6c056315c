// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync command arguments.
//!
//! ```text
//! --auto       append missing variables
//! --remove     delete unused variables
//! --comments   annotate appended variables with their first usage
//! ```
//!
//! Without `--auto` or `--remove` nothing is written.

use clap::Args;

use crate::manifest::SyncFlags;

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    /// Add missing variables to the example manifest.
    #[arg(long)]
    pub auto: bool,

    /// Remove unused variables from the example manifest.
    #[arg(long)]
    pub remove: bool,

    /// Add a comment with the first usage above each added variable.
    #[arg(long)]
    pub comments: bool,
}

impl SyncArgs {
    /// Returns true if the invocation asks for a change.
    #[must_use]
    pub const fn has_action(&self) -> bool {
        self.auto || self.remove
    }

    #[must_use]
    pub fn flags(&self) -> SyncFlags {
        SyncFlags::from_switches(self.auto, self.remove, self.comments)
    }
}
