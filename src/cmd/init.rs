// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Init command implementation for envoy-rs.

use crate::cmd::CommandContext;
use crate::error::Result;
use crate::manifest::create_example;

/// Main handler for the init command.
///
/// Returns true if the example manifest was created. An existing manifest is
/// left untouched; a warning is logged.
///
/// # Errors
///
/// Returns an error if the manifest cannot be written.
pub fn run_init_command(ctx: &CommandContext) -> Result<bool> {
    Ok(create_example(&ctx.example_path())?)
}
