// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync command implementation for envoy-rs.
//!
//! ```text
//! analyze()
//!   no issues           --> "up to date"
//!   no --auto/--remove  --> warning, nothing written
//!   otherwise           --> sync_manifest(missing, unused, flags)
//! ```

use std::fmt::Write as _;

use crate::analyze::analyze;
use crate::cli::sync::SyncArgs;
use crate::cmd::CommandContext;
use crate::cmd::output::Painter;
use crate::error::Result;
use crate::manifest::{SyncReport, sync_manifest};

/// What a sync invocation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    UpToDate,
    NoAction,
    Applied(SyncReport),
}

/// Main handler for the sync command.
///
/// # Errors
///
/// Returns an error if the analysis fails or the manifest cannot be written.
pub fn run_sync_command(args: &SyncArgs, ctx: &CommandContext) -> Result<SyncOutcome> {
    let painter = ctx.painter;
    println!(
        "{}\n",
        painter.header("Starting synchronization process...")
    );

    let result = analyze(&ctx.config.analyze_options(&ctx.root))?;

    let outcome = if !result.has_issues() {
        SyncOutcome::UpToDate
    } else if !args.has_action() {
        SyncOutcome::NoAction
    } else {
        SyncOutcome::Applied(sync_manifest(
            &ctx.example_path(),
            &result.missing,
            &result.unused,
            args.flags(),
        )?)
    };

    print!("{}", render_outcome(&outcome, &ctx.example_name(), painter));
    Ok(outcome)
}

/// Formats the closing lines of a sync run.
#[must_use]
pub fn render_outcome(outcome: &SyncOutcome, example_name: &str, painter: Painter) -> String {
    let mut out = String::new();
    match outcome {
        SyncOutcome::UpToDate => {
            let _ = writeln!(
                out,
                "{}",
                painter.success(&format!(
                    "[✓] No discrepancies found. {example_name} is up to date."
                ))
            );
        }
        SyncOutcome::NoAction => {
            let _ = writeln!(
                out,
                "{}",
                painter.warning(
                    "[!] No action specified. Use --auto to add missing variables or --remove to remove unused ones."
                )
            );
        }
        SyncOutcome::Applied(report) => {
            for name in &report.added {
                let _ = writeln!(out, "{}", painter.green(&format!("  + {name}")));
            }
            for name in &report.removed {
                let _ = writeln!(out, "{}", painter.red(&format!("  - {name}")));
            }
            let _ = writeln!(
                out,
                "\n{}",
                painter.success(&format!(
                    "[✓] Synchronization complete! ({} added, {} removed)",
                    report.added.len(),
                    report.removed.len()
                ))
            );
        }
    }
    out
}
