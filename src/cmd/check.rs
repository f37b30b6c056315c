// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Check command implementation for envoy-rs.
//!
//! ```text
//! analyze() --> --json ? pretty JSON : report
//!                  |
//!                  v
//!       issues && --ci ? counts on stderr, Ok(false) : Ok(true)
//! ```

use std::fmt::Write as _;

use crate::analyze::{AnalysisResult, analyze};
use crate::cli::check::CheckArgs;
use crate::cmd::CommandContext;
use crate::cmd::output::Painter;
use crate::error::Result;

/// Main handler for the check command.
///
/// Returns `false` when `--ci` is set and anything is missing or unused,
/// so the caller can exit with a failure code.
///
/// # Errors
///
/// Returns an error if the analysis fails.
pub fn run_check_command(args: &CheckArgs, ctx: &CommandContext) -> Result<bool> {
    let result = analyze(&ctx.config.analyze_options(&ctx.root))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!(
            "{}",
            render_report(&result, &ctx.example_name(), &ctx.env_name(), ctx.painter)
        );
    }

    if args.ci && result.has_issues() {
        eprintln!("{}", ci_failure_message(&result));
        return Ok(false);
    }
    Ok(true)
}

/// Summary printed when `--ci` fails.
#[must_use]
pub fn ci_failure_message(result: &AnalysisResult) -> String {
    format!(
        "{} missing and {} unused environment variables",
        result.missing.len(),
        result.unused.len()
    )
}

/// Formats the human-readable check report.
#[must_use]
pub fn render_report(
    result: &AnalysisResult,
    example_name: &str,
    env_name: &str,
    painter: Painter,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", painter.header("Envoy - Check Environment Variables"));
    let _ = writeln!(
        out,
        "{}\n",
        painter.bold(&format!(
            "Found {} environment variables in code",
            result.total
        ))
    );

    if !result.missing.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            painter.error(&format!(
                "[✗] MISSING in {example_name} ({}):",
                result.missing.len()
            ))
        );
        for variable in &result.missing {
            let _ = writeln!(out, "{}", painter.red(&format!("  ✗ {}", variable.name)));
            if let Some(first) = variable.first_location() {
                let _ = writeln!(
                    out,
                    "{}",
                    painter.dim(&format!("    → First used in {}:{}", first.file, first.line))
                );
            }
            if variable.locations.len() > 1 {
                let _ = writeln!(
                    out,
                    "{}",
                    painter.dim(&format!(
                        "    → Also used in {} other locations",
                        variable.locations.len() - 1
                    ))
                );
            }
        }
        out.push('\n');
    }

    if !result.unused.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            painter.warning(&format!(
                "[!] UNUSED in {example_name} ({}):",
                result.unused.len()
            ))
        );
        for name in &result.unused {
            let _ = writeln!(out, "{}", painter.yellow(&format!("  ⚠ {name}")));
            let _ = writeln!(out, "{}", painter.dim("    → Not found in codebase"));
        }
        out.push('\n');
    }

    if !result.synced.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            painter.success(&format!("[✓] SYNCED ({}):", result.synced.len()))
        );
        for variable in &result.synced {
            let _ = writeln!(out, "{}", painter.green(&format!("  ✓ {}", variable.name)));
            if variable.locations.len() > 1 {
                let _ = writeln!(
                    out,
                    "{}",
                    painter.dim(&format!(
                        "    → Used in {} locations",
                        variable.locations.len()
                    ))
                );
            }
            if !variable.in_env {
                let _ = writeln!(
                    out,
                    "{}",
                    painter.dim(&format!("    → not set in {env_name}"))
                );
            }
        }
        out.push('\n');
    }

    if result.has_issues() {
        let _ = writeln!(
            out,
            "{}",
            painter.info("[i] Run \"envoy sync --auto\" to fix automatically")
        );
    } else {
        let _ = writeln!(
            out,
            "{}",
            painter.success("[✓] All environment variables are properly synced!")
        );
    }
    out
}
