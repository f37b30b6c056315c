// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> CommandContext --> Command Dispatch
//!   Version | Init | Check | Sync
//! ```

use std::io::IsTerminal as _;
use std::process::ExitCode;

use envoy_rs::cli::global::GlobalOptions;
use envoy_rs::cli::{self, Command};
use envoy_rs::cmd::CommandContext;
use envoy_rs::cmd::check::run_check_command;
use envoy_rs::cmd::init::run_init_command;
use envoy_rs::cmd::sync::run_sync_command;
use envoy_rs::logging::init_logging;
use envoy_rs::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli)
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let ansi = !global.no_color && std::io::stderr().is_terminal();

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(LogLevel::TRACE)
        .with_ansi(ansi)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(true)
        }
        Some(Command::Init) => load_context(&cli.global)
            .and_then(|ctx| run_init_command(&ctx))
            .map(|_| true),
        Some(Command::Check(args)) => {
            load_context(&cli.global).and_then(|ctx| run_check_command(args, &ctx))
        }
        Some(Command::Sync(args)) => load_context(&cli.global)
            .and_then(|ctx| run_sync_command(args, &ctx))
            .map(|_| true),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        // The handler already reported why
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_context(global: &GlobalOptions) -> envoy_rs::error::Result<CommandContext> {
    CommandContext::load(global).map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
