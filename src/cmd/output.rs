// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Styled report lines.
//!
//! ```text
//! error    red bold      MISSING, ✗ NAME
//! warning  yellow bold   UNUSED, ⚠ NAME
//! success  green bold    SYNCED, ✓ NAME
//! info     cyan          hints
//! dim      dimmed        → details
//! ```
//!
//! Colour is off with `--no-color` (or `NO_COLOR` set), or when stdout is not
//! a terminal.

use clap::builder::styling::{AnsiColor, Style};
use std::io::IsTerminal as _;

/// Renders report text, optionally with ANSI styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    color: bool,
}

impl Painter {
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    /// Plain text only.
    #[must_use]
    pub const fn plain() -> Self {
        Self::new(false)
    }

    /// Picks colour support for stdout.
    #[must_use]
    pub fn detect(no_color: bool) -> Self {
        Self::new(!no_color && std::io::stdout().is_terminal())
    }

    #[must_use]
    pub const fn is_colored(self) -> bool {
        self.color
    }

    fn paint(self, style: Style, text: &str) -> String {
        if self.color {
            format!("{}{text}{}", style.render(), style.render_reset())
        } else {
            text.to_string()
        }
    }

    #[must_use]
    pub fn header(self, text: &str) -> String {
        self.paint(AnsiColor::Cyan.on_default().bold(), text)
    }

    #[must_use]
    pub fn bold(self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    #[must_use]
    pub fn error(self, text: &str) -> String {
        self.paint(AnsiColor::Red.on_default().bold(), text)
    }

    #[must_use]
    pub fn warning(self, text: &str) -> String {
        self.paint(AnsiColor::Yellow.on_default().bold(), text)
    }

    #[must_use]
    pub fn success(self, text: &str) -> String {
        self.paint(AnsiColor::Green.on_default().bold(), text)
    }

    #[must_use]
    pub fn info(self, text: &str) -> String {
        self.paint(AnsiColor::Cyan.on_default(), text)
    }

    #[must_use]
    pub fn dim(self, text: &str) -> String {
        self.paint(Style::new().dimmed(), text)
    }

    #[must_use]
    pub fn red(self, text: &str) -> String {
        self.paint(AnsiColor::Red.on_default(), text)
    }

    #[must_use]
    pub fn yellow(self, text: &str) -> String {
        self.paint(AnsiColor::Yellow.on_default(), text)
    }

    #[must_use]
    pub fn green(self, text: &str) -> String {
        self.paint(AnsiColor::Green.on_default(), text)
    }
}
