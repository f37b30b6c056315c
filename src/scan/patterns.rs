// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Textual recognizers for environment variable accesses.
//!
//! ```text
//! process.env.NAME            ProcessEnvProperty
//! process.env['NAME']         ProcessEnvIndex
//! import.meta.env.NAME        ImportMetaEnvProperty
//! import.meta.env["NAME"]     ImportMetaEnvIndex
//! Deno.env.get('NAME')        DenoEnvGet
//! $env:NAME                   PowerShellEnv
//! ```
//!
//! The access prefix is matched case-insensitively; the captured name is
//! `[A-Za-z_][A-Za-z0-9_]*`. `${process.env.NAME}` interpolations are covered
//! by the property patterns, so no wrapper pattern exists and no reference is
//! reported twice.

use regex::Regex;
use serde::Serialize;

use crate::error::{EnvoyResult, ScanError};

/// One lexical idiom for reading an environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    ProcessEnvProperty,
    ProcessEnvIndex,
    ImportMetaEnvProperty,
    ImportMetaEnvIndex,
    DenoEnvGet,
    PowerShellEnv,
}

impl PatternKind {
    /// All recognizers, in the order they are applied to a file.
    pub const ALL: [Self; 6] = [
        Self::ProcessEnvProperty,
        Self::ProcessEnvIndex,
        Self::ImportMetaEnvProperty,
        Self::ImportMetaEnvIndex,
        Self::DenoEnvGet,
        Self::PowerShellEnv,
    ];

    /// Regular expression for this idiom; capture group 1 is the name.
    #[must_use]
    pub const fn expression(self) -> &'static str {
        match self {
            Self::ProcessEnvProperty => r"(?i:process\.env)\.([A-Za-z_][A-Za-z0-9_]*)",
            Self::ProcessEnvIndex => r#"(?i:process\.env)\[['"]([A-Za-z_][A-Za-z0-9_]*)['"]\]"#,
            Self::ImportMetaEnvProperty => r"(?i:import\.meta\.env)\.([A-Za-z_][A-Za-z0-9_]*)",
            Self::ImportMetaEnvIndex => {
                r#"(?i:import\.meta\.env)\[['"]([A-Za-z_][A-Za-z0-9_]*)['"]\]"#
            }
            Self::DenoEnvGet => r#"(?i:deno\.env\.get)\(['"]([A-Za-z_][A-Za-z0-9_]*)['"]\)"#,
            Self::PowerShellEnv => r"(?i:\$env):([A-Za-z_][A-Za-z0-9_]*)",
        }
    }
}

/// A variable name found in a text, with the byte offset of the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'t> {
    pub name: &'t str,
    pub offset: usize,
}

/// The compiled, ordered list of recognizers.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<(PatternKind, Regex)>,
}

impl PatternSet {
    /// Compiles every recognizer in [`PatternKind::ALL`].
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidPattern` if an expression fails to compile.
    pub fn new() -> EnvoyResult<Self> {
        let patterns = PatternKind::ALL
            .iter()
            .map(|&kind| compile(kind.expression()).map(|regex| (kind, regex)))
            .collect::<EnvoyResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Returns every match of every recognizer, recognizer by recognizer.
    ///
    /// Matches of one recognizer never overlap each other and come in text
    /// order; no semantic filtering is done, so references inside comments
    /// and strings are reported too.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<(PatternKind, PatternMatch<'t>)> {
        let mut found = Vec::new();
        for (kind, regex) in &self.patterns {
            for caps in regex.captures_iter(text) {
                if let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) {
                    found.push((
                        *kind,
                        PatternMatch {
                            name: name.as_str(),
                            offset: whole.start(),
                        },
                    ));
                }
            }
        }
        found
    }

    /// Number of recognizers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the set holds no recognizer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

pub(super) fn compile(expression: &str) -> EnvoyResult<Regex> {
    Regex::new(expression).map_err(|e| {
        ScanError::InvalidPattern {
            pattern: expression.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Returns true if `s` is `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
