// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Object-destructuring from an environment object.
//!
//! ```text
//! const { API_KEY, PORT: port, HOST = 'localhost', ...rest } = process.env;
//!         ^^^^^^^  ^^^^        ^^^^                 skipped
//! ```
//!
//! The binding list is split on commas (nested patterns are not supported).
//! For each part: rest elements are dropped, `NAME: alias` keeps `NAME`,
//! `NAME = default` keeps `NAME`.
//!
//! Offsets are approximate: a name is located by its first occurrence in the
//! binding list, so `PORT` in `{ REPORT, PORT }` resolves to the column of
//! `REPORT`'s suffix.

use regex::Regex;
use serde::Serialize;

use super::patterns::{PatternMatch, compile, is_identifier};
use crate::error::EnvoyResult;

/// Environment-like expressions bindings can be destructured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvSource {
    ProcessEnv,
    ImportMetaEnv,
}

impl EnvSource {
    pub const ALL: [Self; 2] = [Self::ProcessEnv, Self::ImportMetaEnv];

    /// Declaration pattern; capture group 1 is the binding list.
    #[must_use]
    pub const fn expression(self) -> &'static str {
        match self {
            Self::ProcessEnv => r"\b(?:const|let|var)\s*\{([^{}]*)\}\s*=\s*(?i:process\.env)",
            Self::ImportMetaEnv => {
                r"\b(?:const|let|var)\s*\{([^{}]*)\}\s*=\s*(?i:import\.meta\.env)"
            }
        }
    }
}

/// Recognizes `const|let|var { ... } = <env source>` bindings.
#[derive(Debug, Clone)]
pub struct DestructuringExtractor {
    patterns: Vec<(EnvSource, Regex)>,
}

impl DestructuringExtractor {
    /// Compiles the declaration pattern for every [`EnvSource`].
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidPattern` if an expression fails to compile.
    pub fn new() -> EnvoyResult<Self> {
        let patterns = EnvSource::ALL
            .iter()
            .map(|&source| compile(source.expression()).map(|regex| (source, regex)))
            .collect::<EnvoyResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Returns one match per bound name, source by source.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<(EnvSource, PatternMatch<'t>)> {
        let mut found = Vec::new();
        for (source, regex) in &self.patterns {
            for caps in regex.captures_iter(text) {
                let (Some(whole), Some(list)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                // `process.env.FOO` or `process.environment` is not the env object
                if text[whole.end()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c == '.' || c == '[' || c == '_' || c.is_alphanumeric())
                {
                    continue;
                }
                found.extend(
                    parse_binding_list(list.as_str())
                        .into_iter()
                        .map(|(name, position)| {
                            (
                                *source,
                                PatternMatch {
                                    name,
                                    offset: list.start() + position,
                                },
                            )
                        }),
                );
            }
        }
        found
    }
}

/// Extracts the bound environment names from a binding list.
///
/// Returns each accepted name with the position of its first occurrence in
/// `list`.
#[must_use]
pub fn parse_binding_list(list: &str) -> Vec<(&str, usize)> {
    list.split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.starts_with("...") {
                return None;
            }
            let name = part.split(':').next()?;
            let name = name.split('=').next()?.trim();
            if !is_identifier(name) {
                return None;
            }
            list.find(name).map(|position| (name, position))
        })
        .collect()
}
