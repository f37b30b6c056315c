// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scan result types.
//!
//! ```text
//! DiscoveredSet (insertion ordered)
//!   DiscoveredVariable { name, locations[], in_example, in_env }
//!     VariableReference { file, line, column, snippet }
//! ```

use serde::Serialize;
use std::collections::HashMap;

/// One occurrence of a variable name in source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableReference {
    /// Path relative to the project root, with forward slashes.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    /// 0-based character offset within the line.
    pub column: usize,
    /// The trimmed source line.
    pub snippet: String,
}

/// A variable name and every place it is referenced.
///
/// `in_example` and `in_env` are always `false` when produced by the scanner;
/// the reconciler sets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredVariable {
    pub name: String,
    pub locations: Vec<VariableReference>,
    pub in_example: bool,
    pub in_env: bool,
}

impl DiscoveredVariable {
    /// Creates a variable with a single location.
    #[must_use]
    pub fn new(name: impl Into<String>, location: VariableReference) -> Self {
        Self {
            name: name.into(),
            locations: vec![location],
            in_example: false,
            in_env: false,
        }
    }

    /// First place the variable is referenced.
    #[must_use]
    pub fn first_location(&self) -> Option<&VariableReference> {
        self.locations.first()
    }
}

/// Discovered variables keyed by name, in order of first discovery.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredSet {
    variables: Vec<DiscoveredVariable>,
    index: HashMap<String, usize>,
}

impl DiscoveredSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a reference to `name`, creating the variable on first sight.
    pub fn record(&mut self, name: &str, reference: VariableReference) {
        match self.index.get(name) {
            Some(&i) => self.variables[i].locations.push(reference),
            None => {
                self.index.insert(name.to_string(), self.variables.len());
                self.variables.push(DiscoveredVariable::new(name, reference));
            }
        }
    }

    /// Like [`record`](Self::record), but skips the reference when `name` is
    /// already referenced at the same file and line.
    ///
    /// Returns true if the reference was recorded.
    pub fn record_unique_line(&mut self, name: &str, reference: VariableReference) -> bool {
        if let Some(existing) = self.get(name)
            && existing
                .locations
                .iter()
                .any(|loc| loc.file == reference.file && loc.line == reference.line)
        {
            return false;
        }
        self.record(name, reference);
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DiscoveredVariable> {
        self.index.get(name).map(|&i| &self.variables[i])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiscoveredVariable> {
        self.variables.iter()
    }

    /// Names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }
}

impl IntoIterator for DiscoveredSet {
    type Item = DiscoveredVariable;
    type IntoIter = std::vec::IntoIter<DiscoveredVariable>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.into_iter()
    }
}

impl FromIterator<DiscoveredVariable> for DiscoveredSet {
    /// Collects variables, merging the locations of repeated names.
    fn from_iter<I: IntoIterator<Item = DiscoveredVariable>>(iter: I) -> Self {
        let mut set = Self::new();
        for variable in iter {
            match set.index.get(&variable.name) {
                Some(&i) => set.variables[i].locations.extend(variable.locations),
                None => {
                    set.index.insert(variable.name.clone(), set.variables.len());
                    set.variables.push(variable);
                }
            }
        }
        set
    }
}
