// envoy-rs: environment variable manifest checker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  parallel_map_files(), find_files(), WalkOptions, ExcludeSet
//!   root:  find_project_root(), display_relative()
//!   io:    read_optional(), read_to_string(), write()
//! ```

pub mod fs;
