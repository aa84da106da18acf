// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by foamrig are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::path::PathBuf;

/// `FOAMRIG_CONFIG_DIR` — directory holding the environment path store.
pub fn config_dir() -> Option<PathBuf> {
    non_empty(names::FOAMRIG_CONFIG_DIR).map(PathBuf::from)
}

/// `FOAMRIG_SETTINGS` — default settings file for the CLI.
pub fn settings_file() -> Option<PathBuf> {
    non_empty(names::FOAMRIG_SETTINGS).map(PathBuf::from)
}

/// `HOME` — User's home directory.
pub fn home() -> Option<PathBuf> {
    non_empty(names::HOME).map(PathBuf::from)
}

/// Directory for foamrig's own configuration.
///
/// `FOAMRIG_CONFIG_DIR` wins; otherwise `~/.config/foamrig`; otherwise the
/// current directory.
pub fn resolved_config_dir() -> PathBuf {
    config_dir()
        .or_else(|| home().map(|h| h.join(".config").join("foamrig")))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
