// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared fixtures for unit tests.

use crate::settings::{parse_json5_or_json, Settings};

/// TOML text of the ventilated-office fixture.
pub const OFFICE_TOML: &str = include_str!("../tests/fixtures/office.toml");

/// The ventilated-office settings.
pub fn office_settings() -> Settings {
    toml::from_str(OFFICE_TOML).unwrap()
}

/// Settings from an inline JSON5 snippet.
pub fn settings_from_json(json: &str) -> Settings {
    parse_json5_or_json(json).unwrap()
}
