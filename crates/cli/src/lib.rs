// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! OpenFOAM case synthesis and solver runs.
//!
//! [`builders`] turns a [`settings::Settings`] snapshot into one dictionary
//! tree per case file and hands each to a [`foamrig_dict::DictWriter`].
//! [`run`] expands solver steps into an environment-specific script, writes
//! it to the case directory and launches it. [`env_paths`] remembers where
//! each environment is installed.

pub mod builders;
pub mod cli;
pub mod commands;
pub mod env;
pub mod env_paths;
pub mod output_diagnostic;
pub mod prompt;
pub mod run;
pub mod settings;

#[cfg(test)]
mod test_helpers;
