// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface.

use crate::run::RunEnvironment;
use clap::{Args, Parser, Subcommand};
use foamrig_dict::FileFormat;
use std::path::PathBuf;

/// OpenFOAM case export and solver runs
#[derive(Parser, Debug)]
#[command(name = "foamrig", version, about = "OpenFOAM case export and solver runs")]
pub struct Cli {
    /// Log progress details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write every case file from the settings
    Export(ExportArgs),

    /// Expand the steps into a script for an environment and run it
    Run(RunArgs),

    /// Resolve, and if needed ask for, an environment's install path
    EnvPath(EnvPathArgs),
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Settings file (TOML, JSON5 or JSON); defaults to $FOAMRIG_SETTINGS
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Case directory
    #[arg(long, default_value = ".")]
    pub case: PathBuf,

    /// File format recorded in the case files (ascii or binary)
    #[arg(long)]
    pub format: Option<FileFormat>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Settings file (TOML, JSON5 or JSON); defaults to $FOAMRIG_SETTINGS
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Case directory
    #[arg(long, default_value = ".")]
    pub case: PathBuf,

    /// Execution environment
    #[arg(long, value_enum)]
    pub env: RunEnvironment,

    /// Step to run, in order (can be repeated); replaces the settings' steps
    #[arg(long = "step", value_name = "STEP")]
    pub steps: Vec<String>,

    /// Write the script without launching it
    #[arg(long)]
    pub no_exec: bool,
}

#[derive(Args, Debug)]
pub struct EnvPathArgs {
    /// Environment to resolve
    #[arg(value_enum)]
    pub env: RunEnvironment,

    /// Install path to try before asking
    #[arg(long)]
    pub default: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
