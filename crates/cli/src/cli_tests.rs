// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use clap::CommandFactory;

#[test]
fn cli_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn export_arguments() {
    let cli = Cli::parse_from([
        "foamrig", "export", "--settings", "office.toml", "--case", "out", "--format", "binary",
    ]);
    match cli.command {
        Command::Export(args) => {
            assert_eq!(args.settings, Some(PathBuf::from("office.toml")));
            assert_eq!(args.case, PathBuf::from("out"));
            assert_eq!(args.format, Some(FileFormat::Binary));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn run_arguments_collect_steps() {
    let cli = Cli::parse_from([
        "foamrig", "-v", "run", "--env", "bluecfd", "--step", "blockMesh", "--step",
        "simpleFoam", "--no-exec",
    ]);
    assert!(cli.verbose);
    match cli.command {
        Command::Run(args) => {
            assert_eq!(args.env, RunEnvironment::BlueCfd);
            assert_eq!(args.steps, vec!["blockMesh", "simpleFoam"]);
            assert!(args.no_exec);
            assert_eq!(args.case, PathBuf::from("."));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn env_path_takes_positional_environment() {
    let cli = Cli::parse_from(["foamrig", "env-path", "wsl", "--default", "/usr/bin/bash"]);
    match cli.command {
        Command::EnvPath(args) => {
            assert_eq!(args.env, RunEnvironment::Wsl);
            assert_eq!(args.default, Some(PathBuf::from("/usr/bin/bash")));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn unknown_environment_is_rejected() {
    let result = Cli::try_parse_from(["foamrig", "run", "--env", "cygwin"]);
    assert!(result.is_err());
}
