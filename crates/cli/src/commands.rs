// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subcommand handlers.

use crate::builders::export_case;
use crate::cli::{Cli, Command, EnvPathArgs, ExportArgs, RunArgs};
use crate::env;
use crate::env_paths::{EnvPathStore, PathStatus};
use crate::output_diagnostic::{print_error, print_info, print_warning};
use crate::prompt::StdinPrompt;
use crate::run::{ExecutionPlan, RunError, RunManager};
use crate::settings::Settings;
use foamrig_dict::AsciiWriter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Run the parsed command line.
pub async fn dispatch(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Export(args) => export(args),
        Command::Run(args) => run(args).await,
        Command::EnvPath(args) => env_path(args),
    }
}

fn load_settings(path: Option<PathBuf>) -> Option<Settings> {
    let Some(path) = path.or_else(env::settings_file) else {
        print_error(format!(
            "no settings file; pass --settings or set {}",
            env::FOAMRIG_SETTINGS
        ));
        return None;
    };
    match Settings::load(&path) {
        Ok(settings) => Some(settings),
        Err(e) => {
            print_error(format!("{}: {}", path.display(), e));
            None
        }
    }
}

fn export(args: ExportArgs) -> ExitCode {
    let Some(mut settings) = load_settings(args.settings) else {
        return ExitCode::FAILURE;
    };
    if let Some(format) = args.format {
        settings.format = format;
    }

    let report = export_case(&settings, &args.case, &AsciiWriter::new());
    if report.is_success() {
        print_info(format!("Exported {} files", report.written.len()));
        ExitCode::SUCCESS
    } else {
        print_warning(format!(
            "Exported {} files, {} failed",
            report.written.len(),
            report.failures.len()
        ));
        ExitCode::FAILURE
    }
}

async fn run(args: RunArgs) -> ExitCode {
    let Some(settings) = load_settings(args.settings) else {
        return ExitCode::FAILURE;
    };
    let store = EnvPathStore::from_env();
    let created = {
        let mut prompt = StdinPrompt::stdio();
        RunManager::create(&settings, &args.case, args.env, &store, &mut prompt)
    };
    let mut manager = match created {
        Ok(manager) => manager,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let plan = ExecutionPlan::from_settings(&settings).with_steps(args.steps);
    let ok = if args.no_exec {
        match manager.run_commands(&plan) {
            Ok(_) => manager.write_to_command_bat(),
            Err(e) => {
                print_error(&e);
                false
            }
        }
    } else {
        manager.run(&plan).await
    };
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn env_path(args: EnvPathArgs) -> ExitCode {
    let Some(default) = args.default.or_else(|| args.env.default_path()) else {
        print_error(RunError::NotImplemented(args.env));
        return ExitCode::FAILURE;
    };
    let store = EnvPathStore::from_env();
    let mut prompt = StdinPrompt::stdio();
    match store.resolve(args.env.tag(), &default, &mut prompt) {
        Ok(resolution) => match (resolution.status, resolution.path) {
            (PathStatus::Success, Some(path)) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            (PathStatus::Cancelled, _) => {
                print_warning(format!("no path entered for {}", args.env));
                ExitCode::FAILURE
            }
            (_, _) => {
                print_error(format!("invalid path for {}; paths may not contain spaces", args.env));
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}
