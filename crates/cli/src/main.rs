// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! foamrig binary entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use foamrig::cli::Cli;
use foamrig::commands::dispatch;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    dispatch(cli).await
}
