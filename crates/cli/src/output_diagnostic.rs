// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing diagnostics on stderr.
//!
//! Colored when stderr is a terminal, plain text otherwise. Tracing output is
//! for developers; these lines are what a user running an export or a solver
//! script reads.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Severity of a diagnostic line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Info,
}

impl Level {
    fn label(&self) -> Option<&'static str> {
        match self {
            Level::Error => Some("Error"),
            Level::Warning => Some("Warning"),
            Level::Info => None,
        }
    }

    fn color(&self) -> Option<&'static str> {
        match self {
            Level::Error => Some("\x1b[31m"),
            Level::Warning => Some("\x1b[33m"),
            Level::Info => None,
        }
    }
}

/// Print an error message to stderr.
pub fn print_error(msg: impl std::fmt::Display) {
    print(Level::Error, msg);
}

/// Print a warning message to stderr.
pub fn print_warning(msg: impl std::fmt::Display) {
    print(Level::Warning, msg);
}

/// Print a progress line (written files, launched scripts) to stderr.
pub fn print_info(msg: impl std::fmt::Display) {
    print(Level::Info, msg);
}

fn print(level: Level, msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_diagnostic(&mut io::stderr(), level, msg, is_tty);
}

/// Write a diagnostic to a writer with explicit terminal flag.
fn write_diagnostic<W: Write>(
    writer: &mut W,
    level: Level,
    msg: impl std::fmt::Display,
    is_terminal: bool,
) {
    let line = match level.label() {
        Some(label) => format!("{}: {}", label, msg),
        None => msg.to_string(),
    };
    match level.color() {
        Some(color) if is_terminal => {
            let _ = writeln!(writer, "{}{}\x1b[0m", color, line);
        }
        _ => {
            let _ = writeln!(writer, "{}", line);
        }
    }
}

/// Message for a run script that exited with a nonzero status.
pub fn exit_code_message(script: &Path, code: Option<i32>) -> String {
    match code {
        Some(code) => format!(
            "{} finished with exit code {}; check the log/ directory of the case",
            script.display(),
            code
        ),
        None => format!("{} was terminated by a signal", script.display()),
    }
}

#[cfg(test)]
#[path = "output_diagnostic_tests.rs"]
mod tests;
