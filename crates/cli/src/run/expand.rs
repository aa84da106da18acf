// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Step-list expansion and per-step log redirection.

use super::Decomposition;

/// Mesh refinement step that runs in parallel when the case is decomposed.
pub const MESH_REFINEMENT_STEP: &str = "snappyHexMesh";

/// Commands that never get a log redirection.
pub const UNLOGGED_PREFIXES: [&str; 6] = ["EOF", "rm -r", "call", "pause", "scp", "ssh"];

/// Solver applications end in `Foam` (`simpleFoam`, `buoyantSimpleFoam`).
pub fn is_solver(step: &str) -> bool {
    program(step).is_some_and(|p| p.ends_with("Foam"))
}

fn program(command: &str) -> Option<&str> {
    command.split_whitespace().next()
}

/// Expand one step for the given decomposition.
///
/// Without a decomposition every step passes through unchanged.
pub fn expand_step(step: &str, decomposition: Option<&Decomposition>) -> Vec<String> {
    let step = step.trim();
    let Some(decomposition) = decomposition else {
        return vec![step.to_string()];
    };
    let n = decomposition.subdomains;
    if program(step) == Some(MESH_REFINEMENT_STEP) {
        vec![
            "decomposePar".to_string(),
            format!("mpirun -np {} {} -overwrite -parallel", n, step),
            "reconstructParMesh -constant".to_string(),
        ]
    } else if is_solver(step) {
        vec![
            "decomposePar".to_string(),
            format!("mpirun -n {} renumberMesh -overwrite -parallel", n),
            format!("mpirun -np {} {} -parallel", n, step),
            "reconstructPar -latestTime".to_string(),
        ]
    } else {
        vec![step.to_string()]
    }
}

/// Expand every step in order and redirect each command to its log file.
pub fn expand_steps(steps: &[String], decomposition: Option<&Decomposition>) -> Vec<String> {
    steps
        .iter()
        .filter(|s| !s.trim().is_empty())
        .flat_map(|s| expand_step(s, decomposition))
        .map(|c| with_log_suffix(&c))
        .collect()
}

pub fn is_unlogged(command: &str) -> bool {
    let command = command.trim_start();
    UNLOGGED_PREFIXES.iter().any(|p| command.starts_with(p))
}

/// Program whose log a command writes to.
///
/// For `mpirun` lines this is the program after the launcher options.
pub fn log_name(command: &str) -> Option<&str> {
    let mut tokens = command.split_whitespace();
    let first = tokens.next()?;
    if first != "mpirun" {
        return Some(first);
    }
    let mut expect_value = false;
    for token in tokens {
        if expect_value {
            expect_value = false;
            if token.parse::<u32>().is_ok() {
                continue;
            }
        }
        if token.starts_with('-') {
            expect_value = true;
            continue;
        }
        return Some(token);
    }
    None
}

/// Append ` >> log/<program>.log 2>&1` unless the command is excluded.
pub fn with_log_suffix(command: &str) -> String {
    if is_unlogged(command) {
        return command.to_string();
    }
    match log_name(command) {
        Some(name) => format!("{} >> log/{}.log 2>&1", command, name),
        None => command.to_string(),
    }
}

#[cfg(test)]
#[path = "expand_tests.rs"]
mod tests;
