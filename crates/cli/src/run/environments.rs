// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One runner per execution environment.
//!
//! A runner owns the environment-specific parts of a run: the preamble before
//! the expanded steps, the epilogue after them, how commands become script
//! lines, and how the script is launched.

use super::{RunEnvironment, RunError};
use crate::settings::{RemoteSettings, Settings};
use std::path::{Component, Path, PathBuf};
use tokio::process::Command;

/// Opening marker of the WSL script; also its first line.
pub const WSL_MARKER: &str = "#!/usr/bin/env bash";

/// Commands that begin a fresh line in the WSL script.
pub const WSL_FRESH_LINE: [&str; 3] = ["bash", "blockMesh", "snappyHexMesh"];

pub trait EnvironmentRunner {
    fn environment(&self) -> RunEnvironment;

    /// Script file name, written to the case root.
    fn script_name(&self) -> &str {
        self.environment().script_name()
    }

    /// Commands before the expanded steps.
    fn preamble(&self, case_dir: &Path) -> Vec<String>;

    /// Commands after the expanded steps.
    fn epilogue(&self, _case_dir: &Path) -> Vec<String> {
        Vec::new()
    }

    /// Script text for the full command list.
    fn render(&self, commands: &[String]) -> String {
        line_per_command(commands, "\n")
    }

    /// Process that runs the script from the case directory.
    fn launcher(&self, script: &Path) -> Command;
}

fn line_per_command(commands: &[String], newline: &str) -> String {
    let mut out = String::new();
    for command in commands {
        out.push_str(command);
        out.push_str(newline);
    }
    out
}

/// Group commands into WSL script lines.
///
/// The opening marker stands alone; commands naming a shell or a mesh
/// generator start a new line; everything else is chained with `&&`.
pub fn wsl_lines(commands: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut after_marker = false;
    for command in commands {
        let fresh = after_marker || WSL_FRESH_LINE.iter().any(|k| command.contains(k));
        match lines.last_mut() {
            Some(line) if !fresh => {
                line.push_str(" && ");
                line.push_str(command);
            }
            _ => lines.push(command.clone()),
        }
        after_marker = command == WSL_MARKER;
    }
    lines
}

/// blueCFD-Core: a Windows batch file that sources the toolchain first.
#[derive(Clone, Debug)]
pub struct BlueCfd {
    pub setvars: PathBuf,
}

impl EnvironmentRunner for BlueCfd {
    fn environment(&self) -> RunEnvironment {
        RunEnvironment::BlueCfd
    }

    fn preamble(&self, case_dir: &Path) -> Vec<String> {
        vec![
            format!("call \"{}\"", self.setvars.display()),
            format!("cd /d \"{}\"", case_dir.display()),
            "if not exist log mkdir log".to_string(),
        ]
    }

    fn render(&self, commands: &[String]) -> String {
        line_per_command(commands, "\r\n")
    }

    fn launcher(&self, script: &Path) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(script);
        cmd
    }
}

/// Windows Subsystem for Linux through `bash.exe`.
#[derive(Clone, Debug)]
pub struct Wsl {
    pub bash: PathBuf,
}

impl EnvironmentRunner for Wsl {
    fn environment(&self) -> RunEnvironment {
        RunEnvironment::Wsl
    }

    fn preamble(&self, _case_dir: &Path) -> Vec<String> {
        vec![WSL_MARKER.to_string(), "mkdir -p log".to_string()]
    }

    fn render(&self, commands: &[String]) -> String {
        line_per_command(&wsl_lines(commands), "\n")
    }

    fn launcher(&self, script: &Path) -> Command {
        let mut cmd = Command::new(&self.bash);
        cmd.arg("-i").arg(script);
        cmd
    }
}

/// Absolute, lexically normalized form of a case directory.
///
/// `.` and `..` are folded so the directory always has a final name. Symlinks
/// are left alone. Falls back to the input when the working directory is
/// unavailable.
pub fn absolute_case_dir(case_dir: &Path) -> PathBuf {
    let absolute = std::path::absolute(case_dir).unwrap_or_else(|_| case_dir.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if normalized.file_name().is_some() {
                    normalized.pop();
                } else {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Remote host over ssh: upload, run in a heredoc session, download.
#[derive(Clone, Debug)]
pub struct Ssh {
    /// Resolved ssh client; its directory also provides `scp`
    pub client: PathBuf,
    pub remote: RemoteSettings,
}

impl Ssh {
    /// Case directory on the remote host.
    pub fn remote_case(&self, case_dir: &Path) -> String {
        let name = absolute_case_dir(case_dir)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "case".to_string());
        format!("{}/{}", self.remote.server_case_folder.trim_end_matches('/'), name)
    }
}

impl EnvironmentRunner for Ssh {
    fn environment(&self) -> RunEnvironment {
        RunEnvironment::Ssh
    }

    fn preamble(&self, case_dir: &Path) -> Vec<String> {
        let r = &self.remote;
        let case_dir = absolute_case_dir(case_dir);
        vec![
            format!(
                "scp -P {} -r \"{}\" {}:{}",
                r.port,
                case_dir.display(),
                r.destination(),
                r.server_case_folder
            ),
            format!("ssh -p {} {} << 'EOF'", r.port, r.destination()),
            r.alias.clone(),
            format!("cd {}", self.remote_case(&case_dir)),
            "mkdir -p log".to_string(),
        ]
    }

    fn epilogue(&self, case_dir: &Path) -> Vec<String> {
        let r = &self.remote;
        let case_dir = absolute_case_dir(case_dir);
        let remote_case = self.remote_case(&case_dir);
        let mut lines = vec!["EOF".to_string()];
        if r.download {
            let parent = case_dir
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            lines.push(format!(
                "scp -P {} -r {}:{} \"{}\"",
                r.port,
                r.destination(),
                remote_case,
                parent.display()
            ));
        }
        if r.cleanup {
            lines.push(format!(
                "ssh -p {} {} \"rm -rf {}\"",
                r.port,
                r.destination(),
                remote_case
            ));
        }
        lines
    }

    fn launcher(&self, script: &Path) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg(script);
        if let Some(dir) = self.client.parent().filter(|d| !d.as_os_str().is_empty()) {
            let mut paths = vec![dir.to_path_buf()];
            if let Some(current) = std::env::var_os("PATH") {
                paths.extend(std::env::split_paths(&current));
            }
            if let Ok(joined) = std::env::join_paths(paths) {
                cmd.env("PATH", joined);
            }
        }
        cmd
    }
}

/// Runner for an environment whose install path is resolved.
pub fn runner_for(
    environment: RunEnvironment,
    path: PathBuf,
    settings: &Settings,
) -> Result<Box<dyn EnvironmentRunner>, RunError> {
    match environment {
        RunEnvironment::BlueCfd => Ok(Box::new(BlueCfd { setvars: path })),
        RunEnvironment::Wsl => Ok(Box::new(Wsl { bash: path })),
        RunEnvironment::Ssh => {
            let remote = settings.remote.clone().ok_or(RunError::MissingRemote)?;
            Ok(Box::new(Ssh {
                client: path,
                remote,
            }))
        }
        RunEnvironment::Docker => Err(RunError::NotImplemented(environment)),
    }
}

#[cfg(test)]
#[path = "environments_tests.rs"]
mod tests;
