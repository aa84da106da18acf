// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Solver run orchestration.
//!
//! A [`RunManager`] resolves the environment's install path, expands the
//! step list into commands, writes them to a script in the case directory and
//! launches that script, advancing through [`RunState`] once per run.

pub mod environments;
pub mod expand;
pub mod script;

pub use environments::{absolute_case_dir, runner_for, BlueCfd, EnvironmentRunner, Ssh, Wsl};
pub use expand::{expand_step, expand_steps, log_name, with_log_suffix};
pub use script::{write_script, ScriptError};

use crate::env_paths::{EnvPathError, EnvPathStore, PathPrompt, PathStatus};
use crate::output_diagnostic::{exit_code_message, print_error, print_info, print_warning};
use crate::settings::{DecompositionSettings, Settings};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Supported execution environments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum RunEnvironment {
    /// blueCFD-Core toolchain on Windows
    #[value(name = "bluecfd")]
    BlueCfd,
    /// Windows Subsystem for Linux
    Wsl,
    /// Remote host over ssh
    Ssh,
    /// Container runtime (not implemented)
    Docker,
}

impl RunEnvironment {
    pub const ALL: [RunEnvironment; 4] = [
        RunEnvironment::BlueCfd,
        RunEnvironment::Wsl,
        RunEnvironment::Ssh,
        RunEnvironment::Docker,
    ];

    /// Tag used in the environment path store.
    pub fn tag(&self) -> &'static str {
        match self {
            RunEnvironment::BlueCfd => "blueCFD",
            RunEnvironment::Wsl => "wsl",
            RunEnvironment::Ssh => "ssh",
            RunEnvironment::Docker => "docker",
        }
    }

    /// Install location assumed until the store says otherwise.
    pub fn default_path(&self) -> Option<PathBuf> {
        let path = match self {
            RunEnvironment::BlueCfd => r"C:\Program Files\blueCFD-Core-2017\setvars.bat",
            RunEnvironment::Wsl => r"C:\Windows\System32\bash.exe",
            RunEnvironment::Ssh => r"C:\Windows\System32\OpenSSH\ssh.exe",
            RunEnvironment::Docker => return None,
        };
        Some(PathBuf::from(path))
    }

    pub fn script_name(&self) -> &'static str {
        match self {
            RunEnvironment::BlueCfd => "run_bluecfd.bat",
            RunEnvironment::Wsl => "run_wsl.sh",
            RunEnvironment::Ssh => "run_ssh.sh",
            RunEnvironment::Docker => "run_docker.sh",
        }
    }
}

impl fmt::Display for RunEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for RunEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('<').trim_end_matches('>');
        RunEnvironment::ALL
            .into_iter()
            .find(|e| e.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown environment: {}", s))
    }
}

/// Parallel decomposition of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decomposition {
    pub subdomains: u32,
    pub method: String,
}

impl Decomposition {
    pub fn new(subdomains: u32, method: impl Into<String>) -> Self {
        Self {
            subdomains,
            method: method.into(),
        }
    }
}

impl From<&DecompositionSettings> for Decomposition {
    fn from(settings: &DecompositionSettings) -> Self {
        Self::new(settings.subdomains, settings.method.as_str())
    }
}

/// Ordered steps plus an optional decomposition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub steps: Vec<String>,
    pub decomposition: Option<Decomposition>,
}

impl ExecutionPlan {
    pub fn new(steps: Vec<String>) -> Self {
        Self {
            steps,
            decomposition: None,
        }
    }

    pub fn with_decomposition(mut self, decomposition: Decomposition) -> Self {
        self.decomposition = Some(decomposition);
        self
    }

    /// Steps and decomposition from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            steps: settings.run.steps.clone(),
            decomposition: settings.decomposition.as_ref().map(Decomposition::from),
        }
    }

    /// Replace the steps unless `steps` is empty.
    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        if !steps.is_empty() {
            self.steps = steps;
        }
        self
    }
}

/// Lifecycle of one run. `Succeeded` and `Failed` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Created,
    EnvironmentResolved,
    CommandsExpanded,
    ScriptWritten,
    Executed,
    Succeeded,
    Failed,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("the {0} environment is not implemented")]
    NotImplemented(RunEnvironment),

    #[error("the ssh environment needs a [remote] section in settings")]
    MissingRemote,

    #[error("environment path not resolved ({0:?})")]
    EnvironmentUnresolved(PathStatus),

    #[error(transparent)]
    EnvPath(#[from] EnvPathError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("failed to launch {}: {source}", script.display())]
    Spawn {
        script: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for {}: {source}", script.display())]
    Wait {
        script: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("run manager is {actual:?}, expected {expected:?}")]
    InvalidState { expected: RunState, actual: RunState },
}

/// Result of a launched script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub script: PathBuf,
    /// `None` when the process was ended by a signal
    pub exit_code: Option<i32>,
}

impl RunOutcome {
    pub fn is_clean(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Drives one run against one case directory.
pub struct RunManager<'a> {
    settings: &'a Settings,
    case_dir: PathBuf,
    environment: RunEnvironment,
    runner: Option<Box<dyn EnvironmentRunner>>,
    commands: Vec<String>,
    script: Option<PathBuf>,
    state: RunState,
}

impl<'a> RunManager<'a> {
    /// The case directory is made absolute so every runner sees a named directory.
    pub fn new(settings: &'a Settings, case_dir: impl Into<PathBuf>, environment: RunEnvironment) -> Self {
        Self {
            settings,
            case_dir: absolute_case_dir(&case_dir.into()),
            environment,
            runner: None,
            commands: Vec::new(),
            script: None,
            state: RunState::Created,
        }
    }

    /// Create and resolve the environment's install path in one go.
    pub fn create(
        settings: &'a Settings,
        case_dir: impl Into<PathBuf>,
        environment: RunEnvironment,
        store: &EnvPathStore,
        prompt: &mut dyn PathPrompt,
    ) -> Result<Self, RunError> {
        let mut manager = Self::new(settings, case_dir, environment);
        manager.resolve_environment(store, prompt)?;
        Ok(manager)
    }

    /// A manager whose environment is already resolved to `runner`.
    pub fn with_runner(
        settings: &'a Settings,
        case_dir: impl Into<PathBuf>,
        runner: Box<dyn EnvironmentRunner>,
    ) -> Self {
        let mut manager = Self::new(settings, case_dir, runner.environment());
        manager.runner = Some(runner);
        manager.state = RunState::EnvironmentResolved;
        manager
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn environment(&self) -> RunEnvironment {
        self.environment
    }

    pub fn case_dir(&self) -> &Path {
        &self.case_dir
    }

    /// Expanded commands, including preamble and epilogue.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Path of the written script, once written.
    pub fn script_path(&self) -> Option<&Path> {
        self.script.as_deref()
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!(from = ?self.state, to = ?next, environment = %self.environment, "run state");
        self.state = next;
    }

    fn expect_state(&self, expected: RunState) -> Result<(), RunError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(RunError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    fn settle<T>(&mut self, result: Result<T, RunError>, next: RunState) -> Result<T, RunError> {
        match result {
            Ok(value) => {
                self.transition(next);
                Ok(value)
            }
            Err(err) => {
                self.transition(RunState::Failed);
                Err(err)
            }
        }
    }

    fn runner(&self) -> Result<&dyn EnvironmentRunner, RunError> {
        self.runner.as_deref().ok_or(RunError::InvalidState {
            expected: RunState::EnvironmentResolved,
            actual: self.state,
        })
    }

    /// Resolve the install path through the store, prompting if needed.
    pub fn resolve_environment(
        &mut self,
        store: &EnvPathStore,
        prompt: &mut dyn PathPrompt,
    ) -> Result<(), RunError> {
        self.expect_state(RunState::Created)?;
        let result = self.resolve_runner(store, prompt);
        let runner = self.settle(result, RunState::EnvironmentResolved)?;
        self.runner = Some(runner);
        Ok(())
    }

    fn resolve_runner(
        &self,
        store: &EnvPathStore,
        prompt: &mut dyn PathPrompt,
    ) -> Result<Box<dyn EnvironmentRunner>, RunError> {
        let default = self
            .environment
            .default_path()
            .ok_or(RunError::NotImplemented(self.environment))?;
        let resolution = store.resolve(self.environment.tag(), &default, prompt)?;
        match (resolution.status, resolution.path) {
            (PathStatus::Success, Some(path)) => {
                tracing::info!(environment = %self.environment, path = %path.display(), "environment resolved");
                runner_for(self.environment, path, self.settings)
            }
            (status, _) => Err(RunError::EnvironmentUnresolved(status)),
        }
    }

    /// Expand the plan into the full command list.
    pub fn run_commands(&mut self, plan: &ExecutionPlan) -> Result<&[String], RunError> {
        self.expect_state(RunState::EnvironmentResolved)?;
        let runner = self.runner()?;
        let mut commands = runner.preamble(&self.case_dir);
        commands.extend(expand_steps(&plan.steps, plan.decomposition.as_ref()));
        commands.extend(runner.epilogue(&self.case_dir));
        tracing::debug!(count = commands.len(), "expanded run commands");
        self.commands = commands;
        self.transition(RunState::CommandsExpanded);
        Ok(&self.commands)
    }

    /// Write the expanded commands to the environment's script.
    pub fn try_write_script(&mut self) -> Result<PathBuf, RunError> {
        self.expect_state(RunState::CommandsExpanded)?;
        let runner = self.runner()?;
        let path = self.case_dir.join(runner.script_name());
        let contents = runner.render(&self.commands);
        let result = write_script(&path, &contents)
            .map(|()| path)
            .map_err(RunError::from);
        let path = self.settle(result, RunState::ScriptWritten)?;
        self.script = Some(path.clone());
        Ok(path)
    }

    /// Write the script, reporting any failure. Returns whether it was written.
    pub fn write_to_command_bat(&mut self) -> bool {
        match self.try_write_script() {
            Ok(path) => {
                print_info(format!("Wrote {}", path.display()));
                true
            }
            Err(err) => {
                print_error(&err);
                false
            }
        }
    }

    /// Launch the written script from the case directory and wait for it.
    ///
    /// A nonzero exit code is reported as a warning; the run still succeeds.
    pub async fn execute(&mut self) -> Result<RunOutcome, RunError> {
        self.expect_state(RunState::ScriptWritten)?;
        let (mut command, script) = {
            let runner = self.runner()?;
            let name = runner.script_name();
            (runner.launcher(Path::new(name)), self.case_dir.join(name))
        };
        command.current_dir(&self.case_dir);

        let spawned = command.spawn().map_err(|source| RunError::Spawn {
            script: script.clone(),
            source,
        });
        let mut child = self.settle(spawned, RunState::Executed)?;
        tracing::info!(script = %script.display(), "launched run script");

        let waited = child.wait().await.map_err(|source| RunError::Wait {
            script: script.clone(),
            source,
        });
        let status = self.settle(waited, RunState::Succeeded)?;
        if !status.success() {
            print_warning(exit_code_message(&script, status.code()));
        }
        Ok(RunOutcome {
            script,
            exit_code: status.code(),
        })
    }

    /// Expand, write and execute. Returns `false` after reporting a failure.
    pub async fn run(&mut self, plan: &ExecutionPlan) -> bool {
        if let Err(err) = self.run_commands(plan) {
            print_error(&err);
            return false;
        }
        if !self.write_to_command_bat() {
            return false;
        }
        match self.execute().await {
            Ok(_) => true,
            Err(err) => {
                print_error(&err);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
