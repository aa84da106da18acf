// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted install paths of the execution environments.
//!
//! The store is a line-oriented text file, `environments.cfg` in the config
//! directory:
//!
//! ```text
//! # foamrig environment paths (updated 2026-03-01T10:00:00+00:00)
//! <wsl> C:\Windows\System32\bash.exe
//! <blueCFD> D:\blueCFD-Core-2017\setvars.bat
//! ```

use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the store inside the config directory.
pub const STORE_FILE: &str = "environments.cfg";

/// Entered paths must not contain whitespace.
pub const PATH_PATTERN: &str = r"^\S+$";

#[derive(Debug, Error)]
pub enum EnvPathError {
    #[error("environment store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid path pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Outcome of resolving an environment path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathStatus {
    Success,
    /// The user declined to enter a path
    Cancelled,
    /// The entered path failed validation
    Failure,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResolution {
    pub status: PathStatus,
    /// Set only on success
    pub path: Option<PathBuf>,
}

impl PathResolution {
    fn success(path: PathBuf) -> Self {
        Self {
            status: PathStatus::Success,
            path: Some(path),
        }
    }

    fn without_path(status: PathStatus) -> Self {
        Self { status, path: None }
    }
}

/// One `<tag> <path>` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentEntry {
    pub tag: String,
    pub path: PathBuf,
}

impl EnvironmentEntry {
    pub fn new(tag: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            tag: tag.into(),
            path: path.into(),
        }
    }

    /// Parse an entry line; comments, blank and malformed lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('<') {
            return None;
        }
        let (tag, path) = line.split_once(' ')?;
        let tag = tag.strip_prefix('<')?.strip_suffix('>')?;
        let path = path.trim();
        if tag.is_empty() || path.is_empty() {
            return None;
        }
        Some(Self::new(tag, path))
    }

    pub fn render(&self) -> String {
        format!("<{}> {}", self.tag, self.path.display())
    }
}

/// Reply from the path prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptReply {
    pub text: String,
    pub cancelled: bool,
}

impl PromptReply {
    pub fn entered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cancelled: false,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            text: String::new(),
            cancelled: true,
        }
    }
}

/// Asks the user for an install path.
pub trait PathPrompt {
    fn prompt_for_path(&mut self, pattern: &Regex, default: &Path, label: &str) -> PromptReply;
}

/// The environment path store.
#[derive(Clone, Debug)]
pub struct EnvPathStore {
    file: PathBuf,
}

impl EnvPathStore {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// Store file inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STORE_FILE))
    }

    /// Store in the resolved config directory (see [`crate::env`]).
    pub fn from_env() -> Self {
        Self::in_dir(&crate::env::resolved_config_dir())
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    fn io_error(&self, source: io::Error) -> EnvPathError {
        EnvPathError::Io {
            path: self.file.clone(),
            source,
        }
    }

    /// All entries, in file order. A missing file has none.
    pub fn entries(&self) -> Result<Vec<EnvironmentEntry>, EnvPathError> {
        match std::fs::read_to_string(&self.file) {
            Ok(content) => Ok(content.lines().filter_map(EnvironmentEntry::parse).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    pub fn lookup(&self, tag: &str) -> Result<Option<PathBuf>, EnvPathError> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|e| e.tag == tag)
            .map(|e| e.path))
    }

    /// Record `path` for `tag`, replacing any existing entry for it.
    pub fn persist(&self, tag: &str, path: &Path) -> Result<(), EnvPathError> {
        let mut entries = self.entries()?;
        match entries.iter_mut().find(|e| e.tag == tag) {
            Some(entry) => entry.path = path.to_path_buf(),
            None => entries.push(EnvironmentEntry::new(tag, path)),
        }

        let mut content = format!(
            "# foamrig environment paths (updated {})\n",
            chrono::Utc::now().to_rfc3339()
        );
        for entry in &entries {
            content.push_str(&entry.render());
            content.push('\n');
        }
        if let Some(parent) = self.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.file, content).map_err(|e| self.io_error(e))?;
        tracing::debug!(tag, path = %path.display(), store = %self.file.display(), "persisted environment path");
        Ok(())
    }

    /// Resolve the install path for `tag`.
    ///
    /// A stored entry wins. Otherwise an existing `default` is stored and
    /// used; failing that the prompt is asked once and a valid answer stored.
    pub fn resolve(
        &self,
        tag: &str,
        default: &Path,
        prompt: &mut dyn PathPrompt,
    ) -> Result<PathResolution, EnvPathError> {
        if let Some(stored) = self.lookup(tag)? {
            return Ok(PathResolution::success(stored));
        }

        if default.exists() {
            self.persist(tag, default)?;
            return Ok(PathResolution::success(default.to_path_buf()));
        }

        let pattern = Regex::new(PATH_PATTERN)?;
        let label = format!("Path for the {} environment", tag);
        let reply = prompt.prompt_for_path(&pattern, default, &label);
        if reply.cancelled {
            tracing::info!(tag, "environment path entry cancelled");
            return Ok(PathResolution::without_path(PathStatus::Cancelled));
        }
        let text = reply.text.trim();
        if !pattern.is_match(text) {
            tracing::warn!(tag, entered = text, "rejected environment path");
            return Ok(PathResolution::without_path(PathStatus::Failure));
        }
        let path = PathBuf::from(text);
        self.persist(tag, &path)?;
        Ok(PathResolution::success(path))
    }
}

#[cfg(test)]
#[path = "env_paths_tests.rs"]
mod tests;
