// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run-script file handling.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("run script {} is read-only", path.display())]
    ReadOnly { path: PathBuf },

    #[error("not permitted to write run script {}: {source}", path.display())]
    Security {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write run script {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScriptError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => ScriptError::Security { path, source },
            _ => ScriptError::Io { path, source },
        }
    }
}

/// Replace the script at `path` with `contents`.
///
/// A read-only script is left alone. Otherwise an existing file is removed
/// first so a failed write never leaves old and new lines mixed.
pub fn write_script(path: &Path, contents: &str) -> Result<(), ScriptError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.permissions().readonly() => {
            return Err(ScriptError::ReadOnly {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => std::fs::remove_file(path).map_err(|e| ScriptError::from_io(path, e))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ScriptError::from_io(path, e)),
    }
    std::fs::write(path, contents).map_err(|e| ScriptError::from_io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote run script");
    Ok(())
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
