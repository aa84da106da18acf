// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use tempfile::TempDir;

#[test]
fn writes_new_script() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.sh");
    write_script(&path, "blockMesh\n").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "blockMesh\n");
}

#[test]
fn replaces_existing_script() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.sh");
    std::fs::write(&path, "old line\nanother old line\n").unwrap();
    write_script(&path, "new\n").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
}

#[test]
fn read_only_script_is_refused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.bat");
    std::fs::write(&path, "keep\r\n").unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_readonly(true);
    std::fs::set_permissions(&path, perms).unwrap();

    let err = write_script(&path, "replace\r\n").unwrap_err();
    assert!(matches!(err, ScriptError::ReadOnly { .. }));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep\r\n");
    assert!(err.to_string().contains("read-only"));
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no/such/dir/run.sh");
    let err = write_script(&path, "x").unwrap_err();
    assert!(matches!(err, ScriptError::Io { .. }));
}
