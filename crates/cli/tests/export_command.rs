// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

//! End-to-end tests for `foamrig export`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn office_settings() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/office.toml")
}

fn foamrig() -> Command {
    let mut cmd = Command::cargo_bin("foamrig").unwrap();
    cmd.env_remove("FOAMRIG_SETTINGS");
    cmd
}

#[test]
fn exports_office_case() {
    let case = TempDir::new().unwrap();
    foamrig()
        .args(["export", "--settings"])
        .arg(office_settings())
        .arg("--case")
        .arg(case.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported 15 files"));

    for file in [
        "system/controlDict",
        "system/blockMeshDict",
        "system/snappyHexMeshDict",
        "system/decomposeParDict",
        "constant/transportProperties",
        "constant/g",
        "0/p",
        "0/U",
        "0/nut",
    ] {
        assert!(case.path().join(file).is_file(), "missing {file}");
    }

    let p = std::fs::read_to_string(case.path().join("0/p")).unwrap();
    assert!(p.contains("volScalarField"));
    assert!(p.contains("[0 2 -2 0 0 0 0]"));
    assert!(p.contains("uniform 0;"));
    assert!(p.contains("Zuluft_Raum1_12"));
}

#[test]
fn format_flag_overrides_settings() {
    let case = TempDir::new().unwrap();
    foamrig()
        .args(["export", "--format", "binary", "--settings"])
        .arg(office_settings())
        .arg("--case")
        .arg(case.path())
        .assert()
        .success();

    let control = std::fs::read_to_string(case.path().join("system/controlDict")).unwrap();
    assert!(control.contains("binary;"));
}

#[test]
fn settings_from_environment_variable() {
    let case = TempDir::new().unwrap();
    foamrig()
        .env("FOAMRIG_SETTINGS", office_settings())
        .args(["export", "--case"])
        .arg(case.path())
        .assert()
        .success();
    assert!(case.path().join("system/fvSolution").is_file());
}

#[test]
fn missing_settings_is_reported() {
    foamrig()
        .args(["export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no settings file"));
}

#[test]
fn unknown_settings_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("case.json5");
    std::fs::write(&settings, "{ solver: 'simpleFoam' }").unwrap();
    foamrig()
        .args(["export", "--settings"])
        .arg(&settings)
        .arg("--case")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn failing_files_do_not_stop_export() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("partial.json5");
    std::fs::write(
        &settings,
        "{ files: { system: { controlDict: { endTime: 100 } } } }",
    )
    .unwrap();
    let case = dir.path().join("case");
    foamrig()
        .args(["export", "--settings"])
        .arg(&settings)
        .arg("--case")
        .arg(&case)
        .assert()
        .failure()
        .stderr(predicate::str::contains("fvSchemes: settings have no entry 'files.system.fvSchemes'"))
        .stderr(predicate::str::contains("failed"));
    assert!(case.join("system/controlDict").is_file());
}
