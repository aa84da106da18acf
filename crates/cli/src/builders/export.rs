// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Export orchestration: build and write every case file.

use super::{
    BlockMeshDict, BuildError, CaseFile, ControlDict, DecomposeParDict, DictionaryBuilder,
    FieldFile, FvSchemes, FvSolution, Gravity, SnappyHexMeshDict, SurfaceFeatureExtractDict,
    TransportProperties, TurbulenceProperties,
};
use crate::output_diagnostic::{print_error, print_info};
use crate::settings::{CaseLocation, Settings};
use foamrig_dict::DictWriter;
use std::path::{Path, PathBuf};

/// Outcome of one export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    /// File name and the error that aborted it
    pub failures: Vec<(String, BuildError)>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Whether the case solves for temperature (buoyant flow).
///
/// Decided by a thermal expansion coefficient in `transportProperties`.
pub fn is_buoyant(settings: &Settings) -> bool {
    settings
        .file_tree(CaseLocation::Constant, "transportProperties")
        .is_some_and(|tree| tree.contains_key("beta"))
}

/// Builders for every file the case needs, in write order.
///
/// `decomposeParDict` is included for parallel cases; `g`, `p_rgh`, `T` and
/// `alphat` for buoyant cases. `g` is also written whenever settings carry it.
pub fn case_builders(settings: &Settings) -> Vec<Box<dyn DictionaryBuilder>> {
    let buoyant = is_buoyant(settings);
    let has = |location: CaseLocation, name: &str| settings.file_tree(location, name).is_some();

    let mut builders: Vec<Box<dyn DictionaryBuilder>> = vec![
        Box::new(ControlDict),
        Box::new(FvSchemes),
        Box::new(FvSolution),
        Box::new(BlockMeshDict),
        Box::new(SurfaceFeatureExtractDict),
        Box::new(SnappyHexMeshDict),
    ];
    if settings.decomposition.is_some() || has(CaseLocation::System, "decomposeParDict") {
        builders.push(Box::new(DecomposeParDict));
    }

    builders.push(Box::new(TransportProperties));
    builders.push(Box::new(TurbulenceProperties));
    if buoyant || has(CaseLocation::Constant, "g") {
        builders.push(Box::new(Gravity));
    }

    builders.push(Box::new(FieldFile::pressure()));
    builders.push(Box::new(FieldFile::velocity()));
    builders.push(Box::new(FieldFile::turbulent_kinetic_energy()));
    builders.push(Box::new(FieldFile::dissipation_rate()));
    builders.push(Box::new(FieldFile::turbulent_viscosity()));
    if buoyant {
        builders.push(Box::new(FieldFile::hydrostatic_pressure()));
        builders.push(Box::new(FieldFile::temperature()));
        builders.push(Box::new(FieldFile::turbulent_thermal_diffusivity()));
    }
    builders
}

/// Build and write every case file under `case_dir`.
///
/// A failing file is reported and skipped; the others are still written.
pub fn export_case(settings: &Settings, case_dir: &Path, writer: &dyn DictWriter) -> ExportReport {
    let mut report = ExportReport::default();
    for builder in case_builders(settings) {
        let name = builder.spec(settings).name;
        let result = CaseFile::build(builder.as_ref(), settings)
            .and_then(|file| file.finalize(writer, case_dir));
        match result {
            Ok(path) => {
                print_info(format!("Wrote {}", path.display()));
                report.written.push(path);
            }
            Err(err) => {
                print_error(&err);
                tracing::warn!(file = %name, error = %err, "case file skipped");
                report.failures.push((name, err));
            }
        }
    }
    tracing::info!(
        written = report.written.len(),
        failed = report.failures.len(),
        "export finished"
    );
    report
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
