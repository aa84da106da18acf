// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Case settings snapshot.
//!
//! Loaded once from a TOML, JSON5 or JSON file and then passed by reference
//! into every dictionary builder and the run manager. Nothing mutates it after
//! loading.

use foamrig_dict::{DictNode, FileFormat, Vector3};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Steps run when neither the settings nor the command line name any.
pub const DEFAULT_STEPS: [&str; 5] = [
    "blockMesh",
    "surfaceFeatureExtract",
    "snappyHexMesh",
    "checkMesh",
    "simpleFoam",
];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Validation(String),
}

/// Where a case file lives inside the case directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseLocation {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "constant")]
    Constant,
    #[serde(rename = "0")]
    Zero,
}

impl CaseLocation {
    pub fn dir_name(&self) -> &'static str {
        match self {
            CaseLocation::System => "system",
            CaseLocation::Constant => "constant",
            CaseLocation::Zero => "0",
        }
    }
}

/// Top-level settings model.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Format recorded in every written case file
    pub format: FileFormat,

    pub boundaries: BoundarySettings,

    pub mesh: MeshSettings,

    /// Parallel decomposition; absent means serial runs
    pub decomposition: Option<DecompositionSettings>,

    pub run: RunSettings,

    /// Remote host for the secure-shell environment
    pub remote: Option<RemoteSettings>,

    /// Private settings sub-trees, keyed by location and file name
    pub files: FileSettings,
}

impl Settings {
    /// Load settings, choosing the parser by file extension.
    ///
    /// `.toml` is parsed as TOML; anything else as JSON5 with a strict JSON
    /// fallback.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = if path.extension().is_some_and(|e| e == "toml") {
            toml::from_str(&content)?
        } else {
            parse_json5_or_json(&content)?
        };
        settings.validate()?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.boundaries.wall.trim().is_empty() {
            return Err(SettingsError::Validation(
                "boundaries.wall must name the wall patch".to_string(),
            ));
        }
        if let Some(ref d) = self.decomposition {
            if d.subdomains == 0 {
                return Err(SettingsError::Validation(
                    "decomposition.subdomains must be at least 1".to_string(),
                ));
            }
        }
        if self.mesh.margin < 0.0 {
            return Err(SettingsError::Validation(
                "mesh.margin must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// The private settings sub-tree of one case file, if present.
    pub fn file_tree(&self, location: CaseLocation, name: &str) -> Option<DictNode> {
        let group = match location {
            CaseLocation::System => &self.files.system,
            CaseLocation::Constant => &self.files.constant,
            CaseLocation::Zero => &self.files.zero,
        };
        match group.get(name)? {
            serde_json::Value::Object(map) => Some(DictNode::from_json_map(map)),
            _ => None,
        }
    }
}

/// Parse content as JSON5, falling back to strict JSON on parse failure.
pub fn parse_json5_or_json<T: serde::de::DeserializeOwned>(
    content: &str,
) -> Result<T, serde_json::Error> {
    json5::from_str(content).or_else(|_| serde_json::from_str(content))
}

/// Turn a face identifier into an OpenFOAM patch name.
pub fn patch_name(identifier: &str) -> String {
    identifier.trim().replace(' ', "_")
}

/// Boundary patch names, as extracted from the building model.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundarySettings {
    /// Name of the wall patch (default: "wall")
    pub wall: String,

    /// Inlet face identifiers
    pub inlets: Vec<String>,

    /// Outlet face identifiers
    pub outlets: Vec<String>,
}

impl Default for BoundarySettings {
    fn default() -> Self {
        Self {
            wall: "wall".to_string(),
            inlets: Vec::new(),
            outlets: Vec::new(),
        }
    }
}

impl BoundarySettings {
    pub fn inlet_patches(&self) -> Vec<String> {
        self.inlets.iter().map(|s| patch_name(s)).collect()
    }

    pub fn outlet_patches(&self) -> Vec<String> {
        self.outlets.iter().map(|s| patch_name(s)).collect()
    }
}

/// Two opposite corners of the model's bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BoundingBoxSettings {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBoxSettings {
    pub fn corners(&self) -> (Vector3, Vector3) {
        (Vector3::from(self.min), Vector3::from(self.max))
    }
}

/// Per-object mesh resolution override.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolutionOverride {
    /// Face identifier of the object
    pub object: String,
    /// Isotropic refinement level
    pub level: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeshSettings {
    pub bounding_box: BoundingBoxSettings,

    /// Enlargement of the bounding box on every side (default: 1.0)
    pub margin: f64,

    /// Explicit background cell size; derived from the extents when absent
    pub cell_size: Option<f64>,

    /// simpleGrading of the background block
    pub grading: [f64; 3],

    /// Identifier of the exported surface model; names the STL file
    pub source: String,

    pub resolution: Vec<ResolutionOverride>,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            bounding_box: BoundingBoxSettings::default(),
            margin: 1.0,
            cell_size: None,
            grading: [1.0, 1.0, 1.0],
            source: "model".to_string(),
            resolution: Vec::new(),
        }
    }
}

impl MeshSettings {
    /// STL/region base name derived from the source identifier.
    pub fn surface_name(&self) -> String {
        patch_name(&self.source)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DecompositionSettings {
    pub subdomains: u32,
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "scotch".to_string()
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    /// Ordered solver/utility steps
    pub steps: Vec<String>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSettings {
    pub user: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Remote directory that receives the case folder
    pub server_case_folder: String,
    /// Shell line that loads OpenFOAM on the remote host
    #[serde(default = "default_alias")]
    pub alias: String,
    /// Copy the case back after the run
    #[serde(default = "default_true")]
    pub download: bool,
    /// Delete the remote case after the run
    #[serde(default)]
    pub cleanup: bool,
}

impl RemoteSettings {
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

fn default_port() -> u16 {
    22
}

fn default_alias() -> String {
    "source /opt/openfoam/etc/bashrc".to_string()
}

fn default_true() -> bool {
    true
}

/// Raw file sub-trees grouped by case directory.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub system: serde_json::Map<String, serde_json::Value>,
    pub constant: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "0")]
    pub zero: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
