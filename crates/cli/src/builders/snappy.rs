// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Surface refinement: `snappyHexMeshDict` and `surfaceFeatureExtractDict`.

use super::parameter::PatchNames;
use super::{BuildError, DictionaryBuilder, FileContext, FileSpec};
use crate::settings::{patch_name, CaseLocation, Settings};
use foamrig_dict::{DictNode, Value};

/// Face-name fragments marking a supply face (German and English).
pub const INLET_KEYWORDS: [&str; 2] = ["zuluft", "inlet"];
/// Face-name fragments marking an exhaust face (German and English).
pub const OUTLET_KEYWORDS: [&str; 2] = ["abluft", "outlet"];

/// `castellatedMeshControls` entries copied from settings unchanged.
pub const CASTELLATED_KEYS: [&str; 8] = [
    "maxLocalCells",
    "maxGlobalCells",
    "minRefinementCells",
    "maxLoadUnbalance",
    "nCellsBetweenLevels",
    "resolveFeatureAngle",
    "allowFreeStandingZoneFaces",
    "locationInMesh",
];

const DEFAULT_MERGE_TOLERANCE: f64 = 1e-6;
const DEFAULT_INCLUDED_ANGLE: i64 = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceKind {
    Wall,
    Inlet,
    Outlet,
}

/// Classify a face by keyword, case-insensitively. Inlet keywords win.
pub fn classify_face(name: &str) -> FaceKind {
    let lower = name.to_lowercase();
    if INLET_KEYWORDS.iter().any(|k| lower.contains(k)) {
        FaceKind::Inlet
    } else if OUTLET_KEYWORDS.iter().any(|k| lower.contains(k)) {
        FaceKind::Outlet
    } else {
        FaceKind::Wall
    }
}

/// Minimum and maximum surface refinement level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefinementLevel {
    pub min: u32,
    pub max: u32,
}

impl RefinementLevel {
    pub fn isotropic(level: u32) -> Self {
        Self {
            min: level,
            max: level,
        }
    }

    /// Accepts `[min, max]` or a single level.
    pub fn from_value(value: &Value) -> Option<Self> {
        let level = |i: i64| u32::try_from(i).ok();
        match value {
            Value::IntArray(a) => match a.as_slice() {
                [min, max] => Some(Self {
                    min: level(*min)?,
                    max: level(*max)?,
                }),
                [one] => level(*one).map(Self::isotropic),
                _ => None,
            },
            other => other.as_i64().and_then(level).map(Self::isotropic),
        }
    }
}

impl From<RefinementLevel> for Value {
    fn from(level: RefinementLevel) -> Self {
        Value::IntArray(vec![i64::from(level.min), i64::from(level.max)])
    }
}

/// Configured levels per face kind; inlet and outlet default to the wall level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceLevels {
    pub wall: RefinementLevel,
    pub inlet: RefinementLevel,
    pub outlet: RefinementLevel,
}

impl SurfaceLevels {
    pub fn for_kind(&self, kind: FaceKind) -> RefinementLevel {
        match kind {
            FaceKind::Wall => self.wall,
            FaceKind::Inlet => self.inlet,
            FaceKind::Outlet => self.outlet,
        }
    }

    pub fn for_face(&self, name: &str) -> RefinementLevel {
        self.for_kind(classify_face(name))
    }

    fn from_controls(ctx: &FileContext<'_>, controls: &DictNode) -> Result<Self, BuildError> {
        let read = |key: &str| -> Result<Option<RefinementLevel>, BuildError> {
            match controls.get(key) {
                None => Ok(None),
                Some(value) => RefinementLevel::from_value(value)
                    .map(Some)
                    .ok_or_else(|| ctx.invalid(key, "expected a level or a (min max) pair")),
            }
        };
        let wall = read("wallLevel")?
            .ok_or_else(|| ctx.missing("castellatedMeshControls.wallLevel"))?;
        Ok(Self {
            wall,
            inlet: read("inletLevel")?.unwrap_or(wall),
            outlet: read("outletLevel")?.unwrap_or(wall),
        })
    }
}

/// All region (patch) names of the model surface: wall, outlets, inlets.
fn region_names(settings: &Settings) -> Vec<String> {
    let names = PatchNames::from_settings(&settings.boundaries);
    std::iter::once(names.wall)
        .chain(names.outlets)
        .chain(names.inlets)
        .collect()
}

/// Patch role of a region: declared boundaries first, keywords otherwise.
fn patch_kind(names: &PatchNames, region: &str) -> FaceKind {
    if region == names.wall {
        FaceKind::Wall
    } else if names.inlets.iter().any(|n| n == region) {
        FaceKind::Inlet
    } else if names.outlets.iter().any(|n| n == region) {
        FaceKind::Outlet
    } else {
        classify_face(region)
    }
}

/// `system/snappyHexMeshDict`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnappyHexMeshDict;

impl SnappyHexMeshDict {
    fn geometry(surface: &str, regions: &[String]) -> DictNode {
        let mut region_node = DictNode::new();
        for region in regions {
            region_node.insert(region.as_str(), DictNode::new().with("name", region.as_str()));
        }
        let stl = DictNode::new()
            .with("type", "triSurfaceMesh")
            .with("name", surface)
            .with("regions", region_node);
        DictNode::new().with(format!("{}.stl", surface), stl)
    }

    fn castellated(
        ctx: &FileContext<'_>,
        surface: &str,
        regions: &[String],
    ) -> Result<DictNode, BuildError> {
        let controls = ctx.require_node("castellatedMeshControls")?;
        if !controls.contains_key("locationInMesh") {
            return Err(ctx.missing("castellatedMeshControls.locationInMesh"));
        }
        let levels = SurfaceLevels::from_controls(ctx, controls)?;

        let mut node = DictNode::new();
        for key in CASTELLATED_KEYS {
            if let Some(value) = controls.get(key) {
                node.insert(key, value.clone());
            }
        }

        let feature_level = match controls.get("featureLevel") {
            Some(value) => value
                .as_i64()
                .ok_or_else(|| ctx.invalid("featureLevel", "expected an integer"))?,
            None => i64::from(levels.wall.min),
        };
        let feature = DictNode::new()
            .with("file", format!("\"{}.eMesh\"", surface))
            .with("level", feature_level);
        node.insert("features", vec![Value::Node(feature)]);

        let names = PatchNames::from_settings(&ctx.settings.boundaries);
        let mut region_levels = DictNode::new();
        for region in regions {
            let level = if *region == names.wall {
                levels.wall
            } else {
                levels.for_face(region)
            };
            region_levels.insert(region.as_str(), Self::region(level, patch_kind(&names, region)));
        }
        for resolution in &ctx.settings.mesh.resolution {
            let name = patch_name(&resolution.object);
            let kind = patch_kind(&names, &name);
            tracing::debug!(object = %name, level = resolution.level, "resolution override");
            region_levels.insert(
                name,
                Self::region(RefinementLevel::isotropic(resolution.level), kind),
            );
        }

        let surface_node = DictNode::new()
            .with("level", levels.wall)
            .with("regions", region_levels);
        node.insert("refinementSurfaces", DictNode::new().with(surface, surface_node));
        node.insert("refinementRegions", DictNode::new());
        Ok(node)
    }

    fn region(level: RefinementLevel, kind: FaceKind) -> DictNode {
        let patch_type = match kind {
            FaceKind::Wall => "wall",
            FaceKind::Inlet | FaceKind::Outlet => "patch",
        };
        DictNode::new()
            .with("level", level)
            .with("patchInfo", DictNode::new().with("type", patch_type))
    }
}

impl DictionaryBuilder for SnappyHexMeshDict {
    fn spec(&self, settings: &Settings) -> FileSpec {
        FileSpec::dictionary("snappyHexMeshDict", CaseLocation::System, settings)
    }

    fn init_attributes(&self, ctx: &FileContext<'_>) -> Result<DictNode, BuildError> {
        let surface = ctx.settings.mesh.surface_name();
        let regions = region_names(ctx.settings);
        let switch = |key: &str, default: &str| {
            ctx.tree
                .get(key)
                .cloned()
                .unwrap_or_else(|| Value::from(default))
        };

        let mut node = DictNode::new()
            .with("castellatedMesh", switch("castellatedMesh", "true"))
            .with("snap", switch("snap", "true"))
            .with("addLayers", switch("addLayers", "false"))
            .with("geometry", Self::geometry(&surface, &regions))
            .with("castellatedMeshControls", Self::castellated(ctx, &surface, &regions)?)
            .with("snapControls", ctx.require_node("snapControls")?.clone());

        let layers = ctx.tree.get_node("addLayersControls").cloned().unwrap_or_default();
        node.insert("addLayersControls", layers);
        node.insert(
            "meshQualityControls",
            ctx.require_node("meshQualityControls")?.clone(),
        );
        node.insert(
            "mergeTolerance",
            ctx.tree
                .get("mergeTolerance")
                .cloned()
                .unwrap_or(Value::Float(DEFAULT_MERGE_TOLERANCE)),
        );
        Ok(node)
    }
}

/// `system/surfaceFeatureExtractDict`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceFeatureExtractDict;

impl DictionaryBuilder for SurfaceFeatureExtractDict {
    fn spec(&self, settings: &Settings) -> FileSpec {
        FileSpec::dictionary("surfaceFeatureExtractDict", CaseLocation::System, settings)
    }

    fn init_attributes(&self, ctx: &FileContext<'_>) -> Result<DictNode, BuildError> {
        let angle = ctx
            .tree
            .get("includedAngle")
            .cloned()
            .unwrap_or(Value::Int(DEFAULT_INCLUDED_ANGLE));
        let write_obj = ctx.tree.get("writeObj").cloned().unwrap_or_else(|| Value::from("yes"));
        let surface = DictNode::new()
            .with("extractionMethod", "extractFromSurface")
            .with(
                "extractFromSurfaceCoeffs",
                DictNode::new().with("includedAngle", angle),
            )
            .with("writeObj", write_obj);
        Ok(DictNode::new().with(format!("{}.stl", ctx.settings.mesh.surface_name()), surface))
    }
}

#[cfg(test)]
#[path = "snappy_tests.rs"]
mod tests;
