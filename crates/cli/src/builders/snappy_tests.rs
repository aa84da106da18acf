// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::builders::CaseFile;
use crate::test_helpers::{office_settings, settings_from_json};
use yare::parameterized;

fn office_levels() -> SurfaceLevels {
    SurfaceLevels {
        wall: RefinementLevel { min: 2, max: 3 },
        inlet: RefinementLevel::isotropic(4),
        outlet: RefinementLevel { min: 3, max: 4 },
    }
}

#[parameterized(
    german_inlet = { "Zuluft_Raum1_12", FaceKind::Inlet },
    german_outlet = { "Abluft_Flur_7", FaceKind::Outlet },
    english_inlet = { "Main_INLET", FaceKind::Inlet },
    english_outlet = { "outlet_2", FaceKind::Outlet },
    wall = { "Fenster_3", FaceKind::Wall },
)]
fn face_classification(name: &str, expected: FaceKind) {
    assert_eq!(classify_face(name), expected);
}

#[test]
fn faces_receive_configured_levels() {
    let levels = office_levels();
    assert_eq!(levels.for_face("Zuluft_Raum1_12"), RefinementLevel::isotropic(4));
    assert_eq!(levels.for_face("Abluft_Flur_7"), RefinementLevel { min: 3, max: 4 });
    assert_eq!(levels.for_face("Tuer_1"), RefinementLevel { min: 2, max: 3 });
}

#[parameterized(
    pair = { Value::IntArray(vec![2, 3]), Some(RefinementLevel { min: 2, max: 3 }) },
    single = { Value::Int(4), Some(RefinementLevel::isotropic(4)) },
    negative = { Value::IntArray(vec![-1, 3]), None },
    triple = { Value::IntArray(vec![1, 2, 3]), None },
    text = { Value::from("high"), None },
)]
fn level_parsing(value: Value, expected: Option<RefinementLevel>) {
    assert_eq!(RefinementLevel::from_value(&value), expected);
}

#[test]
fn geometry_names_surface_and_regions() {
    let file = CaseFile::build(&SnappyHexMeshDict, &office_settings()).unwrap();
    let geometry = file.attributes().get_node("geometry").unwrap();
    let stl = geometry.get_node("Office_Building.stl").unwrap();
    assert_eq!(stl.get_str("type"), Some("triSurfaceMesh"));
    assert_eq!(stl.get_str("name"), Some("Office_Building"));
    let regions: Vec<&str> = stl.get_node("regions").unwrap().keys().collect();
    assert_eq!(regions, vec!["wall", "Abluft_Flur_7", "Zuluft_Raum1_12"]);
}

#[test]
fn castellated_controls_use_allow_list() {
    let file = CaseFile::build(&SnappyHexMeshDict, &office_settings()).unwrap();
    let controls = file.attributes().get_node("castellatedMeshControls").unwrap();
    assert!(controls.contains_key("maxGlobalCells"));
    assert!(controls.contains_key("locationInMesh"));
    assert!(!controls.contains_key("wallLevel"));
    assert!(!controls.contains_key("featureLevel"));
    assert_eq!(
        controls.get("locationInMesh").and_then(Value::as_vector),
        Some(foamrig_dict::Vector3::new(5.5, 5.5, 5.5))
    );
}

#[test]
fn refinement_surfaces_apply_levels_and_overrides() {
    let file = CaseFile::build(&SnappyHexMeshDict, &office_settings()).unwrap();
    let controls = file.attributes().get_node("castellatedMeshControls").unwrap();
    let surface = controls
        .get_node("refinementSurfaces")
        .and_then(|n| n.get_node("Office_Building"))
        .unwrap();
    assert_eq!(surface.get("level"), Some(&Value::IntArray(vec![2, 3])));

    let regions = surface.get_node("regions").unwrap();
    let level = |name: &str| regions.get_node(name).and_then(|r| r.get("level")).cloned();
    assert_eq!(level("wall"), Some(Value::IntArray(vec![2, 3])));
    assert_eq!(level("Abluft_Flur_7"), Some(Value::IntArray(vec![3, 4])));
    // The resolution override replaces the inlet level.
    assert_eq!(level("Zuluft_Raum1_12"), Some(Value::IntArray(vec![5, 5])));

    let inlet_type = regions
        .get_node("Zuluft_Raum1_12")
        .and_then(|r| r.get_node("patchInfo"))
        .and_then(|p| p.get_str("type"));
    assert_eq!(inlet_type, Some("patch"));
}

#[test]
fn override_for_unknown_object_adds_region() {
    let settings = settings_from_json(
        r#"{
            mesh: { source: "Hall", resolution: [{ object: "Säule 1", level: 3 }] },
            files: { system: { snappyHexMeshDict: {
                castellatedMeshControls: { locationInMesh: [1, 1, 1], wallLevel: 1 },
                snapControls: {},
                meshQualityControls: {},
            } } },
        }"#,
    );
    let file = CaseFile::build(&SnappyHexMeshDict, &settings).unwrap();
    let regions = file
        .attributes()
        .get_node("castellatedMeshControls")
        .and_then(|c| c.get_node("refinementSurfaces"))
        .and_then(|s| s.get_node("Hall"))
        .and_then(|s| s.get_node("regions"))
        .unwrap();
    let keys: Vec<&str> = regions.keys().collect();
    assert_eq!(keys, vec!["wall", "Säule_1"]);
    assert_eq!(
        regions.get_node("Säule_1").and_then(|r| r.get("level")),
        Some(&Value::IntArray(vec![3, 3]))
    );
}

#[test]
fn missing_location_in_mesh_fails() {
    let settings = settings_from_json(
        r#"{ files: { system: { snappyHexMeshDict: {
            castellatedMeshControls: { wallLevel: [1, 2] },
            snapControls: {},
            meshQualityControls: {},
        } } } }"#,
    );
    let err = CaseFile::build(&SnappyHexMeshDict, &settings).unwrap_err();
    assert!(
        matches!(err, BuildError::MissingKey { ref key, .. } if key == "castellatedMeshControls.locationInMesh")
    );
}

#[test]
fn missing_wall_level_fails() {
    let settings = settings_from_json(
        r#"{ files: { system: { snappyHexMeshDict: {
            castellatedMeshControls: { locationInMesh: [0.5, 0.5, 0.5] },
            snapControls: {},
            meshQualityControls: {},
        } } } }"#,
    );
    let err = CaseFile::build(&SnappyHexMeshDict, &settings).unwrap_err();
    assert!(
        matches!(err, BuildError::MissingKey { ref key, .. } if key == "castellatedMeshControls.wallLevel")
    );
}

#[test]
fn top_level_layout() {
    let file = CaseFile::build(&SnappyHexMeshDict, &office_settings()).unwrap();
    let keys: Vec<&str> = file.attributes().keys().collect();
    assert_eq!(
        keys,
        vec![
            "castellatedMesh",
            "snap",
            "addLayers",
            "geometry",
            "castellatedMeshControls",
            "snapControls",
            "addLayersControls",
            "meshQualityControls",
            "mergeTolerance",
        ]
    );
    assert_eq!(file.attributes().get_str("addLayers"), Some("false"));
}

#[test]
fn feature_extraction_names_surface() {
    let file = CaseFile::build(&SurfaceFeatureExtractDict, &office_settings()).unwrap();
    let surface = file.attributes().get_node("Office_Building.stl").unwrap();
    assert_eq!(surface.get_str("extractionMethod"), Some("extractFromSurface"));
    let coeffs = surface.get_node("extractFromSurfaceCoeffs").unwrap();
    assert_eq!(coeffs.get("includedAngle"), Some(&Value::Int(150)));
    assert_eq!(surface.get_str("writeObj"), Some("yes"));
}

#[test]
fn declared_inlet_without_keyword_is_a_patch() {
    let settings = settings_from_json(
        r#"{
            boundaries: { inlets: ["Supply 1"], outlets: ["Return 2"] },
            mesh: { source: "Hall" },
            files: { system: { snappyHexMeshDict: {
                castellatedMeshControls: {
                    locationInMesh: [1, 1, 1],
                    wallLevel: [2, 3],
                    inletLevel: 4,
                },
                snapControls: {},
                meshQualityControls: {},
            } } },
        }"#,
    );
    let file = CaseFile::build(&SnappyHexMeshDict, &settings).unwrap();
    let regions = file
        .attributes()
        .get_node("castellatedMeshControls")
        .and_then(|c| c.get_node("refinementSurfaces"))
        .and_then(|s| s.get_node("Hall"))
        .and_then(|s| s.get_node("regions"))
        .unwrap();
    let patch_type = |name: &str| {
        regions
            .get_node(name)
            .and_then(|r| r.get_node("patchInfo"))
            .and_then(|p| p.get_str("type"))
    };
    assert_eq!(patch_type("wall"), Some("wall"));
    assert_eq!(patch_type("Supply_1"), Some("patch"));
    assert_eq!(patch_type("Return_2"), Some("patch"));
    // No keyword in the name, so the level stays at the wall level.
    assert_eq!(
        regions.get_node("Supply_1").and_then(|r| r.get("level")),
        Some(&Value::IntArray(vec![2, 3]))
    );
}
