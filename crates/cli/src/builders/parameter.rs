// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Boundary-field assembly shared by all scalar and vector field files.

use super::{BuildError, FileContext};
use crate::settings::BoundarySettings;
use foamrig_dict::{format_float, DictNode, DimensionVector, Value, Vector3};

/// Generic template used for inlets without an entry of their own.
pub const INLET_TEMPLATE: &str = "inlet";
/// Generic template used for outlets without an entry of their own.
pub const OUTLET_TEMPLATE: &str = "outlet";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    Vector,
}

impl FieldKind {
    pub fn class(&self) -> &'static str {
        match self {
            FieldKind::Scalar => "volScalarField",
            FieldKind::Vector => "volVectorField",
        }
    }
}

/// Patch names a field file must cover.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchNames {
    pub wall: String,
    pub inlets: Vec<String>,
    pub outlets: Vec<String>,
}

impl PatchNames {
    pub fn from_settings(boundaries: &BoundarySettings) -> Self {
        Self {
            wall: boundaries.wall.clone(),
            inlets: boundaries.inlet_patches(),
            outlets: boundaries.outlet_patches(),
        }
    }
}

/// Patch name → patch attributes for one field file.
///
/// Always holds the wall patch and one entry per inlet and outlet name.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryPatchSet {
    patches: DictNode,
}

impl BoundaryPatchSet {
    /// Assemble the patch set from a field file's settings sub-tree.
    ///
    /// Order: wall, then outlets, then inlets. An inlet or outlet uses the
    /// entry keyed by its exact name when present, else the generic template.
    pub fn resolve(file: &str, tree: &DictNode, names: &PatchNames) -> Result<Self, BuildError> {
        let wall = tree
            .get_node(&names.wall)
            .ok_or_else(|| BuildError::MissingWall {
                file: file.to_string(),
                wall: names.wall.clone(),
            })?;

        let mut patches = DictNode::new().with(names.wall.as_str(), wall.clone());
        for outlet in &names.outlets {
            patches.insert(outlet.as_str(), resolve_patch(file, tree, outlet, OUTLET_TEMPLATE)?);
        }
        for inlet in &names.inlets {
            patches.insert(inlet.as_str(), resolve_patch(file, tree, inlet, INLET_TEMPLATE)?);
        }
        Ok(Self { patches })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patches.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&DictNode> {
        self.patches.get_node(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patches.keys()
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn into_node(self) -> DictNode {
        self.patches
    }
}

fn resolve_patch(
    file: &str,
    tree: &DictNode,
    name: &str,
    template: &str,
) -> Result<DictNode, BuildError> {
    tree.get_node(name)
        .or_else(|| tree.get_node(template))
        .cloned()
        .ok_or_else(|| BuildError::UnresolvedPatch {
            file: file.to_string(),
            patch: name.to_string(),
            fallback: template.to_string(),
        })
}

/// Render an internal-field value as `uniform <value>` or `uniform (x y z)`.
///
/// Strings already starting with `uniform`/`nonuniform` pass through. NaN and
/// infinities are rejected.
pub fn format_internal_field(kind: FieldKind, value: &Value) -> Option<String> {
    if let Value::Str(text) = value {
        let text = text.trim();
        if text.starts_with("uniform ") || text.starts_with("nonuniform ") {
            return Some(text.to_string());
        }
        return None;
    }
    match kind {
        FieldKind::Scalar => value
            .as_f64()
            .filter(|v| v.is_finite())
            .map(|v| format!("uniform {}", format_float(v))),
        FieldKind::Vector => value
            .as_vector()
            .filter(Vector3::is_finite)
            .map(|v| format!("uniform {}", v)),
    }
}

/// Root node of a field file: `dimensions`, `internalField`, `boundaryField`.
pub fn field_attributes(
    ctx: &FileContext<'_>,
    kind: FieldKind,
    dimensions: DimensionVector,
) -> Result<DictNode, BuildError> {
    let names = PatchNames::from_settings(&ctx.settings.boundaries);
    let boundary = BoundaryPatchSet::resolve(ctx.name, ctx.tree, &names)?;
    let internal = format_internal_field(kind, ctx.require("internalField")?).ok_or_else(|| {
        let expected = match kind {
            FieldKind::Scalar => "expected a finite number",
            FieldKind::Vector => "expected a finite 3-component vector",
        };
        ctx.invalid("internalField", expected)
    })?;

    Ok(DictNode::new()
        .with("dimensions", dimensions)
        .with("internalField", internal)
        .with("boundaryField", boundary.into_node()))
}

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
