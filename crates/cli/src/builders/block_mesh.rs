// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Background block mesh around the model.

use super::{BuildError, DictionaryBuilder, FileContext, FileSpec};
use crate::settings::{CaseLocation, Settings};
use foamrig_dict::{DictNode, Value, Vector3};

/// Vertex indices of the six bounding faces, outward-facing winding.
pub const BOX_FACES: [[i64; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 4, 7, 3],
    [2, 6, 5, 1],
    [1, 5, 4, 0],
    [3, 7, 6, 2],
];

/// Name of the wall patch enclosing the background block.
pub const BOUNDING_PATCH: &str = "boundingBox";

/// Axis-aligned box with `min <= max` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: Vector3,
    max: Vector3,
}

impl BoundingBox {
    /// Box spanned by two opposite corners, in any order.
    pub fn new(a: Vector3, b: Vector3) -> Self {
        Self {
            min: Vector3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vector3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    pub fn min(&self) -> Vector3 {
        self.min
    }

    pub fn max(&self) -> Vector3 {
        self.max
    }

    /// Grow the box by `margin` on every side.
    pub fn enlarged(&self, margin: f64) -> Self {
        Self {
            min: Vector3::new(self.min.x - margin, self.min.y - margin, self.min.z - margin),
            max: Vector3::new(self.max.x + margin, self.max.y + margin, self.max.z + margin),
        }
    }

    pub fn extents(&self) -> [f64; 3] {
        [
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        ]
    }

    /// The eight corners in blockMesh order: bottom face counter-clockwise
    /// from the minimum corner, then the top face in the same order.
    pub fn vertices(&self) -> [Vector3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
        ]
    }

    /// Cells per axis. Without a cell size, the rounded extent is used.
    pub fn cell_counts(&self, cell_size: Option<f64>) -> [i64; 3] {
        self.extents().map(|extent| {
            let cells = match cell_size {
                Some(size) if size > 0.0 => (extent / size).round(),
                _ => extent.round(),
            };
            (cells as i64).max(1)
        })
    }
}

/// `system/blockMeshDict`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockMeshDict;

impl BlockMeshDict {
    /// The enlarged box the block is built on.
    pub fn domain(settings: &Settings) -> BoundingBox {
        let (a, b) = settings.mesh.bounding_box.corners();
        BoundingBox::new(a, b).enlarged(settings.mesh.margin)
    }
}

impl DictionaryBuilder for BlockMeshDict {
    fn spec(&self, settings: &Settings) -> FileSpec {
        FileSpec::dictionary("blockMeshDict", CaseLocation::System, settings)
    }

    fn init_attributes(&self, ctx: &FileContext<'_>) -> Result<DictNode, BuildError> {
        let mesh = &ctx.settings.mesh;
        if let Some(size) = mesh.cell_size {
            if size <= 0.0 {
                return Err(ctx.invalid("cell_size", "must be positive"));
            }
        }
        let domain = Self::domain(ctx.settings);

        let convert = ctx.tree.get("convertToMeters").cloned().unwrap_or(Value::Int(1));
        let vertices: Vec<Value> = domain.vertices().into_iter().map(Value::from).collect();
        let block = vec![
            Value::from("hex"),
            Value::IntArray((0..8).collect()),
            Value::IntArray(domain.cell_counts(mesh.cell_size).to_vec()),
            Value::from("simpleGrading"),
            Value::from(Vector3::from(mesh.grading)),
        ];
        let faces: Vec<Value> = BOX_FACES.iter().map(|f| Value::IntArray(f.to_vec())).collect();
        let patch = DictNode::new()
            .with("type", "wall")
            .with("faces", faces);
        let boundary = vec![Value::Node(DictNode::new().with(BOUNDING_PATCH, patch))];

        // Curved edges and patch merging are not generated.
        Ok(DictNode::new()
            .with("convertToMeters", convert)
            .with("vertices", vertices)
            .with("blocks", block)
            .with("edges", Vec::<Value>::new())
            .with("boundary", boundary)
            .with("mergePatchPairs", Vec::<Value>::new()))
    }
}

#[cfg(test)]
#[path = "block_mesh_tests.rs"]
mod tests;
