// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dictionary builders: one per OpenFOAM case file.
//!
//! Every builder names its file ([`FileSpec`]) and turns that file's private
//! settings sub-tree into the root [`DictNode`]. [`CaseFile::build`] resolves
//! the sub-tree and runs the builder once; [`CaseFile::finalize`] hands the
//! result to the serializer once. A configuration error aborts only the file
//! that raised it.

pub mod block_mesh;
pub mod constant;
pub mod export;
pub mod fields;
pub mod parameter;
pub mod snappy;
pub mod system;

pub use block_mesh::{BlockMeshDict, BoundingBox};
pub use constant::{Gravity, TransportProperties, TurbulenceProperties};
pub use export::{case_builders, export_case, ExportReport};
pub use fields::{FieldFile, Quantity};
pub use parameter::{BoundaryPatchSet, FieldKind, PatchNames};
pub use snappy::{classify_face, FaceKind, SnappyHexMeshDict, SurfaceFeatureExtractDict};
pub use system::{ControlDict, DecomposeParDict, FvSchemes, FvSolution};

use crate::settings::{CaseLocation, Settings};
use foamrig_dict::{DictNode, DictWriter, FileFormat, FoamFileHeader, Value, WriteError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{file}: settings have no entry '{key}'")]
    MissingKey { file: String, key: String },

    #[error("{file}: no wall patch '{wall}' in settings")]
    MissingWall { file: String, wall: String },

    #[error("{file}: patch '{patch}' has no entry of its own and no '{fallback}' template")]
    UnresolvedPatch {
        file: String,
        patch: String,
        fallback: String,
    },

    #[error("{file}: invalid value for '{key}': {reason}")]
    InvalidValue {
        file: String,
        key: String,
        reason: String,
    },

    #[error("{file}: {source}")]
    Write {
        file: String,
        #[source]
        source: WriteError,
    },
}

/// Identity of one case file.
#[derive(Clone, Debug, PartialEq)]
pub struct FileSpec {
    pub name: String,
    pub class: String,
    pub location: CaseLocation,
    /// Extra `FoamFile` header entries
    pub extra: DictNode,
    pub format: FileFormat,
}

impl FileSpec {
    pub fn new(
        name: impl Into<String>,
        class: impl Into<String>,
        location: CaseLocation,
        format: FileFormat,
    ) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            location,
            extra: DictNode::new(),
            format,
        }
    }

    /// A plain `dictionary` in the given location.
    pub fn dictionary(name: impl Into<String>, location: CaseLocation, settings: &Settings) -> Self {
        Self::new(name, "dictionary", location, settings.format)
    }

    pub fn with_extra(mut self, extra: DictNode) -> Self {
        self.extra = extra;
        self
    }
}

/// What a builder sees while populating its file.
#[derive(Clone, Copy, Debug)]
pub struct FileContext<'a> {
    pub name: &'a str,
    pub settings: &'a Settings,
    /// The file's private settings sub-tree
    pub tree: &'a DictNode,
}

impl FileContext<'_> {
    /// Base behavior: every non-null entry of the sub-tree, verbatim.
    pub fn copy_tree(&self) -> DictNode {
        self.tree.clone()
    }

    pub fn require(&self, key: &str) -> Result<&Value, BuildError> {
        self.tree.get(key).ok_or_else(|| self.missing(key))
    }

    pub fn require_node(&self, key: &str) -> Result<&DictNode, BuildError> {
        match self.require(key)? {
            Value::Node(node) => Ok(node),
            _ => Err(self.invalid(key, "expected a sub-dictionary")),
        }
    }

    pub fn missing(&self, key: &str) -> BuildError {
        BuildError::MissingKey {
            file: self.name.to_string(),
            key: key.to_string(),
        }
    }

    pub fn invalid(&self, key: &str, reason: impl Into<String>) -> BuildError {
        BuildError::InvalidValue {
            file: self.name.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// A case-file generator.
pub trait DictionaryBuilder {
    /// Name, class, location and format of the produced file.
    fn spec(&self, settings: &Settings) -> FileSpec;

    /// Populate the root node. The default copies the sub-tree verbatim.
    fn init_attributes(&self, ctx: &FileContext<'_>) -> Result<DictNode, BuildError> {
        Ok(ctx.copy_tree())
    }
}

/// A populated case file, ready to be written once.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseFile {
    spec: FileSpec,
    attributes: DictNode,
}

impl CaseFile {
    /// Resolve the private sub-tree (`files.<location>.<name>`) and populate.
    pub fn build(builder: &dyn DictionaryBuilder, settings: &Settings) -> Result<Self, BuildError> {
        let spec = builder.spec(settings);
        let tree = settings
            .file_tree(spec.location, &spec.name)
            .ok_or_else(|| BuildError::MissingKey {
                file: spec.name.clone(),
                key: format!("files.{}.{}", spec.location.dir_name(), spec.name),
            })?;
        let ctx = FileContext {
            name: &spec.name,
            settings,
            tree: &tree,
        };
        let attributes = builder.init_attributes(&ctx)?;
        tracing::debug!(file = %spec.name, entries = attributes.len(), "populated case file");
        Ok(Self { spec, attributes })
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn class(&self) -> &str {
        &self.spec.class
    }

    pub fn spec(&self) -> &FileSpec {
        &self.spec
    }

    pub fn attributes(&self) -> &DictNode {
        &self.attributes
    }

    /// Path relative to the case directory, e.g. `system/controlDict`.
    pub fn relative_path(&self) -> PathBuf {
        Path::new(self.spec.location.dir_name()).join(&self.spec.name)
    }

    pub fn header(&self) -> FoamFileHeader {
        FoamFileHeader::new(&self.spec.name, &self.spec.class, self.spec.format)
            .with_location(self.spec.location.dir_name())
            .with_extra(self.spec.extra.clone())
    }

    /// Write the file through the serializer. Consumes the file.
    pub fn finalize(self, writer: &dyn DictWriter, case_dir: &Path) -> Result<PathBuf, BuildError> {
        let path = case_dir.join(self.relative_path());
        writer
            .write(&path, &self.header(), &self.attributes)
            .map_err(|source| BuildError::Write {
                file: self.spec.name.clone(),
                source,
            })?;
        tracing::info!(path = %path.display(), "wrote case file");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
