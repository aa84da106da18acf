// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Serializer contract and the reference ASCII writer.

use crate::node::DictNode;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const INDENT: &str = "    ";
const KEY_WIDTH: usize = 15;

const BANNER: &str = "\
/*--------------------------------*- C++ -*----------------------------------*\\
  =========                 |
  \\\\      /  F ield         | OpenFOAM: The Open Source CFD Toolbox
   \\\\    /   O peration     |
    \\\\  /    A nd           | Website:  www.openfoam.com
     \\\\/     M anipulation  |
\\*---------------------------------------------------------------------------*/
";

const SEPARATOR: &str =
    "// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * //";

/// On-disk representation requested for a case file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Ascii,
    Binary,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Ascii => "ascii",
            FileFormat::Binary => "binary",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(FileFormat::Ascii),
            "binary" => Ok(FileFormat::Binary),
            other => Err(format!("unknown file format '{}'", other)),
        }
    }
}

/// The `FoamFile` block written at the top of every case file.
#[derive(Clone, Debug, PartialEq)]
pub struct FoamFileHeader {
    pub version: String,
    pub format: FileFormat,
    pub class: String,
    pub location: Option<String>,
    pub object: String,
    /// Additional header entries, written after the standard ones.
    pub extra: DictNode,
}

impl FoamFileHeader {
    pub fn new(object: impl Into<String>, class: impl Into<String>, format: FileFormat) -> Self {
        Self {
            version: "2.0".to_string(),
            format,
            class: class.into(),
            location: None,
            object: object.into(),
            extra: DictNode::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_extra(mut self, extra: DictNode) -> Self {
        self.extra = extra;
        self
    }

    fn to_node(&self) -> DictNode {
        let mut node = DictNode::new()
            .with("version", self.version.as_str())
            .with("format", self.format.as_str())
            .with("class", self.class.as_str());
        if let Some(ref location) = self.location {
            node.insert("location", format!("\"{}\"", location));
        }
        node.insert("object", self.object.as_str());
        node.merge(self.extra.clone());
        node
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serializes one dictionary tree to disk.
pub trait DictWriter {
    fn write(&self, path: &Path, header: &FoamFileHeader, body: &DictNode)
        -> Result<(), WriteError>;
}

/// Plain-text writer. The header carries the requested format; dictionary
/// bodies are text in both cases, as OpenFOAM reads them.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsciiWriter;

impl AsciiWriter {
    pub fn new() -> Self {
        Self
    }

    /// Render the complete file contents.
    pub fn render(&self, header: &FoamFileHeader, body: &DictNode) -> String {
        let mut out = String::from(BANNER);
        out.push_str("FoamFile\n{\n");
        write_entries(&mut out, &header.to_node(), 1);
        out.push_str("}\n");
        out.push_str(SEPARATOR);
        out.push_str("\n\n");
        write_entries(&mut out, body, 0);
        out.push('\n');
        out.push_str(
            "// ************************************************************************* //\n",
        );
        out
    }
}

impl DictWriter for AsciiWriter {
    fn write(
        &self,
        path: &Path,
        header: &FoamFileHeader,
        body: &DictNode,
    ) -> Result<(), WriteError> {
        let io = |source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io)?;
            }
        }
        std::fs::write(path, self.render(header, body)).map_err(io)
    }
}

fn pad(depth: usize) -> String {
    INDENT.repeat(depth)
}

fn write_entries(out: &mut String, node: &DictNode, depth: usize) {
    for (key, value) in node.iter() {
        write_entry(out, key, value, depth);
    }
}

fn write_entry(out: &mut String, key: &str, value: &Value, depth: usize) {
    let indent = pad(depth);
    match value {
        Value::Node(child) => {
            out.push_str(&format!("{indent}{key}\n{indent}{{\n"));
            write_entries(out, child, depth + 1);
            out.push_str(&format!("{indent}}}\n"));
        }
        Value::List(items) if items.is_empty() => {
            out.push_str(&format!("{indent}{key} ();\n"));
        }
        Value::List(items) => {
            out.push_str(&format!("{indent}{key}\n{indent}(\n"));
            for item in items {
                write_list_item(out, item, depth + 1);
            }
            out.push_str(&format!("{indent});\n"));
        }
        inline => {
            out.push_str(&format!("{indent}{key:<KEY_WIDTH$} {inline};\n"));
        }
    }
}

fn write_list_item(out: &mut String, item: &Value, depth: usize) {
    let indent = pad(depth);
    match item {
        // A single named sub-dictionary is written as `name { ... }`.
        Value::Node(node) if node.len() == 1 && node.iter().all(|(_, v)| v.as_node().is_some()) => {
            write_entries(out, node, depth);
        }
        Value::Node(node) => {
            out.push_str(&format!("{indent}{{\n"));
            write_entries(out, node, depth + 1);
            out.push_str(&format!("{indent}}}\n"));
        }
        Value::List(items) if items.iter().all(Value::is_inline) => {
            out.push_str(&format!("{indent}{item}\n"));
        }
        Value::List(items) => {
            out.push_str(&format!("{indent}(\n"));
            for nested in items {
                write_list_item(out, nested, depth + 1);
            }
            out.push_str(&format!("{indent})\n"));
        }
        inline => out.push_str(&format!("{indent}{inline}\n")),
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
