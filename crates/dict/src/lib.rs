// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered dictionary trees for OpenFOAM case files.
//!
//! A [`DictNode`] is the in-memory form of one case file before it is written.
//! Values are a closed sum type ([`Value`]) so every consumer matches on the
//! variant instead of downcasting. [`AsciiWriter`] renders a node behind the
//! usual `FoamFile` header.

mod dimension;
mod node;
mod value;
mod writer;

pub use dimension::DimensionVector;
pub use node::DictNode;
pub use value::{format_float, Value, Vector3};
pub use writer::{AsciiWriter, DictWriter, FileFormat, FoamFileHeader, WriteError};
