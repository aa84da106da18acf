// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Physical property files in `constant/`.

use super::{BuildError, DictionaryBuilder, FileContext, FileSpec};
use crate::settings::{CaseLocation, Settings};
use foamrig_dict::{format_float, DictNode, DimensionVector, Value, Vector3};

/// Standard gravity along -z.
pub const STANDARD_GRAVITY: Vector3 = Vector3::new(0.0, 0.0, -9.81);

/// Scalars written as `[dims] value` in `transportProperties`.
pub const DIMENSIONED_SCALARS: [(&str, DimensionVector); 5] = [
    ("nu", DimensionVector::new(0, 2, -1, 0)),
    ("beta", DimensionVector::new(0, 0, 0, -1)),
    ("TRef", DimensionVector::new(0, 0, 0, 1)),
    ("Pr", DimensionVector::DIMENSIONLESS),
    ("Prt", DimensionVector::DIMENSIONLESS),
];

/// `constant/transportProperties`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransportProperties;

impl DictionaryBuilder for TransportProperties {
    fn spec(&self, settings: &Settings) -> FileSpec {
        FileSpec::dictionary("transportProperties", CaseLocation::Constant, settings)
    }

    fn init_attributes(&self, ctx: &FileContext<'_>) -> Result<DictNode, BuildError> {
        let mut node = DictNode::new();
        if !ctx.tree.contains_key("transportModel") {
            node.insert("transportModel", "Newtonian");
        }
        node.merge(ctx.copy_tree());

        for (key, dims) in DIMENSIONED_SCALARS {
            let Some(value) = node.get_mut(key) else {
                continue;
            };
            let text = match &*value {
                Value::Str(s) if s.trim_start().starts_with('[') => continue,
                other => other
                    .as_f64()
                    .filter(|v| v.is_finite())
                    .map(|v| dims.dimensioned(format_float(v)))
                    .ok_or_else(|| ctx.invalid(key, "expected a finite number"))?,
            };
            *value = Value::Str(text);
        }
        Ok(node)
    }
}

/// `constant/turbulenceProperties`.
///
/// Settings give `simulationType` and `model`; the file nests the model in a
/// `<type>` sub-dictionary.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurbulenceProperties;

const TURBULENCE_KEYS: [&str; 4] = ["simulationType", "model", "turbulence", "printCoeffs"];

impl DictionaryBuilder for TurbulenceProperties {
    fn spec(&self, settings: &Settings) -> FileSpec {
        FileSpec::dictionary("turbulenceProperties", CaseLocation::Constant, settings)
    }

    fn init_attributes(&self, ctx: &FileContext<'_>) -> Result<DictNode, BuildError> {
        let simulation = ctx.tree.get_str("simulationType").unwrap_or("laminar");
        let node = DictNode::new().with("simulationType", simulation);
        if simulation == "laminar" {
            return Ok(node);
        }

        let model = ctx
            .require("model")?
            .as_str()
            .ok_or_else(|| ctx.invalid("model", "expected a model name"))?;
        let flag = |key: &str| ctx.tree.get(key).cloned().unwrap_or_else(|| Value::from("on"));
        let mut sub = DictNode::new()
            .with(format!("{}Model", simulation), model)
            .with("turbulence", flag("turbulence"))
            .with("printCoeffs", flag("printCoeffs"));
        for (key, value) in ctx.tree.iter() {
            if !TURBULENCE_KEYS.contains(&key) {
                sub.insert(key, value.clone());
            }
        }
        Ok(node.with(simulation, sub))
    }
}

/// `constant/g`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gravity;

impl DictionaryBuilder for Gravity {
    fn spec(&self, settings: &Settings) -> FileSpec {
        FileSpec::new(
            "g",
            "uniformDimensionedVectorField",
            CaseLocation::Constant,
            settings.format,
        )
    }

    fn init_attributes(&self, ctx: &FileContext<'_>) -> Result<DictNode, BuildError> {
        let value = match ctx.tree.get("value") {
            Some(v) => v
                .as_vector()
                .filter(Vector3::is_finite)
                .ok_or_else(|| ctx.invalid("value", "expected a finite 3-component vector"))?,
            None => STANDARD_GRAVITY,
        };
        Ok(DictNode::new()
            .with("dimensions", DimensionVector::new(0, 1, -2, 0))
            .with("value", value))
    }
}

#[cfg(test)]
#[path = "constant_tests.rs"]
mod tests;
