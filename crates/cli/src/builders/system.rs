// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run-control, discretisation, solver and decomposition dictionaries.

use super::{BuildError, DictionaryBuilder, FileContext, FileSpec};
use crate::settings::{CaseLocation, Settings};
use foamrig_dict::{DictNode, Value};

/// Solver used when `controlDict` does not name an application.
pub const DEFAULT_APPLICATION: &str = "simpleFoam";

/// `system/controlDict`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlDict;

impl DictionaryBuilder for ControlDict {
    fn spec(&self, settings: &Settings) -> FileSpec {
        FileSpec::dictionary("controlDict", CaseLocation::System, settings)
    }

    fn init_attributes(&self, ctx: &FileContext<'_>) -> Result<DictNode, BuildError> {
        let mut node = DictNode::new();
        if !ctx.tree.contains_key("application") {
            node.insert("application", DEFAULT_APPLICATION);
        }
        node.merge(ctx.copy_tree());
        node.insert("writeFormat", ctx.settings.format.as_str());
        Ok(node)
    }
}

/// `system/fvSchemes`, copied verbatim.
#[derive(Clone, Copy, Debug, Default)]
pub struct FvSchemes;

impl DictionaryBuilder for FvSchemes {
    fn spec(&self, settings: &Settings) -> FileSpec {
        FileSpec::dictionary("fvSchemes", CaseLocation::System, settings)
    }
}

/// `system/fvSolution`.
///
/// A flat `relaxationFactors` map is split into `fields` (pressure) and
/// `equations` (everything else); a map that already has that shape is kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct FvSolution;

/// Relaxed as fields rather than equations.
const FIELD_RELAXED: [&str; 2] = ["p", "p_rgh"];

impl FvSolution {
    fn reshape_relaxation(flat: &DictNode) -> DictNode {
        if flat.contains_key("fields") || flat.contains_key("equations") {
            return flat.clone();
        }
        let mut fields = DictNode::new();
        let mut equations = DictNode::new();
        for (key, value) in flat.iter() {
            if FIELD_RELAXED.contains(&key) {
                fields.insert(key, value.clone());
            } else {
                equations.insert(key, value.clone());
            }
        }
        let mut node = DictNode::new();
        if !fields.is_empty() {
            node.insert("fields", fields);
        }
        if !equations.is_empty() {
            node.insert("equations", equations);
        }
        node
    }
}

impl DictionaryBuilder for FvSolution {
    fn spec(&self, settings: &Settings) -> FileSpec {
        FileSpec::dictionary("fvSolution", CaseLocation::System, settings)
    }

    fn init_attributes(&self, ctx: &FileContext<'_>) -> Result<DictNode, BuildError> {
        let mut node = ctx.copy_tree();
        if let Some(value) = node.get_mut("relaxationFactors") {
            let reshaped = match value {
                Value::Node(flat) => Self::reshape_relaxation(flat),
                _ => return Err(ctx.invalid("relaxationFactors", "expected a sub-dictionary")),
            };
            *value = Value::Node(reshaped);
        }
        Ok(node)
    }
}

/// `system/decomposeParDict`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecomposeParDict;

/// Split `n` into three factors as close to a cube as possible, largest first.
pub fn split_subdomains(n: u32) -> [u32; 3] {
    let n = n.max(1);
    let wide = u64::from(n);
    let mut best = [n, 1, 1];
    let mut c: u32 = 1;
    while u64::from(c).pow(3) <= wide {
        if n % c == 0 {
            let rest = n / c;
            let mut b = c;
            while u64::from(b) * u64::from(b) <= u64::from(rest) {
                if rest % b == 0 {
                    let a = rest / b;
                    if a - c < best[0] - best[2] {
                        best = [a, b, c];
                    }
                }
                b += 1;
            }
        }
        c += 1;
    }
    best
}

impl DictionaryBuilder for DecomposeParDict {
    fn spec(&self, settings: &Settings) -> FileSpec {
        FileSpec::dictionary("decomposeParDict", CaseLocation::System, settings)
    }

    fn init_attributes(&self, ctx: &FileContext<'_>) -> Result<DictNode, BuildError> {
        let (subdomains, method) = match ctx.settings.decomposition {
            Some(ref d) => (d.subdomains, d.method.clone()),
            None => {
                let n = ctx
                    .require("numberOfSubdomains")?
                    .as_i64()
                    .and_then(|n| u32::try_from(n).ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| ctx.invalid("numberOfSubdomains", "expected a positive integer"))?;
                let method = ctx
                    .tree
                    .get_str("method")
                    .ok_or_else(|| ctx.missing("method"))?
                    .to_string();
                (n, method)
            }
        };

        let mut node = ctx.copy_tree();
        node.insert("numberOfSubdomains", subdomains);
        node.insert("method", method.as_str());

        if method == "simple" || method == "hierarchical" {
            let coeffs_key = format!("{}Coeffs", method);
            let mut coeffs = node.get_node(&coeffs_key).cloned().unwrap_or_default();
            let n: Vec<i64> = split_subdomains(subdomains)
                .iter()
                .map(|f| i64::from(*f))
                .collect();
            coeffs.insert("n", n);
            if !coeffs.contains_key("delta") {
                coeffs.insert("delta", 0.001);
            }
            if method == "hierarchical" && !coeffs.contains_key("order") {
                coeffs.insert("order", "xyz");
            }
            node.insert(coeffs_key, coeffs);
        }
        Ok(node)
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
