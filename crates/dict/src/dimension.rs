// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Physical unit exponents.

use crate::value::Value;
use std::fmt;

/// Exponents over the SI base units in OpenFOAM order:
/// mass, length, time, temperature, quantity, current, luminous intensity.
///
/// Always exactly seven entries; unset dimensions are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DimensionVector([i32; 7]);

impl DimensionVector {
    pub const LEN: usize = 7;

    pub const DIMENSIONLESS: Self = Self([0; 7]);

    /// Build from mass, length, time and temperature exponents.
    pub const fn new(mass: i32, length: i32, time: i32, temperature: i32) -> Self {
        Self([mass, length, time, temperature, 0, 0, 0])
    }

    /// Build from all seven exponents.
    pub const fn from_array(exponents: [i32; 7]) -> Self {
        Self(exponents)
    }

    pub fn as_array(&self) -> &[i32; 7] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|e| *e == 0)
    }

    /// `[dims] value` form used for dimensioned scalars.
    pub fn dimensioned(&self, value: impl fmt::Display) -> String {
        format!("{} {}", self, value)
    }
}

impl fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

impl From<DimensionVector> for Value {
    fn from(dims: DimensionVector) -> Self {
        Value::Str(dims.to_string())
    }
}

#[cfg(test)]
#[path = "dimension_tests.rs"]
mod tests;
