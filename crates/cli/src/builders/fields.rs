// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Initial-condition field files in `0/`.

use super::parameter::{field_attributes, FieldKind};
use super::{BuildError, DictionaryBuilder, FileContext, FileSpec};
use crate::settings::{CaseLocation, Settings};
use foamrig_dict::{DictNode, DimensionVector};

/// Physical quantity carried by a field file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    KinematicPressure,
    Velocity,
    TurbulentKineticEnergy,
    DissipationRate,
    TurbulentViscosity,
    TurbulentThermalDiffusivity,
    Temperature,
}

impl Quantity {
    pub fn dimensions(&self) -> DimensionVector {
        match self {
            Quantity::KinematicPressure => DimensionVector::new(0, 2, -2, 0),
            Quantity::Velocity => DimensionVector::new(0, 1, -1, 0),
            Quantity::TurbulentKineticEnergy => DimensionVector::new(0, 2, -2, 0),
            Quantity::DissipationRate => DimensionVector::new(0, 2, -3, 0),
            Quantity::TurbulentViscosity => DimensionVector::new(0, 2, -1, 0),
            Quantity::TurbulentThermalDiffusivity => DimensionVector::new(0, 2, -1, 0),
            Quantity::Temperature => DimensionVector::new(0, 0, 0, 1),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Quantity::Velocity => FieldKind::Vector,
            _ => FieldKind::Scalar,
        }
    }
}

/// One field file; named constructors cover the fields the exporter writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldFile {
    name: String,
    quantity: Quantity,
}

impl FieldFile {
    pub fn new(name: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    pub fn pressure() -> Self {
        Self::new("p", Quantity::KinematicPressure)
    }

    /// `p_rgh`: same units and boundary handling as `p`, different file.
    pub fn hydrostatic_pressure() -> Self {
        Self::pressure().renamed("p_rgh")
    }

    pub fn velocity() -> Self {
        Self::new("U", Quantity::Velocity)
    }

    pub fn turbulent_kinetic_energy() -> Self {
        Self::new("k", Quantity::TurbulentKineticEnergy)
    }

    pub fn dissipation_rate() -> Self {
        Self::new("epsilon", Quantity::DissipationRate)
    }

    pub fn turbulent_viscosity() -> Self {
        Self::new("nut", Quantity::TurbulentViscosity)
    }

    pub fn turbulent_thermal_diffusivity() -> Self {
        Self::new("alphat", Quantity::TurbulentThermalDiffusivity)
    }

    pub fn temperature() -> Self {
        Self::new("T", Quantity::Temperature)
    }

    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

impl DictionaryBuilder for FieldFile {
    fn spec(&self, settings: &Settings) -> FileSpec {
        FileSpec::new(
            self.name.as_str(),
            self.quantity.kind().class(),
            CaseLocation::Zero,
            settings.format,
        )
    }

    fn init_attributes(&self, ctx: &FileContext<'_>) -> Result<DictNode, BuildError> {
        field_attributes(ctx, self.quantity.kind(), self.quantity.dimensions())
    }
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
