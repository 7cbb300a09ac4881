//! Length units and unit conversion

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A length unit a host may use internally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    Millimeter,
    Centimeter,
    Meter,
    Inch,
}

impl LengthUnit {
    /// Size of one unit in meters
    pub fn meters_per_unit(self) -> f64 {
        match self {
            LengthUnit::Millimeter => 0.001,
            LengthUnit::Centimeter => 0.01,
            LengthUnit::Meter => 1.0,
            LengthUnit::Inch => 0.0254,
        }
    }

    /// Short symbol ("mm", "cm", ...)
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
            LengthUnit::Inch => "in",
        }
    }

    /// Get all units
    pub fn all() -> [LengthUnit; 4] {
        [
            LengthUnit::Millimeter,
            LengthUnit::Centimeter,
            LengthUnit::Meter,
            LengthUnit::Inch,
        ]
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Returned when a unit symbol is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown length unit: {0}")]
pub struct UnknownUnit(pub String);

impl FromStr for LengthUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LengthUnit::all()
            .into_iter()
            .find(|unit| unit.symbol().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

/// Unit conversion capability of a host
pub trait UnitsManager {
    /// The unit the host stores lengths in
    fn internal_units(&self) -> LengthUnit;

    /// Convert `value` from one unit to another
    fn convert(&self, value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
        if from == to {
            return value;
        }
        value * from.meters_per_unit() / to.meters_per_unit()
    }

    /// Convert a millimeter value to the internal unit
    fn from_millimeters(&self, value: f64) -> f64 {
        self.convert(value, LengthUnit::Millimeter, self.internal_units())
    }
}

/// A units manager with a fixed internal unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedUnits {
    internal: LengthUnit,
}

impl FixedUnits {
    /// Create a units manager storing lengths in `internal`
    pub fn new(internal: LengthUnit) -> Self {
        Self { internal }
    }
}

impl UnitsManager for FixedUnits {
    fn internal_units(&self) -> LengthUnit {
        self.internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_same_unit_is_identity() {
        let units = FixedUnits::default();
        assert_eq!(units.from_millimeters(1.31), 1.31);
    }

    #[test]
    fn test_mm_to_cm() {
        let units = FixedUnits::new(LengthUnit::Centimeter);
        assert_relative_eq!(units.from_millimeters(67.23), 6.723, epsilon = 1e-12);
        assert_relative_eq!(
            units.convert(1.0, LengthUnit::Inch, LengthUnit::Millimeter),
            25.4,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!("mm".parse::<LengthUnit>(), Ok(LengthUnit::Millimeter));
        assert_eq!("CM".parse::<LengthUnit>(), Ok(LengthUnit::Centimeter));
        assert_eq!(" in ".parse::<LengthUnit>(), Ok(LengthUnit::Inch));
        assert!("furlong".parse::<LengthUnit>().is_err());
    }
}
