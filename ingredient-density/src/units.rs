//! Unit conversion between volume units, weight units and temperature scales.
//!
//! Volumes convert through milliliters and weights through grams; every
//! unit carries a fixed factor to its base unit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Milliliters per unit.
pub const ML_PER_CUP: f64 = 236.588;
pub const ML_PER_TBSP: f64 = 14.787;
pub const ML_PER_TSP: f64 = 4.929;
pub const ML_PER_FL_OZ: f64 = 29.574;
pub const ML_PER_PINT: f64 = 473.176;
pub const ML_PER_QUART: f64 = 946.353;
pub const ML_PER_GALLON: f64 = 3785.41;
pub const ML_PER_L: f64 = 1000.0;

/// Grams per unit.
pub const GRAMS_PER_OZ: f64 = 28.35;
pub const GRAMS_PER_LB: f64 = 453.592;
pub const GRAMS_PER_KG: f64 = 1000.0;

// =============================================================================
// Volume
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    Cup,
    Tablespoon,
    Teaspoon,
    FluidOunce,
    Pint,
    Quart,
    Gallon,
    Milliliter,
    Liter,
}

impl VolumeUnit {
    pub const ALL: &'static [VolumeUnit] = &[
        VolumeUnit::Cup,
        VolumeUnit::Tablespoon,
        VolumeUnit::Teaspoon,
        VolumeUnit::FluidOunce,
        VolumeUnit::Pint,
        VolumeUnit::Quart,
        VolumeUnit::Gallon,
        VolumeUnit::Milliliter,
        VolumeUnit::Liter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeUnit::Cup => "cup",
            VolumeUnit::Tablespoon => "tablespoon",
            VolumeUnit::Teaspoon => "teaspoon",
            VolumeUnit::FluidOunce => "fluid ounce",
            VolumeUnit::Pint => "pint",
            VolumeUnit::Quart => "quart",
            VolumeUnit::Gallon => "gallon",
            VolumeUnit::Milliliter => "milliliter",
            VolumeUnit::Liter => "liter",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::Cup => "cup",
            VolumeUnit::Tablespoon => "tbsp",
            VolumeUnit::Teaspoon => "tsp",
            VolumeUnit::FluidOunce => "fl_oz",
            VolumeUnit::Pint => "pint",
            VolumeUnit::Quart => "quart",
            VolumeUnit::Gallon => "gallon",
            VolumeUnit::Milliliter => "ml",
            VolumeUnit::Liter => "l",
        }
    }

    /// Size of one unit in milliliters.
    pub fn milliliters(&self) -> f64 {
        match self {
            VolumeUnit::Cup => ML_PER_CUP,
            VolumeUnit::Tablespoon => ML_PER_TBSP,
            VolumeUnit::Teaspoon => ML_PER_TSP,
            VolumeUnit::FluidOunce => ML_PER_FL_OZ,
            VolumeUnit::Pint => ML_PER_PINT,
            VolumeUnit::Quart => ML_PER_QUART,
            VolumeUnit::Gallon => ML_PER_GALLON,
            VolumeUnit::Milliliter => 1.0,
            VolumeUnit::Liter => ML_PER_L,
        }
    }

    /// Convert `amount` of this unit into `to`.
    pub fn convert(self, amount: f64, to: VolumeUnit) -> f64 {
        if self == to {
            return amount;
        }
        amount * self.milliliters() / to.milliliters()
    }

    fn valid_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|u| u.as_str()).collect()
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VolumeUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|u| u.as_str() == lower || u.symbol() == lower)
            .ok_or_else(|| ConversionError::UnsupportedUnit {
                unit: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

// =============================================================================
// Weight
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    Gram,
    Kilogram,
    Ounce,
    Pound,
}

impl WeightUnit {
    pub const ALL: &'static [WeightUnit] = &[
        WeightUnit::Gram,
        WeightUnit::Kilogram,
        WeightUnit::Ounce,
        WeightUnit::Pound,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Gram => "gram",
            WeightUnit::Kilogram => "kilogram",
            WeightUnit::Ounce => "ounce",
            WeightUnit::Pound => "pound",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeightUnit::Gram => "g",
            WeightUnit::Kilogram => "kg",
            WeightUnit::Ounce => "oz",
            WeightUnit::Pound => "lb",
        }
    }

    /// Weight of one unit in grams.
    pub fn grams(&self) -> f64 {
        match self {
            WeightUnit::Gram => 1.0,
            WeightUnit::Kilogram => GRAMS_PER_KG,
            WeightUnit::Ounce => GRAMS_PER_OZ,
            WeightUnit::Pound => GRAMS_PER_LB,
        }
    }

    /// Convert `amount` of this unit into `to`.
    pub fn convert(self, amount: f64, to: WeightUnit) -> f64 {
        if self == to {
            return amount;
        }
        amount * self.grams() / to.grams()
    }

    fn valid_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|u| u.as_str()).collect()
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|u| u.as_str() == lower || u.symbol() == lower)
            .ok_or_else(|| ConversionError::UnsupportedUnit {
                unit: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

// =============================================================================
// Temperature
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub const ALL: &'static [TemperatureUnit] =
        &[TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Celsius => "celsius",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "f",
            TemperatureUnit::Celsius => "c",
        }
    }

    /// Uppercase scale letter used after the degree sign.
    pub fn letter(&self) -> char {
        match self {
            TemperatureUnit::Fahrenheit => 'F',
            TemperatureUnit::Celsius => 'C',
        }
    }

    pub fn convert(self, value: f64, to: TemperatureUnit) -> f64 {
        match (self, to) {
            (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => (value - 32.0) * 5.0 / 9.0,
            (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => (value * 9.0 / 5.0) + 32.0,
            _ => value,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|u| u.as_str() == lower || u.symbol() == lower)
            .ok_or_else(|| ConversionError::UnsupportedUnit {
                unit: s.to_string(),
                valid: Self::ALL.iter().map(|u| u.as_str()).collect(),
            })
    }
}

// =============================================================================
// Name-based conversions
// =============================================================================

/// Convert a volume between two named units.
///
/// Fails with [`ConversionError::UnsupportedUnit`] naming the first unit
/// that is not a known volume unit.
pub fn convert_volume(amount: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConversionError> {
    let from: VolumeUnit = from_unit.parse()?;
    let to: VolumeUnit = to_unit.parse()?;
    Ok(from.convert(amount, to))
}

/// Convert a weight between two named units.
pub fn convert_weight(amount: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConversionError> {
    let from: WeightUnit = from_unit.parse()?;
    let to: WeightUnit = to_unit.parse()?;
    Ok(from.convert(amount, to))
}

/// Convert a temperature between two named scales.
///
/// Any pair other than Fahrenheit/Celsius (in either direction, or the
/// same scale twice) fails with [`ConversionError::UnsupportedConversion`].
pub fn convert_temperature(value: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConversionError> {
    let unsupported = || ConversionError::UnsupportedConversion {
        from: from_unit.to_string(),
        to: to_unit.to_string(),
    };
    let from: TemperatureUnit = from_unit.parse().map_err(|_| unsupported())?;
    let to: TemperatureUnit = to_unit.parse().map_err(|_| unsupported())?;
    Ok(from.convert(value, to))
}
