//! Weight units and conversion
//!
//! Every conversion goes through grams: the source value is normalized to
//! grams, then scaled into the target unit. The factors are the rounded
//! household values, so a round trip is only accurate to ~4-5 significant
//! digits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{CalcError, CalcResult};
use crate::models::WeightConversions;

/// A mass unit accepted for raw and cooked weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "kg")]
    Kilogram,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 4] = [
        WeightUnit::Gram,
        WeightUnit::Ounce,
        WeightUnit::Pound,
        WeightUnit::Kilogram,
    ];

    /// Short unit code ("g", "oz", "lb", "kg")
    pub fn code(&self) -> &'static str {
        match self {
            WeightUnit::Gram => "g",
            WeightUnit::Ounce => "oz",
            WeightUnit::Pound => "lb",
            WeightUnit::Kilogram => "kg",
        }
    }

    /// Display label for a results view
    pub fn label(&self) -> &'static str {
        match self {
            WeightUnit::Gram => "grams",
            WeightUnit::Ounce => "ounces",
            WeightUnit::Pound => "pounds",
            WeightUnit::Kilogram => "kilograms",
        }
    }

    /// Parse an exact unit code. Anything outside the four codes is rejected.
    pub fn from_code(code: &str) -> CalcResult<Self> {
        match code {
            "g" => Ok(WeightUnit::Gram),
            "oz" => Ok(WeightUnit::Ounce),
            "lb" => Ok(WeightUnit::Pound),
            "kg" => Ok(WeightUnit::Kilogram),
            other => Err(CalcError::UnsupportedUnit(other.to_string())),
        }
    }

    fn to_grams_factor(self) -> f64 {
        match self {
            WeightUnit::Gram => 1.0,
            WeightUnit::Ounce => OUNCES_TO_GRAMS,
            WeightUnit::Pound => POUNDS_TO_GRAMS,
            WeightUnit::Kilogram => KILOGRAMS_TO_GRAMS,
        }
    }

    fn from_grams_factor(self) -> f64 {
        match self {
            WeightUnit::Gram => 1.0,
            WeightUnit::Ounce => GRAMS_TO_OUNCES,
            WeightUnit::Pound => GRAMS_TO_POUNDS,
            WeightUnit::Kilogram => GRAMS_TO_KILOGRAMS,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for WeightUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

// ============================================================================
// Weight Conversion Constants
// ============================================================================

pub const GRAMS_TO_OUNCES: f64 = 0.035274;
pub const OUNCES_TO_GRAMS: f64 = 28.3495;
pub const GRAMS_TO_POUNDS: f64 = 0.00220462;
pub const POUNDS_TO_GRAMS: f64 = 453.592;
pub const GRAMS_TO_KILOGRAMS: f64 = 0.001;
pub const KILOGRAMS_TO_GRAMS: f64 = 1000.0;

// ============================================================================
// Conversion
// ============================================================================

/// Convert a weight between units, normalizing through grams
pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    if from == to {
        return value;
    }

    let grams = value * from.to_grams_factor();
    grams * to.from_grams_factor()
}

/// Convert a weight between units given as runtime unit codes
pub fn convert_weight_codes(value: f64, from: &str, to: &str) -> CalcResult<f64> {
    let from = WeightUnit::from_code(from)?;
    let to = WeightUnit::from_code(to)?;
    Ok(convert_weight(value, from, to))
}

/// Shorthand for converting into grams
pub fn to_grams(value: f64, unit: WeightUnit) -> f64 {
    convert_weight(value, unit, WeightUnit::Gram)
}

/// Express a single weight in all four units
pub fn get_all_weight_conversions(weight: f64, unit: WeightUnit) -> WeightConversions {
    WeightConversions {
        grams: convert_weight(weight, unit, WeightUnit::Gram),
        ounces: convert_weight(weight, unit, WeightUnit::Ounce),
        pounds: convert_weight(weight, unit, WeightUnit::Pound),
        kilograms: convert_weight(weight, unit, WeightUnit::Kilogram),
    }
}

/// Round to 2 decimal places, half away from zero
pub fn format_weight(weight: f64) -> f64 {
    (weight * 100.0).round() / 100.0
}

/// True iff `code` is exactly one of the four unit codes
pub fn validate_weight_unit(code: &str) -> bool {
    WeightUnit::from_code(code).is_ok()
}
