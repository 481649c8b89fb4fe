//! Derived calculation output
//!
//! Produced wholesale from a `FoodData`; never updated in place.

use serde::{Deserialize, Serialize};

use super::MacroData;

/// One weight expressed in each supported unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightConversions {
    pub grams: f64,
    pub ounces: f64,
    pub pounds: f64,
    pub kilograms: f64,
}

impl WeightConversions {
    pub fn is_finite(&self) -> bool {
        [self.grams, self.ounces, self.pounds, self.kilograms]
            .iter()
            .all(|v| v.is_finite())
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            grams: f(self.grams),
            ounces: f(self.ounces),
            pounds: f(self.pounds),
            kilograms: f(self.kilograms),
        }
    }
}

/// Conversions for both sides of the cooking transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCookedConversions {
    pub raw: WeightConversions,
    pub cooked: WeightConversions,
}

/// Everything shown for a computable food, rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResults {
    /// Mass lost while cooking, 0-100
    pub cooking_loss_percentage: f64,
    /// Raw macros scaled to the cooked portion
    pub adjusted_macros: MacroData,
    pub raw_density_per_100g: MacroData,
    pub cooked_density_per_100g: MacroData,
    pub weight_conversions: RawCookedConversions,
}

impl CalculationResults {
    /// True if every reported number is finite
    pub fn is_finite(&self) -> bool {
        self.cooking_loss_percentage.is_finite()
            && self.adjusted_macros.is_finite()
            && self.raw_density_per_100g.is_finite()
            && self.cooked_density_per_100g.is_finite()
            && self.weight_conversions.raw.is_finite()
            && self.weight_conversions.cooked.is_finite()
    }
}
