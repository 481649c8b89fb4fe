//! Food input record
//!
//! The single food being calculated: its raw and cooked weights, each in its
//! own unit, and its macros at the raw weight.

use serde::{Deserialize, Serialize};

use super::MacroData;
use crate::nutrition::units::{to_grams, WeightUnit};

/// A food's weights and raw macros.
///
/// The relationships between fields (cooked <= raw, raw > 0, ...) are only
/// checked by `validate_food_data`, never by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodData {
    pub name: String,
    pub raw_weight: f64,
    #[serde(default)]
    pub raw_weight_unit: WeightUnit,
    pub cooked_weight: f64,
    #[serde(default)]
    pub cooked_weight_unit: WeightUnit,
    #[serde(default)]
    pub raw_macros: MacroData,
}

impl FoodData {
    /// Raw weight normalized to grams
    pub fn raw_grams(&self) -> f64 {
        to_grams(self.raw_weight, self.raw_weight_unit)
    }

    /// Cooked weight normalized to grams
    pub fn cooked_grams(&self) -> f64 {
        to_grams(self.cooked_weight, self.cooked_weight_unit)
    }
}

/// Partial update applied to a `FoodData` field by field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodDataUpdate {
    pub name: Option<String>,
    pub raw_weight: Option<f64>,
    pub raw_weight_unit: Option<WeightUnit>,
    pub cooked_weight: Option<f64>,
    pub cooked_weight_unit: Option<WeightUnit>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
}

impl FoodDataUpdate {
    /// Produce a new record with the provided fields replaced
    pub fn apply_to(&self, food: &FoodData) -> FoodData {
        let mut next = food.clone();

        macro_rules! set_field {
            ($field:ident) => {
                if let Some(ref val) = self.$field {
                    next.$field = val.clone();
                }
            };
            ($field:ident => $($path:ident).+) => {
                if let Some(val) = self.$field {
                    next.$($path).+ = val;
                }
            };
        }

        set_field!(name);
        set_field!(raw_weight);
        set_field!(raw_weight_unit);
        set_field!(cooked_weight);
        set_field!(cooked_weight_unit);
        set_field!(calories => raw_macros.calories);
        set_field!(protein => raw_macros.protein);
        set_field!(carbohydrates => raw_macros.carbohydrates);
        set_field!(fat => raw_macros.fat);
        set_field!(fiber => raw_macros.fiber);

        next
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.raw_weight.is_none()
            && self.raw_weight_unit.is_none()
            && self.cooked_weight.is_none()
            && self.cooked_weight_unit.is_none()
            && self.calories.is_none()
            && self.protein.is_none()
            && self.carbohydrates.is_none()
            && self.fat.is_none()
            && self.fiber.is_none()
    }
}
