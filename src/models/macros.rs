//! Macronutrient values
//!
//! Used for raw input, cooked-portion totals, and per-100g densities.

use serde::{Deserialize, Serialize};

/// Macronutrients for some amount of food.
///
/// Carries no basis weight of its own; whoever holds it knows which weight
/// and unit the values refer to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroData {
    pub calories: f64,
    pub protein: f64,       // grams
    pub carbohydrates: f64, // grams
    pub fat: f64,           // grams
    pub fiber: f64,         // grams
}

impl MacroData {
    /// All-zero macros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale every field by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        self.map(|v| v * multiplier)
    }

    /// Apply `f` to every field
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            carbohydrates: f(self.carbohydrates),
            fat: f(self.fat),
            fiber: f(self.fiber),
        }
    }

    /// Field values in declaration order
    pub fn values(&self) -> [f64; 5] {
        [
            self.calories,
            self.protein,
            self.carbohydrates,
            self.fat,
            self.fiber,
        ]
    }

    /// True if any field is strictly positive
    pub fn has_any_positive(&self) -> bool {
        self.values().iter().any(|v| *v > 0.0)
    }

    /// True if no field is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.values().iter().all(|v| v.is_finite())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn chicken() -> MacroData {
        MacroData {
            calories: 220.0,
            protein: 41.0,
            carbohydrates: 0.0,
            fat: 5.0,
            fiber: 0.0,
        }
    }

    #[test]
    fn test_scale_returns_new_value() {
        let raw = chicken();
        let half = raw.scale(0.5);
        assert_eq!(half.calories, 110.0);
        assert_eq!(half.protein, 20.5);
        assert_eq!(half.fat, 2.5);
        // original untouched
        assert_eq!(raw.calories, 220.0);
    }

    #[test]
    fn test_has_any_positive() {
        assert!(!MacroData::zero().has_any_positive());
        assert!(chicken().has_any_positive());
        let only_fiber = MacroData { fiber: 0.1, ..MacroData::zero() };
        assert!(only_fiber.has_any_positive());
    }

    #[test]
    fn test_is_finite() {
        assert!(chicken().is_finite());
        assert!(!MacroData { protein: f64::NAN, ..chicken() }.is_finite());
        assert!(!chicken().scale(f64::INFINITY).is_finite());
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(chicken()).unwrap();
        assert_eq!(json["carbohydrates"], 0.0);
        assert_eq!(json["protein"], 41.0);
    }
}
