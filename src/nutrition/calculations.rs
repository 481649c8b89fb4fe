//! Calculation engine
//!
//! Cooking loss, macro adjustment, and per-100g density. These functions
//! assume the input already passed validation and fail fast otherwise.

use super::error::{CalcError, CalcResult};
use super::units::{format_weight, to_grams, WeightUnit};
use crate::models::MacroData;

/// Reference mass for nutrient density
pub const DENSITY_REFERENCE_GRAMS: f64 = 100.0;

/// Percentage of mass lost in cooking, unrounded.
///
/// Formula: ((raw - cooked) / raw) * 100. Both weights must already be in
/// the same unit.
pub fn calculate_cooking_loss(raw_weight: f64, cooked_weight: f64) -> CalcResult<f64> {
    if raw_weight.is_nan() || raw_weight <= 0.0 {
        return Err(CalcError::InvalidRawWeight);
    }
    if cooked_weight.is_nan() || cooked_weight < 0.0 {
        return Err(CalcError::NegativeCookedWeight);
    }
    if cooked_weight > raw_weight {
        return Err(CalcError::CookedExceedsRaw);
    }

    Ok(((raw_weight - cooked_weight) / raw_weight) * 100.0)
}

/// Scale raw macros to the cooked portion.
///
/// Formula: raw value * (cooked grams / raw grams). A cooked weight above the
/// raw weight is not rejected here; the ratio is then simply above 1.
pub fn adjust_macros_for_cooking(
    raw_macros: &MacroData,
    raw_weight: f64,
    raw_unit: WeightUnit,
    cooked_weight: f64,
    cooked_unit: WeightUnit,
) -> CalcResult<MacroData> {
    let raw_grams = to_grams(raw_weight, raw_unit);
    let cooked_grams = to_grams(cooked_weight, cooked_unit);

    if raw_grams.is_nan() || raw_grams <= 0.0 {
        return Err(CalcError::InvalidRawWeight);
    }
    if cooked_grams.is_nan() || cooked_grams < 0.0 {
        return Err(CalcError::NegativeCookedWeight);
    }

    let ratio = cooked_grams / raw_grams;
    Ok(raw_macros.scale(ratio))
}

/// Normalize macros for `weight` to a 100 g basis.
///
/// Weights so small that the 100 g multiplier overflows are rejected.
pub fn calculate_nutrient_density(
    macros: &MacroData,
    weight: f64,
    unit: WeightUnit,
) -> CalcResult<MacroData> {
    let grams = to_grams(weight, unit);

    if grams.is_nan() || grams <= 0.0 {
        return Err(CalcError::InvalidWeight);
    }

    let multiplier = DENSITY_REFERENCE_GRAMS / grams;
    if !multiplier.is_finite() {
        return Err(CalcError::InvalidWeight);
    }

    Ok(macros.scale(multiplier))
}

/// Round a macro value to 2 decimal places
pub fn format_macro_value(value: f64) -> f64 {
    format_weight(value)
}

/// Round every macro field to 2 decimal places
pub fn format_macro_data(macros: &MacroData) -> MacroData {
    macros.map(format_macro_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: WeightUnit = WeightUnit::Gram;

    fn chicken() -> MacroData {
        MacroData {
            calories: 220.0,
            protein: 41.0,
            carbohydrates: 0.0,
            fat: 5.0,
            fiber: 0.0,
        }
    }

    fn assert_macros_close(actual: &MacroData, expected: &MacroData, tolerance: f64) {
        for (a, e) in actual.values().iter().zip(expected.values().iter()) {
            assert!((a - e).abs() <= tolerance, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_cooking_loss_examples() {
        assert_eq!(calculate_cooking_loss(200.0, 150.0).unwrap(), 25.0);
        assert_eq!(calculate_cooking_loss(100.0, 80.0).unwrap(), 20.0);
        assert_eq!(calculate_cooking_loss(100.0, 100.0).unwrap(), 0.0);
        assert_eq!(calculate_cooking_loss(100.0, 0.0).unwrap(), 100.0);
    }

    #[test]
    fn test_cooking_loss_is_unrounded() {
        let loss = calculate_cooking_loss(3.0, 2.0).unwrap();
        assert!((loss - 100.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_cooking_loss_domain_errors() {
        for x in [-10.0, 0.0, 50.0, 500.0] {
            assert_eq!(calculate_cooking_loss(0.0, x), Err(CalcError::InvalidRawWeight));
            assert_eq!(calculate_cooking_loss(-100.0, x), Err(CalcError::InvalidRawWeight));
        }
        for r in [0.1, 100.0, 1e6] {
            assert_eq!(calculate_cooking_loss(r, -1.0), Err(CalcError::NegativeCookedWeight));
            assert_eq!(calculate_cooking_loss(r, r * 1.5), Err(CalcError::CookedExceedsRaw));
        }
        assert_eq!(calculate_cooking_loss(f64::NAN, 1.0), Err(CalcError::InvalidRawWeight));
        assert_eq!(calculate_cooking_loss(100.0, f64::NAN), Err(CalcError::NegativeCookedWeight));
    }

    #[test]
    fn test_cooking_loss_bounds() {
        for raw in [0.5, 1.0, 200.0, 12345.0] {
            for fraction in [0.01, 0.25, 0.5, 0.999, 1.0] {
                let cooked = raw * fraction;
                let loss = calculate_cooking_loss(raw, cooked).unwrap();
                assert!((0.0..=100.0).contains(&loss));
                assert_eq!(loss == 0.0, cooked == raw);
            }
        }
    }

    #[test]
    fn test_adjust_macros_example() {
        let adjusted = adjust_macros_for_cooking(&chicken(), 200.0, G, 150.0, G).unwrap();
        assert_eq!(
            adjusted,
            MacroData {
                calories: 165.0,
                protein: 30.75,
                carbohydrates: 0.0,
                fat: 3.75,
                fiber: 0.0,
            }
        );
    }

    #[test]
    fn test_adjust_macros_zero_and_identity() {
        let zeroed = adjust_macros_for_cooking(&chicken(), 200.0, G, 0.0, G).unwrap();
        assert_eq!(zeroed, MacroData::zero());

        let same = adjust_macros_for_cooking(&chicken(), 200.0, G, 200.0, G).unwrap();
        assert_eq!(same, chicken());
    }

    #[test]
    fn test_adjust_macros_is_linear_in_ratio() {
        let macros = chicken();
        for (raw, cooked) in [(100.0, 80.0), (250.0, 100.0), (3.0, 1.0), (10.0, 12.0)] {
            let adjusted = adjust_macros_for_cooking(&macros, raw, G, cooked, G).unwrap();
            assert_macros_close(&adjusted, &macros.scale(cooked / raw), 1e-9);
        }
    }

    #[test]
    fn test_adjust_macros_mixed_units() {
        // 1 kg raw to 750 g cooked
        let adjusted =
            adjust_macros_for_cooking(&chicken(), 1.0, WeightUnit::Kilogram, 750.0, G).unwrap();
        assert_macros_close(&adjusted, &chicken().scale(0.75), 1e-9);
    }

    #[test]
    fn test_adjust_macros_errors() {
        assert_eq!(
            adjust_macros_for_cooking(&chicken(), 0.0, G, 10.0, G),
            Err(CalcError::InvalidRawWeight)
        );
        assert_eq!(
            adjust_macros_for_cooking(&chicken(), 100.0, G, -1.0, WeightUnit::Ounce),
            Err(CalcError::NegativeCookedWeight)
        );
        assert_eq!(
            adjust_macros_for_cooking(&chicken(), 100.0, G, f64::NAN, G),
            Err(CalcError::NegativeCookedWeight)
        );
    }

    #[test]
    fn test_nutrient_density_example() {
        let density = calculate_nutrient_density(&chicken(), 200.0, G).unwrap();
        assert_eq!(density.calories, 110.0);
        assert_eq!(density.protein, 20.5);
        assert_eq!(density.fat, 2.5);
        assert_eq!(density.carbohydrates, 0.0);
    }

    #[test]
    fn test_nutrient_density_in_other_units() {
        // 1 lb = 453.592 g
        let density = calculate_nutrient_density(&chicken(), 1.0, WeightUnit::Pound).unwrap();
        assert!((density.calories - 220.0 * 100.0 / 453.592).abs() < 1e-9);
    }

    #[test]
    fn test_nutrient_density_rejects_non_positive() {
        assert_eq!(calculate_nutrient_density(&chicken(), 0.0, G), Err(CalcError::InvalidWeight));
        assert_eq!(
            calculate_nutrient_density(&chicken(), -2.0, WeightUnit::Kilogram),
            Err(CalcError::InvalidWeight)
        );
        // 100 / 1e-320 overflows
        assert_eq!(calculate_nutrient_density(&chicken(), 1e-320, G), Err(CalcError::InvalidWeight));
    }

    #[test]
    fn test_density_is_invariant_under_cooking() {
        let macros = chicken();
        for raw in [50.0, 200.0, 1000.0] {
            for cooked in [10.0, 49.0, 150.0, 999.0] {
                if cooked > raw {
                    continue;
                }
                let raw_density = calculate_nutrient_density(&macros, raw, G).unwrap();
                let adjusted = adjust_macros_for_cooking(&macros, raw, G, cooked, G).unwrap();
                let cooked_density = calculate_nutrient_density(&adjusted, cooked, G).unwrap();
                assert_macros_close(&raw_density, &cooked_density, 1e-9);
            }
        }
    }

    #[test]
    fn test_format_macro_value() {
        assert_eq!(format_macro_value(std::f64::consts::PI), 3.14);
        assert_eq!(format_macro_value(100.999), 101.0);
        assert_eq!(format_macro_value(-std::f64::consts::PI), -3.14);
    }

    #[test]
    fn test_format_macro_value_is_idempotent() {
        for x in [0.0, 1.005, 2.675, 3.14159, -7.777, 123456.789, 1e-7, 99.995] {
            let once = format_macro_value(x);
            assert_eq!(format_macro_value(once), once);
        }
    }

    #[test]
    fn test_format_macro_data() {
        let macros = MacroData {
            calories: 123.456,
            protein: 7.891,
            carbohydrates: 0.004,
            fat: 1.0,
            fiber: 2.345678,
        };
        assert_eq!(
            format_macro_data(&macros),
            MacroData {
                calories: 123.46,
                protein: 7.89,
                carbohydrates: 0.0,
                fat: 1.0,
                fiber: 2.35,
            }
        );
    }
}
