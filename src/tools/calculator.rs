//! Calculator Tools
//!
//! Decides when a food is computable, runs the full calculation, and keeps
//! the current food record for interactive sessions.

use serde::Serialize;

use crate::models::{
    CalculationResults, FoodData, FoodDataUpdate, RawCookedConversions, SavedFood,
    WeightConversions,
};
use crate::nutrition::validation::{sanitize_string_input, validate_food_data};
use crate::nutrition::{
    adjust_macros_for_cooking, calculate_cooking_loss, calculate_nutrient_density,
    convert_weight_codes, format_macro_data, format_weight, get_all_weight_conversions,
    get_first_validation_error, has_validation_errors, CalcError, CalcResult, ValidationErrors,
    WeightUnit,
};

/// Validation outcome plus results, when the food is computable
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorView {
    pub food: FoodData,
    pub validation_errors: ValidationErrors,
    pub is_calculation_valid: bool,
    pub first_error: Option<&'static str>,
    /// None while the input is incomplete or invalid
    pub results: Option<CalculationResults>,
}

/// Response for validate_food
#[derive(Debug, Serialize)]
pub struct ValidateFoodResponse {
    pub errors: ValidationErrors,
    pub has_errors: bool,
    pub first_error: Option<&'static str>,
    pub can_calculate: bool,
}

/// Response for convert_weight
#[derive(Debug, Serialize)]
pub struct ConvertWeightResponse {
    pub value: f64,
    pub from_unit: WeightUnit,
    pub to_unit: WeightUnit,
    pub result: f64,
    /// The input weight in every unit, rounded to 2 decimals
    pub all_units: WeightConversions,
}

/// Whether the engine may run for `data`.
///
/// Requires no validation errors, a name, both weights above zero, cooked not
/// above raw (compared in grams), and at least one positive macro.
pub fn can_calculate(data: &FoodData, errors: &ValidationErrors) -> bool {
    let has_required_data = !data.name.trim().is_empty()
        && data.raw_weight > 0.0
        && data.cooked_weight > 0.0
        && data.cooked_grams() <= data.raw_grams();

    !has_validation_errors(errors) && has_required_data && data.raw_macros.has_any_positive()
}

/// Full result set for a food that passed `can_calculate`, every number
/// rounded to 2 decimals
pub fn calculate_results(data: &FoodData) -> CalcResult<CalculationResults> {
    let cooking_loss = calculate_cooking_loss(data.raw_grams(), data.cooked_grams())?;

    let adjusted_macros = format_macro_data(&adjust_macros_for_cooking(
        &data.raw_macros,
        data.raw_weight,
        data.raw_weight_unit,
        data.cooked_weight,
        data.cooked_weight_unit,
    )?);

    let raw_density_per_100g = format_macro_data(&calculate_nutrient_density(
        &data.raw_macros,
        data.raw_weight,
        data.raw_weight_unit,
    )?);

    let cooked_density_per_100g = format_macro_data(&calculate_nutrient_density(
        &adjusted_macros,
        data.cooked_weight,
        data.cooked_weight_unit,
    )?);

    let weight_conversions = RawCookedConversions {
        raw: get_all_weight_conversions(data.raw_weight, data.raw_weight_unit).map(format_weight),
        cooked: get_all_weight_conversions(data.cooked_weight, data.cooked_weight_unit)
            .map(format_weight),
    };

    let results = CalculationResults {
        cooking_loss_percentage: format_weight(cooking_loss),
        adjusted_macros,
        raw_density_per_100g,
        cooked_density_per_100g,
        weight_conversions,
    };

    if !results.is_finite() {
        return Err(CalcError::NonFiniteResult);
    }

    Ok(results)
}

/// Validate, gate, and calculate in one pass
pub fn evaluate(data: &FoodData) -> CalculatorView {
    let validation_errors = validate_food_data(data);
    let is_calculation_valid = can_calculate(data, &validation_errors);

    let results = if is_calculation_valid {
        match calculate_results(data) {
            Ok(results) => Some(results),
            Err(e) => {
                // Gate passed but the engine refused; fall back to the neutral state
                tracing::error!("Calculation failed for '{}' after passing validation: {}", data.name, e);
                None
            }
        }
    } else {
        None
    };

    CalculatorView {
        food: data.clone(),
        validation_errors,
        is_calculation_valid,
        first_error: get_first_validation_error(&validation_errors),
        results,
    }
}

/// Re-populate weights from a saved cooking ratio.
///
/// Keeps the current raw weight and unit and derives the cooked weight in
/// that same unit; the saved food's name replaces the current one.
pub fn apply_saved_food(food: &FoodData, saved: &SavedFood) -> FoodData {
    FoodData {
        name: saved.name.clone(),
        cooked_weight: saved.cooked_weight_for(food.raw_weight),
        cooked_weight_unit: food.raw_weight_unit,
        ..food.clone()
    }
}

/// The food currently being entered, recomputed on every change
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    view: CalculatorView,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    /// Start with an all-zero food in grams
    pub fn new() -> Self {
        Self {
            view: evaluate(&FoodData::default()),
        }
    }

    pub fn food(&self) -> &FoodData {
        &self.view.food
    }

    pub fn view(&self) -> &CalculatorView {
        &self.view
    }

    /// Replace the whole record
    pub fn set_food(&mut self, food: FoodData) -> &CalculatorView {
        self.view = evaluate(&food);
        tracing::debug!(
            "Recalculated '{}': valid={}",
            self.view.food.name,
            self.view.is_calculation_valid
        );
        &self.view
    }

    /// Apply a partial update; the name is trimmed on the way in.
    /// An empty update leaves the current view as it is.
    pub fn update(&mut self, update: &FoodDataUpdate) -> &CalculatorView {
        if update.is_empty() {
            return &self.view;
        }
        let mut next = update.apply_to(&self.view.food);
        if update.name.is_some() {
            next.name = sanitize_string_input(&next.name);
        }
        self.set_food(next)
    }

    pub fn reset(&mut self) -> &CalculatorView {
        self.set_food(FoodData::default())
    }

    pub fn apply_saved_food(&mut self, saved: &SavedFood) -> &CalculatorView {
        let next = apply_saved_food(&self.view.food, saved);
        self.set_food(next)
    }
}

/// Validate a food without calculating
pub fn validate_food(data: &FoodData) -> ValidateFoodResponse {
    let errors = validate_food_data(data);
    ValidateFoodResponse {
        errors,
        has_errors: has_validation_errors(&errors),
        first_error: get_first_validation_error(&errors),
        can_calculate: can_calculate(data, &errors),
    }
}

/// Convert a weight between unit codes
pub fn convert_weight(value: f64, from_unit: &str, to_unit: &str) -> Result<ConvertWeightResponse, String> {
    if !value.is_finite() {
        return Err(crate::nutrition::validation::INVALID_NUMBER.to_string());
    }
    let result = convert_weight_codes(value, from_unit, to_unit).map_err(|e| e.to_string())?;
    let from = WeightUnit::from_code(from_unit).map_err(|e| e.to_string())?;
    let to = WeightUnit::from_code(to_unit).map_err(|e| e.to_string())?;

    Ok(ConvertWeightResponse {
        value,
        from_unit: from,
        to_unit: to,
        result,
        all_units: get_all_weight_conversions(value, from).map(format_weight),
    })
}
