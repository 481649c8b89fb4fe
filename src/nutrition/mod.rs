//! Nutrition calculation module
//!
//! Unit conversion, input validation, and the cooking calculation engine.

pub mod calculations;
pub mod error;
pub mod units;
pub mod validation;

pub use calculations::{
    adjust_macros_for_cooking, calculate_cooking_loss, calculate_nutrient_density,
    format_macro_data, format_macro_value,
};
pub use error::{CalcError, CalcResult};
pub use units::{
    convert_weight, convert_weight_codes, format_weight, get_all_weight_conversions, to_grams,
    validate_weight_unit, WeightUnit,
};
pub use validation::{
    get_first_validation_error, has_validation_errors, validate_food_data, ValidationError,
    ValidationErrors, ValidationField,
};
