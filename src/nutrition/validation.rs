//! Input validation
//!
//! Pure checks over user-entered values. Nothing here fails: every check
//! returns either no error or a `ValidationError`, so all field problems can
//! be shown at once.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::models::{FoodData, MacroData};

// ============================================================================
// Messages
// ============================================================================

pub const REQUIRED_FIELD: &str = "This field is required";
pub const POSITIVE_NUMBER_ONLY: &str = "Please enter a positive number";
pub const COOKED_EXCEEDS_RAW: &str = "Cooked weight cannot be greater than raw weight";
pub const INVALID_NUMBER: &str = "Please enter a valid number";
pub const STORAGE_ERROR: &str = "Unable to save data. Please try again.";

/// A field-level validation failure. Serializes as its display message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty or whitespace-only text
    RequiredField,
    /// A finite number outside the allowed range
    PositiveNumberOnly,
    /// Cooked weight above raw weight
    CookedExceedsRaw,
    /// NaN or infinite
    InvalidNumber,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::RequiredField => REQUIRED_FIELD,
            ValidationError::PositiveNumberOnly => POSITIVE_NUMBER_ONLY,
            ValidationError::CookedExceedsRaw => COOKED_EXCEEDS_RAW,
            ValidationError::InvalidNumber => INVALID_NUMBER,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Fields that can carry a validation error, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationField {
    Name,
    RawWeight,
    CookedWeight,
    /// Cross-field raw/cooked relationship
    CookingRatio,
    Calories,
    Protein,
    Carbohydrates,
    Fat,
    Fiber,
}

impl ValidationField {
    /// Key used by display layers
    pub fn key(&self) -> &'static str {
        match self {
            ValidationField::Name => "name",
            ValidationField::RawWeight => "rawWeight",
            ValidationField::CookedWeight => "cookedWeight",
            ValidationField::CookingRatio => "cookingRatio",
            ValidationField::Calories => "calories",
            ValidationField::Protein => "protein",
            ValidationField::Carbohydrates => "carbohydrates",
            ValidationField::Fat => "fat",
            ValidationField::Fiber => "fiber",
        }
    }
}

// ============================================================================
// Error records
// ============================================================================

/// Per-field macro errors; `None` means the field passed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MacroValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<ValidationError>,
}

impl MacroValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = (ValidationField, ValidationError)> {
        [
            (ValidationField::Calories, self.calories),
            (ValidationField::Protein, self.protein),
            (ValidationField::Carbohydrates, self.carbohydrates),
            (ValidationField::Fat, self.fat),
            (ValidationField::Fiber, self.fiber),
        ]
        .into_iter()
        .filter_map(|(field, error)| error.map(|e| (field, e)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// All errors for a `FoodData`. Serializes as a camelCase map holding only
/// the failing fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_weight: Option<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooked_weight: Option<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_ratio: Option<ValidationError>,
    #[serde(flatten)]
    pub macros: MacroValidationErrors,
}

impl ValidationErrors {
    /// Failing fields in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (ValidationField, ValidationError)> + '_ {
        [
            (ValidationField::Name, self.name),
            (ValidationField::RawWeight, self.raw_weight),
            (ValidationField::CookedWeight, self.cooked_weight),
            (ValidationField::CookingRatio, self.cooking_ratio),
        ]
        .into_iter()
        .filter_map(|(field, error)| error.map(|e| (field, e)))
        .chain(self.macros.iter())
    }
}

// ============================================================================
// Primitive checks
// ============================================================================

/// Finite and strictly greater than zero
pub fn is_positive_number(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Not NaN and not infinite
pub fn is_valid_number(value: f64) -> bool {
    value.is_finite()
}

/// Has at least one non-whitespace character
pub fn is_non_empty_string(value: &str) -> bool {
    !value.trim().is_empty()
}

// ============================================================================
// Field validators
// ============================================================================

/// Weights must be valid numbers and strictly positive.
/// The validity check runs first so NaN reports as an invalid number.
pub fn validate_weight(weight: f64) -> Option<ValidationError> {
    if !is_valid_number(weight) {
        return Some(ValidationError::InvalidNumber);
    }

    if !is_positive_number(weight) {
        return Some(ValidationError::PositiveNumberOnly);
    }

    None
}

/// Macro values must be valid numbers and may be zero
pub fn validate_macro_value(value: f64) -> Option<ValidationError> {
    if !is_valid_number(value) {
        return Some(ValidationError::InvalidNumber);
    }

    if value < 0.0 {
        return Some(ValidationError::PositiveNumberOnly);
    }

    None
}

/// Check each weight (raw first), then that cooked does not exceed raw.
/// Both weights must be in the same unit.
pub fn validate_cooking_ratio(raw_weight: f64, cooked_weight: f64) -> Option<ValidationError> {
    if let Some(error) = validate_weight(raw_weight) {
        return Some(error);
    }

    if let Some(error) = validate_weight(cooked_weight) {
        return Some(error);
    }

    if cooked_weight > raw_weight {
        return Some(ValidationError::CookedExceedsRaw);
    }

    None
}

pub fn validate_food_name(name: &str) -> Option<ValidationError> {
    if !is_non_empty_string(name) {
        return Some(ValidationError::RequiredField);
    }

    None
}

/// Validate each macro field independently
pub fn validate_macro_data(macros: &MacroData) -> MacroValidationErrors {
    MacroValidationErrors {
        calories: validate_macro_value(macros.calories),
        protein: validate_macro_value(macros.protein),
        carbohydrates: validate_macro_value(macros.carbohydrates),
        fat: validate_macro_value(macros.fat),
        fiber: validate_macro_value(macros.fiber),
    }
}

/// Validate a whole food record.
///
/// The cooking ratio is only checked once both weights pass on their own,
/// and it compares the weights after normalizing both to grams. A weight
/// that is valid in its own unit but overflows to infinity in grams (e.g.
/// 1e306 kg) is reported as `InvalidNumber` under `cookingRatio`, so that
/// field is not exclusively the cooked-exceeds-raw error.
pub fn validate_food_data(data: &FoodData) -> ValidationErrors {
    let raw_weight = validate_weight(data.raw_weight);
    let cooked_weight = validate_weight(data.cooked_weight);

    let cooking_ratio = if raw_weight.is_none() && cooked_weight.is_none() {
        validate_cooking_ratio(data.raw_grams(), data.cooked_grams())
    } else {
        None
    };

    ValidationErrors {
        name: validate_food_name(&data.name),
        raw_weight,
        cooked_weight,
        cooking_ratio,
        macros: validate_macro_data(&data.raw_macros),
    }
}

/// True if any field carries an error
pub fn has_validation_errors(errors: &ValidationErrors) -> bool {
    errors.iter().next().is_some()
}

/// Message of the first failing field in reporting order
pub fn get_first_validation_error(errors: &ValidationErrors) -> Option<&'static str> {
    errors.iter().next().map(|(_, error)| error.message())
}

// ============================================================================
// Input sanitizing
// ============================================================================

pub fn sanitize_string_input(input: &str) -> String {
    input.trim().to_string()
}

/// Parse the leading decimal number of a text input.
///
/// Trailing garbage is ignored ("12g" -> 12); text with no leading number
/// becomes 0. "Infinity" is accepted so it can be reported as invalid.
pub fn sanitize_numeric_input(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let infinity = f64::INFINITY;
        return if s.starts_with('-') { -infinity } else { infinity };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}
