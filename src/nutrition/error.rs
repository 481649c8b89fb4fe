//! Calculation engine errors
//!
//! Raised when an engine function is called with values the validation
//! layer should have rejected first.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Unsupported weight unit: {0}")]
    UnsupportedUnit(String),

    #[error("Raw weight must be greater than 0")]
    InvalidRawWeight,

    #[error("Cooked weight cannot be negative")]
    NegativeCookedWeight,

    #[error("Cooked weight cannot be greater than raw weight")]
    CookedExceedsRaw,

    #[error("Weight must be greater than 0")]
    InvalidWeight,

    #[error("Calculation produced a value out of range")]
    NonFiniteResult,
}

/// Result type for engine operations
pub type CalcResult<T> = Result<T, CalcError>;
