//! Data models
//!
//! Food input, derived results, and the saved-food entity.

mod food;
mod macros;
mod results;
mod saved_food;

pub use food::{FoodData, FoodDataUpdate};
pub use macros::MacroData;
pub use results::{CalculationResults, RawCookedConversions, WeightConversions};
pub use saved_food::{SavedFood, SAVED_FOODS_KEY};
