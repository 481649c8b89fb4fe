//! Calculator Status Tool
//!
//! Runtime status of the calculator service, plus the usage guide served by
//! `calculator_instructions`.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::Database;
use crate::models::SavedFood;

/// Calculator usage guide for AI assistants
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# Macro Cooking Calculator Instructions

Nutrition labels describe food **raw**. This calculator converts raw macros
to the cooked portion you actually eat, using the weight lost (or gained) in
cooking.

## What you need

| Field | Notes |
|-------|-------|
| name | Required, surrounding whitespace is trimmed |
| raw_weight + raw_weight_unit | Weight before cooking, must be > 0 |
| cooked_weight + cooked_weight_unit | Weight after cooking, must be > 0 and not above raw |
| calories, protein, carbohydrates, fat, fiber | Macros for the **raw** weight, each >= 0 |

Units: `g` (grams), `oz` (ounces), `lb` (pounds), `kg` (kilograms).
The two weights may use different units; they are compared in grams.

At least one macro must be above zero before results are produced.

---

## One-shot calculation

Call `calculate_macros` with the full food. The response contains:

- `validation_errors` - only the failing fields, keyed by field name
- `is_calculation_valid` - whether results were computed
- `first_error` - the message to show when something is wrong
- `results` - present only when valid:
  - `cookingLossPercentage` - ((raw - cooked) / raw) x 100
  - `adjustedMacros` - raw macros x (cooked / raw)
  - `rawDensityPer100g` / `cookedDensityPer100g`
  - `weightConversions` - both weights in every unit

All result numbers are rounded to 2 decimals.

### Example
200 g raw chicken (220 kcal, 41 g protein, 5 g fat) cooks down to 150 g:
- Cooking loss: 25%
- Adjusted: 165 kcal, 30.75 g protein, 3.75 g fat
- Density per 100 g: 110 kcal both raw and cooked

---

## Interactive session

The server keeps one current food:

1. `update_food` - set any subset of fields; everything is recalculated
2. `get_calculation` - read the current state
3. `reset_food` - back to an empty food in grams

## Saved cooking ratios

- `save_food` - store the current food's cooked/raw ratio under its name.
  Names are unique; saving an existing name keeps the first entry.
- `list_saved_foods` - oldest first
- `load_saved_food` - by `id` or `name`. Keeps the current raw weight and
  unit and sets cooked weight = raw weight x saved ratio.
- `delete_saved_food` - by `id`

## Unit conversion

`convert_weight` converts a value between any two units and also returns
the value in every unit.
"#;

/// Runtime status of the calculator service
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub saved_food_count: Option<usize>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, database: &Database) -> CalculatorStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let saved_food_count = match database.with_conn(SavedFood::load_all) {
            Ok(foods) => Some(foods.len()),
            Err(e) => {
                tracing::warn!("Could not count saved foods: {}", e);
                None
            }
        };

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        CalculatorStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            saved_food_count,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
