//! Saved Foods Tools
//!
//! Save, list, look up, and delete named cooking ratios.

use serde::Serialize;

use crate::db::Database;
use crate::models::{FoodData, SavedFood};
use crate::nutrition::validation::{validate_cooking_ratio, validate_food_name, STORAGE_ERROR};

/// Response for save_food
#[derive(Debug, Serialize)]
pub struct SaveFoodResponse {
    /// false when an entry with the same name already existed
    pub saved: bool,
    pub food: SavedFood,
    pub message: String,
}

/// Response for list_saved_foods
#[derive(Debug, Serialize)]
pub struct SavedFoodListResponse {
    pub foods: Vec<SavedFood>,
    pub count: usize,
}

/// Response for delete_saved_food
#[derive(Debug, Serialize)]
pub struct DeleteSavedFoodResponse {
    pub success: bool,
    pub message: String,
}

fn storage_error(action: &str, e: impl std::fmt::Display) -> String {
    tracing::error!("Failed to {} saved foods: {}", action, e);
    STORAGE_ERROR.to_string()
}

/// Save the food's cooking ratio under its name.
///
/// Names are unique: saving an existing name leaves the stored entry as it
/// was and returns it with `saved: false`.
pub fn save_food(db: &Database, food: &FoodData) -> Result<SaveFoodResponse, String> {
    if let Some(error) = validate_food_name(&food.name) {
        return Err(format!("name: {}", error));
    }
    if let Some(error) = validate_cooking_ratio(food.raw_grams(), food.cooked_grams()) {
        return Err(format!("cookingRatio: {}", error));
    }

    let entry = SavedFood::from_food_data(food).map_err(|e| e.to_string())?;

    let existing = db
        .with_transaction(|conn| {
            if let Some(existing) = SavedFood::find_by_name(conn, &entry.name)? {
                return Ok(Some(existing));
            }
            SavedFood::insert(conn, &entry)?;
            Ok(None)
        })
        .map_err(|e| storage_error("store", e))?;

    match existing {
        Some(existing) => {
            tracing::warn!("Saved food '{}' already exists, keeping the stored ratio", existing.name);
            Ok(SaveFoodResponse {
                saved: false,
                message: format!("'{}' is already saved", existing.name),
                food: existing,
            })
        }
        None => {
            tracing::info!(
                "Saved food '{}' with cooking ratio {:.4}",
                entry.name,
                entry.cooking_ratio
            );
            Ok(SaveFoodResponse {
                saved: true,
                message: format!("Saved '{}'", entry.name),
                food: entry,
            })
        }
    }
}

/// All saved foods, oldest first
pub fn list_saved_foods(db: &Database) -> Result<SavedFoodListResponse, String> {
    let mut foods = db
        .with_conn(SavedFood::load_all)
        .map_err(|e| storage_error("load", e))?;
    foods.sort_by_key(|f| f.date_added);

    Ok(SavedFoodListResponse {
        count: foods.len(),
        foods,
    })
}

/// Look up a saved food by ID, or by exact name when no ID is given
pub fn find_saved_food(
    db: &Database,
    id: Option<&str>,
    name: Option<&str>,
) -> Result<SavedFood, String> {
    let (found, not_found) = match (id, name) {
        (Some(id), _) => (
            db.with_conn(|conn| SavedFood::get_by_id(conn, id)),
            format!("Saved food with id '{}' not found", id),
        ),
        (None, Some(name)) => {
            let name = name.trim();
            (
                db.with_conn(|conn| SavedFood::find_by_name(conn, name)),
                format!("Saved food named '{}' not found", name),
            )
        }
        (None, None) => return Err("Either id or name is required".to_string()),
    };

    found
        .map_err(|e| storage_error("load", e))?
        .ok_or(not_found)
}

/// Remove a saved food by ID
pub fn delete_saved_food(db: &Database, id: &str) -> Result<DeleteSavedFoodResponse, String> {
    let deleted = db
        .with_transaction(|conn| SavedFood::delete(conn, id))
        .map_err(|e| storage_error("update", e))?;

    if !deleted {
        return Err(format!("Saved food with id '{}' not found", id));
    }

    tracing::info!("Deleted saved food {}", id);
    Ok(DeleteSavedFoodResponse {
        success: true,
        message: format!("Deleted saved food {}", id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{kv, migrations::run_migrations};
    use crate::models::{MacroData, SAVED_FOODS_KEY};
    use crate::nutrition::WeightUnit;

    fn setup() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("macrocalc.db")).unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        (dir, db)
    }

    fn food(name: &str, raw: f64, cooked: f64) -> FoodData {
        FoodData {
            name: name.to_string(),
            raw_weight: raw,
            raw_weight_unit: WeightUnit::Gram,
            cooked_weight: cooked,
            cooked_weight_unit: WeightUnit::Gram,
            raw_macros: MacroData {
                calories: 100.0,
                ..MacroData::zero()
            },
        }
    }

    #[test]
    fn test_save_and_list() {
        let (_dir, db) = setup();

        let response = save_food(&db, &food("Chicken Breast", 200.0, 150.0)).unwrap();
        assert!(response.saved);
        assert_eq!(response.food.cooking_ratio, 0.75);

        let list = list_saved_foods(&db).unwrap();
        assert_eq!(list.count, 1);
        assert_eq!(list.foods[0].name, "Chicken Breast");
    }

    #[test]
    fn test_save_duplicate_name_keeps_first() {
        let (_dir, db) = setup();

        let first = save_food(&db, &food("Rice", 100.0, 80.0)).unwrap();
        let second = save_food(&db, &food(" Rice ", 100.0, 50.0)).unwrap();
        assert!(!second.saved);
        assert_eq!(second.food.id, first.food.id);
        assert_eq!(second.food.cooking_ratio, 0.8);
        assert_eq!(list_saved_foods(&db).unwrap().count, 1);
    }

    #[test]
    fn test_save_rejects_invalid_food() {
        let (_dir, db) = setup();

        assert!(save_food(&db, &food("  ", 100.0, 80.0)).is_err());
        assert!(save_food(&db, &food("Beef", 0.0, 80.0)).is_err());
        let err = save_food(&db, &food("Beef", 100.0, 120.0)).unwrap_err();
        assert!(err.contains("Cooked weight cannot be greater than raw weight"));
        assert_eq!(list_saved_foods(&db).unwrap().count, 0);
    }

    #[test]
    fn test_list_is_ordered_by_date_added() {
        let (_dir, db) = setup();
        let entries = [("Late", 3), ("Early", 1), ("Middle", 2)]
            .into_iter()
            .map(|(name, date_added)| SavedFood {
                id: name.to_lowercase(),
                name: name.to_string(),
                cooking_ratio: 0.5,
                date_added,
            })
            .collect::<Vec<_>>();
        db.with_conn(|conn| SavedFood::store_all(conn, &entries)).unwrap();

        let names: Vec<_> = list_saved_foods(&db)
            .unwrap()
            .foods
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Early", "Middle", "Late"]);
    }

    #[test]
    fn test_concurrent_saves_all_land() {
        let (_dir, db) = setup();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let db = db.clone();
                std::thread::spawn(move || save_food(&db, &food(&format!("Food {}", i), 100.0, 80.0)))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().unwrap().saved);
        }

        assert_eq!(list_saved_foods(&db).unwrap().count, 8);
    }

    #[test]
    fn test_find_by_id_or_name() {
        let (_dir, db) = setup();
        let saved = save_food(&db, &food("Pasta", 100.0, 90.0)).unwrap().food;

        assert_eq!(find_saved_food(&db, Some(&saved.id), None).unwrap(), saved);
        assert_eq!(find_saved_food(&db, None, Some(" Pasta ")).unwrap(), saved);
        assert!(find_saved_food(&db, Some("missing"), None).is_err());
        assert!(find_saved_food(&db, None, None).is_err());
    }

    #[test]
    fn test_delete_saved_food() {
        let (_dir, db) = setup();
        let saved = save_food(&db, &food("Beef", 100.0, 70.0)).unwrap().food;

        assert!(delete_saved_food(&db, &saved.id).unwrap().success);
        assert!(delete_saved_food(&db, &saved.id).is_err());
        assert_eq!(list_saved_foods(&db).unwrap().count, 0);
    }

    #[test]
    fn test_corrupt_storage_reports_storage_error() {
        let (_dir, db) = setup();
        db.with_conn(|conn| kv::set_value(conn, SAVED_FOODS_KEY, "not json")).unwrap();

        assert_eq!(list_saved_foods(&db).unwrap_err(), STORAGE_ERROR);
        assert_eq!(
            save_food(&db, &food("Rice", 100.0, 80.0)).unwrap_err(),
            STORAGE_ERROR
        );
    }
}
