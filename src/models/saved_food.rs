//! Saved Food model
//!
//! A named cooking ratio kept for reuse. The whole list lives as one JSON
//! array in the key-value store under `SAVED_FOODS_KEY`.

use chrono::Utc;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{kv, DbResult};
use crate::nutrition::{CalcError, CalcResult};
use super::FoodData;

/// Storage slot for the saved-foods list
pub const SAVED_FOODS_KEY: &str = "macro-calculator-saved-foods";

/// A saved cooked/raw ratio for a named food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFood {
    pub id: String,
    pub name: String,
    /// cooked weight / raw weight, both in grams, at save time
    pub cooking_ratio: f64,
    /// Unix timestamp in milliseconds
    pub date_added: i64,
}

impl SavedFood {
    /// Build a new entry from the current food record
    pub fn from_food_data(data: &FoodData) -> CalcResult<Self> {
        let raw_grams = data.raw_grams();
        if raw_grams.is_nan() || raw_grams <= 0.0 {
            return Err(CalcError::InvalidRawWeight);
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: data.name.trim().to_string(),
            cooking_ratio: data.cooked_grams() / raw_grams,
            date_added: Utc::now().timestamp_millis(),
        })
    }

    /// Cooked weight this ratio predicts for a raw weight (same unit in and out)
    pub fn cooked_weight_for(&self, raw_weight: f64) -> f64 {
        raw_weight * self.cooking_ratio
    }

    /// Read the whole saved list; a missing slot is an empty list
    pub fn load_all(conn: &Connection) -> DbResult<Vec<Self>> {
        match kv::get_value(conn, SAVED_FOODS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the whole saved list
    pub fn store_all(conn: &Connection, foods: &[Self]) -> DbResult<()> {
        let json = serde_json::to_string(foods)?;
        kv::set_value(conn, SAVED_FOODS_KEY, &json)
    }

    /// Get a saved food by ID
    pub fn get_by_id(conn: &Connection, id: &str) -> DbResult<Option<Self>> {
        Ok(Self::load_all(conn)?.into_iter().find(|f| f.id == id))
    }

    /// Get a saved food by exact name
    pub fn find_by_name(conn: &Connection, name: &str) -> DbResult<Option<Self>> {
        Ok(Self::load_all(conn)?.into_iter().find(|f| f.name == name))
    }

    /// Append unless an entry with the same name exists.
    /// Returns Ok(false) for a duplicate name.
    pub fn insert(conn: &Connection, food: &Self) -> DbResult<bool> {
        let mut foods = Self::load_all(conn)?;
        if foods.iter().any(|existing| existing.name == food.name) {
            return Ok(false);
        }
        foods.push(food.clone());
        Self::store_all(conn, &foods)?;
        Ok(true)
    }

    /// Delete by ID. Returns Ok(false) if no entry had that ID.
    pub fn delete(conn: &Connection, id: &str) -> DbResult<bool> {
        let mut foods = Self::load_all(conn)?;
        let before = foods.len();
        foods.retain(|f| f.id != id);
        if foods.len() == before {
            return Ok(false);
        }
        Self::store_all(conn, &foods)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::nutrition::WeightUnit;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn saved(name: &str, ratio: f64) -> SavedFood {
        SavedFood {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            cooking_ratio: ratio,
            date_added: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_from_food_data_ratio_uses_grams() {
        let food = FoodData {
            name: "  Chicken Breast ".to_string(),
            raw_weight: 1.0,
            raw_weight_unit: WeightUnit::Kilogram,
            cooked_weight: 750.0,
            cooked_weight_unit: WeightUnit::Gram,
            ..FoodData::default()
        };
        let saved = SavedFood::from_food_data(&food).unwrap();
        assert_eq!(saved.name, "Chicken Breast");
        assert!((saved.cooking_ratio - 0.75).abs() < 1e-12);
        assert!(Uuid::parse_str(&saved.id).is_ok());
        assert!(saved.date_added > 0);
        assert_eq!(saved.cooked_weight_for(200.0), 150.0);
    }

    #[test]
    fn test_from_food_data_rejects_zero_raw() {
        let food = FoodData {
            name: "Empty".to_string(),
            ..FoodData::default()
        };
        assert_eq!(SavedFood::from_food_data(&food), Err(CalcError::InvalidRawWeight));
    }

    #[test]
    fn test_missing_slot_is_empty() {
        let conn = test_conn();
        assert!(SavedFood::load_all(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_insert_dedupes_by_name() {
        let conn = test_conn();
        assert!(SavedFood::insert(&conn, &saved("Rice", 2.5)).unwrap());
        assert!(!SavedFood::insert(&conn, &saved("Rice", 3.0)).unwrap());
        assert!(SavedFood::insert(&conn, &saved("Beef", 0.7)).unwrap());

        let all = SavedFood::load_all(&conn).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].cooking_ratio, 2.5);
        assert_eq!(SavedFood::find_by_name(&conn, "Beef").unwrap().unwrap().cooking_ratio, 0.7);
    }

    #[test]
    fn test_delete_by_id() {
        let conn = test_conn();
        let rice = saved("Rice", 2.5);
        SavedFood::insert(&conn, &rice).unwrap();

        assert!(!SavedFood::delete(&conn, "no-such-id").unwrap());
        assert!(SavedFood::delete(&conn, &rice.id).unwrap());
        assert!(SavedFood::get_by_id(&conn, &rice.id).unwrap().is_none());
    }

    #[test]
    fn test_stored_json_shape() {
        let conn = test_conn();
        let mut rice = saved("Rice", 2.5);
        rice.id = "abc".to_string();
        SavedFood::store_all(&conn, &[rice]).unwrap();

        let raw = kv::get_value(&conn, SAVED_FOODS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["id"], "abc");
        assert_eq!(json[0]["cookingRatio"], 2.5);
        assert_eq!(json[0]["dateAdded"], 1_700_000_000_000i64);
    }
}
