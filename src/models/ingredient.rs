//! Ingredient model
//!
//! A named quantity in one of the supported units, with its calorie rate.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A recipe ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    /// Unit tag: g, oz, ml, cup or tbsp
    pub unit: String,
    /// Calories per 100 base units (g or ml)
    pub calories_per_unit: f64,
}

impl Ingredient {
    /// Check the fields a recipe needs before it can be stored
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Ingredient name cannot be empty".to_string());
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(format!(
                "Ingredient '{}' quantity must be greater than 0",
                self.name.trim()
            ));
        }
        if !self.calories_per_unit.is_finite() {
            return Err(format!(
                "Ingredient '{}' calories_per_unit must be a number",
                self.name.trim()
            ));
        }
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get("name")?,
            quantity: row.get("quantity")?,
            unit: row.get("unit")?,
            calories_per_unit: row.get("calories_per_unit")?,
        })
    }

    /// Store the ingredients of a recipe, preserving their order
    pub fn insert_for_recipe(conn: &Connection, recipe_id: i64, ingredients: &[Ingredient]) -> DbResult<()> {
        let mut stmt = conn.prepare(
            r#"
            INSERT INTO recipe_ingredients (recipe_id, position, name, quantity, unit, calories_per_unit)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )?;

        for (position, ingredient) in ingredients.iter().enumerate() {
            stmt.execute(params![
                recipe_id,
                position as i64,
                ingredient.name.trim(),
                ingredient.quantity,
                ingredient.unit,
                ingredient.calories_per_unit,
            ])?;
        }

        Ok(())
    }

    /// Get all ingredients for a recipe in their original order
    pub fn get_for_recipe(conn: &Connection, recipe_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT name, quantity, unit, calories_per_unit FROM recipe_ingredients WHERE recipe_id = ?1 ORDER BY position",
        )?;

        let ingredients = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ingredients)
    }

    /// Count ingredients for a recipe
    pub fn count_for_recipe(conn: &Connection, recipe_id: i64) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM recipe_ingredients WHERE recipe_id = ?1",
            [recipe_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
