//! Recipe model
//!
//! A recipe with ordered ingredients and steps, and cached per-serving
//! nutrition computed from them.

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Ingredient, Nutrition};
use crate::db::DbError;
use crate::nutrition::{calculate_nutrition, NutritionError, NutritionResult, Unit};

/// Recipe book errors
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Invalid recipe: {0}")]
    Validation(String),

    #[error(transparent)]
    Nutrition(#[from] NutritionError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Recipe not found with id: {0}")]
    NotFound(i64),
}

impl From<rusqlite::Error> for RecipeError {
    fn from(e: rusqlite::Error) -> Self {
        RecipeError::Database(DbError::Sqlite(e))
    }
}

pub type RecipeResult<T> = Result<T, RecipeError>;

/// A stored recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub servings: i64,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub nutrition_per_serving: Nutrition,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    #[serde(default = "default_servings")]
    pub servings: i64,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}

fn default_servings() -> i64 {
    1
}

impl RecipeCreate {
    /// Check everything except units, which the nutrition calculation rejects
    pub fn validate(&self) -> RecipeResult<()> {
        if self.name.trim().is_empty() {
            return Err(RecipeError::Validation("Recipe name cannot be empty".to_string()));
        }
        if self.servings <= 0 {
            return Err(NutritionError::InvalidServings(self.servings).into());
        }
        if self.ingredients.is_empty() {
            return Err(RecipeError::Validation("Recipe needs at least one ingredient".to_string()));
        }
        if self.steps.is_empty() {
            return Err(RecipeError::Validation("Recipe needs at least one step".to_string()));
        }
        for ingredient in &self.ingredients {
            ingredient.validate().map_err(RecipeError::Validation)?;
        }
        if let Some(pos) = self.steps.iter().position(|s| s.trim().is_empty()) {
            return Err(RecipeError::Validation(format!("Step {} is empty", pos + 1)));
        }
        Ok(())
    }
}

/// Recipe columns without ingredients or steps
struct RecipeRow {
    id: i64,
    name: String,
    servings: i64,
    cached_calories: i64,
    created_at: String,
    updated_at: String,
}

impl RecipeRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            servings: row.get("servings")?,
            cached_calories: row.get("cached_calories")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// `%q%` for a LIKE match, with the pattern characters in `q` taken literally
fn name_pattern(query: Option<&str>) -> Option<String> {
    query.map(|q| {
        let escaped = q
            .trim()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    })
}

fn get_steps(conn: &Connection, recipe_id: i64) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT instruction FROM recipe_steps WHERE recipe_id = ?1 ORDER BY position",
    )?;
    let steps = stmt
        .query_map([recipe_id], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(steps)
}

impl Recipe {
    fn load(conn: &Connection, row: RecipeRow) -> RecipeResult<Self> {
        let ingredients = Ingredient::get_for_recipe(conn, row.id)?;
        let steps = get_steps(conn, row.id)?;

        Ok(Self {
            id: row.id,
            name: row.name,
            servings: row.servings,
            ingredients,
            steps,
            nutrition_per_serving: Nutrition {
                total_calories: row.cached_calories,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    /// Validate, compute nutrition, and store a new recipe in one transaction
    pub fn create(conn: &mut Connection, data: &RecipeCreate) -> RecipeResult<Self> {
        data.validate()?;

        // Stored units use the short tag, whatever spelling came in
        let ingredients = data
            .ingredients
            .iter()
            .map(|ingredient| {
                let unit: Unit = ingredient.unit.parse()?;
                Ok(Ingredient {
                    name: ingredient.name.trim().to_string(),
                    unit: unit.tag().to_string(),
                    ..ingredient.clone()
                })
            })
            .collect::<NutritionResult<Vec<_>>>()?;

        let nutrition = calculate_nutrition(&ingredients, data.servings)?;
        let now = now_timestamp();

        let tx = conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO recipes (name, servings, cached_calories, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
            params![data.name.trim(), data.servings, nutrition.total_calories, now],
        )?;
        let id = tx.last_insert_rowid();

        Ingredient::insert_for_recipe(&tx, id, &ingredients)?;
        for (position, step) in data.steps.iter().enumerate() {
            tx.execute(
                "INSERT INTO recipe_steps (recipe_id, position, instruction) VALUES (?1, ?2, ?3)",
                params![id, position as i64, step.trim()],
            )?;
        }
        tx.commit()?;

        tracing::info!(
            "Created recipe {} '{}' ({} cal/serving)",
            id,
            data.name.trim(),
            nutrition.total_calories
        );

        Self::get_by_id(conn, id)?.ok_or(RecipeError::NotFound(id))
    }

    /// Get a recipe by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> RecipeResult<Option<Self>> {
        let row = conn
            .query_row("SELECT * FROM recipes WHERE id = ?1", [id], RecipeRow::from_row)
            .optional()?;

        row.map(|r| Self::load(conn, r)).transpose()
    }

    /// List recipes ordered by name, optionally filtered by a name substring
    pub fn list(
        conn: &Connection,
        query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> RecipeResult<Vec<Self>> {
        let pattern = name_pattern(query);

        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM recipes
            WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\'
            ORDER BY name COLLATE NOCASE, id
            LIMIT ?2 OFFSET ?3
            "#,
        )?;

        let rows = stmt
            .query_map(params![pattern, limit, offset], RecipeRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(|r| Self::load(conn, r)).collect()
    }

    /// Count recipes matching an optional name substring
    pub fn count(conn: &Connection, query: Option<&str>) -> RecipeResult<i64> {
        let pattern = name_pattern(query);
        let count: i64 = conn.query_row(
            r"SELECT COUNT(*) FROM recipes WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\'",
            [pattern],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// All recipe IDs, oldest first
    pub fn list_ids(conn: &Connection) -> RecipeResult<Vec<i64>> {
        let mut stmt = conn.prepare("SELECT id FROM recipes ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    /// Update cached nutrition for a recipe
    pub fn update_cached_nutrition(conn: &Connection, id: i64, nutrition: &Nutrition) -> RecipeResult<()> {
        let rows = conn.execute(
            "UPDATE recipes SET cached_calories = ?1, updated_at = ?2 WHERE id = ?3",
            params![nutrition.total_calories, now_timestamp(), id],
        )?;
        if rows == 0 {
            return Err(RecipeError::NotFound(id));
        }
        Ok(())
    }

    /// Delete a recipe; ingredients and steps cascade
    /// Returns Ok(false) if not found
    pub fn delete(conn: &Connection, id: i64) -> RecipeResult<bool> {
        let rows = conn.execute("DELETE FROM recipes WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

/// Recompute and store per-serving nutrition from stored ingredients
pub fn recalculate_recipe_nutrition(conn: &Connection, id: i64) -> RecipeResult<Nutrition> {
    let recipe = Recipe::get_by_id(conn, id)?.ok_or(RecipeError::NotFound(id))?;
    let nutrition = calculate_nutrition(&recipe.ingredients, recipe.servings)?;

    if nutrition != recipe.nutrition_per_serving {
        tracing::debug!(
            "Recipe {} nutrition changed: {} -> {} cal/serving",
            id,
            recipe.nutrition_per_serving.total_calories,
            nutrition.total_calories
        );
    }

    Recipe::update_cached_nutrition(conn, id, &nutrition)?;
    Ok(nutrition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn ing(name: &str, quantity: f64, unit: &str, calories_per_unit: f64) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            calories_per_unit,
        }
    }

    fn pancakes() -> RecipeCreate {
        RecipeCreate {
            name: "Pancakes".to_string(),
            servings: 4,
            ingredients: vec![
                ing("Flour", 200.0, "g", 364.0),
                ing("Milk", 1.5, "cup", 42.0),
                ing("Butter", 2.0, "tbsp", 717.0),
            ],
            steps: vec![
                "Whisk everything together".to_string(),
                "Fry in a hot pan".to_string(),
            ],
        }
    }

    #[test]
    fn test_create_and_get() {
        let mut conn = setup();
        let recipe = Recipe::create(&mut conn, &pancakes()).unwrap();

        // 728 + 151.2 + 215.1 = 1094.3 over 4 servings
        assert_eq!(recipe.nutrition_per_serving.total_calories, 274);
        assert_eq!(recipe.servings, 4);

        let loaded = Recipe::get_by_id(&conn, recipe.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Pancakes");
        assert_eq!(loaded.ingredients, pancakes().ingredients);
        assert_eq!(loaded.steps, pancakes().steps);
        assert_eq!(loaded.nutrition_per_serving, recipe.nutrition_per_serving);
    }

    #[test]
    fn test_create_rejects_unknown_unit_without_storing() {
        let mut conn = setup();
        let mut data = pancakes();
        data.ingredients.push(ing("Salt", 1.0, "pinch", 0.0));

        let err = Recipe::create(&mut conn, &data).unwrap_err();
        assert!(matches!(
            err,
            RecipeError::Nutrition(NutritionError::UnknownUnit(ref u)) if u == "pinch"
        ));
        assert_eq!(Recipe::count(&conn, None).unwrap(), 0);
    }

    #[test]
    fn test_validate_rejects_incomplete_recipes() {
        let mut data = pancakes();
        data.name = "   ".to_string();
        assert!(matches!(data.validate(), Err(RecipeError::Validation(_))));

        let mut data = pancakes();
        data.ingredients.clear();
        assert!(matches!(data.validate(), Err(RecipeError::Validation(_))));

        let mut data = pancakes();
        data.steps.clear();
        assert!(matches!(data.validate(), Err(RecipeError::Validation(_))));

        let mut data = pancakes();
        data.steps.push(" ".to_string());
        assert!(matches!(data.validate(), Err(RecipeError::Validation(_))));

        let mut data = pancakes();
        data.ingredients[0].quantity = 0.0;
        assert!(matches!(data.validate(), Err(RecipeError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_zero_servings() {
        let mut data = pancakes();
        data.servings = 0;
        assert!(matches!(
            data.validate(),
            Err(RecipeError::Nutrition(NutritionError::InvalidServings(0)))
        ));
    }

    #[test]
    fn test_list_and_count_with_query() {
        let mut conn = setup();
        Recipe::create(&mut conn, &pancakes()).unwrap();
        let mut soup = pancakes();
        soup.name = "Tomato Soup".to_string();
        Recipe::create(&mut conn, &soup).unwrap();

        let all = Recipe::list(&conn, None, 50, 0).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Pancakes");
        assert_eq!(all[1].name, "Tomato Soup");

        let soups = Recipe::list(&conn, Some("soup"), 50, 0).unwrap();
        assert_eq!(soups.len(), 1);
        assert_eq!(Recipe::count(&conn, Some("SOUP")).unwrap(), 1);
        assert_eq!(Recipe::count(&conn, None).unwrap(), 2);

        let page = Recipe::list(&conn, None, 1, 1).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Tomato Soup");
    }

    #[test]
    fn test_create_stores_short_unit_tags() {
        let mut conn = setup();
        let mut data = pancakes();
        data.ingredients[0].unit = " Grams ".to_string();
        data.ingredients[1].unit = "CUPS".to_string();
        data.ingredients[2].unit = "Tablespoon".to_string();

        let recipe = Recipe::create(&mut conn, &data).unwrap();
        let units: Vec<&str> = recipe.ingredients.iter().map(|i| i.unit.as_str()).collect();
        assert_eq!(units, ["g", "cup", "tbsp"]);
        assert_eq!(recipe.nutrition_per_serving.total_calories, 274);

        let listed = Recipe::list(&conn, None, 50, 0).unwrap();
        assert_eq!(listed[0].ingredients[0].unit, "g");
    }

    #[test]
    fn test_name_search_treats_wildcards_literally() {
        let mut conn = setup();
        let mut rye = pancakes();
        rye.name = "100% Rye".to_string();
        Recipe::create(&mut conn, &rye).unwrap();
        let mut bread = pancakes();
        bread.name = "Rye_Bread".to_string();
        Recipe::create(&mut conn, &bread).unwrap();
        Recipe::create(&mut conn, &pancakes()).unwrap();

        let found = Recipe::list(&conn, Some("%"), 50, 0).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "100% Rye");

        assert_eq!(Recipe::count(&conn, Some("_")).unwrap(), 1);
        assert_eq!(Recipe::count(&conn, Some("e_B")).unwrap(), 1);
        assert_eq!(Recipe::count(&conn, Some("e_")).unwrap(), 1);
        assert_eq!(Recipe::count(&conn, Some("\\")).unwrap(), 0);
        assert_eq!(Recipe::count(&conn, Some("rye")).unwrap(), 2);
    }

    #[test]
    fn test_delete_cascades() {
        let mut conn = setup();
        let recipe = Recipe::create(&mut conn, &pancakes()).unwrap();

        assert!(Recipe::delete(&conn, recipe.id).unwrap());
        assert!(Recipe::get_by_id(&conn, recipe.id).unwrap().is_none());
        assert_eq!(Ingredient::count_for_recipe(&conn, recipe.id).unwrap(), 0);
        assert!(!Recipe::delete(&conn, recipe.id).unwrap());
    }

    #[test]
    fn test_recalculate_restores_cached_nutrition() {
        let mut conn = setup();
        let recipe = Recipe::create(&mut conn, &pancakes()).unwrap();

        Recipe::update_cached_nutrition(&conn, recipe.id, &Nutrition { total_calories: 1 }).unwrap();
        let nutrition = recalculate_recipe_nutrition(&conn, recipe.id).unwrap();
        assert_eq!(nutrition, recipe.nutrition_per_serving);

        assert!(matches!(
            recalculate_recipe_nutrition(&conn, 999),
            Err(RecipeError::NotFound(999))
        ));
    }
}
