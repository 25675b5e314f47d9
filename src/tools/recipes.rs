//! Recipe MCP Tools
//!
//! Tools for managing the recipe book.

use serde::Serialize;

use crate::db::Database;
use crate::models::{recalculate_recipe_nutrition, Nutrition, Recipe, RecipeCreate};

/// Response for create_recipe
#[derive(Debug, Serialize)]
pub struct CreateRecipeResponse {
    pub id: i64,
    pub name: String,
    pub servings: i64,
    pub nutrition_per_serving: Nutrition,
    pub created_at: String,
}

/// Recipe summary for listing
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub servings: i64,
    pub calories_per_serving: i64,
    pub ingredient_count: usize,
    pub step_count: usize,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Serialize)]
pub struct RecipeDeleteResponse {
    pub success: bool,
    pub deleted_id: i64,
}

#[derive(Debug, Serialize)]
pub struct RecalculateNutritionResponse {
    pub recipe_id: i64,
    pub nutrition_per_serving: Nutrition,
}

/// Create a new recipe with its ingredients and steps
pub fn create_recipe(db: &Database, data: RecipeCreate) -> Result<CreateRecipeResponse, String> {
    let mut conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipe = Recipe::create(&mut conn, &data)
        .map_err(|e| format!("Failed to create recipe: {}", e))?;

    Ok(CreateRecipeResponse {
        id: recipe.id,
        name: recipe.name,
        servings: recipe.servings,
        nutrition_per_serving: recipe.nutrition_per_serving,
        created_at: recipe.created_at,
    })
}

/// Get a recipe with full details
pub fn get_recipe(db: &Database, id: i64) -> Result<Option<Recipe>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Recipe::get_by_id(&conn, id).map_err(|e| format!("Failed to get recipe: {}", e))
}

/// List recipes with optional name search
pub fn list_recipes(
    db: &Database,
    query: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<ListRecipesResponse, String> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipes = Recipe::list(&conn, query, limit, offset)
        .map_err(|e| format!("Failed to list recipes: {}", e))?;

    let total = Recipe::count(&conn, query)
        .map_err(|e| format!("Failed to count recipes: {}", e))?;

    let summaries = recipes
        .into_iter()
        .map(|recipe| RecipeSummary {
            id: recipe.id,
            calories_per_serving: recipe.nutrition_per_serving.total_calories,
            ingredient_count: recipe.ingredients.len(),
            step_count: recipe.steps.len(),
            name: recipe.name,
            servings: recipe.servings,
        })
        .collect();

    Ok(ListRecipesResponse {
        recipes: summaries,
        total,
        limit,
        offset,
    })
}

/// Delete a recipe
pub fn delete_recipe(db: &Database, id: i64) -> Result<RecipeDeleteResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = Recipe::delete(&conn, id)
        .map_err(|e| format!("Failed to delete recipe: {}", e))?;
    if !deleted {
        return Err(format!("Recipe not found with id: {}", id));
    }

    tracing::info!("Deleted recipe {}", id);

    Ok(RecipeDeleteResponse {
        success: true,
        deleted_id: id,
    })
}

/// Recompute a recipe's cached per-serving nutrition
pub fn recalculate_nutrition(db: &Database, id: i64) -> Result<RecalculateNutritionResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let nutrition = recalculate_recipe_nutrition(&conn, id)
        .map_err(|e| format!("Failed to recalculate nutrition: {}", e))?;

    Ok(RecalculateNutritionResponse {
        recipe_id: id,
        nutrition_per_serving: nutrition,
    })
}
