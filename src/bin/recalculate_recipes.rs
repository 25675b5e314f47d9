//! Recalculate cached per-serving calories for every stored recipe
//! Usage: cargo run --bin recalculate_recipes

use recipe_planner::models::{recalculate_recipe_nutrition, Recipe, RecipeError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = recipe_planner::config::database_path();
    println!("Database: {}", db_path.display());

    let database = recipe_planner::db::Database::new(&db_path)?;
    database.migrate()?;

    let conn = database.get_conn()?;
    let ids = Recipe::list_ids(&conn)?;
    println!("Found {} recipes", ids.len());

    let mut failed = 0;
    for id in ids {
        let before = Recipe::get_by_id(&conn, id)?.ok_or(RecipeError::NotFound(id))?;

        match recalculate_recipe_nutrition(&conn, id) {
            Ok(after) => println!(
                "  {} '{}': {} -> {} cal/serving",
                id, before.name, before.nutrition_per_serving.total_calories, after.total_calories
            ),
            Err(e) => {
                failed += 1;
                println!("  {} '{}': {}", id, before.name, e);
            }
        }
    }

    if failed > 0 {
        println!("{} recipes could not be recalculated", failed);
    }

    Ok(())
}
