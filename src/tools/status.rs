//! Planner Status Tool
//!
//! Provides runtime status information about the recipe planner service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use crate::build_info::BuildInfo;
use crate::db::Database;
use crate::models::Recipe;

/// Usage guide returned by the planner_instructions tool
pub const PLANNER_INSTRUCTIONS: &str = r#"
# Recipe Planner Instructions

## Units

Ingredient quantities use one of five units:

| Unit | Tag | Base | Factor |
|------|-----|------|--------|
| gram | g | g | 1 |
| ounce | oz | g | 28.35 |
| milliliter | ml | ml | 1 |
| cup | cup | ml | 240 |
| tablespoon | tbsp | ml | 15 |

Any other unit is rejected with "Unknown unit".

## Calories

`calories_per_unit` is calories per 100 base units (per 100 g or per 100 ml).
Per-serving calories = sum(base_quantity * calories_per_unit / 100) / servings,
rounded to the nearest whole calorie.

Grams and milliliters are added together without density conversion. When a
recipe mixes both, `calculate_nutrition` reports `mixed_basis: true` and the
two subtotals separately.

## Recipes

1. `create_recipe` with a name, servings (at least 1), one or more
   ingredients and one or more steps
2. `list_recipes` / `get_recipe` to browse
3. `delete_recipe` to remove
"#;

/// Runtime status of the planner service
#[derive(Debug, Clone, Serialize)]
pub struct PlannerStatus {
    pub build_profile: &'static str,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub recipe_count: Option<i64>,

    pub uptime_seconds: u64,
    pub process_id: u32,
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
    pub fn get_status(&self, db: &Database) -> PlannerStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let recipe_count = match db.get_conn() {
            Ok(conn) => Recipe::count(&conn, None)
                .map_err(|e| tracing::warn!("Failed to count recipes: {}", e))
                .ok(),
            Err(e) => {
                tracing::warn!("Database unavailable for status: {}", e);
                None
            }
        };

        PlannerStatus {
            build_profile: build_info.build_profile,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            recipe_count,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: std::process::id(),
        }
    }
}
