//! Recipe Planner MCP Server Implementation
//!
//! Implements the MCP server with all planner tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::{Ingredient, RecipeCreate};
use crate::tools::nutrition;
use crate::tools::recipes;
use crate::tools::status::StatusTracker;

/// Recipe Planner MCP Service
#[derive(Clone)]
pub struct PlannerService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<PlannerService>,
}

impl PlannerService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IngredientParam {
    /// Ingredient name
    pub name: String,
    /// Amount in the given unit (must be greater than 0)
    pub quantity: f64,
    /// Unit: g, oz, ml, cup or tbsp
    pub unit: String,
    /// Calories per 100 g (mass units) or per 100 ml (volume units)
    pub calories_per_unit: f64,
}

impl From<IngredientParam> for Ingredient {
    fn from(p: IngredientParam) -> Self {
        Ingredient {
            name: p.name,
            quantity: p.quantity,
            unit: p.unit,
            calories_per_unit: p.calories_per_unit,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertToBaseParams {
    /// Quantity to convert
    pub quantity: f64,
    /// Unit: g, oz, ml, cup or tbsp
    pub unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateNutritionParams {
    /// Ingredients to total
    pub ingredients: Vec<IngredientParam>,
    /// Number of servings (default 1, must be at least 1)
    #[serde(default = "default_servings")]
    pub servings: i64,
}

fn default_servings() -> i64 { 1 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateRecipeParams {
    /// Name of the recipe
    pub name: String,
    /// Number of servings this recipe produces (default 1)
    #[serde(default = "default_servings")]
    pub servings: i64,
    /// Ingredients in order
    pub ingredients: Vec<IngredientParam>,
    /// Preparation steps in order
    pub steps: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeIdParams {
    /// Recipe ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRecipesParams {
    /// Search query for recipe name (optional)
    pub query: Option<String>,
    /// Maximum results (default 50, max 200)
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    /// Offset for pagination (default 0)
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 50 }

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl PlannerService {
    // --- Status ---

    #[tool(description = "Get the current status of the recipe planner including build info, database status, and uptime")]
    async fn planner_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.database);
        to_json(&status)
    }

    #[tool(description = "Get instructions for units, calorie rates, and recipe tools. Call this before creating recipes.")]
    fn planner_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::PLANNER_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(PLANNER_INSTRUCTIONS)]))
    }

    // --- Nutrition ---

    #[tool(description = "Convert a quantity into its base unit (grams for g/oz, milliliters for ml/cup/tbsp)")]
    fn convert_to_base(&self, Parameters(p): Parameters<ConvertToBaseParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::convert_to_base(p.quantity, &p.unit).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Calculate per-serving calories for a list of ingredients without storing anything. Also reports mass and volume subtotals.")]
    fn calculate_nutrition(&self, Parameters(p): Parameters<CalculateNutritionParams>) -> Result<CallToolResult, McpError> {
        let ingredients: Vec<Ingredient> = p.ingredients.into_iter().map(Ingredient::from).collect();
        let result = nutrition::calculate_nutrition(&ingredients, p.servings).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Recipes ---

    #[tool(description = "Create a recipe with ingredients and steps; per-serving calories are calculated on creation")]
    fn create_recipe(&self, Parameters(p): Parameters<CreateRecipeParams>) -> Result<CallToolResult, McpError> {
        let data = RecipeCreate {
            name: p.name,
            servings: p.servings,
            ingredients: p.ingredients.into_iter().map(Ingredient::from).collect(),
            steps: p.steps,
        };
        let result = recipes::create_recipe(&self.database, data).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get full recipe details with ingredients, steps, and per-serving nutrition")]
    fn get_recipe(&self, Parameters(p): Parameters<RecipeIdParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::get_recipe(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(recipe) => to_json(&recipe),
            None => to_json(&serde_json::json!({ "error": "Recipe not found", "id": p.id })),
        }
    }

    #[tool(description = "List recipes with optional name search and pagination")]
    fn list_recipes(&self, Parameters(p): Parameters<ListRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::list_recipes(&self.database, p.query.as_deref(), p.limit, p.offset)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a recipe with its ingredients and steps")]
    fn delete_recipe(&self, Parameters(p): Parameters<RecipeIdParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::delete_recipe(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Recalculate and store a recipe's per-serving calories from its ingredients")]
    fn recalculate_recipe_nutrition(&self, Parameters(p): Parameters<RecipeIdParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::recalculate_nutrition(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for PlannerService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "recipe-planner".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Recipe Planner".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Recipe Planner - recipes with per-serving calorie calculation. \
                 Call planner_instructions for units and calorie conventions. \
                 Nutrition: convert_to_base, calculate_nutrition. \
                 Recipes: create/get/list/delete_recipe, recalculate_recipe_nutrition. \
                 Status: planner_status."
                    .into(),
            ),
        }
    }
}
