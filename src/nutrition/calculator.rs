//! Calorie calculation
//!
//! Converts ingredient quantities into base units and aggregates calories.
//! `calories_per_unit` is read as calories per 100 base units.
//!
//! Mass (g) and volume (ml) quantities are summed into one accumulator with
//! no density conversion, so 1 g and 1 ml count the same. That behavior is
//! kept as-is; [`calorie_breakdown`] reports the two bases separately for
//! callers that need to tell them apart.

use serde::Serialize;

use super::error::{NutritionError, NutritionResult};
use super::units::{Unit, UnitCategory};
use crate::models::{Ingredient, Nutrition};

/// Convert a quantity tagged with `unit` into grams or milliliters
pub fn convert_to_base(quantity: f64, unit: &str) -> NutritionResult<f64> {
    let unit: Unit = unit.parse()?;
    Ok(unit.to_base(quantity))
}

/// Calories contributed by a single ingredient
fn ingredient_calories(ingredient: &Ingredient) -> NutritionResult<(UnitCategory, f64)> {
    let unit: Unit = ingredient.unit.parse()?;
    let base_quantity = unit.to_base(ingredient.quantity);
    Ok((unit.category(), base_quantity * ingredient.calories_per_unit / 100.0))
}

/// Sum the calories of all ingredients
pub fn calculate_total_calories(ingredients: &[Ingredient]) -> NutritionResult<f64> {
    Ok(calorie_breakdown(ingredients)?.total_calories)
}

/// Per-serving calories, rounded to the nearest whole calorie
pub fn calculate_nutrition(ingredients: &[Ingredient], servings: i64) -> NutritionResult<Nutrition> {
    let (nutrition, _) = calculate_nutrition_with_breakdown(ingredients, servings)?;
    Ok(nutrition)
}

/// Per-serving calories together with the breakdown they were derived from
pub fn calculate_nutrition_with_breakdown(
    ingredients: &[Ingredient],
    servings: i64,
) -> NutritionResult<(Nutrition, CalorieBreakdown)> {
    if servings <= 0 {
        return Err(NutritionError::InvalidServings(servings));
    }

    let breakdown = calorie_breakdown(ingredients)?;
    let per_serving = (breakdown.total_calories / servings as f64).round();

    // `as i64` saturates, and NaN would become 0
    if !per_serving.is_finite() || per_serving < i64::MIN as f64 || per_serving >= i64::MAX as f64 {
        return Err(NutritionError::CaloriesOutOfRange(breakdown.total_calories));
    }

    Ok((
        Nutrition {
            total_calories: per_serving as i64,
        },
        breakdown,
    ))
}

/// Calorie totals split by the base the quantities were normalized into
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalorieBreakdown {
    /// Calories from gram/ounce ingredients
    pub mass_calories: f64,
    /// Calories from milliliter/cup/tablespoon ingredients
    pub volume_calories: f64,
    pub total_calories: f64,
    /// Both bases present in the same total
    pub mixed_basis: bool,
}

/// Compute calories per base, plus the combined total
pub fn calorie_breakdown(ingredients: &[Ingredient]) -> NutritionResult<CalorieBreakdown> {
    let mut breakdown = CalorieBreakdown::default();
    let mut has_mass = false;
    let mut has_volume = false;

    for ingredient in ingredients {
        let (category, calories) = ingredient_calories(ingredient)?;
        match category {
            UnitCategory::Mass => {
                has_mass = true;
                breakdown.mass_calories += calories;
            }
            UnitCategory::Volume => {
                has_volume = true;
                breakdown.volume_calories += calories;
            }
        }
        breakdown.total_calories += calories;
    }

    breakdown.mixed_basis = has_mass && has_volume;
    if breakdown.mixed_basis {
        tracing::warn!(
            "Calorie total mixes grams and milliliters without density conversion ({:.1} cal by mass, {:.1} cal by volume)",
            breakdown.mass_calories,
            breakdown.volume_calories
        );
    }

    Ok(breakdown)
}
