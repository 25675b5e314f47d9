//! Nutrition MCP Tools
//!
//! Stateless unit conversion and calorie calculation; nothing is stored.

use serde::Serialize;

use crate::models::{Ingredient, Nutrition};
use crate::nutrition::{self, CalorieBreakdown, Unit};

#[derive(Debug, Serialize)]
pub struct ConvertToBaseResponse {
    pub quantity: f64,
    pub unit: Unit,
    pub base_quantity: f64,
    pub base_unit: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CalculateNutritionResponse {
    pub servings: i64,
    pub nutrition_per_serving: Nutrition,
    pub breakdown: CalorieBreakdown,
}

/// Convert a quantity into grams or milliliters
pub fn convert_to_base(quantity: f64, unit: &str) -> Result<ConvertToBaseResponse, String> {
    let parsed: Unit = unit.parse().map_err(|e: nutrition::NutritionError| e.to_string())?;
    let base_quantity = nutrition::convert_to_base(quantity, unit).map_err(|e| e.to_string())?;

    Ok(ConvertToBaseResponse {
        quantity,
        unit: parsed,
        base_quantity,
        base_unit: parsed.category().base_unit(),
    })
}

/// Per-serving calories for an ad-hoc ingredient list
pub fn calculate_nutrition(
    ingredients: &[Ingredient],
    servings: i64,
) -> Result<CalculateNutritionResponse, String> {
    let (nutrition_per_serving, breakdown) =
        nutrition::calculate_nutrition_with_breakdown(ingredients, servings)
            .map_err(|e| e.to_string())?;

    Ok(CalculateNutritionResponse {
        servings,
        nutrition_per_serving,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_reports_base_unit() {
        let result = convert_to_base(2.0, "Cups").unwrap();
        assert_eq!(result.unit, Unit::Cup);
        assert_eq!(result.base_quantity, 480.0);
        assert_eq!(result.base_unit, "ml");

        let result = convert_to_base(1.0, "oz").unwrap();
        assert_eq!(result.base_unit, "g");
    }

    #[test]
    fn test_convert_unknown_unit_message() {
        assert_eq!(convert_to_base(1.0, "dash").unwrap_err(), "Unknown unit: dash");
    }

    #[test]
    fn test_calculate_nutrition_response() {
        let ingredients = vec![Ingredient {
            name: "Rice".to_string(),
            quantity: 200.0,
            unit: "g".to_string(),
            calories_per_unit: 50.0,
        }];
        let result = calculate_nutrition(&ingredients, 2).unwrap();
        assert_eq!(result.nutrition_per_serving.total_calories, 50);
        assert!(!result.breakdown.mixed_basis);
        assert!((result.breakdown.total_calories - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_nutrition_zero_servings_message() {
        let err = calculate_nutrition(&[], 0).unwrap_err();
        assert_eq!(err, "Servings must be greater than 0, got 0");
    }

    #[test]
    fn test_calculate_nutrition_mixed_basis_totals_agree() {
        let ingredients = vec![
            Ingredient {
                name: "Rice".to_string(),
                quantity: 200.0,
                unit: "g".to_string(),
                calories_per_unit: 50.0,
            },
            Ingredient {
                name: "Broth".to_string(),
                quantity: 1.0,
                unit: "cup".to_string(),
                calories_per_unit: 10.0,
            },
        ];
        let result = calculate_nutrition(&ingredients, 2).unwrap();
        assert!(result.breakdown.mixed_basis);
        // (100 + 24) / 2
        assert_eq!(result.nutrition_per_serving.total_calories, 62);
        assert_eq!(
            result.nutrition_per_serving.total_calories,
            (result.breakdown.total_calories / 2.0).round() as i64
        );
    }

    #[test]
    fn test_calculate_nutrition_out_of_range_message() {
        let ingredients = vec![Ingredient {
            name: "Lard".to_string(),
            quantity: 1e306,
            unit: "cup".to_string(),
            calories_per_unit: 1e10,
        }];
        let err = calculate_nutrition(&ingredients, 1).unwrap_err();
        assert_eq!(err, "Calorie total inf is out of range");
    }

    #[test]
    fn test_serializes_unit_as_tag() {
        let json = serde_json::to_value(convert_to_base(3.0, "tablespoon").unwrap()).unwrap();
        assert_eq!(json["unit"], "tbsp");
        assert_eq!(json["base_quantity"], 45.0);
    }
}
