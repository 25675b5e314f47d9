//! Nutrition calculation errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NutritionError {
    /// Unit tag outside g / oz / ml / cup / tbsp
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Servings must be greater than 0, got {0}")]
    InvalidServings(i64),

    /// Total is NaN, infinite, or too large for a whole-calorie count
    #[error("Calorie total {0} is out of range")]
    CaloriesOutOfRange(f64),
}

pub type NutritionResult<T> = Result<T, NutritionError>;
