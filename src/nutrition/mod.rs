//! Nutrition calculation module
//!
//! Unit conversion and per-serving calorie aggregation.

pub mod calculator;
pub mod error;
pub mod units;

pub use calculator::{
    calculate_nutrition, calculate_nutrition_with_breakdown, calculate_total_calories,
    calorie_breakdown, convert_to_base, CalorieBreakdown,
};
pub use error::{NutritionError, NutritionResult};
pub use units::{Unit, UnitCategory};
