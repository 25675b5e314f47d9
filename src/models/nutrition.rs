//! Per-serving nutrition

use serde::{Deserialize, Serialize};

/// Nutrition attributed to one serving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub total_calories: i64,
}
