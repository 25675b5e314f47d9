//! Unit types and conversion constants
//!
//! The closed set of ingredient units and their factors into the common base
//! (grams for mass, milliliters for volume).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::NutritionError;

// ============================================================================
// Conversion Constants
// ============================================================================

/// Grams per ounce
pub const G_PER_OZ: f64 = 28.35;
/// Milliliters per cup
pub const ML_PER_CUP: f64 = 240.0;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 15.0;

/// Category of a measurement unit, which decides its base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    /// Normalized to grams
    Mass,
    /// Normalized to milliliters
    Volume,
}

impl UnitCategory {
    /// Canonical base unit tag for this category
    pub fn base_unit(&self) -> &'static str {
        match self {
            UnitCategory::Mass => "g",
            UnitCategory::Volume => "ml",
        }
    }
}

/// An ingredient unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "cup")]
    Cup,
    #[serde(rename = "tbsp")]
    Tablespoon,
}

impl Unit {
    pub const ALL: [Unit; 5] = [
        Unit::Gram,
        Unit::Ounce,
        Unit::Milliliter,
        Unit::Cup,
        Unit::Tablespoon,
    ];

    /// Factor into the base unit of this unit's category
    pub fn base_factor(&self) -> f64 {
        match self {
            Unit::Gram => 1.0,
            Unit::Ounce => G_PER_OZ,
            Unit::Milliliter => 1.0,
            Unit::Cup => ML_PER_CUP,
            Unit::Tablespoon => ML_PER_TBSP,
        }
    }

    pub fn category(&self) -> UnitCategory {
        match self {
            Unit::Gram | Unit::Ounce => UnitCategory::Mass,
            Unit::Milliliter | Unit::Cup | Unit::Tablespoon => UnitCategory::Volume,
        }
    }

    /// Short tag used for storage and display
    pub fn tag(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Ounce => "oz",
            Unit::Milliliter => "ml",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tbsp",
        }
    }

    /// Convert a quantity in this unit into its base unit
    pub fn to_base(&self, quantity: f64) -> f64 {
        quantity * self.base_factor()
    }
}

impl FromStr for Unit {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();

        match lower.as_str() {
            "g" | "gram" | "grams" => Ok(Unit::Gram),
            "oz" | "ounce" | "ounces" => Ok(Unit::Ounce),
            "ml" | "milliliter" | "milliliters" => Ok(Unit::Milliliter),
            "cup" | "cups" => Ok(Unit::Cup),
            "tbsp" | "tablespoon" | "tablespoons" => Ok(Unit::Tablespoon),
            _ => Err(NutritionError::UnknownUnit(s.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_tags() {
        assert_eq!("g".parse::<Unit>(), Ok(Unit::Gram));
        assert_eq!("oz".parse::<Unit>(), Ok(Unit::Ounce));
        assert_eq!("ml".parse::<Unit>(), Ok(Unit::Milliliter));
        assert_eq!("cup".parse::<Unit>(), Ok(Unit::Cup));
        assert_eq!("tbsp".parse::<Unit>(), Ok(Unit::Tablespoon));
    }

    #[test]
    fn test_parse_long_names_and_case() {
        assert_eq!("Grams".parse::<Unit>(), Ok(Unit::Gram));
        assert_eq!(" ounce ".parse::<Unit>(), Ok(Unit::Ounce));
        assert_eq!("MILLILITERS".parse::<Unit>(), Ok(Unit::Milliliter));
        assert_eq!("cups".parse::<Unit>(), Ok(Unit::Cup));
        assert_eq!("Tablespoon".parse::<Unit>(), Ok(Unit::Tablespoon));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "tsp".parse::<Unit>(),
            Err(NutritionError::UnknownUnit("tsp".to_string()))
        );
        assert!("".parse::<Unit>().is_err());
        assert!("kg".parse::<Unit>().is_err());
    }

    #[test]
    fn test_tag_round_trips() {
        for unit in Unit::ALL {
            assert_eq!(unit.tag().parse::<Unit>(), Ok(unit));
            assert_eq!(unit.to_string(), unit.tag());
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(Unit::Gram.category(), UnitCategory::Mass);
        assert_eq!(Unit::Ounce.category(), UnitCategory::Mass);
        assert_eq!(Unit::Milliliter.category(), UnitCategory::Volume);
        assert_eq!(Unit::Cup.category(), UnitCategory::Volume);
        assert_eq!(Unit::Tablespoon.category(), UnitCategory::Volume);
        assert_eq!(UnitCategory::Mass.base_unit(), "g");
        assert_eq!(UnitCategory::Volume.base_unit(), "ml");
    }

    #[test]
    fn test_base_factors() {
        assert_eq!(Unit::Gram.base_factor(), 1.0);
        assert_eq!(Unit::Ounce.base_factor(), 28.35);
        assert_eq!(Unit::Milliliter.base_factor(), 1.0);
        assert_eq!(Unit::Cup.base_factor(), 240.0);
        assert_eq!(Unit::Tablespoon.base_factor(), 15.0);
    }
}
