//! Recipe Planner Library
//!
//! Recipes, unit conversion, and per-serving calorie calculation.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
