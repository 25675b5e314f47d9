//! Planner Tools module
//!
//! MCP tool implementations for the recipe planner.

pub mod nutrition;
pub mod recipes;
pub mod status;
