//! Macro Cooking Calculator Library
//!
//! Raw-to-cooked macronutrient calculations, saved cooking ratios, and the
//! MCP server exposing them.

pub mod build_info;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
