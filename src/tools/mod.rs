//! Calculator Tools module
//!
//! Tool implementations behind the MCP server.

pub mod calculator;
pub mod saved_foods;
pub mod status;
