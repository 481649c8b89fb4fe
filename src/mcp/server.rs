//! Macro Calculator MCP Server Implementation
//!
//! Implements the MCP server with all calculator tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::{FoodData, FoodDataUpdate, MacroData};
use crate::nutrition::validation::sanitize_numeric_input;
use crate::nutrition::WeightUnit;
use crate::tools::calculator::{self, CalculatorSession};
use crate::tools::saved_foods;
use crate::tools::status::StatusTracker;

/// Macro Calculator MCP Service
#[derive(Clone)]
pub struct MacroCalcService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<MacroCalcService>,
    /// The food currently being entered
    session: Arc<std::sync::Mutex<CalculatorSession>>,
}

impl MacroCalcService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
            session: Arc::new(std::sync::Mutex::new(CalculatorSession::new())),
        }
    }

    fn with_session<T>(
        &self,
        f: impl FnOnce(&mut CalculatorSession) -> T,
    ) -> Result<T, McpError> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| McpError::internal_error(format!("Session lock poisoned: {}", e), None))?;
        Ok(f(&mut session))
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn parse_unit(code: &str) -> Result<WeightUnit, McpError> {
    WeightUnit::from_code(code).map_err(|e| McpError::invalid_params(e.to_string(), None))
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// A number typed either as JSON number or as text ("12.5", "12g").
/// Text with no leading number reads as 0.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    pub fn value(&self) -> f64 {
        match self {
            NumberInput::Number(n) => *n,
            NumberInput::Text(s) => sanitize_numeric_input(s),
        }
    }
}

fn default_unit() -> String {
    "g".to_string()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodParams {
    /// Food name
    pub name: String,
    /// Weight before cooking
    pub raw_weight: f64,
    /// Unit of raw_weight: g, oz, lb, or kg (default g)
    #[serde(default = "default_unit")]
    pub raw_weight_unit: String,
    /// Weight after cooking
    pub cooked_weight: f64,
    /// Unit of cooked_weight: g, oz, lb, or kg (default g)
    #[serde(default = "default_unit")]
    pub cooked_weight_unit: String,
    /// Calories at the raw weight
    #[serde(default)]
    pub calories: f64,
    /// Protein grams at the raw weight
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrate grams at the raw weight
    #[serde(default)]
    pub carbohydrates: f64,
    /// Fat grams at the raw weight
    #[serde(default)]
    pub fat: f64,
    /// Fiber grams at the raw weight
    #[serde(default)]
    pub fiber: f64,
}

impl FoodParams {
    fn into_food(self) -> Result<FoodData, McpError> {
        Ok(FoodData {
            name: self.name,
            raw_weight: self.raw_weight,
            raw_weight_unit: parse_unit(&self.raw_weight_unit)?,
            cooked_weight: self.cooked_weight,
            cooked_weight_unit: parse_unit(&self.cooked_weight_unit)?,
            raw_macros: MacroData {
                calories: self.calories,
                protein: self.protein,
                carbohydrates: self.carbohydrates,
                fat: self.fat,
                fiber: self.fiber,
            },
        })
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateFoodParams {
    pub name: Option<String>,
    pub raw_weight: Option<NumberInput>,
    /// g, oz, lb, or kg
    pub raw_weight_unit: Option<String>,
    pub cooked_weight: Option<NumberInput>,
    /// g, oz, lb, or kg
    pub cooked_weight_unit: Option<String>,
    pub calories: Option<NumberInput>,
    pub protein: Option<NumberInput>,
    pub carbohydrates: Option<NumberInput>,
    pub fat: Option<NumberInput>,
    pub fiber: Option<NumberInput>,
}

impl UpdateFoodParams {
    fn into_update(self) -> Result<FoodDataUpdate, McpError> {
        let number = |n: Option<NumberInput>| n.map(|n| n.value());
        Ok(FoodDataUpdate {
            name: self.name,
            raw_weight: number(self.raw_weight),
            raw_weight_unit: self.raw_weight_unit.as_deref().map(parse_unit).transpose()?,
            cooked_weight: number(self.cooked_weight),
            cooked_weight_unit: self.cooked_weight_unit.as_deref().map(parse_unit).transpose()?,
            calories: number(self.calories),
            protein: number(self.protein),
            carbohydrates: number(self.carbohydrates),
            fat: number(self.fat),
            fiber: number(self.fiber),
        })
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertWeightParams {
    pub value: f64,
    /// g, oz, lb, or kg
    pub from_unit: String,
    /// g, oz, lb, or kg
    pub to_unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoadSavedFoodParams {
    /// Saved food ID (takes precedence over name)
    pub id: Option<String>,
    /// Exact saved food name
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteSavedFoodParams {
    pub id: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MacroCalcService {
    // --- Status ---

    #[tool(description = "Get the current status of the calculator service including build info, database status, and process information")]
    async fn calculator_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.database);
        json_result(&status)
    }

    #[tool(description = "Get instructions for using the macro cooking calculator. Call this before a calculation session or when unsure how the tools fit together.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATOR_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    // --- Stateless calculation ---

    #[tool(description = "Validate a food and, if valid, calculate cooking loss, cooked macros, per-100g densities, and weight conversions. Macros are for the raw weight.")]
    fn calculate_macros(&self, Parameters(p): Parameters<FoodParams>) -> Result<CallToolResult, McpError> {
        let food = p.into_food()?;
        json_result(&calculator::evaluate(&food))
    }

    #[tool(description = "Validate a food without calculating. Returns only the failing fields and their messages.")]
    fn validate_food(&self, Parameters(p): Parameters<FoodParams>) -> Result<CallToolResult, McpError> {
        let food = p.into_food()?;
        json_result(&calculator::validate_food(&food))
    }

    #[tool(description = "Convert a weight between g, oz, lb, and kg")]
    fn convert_weight(&self, Parameters(p): Parameters<ConvertWeightParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::convert_weight(p.value, &p.from_unit, &p.to_unit)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    // --- Session ---

    #[tool(description = "Update any fields of the current food and recalculate. Numbers may be given as text; text without a leading number counts as 0.")]
    fn update_food(&self, Parameters(p): Parameters<UpdateFoodParams>) -> Result<CallToolResult, McpError> {
        let update = p.into_update()?;
        let view = self.with_session(|session| session.update(&update).clone())?;
        json_result(&view)
    }

    #[tool(description = "Get the current food with its validation state and results")]
    fn get_calculation(&self) -> Result<CallToolResult, McpError> {
        let view = self.with_session(|session| session.view().clone())?;
        json_result(&view)
    }

    #[tool(description = "Reset the current food to empty values in grams")]
    fn reset_food(&self) -> Result<CallToolResult, McpError> {
        let view = self.with_session(|session| session.reset().clone())?;
        json_result(&view)
    }

    // --- Saved foods ---

    #[tool(description = "Save the current food's cooked/raw ratio under its name. An existing name is kept as it was.")]
    fn save_food(&self) -> Result<CallToolResult, McpError> {
        let food = self.with_session(|session| session.food().clone())?;
        let result = saved_foods::save_food(&self.database, &food)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List saved foods, oldest first")]
    fn list_saved_foods(&self) -> Result<CallToolResult, McpError> {
        let result = saved_foods::list_saved_foods(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Load a saved food by id or name into the current food. Keeps the current raw weight and sets cooked weight from the saved ratio.")]
    fn load_saved_food(&self, Parameters(p): Parameters<LoadSavedFoodParams>) -> Result<CallToolResult, McpError> {
        let saved = saved_foods::find_saved_food(&self.database, p.id.as_deref(), p.name.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        let view = self.with_session(|session| session.apply_saved_food(&saved).clone())?;
        json_result(&view)
    }

    #[tool(description = "Delete a saved food by id")]
    fn delete_saved_food(&self, Parameters(p): Parameters<DeleteSavedFoodParams>) -> Result<CallToolResult, McpError> {
        let result = saved_foods::delete_saved_food(&self.database, &p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MacroCalcService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: crate::build_info::NAME.into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Macro Cooking Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Macro Cooking Calculator - converts raw-weight macros to the cooked portion. \
                 Call calculator_instructions first. \
                 One-shot: calculate_macros, validate_food, convert_weight. \
                 Session: update_food/get_calculation/reset_food. \
                 Saved ratios: save_food/list_saved_foods/load_saved_food/delete_saved_food. \
                 Status: calculator_status."
                    .into(),
            ),
        }
    }
}
