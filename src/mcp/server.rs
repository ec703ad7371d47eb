//! FitNutrition MCP Server Implementation
//!
//! Implements the MCP server with all FitNutrition tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::db::Database;
use crate::tools::accounts::{self, RegisterInput};
use crate::tools::nutrition;
use crate::tools::profile::{self, ProfileChanges};
use crate::tools::status::StatusTracker;
use crate::tools::ProfileInput;

/// FitNutrition MCP Service
#[derive(Clone)]
pub struct FitNutritionService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    config: Arc<Config>,
    tool_router: ToolRouter<FitNutritionService>,
}

impl FitNutritionService {
    pub fn new(config: Config, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config.database_path.clone()))),
            database,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Account Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserParams {
    /// Display name
    pub name: String,
    /// Email address, used to log in (case-insensitive)
    pub email: String,
    /// Password, at least 6 characters
    pub password: String,
    /// Age in years (1-120)
    pub age_years: u32,
    /// male or female
    pub sex: String,
    /// Body weight in kg (>= 1)
    pub weight_kg: f64,
    /// Height in cm (>= 1)
    pub height_cm: f64,
    /// sedentary, lightly_active, moderately_active (default), very_active, extremely_active
    pub activity_level: Option<String>,
    /// lose_weight, maintain_weight (default), gain_weight, build_muscle
    pub goal: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TokenParams {
    /// Session token from register_user or login
    pub token: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileParams {
    /// Session token from register_user or login
    pub token: String,
    /// New display name
    pub name: Option<String>,
    /// New age in years (1-120)
    pub age_years: Option<u32>,
    /// male or female
    pub sex: Option<String>,
    /// New weight in kg (>= 1)
    pub weight_kg: Option<f64>,
    /// New height in cm (>= 1)
    pub height_cm: Option<f64>,
    /// sedentary, lightly_active, moderately_active, very_active, extremely_active
    pub activity_level: Option<String>,
    /// lose_weight, maintain_weight, gain_weight, build_muscle
    pub goal: Option<String>,
}

// ============================================================================
// Nutrition Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateNutritionParams {
    /// Body weight in kg
    pub weight_kg: f64,
    /// Height in cm
    pub height_cm: f64,
    /// Age in years
    pub age_years: u32,
    /// male or female
    pub sex: String,
    /// sedentary, lightly_active, moderately_active (default), very_active, extremely_active
    pub activity_level: Option<String>,
    /// lose_weight, maintain_weight (default), gain_weight, build_muscle
    pub goal: Option<String>,
}

impl From<CalculateNutritionParams> for ProfileInput {
    fn from(p: CalculateNutritionParams) -> Self {
        Self {
            weight_kg: p.weight_kg,
            height_cm: p.height_cm,
            age_years: p.age_years,
            sex: p.sex,
            activity_level: p.activity_level,
            goal: p.goal,
        }
    }
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FitNutritionService {
    // --- Status ---

    #[tool(description = "Get the current status of the FitNutrition service including build info, database status, and process information")]
    async fn fitnutrition_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for accounts, profile values and nutrition tools. Call this first when unsure how to use FitNutrition.")]
    fn account_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::ACCOUNT_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(ACCOUNT_INSTRUCTIONS)]))
    }

    // --- Accounts ---

    #[tool(description = "Register a new user with a biometric profile. Returns a session token and the user.")]
    fn register_user(&self, Parameters(p): Parameters<RegisterUserParams>) -> Result<CallToolResult, McpError> {
        let input = RegisterInput {
            name: p.name,
            email: p.email,
            password: p.password,
            profile: ProfileInput {
                weight_kg: p.weight_kg,
                height_cm: p.height_cm,
                age_years: p.age_years,
                sex: p.sex,
                activity_level: p.activity_level,
                goal: p.goal,
            },
        };
        let result = accounts::register_user(&self.database, &self.config, input)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Log in with email and password. Returns a new session token and the user.")]
    fn login(&self, Parameters(p): Parameters<LoginParams>) -> Result<CallToolResult, McpError> {
        let result = accounts::login(&self.database, &self.config, &p.email, &p.password)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "End the session behind a token")]
    fn logout(&self, Parameters(p): Parameters<TokenParams>) -> Result<CallToolResult, McpError> {
        let result = accounts::logout(&self.database, &p.token).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the user and profile behind a session token")]
    fn get_current_user(&self, Parameters(p): Parameters<TokenParams>) -> Result<CallToolResult, McpError> {
        let result = accounts::get_current_user(&self.database, &p.token)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Update the signed-in user's profile. Only provided fields change.")]
    fn update_profile(&self, Parameters(p): Parameters<UpdateProfileParams>) -> Result<CallToolResult, McpError> {
        let changes = ProfileChanges {
            name: p.name,
            age_years: p.age_years,
            sex: p.sex,
            weight_kg: p.weight_kg,
            height_cm: p.height_cm,
            activity_level: p.activity_level,
            goal: p.goal,
        };
        let result = profile::update_profile(&self.database, &p.token, changes)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Nutrition ---

    #[tool(description = "Get BMI, BMR, TDEE, ideal weight range, calorie target, macros and micronutrients for the signed-in user")]
    fn get_nutrition_calculations(&self, Parameters(p): Parameters<TokenParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::get_nutrition_calculations(&self.database, &p.token)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Compute a nutrition report for any biometric profile without an account")]
    fn calculate_nutrition(&self, Parameters(p): Parameters<CalculateNutritionParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::calculate_nutrition(&p.into()).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for FitNutritionService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fitnutrition".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FitNutrition".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FitNutrition - personalized calorie, macro and micronutrient targets. \
                 IMPORTANT: Call account_instructions for profile values and workflow. \
                 Accounts: register_user/login return a session token; logout, get_current_user. \
                 Profile: update_profile (partial update, token required). \
                 Nutrition: get_nutrition_calculations (token), calculate_nutrition (no account)."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_params_use_wire_names() {
        let p: RegisterUserParams = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret1",
            "ageYears": 34,
            "sex": "female",
            "weightKg": 62.5,
            "heightCm": 168.0
        }))
        .unwrap();
        assert_eq!(p.age_years, 34);
        assert!(p.activity_level.is_none());
        assert!(p.goal.is_none());
    }

    #[test]
    fn test_service_info() {
        let service = FitNutritionService::new(Config::default(), Database::in_memory().unwrap());
        let info = service.get_info();
        assert_eq!(info.server_info.name, "fitnutrition");
        assert!(info.capabilities.tools.is_some());
    }
}
