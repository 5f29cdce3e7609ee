//! GymPal MCP Server Implementation
//!
//! Exposes the GymPal operations as MCP tools over stdio.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::models::Numeric;
use crate::nutrition::{ActivityLevel, IntakeEntry};
use crate::store::DataStore;
use crate::tools::nutrition::{self, IntakeRequest};
use crate::tools::profile::{self, ProfileRequest};
use crate::tools::routines::{self, ExerciseInput, RoutineInput, SetChange};
use crate::tools::status::StatusTracker;
use crate::tools::users::{self, LoginRequest, RegisterRequest, UpdateUserRequest};

/// GymPal MCP Service
#[derive(Clone)]
pub struct GympalService {
    store: DataStore,
    status_tracker: Arc<StatusTracker>,
    tool_router: ToolRouter<GympalService>,
}

impl GympalService {
    pub fn new(store: DataStore) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(store.clone())),
            store,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_mcp(err: ServiceError) -> McpError {
    if err.is_client_error() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// User Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RegisterUserParams {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoginUserParams {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetUserParams {
    /// User id
    pub id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateUserParams {
    pub user_id: String,
    pub new_username: String,
    pub email: String,
    /// Omit to keep the current password
    pub password: Option<String>,
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveProfileParams {
    pub username: String,
    /// "ganar masa muscular", "tonificar" or "bajar de peso"
    pub objetivo: String,
    pub edad: f64,
    /// "masculino" or "femenino"
    pub sexo: String,
    /// Height in cm
    pub altura: f64,
    /// Weight in kg
    pub peso: f64,
    /// "principiante", "intermedio" or "avanzado"
    pub experiencia: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetProfileParams {
    /// User id or username
    pub user: String,
    /// "sedentaria", "ligera", "moderada" or "alta"
    pub actividad: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UserKeyParams {
    /// User id or username
    pub user: String,
}

// ============================================================================
// Routine Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExerciseParams {
    pub nombre: String,
    #[serde(default)]
    pub peso: f64,
    #[serde(default)]
    pub repeticiones: u32,
    #[serde(default)]
    pub series: u32,
}

impl From<ExerciseParams> for ExerciseInput {
    fn from(p: ExerciseParams) -> Self {
        ExerciseInput {
            nombre: Some(p.nombre),
            peso: Some(Numeric::Number(p.peso)),
            repeticiones: Some(Numeric::Number(p.repeticiones as f64)),
            series: Some(Numeric::Number(p.series as f64)),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateRoutineParams {
    /// Generated when omitted
    pub id: Option<String>,
    pub username: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub ejercicios: Vec<ExerciseParams>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateRoutineParams {
    pub id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub ejercicios: Vec<ExerciseParams>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRoutinesParams {
    pub username: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RoutineIdParams {
    pub id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ChangeSetParams {
    pub id: String,
    /// Zero-based exercise index
    pub index: usize,
    /// "increment" or "decrement"
    #[serde(default = "default_change")]
    pub change: String,
}

fn default_change() -> String { "increment".to_string() }

// ============================================================================
// Nutrition Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecommendationsParams {
    /// Goal, free text accepted
    pub objetivo: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IntakeItemParams {
    /// Desayuno, Almuerzo, Merienda or Cena
    pub comida: String,
    pub alimento: String,
    pub cantidad: u32,
    pub porcion: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateIntakeParams {
    pub items: Vec<IntakeItemParams>,
    pub meta_calorias: Option<f64>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl GympalService {
    // --- Status ---

    #[tool(description = "Get the current status of the GymPal service including build info, data files, and process information")]
    async fn gympal_status(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.status_tracker.get_status())
    }

    #[tool(description = "Get instructions for using the GymPal tools. Call this first when unsure which tool to use.")]
    fn gympal_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::GYMPAL_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(GYMPAL_INSTRUCTIONS)]))
    }

    // --- Users ---

    #[tool(description = "Register a new user with username, email and password")]
    fn register_user(&self, Parameters(p): Parameters<RegisterUserParams>) -> Result<CallToolResult, McpError> {
        let req = RegisterRequest { username: Some(p.username), email: Some(p.email), password: Some(p.password) };
        let result = users::register(&self.store, req).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "Check a user's email and password")]
    fn login_user(&self, Parameters(p): Parameters<LoginUserParams>) -> Result<CallToolResult, McpError> {
        let req = LoginRequest { email: Some(p.email), password: Some(p.password) };
        let result = users::login(&self.store, req).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "List all users (id, username, email)")]
    fn list_users(&self) -> Result<CallToolResult, McpError> {
        let result = users::list_users(&self.store).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "Get a user by id")]
    fn get_user(&self, Parameters(p): Parameters<GetUserParams>) -> Result<CallToolResult, McpError> {
        let result = users::get_user(&self.store, &p.id).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "Change a user's username, email and optionally password. A new username carries the user's profile and routines along.")]
    fn update_user(&self, Parameters(p): Parameters<UpdateUserParams>) -> Result<CallToolResult, McpError> {
        let req = UpdateUserRequest {
            user_id: Some(p.user_id), new_username: Some(p.new_username),
            email: Some(p.email), password: p.password,
        };
        let result = users::update_user(&self.store, req).map_err(to_mcp)?;
        json_result(&result)
    }

    // --- Profile ---

    #[tool(description = "Save the questionnaire profile for a user, replacing any previous one")]
    fn save_profile(&self, Parameters(p): Parameters<SaveProfileParams>) -> Result<CallToolResult, McpError> {
        let req = ProfileRequest {
            username: Some(p.username), objetivo: Some(p.objetivo),
            edad: Some(p.edad.into()), sexo: Some(p.sexo),
            altura: Some(p.altura.into()), peso: Some(p.peso.into()),
            experiencia: Some(p.experiencia),
        };
        let result = profile::save_profile(&self.store, req).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "Get a user's profile and daily calorie target by user id or username")]
    fn get_profile(&self, Parameters(p): Parameters<GetProfileParams>) -> Result<CallToolResult, McpError> {
        let activity = match p.actividad.as_deref() {
            None => None,
            Some(raw) => Some(ActivityLevel::from_str(raw).ok_or_else(|| {
                McpError::invalid_params(format!("Unknown activity level '{}'", raw), None)
            })?),
        };
        let result = profile::get_profile(&self.store, &p.user, activity).map_err(to_mcp)?;
        json_result(&result)
    }

    // --- Routines ---

    #[tool(description = "Create a workout routine with at least one exercise")]
    fn create_routine(&self, Parameters(p): Parameters<CreateRoutineParams>) -> Result<CallToolResult, McpError> {
        let input = RoutineInput {
            id: p.id, username: Some(p.username), nombre: Some(p.nombre), descripcion: p.descripcion,
            ejercicios: Some(p.ejercicios.into_iter().map(ExerciseInput::from).collect()),
        };
        let result = routines::create_routine(&self.store, input).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "List a user's routines")]
    fn list_routines(&self, Parameters(p): Parameters<ListRoutinesParams>) -> Result<CallToolResult, McpError> {
        let result = routines::list_routines(&self.store, &p.username).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "Get a routine by id")]
    fn get_routine(&self, Parameters(p): Parameters<RoutineIdParams>) -> Result<CallToolResult, McpError> {
        let result = routines::get_routine(&self.store, &p.id).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "Replace a routine's name, description and exercises. Resets its progress.")]
    fn update_routine(&self, Parameters(p): Parameters<UpdateRoutineParams>) -> Result<CallToolResult, McpError> {
        let input = RoutineInput {
            id: None, username: None, nombre: Some(p.nombre), descripcion: p.descripcion,
            ejercicios: Some(p.ejercicios.into_iter().map(ExerciseInput::from).collect()),
        };
        let result = routines::update_routine(&self.store, &p.id, input).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "Delete a routine and its progress")]
    fn delete_routine(&self, Parameters(p): Parameters<RoutineIdParams>) -> Result<CallToolResult, McpError> {
        let result = routines::delete_routine(&self.store, &p.id).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "Get completed sets per exercise and overall for a routine")]
    fn get_progress(&self, Parameters(p): Parameters<RoutineIdParams>) -> Result<CallToolResult, McpError> {
        let result = routines::get_progress(&self.store, &p.id).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "Mark one set of an exercise as done (increment) or undone (decrement)")]
    fn change_set(&self, Parameters(p): Parameters<ChangeSetParams>) -> Result<CallToolResult, McpError> {
        let change = match p.change.trim().to_lowercase().as_str() {
            "increment" | "incrementar" => SetChange::Increment,
            "decrement" | "decrementar" => SetChange::Decrement,
            other => {
                return Err(McpError::invalid_params(format!("Unknown change '{}'", other), None))
            }
        };
        let result = routines::change_set(&self.store, &p.id, p.index, change).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "Reset all set counters of a routine to zero")]
    fn reset_progress(&self, Parameters(p): Parameters<RoutineIdParams>) -> Result<CallToolResult, McpError> {
        let result = routines::reset_progress(&self.store, &p.id).map_err(to_mcp)?;
        json_result(&result)
    }

    // --- Nutrition ---

    #[tool(description = "Get food recommendations for a goal, with meal and macro category")]
    fn get_recommendations(&self, Parameters(p): Parameters<RecommendationsParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::recommendations(&self.store, &p.objetivo).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "Get a user's meal plan grouped by meal and macro category, with the calorie target")]
    fn get_meal_plan(&self, Parameters(p): Parameters<UserKeyParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::meal_plan(&self.store, &p.user).map_err(to_mcp)?;
        json_result(&result)
    }

    #[tool(description = "List the intake tracker's food catalog and portion sizes")]
    fn list_foods(&self) -> Result<CallToolResult, McpError> {
        json_result(&nutrition::catalog())
    }

    #[tool(description = "Total carbs, protein, fat and calories for a list of catalog foods")]
    fn calculate_intake(&self, Parameters(p): Parameters<CalculateIntakeParams>) -> Result<CallToolResult, McpError> {
        let items = p
            .items
            .into_iter()
            .map(|item| {
                let meal = crate::models::Meal::from_str(&item.comida).ok_or_else(|| {
                    McpError::invalid_params(format!("Unknown meal '{}'", item.comida), None)
                })?;
                Ok(IntakeEntry { meal, food: item.alimento, quantity: item.cantidad, portion: item.porcion })
            })
            .collect::<Result<Vec<_>, McpError>>()?;
        let req = IntakeRequest { items, calorie_target: p.meta_calorias };
        let result = nutrition::calculate(req).map_err(to_mcp)?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for GympalService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "gympal".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("GymPal".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "GymPal - workout routines, fitness profile and nutrition. \
                 Call gympal_instructions for field values and rules. \
                 Users: register_user, login_user, list_users, get_user, update_user. \
                 Profile: save_profile, get_profile. \
                 Routines: create/list/get/update/delete_routine. \
                 Progress: get_progress, change_set, reset_progress. \
                 Nutrition: get_recommendations, get_meal_plan, list_foods, calculate_intake."
                    .into(),
            ),
        }
    }
}
