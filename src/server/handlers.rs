//! Route handlers. Request bodies are parsed leniently so that every
//! failure, including malformed JSON, is reported through the envelope.

use axum::{body::Bytes, extract::State, Extension, Json};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::auth::AuthUser;
use super::response::ApiResponse;
use super::AppState;
use crate::error::IntakeError;
use crate::intake::Limit;
use crate::models::CalorieEntry;
use crate::service::NewEntry;

type ApiResult<T> = Result<Json<ApiResponse<T>>, IntakeError>;

#[derive(Debug, Default, Deserialize)]
pub struct AddEntryRequest {
    item: Option<String>,
    date: Option<String>,
    quantity: Option<Value>,
    quantitytype: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateRequest {
    date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitRequest {
    limit: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteEntryRequest {
    item: Option<String>,
    date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalData {
    max_calorie_intake: f64,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Parses a JSON body; an empty body yields the default value.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, IntakeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| IntakeError::validation(format!("Invalid request body: {}", e)))
}

/// Quantity may be sent as a number or a numeric string.
fn quantity_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Health check endpoint (no auth required)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn test() -> Json<ApiResponse<()>> {
    Json(ApiResponse::success(
        "Test API works for calorie intake report",
    ))
}

pub async fn add_calorie_intake(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> ApiResult<()> {
    let request: AddEntryRequest = parse_body(&body)?;

    let input = NewEntry {
        item: request.item.unwrap_or_default(),
        date: request.date.unwrap_or_default(),
        quantity: quantity_text(request.quantity),
        quantity_type: request.quantitytype.unwrap_or_default(),
    };
    state.service.add_entry(user.user_id, input).await?;

    Ok(Json(ApiResponse::success("Calorie intake added successfully")))
}

pub async fn get_calorie_intake_by_date(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> ApiResult<Vec<CalorieEntry>> {
    let request: DateRequest = parse_body(&body)?;

    let result = state
        .service
        .entries_by_date(user.user_id, request.date.as_deref())
        .await?;

    let message = if result.defaulted_to_today {
        "Calorie intake for today"
    } else {
        "Calorie intake for the date"
    };
    Ok(Json(ApiResponse::with_data(message, result.entries)))
}

pub async fn get_calorie_intake_by_limit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> ApiResult<Vec<CalorieEntry>> {
    let request: LimitRequest = parse_body(&body)?;
    let limit = Limit::from_value(request.limit.as_ref())?;

    let entries = state.service.entries_by_limit(user.user_id, limit).await?;

    let message = match limit {
        Limit::All => "Calorie intake".to_string(),
        Limit::Days(days) => format!("Calorie intake for the last {} days", days),
    };
    Ok(Json(ApiResponse::with_data(message, entries)))
}

pub async fn delete_calorie_intake(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> ApiResult<()> {
    let request: DeleteEntryRequest = parse_body(&body)?;

    state
        .service
        .delete_entry(
            user.user_id,
            request.item.as_deref().unwrap_or_default(),
            request.date.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(ApiResponse::success(
        "Calorie intake deleted successfully",
    )))
}

pub async fn get_goal_calorie_intake(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<GoalData> {
    let max_calorie_intake = state.service.goal_calorie_intake(user.user_id).await?;

    Ok(Json(ApiResponse::with_data(
        "max calorie intake",
        GoalData { max_calorie_intake },
    )))
}
