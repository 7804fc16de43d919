//! Uniform `{ok, message, data?}` response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::IntakeError;
use crate::nutrition::NutritionError;

/// Message returned when the nutrition source withholds calorie data.
const MISSING_DATA_MESSAGE: &str = "API response contains invalid values for calories or \
     serving size. Please ensure you have access to the required data.";

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            ok: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            data: None,
        }
    }
}

impl IntakeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IntakeError::Validation(_)
            | IntakeError::InvalidQuantity
            | IntakeError::InvalidQuantityType(_)
            | IntakeError::InvalidGrams
            | IntakeError::MissingBiometrics => StatusCode::BAD_REQUEST,
            IntakeError::UserNotFound => StatusCode::NOT_FOUND,
            IntakeError::Nutrition(NutritionError::Status { status, .. }) => {
                // Only error statuses are passed through as-is
                StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY)
            }
            IntakeError::Nutrition(_) | IntakeError::Calculation | IntakeError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the caller in the envelope.
    pub fn public_message(&self) -> String {
        match self {
            IntakeError::Validation(message) => message.clone(),
            IntakeError::InvalidQuantityType(_) => "Invalid quantity type".to_string(),
            IntakeError::MissingBiometrics => "Please record height and weight first".to_string(),
            IntakeError::Nutrition(e) => match e {
                NutritionError::Transport(_) => "Request failed".to_string(),
                NutritionError::Status { .. } => "Nutrition API returned an error".to_string(),
                NutritionError::Parse(_) => "Error parsing API response".to_string(),
                NutritionError::InvalidResponse => "Invalid API response".to_string(),
                NutritionError::MissingData => MISSING_DATA_MESSAGE.to_string(),
            },
            IntakeError::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Upstream detail attached as `data`, if any.
    pub fn detail(&self) -> Option<String> {
        match self {
            IntakeError::Nutrition(NutritionError::Transport(detail))
            | IntakeError::Nutrition(NutritionError::Parse(detail)) => Some(detail.clone()),
            IntakeError::Nutrition(NutritionError::Status { body, .. }) => Some(body.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self);
        }

        let body = ApiResponse {
            ok: false,
            message: self.public_message(),
            data: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}
