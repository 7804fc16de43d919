//! Error type for calorie intake operations.

use thiserror::Error;

use crate::db::StoreError;
use crate::nutrition::NutritionError;

/// Everything that can go wrong while serving a calorie intake request.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// A request field is missing or malformed.
    #[error("{0}")]
    Validation(String),
    #[error("Quantity must be a valid number")]
    InvalidQuantity,
    #[error("Invalid quantity type: {0}")]
    InvalidQuantityType(String),
    #[error("Calculated quantity in grams is invalid")]
    InvalidGrams,
    /// The user has no height or weight on record.
    #[error("No height or weight recorded for user")]
    MissingBiometrics,
    #[error("User not found")]
    UserNotFound,
    #[error(transparent)]
    Nutrition(#[from] NutritionError),
    /// The estimate came out NaN or non-finite after all input checks.
    #[error("Failed to calculate calorie intake")]
    Calculation,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntakeError {
    pub fn validation(message: impl Into<String>) -> Self {
        IntakeError::Validation(message.into())
    }
}
