//! Nutrition lookup against an external data source.
//!
//! The source is consumed through the [`NutritionSource`] port so the
//! calorie pipeline can run against a stub in tests. The production
//! adapter is [`NutritionClient`], which queries an HTTP endpoint that
//! returns a JSON array of candidate records:
//!
//! ```text
//! [
//!   { "name": "banana", "calories": 89.4, "serving_size_g": 100.0, ... },
//!   ...
//! ]
//! ```
//!
//! Only the first record is used.

mod client;

pub use client::NutritionClient;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Calories for a reference serving, as reported by the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionFacts {
    pub calories: f64,
    pub serving_size_g: f64,
}

impl NutritionFacts {
    pub fn new(calories: f64, serving_size_g: f64) -> Self {
        Self {
            calories,
            serving_size_g,
        }
    }
}

/// Errors from a nutrition lookup.
#[derive(Debug, Error)]
pub enum NutritionError {
    /// The source could not be reached.
    #[error("Nutrition request failed: {0}")]
    Transport(String),
    /// The source answered with a non-200 status.
    #[error("Nutrition source returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The body was not valid JSON.
    #[error("Failed to parse nutrition response: {0}")]
    Parse(String),
    /// The body was not a non-empty array, or the numbers are unusable.
    #[error("Invalid nutrition response")]
    InvalidResponse,
    /// Calories or serving size are missing or not numeric. The free tier of
    /// the upstream source returns placeholder strings for these fields.
    #[error("Nutrition response is missing calories or serving size")]
    MissingData,
}

/// Port for resolving a food item to its nutrition facts.
#[async_trait]
pub trait NutritionSource: Send + Sync {
    /// Performs exactly one lookup for `item`.
    async fn lookup(&self, item: &str) -> Result<NutritionFacts, NutritionError>;
}

/// Extracts nutrition facts from a parsed response body.
///
/// The first element of the array wins; there is no disambiguation between
/// multiple matches.
pub fn facts_from_response(body: &Value) -> Result<NutritionFacts, NutritionError> {
    let first = body
        .as_array()
        .and_then(|records| records.first())
        .ok_or(NutritionError::InvalidResponse)?;

    let calories = parse_number(first.get("calories"));
    let serving_size_g = parse_number(first.get("serving_size_g"));

    match (calories, serving_size_g) {
        (Some(calories), Some(serving_size_g)) => Ok(NutritionFacts {
            calories,
            serving_size_g,
        }),
        _ => Err(NutritionError::MissingData),
    }
}

/// Reads a finite number from a JSON number or a numeric string.
fn parse_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}
