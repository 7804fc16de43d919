//! Quantity normalization to grams.

use std::str::FromStr;

use crate::error::IntakeError;
use crate::models::QuantityType;

/// A validated quantity together with its gram equivalent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedQuantity {
    /// Magnitude as entered by the caller
    pub quantity: f64,
    pub quantity_type: QuantityType,
    pub grams: f64,
}

/// Parses a caller-supplied quantity. Must be a finite number `>= 0`.
pub fn parse_quantity(raw: &str) -> Result<f64, IntakeError> {
    let quantity = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| IntakeError::InvalidQuantity)?;

    if !quantity.is_finite() || quantity < 0.0 {
        return Err(IntakeError::InvalidQuantity);
    }
    Ok(quantity)
}

/// Converts `quantity` of `unit` into grams.
pub fn to_grams(quantity: f64, unit: &str) -> Result<(QuantityType, f64), IntakeError> {
    let quantity_type = QuantityType::from_str(unit)
        .map_err(|_| IntakeError::InvalidQuantityType(unit.to_string()))?;

    let grams = quantity * quantity_type.grams_per_unit();
    if !grams.is_finite() {
        return Err(IntakeError::InvalidGrams);
    }
    Ok((quantity_type, grams))
}

/// Validates the raw quantity and unit and converts them to grams.
pub fn normalize(raw_quantity: &str, unit: &str) -> Result<NormalizedQuantity, IntakeError> {
    let quantity = parse_quantity(raw_quantity)?;
    let (quantity_type, grams) = to_grams(quantity, unit)?;

    Ok(NormalizedQuantity {
        quantity,
        quantity_type,
        grams,
    })
}
