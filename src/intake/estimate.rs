//! Calorie estimate from nutrition facts and a gram quantity.

use crate::error::IntakeError;
use crate::nutrition::{NutritionError, NutritionFacts};

/// Estimates calories as `trunc((calories / serving_size_g) * grams)`.
///
/// The fractional part is dropped, not rounded.
pub fn estimate_calories(facts: &NutritionFacts, grams: f64) -> Result<i64, IntakeError> {
    let NutritionFacts {
        calories,
        serving_size_g,
    } = *facts;

    if !serving_size_g.is_finite() || serving_size_g <= 0.0 {
        return Err(NutritionError::InvalidResponse.into());
    }
    if !calories.is_finite() || calories < 0.0 {
        return Err(NutritionError::InvalidResponse.into());
    }

    let estimate = (calories / serving_size_g) * grams;
    if estimate.is_nan() || !estimate.is_finite() || estimate < 0.0 {
        return Err(IntakeError::Calculation);
    }

    Ok(estimate.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_apple() {
        let facts = NutritionFacts::new(52.0, 100.0);
        assert_eq!(estimate_calories(&facts, 150.0).unwrap(), 78);
    }

    #[test]
    fn test_estimate_banana_two_kilos() {
        let facts = NutritionFacts::new(89.0, 100.0);
        assert_eq!(estimate_calories(&facts, 2000.0).unwrap(), 1780);
    }

    #[test]
    fn test_estimate_truncates() {
        // 89.4 / 100 * 55 = 49.17
        let facts = NutritionFacts::new(89.4, 100.0);
        assert_eq!(estimate_calories(&facts, 55.0).unwrap(), 49);

        // 10 / 3 * 2 = 6.666...
        let facts = NutritionFacts::new(10.0, 3.0);
        assert_eq!(estimate_calories(&facts, 2.0).unwrap(), 6);
    }

    #[test]
    fn test_zero_grams_is_zero_calories() {
        let facts = NutritionFacts::new(52.0, 100.0);
        assert_eq!(estimate_calories(&facts, 0.0).unwrap(), 0);
    }

    #[test]
    fn test_zero_serving_size_rejected() {
        let facts = NutritionFacts::new(52.0, 0.0);
        let result = estimate_calories(&facts, 150.0);
        assert!(matches!(
            result,
            Err(IntakeError::Nutrition(NutritionError::InvalidResponse))
        ));
    }

    #[test]
    fn test_non_finite_serving_size_rejected() {
        for serving in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, -100.0] {
            let facts = NutritionFacts::new(52.0, serving);
            assert!(matches!(
                estimate_calories(&facts, 150.0),
                Err(IntakeError::Nutrition(NutritionError::InvalidResponse))
            ));
        }
    }

    #[test]
    fn test_overflowing_estimate_is_calculation_error() {
        let facts = NutritionFacts::new(f64::MAX, 1e-300);
        let result = estimate_calories(&facts, 1.0);
        assert!(matches!(result, Err(IntakeError::Calculation)));
    }
}
