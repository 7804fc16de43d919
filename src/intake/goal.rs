//! Daily calorie goal from the user's biometric history.

use chrono::{Datelike, NaiveDate};

use crate::error::IntakeError;
use crate::models::{Gender, Goal, User};

/// Calories added or removed from the BMR for a gain or loss goal.
const GOAL_ADJUSTMENT: f64 = 500.0;

/// Harris-Benedict basal metabolic rate.
///
/// Any tag other than male uses the female formula.
pub fn basal_metabolic_rate(gender: Gender, weight_kg: f64, height_cm: f64, age: i32) -> f64 {
    let age = f64::from(age);
    match gender {
        Gender::Male => 88.362 + (13.397 * weight_kg) + (4.799 * height_cm) - (5.677 * age),
        Gender::Female | Gender::Other => {
            447.593 + (9.247 * weight_kg) + (3.098 * height_cm) - (4.330 * age)
        }
    }
}

/// Shifts the BMR by the stated goal.
pub fn adjust_for_goal(bmr: f64, goal: Goal) -> f64 {
    match goal {
        Goal::WeightLoss => bmr - GOAL_ADJUSTMENT,
        Goal::WeightGain => bmr + GOAL_ADJUSTMENT,
        Goal::Maintain => bmr,
    }
}

/// Age by calendar-year subtraction; birthdays later in the year are not
/// taken into account.
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - dob.year()
}

/// Daily calorie target for `user` as of `today`.
pub fn max_calorie_intake(user: &User, today: NaiveDate) -> Result<f64, IntakeError> {
    let (height_cm, weight_kg) = match (user.current_height(), user.current_weight()) {
        (Some(h), Some(w)) => (h, w),
        _ => return Err(IntakeError::MissingBiometrics),
    };

    let age = age_in_years(user.dob, today);
    let bmr = basal_metabolic_rate(user.gender, weight_kg, height_cm, age);
    Ok(adjust_for_goal(bmr, user.goal))
}
