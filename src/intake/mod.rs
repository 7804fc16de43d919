//! Calorie intake core: quantity normalization, calorie estimation,
//! history filtering and goal calories.

pub mod estimate;
pub mod goal;
pub mod quantity;
pub mod query;

pub use estimate::estimate_calories;
pub use goal::{adjust_for_goal, age_in_years, basal_metabolic_rate, max_calorie_intake};
pub use quantity::{normalize, NormalizedQuantity};
pub use query::{
    filter_by_date, filter_by_limit, parse_entry_date, parse_target_date, remove_matching, Limit,
};
