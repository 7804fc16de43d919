mod calorie_entry;
mod quantity_type;
mod user;

pub use calorie_entry::CalorieEntry;
pub use quantity_type::QuantityType;
pub use user::{Gender, Goal, HeightEntry, User, WeightEntry};
