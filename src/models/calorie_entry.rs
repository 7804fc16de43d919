use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::quantity_type::QuantityType;

/// A single logged food item with its derived calorie estimate.
///
/// Entries are never edited after creation; a correction is a delete
/// followed by a new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieEntry {
    pub item: String,
    pub date: DateTime<Utc>,
    pub quantity: f64,
    pub quantity_type: QuantityType,
    pub calorie_intake: i64,
}

impl CalorieEntry {
    pub fn new(
        item: impl Into<String>,
        date: DateTime<Utc>,
        quantity: f64,
        quantity_type: QuantityType,
        calorie_intake: i64,
    ) -> Self {
        Self {
            item: item.into(),
            date,
            quantity,
            quantity_type,
            calorie_intake,
        }
    }

    /// True when both the item name and the timestamp match exactly.
    pub fn matches(&self, item: &str, date: &DateTime<Utc>) -> bool {
        self.item == item && self.date == *date
    }
}

impl fmt::Display for CalorieEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{} ({} kcal)",
            self.date.format("%Y-%m-%d %H:%M"),
            self.item,
            self.quantity,
            self.quantity_type,
            self.calorie_intake
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> CalorieEntry {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        CalorieEntry::new("banana", date, 2.0, QuantityType::Kg, 1780)
    }

    #[test]
    fn test_entry_matches_item_and_date() {
        let entry = sample();
        let same = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let other = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();

        assert!(entry.matches("banana", &same));
        assert!(!entry.matches("apple", &same));
        assert!(!entry.matches("banana", &other));
    }

    #[test]
    fn test_entry_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["item"], "banana");
        assert_eq!(json["quantityType"], "kg");
        assert_eq!(json["calorieIntake"], 1780);
        assert_eq!(json["date"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_entry_display() {
        let output = format!("{}", sample());
        assert!(output.contains("2024-01-01"));
        assert!(output.contains("banana"));
        assert!(output.contains("1780 kcal"));
    }
}
