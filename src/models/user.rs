use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::calorie_entry::CalorieEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[serde(other)]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!(
                "Invalid gender '{}'. Valid options: male, female, other",
                s
            )),
        }
    }
}

/// Dietary goal used to adjust the BMR into a daily target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Goal {
    WeightLoss,
    WeightGain,
    Maintain,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weightLoss",
            Goal::WeightGain => "weightGain",
            Goal::Maintain => "maintain",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weightloss" => Ok(Goal::WeightLoss),
            "weightgain" => Ok(Goal::WeightGain),
            "maintain" => Ok(Goal::Maintain),
            _ => Err(format!(
                "Invalid goal '{}'. Valid options: weightLoss, weightGain, maintain",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightEntry {
    /// Height in centimetres
    pub height: f64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Weight in kilograms
    pub weight: f64,
    pub date: DateTime<Utc>,
}

/// User aggregate: profile, biometric history and logged calorie entries.
///
/// Height and weight histories are ordered oldest first; the last entry is
/// the current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub gender: Gender,
    pub dob: NaiveDate,
    pub goal: Goal,
    pub height: Vec<HeightEntry>,
    pub weight: Vec<WeightEntry>,
    pub calorie_intake: Vec<CalorieEntry>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, gender: Gender, dob: NaiveDate, goal: Goal) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            name: None,
            gender,
            dob,
            goal,
            height: Vec::new(),
            weight: Vec::new(),
            calorie_intake: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_height(mut self, height: f64, date: DateTime<Utc>) -> Self {
        self.height.push(HeightEntry { height, date });
        self
    }

    pub fn with_weight(mut self, weight: f64, date: DateTime<Utc>) -> Self {
        self.weight.push(WeightEntry { weight, date });
        self
    }

    pub fn with_entries(mut self, entries: Vec<CalorieEntry>) -> Self {
        self.calorie_intake = entries;
        self
    }

    /// Most recently recorded height in centimetres.
    pub fn current_height(&self) -> Option<f64> {
        self.height.last().map(|h| h.height)
    }

    /// Most recently recorded weight in kilograms.
    pub fn current_weight(&self) -> Option<f64> {
        self.weight.last().map(|w| w.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1994, 6, 1).unwrap()
    }

    #[test]
    fn test_user_new() {
        let user = User::new("a@example.com", Gender::Female, dob(), Goal::Maintain);

        assert_eq!(user.email, "a@example.com");
        assert!(user.name.is_none());
        assert!(user.height.is_empty());
        assert!(user.weight.is_empty());
        assert!(user.calorie_intake.is_empty());
        assert!(user.current_height().is_none());
    }

    #[test]
    fn test_current_biometrics_use_last_entry() {
        let d1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let d2 = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let user = User::new("a@example.com", Gender::Male, dob(), Goal::Maintain)
            .with_height(170.0, d1)
            .with_height(172.5, d2)
            .with_weight(80.0, d1)
            .with_weight(78.0, d2);

        assert_eq!(user.current_height(), Some(172.5));
        assert_eq!(user.current_weight(), Some(78.0));
    }

    #[test]
    fn test_goal_from_str() {
        assert_eq!(Goal::from_str("weightLoss").unwrap(), Goal::WeightLoss);
        assert_eq!(Goal::from_str("weightgain").unwrap(), Goal::WeightGain);
        assert_eq!(Goal::from_str("maintain").unwrap(), Goal::Maintain);
        assert!(Goal::from_str("bulk").is_err());
    }

    #[test]
    fn test_goal_serializes_camel_case() {
        let json = serde_json::to_string(&Goal::WeightLoss).unwrap();
        assert_eq!(json, "\"weightLoss\"");
    }

    #[test]
    fn test_gender_unknown_tag_deserializes_as_other() {
        let gender: Gender = serde_json::from_str("\"nonbinary\"").unwrap();
        assert_eq!(gender, Gender::Other);
        assert!(Gender::from_str("nonbinary").is_err());
        assert_eq!(Gender::from_str("Male").unwrap(), Gender::Male);
    }
}
