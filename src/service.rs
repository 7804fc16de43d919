//! Calorie intake operations on top of the user store and nutrition ports.

use chrono::{Local, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::UserStore;
use crate::error::IntakeError;
use crate::intake::{self, Limit};
use crate::models::{CalorieEntry, User};
use crate::nutrition::NutritionSource;

/// Raw add-entry input as received from a caller.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub item: String,
    pub date: String,
    pub quantity: String,
    pub quantity_type: String,
}

/// Entries selected by a by-date query.
#[derive(Debug, Clone)]
pub struct DateQuery {
    pub entries: Vec<CalorieEntry>,
    /// True when no date was supplied and today was used
    pub defaulted_to_today: bool,
}

/// Request-scoped calorie intake operations.
///
/// Holds no mutable state of its own; every call loads the user, works on
/// it, and saves it back when it mutates.
#[derive(Clone)]
pub struct CalorieService {
    users: Arc<dyn UserStore>,
    nutrition: Arc<dyn NutritionSource>,
}

impl CalorieService {
    pub fn new(users: Arc<dyn UserStore>, nutrition: Arc<dyn NutritionSource>) -> Self {
        Self { users, nutrition }
    }

    /// Validates, normalizes, resolves and estimates a new entry, then
    /// appends it to the user's history.
    ///
    /// All validation happens before the nutrition lookup.
    pub async fn add_entry(&self, user_id: Uuid, input: NewEntry) -> Result<CalorieEntry, IntakeError> {
        let NewEntry {
            item,
            date,
            quantity,
            quantity_type,
        } = input;

        if [&item, &date, &quantity, &quantity_type]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(IntakeError::validation("Please provide all the details"));
        }

        let normalized = intake::normalize(&quantity, &quantity_type)?;
        let date = intake::parse_entry_date(&date)
            .ok_or_else(|| IntakeError::validation("Date must be a valid date"))?;

        let mut user = self.load_user(user_id).await?;

        let facts = self.nutrition.lookup(&item).await?;
        let calorie_intake = intake::estimate_calories(&facts, normalized.grams)?;

        let entry = CalorieEntry::new(
            item,
            date,
            normalized.quantity,
            normalized.quantity_type,
            calorie_intake,
        );
        user.calorie_intake.push(entry.clone());
        self.users.save(&user).await?;

        tracing::info!(
            "Added calorie entry for user {}: {} ({} g, {} kcal)",
            user_id,
            entry.item,
            normalized.grams,
            entry.calorie_intake
        );
        Ok(entry)
    }

    /// Entries on the given local calendar date, or today when `date` is
    /// absent.
    pub async fn entries_by_date(
        &self,
        user_id: Uuid,
        date: Option<&str>,
    ) -> Result<DateQuery, IntakeError> {
        let date = date.map(str::trim).filter(|d| !d.is_empty());
        let target = match date {
            Some(raw) => intake::parse_target_date(raw)
                .ok_or_else(|| IntakeError::validation("Date must be a valid date"))?,
            None => Local::now().date_naive(),
        };

        let user = self.load_user(user_id).await?;

        Ok(DateQuery {
            entries: intake::filter_by_date(&user.calorie_intake, target, &Local),
            defaulted_to_today: date.is_none(),
        })
    }

    /// Entries inside a trailing window of days, or the full history.
    pub async fn entries_by_limit(
        &self,
        user_id: Uuid,
        limit: Limit,
    ) -> Result<Vec<CalorieEntry>, IntakeError> {
        let user = self.load_user(user_id).await?;
        Ok(intake::filter_by_limit(&user.calorie_intake, limit, Utc::now()))
    }

    /// Removes every entry matching `item` and `date` exactly.
    ///
    /// Returns the number of entries removed.
    pub async fn delete_entry(
        &self,
        user_id: Uuid,
        item: &str,
        date: &str,
    ) -> Result<usize, IntakeError> {
        if item.trim().is_empty() || date.trim().is_empty() {
            return Err(IntakeError::validation("Please provide all the details"));
        }
        let date = intake::parse_entry_date(date)
            .ok_or_else(|| IntakeError::validation("Date must be a valid date"))?;

        let mut user = self.load_user(user_id).await?;
        let removed = intake::remove_matching(&mut user.calorie_intake, item, &date);
        self.users.save(&user).await?;

        tracing::info!(
            "Deleted {} calorie entr{} for user {}",
            removed,
            if removed == 1 { "y" } else { "ies" },
            user_id
        );
        Ok(removed)
    }

    /// Daily calorie target from the user's latest biometrics and goal.
    pub async fn goal_calorie_intake(&self, user_id: Uuid) -> Result<f64, IntakeError> {
        let user = self.load_user(user_id).await?;
        intake::max_calorie_intake(&user, Local::now().date_naive())
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User, IntakeError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(IntakeError::UserNotFound)
    }
}
