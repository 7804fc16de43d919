use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::models::{CalorieEntry, Gender, Goal, HeightEntry, QuantityType, User, WeightEntry};

pub struct UserRepository {
    pool: SqlitePool,
}

// Row types for database queries
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: Option<String>,
    gender: String,
    dob: String,
    goal: String,
    created_at: String,
}

#[derive(sqlx::FromRow)]
struct HeightRow {
    height: f64,
    date: String,
}

#[derive(sqlx::FromRow)]
struct WeightRow {
    weight: f64,
    date: String,
}

#[derive(sqlx::FromRow)]
struct EntryRow {
    item: String,
    date: String,
    quantity: f64,
    quantity_type: String,
    calorie_intake: i64,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> Result<User, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, gender, dob, goal, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.gender.as_str())
        .bind(user.dob.format("%Y-%m-%d").to_string())
        .bind(user.goal.as_str())
        .bind(user.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        insert_children(&mut *tx, user).await?;

        tx.commit().await?;

        self.find_by_id(user.id)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT * FROM users WHERE LOWER(email) = LOWER(?)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => self.hydrate_user(row).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows: Vec<UserRow> = sqlx::query_as("SELECT * FROM users ORDER BY email")
            .fetch_all(&self.pool)
            .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            users.push(self.hydrate_user(row).await?);
        }
        Ok(users)
    }

    /// Deletes a user and, by cascade, their history. Returns false if no
    /// such user existed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn hydrate_user(&self, row: UserRow) -> Result<User, StoreError> {
        let heights: Vec<HeightRow> =
            sqlx::query_as("SELECT height, date FROM height_entries WHERE user_id = ? ORDER BY id")
                .bind(&row.id)
                .fetch_all(&self.pool)
                .await?;

        let weights: Vec<WeightRow> =
            sqlx::query_as("SELECT weight, date FROM weight_entries WHERE user_id = ? ORDER BY id")
                .bind(&row.id)
                .fetch_all(&self.pool)
                .await?;

        let entries: Vec<EntryRow> = sqlx::query_as(
            "SELECT item, date, quantity, quantity_type, calorie_intake FROM calorie_entries WHERE user_id = ? ORDER BY id",
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await?;

        let height = heights
            .into_iter()
            .map(|h| -> Result<HeightEntry, StoreError> {
                Ok(HeightEntry {
                    height: h.height,
                    date: parse_timestamp(&h.date)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let weight = weights
            .into_iter()
            .map(|w| -> Result<WeightEntry, StoreError> {
                Ok(WeightEntry {
                    weight: w.weight,
                    date: parse_timestamp(&w.date)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let calorie_intake = entries
            .into_iter()
            .map(|e| -> Result<CalorieEntry, StoreError> {
                let quantity_type =
                    QuantityType::from_str(&e.quantity_type).map_err(StoreError::Corrupt)?;
                Ok(CalorieEntry::new(
                    e.item,
                    parse_timestamp(&e.date)?,
                    e.quantity,
                    quantity_type,
                    e.calorie_intake,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(User {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| StoreError::Corrupt(format!("user id '{}': {}", row.id, e)))?,
            email: row.email,
            name: row.name,
            gender: Gender::from_str(&row.gender).unwrap_or(Gender::Other),
            dob: NaiveDate::parse_from_str(&row.dob, "%Y-%m-%d")
                .map_err(|e| StoreError::Corrupt(format!("dob '{}': {}", row.dob, e)))?,
            goal: Goal::from_str(&row.goal).unwrap_or(Goal::Maintain),
            height,
            weight,
            calorie_intake,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => self.hydrate_user(row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let id = user.id.to_string();

        let updated = sqlx::query(
            r#"
            UPDATE users
            SET email = ?, name = ?, gender = ?, dob = ?, goal = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.gender.as_str())
        .bind(user.dob.format("%Y-%m-%d").to_string())
        .bind(user.goal.as_str())
        .bind(&id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }

        // Replace child collections
        for table in ["height_entries", "weight_entries", "calorie_entries"] {
            sqlx::query(&format!("DELETE FROM {} WHERE user_id = ?", table))
                .bind(&id)
                .execute(&mut *tx)
                .await?;
        }

        insert_children(&mut *tx, user).await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Inserts biometric history and calorie entries in their current order.
async fn insert_children(conn: &mut SqliteConnection, user: &User) -> Result<(), StoreError> {
    let id = user.id.to_string();

    for h in &user.height {
        sqlx::query("INSERT INTO height_entries (user_id, height, date) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(h.height)
            .bind(h.date.to_rfc3339())
            .execute(&mut *conn)
            .await?;
    }

    for w in &user.weight {
        sqlx::query("INSERT INTO weight_entries (user_id, weight, date) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(w.weight)
            .bind(w.date.to_rfc3339())
            .execute(&mut *conn)
            .await?;
    }

    for entry in &user.calorie_intake {
        sqlx::query(
            r#"
            INSERT INTO calorie_entries (user_id, item, date, quantity, quantity_type, calorie_intake)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&entry.item)
        .bind(entry.date.to_rfc3339())
        .bind(entry.quantity)
        .bind(entry.quantity_type.as_str())
        .bind(entry.calorie_intake)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("timestamp '{}': {}", raw, e)))
}
