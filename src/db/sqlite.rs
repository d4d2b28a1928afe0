// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (registration, lookup by email)
//! - Activities (per-user CRUD, bulk reset)
//! - Settings (weekly goal upsert)
//!
//! Every activity and settings statement is scoped by `user_id`, so a caller
//! can never read or touch another user's rows.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::db::{tables, DEFAULT_WEEKLY_GOAL_KG};
use crate::error::AppError;
use crate::models::{Activity, ActivityInput, User};

const MAX_CONNECTIONS: u32 = 8;

const SCHEMA: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        password_hash TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS activities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        travel_mode TEXT NOT NULL,
        travel_km REAL NOT NULL,
        electricity_kwh REAL NOT NULL,
        diet_type TEXT NOT NULL,
        co2_kg REAL NOT NULL,
        FOREIGN KEY(user_id) REFERENCES users(id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_activities_user_date ON activities(user_id, date)",
    "CREATE TABLE IF NOT EXISTS user_settings (
        user_id INTEGER PRIMARY KEY,
        weekly_goal REAL NOT NULL,
        FOREIGN KEY(user_id) REFERENCES users(id)
    )",
];

/// SQLite database client.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open {}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "Opened SQLite database");

        Ok(Self { pool })
    }

    /// Private in-memory database for tests.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create tables and indexes if they do not exist yet. Safe to run on every start.
    pub async fn migrate(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        tracing::info!(
            tables = ?[tables::USERS, tables::ACTIVITIES, tables::USER_SETTINGS],
            "Schema ready"
        );
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Insert a user. Returns `None` when the email is already registered.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<i64>, AppError> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(result.last_insert_rowid()))
    }

    /// Look up a user by (already normalized) email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// Number of registered users.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?)
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Store a new activity with its CO₂ computed now. Returns the new id.
    pub async fn create_activity(
        &self,
        user_id: i64,
        input: &ActivityInput,
    ) -> Result<i64, AppError> {
        let result = sqlx::query(
            "INSERT INTO activities
                (user_id, date, travel_mode, travel_km, electricity_kwh, diet_type, co2_kg)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(input.date)
        .bind(&input.travel_mode)
        .bind(input.travel_km)
        .bind(input.electricity_kwh)
        .bind(&input.diet_type)
        .bind(input.co2_kg())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// All of a user's activities, newest day first.
    pub async fn list_activities(&self, user_id: i64) -> Result<Vec<Activity>, AppError> {
        Ok(sqlx::query_as::<_, Activity>(
            "SELECT id, user_id, date, travel_mode, travel_km, electricity_kwh, diet_type, co2_kg
             FROM activities WHERE user_id = ?
             ORDER BY date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    /// A single activity, only if it belongs to `user_id`.
    pub async fn get_activity(
        &self,
        user_id: i64,
        activity_id: i64,
    ) -> Result<Option<Activity>, AppError> {
        Ok(sqlx::query_as::<_, Activity>(
            "SELECT id, user_id, date, travel_mode, travel_km, electricity_kwh, diet_type, co2_kg
             FROM activities WHERE id = ? AND user_id = ?",
        )
        .bind(activity_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// Replace an activity's fields and recompute its CO₂.
    ///
    /// Returns `false` (and changes nothing) when the activity does not exist
    /// or belongs to someone else.
    pub async fn update_activity(
        &self,
        user_id: i64,
        activity_id: i64,
        input: &ActivityInput,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE activities
             SET date = ?, travel_mode = ?, travel_km = ?, electricity_kwh = ?,
                 diet_type = ?, co2_kg = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(input.date)
        .bind(&input.travel_mode)
        .bind(input.travel_km)
        .bind(input.electricity_kwh)
        .bind(&input.diet_type)
        .bind(input.co2_kg())
        .bind(activity_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete one activity. Returns `false` when nothing owned by `user_id` matched.
    pub async fn delete_activity(&self, user_id: i64, activity_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ? AND user_id = ?")
            .bind(activity_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every activity of a user. Returns the number removed.
    pub async fn delete_all_activities(&self, user_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ─── Settings Operations ─────────────────────────────────────

    /// The user's weekly goal, or the default when none was set.
    pub async fn get_weekly_goal(&self, user_id: i64) -> Result<f64, AppError> {
        let goal: Option<f64> =
            sqlx::query_scalar("SELECT weekly_goal FROM user_settings WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(goal.unwrap_or(DEFAULT_WEEKLY_GOAL_KG))
    }

    /// Insert or replace the user's weekly goal.
    pub async fn set_weekly_goal(&self, user_id: i64, weekly_goal: f64) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO user_settings (user_id, weekly_goal) VALUES (?, ?)
             ON CONFLICT (user_id) DO UPDATE SET weekly_goal = excluded.weekly_goal",
        )
        .bind(user_id)
        .bind(weekly_goal)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
