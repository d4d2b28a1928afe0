// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (SQLite via SQLx).

pub mod sqlite;

pub use sqlite::Database;

/// Table names as constants.
pub mod tables {
    pub const USERS: &str = "users";
    pub const ACTIVITIES: &str = "activities";
    /// Per-user settings (weekly goal)
    pub const USER_SETTINGS: &str = "user_settings";
}

/// Weekly CO₂ goal used until the user sets one.
pub const DEFAULT_WEEKLY_GOAL_KG: f64 = 20.0;
