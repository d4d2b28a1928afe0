// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::emission::compute_footprint;

/// Stored activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Activity {
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Calendar day the activity happened on
    pub date: NaiveDate,
    /// Travel mode as submitted (car, bus, bike, cycle, walk, none, ...)
    pub travel_mode: String,
    pub travel_km: f64,
    pub electricity_kwh: f64,
    /// Diet type as submitted (veg, nonveg, ...)
    pub diet_type: String,
    /// Derived at write time, never recomputed afterwards
    pub co2_kg: f64,
}

/// Validated user input for creating or editing an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityInput {
    pub date: NaiveDate,
    pub travel_mode: String,
    pub travel_km: f64,
    pub electricity_kwh: f64,
    pub diet_type: String,
}

impl ActivityInput {
    /// CO₂ mass for this input under the current emission model.
    pub fn co2_kg(&self) -> f64 {
        compute_footprint(
            &self.travel_mode,
            self.travel_km,
            self.electricity_kwh,
            &self.diet_type,
        )
    }
}
