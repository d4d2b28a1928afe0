// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity entry, listing, editing and deletion routes.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Form, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::flash::{self, Flash, FlashLevel};
use crate::middleware::AuthUser;
use crate::models::{Activity, ActivityInput};
use crate::time_utils::{self, parse_date, DATE_FORMAT};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/input", get(input_page).post(create_activity))
        .route("/activities", get(list_activities))
        .route("/activities/{id}/edit", get(edit_page).post(update_activity))
        .route("/activities/{id}/delete", post(delete_activity))
        .route("/reset", post(reset_activities))
}

/// Raw activity form. Every field arrives as text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActivityForm {
    pub date: String,
    pub travel_mode: String,
    pub travel_km: String,
    pub electricity_kwh: String,
    pub diet_type: String,
}

impl ActivityForm {
    /// Validate into an [`ActivityInput`], or the warning to show the user.
    ///
    /// Blank numbers count as zero. Labels are kept as typed (trimmed);
    /// unknown labels simply contribute nothing to the footprint.
    pub fn parse(&self) -> std::result::Result<ActivityInput, &'static str> {
        let date = parse_date(&self.date).ok_or("Please enter a valid date (YYYY-MM-DD).")?;
        let travel_km = parse_quantity(&self.travel_km).ok_or("Distance must be a number.")?;
        let electricity_kwh =
            parse_quantity(&self.electricity_kwh).ok_or("Electricity usage must be a number.")?;

        Ok(ActivityInput {
            date,
            travel_mode: self.travel_mode.trim().to_string(),
            travel_km,
            electricity_kwh,
            diet_type: self.diet_type.trim().to_string(),
        })
    }
}

fn parse_quantity(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ─── Entry ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct InputPage {
    pub title: &'static str,
    /// Pre-filled date field
    pub default_date: String,
    pub flashes: Vec<Flash>,
}

async fn input_page(jar: CookieJar) -> (CookieJar, Json<InputPage>) {
    let (jar, flashes) = flash::take(jar);
    let page = InputPage {
        title: "Add Activity",
        default_date: time_utils::today().format(DATE_FORMAT).to_string(),
        flashes,
    };
    (jar, Json(page))
}

/// Record a day's activity and report its footprint.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
    Form(form): Form<ActivityForm>,
) -> Result<(CookieJar, Redirect)> {
    let input = match form.parse() {
        Ok(input) => input,
        Err(message) => return Ok(flash::redirect(jar, FlashLevel::Warning, message, "/input")),
    };

    let co2_kg = input.co2_kg();
    let activity_id = state.db.create_activity(user.user_id, &input).await?;
    tracing::info!(user_id = user.user_id, activity_id, co2_kg, "Activity saved");

    Ok(flash::redirect(
        jar,
        FlashLevel::Success,
        format!("Activity saved. Estimated CO₂: {:.2} kg", co2_kg),
        "/dashboard",
    ))
}

// ─── Listing / Editing ───────────────────────────────────────

async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Activity>>> {
    Ok(Json(state.db.list_activities(user.user_id).await?))
}

#[derive(Serialize)]
pub struct EditPage {
    pub title: &'static str,
    pub activity: Activity,
    pub flashes: Vec<Flash>,
}

/// Edit form for an owned activity; anything else goes back to the dashboard.
async fn edit_page(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<i64>,
    jar: CookieJar,
) -> Result<Response> {
    let Some(activity) = state.db.get_activity(user.user_id, activity_id).await? else {
        return Ok(Redirect::to("/dashboard").into_response());
    };

    let (jar, flashes) = flash::take(jar);
    let page = EditPage {
        title: "Edit Activity",
        activity,
        flashes,
    };
    Ok((jar, Json(page)).into_response())
}

async fn update_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<ActivityForm>,
) -> Result<(CookieJar, Redirect)> {
    let input = match form.parse() {
        Ok(input) => input,
        Err(message) => {
            let to = format!("/activities/{}/edit", activity_id);
            return Ok(flash::redirect(jar, FlashLevel::Warning, message, &to));
        }
    };

    if !state
        .db
        .update_activity(user.user_id, activity_id, &input)
        .await?
    {
        tracing::debug!(user_id = user.user_id, activity_id, "Update ignored: not owned");
        return Ok((jar, Redirect::to("/dashboard")));
    }

    tracing::info!(user_id = user.user_id, activity_id, "Activity updated");
    Ok(flash::redirect(
        jar,
        FlashLevel::Success,
        "Activity updated.",
        "/dashboard",
    ))
}

// ─── Deletion ────────────────────────────────────────────────

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<i64>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect)> {
    if !state.db.delete_activity(user.user_id, activity_id).await? {
        tracing::debug!(user_id = user.user_id, activity_id, "Delete ignored: not owned");
        return Ok((jar, Redirect::to("/dashboard")));
    }

    tracing::info!(user_id = user.user_id, activity_id, "Activity deleted");
    Ok(flash::redirect(
        jar,
        FlashLevel::Success,
        "Activity deleted.",
        "/dashboard",
    ))
}

/// Wipe the user's whole history. Settings are left alone.
async fn reset_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect)> {
    let removed = state.db.delete_all_activities(user.user_id).await?;
    tracing::info!(user_id = user.user_id, removed, "Activities reset");

    Ok(flash::redirect(
        jar,
        FlashLevel::Success,
        "All activities have been reset.",
        "/dashboard",
    ))
}
