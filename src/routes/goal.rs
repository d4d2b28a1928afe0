// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly CO₂ goal routes.

use axum::{extract::State, response::Redirect, routing::get, Extension, Form, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::flash::{self, Flash, FlashLevel};
use crate::middleware::AuthUser;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/goal", get(goal_page).post(set_goal))
}

#[derive(Serialize)]
pub struct GoalPage {
    pub title: &'static str,
    pub weekly_goal: f64,
    pub flashes: Vec<Flash>,
}

async fn goal_page(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<GoalPage>)> {
    let weekly_goal = state.db.get_weekly_goal(user.user_id).await?;
    let (jar, flashes) = flash::take(jar);
    Ok((
        jar,
        Json(GoalPage {
            title: "Weekly Goal",
            weekly_goal,
            flashes,
        }),
    ))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GoalForm {
    pub weekly_goal: String,
}

/// Parse a goal value; only finite numbers are accepted.
pub fn parse_goal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

async fn set_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
    Form(form): Form<GoalForm>,
) -> Result<(CookieJar, Redirect)> {
    let Some(weekly_goal) = parse_goal(&form.weekly_goal) else {
        return Ok(flash::redirect(
            jar,
            FlashLevel::Warning,
            "Weekly goal must be a number.",
            "/goal",
        ));
    };

    state.db.set_weekly_goal(user.user_id, weekly_goal).await?;
    tracing::info!(user_id = user.user_id, weekly_goal, "Weekly goal updated");

    Ok(flash::redirect(
        jar,
        FlashLevel::Success,
        "Weekly goal updated.",
        "/dashboard",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_goal() {
        assert_eq!(parse_goal(" 15.5 "), Some(15.5));
        assert_eq!(parse_goal("0"), Some(0.0));
        assert_eq!(parse_goal("abc"), None);
        assert_eq!(parse_goal(""), None);
        assert_eq!(parse_goal("NaN"), None);
    }
}
