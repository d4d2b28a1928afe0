// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard and export routes.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::flash::{self, Flash};
use crate::middleware::AuthUser;
use crate::models::{Activity, DashboardReport};
use crate::services::{build_report, to_csv, to_pdf};
use crate::time_utils;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/export/csv", get(export_csv))
        .route("/export/pdf", get(export_pdf))
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub title: &'static str,
    pub user_name: String,
    pub flashes: Vec<Flash>,
    #[serde(flatten)]
    pub report: DashboardReport,
    /// Full history, newest first
    pub entries: Vec<Activity>,
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<DashboardResponse>)> {
    let entries = state.db.list_activities(user.user_id).await?;
    let weekly_goal = state.db.get_weekly_goal(user.user_id).await?;
    let report = build_report(&entries, weekly_goal);

    let (jar, flashes) = flash::take(jar);
    Ok((
        jar,
        Json(DashboardResponse {
            title: "Dashboard",
            user_name: user.name,
            flashes,
            report,
            entries,
        }),
    ))
}

async fn export_csv(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let activities = state.db.list_activities(user.user_id).await?;
    tracing::info!(user_id = user.user_id, rows = activities.len(), "CSV export");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ecotrack_activities.csv\"",
            ),
        ],
        to_csv(&activities)?,
    ))
}

async fn export_pdf(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let activities = state.db.list_activities(user.user_id).await?;
    tracing::info!(user_id = user.user_id, rows = activities.len(), "PDF export");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ecotrack_activities.pdf\"",
            ),
        ],
        to_pdf(&activities, time_utils::today()),
    ))
}
