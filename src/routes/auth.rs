// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login and logout routes.

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, Result};
use crate::flash::{self, FlashLevel};
use crate::middleware::auth::{authenticate, create_jwt, session_cookie, session_removal_cookie};
use crate::models::user::{normalize_email, NewUser};
use crate::routes::PageResponse;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

// ─── Pages ───────────────────────────────────────────────────

/// Landing page; signed-in users go straight to their dashboard.
async fn home(State(state): State<Arc<AppState>>, headers: HeaderMap, jar: CookieJar) -> Response {
    if authenticate(&jar, &headers, &state.config.jwt_signing_key).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    page(jar, "EcoTrack – Home").into_response()
}

async fn register_page(jar: CookieJar) -> (CookieJar, Json<PageResponse>) {
    page(jar, "Register")
}

async fn login_page(jar: CookieJar) -> (CookieJar, Json<PageResponse>) {
    page(jar, "Login")
}

fn page(jar: CookieJar, title: &'static str) -> (CookieJar, Json<PageResponse>) {
    let (jar, flashes) = flash::take(jar);
    (jar, Json(PageResponse { title, flashes }))
}

// ─── Registration ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// Create an account. Problems are reported as flash warnings on the form.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<(CookieJar, Redirect)> {
    let new_user = NewUser::normalized(&form.name, &form.email, &form.password);
    if let Err(errors) = new_user.validate() {
        return Ok(flash::redirect(
            jar,
            FlashLevel::Warning,
            registration_error_message(&errors),
            "/register",
        ));
    }

    let password = new_user.password.clone();
    let cost = state.config.bcrypt_cost;
    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?;

    match state
        .db
        .create_user(&new_user.name, &new_user.email, &password_hash)
        .await?
    {
        Some(user_id) => {
            tracing::info!(user_id, "User registered");
            Ok(flash::redirect(
                jar,
                FlashLevel::Success,
                "Registration successful. Please login.",
                "/login",
            ))
        }
        None => {
            tracing::info!("Registration rejected: email already registered");
            Ok(flash::redirect(
                jar,
                FlashLevel::Warning,
                "Email already registered.",
                "/register",
            ))
        }
    }
}

/// Missing fields take precedence over a malformed email.
fn registration_error_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let all = || field_errors.values().flat_map(|errs| errs.iter());

    if all().any(|e| e.code == "length") {
        return "All fields are required.".to_string();
    }
    all()
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid registration details.".to_string())
}

// ─── Login / Logout ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// Start a session. Unknown email and wrong password look the same to the caller.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect)> {
    let email = normalize_email(&form.email);
    let user = state.db.get_user_by_email(&email).await?;

    let verified = match &user {
        Some(user) => {
            let hash = user.password_hash.clone();
            let password = form.password;
            tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Verify task failed: {}", e)))?
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Stored password hash could not be verified");
                    false
                })
        }
        None => false,
    };

    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::info!("Login failed");
            return Ok(flash::redirect(
                jar,
                FlashLevel::Warning,
                "Invalid credentials.",
                "/login",
            ));
        }
    };

    let token = create_jwt(
        user.id,
        &user.name,
        &state.config.jwt_signing_key,
        state.config.session_ttl_hours,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = user.id, "Login successful");

    let jar = jar.add(session_cookie(token, &state.config));
    Ok(flash::redirect(
        jar,
        FlashLevel::Success,
        format!("Welcome, {}!", user.name),
        "/dashboard",
    ))
}

/// End the session.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(session_removal_cookie(&state.config));
    flash::redirect(jar, FlashLevel::Success, "You have been logged out.", "/")
}
