// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.
//!
//! The session is an HS256 JWT kept in an HttpOnly cookie. The middleware
//! turns it into an [`AuthUser`] request extension; handlers never look at
//! cookies or keys themselves.

use crate::config::Config;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "ecotrack_session";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Display name, shown on the dashboard
    pub name: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub name: String,
}

/// Middleware that requires a valid session.
///
/// Requests without one are sent to the login page; no detail is given.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&jar, request.headers(), &state.config.jwt_signing_key) {
        Some(auth_user) => {
            request.extensions_mut().insert(auth_user);
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// Resolve the session from the cookie, falling back to a bearer header.
pub fn authenticate(jar: &CookieJar, headers: &HeaderMap, signing_key: &[u8]) -> Option<AuthUser> {
    let token = match jar.get(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string)?,
    };

    verify_jwt(&token, signing_key)
}

/// Decode and validate a session token.
pub fn verify_jwt(token: &str, signing_key: &[u8]) -> Option<AuthUser> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).ok()?;
    let user_id: i64 = token_data.claims.sub.parse().ok()?;

    Some(AuthUser {
        user_id,
        name: token_data.claims.name,
    })
}

/// Create a JWT for a user session.
pub fn create_jwt(
    user_id: i64,
    name: &str,
    signing_key: &[u8],
    ttl_hours: i64,
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        name: name.to_string(),
        iat: now,
        exp: now + (ttl_hours.max(1) as usize) * 60 * 60,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Session cookie carrying `token`.
pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .max_age(time::Duration::hours(config.session_ttl_hours))
        .build()
}

/// Cookie that removes the session; attributes must match [`session_cookie`].
pub fn session_removal_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .build()
}
