// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ecotrack::config::Config;
use ecotrack::db::Database;
use ecotrack::routes::create_router;
use ecotrack::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app backed by a fresh in-memory database.
/// Returns the router and the shared state.
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    let db = Database::in_memory()
        .await
        .expect("Failed to open in-memory database");
    db.migrate().await.expect("Failed to migrate");

    let state = Arc::new(AppState {
        config: Config::test_default(),
        db,
    });

    (create_router(state.clone()), state)
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Form POST with an `application/x-www-form-urlencoded` body.
pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string())
        .unwrap_or_default()
}

pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// Full `Set-Cookie` value for `name`, if the response sets it.
pub fn find_cookie(response: &Response, name: &str) -> Option<String> {
    set_cookie_headers(response)
        .into_iter()
        .find(|value| value.starts_with(&format!("{name}=")))
}

/// Just the `name=value` pair, suitable for a `Cookie` request header.
pub fn cookie_pair(response: &Response, name: &str) -> Option<String> {
    find_cookie(response, name).map(|value| value.split(';').next().unwrap().to_string())
}

/// Messages queued in the flash cookie of a redirect.
pub fn flash_messages(response: &Response) -> Vec<String> {
    let Some(pair) = cookie_pair(response, "ecotrack_flash") else {
        return Vec::new();
    };
    let encoded = pair.trim_start_matches("ecotrack_flash=");
    let bytes = URL_SAFE_NO_PAD.decode(encoded).unwrap();
    let flashes: Vec<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();
    flashes
        .iter()
        .map(|flash| flash["message"].as_str().unwrap().to_string())
        .collect()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Register an account and log in. Returns the session `Cookie` header value.
pub async fn register_and_login(app: &Router, name: &str, email: &str, password: &str) -> String {
    let body = format!("name={name}&email={email}&password={password}");
    let response = send(app, post_form("/register", &body, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let body = format!("email={email}&password={password}");
    let response = send(app, post_form("/login", &body, None)).await;
    assert_eq!(location(&response), "/dashboard");

    cookie_pair(&response, "ecotrack_session").expect("login should set a session cookie")
}

/// Log an activity through the form endpoint.
pub async fn add_activity(app: &Router, session: &str, form: &str) -> Response {
    send(app, post_form("/input", form, Some(session))).await
}
