// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session enforcement and response header tests.

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use ecotrack::middleware::auth::create_jwt;

mod common;
use common::{body_json, get, location, post_form, send};

#[tokio::test]
async fn test_protected_routes_redirect_to_login() {
    let (app, _) = common::create_test_app().await;

    for uri in [
        "/dashboard",
        "/input",
        "/activities",
        "/activities/1/edit",
        "/goal",
        "/export/csv",
        "/export/pdf",
    ] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {uri}");
        assert_eq!(location(&response), "/login", "GET {uri}");
    }

    for uri in ["/input", "/reset", "/goal", "/activities/1/delete"] {
        let response = send(&app, post_form(uri, "", None)).await;
        assert_eq!(location(&response), "/login", "POST {uri}");
    }
}

#[tokio::test]
async fn test_forged_session_rejected() {
    let (app, _) = common::create_test_app().await;

    let forged = create_jwt(1, "Mallory", b"some_other_key_that_is_32_bytes!", 1).unwrap();
    let cookie = format!("ecotrack_session={forged}");
    let response = send(&app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(location(&response), "/login");

    let response = send(&app, get("/dashboard", Some("ecotrack_session=garbage"))).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_bearer_token_accepted() {
    let (app, state) = common::create_test_app().await;
    let user_id = state
        .db
        .create_user("Ada", "ada@example.com", "hash")
        .await
        .unwrap()
        .unwrap();
    let token = create_jwt(user_id, "Ada", &state.config.jwt_signing_key, 1).unwrap();

    let request = Request::builder()
        .uri("/dashboard")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user_name"], "Ada");
}

#[tokio::test]
async fn test_health_and_security_headers() {
    let (app, _) = common::create_test_app().await;

    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
    assert!(headers.get(header::CONTENT_SECURITY_POLICY).is_some());

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
