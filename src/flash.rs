// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot flash messages carried across a redirect.
//!
//! Messages are queued in a short cookie (base64 JSON) by the handler that
//! redirects and drained by the next page view.

use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

/// Name of the flash cookie.
pub const FLASH_COOKIE: &str = "ecotrack_flash";

/// Severity shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Warning,
}

/// A single user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queue a message for the next page view.
pub fn push(jar: CookieJar, level: FlashLevel, message: impl Into<String>) -> CookieJar {
    let mut flashes = read(&jar);
    flashes.push(Flash {
        level,
        message: message.into(),
    });
    jar.add(flash_cookie(encode(&flashes)))
}

/// Drain all queued messages.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Flash>) {
    let flashes = read(&jar);
    if flashes.is_empty() && jar.get(FLASH_COOKIE).is_none() {
        return (jar, flashes);
    }
    (jar.remove(flash_cookie(String::new())), flashes)
}

/// Queue a message and redirect; the shape every form handler answers with.
pub fn redirect(
    jar: CookieJar,
    level: FlashLevel,
    message: impl Into<String>,
    to: &str,
) -> (CookieJar, Redirect) {
    (push(jar, level, message), Redirect::to(to))
}

fn read(jar: &CookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .map(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

fn encode(flashes: &[Flash]) -> String {
    // Serializing plain structs of strings cannot fail.
    let json = serde_json::to_vec(flashes).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Tampered or stale cookies decode to nothing.
fn decode(raw: &str) -> Vec<Flash> {
    URL_SAFE_NO_PAD
        .decode(raw)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

fn flash_cookie(value: String) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
