// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! EcoTrack: log daily activities and track their estimated CO₂ footprint.
//!
//! This crate provides the HTTP backend: session auth, activity storage,
//! the emission model, dashboard aggregation and CSV/PDF export.

pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
}
