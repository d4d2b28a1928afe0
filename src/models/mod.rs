// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod report;
pub mod user;

pub use activity::{Activity, ActivityInput};
pub use report::{Badge, CategoryTotals, DashboardReport, TrendPoint};
pub use user::{NewUser, User};
