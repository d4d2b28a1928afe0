// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - domain logic layer.

pub mod emission;
pub mod export;
pub mod pdf;
pub mod report;

pub use emission::{compute_footprint, DietType, TravelMode};
pub use export::to_csv;
pub use pdf::to_pdf;
pub use report::{build_report, build_report_at};
