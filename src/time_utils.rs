// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date handling.

use chrono::{Local, NaiveDate};

/// Storage and form format for activity dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's calendar day in the server's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` form value.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}
