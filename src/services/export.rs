// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV export of a user's activity list.

use crate::models::Activity;

/// Header row, also used as the PDF column titles (minus the subscript).
pub const CSV_HEADER: &str = "Date,Travel Mode,Distance (KM),Electricity (kWh),Diet Type,CO₂ (kg)";

/// Render activities as CSV: header plus one CRLF-terminated record per activity.
///
/// Fields are written raw unless they contain a delimiter, quote or line
/// break, in which case they are quoted so each activity stays one record.
pub fn to_csv(activities: &[Activity]) -> anyhow::Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::with_capacity(64 * (activities.len() + 1)));

    writer.write_record(CSV_HEADER.split(','))?;
    for a in activities {
        writer.write_record([
            a.date.to_string(),
            a.travel_mode.clone(),
            a.travel_km.to_string(),
            a.electricity_kwh.to_string(),
            a.diet_type.clone(),
            a.co2_kg.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV flush failed: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
