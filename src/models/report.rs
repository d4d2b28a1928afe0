// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard reporting view computed from a user's activity history.

use serde::Serialize;
use std::fmt;

/// CO₂ emitted on a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Rounded to 2 decimals
    pub co2_kg: f64,
}

/// Per-category sums.
///
/// The category predicates overlap: an activity with travel, electricity and
/// diet filled in counts towards all three, so `total` can exceed the sum of
/// the per-activity `co2_kg` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub travel: f64,
    pub electricity: f64,
    pub diet: f64,
    /// travel + electricity + diet
    pub total: f64,
}

/// Award based on the grand total versus the weekly goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    #[serde(rename = "Eco Saver")]
    EcoSaver,
    #[serde(rename = "Goal Achiever")]
    GoalAchiever,
    #[serde(rename = "Over Achiever")]
    OverAchiever,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::EcoSaver => "Eco Saver",
            Badge::GoalAchiever => "Goal Achiever",
            Badge::OverAchiever => "Over Achiever",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the dashboard renders besides the raw activity list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Exactly 7 points, oldest first, ending today
    pub trend: Vec<TrendPoint>,
    pub totals: CategoryTotals,
    pub weekly_goal: f64,
    /// 0..=100
    pub progress_percent: f64,
    pub badges: Vec<Badge>,
}
