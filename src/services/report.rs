// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard aggregation over a single user's activities.

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use crate::models::report::{Badge, CategoryTotals, DashboardReport, TrendPoint};
use crate::models::Activity;

/// Number of days in the trend series.
pub const TREND_DAYS: i64 = 7;

/// Grand totals below this earn the "Eco Saver" badge.
pub const ECO_SAVER_THRESHOLD_KG: f64 = 10.0;

/// Build the dashboard report for today (local time).
pub fn build_report(activities: &[Activity], weekly_goal: f64) -> DashboardReport {
    build_report_at(crate::time_utils::today(), activities, weekly_goal)
}

/// Build the dashboard report as of `today`.
pub fn build_report_at(
    today: NaiveDate,
    activities: &[Activity],
    weekly_goal: f64,
) -> DashboardReport {
    let totals = category_totals(activities);

    DashboardReport {
        trend: daily_trend(today, activities),
        totals,
        weekly_goal,
        progress_percent: goal_progress(totals.total, weekly_goal),
        badges: badges(totals.total, weekly_goal),
    }
}

/// Daily CO₂ for the 7 days ending `today`, oldest first.
pub fn daily_trend(today: NaiveDate, activities: &[Activity]) -> Vec<TrendPoint> {
    let mut daily: HashMap<NaiveDate, f64> = HashMap::new();
    for activity in activities {
        *daily.entry(activity.date).or_insert(0.0) += activity.co2_kg;
    }

    (0..TREND_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            TrendPoint {
                date: date.to_string(),
                co2_kg: round2(daily.get(&date).copied().unwrap_or(0.0)),
            }
        })
        .collect()
}

/// Sum CO₂ per category with overlapping predicates.
pub fn category_totals(activities: &[Activity]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for activity in activities {
        if !activity.travel_mode.is_empty() {
            totals.travel += activity.co2_kg;
        }
        if activity.electricity_kwh > 0.0 {
            totals.electricity += activity.co2_kg;
        }
        if !activity.diet_type.is_empty() {
            totals.diet += activity.co2_kg;
        }
    }
    totals.total = totals.travel + totals.electricity + totals.diet;
    totals
}

/// Percentage of the weekly goal used, clamped to 100. Zero for a non-positive goal.
pub fn goal_progress(total: f64, weekly_goal: f64) -> f64 {
    if weekly_goal > 0.0 {
        (total / weekly_goal * 100.0).min(100.0)
    } else {
        0.0
    }
}

/// All badges that apply, in evaluation order.
pub fn badges(total: f64, weekly_goal: f64) -> Vec<Badge> {
    let mut earned = Vec::new();
    if total < ECO_SAVER_THRESHOLD_KG {
        earned.push(Badge::EcoSaver);
    }
    if total < weekly_goal {
        earned.push(Badge::GoalAchiever);
    }
    if total >= weekly_goal && total > 0.0 {
        earned.push(Badge::OverAchiever);
    }
    earned
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_activity(id: i64, date: NaiveDate, mode: &str, kwh: f64, diet: &str, co2: f64) -> Activity {
        Activity {
            id,
            user_id: 1,
            date,
            travel_mode: mode.to_string(),
            travel_km: 0.0,
            electricity_kwh: kwh,
            diet_type: diet.to_string(),
            co2_kg: co2,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    #[test]
    fn test_trend_always_has_seven_days() {
        let report = build_report_at(today(), &[], 20.0);
        assert_eq!(report.trend.len(), 7);
        assert_eq!(report.trend[0].date, "2025-12-30");
        assert_eq!(report.trend[6].date, "2026-01-05");
        assert!(report.trend.iter().all(|p| p.co2_kg == 0.0));
    }

    #[test]
    fn test_trend_sums_same_day_and_ignores_older() {
        let two_days_ago = today() - Duration::days(2);
        let activities = vec![
            make_activity(1, two_days_ago, "car", 0.0, "", 1.234),
            make_activity(2, two_days_ago, "bus", 0.0, "", 2.0),
            make_activity(3, today() - Duration::days(30), "car", 0.0, "", 50.0),
            make_activity(4, today(), "", 1.0, "", 0.82),
        ];

        let trend = daily_trend(today(), &activities);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[4].date, two_days_ago.to_string());
        assert_eq!(trend[4].co2_kg, 3.23);
        assert_eq!(trend[6].co2_kg, 0.82);
        let sum: f64 = trend.iter().map(|p| p.co2_kg).sum();
        assert!((sum - 4.05).abs() < 1e-9);
    }

    #[test]
    fn test_category_totals_double_count() {
        let activities = vec![make_activity(1, today(), "car", 2.0, "veg", 5.0)];
        let totals = category_totals(&activities);
        assert_eq!(totals.travel, 5.0);
        assert_eq!(totals.electricity, 5.0);
        assert_eq!(totals.diet, 5.0);
        assert_eq!(totals.total, 15.0);
    }

    #[test]
    fn test_category_predicates() {
        let activities = vec![
            make_activity(1, today(), "", 0.0, "veg", 1.7),
            make_activity(2, today(), "walk", 0.0, "", 0.0),
            make_activity(3, today(), "", 3.0, "", 2.46),
        ];
        let totals = category_totals(&activities);
        assert_eq!(totals.travel, 0.0);
        assert_eq!(totals.electricity, 2.46);
        assert_eq!(totals.diet, 1.7);
        assert!((totals.total - 4.16).abs() < 1e-9);
    }

    #[test]
    fn test_goal_progress() {
        assert_eq!(goal_progress(5.0, 20.0), 25.0);
        assert_eq!(goal_progress(25.0, 20.0), 100.0);
        assert_eq!(goal_progress(5.0, 0.0), 0.0);
        assert_eq!(goal_progress(5.0, -3.0), 0.0);
    }

    #[test]
    fn test_badges() {
        assert_eq!(badges(5.0, 20.0), vec![Badge::EcoSaver, Badge::GoalAchiever]);
        assert_eq!(badges(25.0, 20.0), vec![Badge::OverAchiever]);
        assert_eq!(badges(0.0, 20.0), vec![Badge::EcoSaver, Badge::GoalAchiever]);
        assert_eq!(badges(15.0, 20.0), vec![Badge::GoalAchiever]);
        assert_eq!(badges(20.0, 20.0), vec![Badge::OverAchiever]);
        // Zero total against a zero goal earns nothing beyond Eco Saver.
        assert_eq!(badges(0.0, 0.0), vec![Badge::EcoSaver]);
    }

    #[test]
    fn test_report_uses_grand_total() {
        // 4.0 kg counted in travel and diet -> grand total 8.0
        let activities = vec![make_activity(1, today(), "car", 0.0, "veg", 4.0)];
        let report = build_report_at(today(), &activities, 20.0);
        assert_eq!(report.totals.total, 8.0);
        assert_eq!(report.progress_percent, 40.0);
        assert_eq!(report.badges, vec![Badge::EcoSaver, Badge::GoalAchiever]);
        assert_eq!(report.weekly_goal, 20.0);
    }

    #[test]
    fn test_badge_serializes_as_label() {
        let json = serde_json::to_string(&Badge::OverAchiever).unwrap();
        assert_eq!(json, "\"Over Achiever\"");
        assert_eq!(Badge::EcoSaver.to_string(), "Eco Saver");
    }
}
