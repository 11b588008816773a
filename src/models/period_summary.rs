//! Period summary models.
//!
//! Aggregates of engine outputs over a date range: a custom period, a
//! Sunday-to-Saturday week, or a calendar month grouped by week.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range.
    pub to: NaiveDate,
    /// Number of records in the range.
    pub entry_count: usize,
    /// Number of holiday records in the range.
    pub holiday_count: usize,
    /// Sum of logged hours.
    pub logged_hours: Decimal,
    /// Sum of hours used for pay.
    pub wage_hours: Decimal,
    /// Sum of overtime minutes.
    pub overtime_minutes: i64,
    /// Sum of earnings.
    pub earnings: Decimal,
}

impl PeriodTotals {
    /// An empty range total.
    pub fn empty(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to,
            entry_count: 0,
            holiday_count: 0,
            logged_hours: Decimal::ZERO,
            wage_hours: Decimal::ZERO,
            overtime_minutes: 0,
            earnings: Decimal::ZERO,
        }
    }
}

/// Hours and earnings for one day of a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    /// The day.
    pub date: NaiveDate,
    /// Hours used for pay on this day.
    pub wage_hours: Decimal,
    /// Earnings on this day.
    pub earnings: Decimal,
}

/// A Sunday-to-Saturday week with goal progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    /// Totals for the week.
    pub totals: PeriodTotals,
    /// One row per day, Sunday first.
    pub days: Vec<DaySummary>,
    /// Weekly goal the progress is measured against.
    pub goal_hours: Decimal,
    /// Percentage of the goal reached, capped at 100.
    pub goal_progress: Decimal,
    /// Earnings of the week before.
    pub previous_week_earnings: Decimal,
    /// `totals.earnings - previous_week_earnings`.
    pub earnings_delta: Decimal,
}

/// A calendar month with its records grouped by week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    /// Year of the month.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    /// Totals for the month.
    pub totals: PeriodTotals,
    /// Weeks that contain at least one record of the month, oldest first.
    /// Each week's totals cover only the days inside the month.
    pub weeks: Vec<PeriodTotals>,
}
