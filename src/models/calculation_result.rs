//! Calculation result models.
//!
//! These types carry the engine's outputs for one shift record: the
//! effective punch range used for pay, how each punch was adjusted, and the
//! earnings split into its regular, overtime and holiday bonus terms.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A start/end pair of wall-clock times in `HH:MM`.
///
/// # Example
///
/// ```
/// use timepulse_engine::models::PunchRange;
///
/// let range = PunchRange::new("09:00", "17:30");
/// assert_eq!(range.start, "09:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchRange {
    /// Effective start, `HH:MM`.
    pub start: String,
    /// Effective end, `HH:MM`.
    pub end: String,
}

impl PunchRange {
    /// Creates a range from two `HH:MM` strings.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A proposed lunch window for the entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchWindow {
    /// Lunch start, `HH:MM`.
    pub lunch_start: String,
    /// Lunch end, `HH:MM`.
    pub lunch_end: String,
}

/// How the punched start was turned into the effective start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartAdjustment {
    /// Rounding did not apply; the real start is used.
    Unrounded,
    /// Punched exactly at the scheduled start.
    OnSchedule,
    /// Arrived early; clipped to the scheduled start.
    EarlyClipped,
    /// Arrived late within the grace window; moved to the scheduled start.
    LateWithinGrace,
    /// Arrived late beyond the grace window; the real start counts.
    LateCounted,
}

/// How the punched end was turned into the effective end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndAdjustment {
    /// Rounding did not apply; the real end is used.
    Unrounded,
    /// Punched exactly at the scheduled end.
    OnSchedule,
    /// Left early within the grace window; moved to the scheduled end.
    EarlyWithinGrace,
    /// Left early beyond the grace window; the real end counts.
    EarlyCounted,
    /// Stayed late within the grace window; moved to the scheduled end.
    LateWithinGrace,
    /// Stayed late beyond the grace window; the real end is kept.
    LateKept,
}

/// Earnings for one record, split into the terms that make up the total.
///
/// `total == holiday_bonus_pay + regular_pay + overtime_pay`, every term
/// non-negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsBreakdown {
    /// Record rate if present, else the policy rate.
    pub base_rate: Decimal,
    /// Rate applied to regular hours (may be a holiday rate).
    pub regular_rate: Decimal,
    /// Rate applied to overtime hours.
    pub overtime_rate: Decimal,
    /// Paid hours that are neither overtime nor holiday bonus.
    pub regular_hours: Decimal,
    /// Overtime minutes expressed in hours.
    pub overtime_hours: Decimal,
    /// Holiday default hours credited on top of a paid worked holiday.
    pub holiday_bonus_hours: Decimal,
    /// `regular_hours * regular_rate`.
    pub regular_pay: Decimal,
    /// `overtime_hours * overtime_rate`.
    pub overtime_pay: Decimal,
    /// `holiday_bonus_hours * base_rate`.
    pub holiday_bonus_pay: Decimal,
    /// Sum of the three pay terms.
    pub total: Decimal,
}

/// Every engine output for one shift record.
///
/// This is what exporters and the API serialize next to the raw record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryCalculation {
    /// The record this calculation belongs to.
    pub entry_id: String,
    /// The record's date.
    pub date: NaiveDate,
    /// Hours actually logged (no rounding, no holiday bonus).
    pub logged_hours: Decimal,
    /// Hours used for pay.
    pub wage_hours: Decimal,
    /// Overtime minutes past the scheduled end.
    pub overtime_minutes: i64,
    /// Effective range used for pay.
    pub effective_range: PunchRange,
    /// Adjustment applied to the start punch.
    pub start_adjustment: StartAdjustment,
    /// Adjustment applied to the end punch.
    pub end_adjustment: EndAdjustment,
    /// Earnings split.
    pub earnings: EarningsBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lunch_window_serializes_camel_case() {
        let window = LunchWindow {
            lunch_start: "12:45".to_string(),
            lunch_end: "13:45".to_string(),
        };
        let json = serde_json::to_value(&window).unwrap();
        assert_eq!(json["lunchStart"], "12:45");
        assert_eq!(json["lunchEnd"], "13:45");
    }

    #[test]
    fn test_adjustment_serialization() {
        let json = serde_json::to_string(&StartAdjustment::LateWithinGrace).unwrap();
        assert_eq!(json, "\"late_within_grace\"");

        let json = serde_json::to_string(&EndAdjustment::LateKept).unwrap();
        assert_eq!(json, "\"late_kept\"");

        let adjustment: EndAdjustment = serde_json::from_str("\"early_counted\"").unwrap();
        assert_eq!(adjustment, EndAdjustment::EarlyCounted);
    }
}
