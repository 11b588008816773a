//! Worked-hours aggregation.
//!
//! One record's paid duration in decimal hours, either as logged (real
//! punches) or as used for pay (rounded punches plus any holiday bonus).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayPolicy;
use crate::models::ShiftRecord;

use super::punch_rounding::effective_punches;

/// Which hours a caller is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursMode {
    /// Hours for pay: rounding applies and holiday bonus hours are credited.
    Wage,
    /// Hours actually logged: real punches, no bonus.
    Logged,
}

impl HoursMode {
    /// Maps the `for_wage` flag used by callers that only carry a boolean.
    pub fn for_wage(for_wage: bool) -> Self {
        if for_wage {
            HoursMode::Wage
        } else {
            HoursMode::Logged
        }
    }
}

/// Converts whole minutes into decimal hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

/// Holiday default hours credited on top of a paid worked holiday.
///
/// Only counted for [`HoursMode::Wage`].
pub fn holiday_bonus_hours(record: &ShiftRecord, policy: &PayPolicy, mode: HoursMode) -> Decimal {
    if mode == HoursMode::Wage && record.earns_holiday_bonus() {
        policy.holiday_default_hours.max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// Computes the worked hours of one record. Never negative.
///
/// - An unworked holiday is credited `holiday_default_hours` outright.
/// - A record missing either punch has no hours.
/// - Otherwise the (possibly rounded) duration minus the unpaid break,
///   floored at zero, plus the holiday bonus in wage mode.
///
/// Lunch is display metadata and is never deducted.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::{compute_worked_hours, HoursMode};
/// use timepulse_engine::config::PayPolicy;
/// use timepulse_engine::models::ShiftRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy {
///     unpaid_break_minutes: 30,
///     ..PayPolicy::default()
/// };
/// let record = ShiftRecord::new(
///     "e1",
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "09:00",
///     "17:30",
/// );
///
/// assert_eq!(compute_worked_hours(&record, &policy, HoursMode::Logged), Decimal::new(8, 0));
/// ```
pub fn compute_worked_hours(record: &ShiftRecord, policy: &PayPolicy, mode: HoursMode) -> Decimal {
    if record.is_unworked_holiday() {
        return policy.holiday_default_hours.max(Decimal::ZERO);
    }
    if !record.has_punch_times() {
        return Decimal::ZERO;
    }

    let punches = effective_punches(record, policy, mode);
    let minutes = (punches.end - punches.start)
        .saturating_sub(record.break_minutes(policy))
        .max(0);

    minutes_to_hours(minutes).saturating_add(holiday_bonus_hours(record, policy, mode))
}
