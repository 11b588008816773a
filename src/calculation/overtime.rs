//! Overtime detection.
//!
//! Overtime is the unrounded overage of the real end past the scheduled
//! end. It is all-or-nothing: an overage below the threshold earns no
//! overtime at all, one at or above it counts in full.

use crate::config::PayPolicy;
use crate::models::ShiftRecord;

use super::punch_rounding::scheduled_minutes;
use super::time_parsing::parse_range;

/// Computes the overtime minutes for one record.
///
/// Returns 0 when overtime is disabled, when either punch is missing, or
/// for an unworked holiday. Early arrival never counts as overtime.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::compute_overtime_minutes;
/// use timepulse_engine::config::PayPolicy;
/// use timepulse_engine::models::ShiftRecord;
/// use chrono::NaiveDate;
///
/// let policy = PayPolicy {
///     ot_enabled: true,
///     ot_threshold_minutes: 15,
///     ..PayPolicy::default()
/// };
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
///
/// // Scheduled end is 17:30.
/// let under = ShiftRecord::new("a", date, "09:00", "17:44");
/// let at = ShiftRecord::new("b", date, "09:00", "17:45");
/// assert_eq!(compute_overtime_minutes(&under, &policy), 0);
/// assert_eq!(compute_overtime_minutes(&at, &policy), 15);
/// ```
pub fn compute_overtime_minutes(record: &ShiftRecord, policy: &PayPolicy) -> i64 {
    if !policy.ot_enabled || !record.has_punch_times() || record.is_unworked_holiday() {
        return 0;
    }

    let (_, real_end) = parse_range(&record.start_time, &record.end_time);
    let (_, sched_end) = scheduled_minutes(record, policy);
    let overage = real_end - sched_end;

    if overage > 0 && overage >= policy.ot_threshold_minutes {
        overage
    } else {
        0
    }
}
