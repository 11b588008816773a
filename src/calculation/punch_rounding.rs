//! Clock rounding against the scheduled shift.
//!
//! Grace windows model punch-clock tolerance: small lateness on arrival and
//! small variances around the scheduled end snap to the schedule, while
//! larger variances are counted literally. Arriving early never adds paid
//! time.

use crate::config::PayPolicy;
use crate::models::{EndAdjustment, PunchRange, ShiftRecord, StartAdjustment};

use super::time_parsing::{format_minutes, parse_range};
use super::worked_hours::HoursMode;

/// Effective punches in normalized minute space, with the adjustment that
/// produced each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectivePunches {
    /// Effective start, minutes since midnight of the shift date.
    pub start: i64,
    /// Effective end, normalized so that `end >= start` for the real pair.
    pub end: i64,
    /// How the start was derived.
    pub start_adjustment: StartAdjustment,
    /// How the end was derived.
    pub end_adjustment: EndAdjustment,
}

/// Returns the scheduled `(start, end)` in minutes, normalized across midnight.
pub fn scheduled_minutes(record: &ShiftRecord, policy: &PayPolicy) -> (i64, i64) {
    let (start, end) = record.scheduled_times(policy);
    parse_range(start, end)
}

/// Resolves the punches used for a computation.
///
/// In [`HoursMode::Logged`], or when rounding is disabled, the real punches
/// are returned unchanged. Otherwise:
///
/// - start at or before the scheduled start becomes the scheduled start;
/// - start late by at most `clock_in_rounding_minutes` becomes the scheduled start;
/// - end within `clock_out_rounding_minutes` of the scheduled end, on either
///   side, becomes the scheduled end;
/// - anything further out keeps the real time.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::{effective_punches, HoursMode};
/// use timepulse_engine::config::PayPolicy;
/// use timepulse_engine::models::{ShiftRecord, StartAdjustment};
/// use chrono::NaiveDate;
///
/// let policy = PayPolicy {
///     rounding_enabled: true,
///     clock_in_rounding_minutes: 4,
///     ..PayPolicy::default()
/// };
/// let record = ShiftRecord::new(
///     "e1",
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "09:03",
///     "17:30",
/// );
///
/// let punches = effective_punches(&record, &policy, HoursMode::Wage);
/// assert_eq!(punches.start, 540);
/// assert_eq!(punches.start_adjustment, StartAdjustment::LateWithinGrace);
/// ```
pub fn effective_punches(
    record: &ShiftRecord,
    policy: &PayPolicy,
    mode: HoursMode,
) -> EffectivePunches {
    let (real_start, real_end) = parse_range(&record.start_time, &record.end_time);

    if mode == HoursMode::Logged || !policy.rounding_enabled {
        return EffectivePunches {
            start: real_start,
            end: real_end,
            start_adjustment: StartAdjustment::Unrounded,
            end_adjustment: EndAdjustment::Unrounded,
        };
    }

    let (sched_start, sched_end) = scheduled_minutes(record, policy);
    let (start, start_adjustment) = round_start(
        real_start,
        sched_start,
        policy.clock_in_rounding_minutes.max(0),
    );
    let (end, end_adjustment) =
        round_end(real_end, sched_end, policy.clock_out_rounding_minutes.max(0));

    EffectivePunches {
        start,
        end,
        start_adjustment,
        end_adjustment,
    }
}

fn round_start(real: i64, scheduled: i64, grace: i64) -> (i64, StartAdjustment) {
    if real == scheduled {
        (scheduled, StartAdjustment::OnSchedule)
    } else if real < scheduled {
        (scheduled, StartAdjustment::EarlyClipped)
    } else if real - scheduled <= grace {
        (scheduled, StartAdjustment::LateWithinGrace)
    } else {
        (real, StartAdjustment::LateCounted)
    }
}

fn round_end(real: i64, scheduled: i64, grace: i64) -> (i64, EndAdjustment) {
    if real == scheduled {
        (scheduled, EndAdjustment::OnSchedule)
    } else if real < scheduled {
        if scheduled - real <= grace {
            (scheduled, EndAdjustment::EarlyWithinGrace)
        } else {
            (real, EndAdjustment::EarlyCounted)
        }
    } else if real - scheduled <= grace {
        (scheduled, EndAdjustment::LateWithinGrace)
    } else {
        (real, EndAdjustment::LateKept)
    }
}

/// Returns the rounded range actually used for pay, as `HH:MM`.
///
/// A record without both punches is returned as stored.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::compute_effective_punch_range;
/// use timepulse_engine::config::PayPolicy;
/// use timepulse_engine::models::{PunchRange, ShiftRecord};
/// use chrono::NaiveDate;
///
/// let policy = PayPolicy {
///     rounding_enabled: true,
///     clock_out_rounding_minutes: 14,
///     ..PayPolicy::default()
/// };
/// let record = ShiftRecord::new(
///     "e1",
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "08:50",
///     "17:40",
/// );
///
/// let range = compute_effective_punch_range(&record, &policy);
/// assert_eq!(range, PunchRange::new("09:00", "17:30"));
/// ```
pub fn compute_effective_punch_range(record: &ShiftRecord, policy: &PayPolicy) -> PunchRange {
    if !record.has_punch_times() {
        return PunchRange::new(record.start_time.clone(), record.end_time.clone());
    }
    let punches = effective_punches(record, policy, HoursMode::Wage);
    PunchRange::new(format_minutes(punches.start), format_minutes(punches.end))
}
