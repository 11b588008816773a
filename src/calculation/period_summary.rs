//! Period summaries over a batch of records.
//!
//! All summaries read one policy snapshot for the whole batch. Weeks run
//! Sunday to Saturday.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::config::PayPolicy;
use crate::models::{DaySummary, MonthSummary, PeriodTotals, ShiftRecord, WeekSummary};

use super::earnings::compute_earnings;
use super::overtime::compute_overtime_minutes;
use super::worked_hours::{HoursMode, compute_worked_hours};

/// Goal used when the policy's weekly goal is not positive.
const FALLBACK_WEEKLY_GOAL_HOURS: i64 = 40;

/// Returns the Sunday starting and the Saturday ending the week of `date`.
///
/// Returns `None` when that week runs off the end of the calendar.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::week_range;
/// use chrono::NaiveDate;
///
/// let thursday = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let (start, end) = week_range(thursday).unwrap();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2026, 1, 17).unwrap());
///
/// assert!(week_range(NaiveDate::MIN).is_none());
/// ```
pub fn week_range(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let offset = i64::from(date.weekday().num_days_from_sunday());
    let start = date.checked_sub_signed(Duration::days(offset))?;
    let end = start.checked_add_signed(Duration::days(6))?;
    Some((start, end))
}

fn accumulate<'a, I>(records: I, policy: &PayPolicy, from: NaiveDate, to: NaiveDate) -> PeriodTotals
where
    I: IntoIterator<Item = &'a ShiftRecord>,
{
    let mut totals = PeriodTotals::empty(from, to);
    for record in records {
        totals.entry_count += 1;
        if record.is_holiday {
            totals.holiday_count += 1;
        }
        totals.logged_hours = totals
            .logged_hours
            .saturating_add(compute_worked_hours(record, policy, HoursMode::Logged));
        totals.wage_hours = totals
            .wage_hours
            .saturating_add(compute_worked_hours(record, policy, HoursMode::Wage));
        totals.overtime_minutes += compute_overtime_minutes(record, policy);
        totals.earnings = totals.earnings.saturating_add(compute_earnings(record, policy));
    }
    totals
}

fn in_range(
    records: &[ShiftRecord],
    from: NaiveDate,
    to: NaiveDate,
) -> impl Iterator<Item = &ShiftRecord> {
    records
        .iter()
        .filter(move |record| record.date >= from && record.date <= to)
}

/// Totals for every record dated within `from..=to`.
pub fn summarize_period(
    records: &[ShiftRecord],
    policy: &PayPolicy,
    from: NaiveDate,
    to: NaiveDate,
) -> PeriodTotals {
    accumulate(in_range(records, from, to), policy, from, to)
}

/// Summary of the week containing `day`, with per-day rows, goal progress
/// and a comparison against the previous week's earnings.
///
/// Returns `None` when the week runs off the end of the calendar.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::summarize_week;
/// use timepulse_engine::config::PayPolicy;
/// use timepulse_engine::models::ShiftRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy::default();
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let records = vec![ShiftRecord::new("e1", monday, "09:00", "19:00")];
///
/// let week = summarize_week(&records, &policy, monday).unwrap();
/// assert_eq!(week.days.len(), 7);
/// assert_eq!(week.totals.wage_hours, Decimal::new(10, 0));
/// assert_eq!(week.goal_progress, Decimal::new(25, 0));
/// ```
pub fn summarize_week(
    records: &[ShiftRecord],
    policy: &PayPolicy,
    day: NaiveDate,
) -> Option<WeekSummary> {
    let (start, end) = week_range(day)?;
    let totals = summarize_period(records, policy, start, end);

    let days = start
        .iter_days()
        .take(7)
        .map(|date| {
            let day_totals = summarize_period(records, policy, date, date);
            DaySummary {
                date,
                wage_hours: day_totals.wage_hours,
                earnings: day_totals.earnings,
            }
        })
        .collect();

    let goal_hours = if policy.weekly_goal_hours > Decimal::ZERO {
        policy.weekly_goal_hours
    } else {
        Decimal::from(FALLBACK_WEEKLY_GOAL_HOURS)
    };
    let goal_progress = totals
        .wage_hours
        .checked_div(goal_hours)
        .map_or(Decimal::ONE_HUNDRED, |ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
        .min(Decimal::ONE_HUNDRED)
        .round_dp(2);

    // Nothing can be dated before the first representable week.
    let previous_week_earnings = match (
        start.checked_sub_signed(Duration::days(7)),
        start.pred_opt(),
    ) {
        (Some(from), Some(to)) => summarize_period(records, policy, from, to).earnings,
        _ => Decimal::ZERO,
    };

    Some(WeekSummary {
        earnings_delta: totals.earnings.saturating_sub(previous_week_earnings),
        totals,
        days,
        goal_hours,
        goal_progress,
        previous_week_earnings,
    })
}

/// Summary of a calendar month, with its records grouped by week.
///
/// Returns `None` for an invalid year/month.
pub fn summarize_month(
    records: &[ShiftRecord],
    policy: &PayPolicy,
    year: i32,
    month: u32,
) -> Option<MonthSummary> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_first.pred_opt()?;

    let mut by_week: BTreeMap<(NaiveDate, NaiveDate), Vec<&ShiftRecord>> = BTreeMap::new();
    for record in in_range(records, first, last) {
        by_week
            .entry(week_range(record.date).unwrap_or((first, last)))
            .or_default()
            .push(record);
    }

    let weeks = by_week
        .into_iter()
        .map(|((week_start, week_end), week_records)| {
            accumulate(week_records, policy, week_start.max(first), week_end.min(last))
        })
        .collect();

    Some(MonthSummary {
        year,
        month,
        totals: summarize_period(records, policy, first, last),
        weeks,
    })
}

/// Filters records the way the history search box does: the query matches
/// a substring of the ISO date or, ignoring case, of the notes.
/// An empty query matches everything.
pub fn search_records<'a>(records: &'a [ShiftRecord], query: &str) -> Vec<&'a ShiftRecord> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|record| {
            needle.is_empty()
                || record.date.to_string().contains(&needle)
                || record.notes.to_lowercase().contains(&needle)
        })
        .collect()
}
