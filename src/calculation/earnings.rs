//! Earnings composition.
//!
//! Converts paid hours and overtime minutes into money. Three terms make
//! up the total: holiday bonus hours at the base rate, regular hours at the
//! regular rate, and overtime hours at the overtime rate.

use rust_decimal::Decimal;

use crate::config::PayPolicy;
use crate::models::{EarningsBreakdown, EntryCalculation, ShiftRecord};

use super::overtime::compute_overtime_minutes;
use super::punch_rounding::{compute_effective_punch_range, effective_punches};
use super::worked_hours::{HoursMode, compute_worked_hours, holiday_bonus_hours, minutes_to_hours};

/// Non-positive multipliers behave as 1.
fn effective_multiplier(multiplier: Decimal) -> Decimal {
    if multiplier > Decimal::ZERO {
        multiplier
    } else {
        Decimal::ONE
    }
}

/// Rate applied to regular hours.
///
/// For a worked holiday: the flat `holiday_worked_rate` when positive;
/// otherwise the base rate times `holiday_rate_multiplier`, but only while
/// overtime is disabled, since overtime pay carries its own multiplier.
/// Everything else is paid at the base rate.
pub fn regular_rate(record: &ShiftRecord, policy: &PayPolicy) -> Decimal {
    let base_rate = record.base_rate(policy);
    if !(record.is_holiday && record.holiday_worked) {
        return base_rate;
    }

    match policy.holiday_worked_rate {
        Some(rate) if rate > Decimal::ZERO => rate,
        _ if !policy.ot_enabled => {
            base_rate.saturating_mul(effective_multiplier(policy.holiday_rate_multiplier))
        }
        _ => base_rate,
    }
}

/// Rate applied to overtime hours.
pub fn overtime_rate(record: &ShiftRecord, policy: &PayPolicy) -> Decimal {
    record
        .base_rate(policy)
        .saturating_mul(effective_multiplier(policy.ot_rate_multiplier))
}

/// Computes the earnings of one record, split into its terms.
///
/// `regular_hours = max(0, wage_hours - overtime_hours - holiday_bonus_hours)`.
/// Arithmetic saturates at the `Decimal` bounds.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::earnings_breakdown;
/// use timepulse_engine::config::PayPolicy;
/// use timepulse_engine::models::ShiftRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy {
///     hourly_rate: Decimal::new(20, 0),
///     ot_enabled: true,
///     ot_threshold_minutes: 15,
///     ..PayPolicy::default()
/// };
/// let record = ShiftRecord::new(
///     "e1",
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "09:00",
///     "18:30",
/// );
///
/// let breakdown = earnings_breakdown(&record, &policy);
/// assert_eq!(breakdown.overtime_hours, Decimal::new(1, 0));
/// assert_eq!(breakdown.overtime_pay, Decimal::new(30, 0));
/// assert_eq!(breakdown.regular_pay, Decimal::new(170, 0));
/// assert_eq!(breakdown.total, Decimal::new(200, 0));
/// ```
pub fn earnings_breakdown(record: &ShiftRecord, policy: &PayPolicy) -> EarningsBreakdown {
    let base_rate = record.base_rate(policy);
    let regular_rate = regular_rate(record, policy);
    let overtime_rate = overtime_rate(record, policy);

    let wage_hours = compute_worked_hours(record, policy, HoursMode::Wage);
    let overtime_hours = minutes_to_hours(compute_overtime_minutes(record, policy));
    let holiday_bonus_hours = holiday_bonus_hours(record, policy, HoursMode::Wage);
    let regular_hours = wage_hours
        .saturating_sub(overtime_hours)
        .saturating_sub(holiday_bonus_hours)
        .max(Decimal::ZERO);

    let holiday_bonus_pay = holiday_bonus_hours.saturating_mul(base_rate);
    let regular_pay = regular_hours.saturating_mul(regular_rate);
    let overtime_pay = overtime_hours.saturating_mul(overtime_rate);

    EarningsBreakdown {
        base_rate,
        regular_rate,
        overtime_rate,
        regular_hours,
        overtime_hours,
        holiday_bonus_hours,
        regular_pay,
        overtime_pay,
        holiday_bonus_pay,
        total: holiday_bonus_pay
            .saturating_add(regular_pay)
            .saturating_add(overtime_pay),
    }
}

/// Computes the total earnings of one record. Never negative.
pub fn compute_earnings(record: &ShiftRecord, policy: &PayPolicy) -> Decimal {
    earnings_breakdown(record, policy).total
}

/// Runs every engine entry point for one record.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::calculate_entry;
/// use timepulse_engine::config::PayPolicy;
/// use timepulse_engine::models::ShiftRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy {
///     hourly_rate: Decimal::new(15, 0),
///     ..PayPolicy::default()
/// };
/// let record = ShiftRecord::new(
///     "e1",
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "09:00",
///     "17:00",
/// );
///
/// let calculation = calculate_entry(&record, &policy);
/// assert_eq!(calculation.logged_hours, Decimal::new(8, 0));
/// assert_eq!(calculation.earnings.total, Decimal::new(120, 0));
/// ```
pub fn calculate_entry(record: &ShiftRecord, policy: &PayPolicy) -> EntryCalculation {
    let punches = effective_punches(record, policy, HoursMode::Wage);

    EntryCalculation {
        entry_id: record.id.clone(),
        date: record.date,
        logged_hours: compute_worked_hours(record, policy, HoursMode::Logged),
        wage_hours: compute_worked_hours(record, policy, HoursMode::Wage),
        overtime_minutes: compute_overtime_minutes(record, policy),
        effective_range: compute_effective_punch_range(record, policy),
        start_adjustment: punches.start_adjustment,
        end_adjustment: punches.end_adjustment,
        earnings: earnings_breakdown(record, policy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EndAdjustment, PunchRange, StartAdjustment};
    use chrono::NaiveDate;

    fn record(start: &str, end: &str) -> ShiftRecord {
        ShiftRecord::new(
            "e1",
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            start,
            end,
        )
    }

    fn dec(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    fn scenario_policy() -> PayPolicy {
        PayPolicy {
            default_start_time: "09:00".to_string(),
            default_end_time: "17:30".to_string(),
            rounding_enabled: true,
            clock_in_rounding_minutes: 4,
            clock_out_rounding_minutes: 14,
            ot_enabled: true,
            ot_threshold_minutes: 15,
            hourly_rate: dec(20, 0),
            ..PayPolicy::default()
        }
    }

    #[test]
    fn test_late_arrival_with_threshold_overtime_scenario() {
        let policy = scenario_policy();
        let entry = record("09:05", "17:45");

        let calculation = calculate_entry(&entry, &policy);
        assert_eq!(calculation.effective_range, PunchRange::new("09:05", "17:45"));
        assert_eq!(calculation.start_adjustment, StartAdjustment::LateCounted);
        assert_eq!(calculation.end_adjustment, EndAdjustment::LateKept);
        assert_eq!(calculation.overtime_minutes, 15);
        assert_eq!(calculation.wage_hours, minutes_to_hours(520));

        let earnings = calculation.earnings;
        assert_eq!(earnings.overtime_hours, dec(25, 2));
        assert_eq!(earnings.overtime_pay, dec(75, 1));
        assert_eq!(earnings.regular_hours + earnings.overtime_hours, calculation.wage_hours);
        assert_eq!(earnings.regular_hours.round_dp(3), dec(8417, 3));
        assert_eq!(earnings.total.round_dp(2), dec(17583, 2));
    }

    #[test]
    fn test_plain_day_at_base_rate() {
        let policy = PayPolicy {
            hourly_rate: dec(20, 0),
            ..PayPolicy::default()
        };
        assert_eq!(compute_earnings(&record("09:00", "17:00"), &policy), dec(160, 0));
    }

    #[test]
    fn test_record_rate_snapshot_overrides_policy() {
        let policy = PayPolicy {
            hourly_rate: dec(20, 0),
            ..PayPolicy::default()
        };
        let mut entry = record("09:00", "17:00");
        entry.hourly_rate = Some(dec(25, 0));
        assert_eq!(compute_earnings(&entry, &policy), dec(200, 0));
    }

    #[test]
    fn test_unworked_holiday_paid_at_base_rate() {
        let policy = PayPolicy {
            hourly_rate: dec(20, 0),
            holiday_rate_multiplier: dec(2, 0),
            ot_enabled: true,
            ..PayPolicy::default()
        };
        let mut entry = record("", "");
        entry.is_holiday = true;

        let breakdown = earnings_breakdown(&entry, &policy);
        assert_eq!(breakdown.regular_hours, dec(8, 0));
        assert_eq!(breakdown.regular_rate, dec(20, 0));
        assert_eq!(breakdown.overtime_pay, Decimal::ZERO);
        assert_eq!(breakdown.total, dec(160, 0));
    }

    #[test]
    fn test_worked_holiday_multiplier_only_without_overtime() {
        let mut policy = PayPolicy {
            hourly_rate: dec(20, 0),
            holiday_rate_multiplier: dec(2, 0),
            ..PayPolicy::default()
        };
        let mut entry = record("09:00", "17:00");
        entry.is_holiday = true;
        entry.holiday_worked = true;

        assert_eq!(compute_earnings(&entry, &policy), dec(320, 0));

        policy.ot_enabled = true;
        policy.ot_threshold_minutes = 15;
        assert_eq!(compute_earnings(&entry, &policy), dec(160, 0));
    }

    #[test]
    fn test_worked_holiday_flat_rate_takes_precedence() {
        let mut policy = PayPolicy {
            hourly_rate: dec(20, 0),
            holiday_rate_multiplier: dec(2, 0),
            holiday_worked_rate: Some(dec(35, 0)),
            ..PayPolicy::default()
        };
        let mut entry = record("09:00", "17:00");
        entry.is_holiday = true;
        entry.holiday_worked = true;
        assert_eq!(compute_earnings(&entry, &policy), dec(280, 0));

        policy.ot_enabled = true;
        assert_eq!(compute_earnings(&entry, &policy), dec(280, 0));

        policy.holiday_worked_rate = Some(Decimal::ZERO);
        assert_eq!(compute_earnings(&entry, &policy), dec(160, 0));
    }

    #[test]
    fn test_paid_worked_holiday_stacks_bonus_hours() {
        let policy = PayPolicy {
            hourly_rate: dec(20, 0),
            holiday_rate_multiplier: dec(2, 0),
            ..PayPolicy::default()
        };
        let mut entry = record("09:00", "13:00");
        entry.is_holiday = true;
        entry.holiday_worked = true;
        entry.holiday_pay = true;

        let breakdown = earnings_breakdown(&entry, &policy);
        assert_eq!(breakdown.holiday_bonus_hours, dec(8, 0));
        assert_eq!(breakdown.holiday_bonus_pay, dec(160, 0));
        assert_eq!(breakdown.regular_hours, dec(4, 0));
        assert_eq!(breakdown.regular_pay, dec(160, 0));
        assert_eq!(breakdown.total, dec(320, 0));
    }

    #[test]
    fn test_non_positive_multipliers_fall_back_to_one() {
        let policy = PayPolicy {
            hourly_rate: dec(10, 0),
            ot_enabled: true,
            ot_rate_multiplier: Decimal::ZERO,
            holiday_rate_multiplier: dec(-1, 0),
            ..PayPolicy::default()
        };
        let entry = record("09:00", "18:30");
        assert_eq!(overtime_rate(&entry, &policy), dec(10, 0));

        let mut holiday = entry.clone();
        holiday.is_holiday = true;
        holiday.holiday_worked = true;
        let no_ot = PayPolicy {
            ot_enabled: false,
            ..policy
        };
        assert_eq!(regular_rate(&holiday, &no_ot), dec(10, 0));
    }

    #[test]
    fn test_breakdown_terms_add_up() {
        let policy = scenario_policy();
        for (start, end) in [("09:00", "17:30"), ("08:00", "20:15"), ("22:00", "06:00")] {
            let breakdown = earnings_breakdown(&record(start, end), &policy);
            assert_eq!(
                breakdown.total,
                breakdown.regular_pay + breakdown.overtime_pay + breakdown.holiday_bonus_pay
            );
            assert!(breakdown.regular_pay >= Decimal::ZERO);
            assert!(breakdown.overtime_pay >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_huge_rates_saturate_instead_of_overflowing() {
        let policy = PayPolicy {
            hourly_rate: Decimal::MAX,
            ot_enabled: true,
            ot_rate_multiplier: Decimal::MAX,
            holiday_default_hours: Decimal::MAX,
            ..PayPolicy::default()
        };
        assert_eq!(compute_earnings(&record("09:00", "17:00"), &policy), Decimal::MAX);

        let mut entry = record("09:00", "18:30");
        entry.is_holiday = true;
        entry.holiday_worked = true;
        entry.holiday_pay = true;
        let breakdown = earnings_breakdown(&entry, &policy);
        assert_eq!(breakdown.overtime_rate, Decimal::MAX);
        assert_eq!(breakdown.total, Decimal::MAX);
        assert!(breakdown.regular_hours >= Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_yields_zero_earnings() {
        let policy = PayPolicy::default();
        assert_eq!(compute_earnings(&record("09:00", "17:00"), &policy), Decimal::ZERO);
    }
}
