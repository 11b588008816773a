//! Calculation logic for TimePulse.
//!
//! Everything here is a pure function of a [`ShiftRecord`](crate::models::ShiftRecord)
//! and a [`PayPolicy`](crate::config::PayPolicy): time parsing and overnight
//! normalization, clock rounding against the schedule, overtime detection,
//! worked hours, earnings, lunch suggestion, display formatting and
//! period summaries.

mod earnings;
mod formatting;
mod lunch_suggestion;
mod overtime;
mod period_summary;
mod punch_rounding;
mod time_parsing;
mod worked_hours;

pub use earnings::{
    calculate_entry, compute_earnings, earnings_breakdown, overtime_rate, regular_rate,
};
pub use formatting::{format_display_date, format_display_time};
pub use lunch_suggestion::suggest_lunch_window;
pub use overtime::compute_overtime_minutes;
pub use period_summary::{
    search_records, summarize_month, summarize_period, summarize_week, week_range,
};
pub use punch_rounding::{
    EffectivePunches, compute_effective_punch_range, effective_punches, scheduled_minutes,
};
pub use time_parsing::{
    MINUTES_PER_DAY, format_minutes, normalize_overnight, parse_range, parse_to_minutes,
};
pub use worked_hours::{HoursMode, compute_worked_hours, holiday_bonus_hours, minutes_to_hours};
