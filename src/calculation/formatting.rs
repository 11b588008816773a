//! Display formatting for times and dates.

use chrono::{NaiveDate, NaiveTime};

use crate::config::{DateFormat, TimeFormat};

/// Renders a stored `HH:MM` value in the requested clock style.
///
/// 24-hour output passes the stored value through. Values that do not
/// parse are returned unchanged.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::format_display_time;
/// use timepulse_engine::config::TimeFormat;
///
/// assert_eq!(format_display_time("17:05", TimeFormat::TwelveHour), "5:05 PM");
/// assert_eq!(format_display_time("00:30", TimeFormat::TwelveHour), "12:30 AM");
/// assert_eq!(format_display_time("17:05", TimeFormat::TwentyFourHour), "17:05");
/// ```
pub fn format_display_time(hhmm: &str, format: TimeFormat) -> String {
    if hhmm.trim().is_empty() {
        return String::new();
    }
    match format {
        TimeFormat::TwentyFourHour => hhmm.to_string(),
        TimeFormat::TwelveHour => NaiveTime::parse_from_str(hhmm.trim(), "%H:%M")
            .map(|time| time.format("%-I:%M %p").to_string())
            .unwrap_or_else(|_| hhmm.to_string()),
    }
}

/// Renders a date in the requested day/month order.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::format_display_date;
/// use timepulse_engine::config::DateFormat;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
/// assert_eq!(format_display_date(date, DateFormat::DayMonthYear), "09/03/2026");
/// assert_eq!(format_display_date(date, DateFormat::MonthDayYear), "03/09/2026");
/// ```
pub fn format_display_date(date: NaiveDate, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::DayMonthYear => "%d/%m/%Y",
        DateFormat::MonthDayYear => "%m/%d/%Y",
    };
    date.format(pattern).to_string()
}
