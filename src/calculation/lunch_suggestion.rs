//! Lunch window suggestion for the entry form.

use crate::models::LunchWindow;

use super::time_parsing::{format_minutes, parse_range};

const LUNCH_MINUTES: i64 = 60;
const FALLBACK_LUNCH_START: &str = "12:00";
const FALLBACK_LUNCH_END: &str = "13:00";

/// Proposes a one-hour lunch centred on the shift midpoint.
///
/// Overnight shifts are normalized first, so the window may itself fall
/// after midnight. Without both times the window defaults to 12:00-13:00.
/// This never affects pay.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::suggest_lunch_window;
///
/// let window = suggest_lunch_window("09:00", "17:00");
/// assert_eq!(window.lunch_start, "12:30");
/// assert_eq!(window.lunch_end, "13:30");
/// ```
pub fn suggest_lunch_window(start: &str, end: &str) -> LunchWindow {
    if start.trim().is_empty() || end.trim().is_empty() {
        return LunchWindow {
            lunch_start: FALLBACK_LUNCH_START.to_string(),
            lunch_end: FALLBACK_LUNCH_END.to_string(),
        };
    }

    let (start, end) = parse_range(start, end);
    let midpoint = (start + end) / 2;
    let lunch_start = midpoint - LUNCH_MINUTES / 2;

    LunchWindow {
        lunch_start: format_minutes(lunch_start),
        lunch_end: format_minutes(lunch_start + LUNCH_MINUTES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_shift_window() {
        let window = suggest_lunch_window("09:00", "17:30");
        assert_eq!(window.lunch_start, "12:45");
        assert_eq!(window.lunch_end, "13:45");
    }

    #[test]
    fn test_odd_midpoint_rounds_down() {
        // 09:00-17:01 has its midpoint at 13:00:30.
        let window = suggest_lunch_window("09:00", "17:01");
        assert_eq!(window.lunch_start, "12:30");
        assert_eq!(window.lunch_end, "13:30");
    }

    #[test]
    fn test_overnight_window_wraps_past_midnight() {
        let window = suggest_lunch_window("22:00", "06:00");
        assert_eq!(window.lunch_start, "01:30");
        assert_eq!(window.lunch_end, "02:30");
    }

    #[test]
    fn test_window_straddling_midnight() {
        let window = suggest_lunch_window("20:00", "04:00");
        assert_eq!(window.lunch_start, "23:30");
        assert_eq!(window.lunch_end, "00:30");
    }

    #[test]
    fn test_missing_times_use_fallback() {
        let window = suggest_lunch_window("", "17:00");
        assert_eq!(window.lunch_start, "12:00");
        assert_eq!(window.lunch_end, "13:00");
    }
}
