//! Wall-clock time primitives.
//!
//! Every engine computation works in "minutes since midnight" space.
//! Pairs whose end is earlier than their start are treated as crossing
//! midnight and normalized by adding a full day to the end.

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Parses `HH:MM` into minutes since midnight (0..=1439).
///
/// Empty, malformed or out-of-range input yields 0. A trailing `AM`/`PM`
/// suffix left over from legacy stored values is ignored, not interpreted.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::parse_to_minutes;
///
/// assert_eq!(parse_to_minutes("09:30"), 570);
/// assert_eq!(parse_to_minutes("17:45"), 1065);
/// assert_eq!(parse_to_minutes("05:30 PM"), 330);
/// assert_eq!(parse_to_minutes(""), 0);
/// assert_eq!(parse_to_minutes("25:00"), 0);
/// ```
pub fn parse_to_minutes(hhmm: &str) -> i64 {
    let value = strip_meridiem(hhmm.trim());
    let Some((hours, minutes)) = value.split_once(':') else {
        return 0;
    };

    match (hours.trim().parse::<i64>(), minutes.trim().parse::<i64>()) {
        (Ok(h), Ok(m)) if (0..24).contains(&h) && (0..60).contains(&m) => h * 60 + m,
        _ => 0,
    }
}

/// Moves `end` onto the next day when it is earlier than `start`.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::normalize_overnight;
///
/// assert_eq!(normalize_overnight(540, 1020), 1020);
/// assert_eq!(normalize_overnight(1320, 360), 1800); // 22:00 -> 06:00
/// ```
pub fn normalize_overnight(start: i64, end: i64) -> i64 {
    if end < start {
        end + MINUTES_PER_DAY
    } else {
        end
    }
}

/// Parses a `(start, end)` pair and normalizes the end across midnight.
pub fn parse_range(start: &str, end: &str) -> (i64, i64) {
    let start = parse_to_minutes(start);
    let end = normalize_overnight(start, parse_to_minutes(end));
    (start, end)
}

/// Formats minutes as `HH:MM`, wrapping modulo one day.
///
/// # Examples
///
/// ```
/// use timepulse_engine::calculation::format_minutes;
///
/// assert_eq!(format_minutes(545), "09:05");
/// assert_eq!(format_minutes(1800), "06:00");
/// assert_eq!(format_minutes(-30), "23:30");
/// ```
pub fn format_minutes(minutes: i64) -> String {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

fn strip_meridiem(value: &str) -> &str {
    let len = value.len();
    match value.get(len.saturating_sub(2)..) {
        Some(suffix)
            if len >= 2
                && (suffix.eq_ignore_ascii_case("am") || suffix.eq_ignore_ascii_case("pm")) =>
        {
            value[..len - 2].trim_end()
        }
        _ => value,
    }
}
