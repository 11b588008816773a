//! Pay policy types.
//!
//! [`PayPolicy`] is the single user-editable configuration consumed by the
//! calculation engine. Every field carries its own default so that a policy
//! stored by an older version gains sane values for newly introduced fields.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Interface language for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Portuguese.
    Pt,
}

/// Colour theme for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

/// Calendar date display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFormat {
    /// Day first, e.g. `31/12/2026`.
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
    /// Month first, e.g. `12/31/2026`.
    #[default]
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
}

/// Clock display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `17:30`
    #[serde(rename = "24h")]
    TwentyFourHour,
    /// `5:30 PM`
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
}

/// The pay policy applied to every shift record.
///
/// The engine never reads a global policy; each computation takes a
/// reference to one of these. Presentation-only fields ride along so the
/// whole settings blob round-trips through the store unchanged.
///
/// # Example
///
/// ```
/// use timepulse_engine::config::PayPolicy;
/// use rust_decimal::Decimal;
///
/// let policy: PayPolicy = serde_json::from_str(r#"{"hourlyRate": 20}"#).unwrap();
/// assert_eq!(policy.hourly_rate, Decimal::new(20, 0));
/// assert_eq!(policy.default_start_time, "09:00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PayPolicy {
    /// Scheduled start used when a record has no custom shift.
    pub default_start_time: String,
    /// Scheduled end used when a record has no custom shift.
    pub default_end_time: String,
    /// Unpaid break deducted from every worked shift.
    pub unpaid_break_minutes: i64,
    /// Default hourly rate.
    pub hourly_rate: Decimal,
    /// Multiplier applied to worked holidays when overtime is disabled.
    pub holiday_rate_multiplier: Decimal,
    /// Flat rate for worked holidays; takes precedence over the multiplier when positive.
    pub holiday_worked_rate: Option<Decimal>,
    /// Hours credited for an unworked holiday, or as bonus for a paid worked one.
    pub holiday_default_hours: Decimal,
    /// Weekly target used for goal progress.
    pub weekly_goal_hours: Decimal,
    /// Whether clock-in/clock-out grace windows apply to pay.
    pub rounding_enabled: bool,
    /// Grace window for late arrival, in minutes.
    pub clock_in_rounding_minutes: i64,
    /// Grace window around the scheduled end, in minutes.
    pub clock_out_rounding_minutes: i64,
    /// Whether overtime is computed at all.
    pub ot_enabled: bool,
    /// Minimum overage past the scheduled end that counts as overtime.
    pub ot_threshold_minutes: i64,
    /// Multiplier applied to the base rate for overtime hours.
    pub ot_rate_multiplier: Decimal,
    /// Display name.
    pub user_name: String,
    /// ISO currency code used for display.
    pub currency: String,
    /// Interface language.
    pub language: Language,
    /// Colour theme.
    pub theme: Theme,
    /// Whether the entry form starts with lunch enabled.
    pub lunch_enabled_default: bool,
    /// Date display format.
    pub date_format: DateFormat,
    /// Time display format.
    pub time_format: TimeFormat,
}

impl Default for PayPolicy {
    fn default() -> Self {
        Self {
            default_start_time: "09:00".to_string(),
            default_end_time: "17:30".to_string(),
            unpaid_break_minutes: 0,
            hourly_rate: Decimal::ZERO,
            holiday_rate_multiplier: Decimal::new(20, 1),
            holiday_worked_rate: None,
            holiday_default_hours: Decimal::new(8, 0),
            weekly_goal_hours: Decimal::new(40, 0),
            rounding_enabled: false,
            clock_in_rounding_minutes: 0,
            clock_out_rounding_minutes: 0,
            ot_enabled: false,
            ot_threshold_minutes: 0,
            ot_rate_multiplier: Decimal::new(15, 1),
            user_name: "User".to_string(),
            currency: "USD".to_string(),
            language: Language::En,
            theme: Theme::Light,
            lunch_enabled_default: false,
            date_format: DateFormat::MonthDayYear,
            time_format: TimeFormat::TwelveHour,
        }
    }
}
