//! Shift record model.
//!
//! A [`ShiftRecord`] is one logged work day. Times are kept as the
//! `HH:MM` strings the user entered so that legacy or malformed values
//! degrade inside the engine instead of failing deserialization.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayPolicy;
use crate::error::{EngineError, EngineResult};

/// One logged work day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    /// Opaque unique identifier.
    #[serde(default)]
    pub id: String,
    /// Local calendar day of the shift.
    pub date: NaiveDate,
    /// Punched start, `HH:MM`.
    #[serde(default)]
    pub start_time: String,
    /// Punched end, `HH:MM`. Earlier than the start means the shift crossed midnight.
    #[serde(default)]
    pub end_time: String,
    /// Contractual start for this record; only read when `is_custom_shift`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start_time: Option<String>,
    /// Contractual end for this record; only read when `is_custom_shift`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_end_time: Option<String>,
    /// Use the record's scheduled times instead of the policy defaults.
    #[serde(default)]
    pub is_custom_shift: bool,
    /// Whether a lunch window was logged. Display only.
    #[serde(default)]
    pub lunch_enabled: bool,
    /// Lunch start, `HH:MM`. Display only.
    #[serde(default)]
    pub lunch_start: String,
    /// Lunch end, `HH:MM`. Display only.
    #[serde(default)]
    pub lunch_end: String,
    /// Snapshot of the unpaid break; overrides the policy when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpaid_break_minutes: Option<i64>,
    /// Snapshot of the hourly rate; overrides the policy when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    /// Free text.
    #[serde(default)]
    pub notes: String,
    /// The day is a holiday.
    #[serde(default)]
    pub is_holiday: bool,
    /// The holiday was worked.
    #[serde(default)]
    pub holiday_worked: bool,
    /// A worked holiday also earns the holiday default hours as bonus.
    #[serde(default)]
    pub holiday_pay: bool,
}

impl ShiftRecord {
    /// Creates a plain worked record with every optional field unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use timepulse_engine::models::ShiftRecord;
    /// use chrono::NaiveDate;
    ///
    /// let record = ShiftRecord::new(
    ///     "entry_001",
    ///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     "09:00",
    ///     "17:30",
    /// );
    /// assert!(record.has_punch_times());
    /// assert!(!record.is_holiday);
    /// ```
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            start_time: start_time.into(),
            end_time: end_time.into(),
            scheduled_start_time: None,
            scheduled_end_time: None,
            is_custom_shift: false,
            lunch_enabled: false,
            lunch_start: String::new(),
            lunch_end: String::new(),
            unpaid_break_minutes: None,
            hourly_rate: None,
            notes: String::new(),
            is_holiday: false,
            holiday_worked: false,
            holiday_pay: false,
        }
    }

    /// True when both punched times are present.
    pub fn has_punch_times(&self) -> bool {
        !self.start_time.trim().is_empty() && !self.end_time.trim().is_empty()
    }

    /// A holiday that was not worked: credited, never timed.
    pub fn is_unworked_holiday(&self) -> bool {
        self.is_holiday && !self.holiday_worked
    }

    /// A worked holiday that is additionally credited the holiday default hours.
    pub fn earns_holiday_bonus(&self) -> bool {
        self.is_holiday && self.holiday_worked && self.holiday_pay
    }

    /// Returns the scheduled `(start, end)` pair used as the rounding reference.
    ///
    /// The record's own scheduled times are used only for a custom shift with
    /// both values filled in; otherwise the policy defaults apply.
    pub fn scheduled_times<'a>(&'a self, policy: &'a PayPolicy) -> (&'a str, &'a str) {
        if self.is_custom_shift {
            if let (Some(start), Some(end)) = (
                self.scheduled_start_time.as_deref().filter(|s| !s.trim().is_empty()),
                self.scheduled_end_time.as_deref().filter(|s| !s.trim().is_empty()),
            ) {
                return (start, end);
            }
        }
        (
            policy.default_start_time.as_str(),
            policy.default_end_time.as_str(),
        )
    }

    /// Unpaid break for this record: the snapshot if present, else the policy value.
    /// Negative values count as no break.
    pub fn break_minutes(&self, policy: &PayPolicy) -> i64 {
        self.unpaid_break_minutes
            .unwrap_or(policy.unpaid_break_minutes)
            .max(0)
    }

    /// Base hourly rate: the snapshot if present, else the policy rate.
    /// Negative values count as zero.
    pub fn base_rate(&self, policy: &PayPolicy) -> Decimal {
        self.hourly_rate
            .unwrap_or(policy.hourly_rate)
            .max(Decimal::ZERO)
    }

    /// Checks the entry-form rules a record must satisfy before it is stored.
    ///
    /// A worked record needs both times and they must differ. A holiday that
    /// was not worked needs neither.
    pub fn validate(&self) -> EngineResult<()> {
        if self.is_unworked_holiday() {
            return Ok(());
        }
        if !self.has_punch_times() {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: "start and end time are required".to_string(),
            });
        }
        if self.start_time.trim() == self.end_time.trim() {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: "start and end time are identical".to_string(),
            });
        }
        Ok(())
    }
}
