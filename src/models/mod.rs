//! Core data models for the TimePulse engine.
//!
//! This module contains the shift record, the per-record calculation
//! outputs and the period summary types.

mod calculation_result;
mod period_summary;
mod shift_record;

pub use calculation_result::{
    EarningsBreakdown, EndAdjustment, EntryCalculation, LunchWindow, PunchRange, StartAdjustment,
};
pub use period_summary::{DaySummary, MonthSummary, PeriodTotals, WeekSummary};
pub use shift_record::ShiftRecord;
