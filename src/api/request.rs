//! Request types for the TimePulse API.
//!
//! JSON bodies use camelCase field names, matching the stored blobs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ShiftRecord;

/// Request body for the `/calculate` endpoint.
///
/// Without a `policy` the stored settings are used. A supplied `policy` is
/// merged over the defaults the same way stored settings are.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// The records to evaluate, each independently.
    pub records: Vec<ShiftRecord>,
    /// Optional policy overriding the stored one for this request.
    #[serde(default)]
    pub policy: Option<Value>,
}

/// Request body for the `/lunch-suggestion` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchSuggestionRequest {
    /// Clock-in as `HH:MM`.
    pub start_time: String,
    /// Clock-out as `HH:MM`.
    pub end_time: String,
}

/// Query string for `GET /entries`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntriesQuery {
    /// History search: date substring or notes text.
    #[serde(default)]
    pub q: Option<String>,
}

/// Query string for `GET /summary/week`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekQuery {
    /// Any day inside the wanted week.
    pub date: NaiveDate,
}

/// Query string for `GET /summary/month`.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthQuery {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 to 12.
    pub month: u32,
}

/// Query string for `GET /summary/range`.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeQuery {
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
}
