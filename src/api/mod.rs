//! HTTP API module for TimePulse.
//!
//! This module provides the REST endpoints for the calculation engine, the
//! entry store, period summaries and backups.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, EntriesQuery, LunchSuggestionRequest, MonthQuery, RangeQuery, WeekQuery,
};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, CalculationTotals, ImportResponse,
};
pub use state::{AppState, SharedEntryStore};
