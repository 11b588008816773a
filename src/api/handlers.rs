//! HTTP request handlers for the TimePulse API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_entry, search_records, suggest_lunch_window, summarize_month, summarize_period,
    summarize_week,
};
use crate::config::PolicyLoader;
use crate::models::{EntryCalculation, ShiftRecord};

use super::request::{
    CalculationRequest, EntriesQuery, LunchSuggestionRequest, MonthQuery, RangeQuery, WeekQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, CalculationTotals, ImportResponse,
};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/lunch-suggestion", post(lunch_suggestion_handler))
        .route("/entries", get(list_entries_handler).post(upsert_entry_handler))
        .route("/entries/:id", delete(delete_entry_handler))
        .route("/settings", get(get_settings_handler).put(put_settings_handler))
        .route("/summary/week", get(week_summary_handler))
        .route("/summary/month", get(month_summary_handler))
        .route("/summary/range", get(range_summary_handler))
        .route("/export/json", get(export_json_handler))
        .route("/export/csv", get(export_csv_handler))
        .route("/import", post(import_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a body rejection to the API error body.
fn json_rejection(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the failure
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn query_rejection(rejection: QueryRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Invalid query string"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}

/// Handler for POST /calculate.
///
/// Evaluates every record against one policy snapshot: the request's,
/// merged over the defaults, or the stored one.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> HandlerResult {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let Json(request) = payload.map_err(|rejection| json_rejection(rejection, correlation_id))?;

    let policy = match request.policy {
        Some(body) if !body.is_object() => {
            warn!(correlation_id = %correlation_id, "Policy is not an object");
            return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
                "policy must be a JSON object",
            )));
        }
        Some(body) => PolicyLoader::merge_with_defaults(body),
        None => state.read().await.policy().clone(),
    };

    let start_time = Instant::now();
    let entries: Vec<EntryCalculation> = request
        .records
        .iter()
        .map(|record| calculate_entry(record, &policy))
        .collect();
    let totals = CalculationTotals::from_entries(&entries);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        records_count = entries.len(),
        earnings = %totals.earnings,
        duration_us,
        "Calculation completed successfully"
    );

    Ok(json_response(
        StatusCode::OK,
        CalculationResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            entries,
            totals,
            duration_us,
        },
    ))
}

/// Handler for POST /lunch-suggestion.
async fn lunch_suggestion_handler(
    payload: Result<Json<LunchSuggestionRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| json_rejection(rejection, correlation_id))?;

    let window = suggest_lunch_window(&request.start_time, &request.end_time);
    Ok(json_response(StatusCode::OK, window))
}

/// Handler for GET /entries, optionally filtered with `?q=`.
async fn list_entries_handler(
    State(state): State<AppState>,
    query: Result<Query<EntriesQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(rejection, correlation_id))?;

    let store = state.read().await;
    let entries: Vec<ShiftRecord> = match query.q.as_deref() {
        Some(q) => search_records(store.entries(), q).into_iter().cloned().collect(),
        None => store.entries().to_vec(),
    };
    Ok(json_response(StatusCode::OK, entries))
}

/// Handler for POST /entries. Inserts or replaces by id.
async fn upsert_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftRecord>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Json(record) = payload.map_err(|rejection| json_rejection(rejection, correlation_id))?;

    let saved = state.write().await.upsert_entry(record).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Entry rejected");
        ApiErrorResponse::from(err)
    })?;

    info!(
        correlation_id = %correlation_id,
        entry_id = %saved.id,
        date = %saved.date,
        "Entry saved"
    );
    Ok(json_response(StatusCode::OK, saved))
}

/// Handler for DELETE /entries/:id.
async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    state.write().await.delete_entry(&id).map_err(|err| {
        warn!(correlation_id = %correlation_id, entry_id = %id, error = %err, "Delete failed");
        ApiErrorResponse::from(err)
    })?;

    info!(correlation_id = %correlation_id, entry_id = %id, "Entry deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for GET /settings.
async fn get_settings_handler(State(state): State<AppState>) -> HandlerResult {
    let policy = state.read().await.policy().clone();
    Ok(json_response(StatusCode::OK, policy))
}

/// Handler for PUT /settings.
///
/// Missing or unreadable fields keep their defaults, the same merge applied
/// to stored settings.
async fn put_settings_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Json(body) = payload.map_err(|rejection| json_rejection(rejection, correlation_id))?;

    if !body.is_object() {
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            "settings must be a JSON object",
        )));
    }

    let policy = PolicyLoader::merge_with_defaults(body);
    state.write().await.replace_policy(policy.clone())?;

    info!(correlation_id = %correlation_id, "Settings replaced");
    Ok(json_response(StatusCode::OK, policy))
}

/// Handler for GET /summary/week?date=.
async fn week_summary_handler(
    State(state): State<AppState>,
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(rejection, correlation_id))?;

    let store = state.read().await;
    let summary = summarize_week(store.entries(), store.policy(), query.date).ok_or_else(|| {
        warn!(correlation_id = %correlation_id, date = %query.date, "Week out of range");
        ApiErrorResponse::bad_request(ApiError::validation_error(format!(
            "Week of {} is out of range",
            query.date
        )))
    })?;
    Ok(json_response(StatusCode::OK, summary))
}

/// Handler for GET /summary/month?year=&month=.
async fn month_summary_handler(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(rejection, correlation_id))?;

    let store = state.read().await;
    let summary = summarize_month(store.entries(), store.policy(), query.year, query.month)
        .ok_or_else(|| {
            ApiErrorResponse::bad_request(ApiError::validation_error(format!(
                "Invalid month: {}-{}",
                query.year, query.month
            )))
        })?;
    Ok(json_response(StatusCode::OK, summary))
}

/// Handler for GET /summary/range?from=&to=.
async fn range_summary_handler(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(rejection, correlation_id))?;

    if query.from > query.to {
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            "'from' must not be after 'to'",
        )));
    }

    let store = state.read().await;
    let totals = summarize_period(store.entries(), store.policy(), query.from, query.to);
    Ok(json_response(StatusCode::OK, totals))
}

/// Handler for GET /export/json.
async fn export_json_handler(State(state): State<AppState>) -> HandlerResult {
    let backup = state.read().await.export_backup()?;
    let filename = format!("timepulse-backup-{}.json", Utc::now().date_naive());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        backup,
    )
        .into_response())
}

/// Handler for GET /export/csv.
async fn export_csv_handler(State(state): State<AppState>) -> HandlerResult {
    let csv = state.read().await.export_csv();
    let filename = format!("timepulse-export-{}.csv", Utc::now().date_naive());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Handler for POST /import. Replaces all entries and settings.
async fn import_handler(State(state): State<AppState>, body: String) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, bytes = body.len(), "Importing backup");

    let imported = state.write().await.import_backup(&body)?;

    info!(correlation_id = %correlation_id, imported, "Backup restored");
    Ok(json_response(StatusCode::OK, ImportResponse { imported }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LunchWindow;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::in_memory().expect("Failed to open in-memory store")
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<&str>) -> Response {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
        router.oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_calculate_returns_200() {
        let router = create_router(create_test_state());
        let body = r#"{
            "records": [
                {"id": "e1", "date": "2026-01-13", "startTime": "09:00", "endTime": "17:00"}
            ],
            "policy": {"hourlyRate": 20}
        }"#;

        let response = send(router, "POST", "/calculate", Some(body)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result: CalculationResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].entry_id, "e1");
        assert_eq!(result.totals.earnings, rust_decimal::Decimal::new(160, 0));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = send(router, "POST", "/calculate", Some("{invalid json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_records_returns_validation_error() {
        let router = create_router(create_test_state());
        let response = send(router, "POST", "/calculate", Some(r#"{"policy": {}}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_lunch_suggestion() {
        let router = create_router(create_test_state());
        let response = send(
            router,
            "POST",
            "/lunch-suggestion",
            Some(r#"{"startTime": "09:00", "endTime": "17:00"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let window: LunchWindow = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(window.lunch_start, "12:30");
        assert_eq!(window.lunch_end, "13:30");
    }

    #[tokio::test]
    async fn test_delete_unknown_entry_returns_404() {
        let router = create_router(create_test_state());
        let response = send(router, "DELETE", "/entries/missing", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "ENTRY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_month_returns_400() {
        let router = create_router(create_test_state());
        let response = send(router, "GET", "/summary/month?year=2026&month=13", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_query_returns_400() {
        let router = create_router(create_test_state());
        let response = send(router, "GET", "/summary/week?date=yesterday", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }
}
