//! HTTP request handlers for the wage API.
//!
//! This module contains the handler functions for all API endpoints.

use std::borrow::Cow;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{delete, get, post, put},
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::monday_of_week;
use crate::error::EngineError;
use crate::models::{AttendanceDraft, SalaryBreakdown, WeekRecord, Worker};
use crate::parser::{ParseOutcome, parse_with_fallback};

use super::request::{NewWorkerRequest, ParseRequest, PolicySearchQuery};
use super::response::{ApiErrorResponse, PolicySearchResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

const CURRENT_WEEK: &str = "current";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/workers", get(list_workers_handler).post(add_worker_handler))
        .route("/workers/:id", delete(delete_worker_handler))
        .route("/workers/:id/weeks", get(list_weeks_handler))
        .route("/workers/:id/weeks/preview", post(preview_week_handler))
        .route("/workers/:id/weeks/:week_start", put(save_week_handler))
        .route("/attendance/parse", post(parse_attendance_handler))
        .route("/policy/search", get(policy_search_handler))
        .with_state(state)
}

/// Logs a rejected request and passes the error through.
fn rejected(correlation_id: Uuid, error: impl Into<ApiErrorResponse>) -> ApiErrorResponse {
    let response = error.into();
    warn!(
        correlation_id = %correlation_id,
        status = response.status.as_u16(),
        code = %response.error.code,
        message = %response.error.message,
        "Request rejected"
    );
    response
}

fn json_body<T>(correlation_id: Uuid, payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| rejected(correlation_id, rejection))
}

/// Handler for `GET /workers`.
async fn list_workers_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<Worker>>> {
    let correlation_id = Uuid::new_v4();

    let workers = state
        .store()
        .lock()
        .await
        .list_workers()
        .map_err(|e| rejected(correlation_id, e))?;

    info!(correlation_id = %correlation_id, count = workers.len(), "Listed workers");
    Ok(Json(workers))
}

/// Handler for `POST /workers`.
async fn add_worker_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewWorkerRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Worker>)> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;

    let worker = request
        .into_worker()
        .map_err(|e| rejected(correlation_id, e))?;
    state
        .store()
        .lock()
        .await
        .add_worker(&worker)
        .map_err(|e| rejected(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        worker_id = %worker.id,
        daily_rate = %worker.daily_rate,
        "Worker added"
    );
    Ok((StatusCode::CREATED, Json(worker)))
}

/// Handler for `DELETE /workers/:id`.
async fn delete_worker_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();

    let removed = state
        .store()
        .lock()
        .await
        .delete_worker(&id)
        .map_err(|e| rejected(correlation_id, e))?;
    if !removed {
        return Err(rejected(correlation_id, EngineError::WorkerNotFound { id }));
    }

    info!(correlation_id = %correlation_id, worker_id = %id, "Worker deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `GET /workers/:id/weeks`.
async fn list_weeks_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<WeekRecord>>> {
    let correlation_id = Uuid::new_v4();

    let weeks = {
        let store = state.store().lock().await;
        if store
            .get_worker(&id)
            .map_err(|e| rejected(correlation_id, e))?
            .is_none()
        {
            return Err(rejected(correlation_id, EngineError::WorkerNotFound { id }));
        }
        store
            .list_weeks_for_worker(&id)
            .map_err(|e| rejected(correlation_id, e))?
    };

    info!(
        correlation_id = %correlation_id,
        worker_id = %id,
        count = weeks.len(),
        "Listed week history"
    );
    Ok(Json(weeks))
}

async fn find_worker(state: &AppState, correlation_id: Uuid, id: String) -> ApiResult<Worker> {
    let found = state
        .store()
        .lock()
        .await
        .get_worker(&id)
        .map_err(|e| rejected(correlation_id, e))?;
    found.ok_or_else(|| rejected(correlation_id, EngineError::WorkerNotFound { id }))
}

/// Handler for `POST /workers/:id/weeks/preview`.
///
/// Computes the breakdown for a draft without saving anything.
async fn preview_week_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AttendanceDraft>, JsonRejection>,
) -> ApiResult<Json<SalaryBreakdown>> {
    let correlation_id = Uuid::new_v4();
    let draft = json_body(correlation_id, payload)?;
    draft.validate().map_err(|e| rejected(correlation_id, e))?;

    let worker = find_worker(&state, correlation_id, id).await?;
    let breakdown = draft.compute(worker.daily_rate);

    info!(
        correlation_id = %correlation_id,
        worker_id = %worker.id,
        total = %breakdown.total,
        "Previewed week"
    );
    Ok(Json(breakdown))
}

/// Reads a week start path segment: `YYYY-MM-DD`, or `current` for the
/// Monday of this week.
fn parse_week_start(segment: &str) -> Result<NaiveDate, EngineError> {
    if segment == CURRENT_WEEK {
        return Ok(monday_of_week(Utc::now().date_naive()));
    }
    NaiveDate::parse_from_str(segment, "%Y-%m-%d").map_err(|e| EngineError::InvalidRequest {
        message: format!("week start '{}' is not a YYYY-MM-DD date: {}", segment, e),
    })
}

/// Handler for `PUT /workers/:id/weeks/:week_start`.
///
/// Computes the breakdown for a draft and saves it, replacing any record
/// already stored for that week.
///
/// The week start is taken as given; `current` selects this week's Monday.
async fn save_week_handler(
    State(state): State<AppState>,
    Path((id, week_start)): Path<(String, String)>,
    payload: Result<Json<AttendanceDraft>, JsonRejection>,
) -> ApiResult<Json<WeekRecord>> {
    let correlation_id = Uuid::new_v4();
    let draft = json_body(correlation_id, payload)?;
    draft.validate().map_err(|e| rejected(correlation_id, e))?;

    let week_start = parse_week_start(&week_start).map_err(|e| rejected(correlation_id, e))?;

    let stored = {
        let store = state.store().lock().await;
        let worker = store
            .get_worker(&id)
            .map_err(|e| rejected(correlation_id, e))?
            .ok_or_else(|| rejected(correlation_id, EngineError::WorkerNotFound { id: id.clone() }))?;

        let breakdown = draft.compute(worker.daily_rate);
        let record = WeekRecord::new(&worker.id, week_start, &draft, breakdown, Utc::now());
        store
            .upsert_week(&record)
            .map_err(|e| rejected(correlation_id, e))?;
        store
            .get_week(&worker.id, week_start)
            .map_err(|e| rejected(correlation_id, e))?
            .unwrap_or(record)
    };

    info!(
        correlation_id = %correlation_id,
        worker_id = %stored.worker_id,
        week_start = %stored.week_start,
        total = %stored.total_salary,
        "Week saved"
    );
    Ok(Json(stored))
}

/// Handler for `POST /attendance/parse`.
///
/// Always answers with a parse result; when the model is unavailable the
/// deterministic rules are used and the outcome says so.
async fn parse_attendance_handler(
    State(state): State<AppState>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> ApiResult<Json<ParseOutcome>> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(rejected(
            correlation_id,
            EngineError::InvalidRequest {
                message: "message is required".to_string(),
            },
        ));
    }

    let policy = state.policy().refreshed().unwrap_or_else(|e| {
        warn!(
            correlation_id = %correlation_id,
            error = %e,
            "Policy reload failed, using the loaded lines"
        );
        Cow::Borrowed(state.policy())
    });
    let context = policy.retrieve(message, state.config().policy.top_n);
    let outcome = match request.model.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => {
            let parser = state.model().with_model(name);
            parse_with_fallback(&parser, message, &context).await
        }
        _ => parse_with_fallback(state.model(), message, &context).await,
    };

    info!(
        correlation_id = %correlation_id,
        outcome = ?outcome.source,
        "Parsed attendance message"
    );
    Ok(Json(outcome))
}

/// Handler for `GET /policy/search`.
async fn policy_search_handler(
    State(state): State<AppState>,
    query: Result<Query<PolicySearchQuery>, QueryRejection>,
) -> ApiResult<Json<PolicySearchResponse>> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| rejected(correlation_id, rejection))?;

    let top_n = query.top_n.unwrap_or(state.config().policy.top_n);
    let policy = state
        .policy()
        .refreshed()
        .map_err(|e| rejected(correlation_id, e))?;
    let lines: Vec<String> = policy
        .top_lines(&query.q, top_n)
        .into_iter()
        .map(str::to_string)
        .collect();

    info!(
        correlation_id = %correlation_id,
        query = %query.q,
        count = lines.len(),
        "Policy search"
    );
    Ok(Json(PolicySearchResponse {
        query: query.q,
        lines,
    }))
}
