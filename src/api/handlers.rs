//! HTTP request handlers for the enrollment engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, post},
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{BulkEnrollmentReport, BulkFailure, EnrollmentWeight};
use crate::resolution::{
    build_enrollment, build_preview, concurrent_positions, default_weights, enroll_batch,
    is_multi_position, resolve_evaluator, role_segment_for,
};

use super::request::{
    BulkEnrollRequest, EnrollRequest, PreviewRequest, ResolveRequest, WeightsRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, BulkEnrollResponse, PreviewResponse, ResolveResponse,
    WeightsResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/resolve", post(resolve_handler))
        .route("/weights", post(weights_handler))
        .route("/enroll", post(enroll_handler))
        .route("/enroll/preview", post(preview_handler))
        .route("/enroll/bulk", post(bulk_enroll_handler))
        .route(
            "/cycles/:cycle_id/participants/:employee_id",
            delete(remove_handler),
        )
        .with_state(state)
}

/// Unwraps a JSON payload, turning axum rejections into API errors.
fn parse_payload<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries the detailed error from serde
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
            Err((
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response())
        }
    }
}

/// Logs an engine error and converts it into its HTTP response.
fn engine_error_response(correlation_id: Uuid, error: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    ApiErrorResponse::from(error).into_response()
}

fn effective_date(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Utc::now().date_naive())
}

/// Handler for POST /resolve endpoint.
///
/// Resolves the evaluator for one employee against the supplied snapshot
/// and returns the outcome together with the precedence trace.
async fn resolve_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing resolve request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if let Err(err) = state.config().check_company(&request.snapshot.company_id) {
        return engine_error_response(correlation_id, err);
    }

    let as_of = effective_date(request.as_of);
    let result = resolve_evaluator(&request.snapshot, &request.employee_id, as_of);

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        source = %result.resolution.source,
        "Evaluator resolved"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ResolveResponse {
            resolution: result.resolution,
            steps: result.steps,
        }),
    )
        .into_response()
}

/// Handler for POST /weights endpoint.
///
/// Returns the employee's active positions and the default FTE-proportional
/// weight distribution a reviewer would start from.
async fn weights_handler(
    State(state): State<AppState>,
    payload: Result<Json<WeightsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing weights request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if let Err(err) = state.config().check_company(&request.snapshot.company_id) {
        return engine_error_response(correlation_id, err);
    }

    let positions = concurrent_positions(&request.snapshot, &request.employee_id);
    let multi_position = is_multi_position(&positions);
    let defaults = if multi_position {
        default_weights(&positions)
    } else {
        Vec::new()
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        positions_count = positions.len(),
        "Weights computed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(WeightsResponse {
            multi_position,
            positions,
            default_weights: defaults,
        }),
    )
        .into_response()
}

/// Handler for POST /enroll endpoint.
///
/// Confirms a single enrollment: resolves the evaluator, applies the
/// handling mode and weights, validates, and persists the participant. A
/// mid-cycle role change signal additionally records a role segment.
async fn enroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<EnrollRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing enroll request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if let Err(err) = state.config().check_company(&request.snapshot.company_id) {
        return engine_error_response(correlation_id, err);
    }

    let policy = state.config().policy();
    let as_of = effective_date(request.as_of);
    let mode = request.handling_mode.unwrap_or(policy.default_handling_mode);
    let positions = concurrent_positions(&request.snapshot, &request.employee_id);
    let resolved = resolve_evaluator(&request.snapshot, &request.employee_id, as_of);
    let weights: Option<Vec<EnrollmentWeight>> = request
        .weights
        .map(|weights| weights.into_iter().map(Into::into).collect());

    let enrollment = match build_enrollment(
        &request.cycle_id,
        &request.employee_id,
        &resolved.resolution,
        mode,
        &positions,
        weights,
        policy,
    ) {
        Ok(enrollment) => enrollment,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    if let Err(err) = state.store().insert(&enrollment) {
        return engine_error_response(correlation_id, EngineError::from(err));
    }

    if request.role_changed_mid_cycle {
        let segment = role_segment_for(&enrollment);
        if let Err(err) = state.store().insert_role_segment(&segment) {
            return engine_error_response(correlation_id, EngineError::from(err));
        }
        info!(
            correlation_id = %correlation_id,
            employee_id = %enrollment.employee_id,
            segment_id = %segment.segment_id,
            "Role segment recorded"
        );
    }

    info!(
        correlation_id = %correlation_id,
        cycle_id = %enrollment.cycle_id,
        employee_id = %enrollment.employee_id,
        evaluator_source = %enrollment.evaluator_source,
        weights_count = enrollment.weights.len(),
        "Participant enrolled"
    );

    (
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "application/json")],
        Json(enrollment),
    )
        .into_response()
}

/// Handler for POST /enroll/preview endpoint.
///
/// Builds the pre-selected candidate list for a bulk enrollment, resolving
/// each candidate's evaluator and flagging unresolved ones with a warning.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing preview request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if let Err(err) = state.config().check_company(&request.snapshot.company_id) {
        return engine_error_response(correlation_id, err);
    }

    let enrolled = match state.store().participants(&request.cycle_id) {
        Ok(participants) => participants
            .into_iter()
            .map(|p| p.employee_id)
            .collect(),
        Err(err) => return engine_error_response(correlation_id, EngineError::from(err)),
    };

    let as_of = effective_date(request.as_of);
    let rows = build_preview(&request.snapshot, &request.scope, &enrolled, as_of);

    info!(
        correlation_id = %correlation_id,
        cycle_id = %request.cycle_id,
        rows_count = rows.len(),
        "Preview built"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(PreviewResponse { rows }),
    )
        .into_response()
}

/// Handler for POST /enroll/bulk endpoint.
///
/// Enrolls the selected employees with default weights and the configured
/// default handling mode. Rows settle independently; the response reports
/// which succeeded and which failed, never aborting the batch.
async fn bulk_enroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkEnrollRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing bulk enroll request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if let Err(err) = state.config().check_company(&request.snapshot.company_id) {
        return engine_error_response(correlation_id, err);
    }

    let policy = state.config().policy();
    let as_of = effective_date(request.as_of);

    // Rows that fail to build are reported alongside rows that fail to
    // persist; neither kind stops the rest of the batch.
    let mut build_failures: Vec<BulkFailure> = Vec::new();
    let mut enrollments = Vec::with_capacity(request.employee_ids.len());
    for employee_id in &request.employee_ids {
        let positions = concurrent_positions(&request.snapshot, employee_id);
        let resolved = resolve_evaluator(&request.snapshot, employee_id, as_of);
        match build_enrollment(
            &request.cycle_id,
            employee_id,
            &resolved.resolution,
            policy.default_handling_mode,
            &positions,
            None,
            policy,
        ) {
            Ok(enrollment) => enrollments.push(enrollment),
            Err(err) => build_failures.push(BulkFailure {
                employee_id: employee_id.clone(),
                message: err.to_string(),
            }),
        }
    }

    let mut report: BulkEnrollmentReport = enroll_batch(state.store(), enrollments);
    report.failed.extend(build_failures);

    info!(
        correlation_id = %correlation_id,
        cycle_id = %request.cycle_id,
        summary = %report.summary(),
        "Bulk enrollment committed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(BulkEnrollResponse::from(report)),
    )
        .into_response()
}

/// Handler for DELETE /cycles/:cycle_id/participants/:employee_id endpoint.
///
/// Removes a participant from a cycle. The employee reappears in later
/// previews of the same cycle.
async fn remove_handler(
    State(state): State<AppState>,
    Path((cycle_id, employee_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        cycle_id = %cycle_id,
        employee_id = %employee_id,
        "Processing participant removal"
    );

    match state.store().remove(&cycle_id, &employee_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => engine_error_response(correlation_id, EngineError::from(err)),
    }
}
