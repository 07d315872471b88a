//! Response types for the enrollment engine API.
//!
//! This module defines the success bodies that wrap engine output for the
//! HTTP surface, plus the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{
    BulkEnrollmentReport, BulkFailure, ConcurrentPosition, EnrollmentWeight, EvaluatorResolution,
    PreviewRow, ResolutionStep,
};
use crate::store::StoreError;

/// Response body for the `/resolve` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    /// The resolved evaluator (or the explicit unresolved outcome).
    pub resolution: EvaluatorResolution,
    /// The precedence steps taken, in evaluation order.
    pub steps: Vec<ResolutionStep>,
}

/// Response body for the `/weights` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsResponse {
    /// Whether the employee holds more than one active position.
    pub multi_position: bool,
    /// The employee's active positions with their FTE shares.
    pub positions: Vec<ConcurrentPosition>,
    /// The default FTE-proportional weight distribution.
    pub default_weights: Vec<EnrollmentWeight>,
}

/// Response body for the `/enroll/preview` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// One row per candidate, pre-selected for enrollment.
    pub rows: Vec<PreviewRow>,
}

/// Response body for the `/enroll/bulk` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkEnrollResponse {
    /// Human-readable outcome, e.g. `"3 succeeded (2 failed)"`.
    pub summary: String,
    /// Employee ids enrolled by this request.
    pub succeeded: Vec<String>,
    /// Per-row failures with their reasons.
    pub failed: Vec<BulkFailure>,
}

impl From<BulkEnrollmentReport> for BulkEnrollResponse {
    fn from(report: BulkEnrollmentReport) -> Self {
        Self {
            summary: report.summary(),
            succeeded: report.succeeded,
            failed: report.failed,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::CompanyMismatch { expected, actual } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "COMPANY_MISMATCH",
                    format!("Snapshot belongs to company '{}'", actual),
                    format!("This engine instance is configured for company '{}'", expected),
                ),
            },
            EngineError::WeightSumMismatch { actual } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "WEIGHT_SUM_MISMATCH",
                    format!("Enrollment weights must sum to exactly 100, got {}", actual),
                    "Adjust the weight percentages so they total 100",
                ),
            },
            EngineError::UnknownPosition {
                employee_id,
                position_id,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNKNOWN_POSITION",
                    format!("Employee '{}' holds no position '{}'", employee_id, position_id),
                    "Weights may only reference positions the employee actively holds",
                ),
            },
            EngineError::DuplicateWeight { position_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "DUPLICATE_WEIGHT",
                    format!("Position '{}' appears more than once", position_id),
                    "Each held position may carry at most one weight record",
                ),
            },
            EngineError::Store(store_error) => store_error_response(store_error),
        }
    }
}

fn store_error_response(error: StoreError) -> ApiErrorResponse {
    let message = error.to_string();
    match error {
        StoreError::Conflict { .. } => ApiErrorResponse {
            status: StatusCode::CONFLICT,
            error: ApiError::new("ALREADY_ENROLLED", message),
        },
        StoreError::NotFound { .. } => ApiErrorResponse {
            status: StatusCode::NOT_FOUND,
            error: ApiError::new("NOT_ENROLLED", message),
        },
        StoreError::Unavailable(_) => ApiErrorResponse {
            status: StatusCode::SERVICE_UNAVAILABLE,
            error: ApiError::new("STORE_UNAVAILABLE", message),
        },
    }
}
