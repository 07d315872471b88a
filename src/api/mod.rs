//! HTTP API module for the enrollment engine.
//!
//! This module provides the REST API endpoints for evaluator resolution,
//! weight apportionment, and cycle enrollment.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BulkEnrollRequest, EnrollRequest, PreviewRequest, ResolveRequest, WeightRequest,
    WeightsRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, BulkEnrollResponse, PreviewResponse, ResolveResponse,
    WeightsResponse,
};
pub use state::AppState;
