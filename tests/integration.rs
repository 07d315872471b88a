//! End-to-end tests for the enrollment engine API.
//!
//! These tests exercise the full HTTP surface against an in-memory
//! participant store: evaluator resolution through the precedence chain,
//! weight apportionment, preview, single and bulk enrollment, and removal.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::json;
use tower::ServiceExt;

use appraisal_engine::api::{
    ApiError, AppState, BulkEnrollResponse, PreviewResponse, ResolveResponse, WeightsResponse,
    create_router,
};
use appraisal_engine::config::ConfigLoader;
use appraisal_engine::models::{
    Delegation, EmployeeProfile, EvaluatorSource, OrgSnapshot, ParticipantEnrollment, Position,
    PositionAssignment,
};
use appraisal_engine::store::{InMemoryParticipantStore, ParticipantStore};

fn make_date(s: &str) -> chrono::NaiveDate {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Builds the shared org fixture:
///
/// - `emp_ceo` holds `pos_ceo`, which has no supervisor line at all.
/// - `emp_lead` holds `pos_lead`, reporting to `pos_ceo`. A delegation
///   hands emp_lead's evaluations to `emp_deputy` for March 2026.
/// - `emp_nurse` holds `pos_nurse` (0.6 FTE, primary) and `pos_educator`
///   (0.4 FTE), both reporting to `pos_lead`.
/// - `emp_contract` holds `pos_contractor`, which has no reporting line
///   but names `pos_lead` as matrix supervisor.
fn fixture_snapshot() -> OrgSnapshot {
    let profile = |id: &str, name: &str, dept: &str| EmployeeProfile {
        id: id.to_string(),
        display_name: name.to_string(),
        department: Some(dept.to_string()),
    };
    let assignment = |emp: &str, pos: &str, fte: i64, primary: bool| PositionAssignment {
        employee_id: emp.to_string(),
        position_id: pos.to_string(),
        fte_percent: Decimal::new(fte, 0),
        is_primary: primary,
        is_active: true,
    };

    OrgSnapshot {
        company_id: "acme_care".to_string(),
        employees: vec![
            profile("emp_ceo", "Rosa Lindqvist", "executive"),
            profile("emp_lead", "Mia Vogel", "nursing"),
            profile("emp_deputy", "Tom Okafor", "nursing"),
            profile("emp_nurse", "Ada Moreno", "nursing"),
            profile("emp_contract", "Lena Faber", "education"),
        ],
        positions: vec![
            Position {
                id: "pos_ceo".to_string(),
                title: "Chief Executive".to_string(),
                reports_to: None,
                matrix_supervisor: None,
                department: Some("executive".to_string()),
            },
            Position {
                id: "pos_lead".to_string(),
                title: "Nursing Lead".to_string(),
                reports_to: Some("pos_ceo".to_string()),
                matrix_supervisor: None,
                department: Some("nursing".to_string()),
            },
            Position {
                id: "pos_deputy".to_string(),
                title: "Deputy Lead".to_string(),
                reports_to: Some("pos_ceo".to_string()),
                matrix_supervisor: None,
                department: Some("nursing".to_string()),
            },
            Position {
                id: "pos_nurse".to_string(),
                title: "Registered Nurse".to_string(),
                reports_to: Some("pos_lead".to_string()),
                matrix_supervisor: None,
                department: Some("nursing".to_string()),
            },
            Position {
                id: "pos_educator".to_string(),
                title: "Clinical Educator".to_string(),
                reports_to: Some("pos_lead".to_string()),
                matrix_supervisor: None,
                department: Some("education".to_string()),
            },
            Position {
                id: "pos_contractor".to_string(),
                title: "Visiting Specialist".to_string(),
                reports_to: None,
                matrix_supervisor: Some("pos_lead".to_string()),
                department: Some("education".to_string()),
            },
        ],
        assignments: vec![
            assignment("emp_ceo", "pos_ceo", 100, true),
            assignment("emp_lead", "pos_lead", 100, true),
            assignment("emp_deputy", "pos_deputy", 100, true),
            assignment("emp_nurse", "pos_nurse", 60, true),
            assignment("emp_nurse", "pos_educator", 40, false),
            assignment("emp_contract", "pos_contractor", 100, true),
        ],
        delegations: vec![Delegation {
            delegator_id: "emp_lead".to_string(),
            delegate_id: "emp_deputy".to_string(),
            start_date: make_date("2026-03-01"),
            end_date: Some(make_date("2026-03-31")),
            is_active: true,
        }],
    }
}

fn test_router() -> (Router, Arc<InMemoryParticipantStore>) {
    let config = ConfigLoader::load("./config/appraisal").expect("Failed to load config");
    let store = Arc::new(InMemoryParticipantStore::new());
    let state = AppState::new(config, store.clone());
    (create_router(state), store)
}

async fn post_json(router: &Router, uri: &str, body: serde_json::Value) -> axum::response::Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn read_body<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_resolve_direct_supervisor_outside_delegation_window() {
    let (router, _) = test_router();
    let response = post_json(
        &router,
        "/resolve",
        json!({
            "snapshot": fixture_snapshot(),
            "employee_id": "emp_nurse",
            "as_of": "2026-05-01"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let result: ResolveResponse = read_body(response).await;
    assert_eq!(result.resolution.evaluator_id.as_deref(), Some("emp_lead"));
    assert_eq!(result.resolution.source, EvaluatorSource::DirectSupervisor);
    assert_eq!(result.resolution.evaluator_name.as_deref(), Some("Mia Vogel"));
}

#[tokio::test]
async fn test_resolve_delegate_outranks_direct_supervisor() {
    let (router, _) = test_router();
    let response = post_json(
        &router,
        "/resolve",
        json!({
            "snapshot": fixture_snapshot(),
            "employee_id": "emp_nurse",
            "as_of": "2026-03-15"
        }),
    )
    .await;

    let result: ResolveResponse = read_body(response).await;
    assert_eq!(result.resolution.evaluator_id.as_deref(), Some("emp_deputy"));
    assert_eq!(result.resolution.source, EvaluatorSource::Delegate);
}

#[tokio::test]
async fn test_resolve_matrix_supervisor_when_no_reporting_line() {
    let (router, _) = test_router();
    let response = post_json(
        &router,
        "/resolve",
        json!({
            "snapshot": fixture_snapshot(),
            "employee_id": "emp_contract",
            "as_of": "2026-05-01"
        }),
    )
    .await;

    let result: ResolveResponse = read_body(response).await;
    assert_eq!(result.resolution.evaluator_id.as_deref(), Some("emp_lead"));
    assert_eq!(result.resolution.source, EvaluatorSource::MatrixSupervisor);
}

#[tokio::test]
async fn test_resolve_top_of_hierarchy_is_unresolved() {
    let (router, _) = test_router();
    let response = post_json(
        &router,
        "/resolve",
        json!({
            "snapshot": fixture_snapshot(),
            "employee_id": "emp_ceo",
            "as_of": "2026-05-01"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let result: ResolveResponse = read_body(response).await;
    assert!(result.resolution.evaluator_id.is_none());
    assert_eq!(result.resolution.source, EvaluatorSource::None);
}

#[tokio::test]
async fn test_weights_for_multi_position_employee() {
    let (router, _) = test_router();
    let response = post_json(
        &router,
        "/weights",
        json!({
            "snapshot": fixture_snapshot(),
            "employee_id": "emp_nurse"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let result: WeightsResponse = read_body(response).await;
    assert!(result.multi_position);
    assert_eq!(result.positions.len(), 2);
    assert_eq!(result.default_weights.len(), 2);
    assert_eq!(result.default_weights[0].position_id, "pos_nurse");
    assert_eq!(result.default_weights[0].weight_percentage, 60);
    assert_eq!(result.default_weights[1].weight_percentage, 40);
    let total: u32 = result
        .default_weights
        .iter()
        .map(|w| w.weight_percentage)
        .sum();
    assert_eq!(total, 100);
}

#[tokio::test]
async fn test_weights_for_single_position_employee() {
    let (router, _) = test_router();
    let response = post_json(
        &router,
        "/weights",
        json!({
            "snapshot": fixture_snapshot(),
            "employee_id": "emp_lead"
        }),
    )
    .await;

    let result: WeightsResponse = read_body(response).await;
    assert!(!result.multi_position);
    assert!(result.default_weights.is_empty());
}

#[tokio::test]
async fn test_enroll_rejects_weights_not_summing_to_100() {
    let (router, _) = test_router();
    let response = post_json(
        &router,
        "/enroll",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "employee_id": "emp_nurse",
            "weights": [
                {"position_id": "pos_nurse", "weight_percentage": 55, "is_primary": true},
                {"position_id": "pos_educator", "weight_percentage": 40}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let error: ApiError = read_body(response).await;
    assert_eq!(error.code, "WEIGHT_SUM_MISMATCH");
    assert!(error.message.contains("95"));
}

#[tokio::test]
async fn test_enroll_accepts_edited_weights_summing_to_100() {
    let (router, _) = test_router();
    let response = post_json(
        &router,
        "/enroll",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "employee_id": "emp_nurse",
            "weights": [
                {"position_id": "pos_nurse", "weight_percentage": 70, "is_primary": true},
                {"position_id": "pos_educator", "weight_percentage": 30}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let enrollment: ParticipantEnrollment = read_body(response).await;
    assert_eq!(enrollment.weights.len(), 2);
    assert_eq!(enrollment.weights[0].weight_percentage, 70);
}

#[tokio::test]
async fn test_enroll_primary_only_collapses_weights() {
    let (router, _) = test_router();
    let response = post_json(
        &router,
        "/enroll",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "employee_id": "emp_nurse",
            "handling_mode": "primary_only"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let enrollment: ParticipantEnrollment = read_body(response).await;
    assert_eq!(enrollment.weights.len(), 1);
    assert_eq!(enrollment.weights[0].position_id, "pos_nurse");
    assert_eq!(enrollment.weights[0].weight_percentage, 100);
}

#[tokio::test]
async fn test_enroll_records_role_segment_on_mid_cycle_change() {
    let (router, store) = test_router();
    let response = post_json(
        &router,
        "/enroll",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "employee_id": "emp_nurse",
            "role_changed_mid_cycle": true
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let enrollment: ParticipantEnrollment = read_body(response).await;
    let segments = store.role_segments();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].participant_id, enrollment.participant_id);
    assert_eq!(segments[0].employee_id, "emp_nurse");
}

#[tokio::test]
async fn test_preview_flags_unresolved_and_excludes_enrolled() {
    let (router, _) = test_router();

    // Enroll one candidate first; the preview must not offer them again.
    let response = post_json(
        &router,
        "/enroll",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "employee_id": "emp_lead"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        &router,
        "/enroll/preview",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "scope": "all",
            "as_of": "2026-05-01"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let preview: PreviewResponse = read_body(response).await;
    assert!(preview.rows.iter().all(|r| r.employee_id != "emp_lead"));
    assert!(preview.rows.iter().all(|r| r.selected));

    let ceo_row = preview
        .rows
        .iter()
        .find(|r| r.employee_id == "emp_ceo")
        .expect("ceo row missing");
    assert_eq!(ceo_row.warning.as_deref(), Some("No supervisor configured"));
    assert!(ceo_row.evaluator.evaluator_id.is_none());

    let nurse_row = preview
        .rows
        .iter()
        .find(|r| r.employee_id == "emp_nurse")
        .expect("nurse row missing");
    assert!(nurse_row.warning.is_none());
    assert_eq!(nurse_row.evaluator.evaluator_id.as_deref(), Some("emp_lead"));
}

#[tokio::test]
async fn test_preview_department_scope_filters_candidates() {
    let (router, _) = test_router();
    let response = post_json(
        &router,
        "/enroll/preview",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "scope": {"department": "nursing"},
            "as_of": "2026-05-01"
        }),
    )
    .await;

    let preview: PreviewResponse = read_body(response).await;
    let ids: Vec<&str> = preview.rows.iter().map(|r| r.employee_id.as_str()).collect();
    assert!(ids.contains(&"emp_lead"));
    assert!(ids.contains(&"emp_nurse"));
    assert!(!ids.contains(&"emp_ceo"));
    assert!(!ids.contains(&"emp_contract"));
}

#[tokio::test]
async fn test_bulk_enrollment_reports_partial_failure() {
    let (router, _) = test_router();

    // emp_nurse is already a participant; the bulk row for them must fail
    // while the other rows commit.
    let response = post_json(
        &router,
        "/enroll",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "employee_id": "emp_nurse"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        &router,
        "/enroll/bulk",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "employee_ids": ["emp_nurse", "emp_lead", "emp_ceo"],
            "as_of": "2026-05-01"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let report: BulkEnrollResponse = read_body(response).await;
    assert_eq!(report.summary, "2 succeeded (1 failed)");
    assert_eq!(report.succeeded, vec!["emp_lead", "emp_ceo"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].employee_id, "emp_nurse");
    assert!(report.failed[0].message.contains("already enrolled"));
}

#[tokio::test]
async fn test_bulk_enrollment_applies_default_weights() {
    let (router, store) = test_router();
    let response = post_json(
        &router,
        "/enroll/bulk",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "employee_ids": ["emp_nurse"],
            "as_of": "2026-05-01"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let participants = store.participants("cycle_2026_h1").unwrap();
    assert_eq!(participants.len(), 1);
    let weights = &participants[0].weights;
    assert_eq!(weights.len(), 2);
    let total: u32 = weights.iter().map(|w| w.weight_percentage).sum();
    assert_eq!(total, 100);
}

#[tokio::test]
async fn test_removed_participant_reappears_in_preview() {
    let (router, _) = test_router();

    let response = post_json(
        &router,
        "/enroll",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "employee_id": "emp_lead"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cycles/cycle_2026_h1/participants/emp_lead")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        &router,
        "/enroll/preview",
        json!({
            "snapshot": fixture_snapshot(),
            "cycle_id": "cycle_2026_h1",
            "scope": "all",
            "as_of": "2026-05-01"
        }),
    )
    .await;

    let preview: PreviewResponse = read_body(response).await;
    assert!(preview.rows.iter().any(|r| r.employee_id == "emp_lead"));
}

#[tokio::test]
async fn test_snapshot_from_wrong_company_is_rejected_everywhere() {
    let (router, _) = test_router();
    let mut snapshot = fixture_snapshot();
    snapshot.company_id = "other_co".to_string();

    let response = post_json(
        &router,
        "/enroll/bulk",
        json!({
            "snapshot": snapshot,
            "cycle_id": "cycle_2026_h1",
            "employee_ids": ["emp_nurse"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ApiError = read_body(response).await;
    assert_eq!(error.code, "COMPANY_MISMATCH");
}
