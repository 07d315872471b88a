//! Enrollment confirmation and batch commit.
//!
//! Confirmation turns a resolved evaluator plus a (possibly human-edited)
//! weight distribution into a participant record, enforcing the 100-sum
//! invariant server-side. Batch commit settles every row independently and
//! reports the aggregate outcome instead of aborting on first failure.

use chrono::Utc;
use uuid::Uuid;

use crate::config::EnrollmentPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BulkEnrollmentReport, BulkFailure, ConcurrentPosition, EnrollmentWeight, EvaluatorResolution,
    HandlingMode, ParticipantEnrollment, RoleSegment,
};
use crate::store::ParticipantStore;

use super::weights::{apply_handling_mode, default_weights, validate_weight_sum};

/// Checks that every weight references a held position exactly once.
fn validate_weight_positions(
    employee_id: &str,
    positions: &[ConcurrentPosition],
    weights: &[EnrollmentWeight],
) -> EngineResult<()> {
    for (i, weight) in weights.iter().enumerate() {
        if !positions.iter().any(|p| p.position_id == weight.position_id) {
            return Err(EngineError::UnknownPosition {
                employee_id: employee_id.to_string(),
                position_id: weight.position_id.clone(),
            });
        }
        if weights[..i].iter().any(|w| w.position_id == weight.position_id) {
            return Err(EngineError::DuplicateWeight {
                position_id: weight.position_id.clone(),
            });
        }
    }
    Ok(())
}

/// Builds a confirmed participant record for one employee.
///
/// Single-position employees enroll with no weight records. Multi-position
/// employees enroll with the provided weights (or the default distribution
/// when none are provided), transformed by the handling mode and validated
/// against the 100-sum invariant when the policy says so. `primary_only`
/// ignores any provided weights entirely.
pub fn build_enrollment(
    cycle_id: &str,
    employee_id: &str,
    resolution: &EvaluatorResolution,
    mode: HandlingMode,
    positions: &[ConcurrentPosition],
    weights: Option<Vec<EnrollmentWeight>>,
    policy: &EnrollmentPolicy,
) -> EngineResult<ParticipantEnrollment> {
    let persisted_weights = if positions.len() <= 1 {
        // Simple enrollment: single evaluator, no weights.
        Vec::new()
    } else {
        let confirmed = weights.unwrap_or_else(|| default_weights(positions));
        let applied = apply_handling_mode(mode, positions, confirmed);
        if mode != HandlingMode::PrimaryOnly {
            validate_weight_positions(employee_id, positions, &applied)?;
            if policy.validate_weight_sum {
                validate_weight_sum(&applied)?;
            }
        }
        applied
    };

    Ok(ParticipantEnrollment {
        participant_id: Uuid::new_v4(),
        cycle_id: cycle_id.to_string(),
        employee_id: employee_id.to_string(),
        evaluator_id: resolution.evaluator_id.clone(),
        evaluator_source: resolution.source,
        handling_mode: mode,
        weights: persisted_weights,
        enrolled_at: Utc::now(),
    })
}

/// Builds the role-change segment recorded alongside an enrollment when the
/// caller signals the employee changed roles mid-cycle.
pub fn role_segment_for(enrollment: &ParticipantEnrollment) -> RoleSegment {
    RoleSegment {
        segment_id: Uuid::new_v4(),
        cycle_id: enrollment.cycle_id.clone(),
        employee_id: enrollment.employee_id.clone(),
        participant_id: enrollment.participant_id,
        recorded_at: Utc::now(),
    }
}

/// Commits a batch of enrollments, one insert at a time.
///
/// Each row's outcome is independent: a failed insert is recorded in the
/// report and never rolls back or aborts sibling rows. The report renders
/// as `"N succeeded (M failed)"`.
pub fn enroll_batch(
    store: &dyn ParticipantStore,
    enrollments: Vec<ParticipantEnrollment>,
) -> BulkEnrollmentReport {
    let mut report = BulkEnrollmentReport {
        succeeded: Vec::new(),
        failed: Vec::new(),
    };

    for enrollment in enrollments {
        match store.insert(&enrollment) {
            Ok(()) => report.succeeded.push(enrollment.employee_id),
            Err(err) => report.failed.push(BulkFailure {
                employee_id: enrollment.employee_id,
                message: err.to_string(),
            }),
        }
    }

    report
}
