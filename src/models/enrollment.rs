//! Enrollment outcome models.
//!
//! This module contains the types produced by evaluator resolution and the
//! enrollment workflow: the resolved evaluator, resolution trace steps,
//! weight records, the participant record itself, and the aggregate report
//! for bulk enrollment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which precedence rule produced the evaluator.
///
/// Final precedence, highest first: delegate > direct_supervisor >
/// matrix_supervisor > none.
///
/// # Example
///
/// ```
/// use appraisal_engine::models::EvaluatorSource;
///
/// assert_eq!(
///     serde_json::to_string(&EvaluatorSource::DirectSupervisor).unwrap(),
///     "\"direct_supervisor\""
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorSource {
    /// An active delegation from the resolved supervisor.
    Delegate,
    /// The holder of the primary position's reports-to position.
    DirectSupervisor,
    /// The holder of the primary position's matrix-supervisor position.
    MatrixSupervisor,
    /// No evaluator could be resolved. A valid, reportable outcome.
    None,
}

impl std::fmt::Display for EvaluatorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluatorSource::Delegate => write!(f, "delegate"),
            EvaluatorSource::DirectSupervisor => write!(f, "direct_supervisor"),
            EvaluatorSource::MatrixSupervisor => write!(f, "matrix_supervisor"),
            EvaluatorSource::None => write!(f, "none"),
        }
    }
}

/// The computed evaluator for one employee.
///
/// Recomputed on demand from a snapshot; never persisted or cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorResolution {
    /// The resolved evaluator's employee id, when one exists.
    pub evaluator_id: Option<String>,
    /// The resolved evaluator's display name, when a profile exists.
    pub evaluator_name: Option<String>,
    /// Which precedence rule fired.
    pub source: EvaluatorSource,
}

impl EvaluatorResolution {
    /// The terminal "no evaluator" outcome.
    pub fn none() -> Self {
        Self {
            evaluator_id: None,
            evaluator_name: None,
            source: EvaluatorSource::None,
        }
    }

    /// Returns true when an evaluator was found.
    pub fn is_resolved(&self) -> bool {
        self.evaluator_id.is_some()
    }
}

/// One step in the resolution trace, recording a rule that was checked and
/// what it found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionStep {
    /// The identifier of the rule that was checked.
    pub rule: String,
    /// What the rule found, in human-readable form.
    pub outcome: String,
}

/// Controls what happens with position weights at scoring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlingMode {
    /// All positions contribute to one weighted-average score.
    Aggregate,
    /// Each position is evaluated independently; weights are informational.
    Separate,
    /// Only the primary position is evaluated, at 100% weight.
    PrimaryOnly,
}

/// A per-position weight attached to a participant record.
///
/// The sum of `weight_percentage` across all positions for one participant
/// must equal exactly 100 at confirmation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentWeight {
    /// The position this weight applies to.
    pub position_id: String,
    /// The integer weight percentage (0..=100).
    pub weight_percentage: u32,
    /// Whether this is the employee's primary position.
    pub is_primary: bool,
}

/// The outcome record of enrolling one employee into one appraisal cycle.
///
/// Created once per (employee, cycle); mutated only by re-running
/// enrollment; destroyed when the employee is removed from the cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantEnrollment {
    /// Unique identifier for this participant record.
    pub participant_id: Uuid,
    /// The appraisal cycle the employee is enrolled in.
    pub cycle_id: String,
    /// The enrolled employee.
    pub employee_id: String,
    /// The resolved evaluator, when one exists.
    pub evaluator_id: Option<String>,
    /// Which precedence rule produced the evaluator.
    pub evaluator_source: EvaluatorSource,
    /// How position weights are applied at scoring time.
    pub handling_mode: HandlingMode,
    /// Per-position weight records. Empty for single-position employees.
    pub weights: Vec<EnrollmentWeight>,
    /// When the enrollment was confirmed.
    pub enrolled_at: DateTime<Utc>,
}

/// A role-change segment recorded alongside an enrollment.
///
/// The engine only consumes a boolean "the employee changed roles mid-cycle"
/// signal; computing the change itself is an external collaborator's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSegment {
    /// Unique identifier for this segment row.
    pub segment_id: Uuid,
    /// The appraisal cycle.
    pub cycle_id: String,
    /// The employee whose role changed.
    pub employee_id: String,
    /// The participant record the segment belongs to.
    pub participant_id: Uuid,
    /// When the segment was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// The candidate set for a bulk-enrollment preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateScope {
    /// Every employee in the snapshot.
    All,
    /// Employees belonging to one department.
    Department(String),
}

/// One row of a bulk-enrollment preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRow {
    /// The candidate employee.
    pub employee_id: String,
    /// The candidate's display name, when a profile exists.
    pub display_name: Option<String>,
    /// The evaluator that would be assigned on enrollment.
    pub evaluator: EvaluatorResolution,
    /// A warning attached to the row, e.g. when no supervisor is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Whether the row is selected for submission. Defaults to true.
    pub selected: bool,
}

/// A single failed row in a bulk enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    /// The employee whose enrollment failed.
    pub employee_id: String,
    /// The underlying error message.
    pub message: String,
}

/// Aggregate outcome of a bulk enrollment.
///
/// Each row's outcome is independent; failures never roll back or abort
/// sibling rows.
///
/// # Example
///
/// ```
/// use appraisal_engine::models::{BulkEnrollmentReport, BulkFailure};
///
/// let report = BulkEnrollmentReport {
///     succeeded: vec!["emp_001".to_string(), "emp_002".to_string()],
///     failed: vec![BulkFailure {
///         employee_id: "emp_003".to_string(),
///         message: "already enrolled".to_string(),
///     }],
/// };
/// assert_eq!(report.summary(), "2 succeeded (1 failed)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkEnrollmentReport {
    /// Employee ids whose enrollment was persisted.
    pub succeeded: Vec<String>,
    /// Rows whose enrollment failed, with the underlying message.
    pub failed: Vec<BulkFailure>,
}

impl BulkEnrollmentReport {
    /// Renders the aggregate outcome as `"N succeeded (M failed)"`.
    pub fn summary(&self) -> String {
        format!(
            "{} succeeded ({} failed)",
            self.succeeded.len(),
            self.failed.len()
        )
    }
}
