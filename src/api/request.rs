//! Request types for the enrollment engine API.
//!
//! Every request carries the organizational snapshot it should be computed
//! against; the engine never queries live data. The optional `as_of` date
//! defaults to today and controls which delegations are in force.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CandidateScope, EnrollmentWeight, HandlingMode, OrgSnapshot};

/// Request body for the `/resolve` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// The organizational snapshot to resolve against.
    pub snapshot: OrgSnapshot,
    /// The employee whose evaluator should be resolved.
    pub employee_id: String,
    /// The date delegations are checked against. Defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request body for the `/weights` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsRequest {
    /// The organizational snapshot to compute against.
    pub snapshot: OrgSnapshot,
    /// The employee whose concurrent positions should be weighted.
    pub employee_id: String,
}

/// A weight record in an enrollment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightRequest {
    /// The position this weight applies to.
    pub position_id: String,
    /// The integer weight percentage.
    pub weight_percentage: u32,
    /// Whether this is the employee's primary position.
    #[serde(default)]
    pub is_primary: bool,
}

impl From<WeightRequest> for EnrollmentWeight {
    fn from(req: WeightRequest) -> Self {
        EnrollmentWeight {
            position_id: req.position_id,
            weight_percentage: req.weight_percentage,
            is_primary: req.is_primary,
        }
    }
}

/// Request body for the `/enroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    /// The organizational snapshot to enroll against.
    pub snapshot: OrgSnapshot,
    /// The appraisal cycle to enroll into.
    pub cycle_id: String,
    /// The employee being enrolled.
    pub employee_id: String,
    /// The handling mode; falls back to the configured default.
    #[serde(default)]
    pub handling_mode: Option<HandlingMode>,
    /// Confirmed weights for multi-position employees. When absent, the
    /// default FTE-proportional distribution is applied.
    #[serde(default)]
    pub weights: Option<Vec<WeightRequest>>,
    /// Signal from an external collaborator that the employee changed
    /// roles mid-cycle; triggers a role-segment row.
    #[serde(default)]
    pub role_changed_mid_cycle: bool,
    /// The date delegations are checked against. Defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request body for the `/enroll/preview` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    /// The organizational snapshot to preview against.
    pub snapshot: OrgSnapshot,
    /// The target appraisal cycle.
    pub cycle_id: String,
    /// The candidate set: `"all"` or `{"department": "..."}`.
    pub scope: CandidateScope,
    /// The date delegations are checked against. Defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request body for the `/enroll/bulk` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkEnrollRequest {
    /// The organizational snapshot to enroll against.
    pub snapshot: OrgSnapshot,
    /// The target appraisal cycle.
    pub cycle_id: String,
    /// The selected employees to enroll.
    pub employee_ids: Vec<String>,
    /// The date delegations are checked against. Defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}
