//! Configuration types for the enrollment engine.

use serde::{Deserialize, Serialize};

use crate::models::HandlingMode;

/// Metadata for the company an engine instance serves.
///
/// Every request snapshot must carry this company's id; the scoping is
/// explicit so one engine instance never mixes companies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMetadata {
    /// The company identifier.
    pub id: String,
    /// The company display name.
    pub name: String,
}

/// Policy knobs for the enrollment workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentPolicy {
    /// Whether confirmation re-validates the 100-sum weight invariant
    /// server-side before persisting. On by default.
    #[serde(default = "default_validate_weight_sum")]
    pub validate_weight_sum: bool,
    /// The handling mode applied when a caller does not specify one
    /// (bulk enrollment in particular).
    #[serde(default = "default_handling_mode")]
    pub default_handling_mode: HandlingMode,
}

fn default_validate_weight_sum() -> bool {
    true
}

fn default_handling_mode() -> HandlingMode {
    HandlingMode::Aggregate
}

impl Default for EnrollmentPolicy {
    fn default() -> Self {
        Self {
            validate_weight_sum: default_validate_weight_sum(),
            default_handling_mode: default_handling_mode(),
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    company: CompanyMetadata,
    policy: EnrollmentPolicy,
}

impl EngineConfig {
    /// Creates a configuration from its parts.
    pub fn new(company: CompanyMetadata, policy: EnrollmentPolicy) -> Self {
        Self { company, policy }
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        &self.company
    }

    /// Returns the enrollment policy.
    pub fn policy(&self) -> &EnrollmentPolicy {
        &self.policy
    }
}
