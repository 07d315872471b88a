//! Employee profile model.

use serde::{Deserialize, Serialize};

/// A lightweight employee profile.
///
/// Profiles supply display names for resolved evaluators and the department
/// membership used to build bulk-enrollment candidate sets. Everything else
/// about an employee lives on their position assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub display_name: String,
    /// The department the employee belongs to, if any.
    #[serde(default)]
    pub department: Option<String>,
}
