//! Organizational snapshot: the explicit input the resolution logic runs on.
//!
//! Evaluator resolution and weight defaults are pure functions over a
//! snapshot of the position graph, assignments, and delegation list taken at
//! request time. Nothing in the engine queries live data or caches results
//! between requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Delegation, EmployeeProfile, Position, PositionAssignment};

/// A snapshot of one company's organizational data.
///
/// All lookups are scoped to the `company_id` the snapshot carries; the
/// scoping is explicit rather than ambient so callers cannot accidentally
/// mix companies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgSnapshot {
    /// The company this snapshot belongs to.
    pub company_id: String,
    /// Employee profiles (names and department membership).
    #[serde(default)]
    pub employees: Vec<EmployeeProfile>,
    /// The position graph.
    #[serde(default)]
    pub positions: Vec<Position>,
    /// Employee-to-position assignments.
    #[serde(default)]
    pub assignments: Vec<PositionAssignment>,
    /// Delegation records.
    #[serde(default)]
    pub delegations: Vec<Delegation>,
}

impl OrgSnapshot {
    /// Returns the active position assignments for an employee, in input
    /// order.
    pub fn active_assignments(&self, employee_id: &str) -> Vec<&PositionAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.is_active && a.employee_id == employee_id)
            .collect()
    }

    /// Looks up a position by id.
    pub fn position(&self, position_id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == position_id)
    }

    /// Returns the id of the employee actively assigned to a position, if
    /// any. When several employees hold the position, the first active
    /// assignment wins.
    pub fn holder_of(&self, position_id: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.is_active && a.position_id == position_id)
            .map(|a| a.employee_id.as_str())
    }

    /// Returns the delegation in force for a delegator on the given date,
    /// if any. First match wins; disambiguating overlapping delegations is
    /// the caller's data-integrity responsibility.
    pub fn active_delegation_for(&self, delegator_id: &str, as_of: NaiveDate) -> Option<&Delegation> {
        self.delegations
            .iter()
            .find(|d| d.delegator_id == delegator_id && d.covers(as_of))
    }

    /// Looks up an employee profile by id.
    pub fn profile(&self, employee_id: &str) -> Option<&EmployeeProfile> {
        self.employees.iter().find(|e| e.id == employee_id)
    }

    /// Returns the display name for an employee id, when a profile exists.
    pub fn display_name(&self, employee_id: &str) -> Option<String> {
        self.profile(employee_id).map(|p| p.display_name.clone())
    }
}
