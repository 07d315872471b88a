//! Position and position-assignment models.
//!
//! Positions form the reporting hierarchy the evaluator precedence chain
//! walks; assignments relate employees to the positions they currently hold
//! and carry the FTE shares used for weight apportionment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A job slot an employee can hold.
///
/// Positions are read-only input to this engine; they are created and edited
/// by admin tooling elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Unique identifier for the position.
    pub id: String,
    /// Human-readable position title.
    pub title: String,
    /// The position this one reports to, if any (direct reporting line).
    #[serde(default)]
    pub reports_to: Option<String>,
    /// A secondary reporting line (at most one active mapping per position).
    #[serde(default)]
    pub matrix_supervisor: Option<String>,
    /// The department this position belongs to, if any.
    #[serde(default)]
    pub department: Option<String>,
}

/// Relates an employee to a position they hold.
///
/// An employee may hold multiple active assignments concurrently
/// ("multi-position employee"); at most one assignment per
/// (employee, position) is active at a time.
///
/// # Example
///
/// ```
/// use appraisal_engine::models::PositionAssignment;
/// use rust_decimal::Decimal;
///
/// let assignment = PositionAssignment {
///     employee_id: "emp_001".to_string(),
///     position_id: "pos_nurse".to_string(),
///     fte_percent: Decimal::new(60, 0),
///     is_primary: true,
///     is_active: true,
/// };
/// assert!(assignment.is_primary);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionAssignment {
    /// The employee holding the position.
    pub employee_id: String,
    /// The position being held.
    pub position_id: String,
    /// The FTE percentage of this assignment (e.g., 60 for 0.6 FTE).
    pub fte_percent: Decimal,
    /// Whether this is the employee's primary position.
    #[serde(default)]
    pub is_primary: bool,
    /// Whether the assignment is currently active.
    pub is_active: bool,
}

/// Derived view of one active assignment, used as input to weight
/// computation and multi-position detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcurrentPosition {
    /// The position id.
    pub position_id: String,
    /// The position title.
    pub title: String,
    /// The FTE share of this position.
    pub fte_share: Decimal,
    /// Whether this is the employee's primary position.
    pub is_primary: bool,
}
