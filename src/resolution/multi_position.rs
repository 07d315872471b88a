//! Multi-position detection.
//!
//! Builds the derived concurrent-position view used as input to weight
//! computation. An employee is multi-position when they hold more than one
//! active assignment.

use crate::models::{ConcurrentPosition, OrgSnapshot};

/// Returns the concurrent-position view for an employee: one entry per
/// active assignment, in assignment order, joined with the position title.
///
/// Assignments referencing a position missing from the snapshot keep the
/// position id as their title rather than being dropped; the weight math
/// only needs the FTE share.
pub fn concurrent_positions(snapshot: &OrgSnapshot, employee_id: &str) -> Vec<ConcurrentPosition> {
    snapshot
        .active_assignments(employee_id)
        .into_iter()
        .map(|a| ConcurrentPosition {
            position_id: a.position_id.clone(),
            title: snapshot
                .position(&a.position_id)
                .map(|p| p.title.clone())
                .unwrap_or_else(|| a.position_id.clone()),
            fte_share: a.fte_percent,
            is_primary: a.is_primary,
        })
        .collect()
}

/// Returns true when the employee holds more than one active position.
pub fn is_multi_position(positions: &[ConcurrentPosition]) -> bool {
    positions.len() > 1
}
