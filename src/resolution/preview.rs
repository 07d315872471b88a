//! Bulk-enrollment preview.
//!
//! Resolves the candidate employee set (by department or company-wide),
//! subtracts employees already enrolled in the cycle, and attaches each
//! remaining candidate's evaluator resolution. Rows default to selected;
//! the caller submits only the rows that stay selected.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::{CandidateScope, EvaluatorSource, OrgSnapshot, PreviewRow};

use super::evaluator::resolve_evaluator;

/// Warning attached to preview rows whose evaluator resolution came up empty.
pub const NO_SUPERVISOR_WARNING: &str = "No supervisor configured";

/// Builds the preview list for a bulk enrollment.
///
/// `enrolled` is the set of employee ids already participating in the
/// target cycle; they are excluded from the preview. Every remaining
/// candidate gets a row with their would-be evaluator, a warning when
/// `source = none`, and `selected = true`.
pub fn build_preview(
    snapshot: &OrgSnapshot,
    scope: &CandidateScope,
    enrolled: &HashSet<String>,
    as_of: NaiveDate,
) -> Vec<PreviewRow> {
    snapshot
        .employees
        .iter()
        .filter(|profile| match scope {
            CandidateScope::All => true,
            CandidateScope::Department(dept) => profile.department.as_deref() == Some(dept),
        })
        .filter(|profile| !enrolled.contains(&profile.id))
        .map(|profile| {
            let result = resolve_evaluator(snapshot, &profile.id, as_of);
            let warning = (result.resolution.source == EvaluatorSource::None)
                .then(|| NO_SUPERVISOR_WARNING.to_string());
            PreviewRow {
                employee_id: profile.id.clone(),
                display_name: Some(profile.display_name.clone()),
                evaluator: result.resolution,
                warning,
                selected: true,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeProfile, Position, PositionAssignment};
    use rust_decimal::Decimal;

    fn profile(id: &str, name: &str, dept: Option<&str>) -> EmployeeProfile {
        EmployeeProfile {
            id: id.to_string(),
            display_name: name.to_string(),
            department: dept.map(str::to_string),
        }
    }

    fn snapshot() -> OrgSnapshot {
        OrgSnapshot {
            company_id: "acme".to_string(),
            employees: vec![
                profile("emp_a", "Ada", Some("nursing")),
                profile("emp_b", "Ben", Some("nursing")),
                profile("emp_c", "Cyd", Some("kitchen")),
                profile("emp_mgr", "Mia", Some("nursing")),
            ],
            positions: vec![
                Position {
                    id: "pos_worker".to_string(),
                    title: "Worker".to_string(),
                    reports_to: Some("pos_lead".to_string()),
                    matrix_supervisor: None,
                    department: None,
                },
                Position {
                    id: "pos_lead".to_string(),
                    title: "Lead".to_string(),
                    reports_to: None,
                    matrix_supervisor: None,
                    department: None,
                },
            ],
            assignments: vec![
                PositionAssignment {
                    employee_id: "emp_a".to_string(),
                    position_id: "pos_worker".to_string(),
                    fte_percent: Decimal::new(100, 0),
                    is_primary: true,
                    is_active: true,
                },
                PositionAssignment {
                    employee_id: "emp_mgr".to_string(),
                    position_id: "pos_lead".to_string(),
                    fte_percent: Decimal::new(100, 0),
                    is_primary: true,
                    is_active: true,
                },
            ],
            delegations: vec![],
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn test_company_wide_scope_includes_everyone_not_enrolled() {
        let rows = build_preview(&snapshot(), &CandidateScope::All, &HashSet::new(), as_of());
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.selected));
    }

    #[test]
    fn test_department_scope_filters_members() {
        let rows = build_preview(
            &snapshot(),
            &CandidateScope::Department("nursing".to_string()),
            &HashSet::new(),
            as_of(),
        );
        let ids: Vec<&str> = rows.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["emp_a", "emp_b", "emp_mgr"]);
    }

    #[test]
    fn test_enrolled_employees_are_excluded() {
        let enrolled: HashSet<String> = ["emp_a".to_string()].into_iter().collect();
        let rows = build_preview(&snapshot(), &CandidateScope::All, &enrolled, as_of());
        assert!(rows.iter().all(|r| r.employee_id != "emp_a"));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_removed_participant_reappears_in_fresh_preview() {
        let mut enrolled: HashSet<String> = ["emp_a".to_string()].into_iter().collect();
        let before = build_preview(&snapshot(), &CandidateScope::All, &enrolled, as_of());
        assert!(!before.iter().any(|r| r.employee_id == "emp_a"));

        enrolled.remove("emp_a");
        let after = build_preview(&snapshot(), &CandidateScope::All, &enrolled, as_of());
        assert!(after.iter().any(|r| r.employee_id == "emp_a"));
    }

    #[test]
    fn test_unresolved_rows_carry_warning() {
        let rows = build_preview(&snapshot(), &CandidateScope::All, &HashSet::new(), as_of());

        let ada = rows.iter().find(|r| r.employee_id == "emp_a").unwrap();
        assert!(ada.warning.is_none());
        assert_eq!(ada.evaluator.evaluator_id.as_deref(), Some("emp_mgr"));

        // Ben has no assignments at all, so no evaluator resolves.
        let ben = rows.iter().find(|r| r.employee_id == "emp_b").unwrap();
        assert_eq!(ben.warning.as_deref(), Some(NO_SUPERVISOR_WARNING));
        assert_eq!(ben.evaluator.source, EvaluatorSource::None);
    }
}
