//! Evaluator resolution: the deterministic precedence chain.
//!
//! Given an employee and an organizational snapshot, this module determines
//! who evaluates them. The chain walks the primary position's direct
//! reporting line, falls back to the matrix line, and finally checks whether
//! the supervisor it found currently delegates approval authority.
//!
//! Final precedence, highest first: delegate > direct supervisor > matrix
//! supervisor > none. "None" is a valid, reportable outcome, not an error.

use chrono::NaiveDate;

use crate::models::{
    EvaluatorResolution, EvaluatorSource, OrgSnapshot, PositionAssignment, ResolutionStep,
};

/// The result of resolving an evaluator, including the trace of rules that
/// were checked.
#[derive(Debug, Clone)]
pub struct EvaluatorResolutionResult {
    /// The resolved evaluator (or the terminal "none" outcome).
    pub resolution: EvaluatorResolution,
    /// The rules that were checked, in order, and what each found.
    pub steps: Vec<ResolutionStep>,
}

fn step(steps: &mut Vec<ResolutionStep>, rule: &str, outcome: impl Into<String>) {
    steps.push(ResolutionStep {
        rule: rule.to_string(),
        outcome: outcome.into(),
    });
}

/// Selects the primary assignment: the one flagged primary, or the first
/// active assignment when none is flagged.
fn primary_assignment<'a>(assignments: &[&'a PositionAssignment]) -> Option<&'a PositionAssignment> {
    assignments
        .iter()
        .find(|a| a.is_primary)
        .or_else(|| assignments.first())
        .copied()
}

/// Resolves the evaluator for an employee.
///
/// This is a pure function over the snapshot: no live queries, no caching.
/// "Today" is always the explicit `as_of` parameter so delegation windows
/// are testable.
///
/// # Algorithm
///
/// 1. Take the employee's active assignments; the primary position is the
///    one flagged primary, or the first if none is flagged. Zero active
///    assignments short-circuits to `source = none`.
/// 2. If the primary position declares a reports-to position, its active
///    holder is the direct-supervisor candidate.
/// 3. Only when no direct supervisor was found, the matrix-supervisor
///    position's active holder is the matrix candidate.
/// 4. If either line resolved, check whether that supervisor has a
///    delegation in force on `as_of`; the delegate outranks them. When
///    neither line resolved there is nothing to delegate from, so
///    delegation is deliberately not checked.
///
/// # Example
///
/// ```
/// use appraisal_engine::models::{EvaluatorSource, OrgSnapshot};
/// use appraisal_engine::resolution::resolve_evaluator;
/// use chrono::NaiveDate;
///
/// let snapshot = OrgSnapshot {
///     company_id: "acme".to_string(),
///     employees: vec![],
///     positions: vec![],
///     assignments: vec![],
///     delegations: vec![],
/// };
/// let as_of = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// let result = resolve_evaluator(&snapshot, "emp_unassigned", as_of);
/// assert_eq!(result.resolution.source, EvaluatorSource::None);
/// ```
pub fn resolve_evaluator(
    snapshot: &OrgSnapshot,
    employee_id: &str,
    as_of: NaiveDate,
) -> EvaluatorResolutionResult {
    let mut steps = Vec::new();

    let assignments = snapshot.active_assignments(employee_id);
    if assignments.is_empty() {
        step(
            &mut steps,
            "primary_position",
            format!("employee '{}' has no active position assignments", employee_id),
        );
        return EvaluatorResolutionResult {
            resolution: EvaluatorResolution::none(),
            steps,
        };
    }

    // Invariant from step 1: assignments is non-empty, so a primary exists.
    let primary = match primary_assignment(&assignments) {
        Some(primary) => primary,
        None => {
            return EvaluatorResolutionResult {
                resolution: EvaluatorResolution::none(),
                steps,
            };
        }
    };
    step(
        &mut steps,
        "primary_position",
        format!(
            "primary position '{}' ({})",
            primary.position_id,
            if primary.is_primary {
                "flagged primary"
            } else {
                "first active assignment"
            }
        ),
    );

    let position = match snapshot.position(&primary.position_id) {
        Some(position) => position,
        None => {
            step(
                &mut steps,
                "primary_position",
                format!("position '{}' missing from snapshot", primary.position_id),
            );
            return EvaluatorResolutionResult {
                resolution: EvaluatorResolution::none(),
                steps,
            };
        }
    };

    // Step 2: direct reporting line.
    let direct = position.reports_to.as_deref().and_then(|reports_to| {
        let holder = snapshot.holder_of(reports_to);
        step(
            &mut steps,
            "direct_supervisor",
            match holder {
                Some(holder) => format!(
                    "position '{}' reports to '{}', held by '{}'",
                    position.id, reports_to, holder
                ),
                None => format!(
                    "position '{}' reports to '{}', which has no active holder",
                    position.id, reports_to
                ),
            },
        );
        holder
    });
    if position.reports_to.is_none() {
        step(
            &mut steps,
            "direct_supervisor",
            format!("position '{}' declares no reports-to position", position.id),
        );
    }

    // Step 3: matrix line, only when the direct line failed.
    let matrix = if direct.is_none() {
        position.matrix_supervisor.as_deref().and_then(|matrix_pos| {
            let holder = snapshot.holder_of(matrix_pos);
            step(
                &mut steps,
                "matrix_supervisor",
                match holder {
                    Some(holder) => format!(
                        "matrix position '{}' held by '{}'",
                        matrix_pos, holder
                    ),
                    None => format!("matrix position '{}' has no active holder", matrix_pos),
                },
            );
            holder
        })
    } else {
        None
    };

    // Step 4: delegation, only against whichever supervisor was found.
    let supervisor_to_check = direct.or(matrix);
    let delegate = match supervisor_to_check {
        Some(supervisor) => {
            let delegation = snapshot.active_delegation_for(supervisor, as_of);
            step(
                &mut steps,
                "delegation",
                match delegation {
                    Some(delegation) => format!(
                        "supervisor '{}' delegates to '{}' on {}",
                        supervisor, delegation.delegate_id, as_of
                    ),
                    None => format!("supervisor '{}' has no delegation in force on {}", supervisor, as_of),
                },
            );
            delegation.map(|d| d.delegate_id.as_str())
        }
        None => {
            step(
                &mut steps,
                "delegation",
                "no supervisor line resolved; delegation not checked",
            );
            None
        }
    };

    // Step 5: first non-null candidate wins, highest precedence first.
    let (evaluator_id, source) = if let Some(delegate) = delegate {
        (Some(delegate), EvaluatorSource::Delegate)
    } else if let Some(direct) = direct {
        (Some(direct), EvaluatorSource::DirectSupervisor)
    } else if let Some(matrix) = matrix {
        (Some(matrix), EvaluatorSource::MatrixSupervisor)
    } else {
        (None, EvaluatorSource::None)
    };

    let evaluator_name = evaluator_id.and_then(|id| snapshot.display_name(id));

    EvaluatorResolutionResult {
        resolution: EvaluatorResolution {
            evaluator_id: evaluator_id.map(str::to_string),
            evaluator_name,
            source,
        },
        steps,
    }
}
