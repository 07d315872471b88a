//! Delegation model.
//!
//! A delegation temporarily hands a supervisor's approval authority to
//! someone else. The engine treats "at most one active delegation per
//! delegator overlapping any given date" as a data-integrity invariant the
//! caller upholds; when the data violates it, the first match wins.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A time-bounded delegation of approval authority.
///
/// # Example
///
/// ```
/// use appraisal_engine::models::Delegation;
/// use chrono::NaiveDate;
///
/// let delegation = Delegation {
///     delegator_id: "emp_mgr".to_string(),
///     delegate_id: "emp_deputy".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end_date: None,
///     is_active: true,
/// };
/// let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
/// assert!(delegation.covers(today));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    /// The supervisor handing authority away.
    pub delegator_id: String,
    /// The person receiving the authority.
    pub delegate_id: String,
    /// First date (inclusive) the delegation applies.
    pub start_date: NaiveDate,
    /// Last date (inclusive) the delegation applies; open-ended when `None`.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Whether the delegation record is active at all.
    pub is_active: bool,
}

impl Delegation {
    /// Returns true if this delegation is in force on the given date.
    ///
    /// A delegation covers a date when it is active and the date falls
    /// within `[start_date, end_date]`; an absent `end_date` means the
    /// delegation is open-ended.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.start_date <= date
            && self.end_date.is_none_or(|end| date <= end)
    }
}
