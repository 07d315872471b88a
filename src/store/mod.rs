//! Persistence boundary for participant records.
//!
//! The engine's only write targets are participant rows, their weight
//! records, and role-change segments. The storage abstraction keeps the
//! enrollment workflow exercisable without a live backend.

mod memory;

pub use memory::InMemoryParticipantStore;

use thiserror::Error;

use crate::models::{ParticipantEnrollment, RoleSegment};

/// Error enumeration for participant-store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The (cycle, employee) pair is already enrolled.
    #[error("employee '{employee_id}' is already enrolled in cycle '{cycle_id}'")]
    Conflict {
        /// The cycle the insert targeted.
        cycle_id: String,
        /// The employee that was already enrolled.
        employee_id: String,
    },

    /// No participant record exists for the (cycle, employee) pair.
    #[error("employee '{employee_id}' is not enrolled in cycle '{cycle_id}'")]
    NotFound {
        /// The cycle the operation targeted.
        cycle_id: String,
        /// The employee that was not found.
        employee_id: String,
    },

    /// The store could not be reached or refused the operation.
    #[error("participant store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for participant records.
///
/// Implementations must treat every operation independently: a failed
/// insert never affects previously inserted rows (bulk enrollment relies on
/// this for its partial-failure accounting).
pub trait ParticipantStore: Send + Sync {
    /// Inserts a participant record. Fails with [`StoreError::Conflict`]
    /// when the (cycle, employee) pair is already enrolled.
    fn insert(&self, enrollment: &ParticipantEnrollment) -> Result<(), StoreError>;

    /// Removes a participant from a cycle, destroying the enrollment
    /// record and its weights.
    fn remove(&self, cycle_id: &str, employee_id: &str) -> Result<(), StoreError>;

    /// Returns all participants of a cycle.
    fn participants(&self, cycle_id: &str) -> Result<Vec<ParticipantEnrollment>, StoreError>;

    /// Records a role-change segment alongside an enrollment.
    fn insert_role_segment(&self, segment: &RoleSegment) -> Result<(), StoreError>;
}
