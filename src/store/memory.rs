//! In-memory participant store.
//!
//! Backs the API and the test suite. Participant rows are keyed by
//! (cycle, employee); role segments accumulate in insertion order.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::{ParticipantEnrollment, RoleSegment};

use super::{ParticipantStore, StoreError};

#[derive(Default)]
struct Inner {
    participants: HashMap<(String, String), ParticipantEnrollment>,
    role_segments: Vec<RoleSegment>,
}

/// A thread-safe in-memory implementation of [`ParticipantStore`].
#[derive(Default)]
pub struct InMemoryParticipantStore {
    inner: Mutex<Inner>,
}

impl InMemoryParticipantStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the role segments recorded so far, in insertion order.
    pub fn role_segments(&self) -> Vec<RoleSegment> {
        self.lock().role_segments.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panicked test thread; the data is still
        // consistent for reads and writes of whole entries.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ParticipantStore for InMemoryParticipantStore {
    fn insert(&self, enrollment: &ParticipantEnrollment) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let key = (enrollment.cycle_id.clone(), enrollment.employee_id.clone());
        if inner.participants.contains_key(&key) {
            return Err(StoreError::Conflict {
                cycle_id: enrollment.cycle_id.clone(),
                employee_id: enrollment.employee_id.clone(),
            });
        }
        inner.participants.insert(key, enrollment.clone());
        Ok(())
    }

    fn remove(&self, cycle_id: &str, employee_id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let key = (cycle_id.to_string(), employee_id.to_string());
        if inner.participants.remove(&key).is_none() {
            return Err(StoreError::NotFound {
                cycle_id: cycle_id.to_string(),
                employee_id: employee_id.to_string(),
            });
        }
        Ok(())
    }

    fn participants(&self, cycle_id: &str) -> Result<Vec<ParticipantEnrollment>, StoreError> {
        let inner = self.lock();
        let mut rows: Vec<ParticipantEnrollment> = inner
            .participants
            .values()
            .filter(|p| p.cycle_id == cycle_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Ok(rows)
    }

    fn insert_role_segment(&self, segment: &RoleSegment) -> Result<(), StoreError> {
        self.lock().role_segments.push(segment.clone());
        Ok(())
    }
}
