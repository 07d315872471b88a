//! Core data models for the enrollment engine.
//!
//! This module contains all the domain models used throughout the engine.

mod delegation;
mod employee;
mod enrollment;
mod position;
mod snapshot;

pub use delegation::Delegation;
pub use employee::EmployeeProfile;
pub use enrollment::{
    BulkEnrollmentReport, BulkFailure, CandidateScope, EnrollmentWeight, EvaluatorResolution,
    EvaluatorSource, HandlingMode, ParticipantEnrollment, PreviewRow, ResolutionStep, RoleSegment,
};
pub use position::{ConcurrentPosition, Position, PositionAssignment};
pub use snapshot::OrgSnapshot;
