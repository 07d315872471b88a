//! Error types for the Evaluator Resolution & Enrollment Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during enrollment processing.
//!
//! Note that an employee resolving to *no* evaluator is not an error: it is
//! a valid, reportable outcome surfaced as a warning (see
//! [`crate::resolution::resolve_evaluator`]).

use thiserror::Error;

use crate::store::StoreError;

/// The main error type for the enrollment engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use appraisal_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The request snapshot was scoped to a different company than the
    /// one this engine instance is configured for.
    #[error("Snapshot is scoped to company '{actual}' but this engine serves '{expected}'")]
    CompanyMismatch {
        /// The company id the engine is configured for.
        expected: String,
        /// The company id carried by the snapshot.
        actual: String,
    },

    /// Enrollment weights did not sum to exactly 100.
    #[error("Enrollment weights must sum to exactly 100, got {actual}")]
    WeightSumMismatch {
        /// The actual sum of the submitted weights.
        actual: u32,
    },

    /// A weight record referenced a position the employee does not hold.
    #[error("Employee '{employee_id}' holds no active assignment for position '{position_id}'")]
    UnknownPosition {
        /// The employee being enrolled.
        employee_id: String,
        /// The position id that was not among their active assignments.
        position_id: String,
    },

    /// More than one weight record was submitted for the same position.
    #[error("Duplicate weight record for position '{position_id}'")]
    DuplicateWeight {
        /// The position id that appeared more than once.
        position_id: String,
    },

    /// A persistence operation failed.
    #[error("Participant store error: {0}")]
    Store(#[from] StoreError),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
