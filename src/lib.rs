//! Evaluator Resolution & Enrollment Engine for performance appraisal cycles.
//!
//! This crate determines who evaluates an employee enrolled into an appraisal
//! cycle (a deterministic precedence chain over the reporting hierarchy and
//! active delegations) and how their score is apportioned across concurrent
//! positions (FTE-proportional weights normalized to exactly 100).

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod resolution;
pub mod store;
