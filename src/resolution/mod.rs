//! Decision logic for the enrollment engine.
//!
//! This module contains the pure functions behind the workflow: the
//! evaluator precedence chain, multi-position detection, weight
//! apportionment and validation, the bulk-enrollment preview, and the
//! confirmation/batch-commit steps.

mod enrollment;
mod evaluator;
mod multi_position;
mod preview;
mod weights;

pub use enrollment::{build_enrollment, enroll_batch, role_segment_for};
pub use evaluator::{EvaluatorResolutionResult, resolve_evaluator};
pub use multi_position::{concurrent_positions, is_multi_position};
pub use preview::{NO_SUPERVISOR_WARNING, build_preview};
pub use weights::{WEIGHT_TOTAL, apply_handling_mode, default_weights, validate_weight_sum};
