//! Weight apportionment for multi-position employees.
//!
//! Default weights are FTE-proportional, rounded to integers, then nudged
//! once so the total is exactly 100. Confirmation enforces the 100-sum
//! invariant as a hard precondition.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{ConcurrentPosition, EnrollmentWeight, HandlingMode};

/// The exact total every confirmed weight distribution must reach.
pub const WEIGHT_TOTAL: u32 = 100;

/// Index of the position that receives the rounding correction: the one
/// flagged primary, or the first if none is flagged.
fn correction_index(positions: &[ConcurrentPosition]) -> usize {
    positions
        .iter()
        .position(|p| p.is_primary)
        .unwrap_or(0)
}

/// Computes the default weight distribution for a set of concurrent
/// positions.
///
/// Each position's raw weight is `round(fte_i / sum(fte) * 100)`, rounding
/// half away from zero. Because rounding can push the sum off 100, a single
/// corrective adjustment of `100 - sum(rounded)` is applied to the primary
/// position (or the first, if none is flagged; or the largest share when
/// the primary's cannot absorb a negative correction). This trades a small
/// distortion in one position's share for an exact total.
///
/// Positions with a non-positive FTE total fall back to an even split, with
/// the remainder on the correction position, so the invariant holds even on
/// degenerate data.
///
/// # Example
///
/// ```
/// use appraisal_engine::models::ConcurrentPosition;
/// use appraisal_engine::resolution::default_weights;
/// use rust_decimal::Decimal;
///
/// let positions = vec![
///     ConcurrentPosition {
///         position_id: "pos_a".to_string(),
///         title: "A".to_string(),
///         fte_share: Decimal::new(60, 0),
///         is_primary: true,
///     },
///     ConcurrentPosition {
///         position_id: "pos_b".to_string(),
///         title: "B".to_string(),
///         fte_share: Decimal::new(40, 0),
///         is_primary: false,
///     },
/// ];
/// let weights = default_weights(&positions);
/// assert_eq!(weights[0].weight_percentage, 60);
/// assert_eq!(weights[1].weight_percentage, 40);
/// ```
pub fn default_weights(positions: &[ConcurrentPosition]) -> Vec<EnrollmentWeight> {
    if positions.is_empty() {
        return Vec::new();
    }

    let total: Decimal = positions.iter().map(|p| p.fte_share).sum();

    let mut weights: Vec<EnrollmentWeight> = if total > Decimal::ZERO {
        positions
            .iter()
            .map(|p| {
                let share = p.fte_share / total * Decimal::from(WEIGHT_TOTAL);
                let rounded = share
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_u32()
                    .unwrap_or(0);
                EnrollmentWeight {
                    position_id: p.position_id.clone(),
                    weight_percentage: rounded,
                    is_primary: p.is_primary,
                }
            })
            .collect()
    } else {
        let even = WEIGHT_TOTAL / positions.len() as u32;
        positions
            .iter()
            .map(|p| EnrollmentWeight {
                position_id: p.position_id.clone(),
                weight_percentage: even,
                is_primary: p.is_primary,
            })
            .collect()
    };

    let sum: i64 = weights.iter().map(|w| i64::from(w.weight_percentage)).sum();
    let diff = i64::from(WEIGHT_TOTAL) - sum;
    if diff != 0 {
        let mut idx = correction_index(positions);
        if i64::from(weights[idx].weight_percentage) + diff < 0 {
            // The primary's rounded share cannot absorb a negative
            // correction; fall back to the largest share, which always can.
            idx = weights
                .iter()
                .enumerate()
                .max_by_key(|(_, w)| w.weight_percentage)
                .map(|(i, _)| i)
                .unwrap_or(idx);
        }
        let adjusted = (i64::from(weights[idx].weight_percentage) + diff).max(0);
        weights[idx].weight_percentage = adjusted as u32;
    }

    weights
}

/// Validates that a weight distribution sums to exactly 100.
///
/// This is a hard precondition for confirmation, not a warning.
pub fn validate_weight_sum(weights: &[EnrollmentWeight]) -> EngineResult<()> {
    let sum: u32 = weights.iter().map(|w| w.weight_percentage).sum();
    if sum != WEIGHT_TOTAL {
        return Err(EngineError::WeightSumMismatch { actual: sum });
    }
    Ok(())
}

/// Applies the handling mode to a confirmed weight distribution.
///
/// `aggregate` and `separate` keep the distribution as confirmed
/// (`separate` persists the weights for information only). `primary_only`
/// replaces the distribution with a single 100% record on the primary
/// position, regardless of FTE values.
pub fn apply_handling_mode(
    mode: HandlingMode,
    positions: &[ConcurrentPosition],
    weights: Vec<EnrollmentWeight>,
) -> Vec<EnrollmentWeight> {
    match mode {
        HandlingMode::Aggregate | HandlingMode::Separate => weights,
        HandlingMode::PrimaryOnly => {
            let idx = correction_index(positions);
            match positions.get(idx) {
                Some(primary) => vec![EnrollmentWeight {
                    position_id: primary.position_id.clone(),
                    weight_percentage: WEIGHT_TOTAL,
                    is_primary: true,
                }],
                None => Vec::new(),
            }
        }
    }
}
