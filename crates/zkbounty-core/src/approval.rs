//! Approval policy: the final accept/reject gate for an evaluation.

use crate::domain::{CriteriaSet, Dimension, ScoreSet};

/// Minimum weighted score for approval.
pub const MIN_WEIGHTED_SCORE: f64 = 65.0;

/// Dimensions that must individually meet their criteria thresholds,
/// regardless of the weighted aggregate.
pub const CRITICAL_DIMENSIONS: [Dimension; 2] = [Dimension::Security, Dimension::Completeness];

/// Decide approval from the weighted aggregate and the critical dimensions.
///
/// Approval requires the weighted score to reach [`MIN_WEIGHTED_SCORE`] and
/// every critical dimension to meet its own criterion threshold. The raw
/// (pre-clamp) scores are checked, matching the inputs the orchestrator
/// holds at decision time. Pure function, no side effects.
pub fn decide_approval(criteria: &CriteriaSet, scores: &ScoreSet, weighted_score: f64) -> bool {
    let critical_met = CRITICAL_DIMENSIONS.iter().all(|&dimension| {
        criteria
            .criterion(dimension)
            .is_some_and(|criterion| scores.get(dimension) >= criterion.threshold)
    });
    weighted_score >= MIN_WEIGHTED_SCORE && critical_met
}
