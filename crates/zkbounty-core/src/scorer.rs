//! Submission scoring: caller-supplied metrics or deterministic heuristics.

use std::collections::HashMap;

use crate::domain::{Dimension, ScoreSet};

/// Derive per-dimension scores for a submission.
///
/// A non-empty `metrics` map takes precedence: the five known dimension
/// keys pass through unvalidated (range enforcement is the circuit's job),
/// missing keys default to 0, unknown keys are ignored. Without metrics the
/// deterministic heuristics in [`heuristic_scores`] apply.
pub fn score_submission(
    content: &str,
    deliverables: &[String],
    metrics: Option<&HashMap<String, f64>>,
) -> ScoreSet {
    if let Some(metrics) = metrics {
        if !metrics.is_empty() {
            return ScoreSet::from_fn(|dimension| {
                metrics.get(dimension.as_str()).copied().unwrap_or(0.0)
            });
        }
    }
    heuristic_scores(content, deliverables)
}

/// Deterministic keyword/size heuristics for submissions without metrics.
///
/// Pure function of `content` and `deliverables`: identical inputs yield
/// identical scores on every call. All values are rounded to the nearest
/// integer.
pub fn heuristic_scores(content: &str, deliverables: &[String]) -> ScoreSet {
    let content_length = content.chars().count() as f64;
    let deliverables_count = deliverables.len();
    let lowered = content.to_lowercase();
    let mentions_any =
        |keywords: &[&str]| keywords.iter().any(|keyword| lowered.contains(keyword));

    let code_quality = ((content_length / 1000.0) * 50.0
        + if deliverables_count > 0 { 30.0 } else { 0.0 })
    .min(100.0);

    let completeness = ((deliverables_count * 20) as f64).min(100.0);

    let documentation: f64 = if mentions_any(&["documentation", "readme", "api"]) {
        75.0
    } else {
        40.0
    };

    let performance: f64 = if mentions_any(&["performance", "benchmark", "optimization"]) {
        70.0
    } else {
        50.0
    };

    let security: f64 = if mentions_any(&["security", "audit", "vulnerability"]) {
        80.0
    } else {
        45.0
    };

    ScoreSet {
        code_quality: code_quality.round(),
        completeness: completeness.round(),
        documentation: documentation.round(),
        performance: performance.round(),
        security: security.round(),
    }
}
