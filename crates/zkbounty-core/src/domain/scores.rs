//! Score containers and review request payloads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::criteria::Dimension;

/// Per-dimension scores for a single evaluation.
///
/// # Invariants
///
/// Scores are in 0–100 once they have passed through the circuit's
/// validation step. A `ScoreSet` is produced fresh per evaluation and never
/// mutated after it lands in an [`super::evaluation::EvaluationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSet {
    pub code_quality: f64,
    pub completeness: f64,
    pub documentation: f64,
    pub performance: f64,
    pub security: f64,
}

impl ScoreSet {
    /// Score for a dimension.
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::CodeQuality => self.code_quality,
            Dimension::Completeness => self.completeness,
            Dimension::Documentation => self.documentation,
            Dimension::Performance => self.performance,
            Dimension::Security => self.security,
        }
    }

    /// Replace the score for a dimension.
    pub fn set(&mut self, dimension: Dimension, score: f64) {
        match dimension {
            Dimension::CodeQuality => self.code_quality = score,
            Dimension::Completeness => self.completeness = score,
            Dimension::Documentation => self.documentation = score,
            Dimension::Performance => self.performance = score,
            Dimension::Security => self.security = score,
        }
    }

    /// Build a score set by evaluating `f` for every dimension.
    pub fn from_fn(f: impl Fn(Dimension) -> f64) -> Self {
        Self {
            code_quality: f(Dimension::CodeQuality),
            completeness: f(Dimension::Completeness),
            documentation: f(Dimension::Documentation),
            performance: f(Dimension::Performance),
            security: f(Dimension::Security),
        }
    }
}

/// A bounty submission presented for review.
///
/// `bounty_id` and `submission_content` are required by callers of the
/// evaluator; validating their presence is the transport layer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub bounty_id: String,
    pub submission_content: String,

    #[serde(default)]
    pub deliverables: Vec<String>,

    /// Optional caller-supplied per-dimension metrics, keyed by wire name
    /// (`codeQuality`, …). When present and non-empty they replace the
    /// heuristic scorer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<HashMap<String, f64>>,
}
