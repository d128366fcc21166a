//! Circuit output and persisted evaluation records.

use serde::{Deserialize, Serialize};

use crate::domain::scores::ScoreSet;

/// Commitment + attestation pair produced by one circuit execution.
///
/// Immutable once produced. `proof` is a salted hash attestation rendered
/// as `0x` + 64 hex characters — not a succinct zero-knowledge proof (see
/// [`crate::circuit`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitOutput {
    /// SHA-256 of the canonical input record, 64 lowercase hex characters.
    pub commitment: String,

    /// Ordered pair: `[commitment, weighted-score-as-string]`.
    pub public_inputs: Vec<String>,

    /// Single element: the canonical serialized input record.
    pub private_inputs: Vec<String>,

    /// Attestation string, `0x` + 64 hex characters.
    pub proof: String,
}

/// The outcome of one bounty evaluation, as stored in the history.
///
/// Created once per `evaluate` call and never mutated after insertion;
/// re-evaluating the same bounty id overwrites the stored entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub bounty_id: String,
    pub scores: ScoreSet,
    pub weighted_score: f64,

    /// Copy of `circuit_output.proof`, kept for wire compatibility.
    pub zk_proof: String,

    pub circuit_output: CircuitOutput,
    pub approved: bool,

    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}
