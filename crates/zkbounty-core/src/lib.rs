//! zkBounty Core Library
//!
//! Evaluation-and-commitment engine for bounty submissions: weighted
//! criteria scoring, hash commitments over the evaluation inputs, and
//! salted attestations presented as "zero-knowledge proofs".
//!
//! The attestation scheme is a salted SHA-256 digest with no soundness or
//! zero-knowledge guarantee — see [`circuit`] for the documented
//! limitation and the seam a real proving system would plug into.

pub mod approval;
pub mod circuit;
pub mod domain;
pub mod evaluator;
pub mod obs;
pub mod report;
pub mod scorer;
pub mod store;
pub mod telemetry;

// Re-export key types
pub use approval::{decide_approval, CRITICAL_DIMENSIONS, MIN_WEIGHTED_SCORE};
pub use circuit::{weighted_score, EvaluationCircuit, FixedNonce, NonceSource, UuidNonce};
pub use domain::{
    CircuitOutput, CriteriaSet, Criterion, Dimension, EvalError, EvaluationResult, Result,
    ReviewRequest, ScoreSet, ValidationError,
};
pub use evaluator::BountyEvaluator;
pub use report::render_audit_report;
pub use scorer::{heuristic_scores, score_submission};
pub use store::{HistoryStore, MemoryHistoryStore, StoreError, StoreResult};
pub use telemetry::init_tracing;

/// zkBounty version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
