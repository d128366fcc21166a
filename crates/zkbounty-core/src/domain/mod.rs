//! Domain models for zkbounty.
//!
//! Canonical definitions for the core entities:
//! - `CriteriaSet`: Immutable weighted-threshold scoring configuration
//! - `ScoreSet`: Per-dimension scores for one evaluation
//! - `CircuitOutput`: Commitment + attestation pair
//! - `EvaluationResult`: Persisted evaluation outcome

pub mod criteria;
pub mod digest;
pub mod error;
pub mod evaluation;
pub mod scores;

// Re-export main types and errors
pub use criteria::{CriteriaSet, Criterion, Dimension};
pub use error::{EvalError, Result, ValidationError};
pub use evaluation::{CircuitOutput, EvaluationResult};
pub use scores::{ReviewRequest, ScoreSet};
