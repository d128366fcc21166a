//! Domain-level error taxonomy for zkbounty.

/// Errors produced by score validation.
///
/// Defensive only: no documented caller path produces these in normal
/// operation (missing scores default to 0 via the clamp step), but the
/// circuit rejects inputs it cannot hash deterministically.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("score for {dimension} is not a finite number")]
    NonFiniteScore { dimension: String },
}

/// zkbounty evaluation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// The structural self-check on a freshly produced circuit output
    /// failed. Unreachable in normal operation — its presence signals an
    /// internal bug, not a user error.
    #[error("circuit verification failed for bounty {bounty_id}")]
    CircuitVerification { bounty_id: String },

    #[error("malformed circuit output: {0}")]
    MalformedCircuitOutput(String),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("history store error: {0}")]
    Store(#[from] crate::store::StoreError),
}

/// Result type for zkbounty domain operations.
pub type Result<T> = std::result::Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_error_display() {
        let err = EvalError::CircuitVerification {
            bounty_id: "bounty-1".to_string(),
        };
        assert!(err.to_string().contains("circuit verification failed"));
        assert!(err.to_string().contains("bounty-1"));

        let err = EvalError::MalformedCircuitOutput("weighted score not numeric".to_string());
        assert!(err.to_string().contains("malformed circuit output"));
    }

    #[test]
    fn test_validation_error_converts_to_eval_error() {
        let err: EvalError = ValidationError::NonFiniteScore {
            dimension: "security".to_string(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("validation error"));
        assert!(msg.contains("security"));
    }
}
