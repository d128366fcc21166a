//! Evaluation circuit: clamp/threshold validation, weighted aggregation,
//! and commitment/attestation generation.
//!
//! The "proof" produced here is a salted SHA-256 attestation over the
//! commitment — it asserts that an evaluation took place but carries no
//! soundness or zero-knowledge property. Likewise [`EvaluationCircuit::verify`]
//! checks output *shape* only and cannot detect a forged or mismatched
//! commitment/score pair. A genuine upgrade path would plug an external
//! proving system in behind this module's `execute`/`verify` contract.

use chrono::Utc;
use serde::Serialize;

use crate::domain::digest;
use crate::domain::{
    CircuitOutput, CriteriaSet, Dimension, Result, ScoreSet, ValidationError,
};

/// Source of attestation nonces.
///
/// Injected so the attestation can be made reproducible in tests. The
/// default [`UuidNonce`] draws a fresh random value per attestation, which
/// makes proofs non-deterministic. The commitment never includes the nonce.
pub trait NonceSource: Send + Sync {
    fn nonce(&self) -> String;
}

/// Random v4 UUID nonce (default).
#[derive(Debug, Default)]
pub struct UuidNonce;

impl NonceSource for UuidNonce {
    fn nonce(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Fixed nonce, for deterministic attestations in tests.
#[derive(Debug, Clone)]
pub struct FixedNonce(pub String);

impl NonceSource for FixedNonce {
    fn nonce(&self) -> String {
        self.0.clone()
    }
}

/// The record bound by the commitment: validated scores, evaluator
/// address, and execution timestamp.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CircuitInputs<'a> {
    code_quality: f64,
    completeness: f64,
    documentation: f64,
    performance: f64,
    security: f64,
    evaluator: &'a str,
    timestamp: i64,
}

/// Attestation payload: the commitment salted with a nonce.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AttestationInputs<'a> {
    commitment: &'a str,
    timestamp: i64,
    nonce: String,
}

/// Validates scores against the criteria, computes the weighted aggregate,
/// and produces the commitment + attestation pair.
pub struct EvaluationCircuit {
    criteria: CriteriaSet,
    nonce_source: Box<dyn NonceSource>,
}

impl EvaluationCircuit {
    /// Circuit with random attestation nonces.
    pub fn new(criteria: CriteriaSet) -> Self {
        Self::with_nonce_source(criteria, Box::new(UuidNonce))
    }

    /// Circuit with an injected nonce source.
    pub fn with_nonce_source(criteria: CriteriaSet, nonce_source: Box<dyn NonceSource>) -> Self {
        Self {
            criteria,
            nonce_source,
        }
    }

    /// Execute the circuit over a score set.
    ///
    /// Never fails in normal operation: out-of-range scores are clamped and
    /// below-threshold scores zeroed rather than rejected. Only non-finite
    /// inputs (which cannot be hashed deterministically) are refused.
    pub fn execute(&self, scores: &ScoreSet, evaluator_address: &str) -> Result<CircuitOutput> {
        let validated = self.validate_scores(scores)?;
        let timestamp = Utc::now().timestamp_millis();

        let inputs = CircuitInputs {
            code_quality: validated.code_quality,
            completeness: validated.completeness,
            documentation: validated.documentation,
            performance: validated.performance,
            security: validated.security,
            evaluator: evaluator_address,
            timestamp,
        };
        let serialized = digest::canonical_json(&serde_json::to_value(&inputs)?)?;
        let commitment = digest::sha256_hex(serialized.as_bytes());

        let proof = self.attest(&commitment, timestamp)?;
        let weighted = weighted_score(&self.criteria, &validated);

        Ok(CircuitOutput {
            commitment: commitment.clone(),
            public_inputs: vec![commitment, weighted.to_string()],
            private_inputs: vec![serialized],
            proof,
        })
    }

    /// Structural check of a circuit output.
    ///
    /// Verifies *shape*, not correctness: commitment length, proof prefix,
    /// public-input arity, and that the weighted score parses as a number.
    /// A forged commitment/score pair with the right shape passes. This
    /// limitation is deliberate; do not silently upgrade it.
    pub fn verify(&self, output: &CircuitOutput) -> bool {
        output.commitment.len() == 64
            && output.proof.starts_with("0x")
            && output.public_inputs.len() == 2
            && output.public_inputs[1].parse::<f64>().is_ok()
    }

    /// Clamp each score to 0–100 and zero out dimensions below their
    /// criterion threshold. Dimensions without a configured criterion score
    /// 0 and carry no weight.
    fn validate_scores(&self, scores: &ScoreSet) -> std::result::Result<ScoreSet, ValidationError> {
        let mut validated = ScoreSet::from_fn(|_| 0.0);
        for dimension in Dimension::ALL {
            let raw = scores.get(dimension);
            if !raw.is_finite() {
                return Err(ValidationError::NonFiniteScore {
                    dimension: dimension.as_str().to_string(),
                });
            }
            let Some(criterion) = self.criteria.criterion(dimension) else {
                continue;
            };
            let clamped = raw.clamp(0.0, 100.0);
            let gated = if clamped >= criterion.threshold {
                clamped
            } else {
                0.0
            };
            validated.set(dimension, gated);
        }
        Ok(validated)
    }

    fn attest(&self, commitment: &str, timestamp: i64) -> Result<String> {
        let payload = AttestationInputs {
            commitment,
            timestamp,
            nonce: self.nonce_source.nonce(),
        };
        let attestation = digest::digest_value(&serde_json::to_value(&payload)?)?;
        Ok(format!("0x{}", attestation))
    }
}

/// Threshold-gated weighted average over the criteria set, in 0–100.
///
/// Every dimension with a configured criterion contributes its weight to
/// the denominator, including dimensions whose score was zeroed by the
/// threshold gate — a below-threshold score drags the aggregate down
/// rather than being excluded.
pub fn weighted_score(criteria: &CriteriaSet, validated: &ScoreSet) -> f64 {
    let mut total_weight = 0.0;
    let mut weighted_sum = 0.0;
    for dimension in Dimension::ALL {
        let Some(criterion) = criteria.criterion(dimension) else {
            continue;
        };
        total_weight += criterion.weight;
        weighted_sum += validated.get(dimension) * criterion.weight;
    }
    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circuit() -> EvaluationCircuit {
        EvaluationCircuit::new(CriteriaSet::default_set())
    }

    fn passing_scores() -> ScoreSet {
        ScoreSet {
            code_quality: 55.0,
            completeness: 100.0,
            documentation: 75.0,
            performance: 70.0,
            security: 80.0,
        }
    }

    #[test]
    fn test_execute_produces_well_formed_output() {
        let output = circuit()
            .execute(&passing_scores(), "evaluator-001")
            .expect("execute");

        assert_eq!(output.commitment.len(), 64);
        assert!(output.commitment.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(output.commitment, output.commitment.to_lowercase());

        assert!(output.proof.starts_with("0x"));
        assert_eq!(output.proof.len(), 66);
        assert!(output.proof[2..].chars().all(|c| c.is_ascii_hexdigit()));

        assert_eq!(output.public_inputs.len(), 2);
        assert_eq!(output.public_inputs[0], output.commitment);
        assert_eq!(output.private_inputs.len(), 1);
    }

    #[test]
    fn test_verify_accepts_fresh_output() {
        let c = circuit();
        let output = c.execute(&passing_scores(), "evaluator-001").expect("execute");
        assert!(c.verify(&output));
    }

    #[test]
    fn test_verify_is_shape_only() {
        let c = circuit();
        let mut output = c.execute(&passing_scores(), "evaluator-001").expect("execute");

        // A forged commitment of the right length still passes
        output.commitment = "0".repeat(64);
        assert!(c.verify(&output));

        // Shape violations fail
        output.commitment = "short".to_string();
        assert!(!c.verify(&output));

        let mut output = c.execute(&passing_scores(), "evaluator-001").expect("execute");
        output.proof = output.proof.trim_start_matches("0x").to_string();
        assert!(!c.verify(&output));

        let mut output = c.execute(&passing_scores(), "evaluator-001").expect("execute");
        output.public_inputs[1] = "not-a-number".to_string();
        assert!(!c.verify(&output));
    }

    #[test]
    fn test_commitment_binds_private_inputs_without_nonce() {
        let c = EvaluationCircuit::with_nonce_source(
            CriteriaSet::default_set(),
            Box::new(FixedNonce("nonce-under-test".to_string())),
        );
        let output = c.execute(&passing_scores(), "evaluator-001").expect("execute");

        // Commitment is exactly the digest of the serialized private inputs
        assert_eq!(
            output.commitment,
            digest::sha256_hex(output.private_inputs[0].as_bytes()),
        );
        // and the nonce never leaks into the committed record
        assert!(!output.private_inputs[0].contains("nonce-under-test"));
    }

    #[test]
    fn test_attestation_is_nonce_salted() {
        let c = circuit();
        let first = c.execute(&passing_scores(), "evaluator-001").expect("execute");
        let second = c.execute(&passing_scores(), "evaluator-001").expect("execute");
        assert_ne!(first.proof, second.proof);
    }

    #[test]
    fn test_validate_clamps_out_of_range_scores() {
        let c = circuit();
        let scores = ScoreSet {
            code_quality: 150.0,
            completeness: -10.0,
            documentation: 75.0,
            performance: 70.0,
            security: 80.0,
        };
        let validated = c.validate_scores(&scores).expect("validate");
        assert_eq!(validated.code_quality, 100.0);
        assert_eq!(validated.completeness, 0.0);
    }

    #[test]
    fn test_validate_zeroes_below_threshold() {
        let c = circuit();
        let scores = ScoreSet {
            code_quality: 49.0,  // threshold 50
            completeness: 60.0,  // threshold 60, boundary passes
            documentation: 39.0, // threshold 40
            performance: 50.0,   // threshold 50, boundary passes
            security: 59.0,      // threshold 60
        };
        let validated = c.validate_scores(&scores).expect("validate");
        assert_eq!(validated.code_quality, 0.0);
        assert_eq!(validated.completeness, 60.0);
        assert_eq!(validated.documentation, 0.0);
        assert_eq!(validated.performance, 50.0);
        assert_eq!(validated.security, 0.0);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let c = circuit();
        let scores = ScoreSet {
            code_quality: 150.0,
            completeness: 45.0,
            documentation: 75.0,
            performance: -3.0,
            security: 99.0,
        };
        let once = c.validate_scores(&scores).expect("validate once");
        let twice = c.validate_scores(&once).expect("validate twice");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_validate_rejects_non_finite_scores() {
        let c = circuit();
        let mut scores = passing_scores();
        scores.security = f64::NAN;
        let err = c.validate_scores(&scores).expect_err("NaN rejected");
        assert!(err.to_string().contains("security"));
    }

    #[test]
    fn test_weighted_score_stays_in_range() {
        let criteria = CriteriaSet::default_set();
        let zero = ScoreSet::from_fn(|_| 0.0);
        let full = ScoreSet::from_fn(|_| 100.0);
        assert_eq!(weighted_score(&criteria, &zero), 0.0);
        assert_eq!(weighted_score(&criteria, &full), 100.0);

        let mixed = circuit().validate_scores(&passing_scores()).expect("validate");
        let score = weighted_score(&criteria, &mixed);
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_weighted_score_counts_zeroed_weights() {
        // completeness 20 is below its 60 threshold: zeroed in the numerator
        // but its 0.25 weight still divides the aggregate.
        let c = circuit();
        let scores = ScoreSet {
            code_quality: 0.0,
            completeness: 20.0,
            documentation: 40.0,
            performance: 50.0,
            security: 0.0,
        };
        let validated = c.validate_scores(&scores).expect("validate");
        assert_eq!(validated.completeness, 0.0);

        let score = weighted_score(&CriteriaSet::default_set(), &validated);
        // (40 * 0.15 + 50 * 0.20) / 1.0
        assert!((score - 16.0).abs() < 1e-9);
    }
}
